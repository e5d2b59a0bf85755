//! Box Canvas Component
//!
//! Free-form board of draggable, resizable snippet boxes.

use leptos::prelude::*;
use leptos_pointer::geometry::{EXTENT_H, EXTENT_W};
use leptos_pointer::Bounds;

use crate::commands;
use crate::components::{CanvasBoxView, ExportButton, ImportButton};
use crate::context::use_app_context;
use crate::domain::add_box;
use crate::domain::transfer::{export_boxes, import_boxes};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BoxCanvas() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (new_text, set_new_text) = signal(String::new());

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut boxes = store.boxes().get_untracked();
        let added = add_box(&mut boxes, &new_text.get_untracked(), commands::now_ms(), &Bounds::default());
        tracing::info!("Added box {} at ({}, {})", added.id, added.x, added.y);
        store.boxes().set(boxes);
        set_new_text.set(String::new());
    };

    let on_import = move |json: String| {
        let mut boxes = store.boxes().get_untracked();
        match import_boxes(&json, &mut boxes, &Bounds::default(), commands::now_ms()) {
            Ok(summary) => {
                tracing::info!("Imported boxes: {:?}", summary);
                store.boxes().set(boxes);
                ctx.notify(summary.message("box"));
            }
            Err(e) => {
                tracing::warn!("Box import rejected: {}", e);
                commands::alert(&format!("Import failed: {}", e));
            }
        }
    };

    let canvas_style = move || {
        let settings = store.settings().get();
        let mut style = format!("width: {}px; height: {}px;", EXTENT_W, EXTENT_H);
        if settings.snap_to_grid {
            style.push_str(&format!(" background-size: {0}px {0}px;", settings.grid_size));
        }
        style
    };

    view! {
        <section class="canvas-view">
            <div class="canvas-toolbar">
                <form class="new-box-form" on:submit=on_add>
                    <input
                        type="text"
                        placeholder="New box text..."
                        prop:value=move || new_text.get()
                        on:input=move |ev| set_new_text.set(event_target_value(&ev))
                    />
                    <button type="submit">"Add box"</button>
                </form>
                <ExportButton
                    label="Export canvas"
                    kind="canvas"
                    export=move |now| store.boxes().with_untracked(|boxes| export_boxes(boxes, now))
                />
                <ImportButton label="Import canvas" on_text=on_import />
                <span class="item-count">{move || format!("{} boxes", store.boxes().with(|b| b.len()))}</span>
            </div>
            <div class="canvas-scroll">
                <div
                    class="canvas"
                    class:grid=move || store.settings().with(|s| s.snap_to_grid)
                    style=canvas_style
                >
                    <For
                        each=move || store.boxes().with(|b| b.iter().map(|x| x.id.clone()).collect::<Vec<_>>())
                        key=|id| id.clone()
                        children=move |id| view! { <CanvasBoxView id=id /> }
                    />
                </div>
            </div>
        </section>
    }
}
