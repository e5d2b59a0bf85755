//! Canvas Box Component
//!
//! One absolutely positioned box. Dragging and resizing go through the
//! pointer handlers bound once in `App`; a press that never moves copies
//! the text.

use leptos::prelude::*;
use leptos_pointer::{make_on_pointerdown, make_on_pointermove_cursor, PointerSignals, Rect};

use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::domain::{delete_box, update_box_text};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn CanvasBoxView(id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let ptr = expect_context::<PointerSignals>();
    let id = StoredValue::new(id);

    // (rect, text, z-index) while the box exists
    let data = Memo::new(move |_| {
        id.with_value(|id| {
            store.boxes().with(|boxes| {
                boxes
                    .iter()
                    .enumerate()
                    .find(|(_, b)| b.id == *id)
                    .map(|(z, b)| (b.rect(), b.text.clone(), z))
            })
        })
    });
    let rect = move || data.with_untracked(|d| d.as_ref().map(|(r, _, _)| *r)).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));

    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(String::new());

    let is_active = move || id.with_value(|id| ptr.active_id().as_deref() == Some(id.as_str()));

    let style = move || {
        data.with(|d| match d {
            Some((r, _, z)) => format!(
                "left: {}px; top: {}px; width: {}px; height: {}px; z-index: {};",
                r.x, r.y, r.w, r.h, z + 1
            ),
            None => "display: none;".to_string(),
        })
    };

    let text = move || data.with(|d| d.as_ref().map(|(_, t, _)| t.clone()).unwrap_or_default());

    let start_edit = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if editing.get_untracked() {
            return;
        }
        set_draft.set(text());
        set_editing.set(true);
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut boxes = store.boxes().get_untracked();
        match id.with_value(|id| update_box_text(&mut boxes, id, &draft.get_untracked())) {
            Ok(()) => {
                store.boxes().set(boxes);
                set_editing.set(false);
            }
            Err(e) => ctx.notify_error(e.to_string()),
        }
    };

    let delete = move |_: ()| {
        let mut boxes = store.boxes().get_untracked();
        match id.with_value(|id| delete_box(&mut boxes, id)) {
            Ok(removed) => {
                tracing::info!("Deleted box {}", removed.id);
                store.boxes().set(boxes);
            }
            Err(e) => ctx.notify_error(e.to_string()),
        }
    };

    view! {
        <div
            class="canvas-box"
            class:dragging=is_active
            style=style
            on:pointerdown=make_on_pointerdown(ptr, id.get_value(), rect)
            on:pointermove=make_on_pointermove_cursor(rect)
            on:dblclick=start_edit
        >
            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <div class="canvas-box-toolbar" data-no-gesture>
                        <button class="edit-btn" title="Edit" on:click=start_edit>"✎"</button>
                        <DeleteConfirmButton button_class="delete-btn" on_confirm=delete />
                    </div>
                    <pre class="canvas-box-text">{text}</pre>
                }
            >
                <form class="canvas-box-edit" data-no-gesture on:submit=save>
                    <textarea
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    ></textarea>
                    <div class="canvas-box-edit-actions">
                        <button type="submit">"Save"</button>
                        <button type="button" on:click=move |_| set_editing.set(false)>"Cancel"</button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
