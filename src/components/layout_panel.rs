//! Layout Panel Component
//!
//! Saves the card list as a named layout and manages saved layouts.

use leptos::prelude::*;

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::domain::{
    apply_layout, delete_layout, overwrite_layout, rename_layout, save_layout, sorted_newest_first, LayoutEntry,
};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn LayoutPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (new_title, set_new_title) = signal(String::new());

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let cards = store.cards().get_untracked();
        let mut layouts = store.layouts().get_untracked();
        let entry = save_layout(&mut layouts, &new_title.get_untracked(), &cards, commands::now_ms());
        tracing::info!("Saved layout {} with {} cards", entry.title, entry.cards.len());
        store.layouts().set(layouts);
        set_new_title.set(String::new());
        ctx.notify(format!("Saved layout \"{}\"", entry.title));
    };

    view! {
        <section class="layout-panel">
            <h3>"Layouts"</h3>
            <form class="layout-save-form" on:submit=on_save>
                <input
                    type="text"
                    placeholder="Layout name"
                    prop:value=move || new_title.get()
                    on:input=move |ev| set_new_title.set(event_target_value(&ev))
                />
                <button type="submit">"Save current"</button>
            </form>
            <ul class="layout-list">
                <For
                    each=move || store.layouts().with(|l| sorted_newest_first(l))
                    key=|l| (l.id.clone(), l.title.clone(), l.saved_at)
                    children=move |layout| view! { <LayoutRow layout=layout /> }
                />
            </ul>
        </section>
    }
}

#[component]
fn LayoutRow(layout: LayoutEntry) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = StoredValue::new(layout.id.clone());
    let (renaming, set_renaming) = signal(false);
    let (draft, set_draft) = signal(layout.title.clone());

    let load = move |_| {
        let Some(entry) = id.with_value(|id| store.layouts().with_untracked(|l| l.iter().find(|e| e.id == *id).cloned()))
        else {
            return;
        };
        let has_cards = store.cards().with_untracked(|c| !c.is_empty());
        if has_cards && !commands::confirm(&format!("Replace the current cards with \"{}\"?", entry.title)) {
            return;
        }
        ctx.stop_editing();
        store.cards().set(apply_layout(&entry));
        tracing::info!("Loaded layout {}", entry.title);
        ctx.notify(format!("Loaded \"{}\"", entry.title));
    };

    let overwrite = move |_| {
        let cards = store.cards().get_untracked();
        let mut layouts = store.layouts().get_untracked();
        match id.with_value(|id| overwrite_layout(&mut layouts, id, &cards, commands::now_ms())) {
            Ok(()) => {
                store.layouts().set(layouts);
                ctx.notify("Layout updated");
            }
            Err(e) => ctx.notify_error(e.to_string()),
        }
    };

    let rename = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut layouts = store.layouts().get_untracked();
        match id.with_value(|id| rename_layout(&mut layouts, id, &draft.get_untracked())) {
            Ok(title) => {
                set_draft.set(title);
                store.layouts().set(layouts);
                set_renaming.set(false);
            }
            Err(e) => ctx.notify_error(e.to_string()),
        }
    };

    let delete = move |_: ()| {
        let mut layouts = store.layouts().get_untracked();
        match id.with_value(|id| delete_layout(&mut layouts, id)) {
            Ok(removed) => {
                tracing::info!("Deleted layout {}", removed.title);
                store.layouts().set(layouts);
            }
            Err(e) => ctx.notify_error(e.to_string()),
        }
    };

    let title = layout.title.clone();
    let meta = format!("{} cards · {}", layout.cards.len(), format_saved_at(layout.saved_at));

    view! {
        <li class="layout-row">
            <Show
                when=move || renaming.get()
                fallback=move || view! {
                    <span class="layout-title" on:dblclick=move |_| set_renaming.set(true)>{title.clone()}</span>
                    <span class="layout-meta">{meta.clone()}</span>
                    <button on:click=load>"Load"</button>
                    <button on:click=overwrite title="Replace with the current cards">"Overwrite"</button>
                    <button on:click=move |_| set_renaming.set(true)>"Rename"</button>
                    <DeleteConfirmButton button_class="delete-btn" on_confirm=delete />
                }
            >
                <form class="layout-rename-form" on:submit=rename>
                    <input
                        type="text"
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    />
                    <button type="submit">"OK"</button>
                    <button type="button" on:click=move |_| set_renaming.set(false)>"Cancel"</button>
                </form>
            </Show>
        </li>
    }
}

/// Local time, e.g. "2024-03-05 15:08"
fn format_saved_at(ms: i64) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp_millis(ms)
        .map(|t| t.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
