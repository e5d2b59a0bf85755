//! Card Item Component
//!
//! A single card in the list. Clicking copies its text; the edit button
//! switches it to an inline form.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::domain::{delete_card, update_card, Card};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn CardItem(card: Card) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (draft_title, set_draft_title) = signal(card.title.clone());
    let (draft_text, set_draft_text) = signal(card.text.clone());
    let title = card.title.clone();
    let preview = card.text.clone();
    let id = StoredValue::new(card.id.clone());
    let card = StoredValue::new(card);

    let editing = move || id.with_value(|id| ctx.is_editing(id));

    let start_edit = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        card.with_value(|c| {
            set_draft_title.set(c.title.clone());
            set_draft_text.set(c.text.clone());
            ctx.start_editing(&c.id);
        });
    };

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut cards = store.cards().get_untracked();
        let result = id.with_value(|id| {
            update_card(&mut cards, id, &draft_title.get_untracked(), &draft_text.get_untracked())
        });
        match result {
            Ok(_) => {
                store.cards().set(cards);
                ctx.stop_editing();
            }
            Err(e) => ctx.notify_error(e.to_string()),
        }
    };

    let delete = move |_: ()| {
        let mut cards = store.cards().get_untracked();
        match id.with_value(|id| delete_card(&mut cards, id)) {
            Ok(removed) => {
                tracing::info!("Deleted card {}", removed.id);
                if ctx.is_editing(&removed.id) {
                    ctx.stop_editing();
                }
                store.cards().set(cards);
            }
            Err(e) => ctx.notify_error(e.to_string()),
        }
    };

    view! {
        <Show
            when=editing
            fallback=move || view! {
                <div
                    class="card-item"
                    title="Click to copy"
                    on:click=move |_| ctx.copy_to_clipboard(card.with_value(|c| c.text.clone()))
                >
                    <div class="card-header">
                        <span class="card-title">{title.clone()}</span>
                        <button class="edit-btn" title="Edit" on:click=start_edit>"✎"</button>
                        <DeleteConfirmButton button_class="delete-btn" on_confirm=delete />
                    </div>
                    <pre class="card-text">{preview.clone()}</pre>
                </div>
            }
        >
            <form class="card-item editing" on:submit=save>
                <input
                    type="text"
                    class="card-title-input"
                    prop:value=move || draft_title.get()
                    on:input=move |ev| set_draft_title.set(event_target_value(&ev))
                />
                <textarea
                    class="card-text-input"
                    rows="4"
                    prop:value=move || draft_text.get()
                    on:input=move |ev| set_draft_text.set(event_target_value(&ev))
                ></textarea>
                <div class="card-edit-actions">
                    <button type="submit">"Save"</button>
                    <button type="button" on:click=move |_| ctx.stop_editing()>"Cancel"</button>
                </div>
            </form>
        </Show>
    }
}
