//! New Card Form Component

use leptos::prelude::*;

use crate::commands;
use crate::context::use_app_context;
use crate::domain::add_card;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn NewCardForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (title, set_title) = signal(String::new());
    let (text, set_text) = signal(String::new());

    let create_card = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut cards = store.cards().get_untracked();
        match add_card(&mut cards, &title.get_untracked(), &text.get_untracked(), commands::now_ms()) {
            Ok(card) => {
                tracing::info!("Added card {}", card.id);
                store.cards().set(cards);
                set_title.set(String::new());
                set_text.set(String::new());
            }
            Err(e) => ctx.notify_error(e.to_string()),
        }
    };

    view! {
        <form class="new-card-form" on:submit=create_card>
            <input
                type="text"
                class="new-card-title"
                placeholder="Title (optional)"
                prop:value=move || title.get()
                on:input=move |ev| set_title.set(event_target_value(&ev))
            />
            <textarea
                class="new-card-text"
                rows="3"
                placeholder="Snippet text..."
                prop:value=move || text.get()
                on:input=move |ev| set_text.set(event_target_value(&ev))
            ></textarea>
            <button type="submit" disabled=move || text.with(|t| t.trim().is_empty())>"Add card"</button>
        </form>
    }
}
