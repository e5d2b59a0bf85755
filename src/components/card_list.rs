//! Card List Component

use leptos::prelude::*;

use crate::components::CardItem;
use crate::store::{use_app_store, AppStateStoreFields};

/// Cards in insertion order
#[component]
pub fn CardList() -> impl IntoView {
    let store = use_app_store();
    let count = move || store.cards().with(|c| c.len());

    view! {
        <section class="card-list">
            <Show when=move || count() == 0>
                <p class="empty-hint">"No cards yet. Add one above or import a file."</p>
            </Show>
            // Keyed on content so a saved edit re-renders the card
            <For
                each=move || store.cards().get()
                key=|card| (card.id.clone(), card.title.clone(), card.text.clone())
                children=move |card| view! { <CardItem card=card /> }
            />
            <p class="item-count">{move || format!("{} cards", count())}</p>
        </section>
    }
}
