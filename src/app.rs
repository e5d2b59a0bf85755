//! CopyAI App
//!
//! Main application component: card list, canvas and document library.

use leptos::prelude::*;
use leptos_pointer::{bind_global_pointer, create_pointer_signals, GestureEnd};
use reactive_stores::Store;

use crate::commands;
use crate::components::{
    BoxCanvas, CardList, ExportButton, ImportButton, LayoutPanel, LibraryModal, NewCardForm, SettingsPanel,
    ToastHost, ViewTabBar,
};
use crate::context::{AppContext, View};
use crate::domain::transfer::{export_cards, import_cards};
use crate::domain::{raise_box, set_box_rect};
use crate::store::{persist_on_change, AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App() -> impl IntoView {
    // Load persisted state once
    let backend = commands::open_store();
    let (state, errors) = AppState::load(backend.as_ref());
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        commands::alert(&format!(
            "Some saved data could not be read and was reset:\n{}",
            details.join("\n")
        ));
    }

    let store: AppStore = Store::new(state);
    provide_context(store);

    let ctx = AppContext::new(Signal::derive(move || store.settings().with(|s| s.toast_ms)));
    provide_context(ctx);

    persist_on_change(store);

    // Pointer handlers are bound once for every canvas box
    let ptr = create_pointer_signals();
    provide_context(ptr);
    bind_global_pointer(
        ptr,
        move || store.settings().with_untracked(|s| s.constraints()),
        move |id, rect| {
            let bounds = store.settings().with_untracked(|s| s.constraints().bounds);
            store.boxes().update(|boxes| {
                let _ = set_box_rect(boxes, id, rect, &bounds);
            });
        },
        move |end| match end {
            GestureEnd::Commit(id, rect) => {
                tracing::debug!("Box {} moved to {:?}", id, rect);
                let bounds = store.settings().with_untracked(|s| s.constraints().bounds);
                store.boxes().update(|boxes| {
                    if set_box_rect(boxes, &id, rect, &bounds).is_ok() {
                        let _ = raise_box(boxes, &id);
                    }
                });
            }
            GestureEnd::Click(id) => {
                let text = store
                    .boxes()
                    .with_untracked(|boxes| boxes.iter().find(|b| b.id == id).map(|b| b.text.clone()));
                if let Some(text) = text {
                    ctx.copy_to_clipboard(text);
                }
            }
        },
    );

    let (settings_open, set_settings_open) = signal(false);

    let on_import_cards = move |json: String| {
        let mut cards = store.cards().get_untracked();
        let mut layouts = store.layouts().get_untracked();
        match import_cards(&json, &mut cards, &mut layouts, commands::now_ms()) {
            Ok(summary) => {
                tracing::info!("Imported cards: {:?}", summary);
                store.cards().set(cards);
                store.layouts().set(layouts);
                ctx.notify(summary.message("card"));
            }
            Err(e) => {
                tracing::warn!("Card import rejected: {}", e);
                commands::alert(&format!("Import failed: {}", e));
            }
        }
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"CopyAI"</h1>
                <ViewTabBar settings_open=settings_open set_settings_open=set_settings_open />
            </header>

            <Show when=move || settings_open.get()>
                <SettingsPanel />
            </Show>

            <main class="main-content">
                <Show
                    when=move || ctx.view.get() == View::Cards
                    fallback=|| view! { <BoxCanvas /> }
                >
                    <div class="cards-view">
                        <div class="cards-column">
                            <NewCardForm />
                            <div class="transfer-bar">
                                <ExportButton
                                    label="Export cards"
                                    kind="export"
                                    export=move |now| {
                                        let cards = store.cards().get_untracked();
                                        store.layouts().with_untracked(|layouts| export_cards(&cards, layouts, now))
                                    }
                                />
                                <ImportButton label="Import cards" on_text=on_import_cards />
                            </div>
                            <CardList />
                        </div>
                        <LayoutPanel />
                    </div>
                </Show>
            </main>

            <LibraryModal />
            <ToastHost />
        </div>
    }
}
