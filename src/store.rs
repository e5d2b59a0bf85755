//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Every top-level
//! field maps to one local storage key and is written back when it changes.

use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use reactive_stores::Store;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::commands::{self, KeyValueStore, StorageError};
use crate::config::{keys, Settings};
use crate::domain::{CanvasBox, Card, DocFile, DocFolder, DocLibrary, LayoutEntry};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub cards: Vec<Card>,
    pub boxes: Vec<CanvasBox>,
    pub layouts: Vec<LayoutEntry>,
    pub folders: Vec<DocFolder>,
    pub files: Vec<DocFile>,
    pub settings: Settings,
}

impl AppState {
    /// Read every key once; corrupt or unreadable entries fall back to
    /// defaults and are returned alongside the state
    pub fn load(store: &dyn KeyValueStore) -> (Self, Vec<StorageError>) {
        let mut errors = Vec::new();
        let state = Self {
            cards: load_or_default(store, keys::CARDS, &mut errors),
            boxes: load_or_default(store, keys::BOXES, &mut errors),
            layouts: load_or_default(store, keys::LAYOUTS, &mut errors),
            folders: load_or_default(store, keys::DOC_FOLDERS, &mut errors),
            files: load_or_default(store, keys::DOC_FILES, &mut errors),
            settings: load_or_default::<Settings>(store, keys::SETTINGS, &mut errors).sanitized(),
        };
        tracing::info!(
            "Loaded {} cards, {} boxes, {} layouts, {} folders, {} files",
            state.cards.len(),
            state.boxes.len(),
            state.layouts.len(),
            state.folders.len(),
            state.files.len()
        );
        (state, errors)
    }
}

fn load_or_default<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStore,
    key: &str,
    errors: &mut Vec<StorageError>,
) -> T {
    match commands::load(store, key) {
        Ok(value) => value.unwrap_or_default(),
        Err(e) => {
            tracing::error!("{}", e);
            errors.push(e);
            T::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Persistence
// ========================

static SAVE_FAILURE_REPORTED: AtomicBool = AtomicBool::new(false);

fn persist<T: Serialize + ?Sized>(key: &str, value: &T) {
    let backend = commands::open_store();
    if let Err(e) = commands::save(backend.as_ref(), key, value) {
        tracing::error!("{}", e);
        if !SAVE_FAILURE_REPORTED.swap(true, Ordering::Relaxed) {
            commands::alert(&format!("Changes could not be saved: {}", e));
        }
    }
}

/// Write each field back to storage whenever it changes
pub fn persist_on_change(store: AppStore) {
    Effect::new(move |_| store.cards().with(|v| persist(keys::CARDS, v)));
    Effect::new(move |_| store.boxes().with(|v| persist(keys::BOXES, v)));
    Effect::new(move |_| store.layouts().with(|v| persist(keys::LAYOUTS, v)));
    Effect::new(move |_| store.folders().with(|v| persist(keys::DOC_FOLDERS, v)));
    Effect::new(move |_| store.files().with(|v| persist(keys::DOC_FILES, v)));
    Effect::new(move |_| store.settings().with(|v| persist(keys::SETTINGS, v)));
}

// ========================
// Store Helper Functions
// ========================

/// Snapshot of the document library
pub fn store_library(store: &AppStore) -> DocLibrary {
    DocLibrary {
        folders: store.folders().get(),
        files: store.files().get(),
    }
}

/// Run `f` on a copy of the library and write it back only on success
pub fn store_update_library<T, E>(
    store: &AppStore,
    f: impl FnOnce(&mut DocLibrary) -> Result<T, E>,
) -> Result<T, E> {
    let mut library = store_library(store);
    let result = f(&mut library)?;
    store.folders().set(library.folders);
    store.files().set(library.files);
    Ok(result)
}

/// Edit the settings; values are clamped before they are stored
pub fn store_update_settings(store: &AppStore, f: impl FnOnce(&mut Settings)) {
    let mut settings = store.settings().get_untracked();
    f(&mut settings);
    let settings = settings.sanitized();
    tracing::debug!("Settings changed: {:?}", settings);
    store.settings().set(settings);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MemoryStore;

    #[test]
    fn test_load_empty_store_gives_defaults() {
        let backend = MemoryStore::default();
        let (state, errors) = AppState::load(&backend);
        assert!(errors.is_empty());
        assert!(state.cards.is_empty());
        assert_eq!(state.settings, Settings::default());
    }

    #[test]
    fn test_corrupt_key_is_reported_and_defaulted() {
        let backend = MemoryStore::default();
        backend.set(keys::CARDS, "[{\"id\":").unwrap();
        backend
            .set(keys::BOXES, r#"[{"id":"b","x":1,"y":2,"w":200,"h":100,"text":"t"}]"#)
            .unwrap();

        let (state, errors) = AppState::load(&backend);
        assert_eq!(errors.len(), 1);
        assert!(state.cards.is_empty());
        assert_eq!(state.boxes.len(), 1);
    }

    #[test]
    fn test_settings_are_sanitized_on_load() {
        let backend = MemoryStore::default();
        backend.set(keys::SETTINGS, r#"{"gridSize": 500, "toastMs": 1}"#).unwrap();
        let (state, _) = AppState::load(&backend);
        assert_eq!(state.settings.grid_size, 100.0);
        assert_eq!(state.settings.toast_ms, 500);
    }
}
