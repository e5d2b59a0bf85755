//! Settings Panel Component

use leptos::prelude::*;

use crate::commands;
use crate::logging;
use crate::store::{store_update_settings, use_app_store, AppStateStoreFields};

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let store = use_app_store();

    let download_logs = move |_| {
        let name = format!("copyai-{}.log", chrono::Local::now().format("%Y%m%d-%H%M%S"));
        if let Err(e) = commands::download_blob(&name, "text/plain", &logging::dump()) {
            commands::alert(&format!("Could not save logs: {}", e));
        }
    };

    view! {
        <aside class="settings-panel">
            <h3>"Settings"</h3>
            <label class="setting-row">
                <input
                    type="checkbox"
                    prop:checked=move || store.settings().with(|s| s.snap_to_grid)
                    on:change=move |ev| {
                        let on = event_target_checked(&ev);
                        store_update_settings(&store, |s| s.snap_to_grid = on);
                    }
                />
                "Snap to grid"
            </label>
            <label class="setting-row">
                "Grid size (px)"
                <input
                    type="number"
                    min="4"
                    max="100"
                    prop:value=move || store.settings().with(|s| s.grid_size.to_string())
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).trim().parse::<f64>() {
                            store_update_settings(&store, |s| s.grid_size = size);
                        }
                    }
                />
            </label>
            <label class="setting-row">
                "Toast duration (ms)"
                <input
                    type="number"
                    min="500"
                    max="10000"
                    step="100"
                    prop:value=move || store.settings().with(|s| s.toast_ms.to_string())
                    on:change=move |ev| {
                        if let Ok(ms) = event_target_value(&ev).trim().parse::<u32>() {
                            store_update_settings(&store, |s| s.toast_ms = ms);
                        }
                    }
                />
            </label>
            <button class="download-logs-btn" on:click=download_logs>"Download logs"</button>
        </aside>
    }
}
