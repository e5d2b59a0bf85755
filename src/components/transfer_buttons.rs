//! Import / Export Buttons
//!
//! File picker that hands the picked file's text to a callback, and a
//! button that downloads JSON produced on demand.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::domain::transfer::{export_filename, TransferResult};

#[component]
pub fn ImportButton(
    #[prop(into)] label: String,
    #[prop(into)] on_text: Callback<String>,
) -> impl IntoView {
    let on_change = move |ev: web_sys::Event| {
        let Some(file) = commands::take_selected_files(&ev).into_iter().next() else { return };
        spawn_local(async move {
            match commands::read_file_text(&file).await {
                Ok(text) => {
                    tracing::info!("Read {} ({} bytes)", file.name(), text.len());
                    on_text.run(text);
                }
                Err(e) => {
                    tracing::error!("Failed to read {}: {}", file.name(), e);
                    commands::alert(&format!("Could not read file: {}", e));
                }
            }
        });
    };

    view! {
        <label class="transfer-btn">
            {label}
            <input type="file" accept=".json,application/json" hidden on:change=on_change />
        </label>
    }
}

/// Downloads `copyai-{kind}-….json`
#[component]
pub fn ExportButton<F>(
    #[prop(into)] label: String,
    kind: &'static str,
    export: F,
) -> impl IntoView
where
    F: Fn(i64) -> TransferResult<String> + Send + Sync + 'static,
{
    let on_click = move |_| {
        let now = commands::now_ms();
        let result = export(now)
            .map_err(|e| e.to_string())
            .and_then(|json| commands::download_blob(&export_filename(kind, now), "application/json", &json));
        if let Err(e) = result {
            tracing::error!("Export of {} failed: {}", kind, e);
            commands::alert(&format!("Export failed: {}", e));
        }
    };

    view! {
        <button class="transfer-btn" on:click=on_click>{label}</button>
    }
}
