//! Document Library Modal
//!
//! Folder sidebar, file list and editor for uploaded text documents.

use leptos::prelude::*;

use crate::commands;
use crate::components::{DocEditor, ExportButton, FileList, FolderSidebar, ImportButton};
use crate::context::use_app_context;
use crate::domain::transfer::{export_library, import_library};
use crate::domain::FolderFilter;
use crate::store::{store_library, store_update_library, use_app_store};

#[component]
pub fn LibraryModal() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (filter, set_filter) = signal(FolderFilter::default());
    let (selected, set_selected) = signal::<Option<String>>(None);

    let close = move || ctx.set_library_open.set(false);

    let on_import = move |json: String| {
        match store_update_library(&store, |lib| import_library(&json, lib, commands::now_ms())) {
            Ok(summary) => {
                tracing::info!("Imported library: {:?}", summary);
                ctx.notify(summary.message("file"));
            }
            Err(e) => {
                tracing::warn!("Library import rejected: {}", e);
                commands::alert(&format!("Import failed: {}", e));
            }
        }
    };

    view! {
        <Show when=move || ctx.library_open.get()>
            <div class="modal-backdrop" on:click=move |_| close()>
                <div
                    class="modal library-modal"
                    on:click=|ev| ev.stop_propagation()
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Escape" {
                            close();
                        }
                    }
                >
                    <header class="modal-header">
                        <h2>"Document Library"</h2>
                        <ExportButton
                            label="Export library"
                            kind="library"
                            export=move |now| export_library(&store_library(&store), now)
                        />
                        <ImportButton label="Import library" on_text=on_import />
                        <button class="close-btn" on:click=move |_| close()>"×"</button>
                    </header>
                    <div class="library-body">
                        <FolderSidebar filter=filter set_filter=set_filter />
                        <FileList filter=filter selected=selected set_selected=set_selected />
                        <DocEditor selected=selected set_selected=set_selected />
                    </div>
                </div>
            </div>
        </Show>
    }
}
