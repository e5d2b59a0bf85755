use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::config::is_text_upload;
use crate::context::use_app_context;
use crate::domain::FolderFilter;
use crate::store::{store_library, store_update_library, use_app_store};

#[component]
pub fn FileList(
    filter: ReadSignal<FolderFilter>,
    selected: ReadSignal<Option<String>>,
    set_selected: WriteSignal<Option<String>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let files = move || filter.with(|f| store_library(&store).files_in(f));

    // Uploads land in the selected folder, or unfiled for "All"/"Unfiled"
    let on_upload = move |ev: web_sys::Event| {
        let picked = commands::take_selected_files(&ev);
        if picked.is_empty() {
            return;
        }
        let target = match filter.get_untracked() {
            FolderFilter::Folder(id) => Some(id),
            _ => None,
        };
        spawn_local(async move {
            let mut added = 0usize;
            let mut skipped = Vec::new();
            let mut last = None;
            for file in picked {
                let name = file.name();
                if !is_text_upload(&name, &file.type_()) {
                    skipped.push(name);
                    continue;
                }
                match commands::read_file_text(&file).await {
                    Ok(content) => {
                        let now = commands::now_ms();
                        let doc = store_update_library(&store, |lib| {
                            Ok::<_, ()>(lib.add_file(&name, &content, target.as_deref(), now))
                        });
                        if let Ok(doc) = doc {
                            tracing::info!("Uploaded {} as {}", name, doc.name);
                            last = Some(doc.id);
                            added += 1;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to read {}: {}", name, e);
                        skipped.push(name);
                    }
                }
            }
            if added > 0 {
                ctx.notify(format!("Added {} file(s)", added));
                set_selected.set(last);
            }
            if !skipped.is_empty() {
                ctx.notify_error(format!("Skipped: {}", skipped.join(", ")));
            }
        });
    };

    let format_size = |len: usize| {
        if len < 1024 {
            format!("{} B", len)
        } else if len < 1024 * 1024 {
            format!("{:.1} KB", len as f64 / 1024.0)
        } else {
            format!("{:.1} MB", len as f64 / (1024.0 * 1024.0))
        }
    };

    view! {
        <div class="file-list-container">
            <div class="file-list-header">
                <label class="upload-btn">
                    "Upload"
                    <input
                        type="file"
                        multiple
                        accept=".txt,.md,.markdown,.json,.csv,text/*"
                        hidden
                        on:change=on_upload
                    />
                </label>
            </div>

            <Show when=move || files().is_empty()>
                <div class="empty-hint">"No documents here."</div>
            </Show>

            <ul class="file-list">
                <For
                    each=files
                    key=|doc| (doc.id.clone(), doc.name.clone(), doc.updated_at, doc.folder_id.clone())
                    children=move |doc| {
                        let id = doc.id.clone();
                        let is_selected = {
                            let id = id.clone();
                            move || selected.with(|s| s.as_deref() == Some(id.as_str()))
                        };
                        let folder = store_library(&store).folder_label(&doc);
                        view! {
                            <li
                                class="file-row"
                                class:active=is_selected
                                on:click=move |_| set_selected.set(Some(id.clone()))
                            >
                                <span class="file-icon">{if doc.is_markdown() { "📝" } else { "📄" }}</span>
                                <span class="file-name" title=doc.name.clone()>{doc.name.clone()}</span>
                                <span class="file-meta">
                                    {folder} " · " {format_size(doc.content.len())}
                                </span>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
