//! Document Editor
//!
//! Edit pane and preview for the selected library document. Markdown
//! files get a rendered preview, everything else is shown as-is.

use leptos::prelude::*;

use crate::commands;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::domain::DocFile;
use crate::markdown::render_markdown;
use crate::store::{store_library, store_update_library, use_app_store, AppStateStoreFields};

#[component]
pub fn DocEditor(
    selected: ReadSignal<Option<String>>,
    set_selected: WriteSignal<Option<String>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let doc = Memo::new(move |_| {
        let id = selected.get()?;
        store.files().with(|files| files.iter().find(|f| f.id == id).cloned())
    });

    let (content, set_content) = signal(String::new());
    let (name_draft, set_name_draft) = signal(String::new());

    // Reset the drafts only when a different document is selected
    Effect::new(move |prev: Option<Option<String>>| {
        let current = selected.get();
        if prev.as_ref() != Some(&current) {
            let loaded = doc.get_untracked();
            set_content.set(loaded.as_ref().map(|d| d.content.clone()).unwrap_or_default());
            set_name_draft.set(loaded.map(|d| d.name).unwrap_or_default());
        }
        current
    });

    let save_content = move || {
        let text = content.get_untracked();
        with_doc(doc, |d| {
            if d.content == text {
                return;
            }
            let now = commands::now_ms();
            if let Err(e) = store_update_library(&store, |lib| lib.update_file(&d.id, &text, now)) {
                ctx.notify_error(e.to_string());
            }
        });
    };

    let rename = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = name_draft.get_untracked();
        with_doc(doc, |d| match store_update_library(&store, |lib| lib.rename_file(&d.id, &name)) {
            Ok(final_name) => set_name_draft.set(final_name),
            Err(e) => ctx.notify_error(e.to_string()),
        });
    };

    let move_to = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        let folder = (!value.is_empty()).then_some(value);
        with_doc(doc, |d| match store_update_library(&store, |lib| lib.move_file(&d.id, folder.as_deref())) {
            Ok(final_name) => set_name_draft.set(final_name),
            Err(e) => ctx.notify_error(e.to_string()),
        });
    };

    let copy = move |_| ctx.copy_to_clipboard(content.get_untracked());

    let export = move |_| {
        with_doc(doc, |d| {
            let filename = commands::as_txt_name(&d.name);
            if let Err(e) = commands::download_text(&filename, &content.get_untracked()) {
                tracing::error!("Export of {} failed: {}", d.name, e);
                commands::alert(&format!("Export failed: {}", e));
            }
        });
    };

    let delete = move |_: ()| {
        let Some(id) = selected.get_untracked() else { return };
        match store_update_library(&store, |lib| lib.delete_file(&id)) {
            Ok(removed) => {
                tracing::info!("Deleted document {}", removed.name);
                set_selected.set(None);
            }
            Err(e) => ctx.notify_error(e.to_string()),
        }
    };

    let rendered_html = move || render_markdown(&content.get());
    let is_markdown = move || doc.with(|d| d.as_ref().is_some_and(DocFile::is_markdown));
    let current_folder = move || doc.with(|d| d.as_ref().and_then(|d| d.folder_id.clone()).unwrap_or_default());

    view! {
        <Show
            when=move || doc.with(Option::is_some)
            fallback=|| view! { <div class="doc-editor empty">"Select a document"</div> }
        >
            <div class="doc-editor">
                <div class="doc-editor-header">
                    <form class="doc-rename-form" on:submit=rename>
                        <input
                            type="text"
                            class="doc-name-input"
                            prop:value=move || name_draft.get()
                            on:input=move |ev| set_name_draft.set(event_target_value(&ev))
                        />
                        <button type="submit">"Rename"</button>
                    </form>
                    <select class="doc-folder-select" on:change=move_to>
                        <option value="" prop:selected=move || current_folder().is_empty()>"Unfiled"</option>
                        {move || store_library(&store).sorted_folders().into_iter().map(|f| {
                            let id = f.id.clone();
                            view! {
                                <option value=f.id prop:selected=move || current_folder() == id>{f.name}</option>
                            }
                        }).collect_view()}
                    </select>
                    <button on:click=copy>"Copy"</button>
                    <button on:click=export>"Export .txt"</button>
                    <DeleteConfirmButton button_class="delete-btn" on_confirm=delete />
                    <button class="close-btn" on:click=move |_| set_selected.set(None)>"×"</button>
                </div>

                <div class="doc-editor-body">
                    <div class="doc-edit-pane">
                        <div class="pane-header">"Edit"</div>
                        <textarea
                            class="doc-textarea"
                            prop:value=move || content.get()
                            on:input=move |ev| set_content.set(event_target_value(&ev))
                            on:blur=move |_| save_content()
                        ></textarea>
                    </div>

                    <div class="doc-preview-pane">
                        <div class="pane-header">"Preview"</div>
                        <Show
                            when=is_markdown
                            fallback=move || view! { <pre class="doc-preview-plain">{move || content.get()}</pre> }
                        >
                            <div class="doc-preview-content" inner_html=rendered_html></div>
                        </Show>
                    </div>
                </div>
            </div>
        </Show>
    }
}

fn with_doc<R>(doc: Memo<Option<DocFile>>, f: impl FnOnce(&DocFile) -> R) -> Option<R> {
    doc.with_untracked(|d| d.as_ref().map(f))
}
