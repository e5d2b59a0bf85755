use leptos::prelude::*;

use crate::commands;
use crate::context::use_app_context;
use crate::domain::{DocFolder, FolderFilter};
use crate::store::{store_library, store_update_library, use_app_store, AppStateStoreFields};

#[component]
pub fn FolderSidebar(
    filter: ReadSignal<FolderFilter>,
    set_filter: WriteSignal<FolderFilter>,
) -> impl IntoView {
    let store = use_app_store();
    let (new_name, set_new_name) = signal(String::new());

    let add_folder = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let now = commands::now_ms();
        let name = new_name.get_untracked();
        let folder = store_update_library(&store, |lib| Ok::<_, ()>(lib.create_folder(&name, now)));
        if let Ok(folder) = folder {
            tracing::info!("Created folder {}", folder.name);
            set_new_name.set(String::new());
            set_filter.set(FolderFilter::Folder(folder.id));
        }
    };

    let count = move |f: &FolderFilter| store_library(&store).count_in(f);

    let fixed_entry = move |label: &'static str, entry: FolderFilter| {
        let entry = StoredValue::new(entry);
        let selected = move || entry.with_value(|e| filter.with(|f| f == e));
        view! {
            <li
                class=move || if selected() { "folder-item active" } else { "folder-item" }
                on:click=move |_| set_filter.set(entry.get_value())
            >
                <span class="folder-name">{label}</span>
                <span class="folder-count">{move || entry.with_value(count)}</span>
            </li>
        }
    };

    view! {
        <div class="folder-sidebar">
            <div class="sidebar-header">
                <h3>"Folders"</h3>
            </div>

            <ul class="folder-list">
                {fixed_entry("All files", FolderFilter::All)}
                {fixed_entry("Unfiled", FolderFilter::Unfiled)}
                <For
                    each=move || store.folders().with(|f| {
                        let mut sorted = f.clone();
                        sorted.sort_by_key(|d| d.name.to_lowercase());
                        sorted
                    })
                    key=|f| (f.id.clone(), f.name.clone())
                    children=move |folder| view! {
                        <FolderRow folder=folder filter=filter set_filter=set_filter />
                    }
                />
            </ul>

            <form class="add-folder-form" on:submit=add_folder>
                <input
                    type="text"
                    placeholder="New folder"
                    prop:value=move || new_name.get()
                    on:input=move |ev| set_new_name.set(event_target_value(&ev))
                />
                <button type="submit" class="add-folder-btn">"+"</button>
            </form>
        </div>
    }
}

#[component]
fn FolderRow(
    folder: DocFolder,
    filter: ReadSignal<FolderFilter>,
    set_filter: WriteSignal<FolderFilter>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let id = StoredValue::new(folder.id.clone());
    let (renaming, set_renaming) = signal(false);
    let (draft, set_draft) = signal(folder.name.clone());

    let is_selected = move || id.with_value(|id| matches!(filter.get(), FolderFilter::Folder(ref f) if f == id));
    let count = move || id.with_value(|id| store_library(&store).count_in(&FolderFilter::Folder(id.clone())));

    let rename = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = draft.get_untracked();
        match id.with_value(|id| store_update_library(&store, |lib| lib.rename_folder(id, &name))) {
            Ok(name) => {
                set_draft.set(name);
                set_renaming.set(false);
            }
            Err(e) => ctx.notify_error(e.to_string()),
        }
    };

    let name = folder.name.clone();
    let remove_folder = move |e: web_sys::MouseEvent| {
        e.stop_propagation();
        let files = count();
        let question = format!("Delete folder \"{}\"? Its {} file(s) move to Unfiled.", name, files);
        if !commands::confirm(&question) {
            return;
        }
        match id.with_value(|id| store_update_library(&store, |lib| lib.delete_folder(id))) {
            Ok(moved) => {
                tracing::info!("Deleted folder, {} files moved to unfiled", moved);
                if is_selected() {
                    set_filter.set(FolderFilter::Unfiled);
                }
            }
            Err(e) => ctx.notify_error(e.to_string()),
        }
    };

    let label = folder.name.clone();

    view! {
        <li
            class=move || if is_selected() { "folder-item active" } else { "folder-item" }
            on:click=move |_| set_filter.set(FolderFilter::Folder(id.get_value()))
        >
            <Show
                when=move || renaming.get()
                fallback=move || view! {
                    <span class="folder-icon">"📁"</span>
                    <span class="folder-name" on:dblclick=move |_| set_renaming.set(true)>{label.clone()}</span>
                    <span class="folder-count">{count}</span>
                }
            >
                <form class="folder-rename-form" on:submit=rename on:click=|ev| ev.stop_propagation()>
                    <input
                        type="text"
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    />
                    <button type="submit">"OK"</button>
                    <button type="button" on:click=move |_| set_renaming.set(false)>"✗"</button>
                </form>
            </Show>
            <button class="delete-folder-btn" title="Delete folder" on:click=remove_folder>"×"</button>
        </li>
    }
}
