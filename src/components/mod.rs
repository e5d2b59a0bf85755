//! UI Components
//!
//! Reusable Leptos components.

mod view_tab_bar;
mod new_card_form;
mod card_item;
mod card_list;
mod layout_panel;
mod transfer_buttons;
mod canvas_box_view;
mod box_canvas;
mod folder_sidebar;
mod file_list;
mod doc_editor;
mod library_modal;
mod settings_panel;
mod toast_host;
mod delete_confirm_button;

pub use view_tab_bar::ViewTabBar;
pub use new_card_form::NewCardForm;
pub use card_item::CardItem;
pub use card_list::CardList;
pub use layout_panel::LayoutPanel;
pub use transfer_buttons::{ExportButton, ImportButton};
pub use canvas_box_view::CanvasBoxView;
pub use box_canvas::BoxCanvas;
pub use folder_sidebar::FolderSidebar;
pub use file_list::FileList;
pub use doc_editor::DocEditor;
pub use library_modal::LibraryModal;
pub use settings_panel::SettingsPanel;
pub use toast_host::ToastHost;
pub use delete_confirm_button::DeleteConfirmButton;
