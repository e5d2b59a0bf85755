//! Domain Layer
//!
//! Snippet entities and the pure operations on them.
//! Nothing in here touches the DOM, so everything is tested natively.

mod entity;
mod naming;
mod card;
mod canvas_box;
mod layout;
mod library;
pub mod transfer;

pub use entity::{Entity, DomainError, DomainResult};
pub use naming::{unique_name, unique_file_name, fresh_id};
pub use card::{Card, add_card, update_card, delete_card, derive_title};
pub use canvas_box::{CanvasBox, add_box, update_box_text, delete_box, raise_box, set_box_rect};
pub use layout::{LayoutEntry, save_layout, overwrite_layout, rename_layout, delete_layout, apply_layout, sorted_newest_first};
pub use library::{DocFolder, DocFile, DocLibrary, FolderFilter};
