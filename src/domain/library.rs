//! Document Library
//!
//! Folders and uploaded plain-text files. Folder names are unique; file
//! names are unique within their folder, with all unfiled files counting as
//! one folder. A `folder_id` that points at no folder is treated as unfiled.

use serde::{Deserialize, Serialize};

use super::entity::{position_of, DomainResult, Entity};
use super::naming::{fresh_id, unique_file_name, unique_name};

const DEFAULT_FOLDER_NAME: &str = "New folder";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocFolder {
    pub id: String,
    pub name: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocFile {
    pub id: String,
    pub name: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
    /// `None` = unfiled
    pub folder_id: Option<String>,
}

impl Entity for DocFolder {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for DocFile {
    fn id(&self) -> &str {
        &self.id
    }
}

impl DocFile {
    /// Markdown files get a rendered preview
    pub fn is_markdown(&self) -> bool {
        let lower = self.name.to_lowercase();
        lower.ends_with(".md") || lower.ends_with(".markdown")
    }
}

/// Which files the library view lists
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FolderFilter {
    #[default]
    All,
    Unfiled,
    Folder(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocLibrary {
    pub folders: Vec<DocFolder>,
    pub files: Vec<DocFile>,
}

impl DocLibrary {
    pub fn folder(&self, id: &str) -> Option<&DocFolder> {
        self.folders.iter().find(|f| f.id == id)
    }

    pub fn file(&self, id: &str) -> Option<&DocFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Existing folder id, or `None` for unfiled
    pub fn resolve_folder(&self, folder_id: Option<&str>) -> Option<String> {
        folder_id
            .filter(|id| self.folder(id).is_some())
            .map(str::to_string)
    }

    fn effective_folder<'a>(&self, file: &'a DocFile) -> Option<&'a str> {
        file.folder_id.as_deref().filter(|id| self.folder(id).is_some())
    }

    /// Names in `folder`, skipping the file with id `except`
    pub(crate) fn names_in(&self, folder: Option<&str>, except: Option<&str>) -> Vec<&str> {
        self.files
            .iter()
            .filter(|f| Some(f.id.as_str()) != except)
            .filter(|f| self.effective_folder(f) == folder)
            .map(|f| f.name.as_str())
            .collect()
    }

    // ========================
    // Folders
    // ========================

    pub fn create_folder(&mut self, name: &str, now: i64) -> DocFolder {
        let folder = DocFolder {
            id: fresh_id("folder", now, self.folders.iter().map(|f| f.id.as_str())),
            name: unique_name(name, DEFAULT_FOLDER_NAME, self.folders.iter().map(|f| f.name.as_str())),
            created_at: now,
        };
        self.folders.push(folder.clone());
        folder
    }

    pub fn rename_folder(&mut self, id: &str, name: &str) -> DomainResult<String> {
        let idx = position_of(&self.folders, id)?;
        let others = self
            .folders
            .iter()
            .filter(|f| f.id != id)
            .map(|f| f.name.as_str());
        let name = unique_name(name, &self.folders[idx].name, others);
        self.folders[idx].name = name.clone();
        Ok(name)
    }

    /// Remove a folder; its files become unfiled. Returns how many moved.
    pub fn delete_folder(&mut self, id: &str) -> DomainResult<usize> {
        let idx = position_of(&self.folders, id)?;
        self.folders.remove(idx);

        // Orphans now resolve to unfiled; rename the ones that collide there
        let orphan_ids: Vec<String> = self
            .files
            .iter()
            .filter(|f| f.folder_id.as_deref() == Some(id))
            .map(|f| f.id.clone())
            .collect();
        for file_id in &orphan_ids {
            self.place_file(file_id, None);
        }
        Ok(orphan_ids.len())
    }

    // ========================
    // Files
    // ========================

    pub fn add_file(&mut self, name: &str, content: &str, folder_id: Option<&str>, now: i64) -> DocFile {
        let folder_id = self.resolve_folder(folder_id);
        let name = unique_file_name(name, self.names_in(folder_id.as_deref(), None));
        let file = DocFile {
            id: fresh_id("doc", now, self.files.iter().map(|f| f.id.as_str())),
            name,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
            folder_id,
        };
        self.files.push(file.clone());
        file
    }

    pub fn update_file(&mut self, id: &str, content: &str, now: i64) -> DomainResult<()> {
        let idx = position_of(&self.files, id)?;
        self.files[idx].content = content.to_string();
        self.files[idx].updated_at = now;
        Ok(())
    }

    pub fn rename_file(&mut self, id: &str, name: &str) -> DomainResult<String> {
        let idx = position_of(&self.files, id)?;
        let folder = self.effective_folder(&self.files[idx]).map(str::to_string);
        let fallback = self.files[idx].name.clone();
        let desired = if name.trim().is_empty() { fallback.as_str() } else { name };
        let name = unique_file_name(desired, self.names_in(folder.as_deref(), Some(id)));
        self.files[idx].name = name.clone();
        Ok(name)
    }

    /// Move into `folder_id` (None = unfiled); returns the possibly renamed name
    pub fn move_file(&mut self, id: &str, folder_id: Option<&str>) -> DomainResult<String> {
        position_of(&self.files, id)?;
        let target = self.resolve_folder(folder_id);
        Ok(self.place_file(id, target))
    }

    pub fn delete_file(&mut self, id: &str) -> DomainResult<DocFile> {
        let idx = position_of(&self.files, id)?;
        Ok(self.files.remove(idx))
    }

    /// Set folder and de-duplicate the name there. Caller checked `id` exists.
    fn place_file(&mut self, id: &str, folder: Option<String>) -> String {
        let Some(idx) = self.files.iter().position(|f| f.id == id) else {
            return String::new();
        };
        let current = self.files[idx].name.clone();
        let name = unique_file_name(&current, self.names_in(folder.as_deref(), Some(id)));
        let file = &mut self.files[idx];
        file.folder_id = folder;
        file.name = name.clone();
        name
    }

    /// Files matching the filter, by name (case-insensitive) then age
    pub fn files_in(&self, filter: &FolderFilter) -> Vec<DocFile> {
        let mut files: Vec<DocFile> = self
            .files
            .iter()
            .filter(|f| match filter {
                FolderFilter::All => true,
                FolderFilter::Unfiled => self.effective_folder(f).is_none(),
                FolderFilter::Folder(id) => self.effective_folder(f) == Some(id.as_str()),
            })
            .cloned()
            .collect();
        files.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.created_at.cmp(&b.created_at))
        });
        files
    }

    pub fn count_in(&self, filter: &FolderFilter) -> usize {
        self.files_in(filter).len()
    }

    /// Display name of the folder a file lives in
    pub fn folder_label(&self, file: &DocFile) -> String {
        self.effective_folder(file)
            .and_then(|id| self.folder(id))
            .map(|f| f.name.clone())
            .unwrap_or_else(|| "Unfiled".to_string())
    }

    /// Folders sorted by name for the sidebar
    pub fn sorted_folders(&self) -> Vec<DocFolder> {
        let mut folders = self.folders.clone();
        folders.sort_by_key(|f| f.name.to_lowercase());
        folders
    }
}
