//! Configuration
//!
//! Storage keys, limits, and the user settings persisted next to the data.

use leptos_pointer::{Bounds, Constraints};
use serde::{Deserialize, Serialize};

/// Local storage keys
pub mod keys {
    pub const CARDS: &str = "copyai:cards";
    pub const BOXES: &str = "copyai:boxes";
    pub const LAYOUTS: &str = "copyai:layouts";
    pub const DOC_FOLDERS: &str = "copyai:docFolders";
    pub const DOC_FILES: &str = "copyai:docFiles";
    pub const SETTINGS: &str = "copyai:settings";
}

/// Entries kept by the in-memory log
pub const LOG_CAPACITY: usize = rolling_logger::DEFAULT_CAPACITY;

pub const DEFAULT_TOAST_MS: u32 = 1800;
const TOAST_MS_RANGE: (u32, u32) = (500, 10_000);

pub const DEFAULT_GRID: f64 = 20.0;
const GRID_RANGE: (f64, f64) = (4.0, 100.0);

/// Extensions accepted by the document library upload
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "json", "csv"];

/// User settings (persisted under `keys::SETTINGS`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub snap_to_grid: bool,
    pub grid_size: f64,
    pub toast_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snap_to_grid: false,
            grid_size: DEFAULT_GRID,
            toast_ms: DEFAULT_TOAST_MS,
        }
    }
}

impl Settings {
    /// Clamp every value into its allowed range
    pub fn sanitized(self) -> Self {
        let grid_size = if self.grid_size.is_finite() {
            self.grid_size.clamp(GRID_RANGE.0, GRID_RANGE.1)
        } else {
            DEFAULT_GRID
        };
        Self {
            snap_to_grid: self.snap_to_grid,
            grid_size,
            toast_ms: self.toast_ms.clamp(TOAST_MS_RANGE.0, TOAST_MS_RANGE.1),
        }
    }

    /// Drag/resize constraints for the canvas
    pub fn constraints(&self) -> Constraints {
        Constraints {
            bounds: Bounds::default(),
            grid: self.snap_to_grid.then_some(self.grid_size),
        }
    }
}

/// Whether an uploaded file looks like plain text
pub fn is_text_upload(name: &str, mime: &str) -> bool {
    if mime.starts_with("text/") || mime == "application/json" {
        return true;
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            TEXT_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_use_defaults() {
        let s: Settings = serde_json::from_str(r#"{"snapToGrid": true}"#).unwrap();
        assert!(s.snap_to_grid);
        assert_eq!(s.grid_size, DEFAULT_GRID);
        assert_eq!(s.toast_ms, DEFAULT_TOAST_MS);
    }

    #[test]
    fn test_sanitized_clamps() {
        let s = Settings {
            snap_to_grid: true,
            grid_size: 1.0,
            toast_ms: 60_000,
        }
        .sanitized();
        assert_eq!(s.grid_size, 4.0);
        assert_eq!(s.toast_ms, 10_000);

        let nan = Settings {
            grid_size: f64::NAN,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(nan.grid_size, DEFAULT_GRID);
    }

    #[test]
    fn test_constraints_grid_only_when_snapping() {
        assert_eq!(Settings::default().constraints().grid, None);
        let snapping = Settings {
            snap_to_grid: true,
            ..Settings::default()
        };
        assert_eq!(snapping.constraints().grid, Some(DEFAULT_GRID));
    }

    #[test]
    fn test_is_text_upload() {
        assert!(is_text_upload("notes.MD", ""));
        assert!(is_text_upload("anything", "text/plain"));
        assert!(is_text_upload("data.json", "application/json"));
        assert!(!is_text_upload("photo.png", "image/png"));
        assert!(!is_text_upload(".txt", ""));
    }
}
