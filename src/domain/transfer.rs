//! Import / Export
//!
//! JSON documents for cards + layouts, canvas boxes, and the document
//! library. Imports are lenient: every record is normalized field by field
//! with defaults, and nothing is written until the whole file parsed.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use leptos_pointer::{Bounds, Rect};

use super::canvas_box::{CanvasBox, DEFAULT_H, DEFAULT_W};
use super::card::{derive_title, Card};
use super::layout::LayoutEntry;
use super::library::{DocFile, DocFolder, DocLibrary};
use super::naming::{fresh_id, unique_file_name, unique_name};

pub const EXPORT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected file format: {0}")]
    Shape(String),
}

pub type TransferResult<T> = Result<T, TransferError>;

/// Counts reported after an import
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
    pub layouts: usize,
    pub folders: usize,
}

impl ImportSummary {
    /// Toast text, e.g. "Imported 3 cards, 1 layout (2 skipped)"
    pub fn message(&self, noun: &str) -> String {
        let mut msg = format!("Imported {}", plural(self.added, noun));
        if self.layouts > 0 {
            msg.push_str(&format!(", {}", plural(self.layouts, "layout")));
        }
        if self.folders > 0 {
            msg.push_str(&format!(", {}", plural(self.folders, "folder")));
        }
        if self.skipped > 0 {
            msg.push_str(&format!(" ({} skipped)", self.skipped));
        }
        msg
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else if noun.ends_with('x') || noun.ends_with('s') {
        format!("{} {}es", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

// ========================
// Export
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardsExport<'a> {
    version: u32,
    exported_at: i64,
    cards: &'a [Card],
    layouts: &'a [LayoutEntry],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanvasExport<'a> {
    version: u32,
    exported_at: i64,
    boxes: &'a [CanvasBox],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LibraryExport<'a> {
    version: u32,
    exported_at: i64,
    folders: &'a [DocFolder],
    files: &'a [DocFile],
}

pub fn export_cards(cards: &[Card], layouts: &[LayoutEntry], now: i64) -> TransferResult<String> {
    let doc = CardsExport {
        version: EXPORT_VERSION,
        exported_at: now,
        cards,
        layouts,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn export_boxes(boxes: &[CanvasBox], now: i64) -> TransferResult<String> {
    let doc = CanvasExport {
        version: EXPORT_VERSION,
        exported_at: now,
        boxes,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn export_library(library: &DocLibrary, now: i64) -> TransferResult<String> {
    let doc = LibraryExport {
        version: EXPORT_VERSION,
        exported_at: now,
        folders: &library.folders,
        files: &library.files,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// `copyai-{kind}-YYYYMMDD-HHMMSS.json`, UTC
pub fn export_filename(kind: &str, now: i64) -> String {
    let stamp = DateTime::<Utc>::from_timestamp_millis(now)
        .map(|t| t.format("%Y%m%d-%H%M%S").to_string())
        .unwrap_or_else(|| now.to_string());
    format!("copyai-{}-{}.json", kind, stamp)
}

// ========================
// Field readers
// ========================

fn str_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match obj.get(*k) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Number or numeric string; non-finite values are rejected
fn num_field(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(value)
}

/// Epoch millis as number, numeric string, or RFC 3339 string
fn time_field(obj: &Map<String, Value>, key: &str) -> Option<i64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|t| t.timestamp_millis()))
        }
        _ => None,
    }
}

/// Imported id, or a fresh one when blank or already taken
fn claim_id(raw: Option<String>, prefix: &str, stamp: i64, taken: &mut HashSet<String>) -> String {
    let id = match raw.map(|s| s.trim().to_string()) {
        Some(id) if !id.is_empty() && !taken.contains(&id) => id,
        _ => fresh_id(prefix, stamp, taken.iter().map(String::as_str)),
    };
    taken.insert(id.clone());
    id
}

/// Top-level array under `key`, or the document itself when it is a bare array
fn records<'a>(doc: &'a Value, key: &str, allow_bare: bool) -> TransferResult<Option<&'a Vec<Value>>> {
    match doc {
        Value::Array(items) => Ok(allow_bare.then_some(items)),
        Value::Object(obj) => match obj.get(key) {
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(Value::Null) | None => Ok(None),
            Some(_) => Err(TransferError::Shape(format!("\"{}\" is not a list", key))),
        },
        _ => Err(TransferError::Shape("expected a JSON object".to_string())),
    }
}

// ========================
// Cards + layouts
// ========================

fn normalize_card(value: &Value, index: usize, now: i64, taken: &mut HashSet<String>) -> Option<Card> {
    let obj = value.as_object()?;
    let text = str_field(obj, &["text", "content"]).unwrap_or_default();
    let title = str_field(obj, &["title", "name"]).map(|t| t.trim().to_string()).unwrap_or_default();
    if text.trim().is_empty() && title.is_empty() {
        return None;
    }
    let stamp = now + index as i64;
    let created_at = time_field(obj, "createdAt").unwrap_or(stamp);
    let id = claim_id(str_field(obj, &["id"]), "card", stamp, taken);
    let title = if title.is_empty() { derive_title(&text) } else { title };
    Some(Card {
        id,
        title,
        text,
        created_at,
    })
}

/// Merge an exported cards file into the current state
///
/// Accepts `{ cards, layouts }` or a bare array of cards. Records keep
/// file order and are appended after the existing ones.
pub fn import_cards(
    json: &str,
    cards: &mut Vec<Card>,
    layouts: &mut Vec<LayoutEntry>,
    now: i64,
) -> TransferResult<ImportSummary> {
    let doc: Value = serde_json::from_str(json)?;
    let card_values = records(&doc, "cards", true)?;
    let layout_values = records(&doc, "layouts", false)?;
    if card_values.is_none() && layout_values.is_none() {
        return Err(TransferError::Shape("no cards or layouts found".to_string()));
    }

    let mut summary = ImportSummary::default();
    let existing: HashMap<&str, &Card> = cards.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut taken: HashSet<String> = cards.iter().map(|c| c.id.clone()).collect();
    let mut new_cards = Vec::new();

    for (index, value) in card_values.into_iter().flatten().enumerate() {
        let duplicate = value
            .as_object()
            .and_then(|obj| str_field(obj, &["id"]))
            .and_then(|id| existing.get(id.as_str()).copied())
            .is_some_and(|c| {
                value.get("text").and_then(Value::as_str) == Some(c.text.as_str())
                    && value.get("title").and_then(Value::as_str) == Some(c.title.as_str())
            });
        if duplicate {
            summary.skipped += 1;
            continue;
        }
        match normalize_card(value, index, now, &mut taken) {
            Some(card) => new_cards.push(card),
            None => summary.skipped += 1,
        }
    }

    let mut new_layouts = Vec::new();
    let mut titles: Vec<String> = layouts.iter().map(|l| l.title.clone()).collect();
    let mut layout_ids: HashSet<String> = layouts.iter().map(|l| l.id.clone()).collect();
    for (index, value) in layout_values.into_iter().flatten().enumerate() {
        let Some(obj) = value.as_object() else {
            summary.skipped += 1;
            continue;
        };
        let stamp = now + index as i64;
        let raw_title = str_field(obj, &["title", "name"]).unwrap_or_default();

        let mut snapshot_ids = HashSet::new();
        let snapshot: Vec<Card> = match obj.get("cards") {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, v)| normalize_card(v, i, stamp, &mut snapshot_ids))
                .collect(),
            _ => Vec::new(),
        };

        let raw_id = str_field(obj, &["id"]);
        let duplicate = raw_id
            .as_deref()
            .and_then(|id| layouts.iter().find(|l| l.id == id.trim()))
            .is_some_and(|l| l.title == raw_title.trim() && l.cards == snapshot);
        if duplicate {
            summary.skipped += 1;
            continue;
        }

        let title = unique_name(&raw_title, "Layout", titles.iter().map(String::as_str));
        titles.push(title.clone());
        new_layouts.push(LayoutEntry {
            id: claim_id(raw_id, "layout", stamp, &mut layout_ids),
            title,
            saved_at: time_field(obj, "savedAt").unwrap_or(stamp),
            cards: snapshot,
        });
    }

    summary.added = new_cards.len();
    summary.layouts = new_layouts.len();
    cards.extend(new_cards);
    layouts.extend(new_layouts);
    Ok(summary)
}

// ========================
// Canvas boxes
// ========================

/// Box with an empty id; the caller claims one
fn normalize_box(value: &Value, index: usize, bounds: &Bounds) -> Option<CanvasBox> {
    let obj = value.as_object()?;
    let offset = 24.0 * (index as f64 + 1.0);
    let rect = Rect::new(
        num_field(obj, "x").unwrap_or(offset),
        num_field(obj, "y").unwrap_or(offset),
        num_field(obj, "w").or_else(|| num_field(obj, "width")).unwrap_or(DEFAULT_W),
        num_field(obj, "h").or_else(|| num_field(obj, "height")).unwrap_or(DEFAULT_H),
    )
    .clamped(bounds);
    Some(CanvasBox {
        id: String::new(),
        x: rect.x,
        y: rect.y,
        w: rect.w,
        h: rect.h,
        text: str_field(obj, &["text", "content"]).unwrap_or_default(),
    })
}

/// Append boxes from `{ boxes }` or a bare array, clamped into bounds
pub fn import_boxes(
    json: &str,
    boxes: &mut Vec<CanvasBox>,
    bounds: &Bounds,
    now: i64,
) -> TransferResult<ImportSummary> {
    let doc: Value = serde_json::from_str(json)?;
    let values = records(&doc, "boxes", true)?
        .ok_or_else(|| TransferError::Shape("no boxes found".to_string()))?;

    let mut summary = ImportSummary::default();
    let mut taken: HashSet<String> = boxes.iter().map(|b| b.id.clone()).collect();
    let mut new_boxes = Vec::new();
    for (index, value) in values.iter().enumerate() {
        let Some(mut b) = normalize_box(value, index, bounds) else {
            summary.skipped += 1;
            continue;
        };
        let raw_id = value.as_object().and_then(|obj| str_field(obj, &["id"]));
        let duplicate = raw_id
            .as_deref()
            .and_then(|id| boxes.iter().find(|e| e.id == id.trim()))
            .is_some_and(|e| e.text == b.text && (e.x, e.y, e.w, e.h) == (b.x, b.y, b.w, b.h));
        if duplicate {
            summary.skipped += 1;
            continue;
        }
        b.id = claim_id(raw_id, "box", now + index as i64, &mut taken);
        new_boxes.push(b);
    }
    summary.added = new_boxes.len();
    boxes.extend(new_boxes);
    Ok(summary)
}

// ========================
// Document library
// ========================

/// Merge an exported library
///
/// Folders with a matching name are reused; files follow their folder and
/// are renamed on collision. Unknown folder references land in unfiled.
pub fn import_library(json: &str, library: &mut DocLibrary, now: i64) -> TransferResult<ImportSummary> {
    let doc: Value = serde_json::from_str(json)?;
    let folder_values = records(&doc, "folders", false)?;
    let file_values = records(&doc, "files", false)?;
    if folder_values.is_none() && file_values.is_none() {
        return Err(TransferError::Shape("no folders or files found".to_string()));
    }

    let mut staged = library.clone();
    let mut summary = ImportSummary::default();

    // Imported folder id -> local folder id
    let mut folder_map: HashMap<String, String> = HashMap::new();
    let mut folder_ids: HashSet<String> = staged.folders.iter().map(|f| f.id.clone()).collect();
    for (index, value) in folder_values.into_iter().flatten().enumerate() {
        let Some(obj) = value.as_object() else {
            summary.skipped += 1;
            continue;
        };
        let stamp = now + index as i64;
        let name = str_field(obj, &["name", "title"]).unwrap_or_default();
        let raw_id = str_field(obj, &["id"]);

        let local_id = match staged.folders.iter().find(|f| f.name == name.trim()) {
            Some(existing) => existing.id.clone(),
            None => {
                let folder = DocFolder {
                    id: claim_id(raw_id.clone(), "folder", stamp, &mut folder_ids),
                    name: unique_name(&name, "Imported", staged.folders.iter().map(|f| f.name.as_str())),
                    created_at: time_field(obj, "createdAt").unwrap_or(stamp),
                };
                let id = folder.id.clone();
                staged.folders.push(folder);
                summary.folders += 1;
                id
            }
        };
        if let Some(raw) = raw_id {
            folder_map.insert(raw, local_id);
        }
    }

    let mut file_ids: HashSet<String> = staged.files.iter().map(|f| f.id.clone()).collect();
    for (index, value) in file_values.into_iter().flatten().enumerate() {
        let Some(obj) = value.as_object() else {
            summary.skipped += 1;
            continue;
        };
        let stamp = now + index as i64;
        let folder_id = str_field(obj, &["folderId"])
            .and_then(|raw| folder_map.get(&raw).cloned().or(Some(raw)))
            .and_then(|id| staged.resolve_folder(Some(&id)));
        let name = str_field(obj, &["name", "title"]).unwrap_or_default();
        let content = str_field(obj, &["content", "text"]).unwrap_or_default();
        let raw_id = str_field(obj, &["id"]);

        let duplicate = raw_id
            .as_deref()
            .and_then(|id| staged.file(id))
            .is_some_and(|f| {
                f.name == name && f.content == content && staged.resolve_folder(f.folder_id.as_deref()) == folder_id
            });
        if duplicate {
            summary.skipped += 1;
            continue;
        }

        let created_at = time_field(obj, "createdAt").unwrap_or(stamp);
        let file = DocFile {
            id: claim_id(raw_id, "doc", stamp, &mut file_ids),
            name: unique_file_name(&name, staged.names_in(folder_id.as_deref(), None)),
            content,
            created_at,
            updated_at: time_field(obj, "updatedAt").unwrap_or(created_at),
            folder_id,
        };
        staged.files.push(file);
        summary.added += 1;
    }

    *library = staged;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{add_card, save_layout, FolderFilter};
    use leptos_pointer::geometry::{MAX_W, MIN_H};

    #[test]
    fn test_export_filename() {
        // 2024-03-05 07:08:09 UTC
        assert_eq!(export_filename("export", 1_709_622_489_000), "copyai-export-20240305-070809.json");
    }

    #[test]
    fn test_cards_round_trip_keeps_order() {
        let mut cards = Vec::new();
        add_card(&mut cards, "Zeta", "last alphabetically", 300).unwrap();
        add_card(&mut cards, "Alpha", "first", 100).unwrap();
        add_card(&mut cards, "Mid", "middle", 200).unwrap();
        let mut layouts = Vec::new();
        save_layout(&mut layouts, "Set", &cards, 400);

        let json = export_cards(&cards, &layouts, 500).unwrap();

        let mut fresh_cards = Vec::new();
        let mut fresh_layouts = Vec::new();
        let summary = import_cards(&json, &mut fresh_cards, &mut fresh_layouts, 900).unwrap();

        assert_eq!(summary.added, 3);
        assert_eq!(summary.layouts, 1);
        assert_eq!(fresh_cards, cards);
        assert_eq!(fresh_layouts, layouts);
    }

    #[test]
    fn test_reimport_is_idempotent() {
        let mut cards = Vec::new();
        add_card(&mut cards, "A", "alpha", 1).unwrap();
        let mut layouts = Vec::new();
        save_layout(&mut layouts, "Work", &cards, 2);
        let json = export_cards(&cards, &layouts, 3).unwrap();

        let summary = import_cards(&json, &mut cards, &mut layouts, 4).unwrap();
        assert_eq!(summary.added, 0);
        assert_eq!(summary.layouts, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(cards.len(), 1);
        let titles: Vec<&str> = layouts.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Work"]);
    }

    #[test]
    fn test_layout_with_same_id_but_new_cards_is_added() {
        let mut cards = Vec::new();
        let mut layouts = Vec::new();
        save_layout(&mut layouts, "Work", &[], 1);
        let json = format!(
            r#"{{"layouts": [{{"id": "{}", "title": "Work", "cards": [{{"text": "a"}}]}}]}}"#,
            layouts[0].id
        );

        let summary = import_cards(&json, &mut cards, &mut layouts, 10).unwrap();
        assert_eq!(summary.layouts, 1);
        assert_eq!(layouts[1].title, "Work (2)");
        assert_ne!(layouts[0].id, layouts[1].id);
    }

    #[test]
    fn test_colliding_id_with_different_content_gets_fresh_id() {
        let mut cards = Vec::new();
        add_card(&mut cards, "A", "alpha", 1).unwrap();
        let json = format!(r#"[{{"id":"{}","title":"B","text":"beta"}}]"#, cards[0].id);

        let mut layouts = Vec::new();
        import_cards(&json, &mut cards, &mut layouts, 50).unwrap();
        assert_eq!(cards.len(), 2);
        assert_ne!(cards[0].id, cards[1].id);
        assert_eq!(cards[1].title, "B");
    }

    #[test]
    fn test_bare_array_with_missing_fields() {
        let json = r#"[
            {"text": "Write a haiku\nabout rust"},
            {"title": "Only title"},
            {"title": "", "text": "   "},
            42,
            {"id": 7, "title": "Numeric id", "text": "x", "createdAt": "2024-01-01T00:00:00Z"}
        ]"#;
        let mut cards = Vec::new();
        let mut layouts = Vec::new();
        let summary = import_cards(json, &mut cards, &mut layouts, 1_000).unwrap();

        assert_eq!(summary.added, 3);
        assert_eq!(summary.skipped, 2);
        assert_eq!(cards[0].title, "Write a haiku");
        assert_eq!(cards[0].created_at, 1_000);
        assert_eq!(cards[1].text, "");
        assert_eq!(cards[1].created_at, 1_001);
        assert_eq!(cards[2].id, "7");
        assert_eq!(cards[2].created_at, 1_704_067_200_000);
    }

    #[test]
    fn test_imported_layout_titles_deduped() {
        let mut cards = Vec::new();
        let mut layouts = Vec::new();
        save_layout(&mut layouts, "Work", &[], 1);
        let json = r#"{"layouts": [{"title": "Work", "cards": [{"text": "a"}]}, {"title": "Work"}]}"#;

        let summary = import_cards(json, &mut cards, &mut layouts, 10).unwrap();
        assert_eq!(summary.layouts, 2);
        let titles: Vec<&str> = layouts.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Work", "Work (2)", "Work (3)"]);
        assert_eq!(layouts[1].cards.len(), 1);
        assert!(cards.is_empty());
    }

    #[test]
    fn test_invalid_import_leaves_state() {
        let mut cards = Vec::new();
        add_card(&mut cards, "A", "alpha", 1).unwrap();
        let mut layouts = Vec::new();

        assert!(matches!(import_cards("not json", &mut cards, &mut layouts, 1), Err(TransferError::Json(_))));
        assert!(matches!(import_cards("\"str\"", &mut cards, &mut layouts, 1), Err(TransferError::Shape(_))));
        assert!(matches!(import_cards("{}", &mut cards, &mut layouts, 1), Err(TransferError::Shape(_))));
        assert!(matches!(
            import_cards(r#"{"cards": 3}"#, &mut cards, &mut layouts, 1),
            Err(TransferError::Shape(_))
        ));
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_import_boxes_clamps_and_defaults() {
        let json = r#"{"boxes": [
            {"x": "10", "y": -50, "w": 5000, "h": 1, "text": "big"},
            {"text": "defaults"}
        ]}"#;
        let mut boxes = Vec::new();
        let summary = import_boxes(json, &mut boxes, &Bounds::default(), 5).unwrap();

        assert_eq!(summary.added, 2);
        assert_eq!(boxes[0].x, 10.0);
        assert_eq!(boxes[0].y, 0.0);
        assert_eq!(boxes[0].w, MAX_W);
        assert_eq!(boxes[0].h, MIN_H);
        assert_eq!((boxes[1].x, boxes[1].y), (48.0, 48.0));
        assert_eq!(boxes[1].w, DEFAULT_W);
        assert_ne!(boxes[0].id, boxes[1].id);
    }

    #[test]
    fn test_boxes_round_trip() {
        let mut boxes = Vec::new();
        crate::domain::add_box(&mut boxes, "one", 1, &Bounds::default());
        crate::domain::add_box(&mut boxes, "two", 2, &Bounds::default());
        let json = export_boxes(&boxes, 3).unwrap();

        let mut restored = Vec::new();
        import_boxes(&json, &mut restored, &Bounds::default(), 4).unwrap();
        assert_eq!(restored, boxes);
    }

    #[test]
    fn test_boxes_reimport_is_idempotent() {
        let bounds = Bounds::default();
        let mut boxes = Vec::new();
        crate::domain::add_box(&mut boxes, "one", 1, &bounds);
        let json = export_boxes(&boxes, 2).unwrap();

        let summary = import_boxes(&json, &mut boxes, &bounds, 3).unwrap();
        assert_eq!(summary.added, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(boxes.len(), 1);

        boxes[0].text = "edited".to_string();
        let summary = import_boxes(&json, &mut boxes, &bounds, 4).unwrap();
        assert_eq!(summary.added, 1);
        assert_ne!(boxes[0].id, boxes[1].id);
    }

    #[test]
    fn test_library_reimport_skips_file_in_missing_folder() {
        let mut lib = DocLibrary::default();
        lib.add_file("a.txt", "x", None, 1);
        lib.files[0].folder_id = Some("gone".to_string());
        let json = export_library(&lib, 2).unwrap();

        let summary = import_library(&json, &mut lib, 3).unwrap();
        assert_eq!(summary.added, 0);
        assert_eq!(summary.skipped, 1);
        assert_eq!(lib.files.len(), 1);
    }

    #[test]
    fn test_library_import_merges_folders_by_name() {
        let mut lib = DocLibrary::default();
        let specs = lib.create_folder("Specs", 1);
        lib.add_file("a.txt", "local", Some(&specs.id), 1);

        let json = r#"{
            "folders": [{"id": "f-remote", "name": "Specs"}, {"id": "f-new", "name": "Drafts"}],
            "files": [
                {"id": "r1", "name": "a.txt", "content": "remote", "folderId": "f-remote"},
                {"id": "r2", "name": "b.txt", "content": "draft", "folderId": "f-new"},
                {"id": "r3", "name": "c.txt", "content": "lost", "folderId": "f-missing"}
            ]
        }"#;
        let summary = import_library(json, &mut lib, 100).unwrap();

        assert_eq!(summary.folders, 1);
        assert_eq!(summary.added, 3);
        assert_eq!(lib.folders.len(), 2);

        let in_specs: Vec<String> = lib
            .files_in(&FolderFilter::Folder(specs.id.clone()))
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(in_specs, vec!["a (2).txt", "a.txt"]);

        let drafts = lib.folders.iter().find(|f| f.name == "Drafts").unwrap();
        assert_eq!(lib.count_in(&FolderFilter::Folder(drafts.id.clone())), 1);
        assert_eq!(lib.count_in(&FolderFilter::Unfiled), 1);
    }

    #[test]
    fn test_library_round_trip_is_idempotent() {
        let mut lib = DocLibrary::default();
        let f = lib.create_folder("F", 1);
        lib.add_file("a.txt", "x", Some(&f.id), 2);
        lib.add_file("b.md", "# y", None, 3);
        let json = export_library(&lib, 4).unwrap();

        let mut fresh = DocLibrary::default();
        import_library(&json, &mut fresh, 5).unwrap();
        assert_eq!(fresh, lib);

        let summary = import_library(&json, &mut fresh, 6).unwrap();
        assert_eq!(summary.added, 0);
        assert_eq!(summary.skipped, 2);
        assert_eq!(fresh, lib);
    }

    #[test]
    fn test_summary_message() {
        let s = ImportSummary {
            added: 1,
            skipped: 2,
            layouts: 3,
            folders: 0,
        };
        assert_eq!(s.message("card"), "Imported 1 card, 3 layouts (2 skipped)");
        assert_eq!(plural(0, "box"), "0 boxes");
    }
}
