//! Layout Entity
//!
//! A named snapshot of the card list. Titles are unique within the
//! collection; the embedded cards are copies, never references.

use serde::{Deserialize, Serialize};

use super::card::Card;
use super::entity::{position_of, DomainResult, Entity};
use super::naming::{fresh_id, unique_name};

const DEFAULT_TITLE: &str = "Layout";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEntry {
    pub id: String,
    pub title: String,
    pub saved_at: i64,
    pub cards: Vec<Card>,
}

impl Entity for LayoutEntry {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Save the current cards under a unique title
pub fn save_layout(layouts: &mut Vec<LayoutEntry>, title: &str, cards: &[Card], now: i64) -> LayoutEntry {
    let title = unique_name(title, DEFAULT_TITLE, layouts.iter().map(|l| l.title.as_str()));
    let entry = LayoutEntry {
        id: fresh_id("layout", now, layouts.iter().map(|l| l.id.as_str())),
        title,
        saved_at: now,
        cards: cards.to_vec(),
    };
    layouts.push(entry.clone());
    entry
}

/// Replace the snapshot of an existing layout
pub fn overwrite_layout(layouts: &mut [LayoutEntry], id: &str, cards: &[Card], now: i64) -> DomainResult<()> {
    let idx = position_of(layouts, id)?;
    layouts[idx].cards = cards.to_vec();
    layouts[idx].saved_at = now;
    Ok(())
}

/// Rename, unique among the other layouts
pub fn rename_layout(layouts: &mut [LayoutEntry], id: &str, title: &str) -> DomainResult<String> {
    let idx = position_of(layouts, id)?;
    let others = layouts
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != idx)
        .map(|(_, l)| l.title.as_str());
    let title = unique_name(title, &layouts[idx].title, others);
    layouts[idx].title = title.clone();
    Ok(title)
}

pub fn delete_layout(layouts: &mut Vec<LayoutEntry>, id: &str) -> DomainResult<LayoutEntry> {
    let idx = position_of(layouts, id)?;
    Ok(layouts.remove(idx))
}

/// Cards that replace the current list when a layout is loaded
pub fn apply_layout(layout: &LayoutEntry) -> Vec<Card> {
    layout.cards.clone()
}

/// Newest `saved_at` first, ties keep stored order
pub fn sorted_newest_first(layouts: &[LayoutEntry]) -> Vec<LayoutEntry> {
    let mut sorted = layouts.to_vec();
    sorted.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::add_card;

    fn sample_cards() -> Vec<Card> {
        let mut cards = Vec::new();
        add_card(&mut cards, "A", "alpha", 1).unwrap();
        add_card(&mut cards, "B", "beta", 2).unwrap();
        cards
    }

    #[test]
    fn test_save_dedupes_titles() {
        let mut layouts = Vec::new();
        let cards = sample_cards();
        let a = save_layout(&mut layouts, "Work", &cards, 10);
        let b = save_layout(&mut layouts, "Work", &cards, 10);
        let c = save_layout(&mut layouts, "", &cards, 11);

        assert_eq!(a.title, "Work");
        assert_eq!(b.title, "Work (2)");
        assert_eq!(c.title, DEFAULT_TITLE);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut layouts = Vec::new();
        let mut cards = sample_cards();
        let saved = save_layout(&mut layouts, "Snap", &cards, 10);

        cards[0].text = "mutated".to_string();
        cards.pop();

        assert_eq!(layouts[0].cards.len(), 2);
        assert_eq!(layouts[0].cards[0].text, "alpha");

        let mut loaded = apply_layout(&layouts[0]);
        loaded.clear();
        assert_eq!(layouts[0].cards, saved.cards);
    }

    #[test]
    fn test_rename_ignores_own_title() {
        let mut layouts = Vec::new();
        let cards = sample_cards();
        let a = save_layout(&mut layouts, "One", &cards, 1);
        save_layout(&mut layouts, "Two", &cards, 2);

        assert_eq!(rename_layout(&mut layouts, &a.id, "One").unwrap(), "One");
        assert_eq!(rename_layout(&mut layouts, &a.id, "Two").unwrap(), "Two (2)");
        assert_eq!(rename_layout(&mut layouts, &a.id, "  ").unwrap(), "Two (2)");
    }

    #[test]
    fn test_overwrite_and_delete() {
        let mut layouts = Vec::new();
        let cards = sample_cards();
        let a = save_layout(&mut layouts, "One", &cards, 1);

        overwrite_layout(&mut layouts, &a.id, &cards[..1], 5).unwrap();
        assert_eq!(layouts[0].cards.len(), 1);
        assert_eq!(layouts[0].saved_at, 5);

        delete_layout(&mut layouts, &a.id).unwrap();
        assert!(layouts.is_empty());
        assert!(overwrite_layout(&mut layouts, &a.id, &cards, 6).is_err());
    }

    #[test]
    fn test_sorted_newest_first() {
        let mut layouts = Vec::new();
        let cards = sample_cards();
        save_layout(&mut layouts, "old", &cards, 1);
        save_layout(&mut layouts, "new", &cards, 9);
        let titles: Vec<String> = sorted_newest_first(&layouts).into_iter().map(|l| l.title).collect();
        assert_eq!(titles, vec!["new", "old"]);
    }
}
