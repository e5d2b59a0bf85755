//! Card Entity
//!
//! A titled prompt snippet shown in the vertical list. The list keeps
//! insertion order; new cards are appended.

use serde::{Deserialize, Serialize};

use super::entity::{position_of, DomainError, DomainResult, Entity};
use super::naming::fresh_id;

/// Longest title derived from the first line of text
const DERIVED_TITLE_CHARS: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    pub text: String,
    /// Milliseconds since the Unix epoch
    pub created_at: i64,
}

impl Entity for Card {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Title from the first non-blank line, or "Untitled"
pub fn derive_title(text: &str) -> String {
    match text.lines().map(str::trim).find(|l| !l.is_empty()) {
        Some(line) => {
            let mut title: String = line.chars().take(DERIVED_TITLE_CHARS).collect();
            if line.chars().count() > DERIVED_TITLE_CHARS {
                title.push('…');
            }
            title
        }
        None => "Untitled".to_string(),
    }
}

fn validated(title: &str, text: &str) -> DomainResult<(String, String)> {
    if text.trim().is_empty() {
        return Err(DomainError::InvalidInput("prompt text is empty".to_string()));
    }
    let title = match title.trim() {
        "" => derive_title(text),
        t => t.to_string(),
    };
    Ok((title, text.to_string()))
}

/// Append a new card and return a copy of it
pub fn add_card(cards: &mut Vec<Card>, title: &str, text: &str, now: i64) -> DomainResult<Card> {
    let (title, text) = validated(title, text)?;
    let id = fresh_id("card", now, cards.iter().map(|c| c.id.as_str()));
    let card = Card {
        id,
        title,
        text,
        created_at: now,
    };
    cards.push(card.clone());
    Ok(card)
}

/// Inline "Save"
pub fn update_card(cards: &mut [Card], id: &str, title: &str, text: &str) -> DomainResult<Card> {
    let idx = position_of(cards, id)?;
    let (title, text) = validated(title, text)?;
    let card = &mut cards[idx];
    card.title = title;
    card.text = text;
    Ok(card.clone())
}

pub fn delete_card(cards: &mut Vec<Card>, id: &str) -> DomainResult<Card> {
    let idx = position_of(cards, id)?;
    Ok(cards.remove(idx))
}
