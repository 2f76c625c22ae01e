//! Items and decks: immutable value types (§3).
//!
//! - [`Item`] — a single drawable entry
//! - [`Deck`] — an ordered, immutable collection of items
//! - [`DeckCatalog`] — the seam to whatever out-of-scope asset system
//!   supplies decks (SPEC_FULL §1.1)

mod catalog;

pub use catalog::{DeckCatalog, StaticCatalog};

use serde::{Deserialize, Serialize};

/// A single drawable entry. Identity is `id`, unique within its [`Deck`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(rename = "shortText")]
    pub short_text: String,
    #[serde(rename = "longText", skip_serializing_if = "Option::is_none", default)]
    pub long_text: Option<String>,
    #[serde(rename = "detailedText", skip_serializing_if = "Option::is_none", default)]
    pub detailed_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category: Option<String>,
    #[serde(rename = "themeColor", skip_serializing_if = "Option::is_none", default)]
    pub theme_color: Option<String>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none", default)]
    pub image_url: Option<String>,
}

/// An ordered, immutable sequence of [`Item`]s bound to a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub items: Vec<Item>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub theme: Option<String>,
}

/// A deck did not have enough items for the board size it was bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsufficientItems {
    pub have: usize,
    pub need: usize,
}

impl std::fmt::Display for InsufficientItems {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "deck has {} items, needs at least {}",
            self.have, self.need
        )
    }
}
impl std::error::Error for InsufficientItems {}

impl Deck {
    /// `|items| ≥ s` is enforced before a deck is bound to a room (§3).
    pub fn ensure_capacity(&self, s: usize) -> Result<(), InsufficientItems> {
        if self.items.len() < s {
            Err(InsufficientItems {
                have: self.items.len(),
                need: s,
            })
        } else {
            Ok(())
        }
    }

    pub fn item_ids(&self) -> Vec<String> {
        self.items.iter().map(|i| i.id.clone()).collect()
    }

    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            short_text: String::new(),
            long_text: None,
            detailed_text: None,
            category: None,
            theme_color: None,
            image_url: None,
        }
    }

    #[test]
    fn capacity_check() {
        let deck = Deck {
            id: "d1".into(),
            items: vec![item("a"), item("b")],
            theme: None,
        };
        assert!(deck.ensure_capacity(2).is_ok());
        assert!(deck.ensure_capacity(3).is_err());
    }

    #[test]
    fn find_by_id() {
        let deck = Deck {
            id: "d1".into(),
            items: vec![item("a"), item("b")],
            theme: None,
        };
        assert!(deck.find("a").is_some());
        assert!(deck.find("z").is_none());
    }
}
