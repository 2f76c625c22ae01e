//! The seam between the Room Runtime and the out-of-scope deck asset
//! system (SPEC_FULL §1.1). `spec.md` excludes "the deck catalog file
//! format beyond what the runtime consumes" from scope, but a Host still
//! has to bind to *some* deck when it joins a room — this trait is that
//! binding point.

use crate::Deck;
use std::collections::HashMap;

/// Resolves a `deckId` to a bound [`Deck`]. Implementations are free to
/// read from disk, a database, or a remote service; none of that is this
/// workspace's concern.
pub trait DeckCatalog: Send + Sync {
    fn find(&self, deck_id: &str) -> Option<Deck>;
}

/// An in-memory catalog, sufficient for tests and standalone operation.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    decks: HashMap<String, Deck>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.decks.insert(deck.id.clone(), deck);
        self
    }
}

impl DeckCatalog for StaticCatalog {
    fn find(&self, deck_id: &str) -> Option<Deck> {
        self.decks.get(deck_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Item;

    fn sample_deck(id: &str) -> Deck {
        Deck {
            id: id.to_string(),
            items: vec![Item {
                id: "i1".into(),
                name: "One".into(),
                short_text: String::new(),
                long_text: None,
                detailed_text: None,
                category: None,
                theme_color: None,
                image_url: None,
            }],
            theme: None,
        }
    }

    #[test]
    fn finds_registered_decks() {
        let catalog = StaticCatalog::new().with_deck(sample_deck("d1"));
        assert!(catalog.find("d1").is_some());
        assert!(catalog.find("missing").is_none());
    }
}
