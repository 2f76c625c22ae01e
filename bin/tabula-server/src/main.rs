//! The tabula hosting server binary: initializes logging and the
//! interrupt handler, then runs [`tabula_hosting::Server::run`].

use std::sync::Arc;
use tabula_deck::{Deck, Item, StaticCatalog};

/// A small built-in deck so the server has something to bind a Host to
/// out of the box. Real deployments replace this with their own
/// [`tabula_deck::DeckCatalog`] implementation (SPEC_FULL §1.1).
fn demo_catalog() -> Arc<dyn tabula_deck::DeckCatalog> {
    let items = [
        ("the-queen", "The Queen", "Bluffer's favorite"),
        ("the-tower", "The Tower", "Sudden upheaval"),
        ("the-star", "The Star", "Hope renewed"),
        ("the-moon", "The Moon", "Illusion and doubt"),
        ("the-sun", "The Sun", "Clarity and joy"),
    ]
    .into_iter()
    .map(|(id, name, short_text)| Item {
        id: id.to_string(),
        name: name.to_string(),
        short_text: short_text.to_string(),
        long_text: None,
        detailed_text: None,
        category: None,
        theme_color: None,
        image_url: None,
    })
    .collect();

    Arc::new(StaticCatalog::new().with_deck(Deck {
        id: "demo".to_string(),
        items,
        theme: Some("Starter deck".to_string()),
    }))
}

#[tokio::main]
async fn main() {
    tabula_core::init_logging();
    tabula_core::install_interrupt_handler();
    if let Err(err) = tabula_hosting::Server::run(demo_catalog()).await {
        log::error!("server exited with error: {err}");
    }
}
