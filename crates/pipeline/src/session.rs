//! The deck editing session: one deck, one quick-add pipeline, one
//! catalog handle.
//!
//! All deck mutation funnels through `&mut self` here, keeping the
//! single-actor model: the pipeline's background cycles only ever touch
//! suggestion state, never the deck.

use std::sync::Arc;

use decksmith_catalog::{CardCatalog, CatalogError, SearchPage};
use decksmith_core::card::CatalogCard;
use decksmith_core::deck::Deck;
use decksmith_core::error::DeckError;
use decksmith_core::stats::{deck_stats, DeckStats};

use crate::quick_add::{Key, KeyOutcome, QuickAdd, QuickAddConfig};

/// What a key press did to the session's deck.
#[derive(Debug)]
pub enum SessionEvent {
    /// The key did not commit a card (cursor movement, dismissal, ...).
    None,
    /// A card was committed and added to the deck.
    CardAdded { name: String },
    /// A card was committed but the deck rejected it. Non-fatal; the
    /// notice must be surfaced, never swallowed.
    AddRejected(DeckError),
}

/// A single editing session over one deck.
pub struct DeckSession {
    deck: Deck,
    quick_add: QuickAdd,
    catalog: Arc<dyn CardCatalog>,
}

impl DeckSession {
    pub fn new(catalog: Arc<dyn CardCatalog>) -> Self {
        Self::with_config(catalog, QuickAddConfig::default())
    }

    pub fn with_config(catalog: Arc<dyn CardCatalog>, config: QuickAddConfig) -> Self {
        Self {
            deck: Deck::new(),
            quick_add: QuickAdd::new(Arc::clone(&catalog), config),
            catalog,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Direct deck mutation (rename, remove, commander changes). The
    /// session is the sole owner, so this is safe by construction.
    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    pub fn quick_add(&self) -> &QuickAdd {
        &self.quick_add
    }

    /// Statistics over the current deck, recomputed on every call.
    pub fn stats(&self) -> DeckStats {
        deck_stats(&self.deck)
    }

    /// Forward a keystroke's new input text to the pipeline.
    pub async fn input(&self, text: &str) {
        self.quick_add.on_input(text).await;
    }

    /// Feed a key press through the pipeline and apply any committed
    /// card to the deck.
    pub async fn handle_key(&mut self, key: Key) -> SessionEvent {
        match self.quick_add.on_key(key).await {
            KeyOutcome::Committed(card) => self.add_committed(card),
            _ => SessionEvent::None,
        }
    }

    /// Add a card the user picked outside the quick-add flow (e.g. a
    /// search-result click).
    pub fn add_card(&mut self, card: Arc<CatalogCard>) -> SessionEvent {
        self.add_committed(card)
    }

    /// Explicit user search, restricted to Commander-legal cards.
    ///
    /// Unlike suggestion resolution, a catalog failure here surfaces to
    /// the caller: the user asked for this search and gets the error.
    pub async fn search_cards(&self, text: &str) -> Result<SearchPage, CatalogError> {
        self.catalog.search_commander_cards(text).await
    }

    /// Explicit search for commander-eligible cards.
    pub async fn search_commanders(&self, text: &str) -> Result<SearchPage, CatalogError> {
        self.catalog.search_commanders(text).await
    }

    fn add_committed(&mut self, card: Arc<CatalogCard>) -> SessionEvent {
        let name = card.name.clone();
        match self.deck.add_card(card) {
            Ok(()) => {
                tracing::info!(card = %name, deck = %self.deck.name(), "Card added");
                SessionEvent::CardAdded { name }
            }
            Err(e) => {
                tracing::info!(card = %name, error = %e, "Card rejected");
                SessionEvent::AddRejected(e)
            }
        }
    }
}
