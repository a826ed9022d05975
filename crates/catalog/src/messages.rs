//! Wire-format envelopes for catalog API responses.

use decksmith_core::card::CatalogCard;
use serde::Deserialize;

/// One page of card search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    /// Matching cards, in the catalog's ranking order.
    #[serde(default)]
    pub data: Vec<CatalogCard>,
    /// Total matches across all pages.
    #[serde(default)]
    pub total_cards: u64,
    /// Whether further pages exist.
    #[serde(default)]
    pub has_more: bool,
}

impl SearchPage {
    /// The "nothing matched" page the client substitutes for a 404.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Envelope for name autocompletion results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompletePage {
    #[serde(default)]
    pub data: Vec<String>,
}
