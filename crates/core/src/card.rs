//! Card records as returned by the card catalog.
//!
//! [`CatalogCard`] deserializes directly from the catalog's JSON wire
//! format. Records are immutable once fetched and are shared between the
//! suggestion pipeline and deck entries via `Arc<CatalogCard>`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::CardId;

/// Format key for Commander legality lookups.
pub const FORMAT_COMMANDER: &str = "commander";

// ---------------------------------------------------------------------------
// Legality
// ---------------------------------------------------------------------------

/// Per-format legality status as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Legality {
    Legal,
    NotLegal,
    Restricted,
    Banned,
    /// Any status string this client does not know about.
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// Card record
// ---------------------------------------------------------------------------

/// Image URLs for one printed face, by resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUris {
    pub small: String,
    pub normal: String,
    pub large: String,
    pub art_crop: String,
}

/// One printed face of a multi-faced card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    pub name: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    #[serde(default)]
    pub type_line: Option<String>,
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
}

/// Market prices for a printing, in catalog string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prices {
    #[serde(default)]
    pub usd: Option<String>,
    #[serde(default)]
    pub usd_foil: Option<String>,
}

/// A card record from the catalog.
///
/// Field names match the catalog's wire format so the record can be
/// deserialized without a mapping layer. Only `id`, `name`, and
/// `type_line` are required; everything else tolerates absence because
/// the catalog omits fields that do not apply to a given printing
/// (e.g. `image_uris` on dual-faced cards).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCard {
    pub id: CardId,
    pub name: String,
    pub type_line: String,
    #[serde(default)]
    pub mana_cost: Option<String>,
    /// Converted mana cost. Fractional values exist (un-sets), so float.
    #[serde(default)]
    pub cmc: f64,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    /// Color identity symbols, e.g. `["U", "R"]`.
    #[serde(default)]
    pub color_identity: Vec<String>,
    /// Present on single-faced cards only.
    #[serde(default)]
    pub image_uris: Option<ImageUris>,
    /// Per-format legality map, keyed by format name.
    #[serde(default)]
    pub legalities: BTreeMap<String, Legality>,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub set_name: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub prices: Prices,
    /// Printed faces, present on dual-faced cards.
    #[serde(default)]
    pub card_faces: Option<Vec<CardFace>>,
    /// Catalog marker for cards under special format scrutiny.
    #[serde(default)]
    pub game_changer: Option<bool>,
}

impl CatalogCard {
    /// Commander-format legality, `Unknown` when the map has no entry.
    pub fn commander_legality(&self) -> Legality {
        self.legalities
            .get(FORMAT_COMMANDER)
            .copied()
            .unwrap_or(Legality::Unknown)
    }

    /// Whether the catalog flags this card as notable.
    pub fn is_notable(&self) -> bool {
        self.game_changer.unwrap_or(false)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
