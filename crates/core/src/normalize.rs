//! Card normalization: raw catalog records to presentation-ready views.
//!
//! [`normalize`] is pure and total. It classifies a card by its type
//! line, resolves its display images (including the dual-faced case),
//! and precomputes the Commander legality and notability flags that the
//! suggestion list and deck entries display.

use serde::{Deserialize, Serialize};

use crate::card::{CatalogCard, Legality};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Display category of a card, derived from its type line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardCategory {
    Creature,
    Instant,
    Sorcery,
    Artifact,
    Enchantment,
    Planeswalker,
    Land,
    Other,
}

impl CardCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creature => "creature",
            Self::Instant => "instant",
            Self::Sorcery => "sorcery",
            Self::Artifact => "artifact",
            Self::Enchantment => "enchantment",
            Self::Planeswalker => "planeswalker",
            Self::Land => "land",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for CardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword priority for classification, highest first.
///
/// The order is a deliberate tie-break for hybrid type lines ("Artifact
/// Creature" classifies as creature) and must match across every surface
/// that buckets cards. Do not reorder.
const CATEGORY_KEYWORDS: &[(&str, CardCategory)] = &[
    ("creature", CardCategory::Creature),
    ("instant", CardCategory::Instant),
    ("sorcery", CardCategory::Sorcery),
    ("artifact", CardCategory::Artifact),
    ("enchantment", CardCategory::Enchantment),
    ("planeswalker", CardCategory::Planeswalker),
    ("land", CardCategory::Land),
];

/// Classify a type line into a [`CardCategory`].
///
/// Matching is case-insensitive substring search over the whole type
/// line, so "Legendary Creature — Elf" and "Snow Land" both classify.
pub fn categorize(type_line: &str) -> CardCategory {
    let lower = type_line.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, category)| *category)
        .unwrap_or(CardCategory::Other)
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Display images for a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImages {
    /// Normal-resolution image of the front face.
    pub front: String,
    /// Back face image, present only for dual-faced cards.
    #[serde(default)]
    pub back: Option<String>,
}

/// Resolve the display images for a card.
///
/// Single-faced records use their own normal-resolution image. Records
/// with two or more faces use face 0 as front and face 1 as back; a face
/// without images resolves to an empty URL rather than dropping the
/// pair. Records with neither yield `None`, which callers treat as "no
/// visual" rather than an error.
pub fn card_images(card: &CatalogCard) -> Option<CardImages> {
    if let Some(uris) = &card.image_uris {
        return Some(CardImages {
            front: uris.normal.clone(),
            back: None,
        });
    }

    match &card.card_faces {
        Some(faces) if faces.len() >= 2 => Some(CardImages {
            front: face_image(faces.first()),
            back: Some(face_image(faces.get(1))),
        }),
        _ => None,
    }
}

fn face_image(face: Option<&crate::card::CardFace>) -> String {
    face.and_then(|f| f.image_uris.as_ref())
        .map(|uris| uris.normal.clone())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// NormalizedCard
// ---------------------------------------------------------------------------

/// Presentation-ready view of a catalog card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCard {
    pub category: CardCategory,
    /// Legal in the Commander format.
    pub is_legal: bool,
    /// Flagged by the catalog as notable.
    pub is_notable: bool,
    /// Display images, absent when the record carries none.
    pub images: Option<CardImages>,
}

/// Normalize a raw catalog record. Pure and total; never fails.
pub fn normalize(card: &CatalogCard) -> NormalizedCard {
    NormalizedCard {
        category: categorize(&card.type_line),
        is_legal: card.commander_legality() == Legality::Legal,
        is_notable: card.is_notable(),
        images: card_images(card),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
