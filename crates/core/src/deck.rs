//! The deck aggregate: commander, partner, and the ordered card list.
//!
//! A [`Deck`] is an in-memory aggregate owned by a single editing
//! session. All mutation goes through `&mut self`, so Rust's ownership
//! rules provide the required serialization: no operation here is safe
//! under concurrent invocation without external coordination, and none
//! takes a lock.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::card::CatalogCard;
use crate::error::DeckError;
use crate::normalize::{normalize, CardCategory};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of non-commander cards in a Commander deck.
pub const MAX_DECK_CARDS: usize = 99;

/// The only format this aggregate models.
pub const DECK_FORMAT: &str = "commander";

/// Default name for a freshly created deck.
pub const DEFAULT_DECK_NAME: &str = "Untitled Deck";

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Whether `add_card` rejects cards outside the commander's color identity.
///
/// The format rule exists, but deck builders commonly admit off-identity
/// cards while brewing, so enforcement is opt-in and `Relaxed` is the
/// default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorIdentityPolicy {
    /// Admit any card regardless of color identity.
    #[default]
    Relaxed,
    /// Reject cards whose identity is not a subset of the deck's,
    /// once a commander is set.
    Enforced,
}

// ---------------------------------------------------------------------------
// DeckCardEntry
// ---------------------------------------------------------------------------

/// One card slot in the deck list.
///
/// Entry presence is the ownership signal; `quantity` is always 1 in
/// this singleton format and exists only so list renderers need no
/// special case.
#[derive(Debug, Clone)]
pub struct DeckCardEntry {
    pub card: Arc<CatalogCard>,
    pub quantity: u8,
    pub category: CardCategory,
    pub is_legal: bool,
    pub is_notable: bool,
}

impl DeckCardEntry {
    /// Build an entry from a catalog card, deriving the display fields
    /// through the normalizer.
    pub fn new(card: Arc<CatalogCard>) -> Self {
        let normalized = normalize(&card);
        Self {
            card,
            quantity: 1,
            category: normalized.category,
            is_legal: normalized.is_legal,
            is_notable: normalized.is_notable,
        }
    }
}

// ---------------------------------------------------------------------------
// Deck
// ---------------------------------------------------------------------------

/// An in-memory Commander deck.
///
/// Invariants upheld by the mutating operations:
/// - no two entries share a card id, and neither commander nor partner
///   appears among the entries;
/// - at most [`MAX_DECK_CARDS`] non-commander entries;
/// - `color_identity` is the union of the commander's and partner's
///   identities, recomputed whenever either changes. Whether entries
///   must fit inside it is governed by [`ColorIdentityPolicy`].
#[derive(Debug, Clone)]
pub struct Deck {
    id: Uuid,
    name: String,
    commander: Option<Arc<CatalogCard>>,
    partner: Option<Arc<CatalogCard>>,
    cards: Vec<DeckCardEntry>,
    color_identity: BTreeSet<String>,
    policy: ColorIdentityPolicy,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Deck {
    /// Create an empty deck with the default name and relaxed policy.
    pub fn new() -> Self {
        Self::with_name(DEFAULT_DECK_NAME)
    }

    /// Create an empty deck with a specific name.
    pub fn with_name(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            commander: None,
            partner: None,
            cards: Vec::new(),
            color_identity: BTreeSet::new(),
            policy: ColorIdentityPolicy::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Switch the color-identity validation policy.
    ///
    /// Affects future `add_card` calls only; existing entries are never
    /// re-validated.
    pub fn set_policy(&mut self, policy: ColorIdentityPolicy) {
        self.policy = policy;
    }

    // -- accessors ----------------------------------------------------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Always [`DECK_FORMAT`].
    pub fn format(&self) -> &'static str {
        DECK_FORMAT
    }

    pub fn commander(&self) -> Option<&Arc<CatalogCard>> {
        self.commander.as_ref()
    }

    pub fn partner(&self) -> Option<&Arc<CatalogCard>> {
        self.partner.as_ref()
    }

    /// Entries in insertion order (insertion order = display order).
    pub fn cards(&self) -> &[DeckCardEntry] {
        &self.cards
    }

    /// Number of non-commander cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Union of the commander's and partner's color identities.
    pub fn color_identity(&self) -> &BTreeSet<String> {
        &self.color_identity
    }

    pub fn policy(&self) -> ColorIdentityPolicy {
        self.policy
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // -- mutation -----------------------------------------------------------

    /// Append a card to the deck list.
    ///
    /// Fails with [`DeckError::DuplicateCard`] if the card id already
    /// exists among the entries or as commander/partner, with
    /// [`DeckError::DeckFull`] at the 99-card limit, and with
    /// [`DeckError::OutsideColorIdentity`] under the enforced policy when
    /// a commander is set and the card does not fit the deck's identity.
    /// Insertion order is preserved.
    pub fn add_card(&mut self, card: Arc<CatalogCard>) -> Result<(), DeckError> {
        if self.contains(&card.id) {
            return Err(DeckError::DuplicateCard {
                name: card.name.clone(),
            });
        }
        if self.cards.len() >= MAX_DECK_CARDS {
            return Err(DeckError::DeckFull {
                limit: MAX_DECK_CARDS,
            });
        }
        if self.policy == ColorIdentityPolicy::Enforced
            && self.commander.is_some()
            && !card
                .color_identity
                .iter()
                .all(|symbol| self.color_identity.contains(symbol))
        {
            return Err(DeckError::OutsideColorIdentity {
                name: card.name.clone(),
            });
        }

        self.cards.push(DeckCardEntry::new(card));
        self.touch();
        Ok(())
    }

    /// Remove and return the entry at `index`.
    ///
    /// Later entries shift down one position, so indices captured before
    /// a mutation must not be reused. Fails with
    /// [`DeckError::IndexOutOfRange`] and leaves the deck unchanged for
    /// an invalid index.
    pub fn remove_card(&mut self, index: usize) -> Result<DeckCardEntry, DeckError> {
        if index >= self.cards.len() {
            return Err(DeckError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        let entry = self.cards.remove(index);
        self.touch();
        Ok(entry)
    }

    /// Set the commander.
    ///
    /// Does not touch the card list and does not re-validate existing
    /// entries against the new color identity.
    pub fn set_commander(&mut self, card: Arc<CatalogCard>) {
        self.commander = Some(card);
        self.recompute_color_identity();
        self.touch();
    }

    pub fn clear_commander(&mut self) {
        self.commander = None;
        self.recompute_color_identity();
        self.touch();
    }

    /// Set the partner commander. Same caveats as [`set_commander`].
    ///
    /// [`set_commander`]: Self::set_commander
    pub fn set_partner(&mut self, card: Arc<CatalogCard>) {
        self.partner = Some(card);
        self.recompute_color_identity();
        self.touch();
    }

    pub fn clear_partner(&mut self) {
        self.partner = None;
        self.recompute_color_identity();
        self.touch();
    }

    /// Rename the deck. Empty names are allowed; what to display for
    /// them is a presentation concern.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    // -- internals ----------------------------------------------------------

    fn contains(&self, card_id: &str) -> bool {
        self.cards.iter().any(|entry| entry.card.id == card_id)
            || self.commander.as_ref().is_some_and(|c| c.id == card_id)
            || self.partner.as_ref().is_some_and(|c| c.id == card_id)
    }

    fn recompute_color_identity(&mut self) {
        self.color_identity = self
            .commander
            .iter()
            .chain(self.partner.iter())
            .flat_map(|card| card.color_identity.iter().cloned())
            .collect();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
