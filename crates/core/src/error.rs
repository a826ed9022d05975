/// Errors raised by deck aggregate operations.
///
/// All variants are synchronous and caller-visible; callers must not
/// silently drop them.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// The card is already present in the deck (or is the commander).
    #[error("Card already in deck: {name}")]
    DuplicateCard { name: String },

    /// An entry index did not refer to an existing entry.
    #[error("Index {index} out of range for deck of {len} cards")]
    IndexOutOfRange { index: usize, len: usize },

    /// The deck already holds the maximum number of non-commander cards.
    #[error("Deck is full ({limit} cards)")]
    DeckFull { limit: usize },

    /// The card's color identity is not contained in the deck's.
    ///
    /// Only raised under [`ColorIdentityPolicy::Enforced`].
    ///
    /// [`ColorIdentityPolicy::Enforced`]: crate::deck::ColorIdentityPolicy
    #[error("Card outside the deck's color identity: {name}")]
    OutsideColorIdentity { name: String },
}
