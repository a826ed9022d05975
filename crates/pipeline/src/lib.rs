//! Quick-add suggestion pipeline and the deck editing session.
//!
//! The pipeline turns keystrokes into a race-safe suggestion list:
//! debounce, autocomplete, concurrent per-candidate legality resolution,
//! keyboard-driven selection, commit. [`session::DeckSession`] wires the
//! pipeline and a [`decksmith_core::deck::Deck`] together behind a
//! single editing actor.

pub mod quick_add;
pub mod session;
pub mod suggest;

pub use quick_add::{Key, KeyOutcome, Phase, QuickAdd, QuickAddConfig};
pub use session::{DeckSession, SessionEvent};
pub use suggest::{Suggestion, MAX_SUGGESTIONS};
