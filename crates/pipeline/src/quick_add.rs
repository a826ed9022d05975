//! Debounced, race-safe quick-add suggestion pipeline.
//!
//! Phases: `Idle → Debouncing → Resolving → Displaying → (Idle on
//! select/escape/empty)`. Every keystroke restarts a single-shot
//! debounce timer; when it fires, the cycle autocompletes the query,
//! resolves each candidate concurrently, and publishes the suggestion
//! list for keyboard selection.
//!
//! Race safety: each cycle is stamped with a monotonically increasing
//! sequence number and carries its own [`CancellationToken`]. A newer
//! keystroke cancels the in-flight cycle and bumps the sequence, and a
//! cycle re-verifies it is still current immediately before every
//! publish, so late results from a superseded query are discarded, never
//! merged or shown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use decksmith_catalog::{query, CardCatalog};
use decksmith_core::card::CatalogCard;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::suggest::{resolve_candidates, Suggestion, MAX_SUGGESTIONS};

// ---------------------------------------------------------------------------
// Constants & configuration
// ---------------------------------------------------------------------------

/// Input must stay quiet this long before a query cycle starts.
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this clear the suggestion list instead of
/// starting a cycle.
pub const MIN_QUERY_LEN: usize = 2;

/// Tunable parameters for a [`QuickAdd`] pipeline.
#[derive(Debug, Clone)]
pub struct QuickAddConfig {
    /// Debounce interval between the last keystroke and the cycle start.
    pub debounce: Duration,
    /// Minimum query length that triggers a cycle.
    pub min_query_len: usize,
    /// Client-side cap on candidates resolved per cycle.
    pub max_suggestions: usize,
}

impl Default for QuickAddConfig {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE,
            min_query_len: MIN_QUERY_LEN,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }
}

// ---------------------------------------------------------------------------
// Observable state
// ---------------------------------------------------------------------------

/// Where the pipeline currently is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing pending, no suggestions shown.
    Idle,
    /// A keystroke armed the debounce timer.
    Debouncing,
    /// Autocomplete and per-candidate resolution in flight.
    Resolving,
    /// A non-empty suggestion list is shown.
    Displaying,
}

/// Keyboard input the suggestion list reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Result of feeding a key to the pipeline.
#[derive(Debug, Clone)]
pub enum KeyOutcome {
    /// Nothing to act on (empty suggestion list, or a no-op key).
    Ignored,
    /// The selection cursor moved (`None` means no selection).
    CursorMoved(Option<usize>),
    /// Escape dismissed the suggestion list; query text is untouched.
    Dismissed,
    /// A suggestion resolved to a card and the pipeline reset to Idle.
    /// The embedder should hand the card to the deck and refocus the
    /// input.
    Committed(Arc<CatalogCard>),
    /// The chosen suggestion could not be resolved to a card; the list
    /// is left as it was.
    NotCommitted,
}

struct PipelineState {
    phase: Phase,
    query: String,
    suggestions: Vec<Suggestion>,
    /// Selected row, `None` when no row is highlighted.
    cursor: Option<usize>,
}

// ---------------------------------------------------------------------------
// QuickAdd
// ---------------------------------------------------------------------------

/// The quick-add pipeline for one input field.
///
/// Cheap to clone (all state behind an `Arc`); mutation happens through
/// `&self`, with interior locking for the observable state only.
/// Catalog I/O never runs under a lock.
#[derive(Clone)]
pub struct QuickAdd {
    inner: Arc<Inner>,
}

struct Inner {
    catalog: Arc<dyn CardCatalog>,
    config: QuickAddConfig,
    state: RwLock<PipelineState>,
    /// Stamp of the newest keystroke; cycles verify it before publishing.
    seq: AtomicU64,
    /// Token of the in-flight cycle, replaced (and cancelled) per keystroke.
    cancel: Mutex<CancellationToken>,
}

impl QuickAdd {
    pub fn new(catalog: Arc<dyn CardCatalog>, config: QuickAddConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                catalog,
                config,
                state: RwLock::new(PipelineState {
                    phase: Phase::Idle,
                    query: String::new(),
                    suggestions: Vec::new(),
                    cursor: None,
                }),
                seq: AtomicU64::new(0),
                cancel: Mutex::new(CancellationToken::new()),
            }),
        }
    }

    // -- observation --------------------------------------------------------

    pub async fn phase(&self) -> Phase {
        self.inner.state.read().await.phase
    }

    pub async fn query(&self) -> String {
        self.inner.state.read().await.query.clone()
    }

    pub async fn suggestions(&self) -> Vec<Suggestion> {
        self.inner.state.read().await.suggestions.clone()
    }

    pub async fn cursor(&self) -> Option<usize> {
        self.inner.state.read().await.cursor
    }

    // -- input --------------------------------------------------------------

    /// Feed the input field's new contents into the pipeline.
    ///
    /// Invalidates any in-flight cycle (last keystroke wins). Queries
    /// below the minimum length clear the suggestion list and return the
    /// pipeline to Idle; otherwise a new debounced cycle is armed.
    pub async fn on_input(&self, text: &str) {
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let token = self.inner.replace_cancel_token().await;

        let mut state = self.inner.state.write().await;
        state.query = text.to_string();

        if text.chars().count() < self.inner.config.min_query_len {
            state.suggestions.clear();
            state.cursor = None;
            state.phase = Phase::Idle;
            return;
        }

        state.phase = Phase::Debouncing;
        drop(state);

        let inner = Arc::clone(&self.inner);
        let query = text.to_string();
        tokio::spawn(async move {
            inner.run_cycle(query, seq, token).await;
        });
    }

    // -- keyboard -----------------------------------------------------------

    /// React to a key press on the input field.
    ///
    /// All keys are no-ops while the suggestion list is empty. Cursor
    /// movement clamps at the last row and clears at the top; Enter
    /// commits the highlighted suggestion (or the first one when nothing
    /// is highlighted); Escape dismisses the list without touching the
    /// query text.
    pub async fn on_key(&self, key: Key) -> KeyOutcome {
        match key {
            Key::ArrowDown => {
                let mut state = self.inner.state.write().await;
                if state.suggestions.is_empty() {
                    return KeyOutcome::Ignored;
                }
                let last = state.suggestions.len() - 1;
                state.cursor = Some(match state.cursor {
                    Some(i) if i >= last => last,
                    Some(i) => i + 1,
                    None => 0,
                });
                KeyOutcome::CursorMoved(state.cursor)
            }
            Key::ArrowUp => {
                let mut state = self.inner.state.write().await;
                if state.suggestions.is_empty() {
                    return KeyOutcome::Ignored;
                }
                state.cursor = match state.cursor {
                    Some(i) if i > 0 => Some(i - 1),
                    _ => None,
                };
                KeyOutcome::CursorMoved(state.cursor)
            }
            Key::Escape => {
                let mut state = self.inner.state.write().await;
                if state.suggestions.is_empty() {
                    return KeyOutcome::Ignored;
                }
                state.suggestions.clear();
                state.cursor = None;
                state.phase = Phase::Idle;
                KeyOutcome::Dismissed
            }
            Key::Enter => {
                let index = {
                    let state = self.inner.state.read().await;
                    if state.suggestions.is_empty() {
                        return KeyOutcome::Ignored;
                    }
                    state.cursor.unwrap_or(0)
                };
                self.commit(index).await
            }
        }
    }

    /// Commit the suggestion at `index` (Enter, or a row click).
    ///
    /// A suggestion that already carries a resolved card commits
    /// immediately. An unresolved one triggers one more exact-name
    /// search; if that fails or matches nothing, the call returns
    /// [`KeyOutcome::NotCommitted`] and the list stays as it was; the
    /// interaction always resolves, there is no lingering busy state.
    pub async fn commit(&self, index: usize) -> KeyOutcome {
        let seq = self.inner.seq.load(Ordering::SeqCst);
        let suggestion = {
            let state = self.inner.state.read().await;
            match state.suggestions.get(index) {
                Some(s) => s.clone(),
                None => return KeyOutcome::Ignored,
            }
        };

        let card = match suggestion.card {
            Some(card) => card,
            // Fallback: the suggestion never resolved, fetch it now.
            None => {
                match self
                    .inner
                    .catalog
                    .search(&query::exact_name(&suggestion.name))
                    .await
                {
                    Ok(page) => match page.data.into_iter().next() {
                        Some(card) => Arc::new(card),
                        None => return KeyOutcome::NotCommitted,
                    },
                    Err(e) => {
                        tracing::warn!(
                            card_name = %suggestion.name,
                            error = %e,
                            "Commit-time resolution failed",
                        );
                        return KeyOutcome::NotCommitted;
                    }
                }
            }
        };

        let mut state = self.inner.state.write().await;
        // Only reset the field if no newer keystroke arrived while the
        // fallback search was in flight.
        if self.inner.seq.load(Ordering::SeqCst) == seq {
            state.query.clear();
            state.suggestions.clear();
            state.cursor = None;
            state.phase = Phase::Idle;
        }
        tracing::info!(card = %card.name, "Quick-add commit");
        KeyOutcome::Committed(card)
    }
}

// ---------------------------------------------------------------------------
// Cycle internals
// ---------------------------------------------------------------------------

impl Inner {
    /// Install a fresh cancellation token, cancelling the previous one.
    async fn replace_cancel_token(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let mut guard = self.cancel.lock().await;
        let previous = std::mem::replace(&mut *guard, token.clone());
        previous.cancel();
        token
    }

    /// One debounce-autocomplete-resolve cycle.
    async fn run_cycle(self: Arc<Self>, query: String, seq: u64, cancel: CancellationToken) {
        tokio::select! {
            _ = cancel.cancelled() => return,
            _ = tokio::time::sleep(self.config.debounce) => {}
        }

        if !self.publish_phase(seq, &cancel, Phase::Resolving).await {
            return;
        }

        let names = match self.catalog.autocomplete(&query).await {
            Ok(names) => names,
            Err(e) => {
                // Degrade to an empty list; autocomplete problems are
                // never surfaced as errors.
                tracing::warn!(query = %query, error = %e, "Autocomplete failed");
                Vec::new()
            }
        };

        if self.is_stale(seq, &cancel) {
            tracing::debug!(seq, query = %query, "Discarding stale autocomplete");
            return;
        }

        let capped: Vec<String> = names
            .into_iter()
            .take(self.max_suggestions())
            .collect();
        let suggestions = resolve_candidates(self.catalog.as_ref(), &capped).await;

        self.publish_suggestions(seq, &cancel, suggestions).await;
    }

    fn max_suggestions(&self) -> usize {
        self.config.max_suggestions
    }

    fn is_stale(&self, seq: u64, cancel: &CancellationToken) -> bool {
        cancel.is_cancelled() || self.seq.load(Ordering::SeqCst) != seq
    }

    /// Move to `phase` if this cycle is still current. Returns whether
    /// the transition was published.
    async fn publish_phase(&self, seq: u64, cancel: &CancellationToken, phase: Phase) -> bool {
        let mut state = self.state.write().await;
        if self.is_stale(seq, cancel) {
            return false;
        }
        state.phase = phase;
        true
    }

    /// Publish the cycle's suggestion list, unless superseded.
    ///
    /// An empty list returns the pipeline to Idle; a non-empty one shows
    /// with the cursor cleared.
    async fn publish_suggestions(
        &self,
        seq: u64,
        cancel: &CancellationToken,
        suggestions: Vec<Suggestion>,
    ) {
        let mut state = self.state.write().await;
        if self.is_stale(seq, cancel) {
            tracing::debug!(seq, "Discarding stale suggestions");
            return;
        }
        state.cursor = None;
        state.phase = if suggestions.is_empty() {
            Phase::Idle
        } else {
            Phase::Displaying
        };
        state.suggestions = suggestions;
    }
}
