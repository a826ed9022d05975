//! Per-candidate legality resolution for the suggestion list.
//!
//! Autocomplete returns bare names; each name is resolved to a full
//! catalog record with one exact-name search so the list can show
//! legality and notability. Resolution failures degrade to an
//! "assume legal" placeholder; one flaky candidate must never abort the
//! batch.

use std::sync::Arc;

use decksmith_catalog::{query, CardCatalog};
use decksmith_core::card::CatalogCard;
use decksmith_core::normalize::normalize;

/// Client-side cap on candidates resolved per query cycle.
pub const MAX_SUGGESTIONS: usize = 10;

/// One row of the quick-add suggestion list.
///
/// Scoped to a single query cycle: the pipeline discards the whole list
/// on the next keystroke, on selection, and on dismissal.
#[derive(Debug, Clone)]
pub struct Suggestion {
    /// Display name from autocomplete.
    pub name: String,
    /// Full record, when the exact-name search found one.
    pub card: Option<Arc<CatalogCard>>,
    /// Commander legality; `true` when resolution failed (assume legal).
    pub is_legal: bool,
    /// Catalog notability flag; `false` when unresolved.
    pub is_notable: bool,
}

impl Suggestion {
    fn resolved(name: &str, card: Arc<CatalogCard>) -> Self {
        let normalized = normalize(&card);
        Self {
            name: name.to_string(),
            is_legal: normalized.is_legal,
            is_notable: normalized.is_notable,
            card: Some(card),
        }
    }

    /// Placeholder for a candidate whose record could not be fetched.
    fn assumed_legal(name: &str) -> Self {
        Self {
            name: name.to_string(),
            card: None,
            is_legal: true,
            is_notable: false,
        }
    }
}

/// Resolve a batch of candidate names concurrently.
///
/// One exact-name search per candidate, all in flight at once and joined
/// in bulk; there is no partial or streaming result. Output order
/// matches input order.
pub async fn resolve_candidates(
    catalog: &dyn CardCatalog,
    names: &[String],
) -> Vec<Suggestion> {
    let lookups = names.iter().map(|name| resolve_one(catalog, name));
    futures::future::join_all(lookups).await
}

async fn resolve_one(catalog: &dyn CardCatalog, name: &str) -> Suggestion {
    match catalog.search(&query::exact_name(name)).await {
        Ok(page) => match page.data.into_iter().next() {
            Some(card) => Suggestion::resolved(name, Arc::new(card)),
            None => Suggestion::assumed_legal(name),
        },
        Err(e) => {
            tracing::warn!(
                card_name = %name,
                error = %e,
                "Legality resolution failed, assuming legal",
            );
            Suggestion::assumed_legal(name)
        }
    }
}
