//! Shared stub catalog for pipeline integration tests.

// Each test binary compiles its own copy; not all of them use every helper.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use decksmith_catalog::{query, CardCatalog, CatalogError, SearchPage};
use decksmith_core::card::CatalogCard;

/// In-memory catalog with scriptable completions, delays, and failures.
///
/// Failure and delay injection are keyed by the raw query string, so a
/// test can target one candidate's exact-name search without touching
/// the rest of the batch.
#[derive(Default)]
pub struct StubCatalog {
    /// Cards by exact name.
    cards: HashMap<String, CatalogCard>,
    /// Autocomplete results by query.
    completions: HashMap<String, Vec<String>>,
    /// Search results (names) by full non-exact query.
    results: HashMap<String, Vec<String>>,
    /// Raw queries whose search call errors out.
    fail_queries: Mutex<HashSet<String>>,
    /// Raw queries whose search call sleeps first.
    delays: HashMap<String, Duration>,
    fail_autocomplete: bool,
    /// Every query `search` has seen, in call order.
    search_log: Mutex<Vec<String>>,
}

impl StubCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_card(&mut self, card: CatalogCard) {
        self.cards.insert(card.name.clone(), card);
    }

    pub fn complete(&mut self, q: &str, names: &[&str]) {
        self.completions
            .insert(q.to_string(), names.iter().map(|n| n.to_string()).collect());
    }

    /// Script the result names for a full (non-exact) search query.
    pub fn result_for(&mut self, q: &str, names: &[&str]) {
        self.results
            .insert(q.to_string(), names.iter().map(|n| n.to_string()).collect());
    }

    pub fn fail_query(&self, q: &str) {
        self.fail_queries
            .lock()
            .expect("lock poisoned")
            .insert(q.to_string());
    }

    pub fn fail_exact(&self, name: &str) {
        self.fail_query(&query::exact_name(name));
    }

    pub fn clear_failures(&self) {
        self.fail_queries.lock().expect("lock poisoned").clear();
    }

    pub fn delay_exact(&mut self, name: &str, delay: Duration) {
        self.delays.insert(query::exact_name(name), delay);
    }

    pub fn fail_autocomplete(&mut self) {
        self.fail_autocomplete = true;
    }

    /// Number of `search` calls made with exactly this query.
    pub fn search_count(&self, q: &str) -> usize {
        self.search_log
            .lock()
            .expect("lock poisoned")
            .iter()
            .filter(|logged| logged.as_str() == q)
            .count()
    }

    pub fn searches(&self) -> Vec<String> {
        self.search_log.lock().expect("lock poisoned").clone()
    }

    fn page_for(&self, names: &[String]) -> SearchPage {
        let data: Vec<CatalogCard> = names
            .iter()
            .filter_map(|name| self.cards.get(name).cloned())
            .collect();
        SearchPage {
            total_cards: data.len() as u64,
            has_more: false,
            data,
        }
    }
}

#[async_trait]
impl CardCatalog for StubCatalog {
    async fn search(&self, q: &str) -> Result<SearchPage, CatalogError> {
        self.search_log
            .lock()
            .expect("lock poisoned")
            .push(q.to_string());

        if let Some(delay) = self.delays.get(q) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail_queries.lock().expect("lock poisoned").contains(q) {
            return Err(CatalogError::Unavailable {
                status: 503,
                body: "stub outage".to_string(),
            });
        }

        // Exact-name lookups resolve straight from the card set.
        if let Some(name) = q.strip_prefix("!\"").and_then(|rest| rest.strip_suffix('"')) {
            return Ok(self.page_for(&[name.to_string()]));
        }

        Ok(self
            .results
            .get(q)
            .map(|names| self.page_for(names))
            .unwrap_or_else(SearchPage::empty))
    }

    async fn autocomplete(&self, q: &str) -> Result<Vec<String>, CatalogError> {
        if self.fail_autocomplete {
            return Err(CatalogError::Unavailable {
                status: 503,
                body: "stub outage".to_string(),
            });
        }
        if q.chars().count() < 2 {
            return Ok(Vec::new());
        }
        Ok(self.completions.get(q).cloned().unwrap_or_default())
    }

    async fn fetch_by_id(&self, id: &str) -> Result<CatalogCard, CatalogError> {
        self.cards
            .values()
            .find(|card| card.id == id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }
}

/// A Commander-legal card with the given cost and identity.
pub fn legal_card(id: &str, name: &str, type_line: &str, cmc: f64, identity: &[&str]) -> CatalogCard {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "type_line": type_line,
        "cmc": cmc,
        "color_identity": identity,
        "legalities": { "commander": "legal" },
    }))
    .expect("stub card should deserialize")
}

/// A card the catalog reports as banned in Commander.
pub fn banned_card(id: &str, name: &str) -> CatalogCard {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "type_line": "Sorcery",
        "legalities": { "commander": "banned" },
    }))
    .expect("stub card should deserialize")
}
