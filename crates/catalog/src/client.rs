//! HTTP client for the card catalog API.
//!
//! Wraps the catalog's REST endpoints (search, autocomplete, fetch by
//! id) using [`reqwest`]. Every request is preceded by a fixed pacing
//! delay as a politeness measure toward the public API; the interval is
//! configurable and zero disables it.

use std::time::Duration;

use async_trait::async_trait;
use decksmith_core::card::CatalogCard;

use crate::messages::{AutocompletePage, SearchPage};
use crate::query;

/// Queries shorter than this return no completions, without a network
/// call.
pub const MIN_AUTOCOMPLETE_LEN: usize = 2;

/// Default pacing delay between catalog calls.
pub const DEFAULT_PACE: Duration = Duration::from_millis(100);

/// Default catalog API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.scryfall.com";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from the catalog client.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx, non-404 status code.
    #[error("Catalog unavailable ({status}): {body}")]
    Unavailable {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The catalog has no record matching the request.
    ///
    /// Search and autocomplete translate this into empty results before
    /// it reaches callers; only [`CardCatalog::fetch_by_id`] propagates
    /// it.
    #[error("Not found in catalog")]
    NotFound,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tunable parameters for a [`CatalogClient`].
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base HTTP URL of the catalog API.
    pub base_url: String,
    /// Fixed delay before each request. Zero disables pacing.
    pub pace: Duration,
    /// Optional whole-request timeout. `None` leaves requests unbounded,
    /// matching the catalog contract; operators wanting bounded calls
    /// set this.
    pub timeout: Option<Duration>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pace: DEFAULT_PACE,
            timeout: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// The catalog operations the deck-assembly core consumes.
///
/// Implemented by [`CatalogClient`] for the real API and by stubs in
/// tests. The provided methods attach the standard Commander filters to
/// a free-text query.
#[async_trait]
pub trait CardCatalog: Send + Sync {
    /// Search for cards. An exhausted query is an empty page, not an
    /// error.
    async fn search(&self, query: &str) -> Result<SearchPage, CatalogError>;

    /// Complete a partial card name. Queries shorter than
    /// [`MIN_AUTOCOMPLETE_LEN`] yield no completions without a network
    /// call.
    async fn autocomplete(&self, query: &str) -> Result<Vec<String>, CatalogError>;

    /// Fetch a single card by catalog id.
    async fn fetch_by_id(&self, id: &str) -> Result<CatalogCard, CatalogError>;

    /// Free-text search restricted to Commander-legal cards.
    async fn search_commander_cards(&self, query: &str) -> Result<SearchPage, CatalogError> {
        self.search(&query::legal_in_commander(query)).await
    }

    /// Free-text search restricted to commander-eligible cards.
    async fn search_commanders(&self, query: &str) -> Result<SearchPage, CatalogError> {
        self.search(&query::commander_eligible(query)).await
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for a card catalog instance.
///
/// An explicit instance with constructor-supplied configuration; there
/// is no module-level state. Share it across the pipeline and session
/// as `Arc<dyn CardCatalog>`.
pub struct CatalogClient {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Build a client from configuration.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fixed delay before each request, politeness toward the shared API.
    async fn pace(&self) {
        if !self.config.pace.is_zero() {
            tokio::time::sleep(self.config.pace).await;
        }
    }

    async fn get_search_page(&self, search_query: &str) -> Result<SearchPage, CatalogError> {
        self.pace().await;
        tracing::debug!(query = %search_query, "Catalog search");

        let response = self
            .client
            .get(format!("{}/cards/search", self.config.base_url))
            .query(&[("q", search_query)])
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<SearchPage>().await?)
    }

    /// Map a 404 to [`CatalogError::NotFound`] and any other non-2xx
    /// status to [`CatalogError::Unavailable`]. Returns the response
    /// unchanged on success.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogError> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CatalogError::Unavailable {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl CardCatalog for CatalogClient {
    async fn search(&self, query: &str) -> Result<SearchPage, CatalogError> {
        match self.get_search_page(query).await {
            // "Nothing matched" is an empty page, not an error.
            Err(CatalogError::NotFound) => Ok(SearchPage::empty()),
            other => other,
        }
    }

    async fn autocomplete(&self, query: &str) -> Result<Vec<String>, CatalogError> {
        if query.chars().count() < MIN_AUTOCOMPLETE_LEN {
            return Ok(Vec::new());
        }

        self.pace().await;
        tracing::debug!(query = %query, "Catalog autocomplete");

        let response = self
            .client
            .get(format!("{}/cards/autocomplete", self.config.base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        match Self::ensure_success(response).await {
            Ok(response) => Ok(response.json::<AutocompletePage>().await?.data),
            Err(CatalogError::NotFound) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn fetch_by_id(&self, id: &str) -> Result<CatalogCard, CatalogError> {
        self.pace().await;
        tracing::debug!(card_id = %id, "Catalog fetch by id");

        let response = self
            .client
            .get(format!("{}/cards/{id}", self.config.base_url))
            .send()
            .await?;

        // 404 propagates here: a missing id is an error for this endpoint.
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<CatalogCard>().await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
