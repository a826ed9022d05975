//! Async client for the card catalog HTTP API.
//!
//! [`CatalogClient`] is an explicit, constructor-configured instance:
//! base URL, pacing interval, and optional request timeout all come from
//! [`CatalogConfig`]. It is consumed through the [`CardCatalog`] trait so
//! the suggestion pipeline and tests can substitute stubs.

pub mod client;
pub mod messages;
pub mod query;

pub use client::{CardCatalog, CatalogClient, CatalogConfig, CatalogError};
pub use messages::SearchPage;
