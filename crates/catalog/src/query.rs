//! Builders for the catalog's search query grammar.
//!
//! User text is passed through verbatim; these helpers only attach the
//! filter syntax the catalog understands. The resulting string goes into
//! the `q` parameter as-is (HTTP encoding is the transport's job).

/// Exact-name lookup: `!"Sol Ring"`.
pub fn exact_name(name: &str) -> String {
    format!("!\"{name}\"")
}

/// Restrict a free-text query to Commander-legal cards.
pub fn legal_in_commander(query: &str) -> String {
    format!("{query} legal:commander")
}

/// Restrict a free-text query to commander-eligible, Commander-legal cards.
pub fn commander_eligible(query: &str) -> String {
    format!("is:commander legal:commander {query}")
}
