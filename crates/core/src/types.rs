/// Catalog-assigned card identifiers are opaque strings.
pub type CardId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
