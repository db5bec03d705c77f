use thiserror::Error;

/// Why a recipe write was rejected.
///
/// Completeness is checked before the taxonomy, and validation stops at the
/// first failure, so a rejection always carries exactly one reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    Incomplete(&'static str),

    #[error("Invalid category or subcategory: {category} / {subcategory}")]
    InvalidCategory {
        category: String,
        subcategory: String,
    },
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode list: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Stored list is not a JSON array of strings: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sort policy: {0} (expected ranked, category or newest)")]
pub struct UnknownSortPolicy(pub String);
