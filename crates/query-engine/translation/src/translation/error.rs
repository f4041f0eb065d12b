//! Errors for spec normalization and query translation.
//!
//! These are all configuration errors: they are raised before any SQL is
//! built or sent, and they are fatal to the operation that triggered them.

/// A type for configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("query spec must be an object")]
    SpecNotAnObject,
    #[error("query spec requires a 'table' key")]
    MissingTable,
    #[error("join was given without the 'table' key")]
    JoinMissingTable,
    #[error("join was given without the 'on' key")]
    JoinMissingOn,
    #[error("unknown equality operator '{0}'")]
    UnknownEqualityOperator(String),
    #[error("a column group's 'equalityOperator' must be a string")]
    GroupOperatorNotAString,
    #[error("itemsPerPage must be -1 or at least 1, got {0}")]
    InvalidItemsPerPage(i64),
    #[error("malformed query spec: {0}")]
    Malformed(#[from] serde_json::Error),
}
