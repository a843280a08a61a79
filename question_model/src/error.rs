//! Error types for building model values from untrusted data.

use thiserror::Error;

/// Errors raised at the typed-conversion boundary.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A JSON value did not match the expected record shape.
    #[error("invalid enrichment record: {0}")]
    InvalidRecord(#[from] serde_json::Error),

    /// A TOML rule-set document did not match the expected shape.
    #[error("invalid rule set: {0}")]
    InvalidRuleSet(#[from] toml::de::Error),
}
