//! Enrichment input records handed over by the upstream generation pipeline.

mod material;
mod question;

pub use material::*;
pub use question::*;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

fn default_gender_policy() -> String {
    "neutral".to_string()
}

/// One unit of work for the composers: a topic plus its enriched questions.
///
/// Constructed per request by an upstream collaborator, consumed once,
/// discarded. Composers assume the record already passed typed conversion;
/// see [`EnrichmentInput::from_value`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentInput {
    pub topic: String,

    /// Relationship category ("Family", "Friend", "Lover", "Situation").
    /// Free-form on the wire; [`crate::order_code::Category`] is the closed set.
    #[serde(default)]
    pub category: String,

    /// Short code such as "FaFsL2"; its `L<n>` substring encodes intimacy.
    #[serde(default)]
    pub order_code_prefix: String,

    #[serde(default = "default_gender_policy")]
    pub gender_policy: String,

    pub questions: Vec<EnrichmentQuestion>,
}

impl EnrichmentInput {
    /// Create an input with no questions yet.
    pub fn new(topic: impl Into<String>, order_code_prefix: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            category: String::new(),
            order_code_prefix: order_code_prefix.into(),
            gender_policy: default_gender_policy(),
            questions: Vec::new(),
        }
    }

    /// Set the relationship category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the gender policy.
    pub fn with_gender_policy(mut self, gender_policy: impl Into<String>) -> Self {
        self.gender_policy = gender_policy.into();
        self
    }

    /// Append a question.
    pub fn with_question(mut self, question: EnrichmentQuestion) -> Self {
        self.questions.push(question);
        self
    }

    /// Convert a loose JSON value into a typed input record.
    ///
    /// This is the validation boundary: anything feeding the composers must
    /// come through here (or through `Deserialize`) so shape errors surface
    /// before composition begins, not during it.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ModelError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a typed input record from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }
}
