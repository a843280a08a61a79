//! Enrichment material phrase lists.

use serde::{Deserialize, Serialize};

/// Four free-text fields, each a "|"-delimited list of short phrases.
///
/// Fields may be empty strings; consumers read them through the list
/// accessors, which split on `|`, trim, and drop blank entries. The long
/// `enrichment_`-prefixed spellings used by older generation prompts are
/// accepted on input but never emitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrichmentMaterial {
    #[serde(default, alias = "enrichment_community_contexts")]
    pub community_contexts: String,

    #[serde(default, alias = "enrichment_trending_keywords")]
    pub trending_keywords: String,

    #[serde(default, alias = "enrichment_psychological_tensions")]
    pub psychological_tensions: String,

    #[serde(default, alias = "enrichment_conversation_friendly_terms")]
    pub conversation_friendly_terms: String,
}

impl EnrichmentMaterial {
    /// Create an empty material set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the psychological tension phrases.
    pub fn with_tensions(mut self, tensions: impl Into<String>) -> Self {
        self.psychological_tensions = tensions.into();
        self
    }

    /// Set the conversation-friendly terms.
    pub fn with_friendly_terms(mut self, terms: impl Into<String>) -> Self {
        self.conversation_friendly_terms = terms.into();
        self
    }

    /// Set the community context phrases.
    pub fn with_contexts(mut self, contexts: impl Into<String>) -> Self {
        self.community_contexts = contexts.into();
        self
    }

    /// Set the trending keyword phrases.
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.trending_keywords = keywords.into();
        self
    }

    /// Psychological tension phrases as a cleaned list.
    pub fn tensions(&self) -> Vec<&str> {
        split_phrases(&self.psychological_tensions)
    }

    /// Conversation-friendly terms as a cleaned list.
    pub fn friendly_terms(&self) -> Vec<&str> {
        split_phrases(&self.conversation_friendly_terms)
    }

    /// Community context phrases as a cleaned list.
    pub fn contexts(&self) -> Vec<&str> {
        split_phrases(&self.community_contexts)
    }

    /// Trending keyword phrases as a cleaned list.
    pub fn keywords(&self) -> Vec<&str> {
        split_phrases(&self.trending_keywords)
    }
}

/// Split a "|"-delimited phrase field, trimming and dropping blank entries.
pub fn split_phrases(raw: &str) -> Vec<&str> {
    raw.split('|')
        .map(str::trim)
        .filter(|phrase| !phrase.is_empty())
        .collect()
}
