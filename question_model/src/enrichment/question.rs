//! Per-context question records.

use serde::{Deserialize, Serialize};

use super::EnrichmentMaterial;

/// A single base question with its situational framing and raw materials.
///
/// Only ever appears nested inside an [`super::EnrichmentInput`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentQuestion {
    /// Label of the situational framing ("Default", "trip", ...).
    pub context_variant: String,

    /// The raw natural-language question sentence.
    pub base_content: String,

    /// Free-text phrase lists mined for options and answers.
    pub enrichment_materials: EnrichmentMaterial,
}

impl EnrichmentQuestion {
    /// Create a question with empty materials.
    pub fn new(context_variant: impl Into<String>, base_content: impl Into<String>) -> Self {
        Self {
            context_variant: context_variant.into(),
            base_content: base_content.into(),
            enrichment_materials: EnrichmentMaterial::default(),
        }
    }

    /// Attach enrichment materials.
    pub fn with_materials(mut self, materials: EnrichmentMaterial) -> Self {
        self.enrichment_materials = materials;
        self
    }
}
