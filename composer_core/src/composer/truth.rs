//! Truth question composition.

use std::collections::HashSet;

use question_model::{intimacy_level, EnrichmentInput, EnrichmentQuestion, TruthQuestion};

use crate::compressor::TextCompressor;

/// Maximum number of expected answers per truth question.
pub const MAX_EXPECTED_ANSWERS: usize = 4;

/// Composes open truth questions from enrichment records.
///
/// Fully deterministic: the same input always yields the same output.
#[derive(Debug, Clone)]
pub struct TruthComposer {
    question: TextCompressor,
    answer: TextCompressor,
}

impl TruthComposer {
    /// Create a composer with the canonical rule tables.
    pub fn new() -> Self {
        Self {
            question: TextCompressor::truth_question(),
            answer: TextCompressor::truth_answer(),
        }
    }

    /// Create a composer with specific compressors.
    pub fn with_compressors(question: TextCompressor, answer: TextCompressor) -> Self {
        Self { question, answer }
    }

    /// Compose one truth question per input question.
    pub fn compose(&self, input: &EnrichmentInput) -> Vec<TruthQuestion> {
        let intimacy = intimacy_level(&input.order_code_prefix);

        input
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| TruthQuestion {
                id: format!("T-{}-{}", input.order_code_prefix, index + 1),
                intimacy_level: intimacy,
                question: self.question.compress(&question.base_content),
                expected_answers: self.expected_answers(question),
            })
            .collect()
    }

    /// Build the expected-answer list for one question.
    ///
    /// Tension phrases come first ("vs" pairs in left-right order), then
    /// conversation-friendly terms; everything is compressed, deduplicated
    /// preserving first occurrence, stripped of empties, and capped at
    /// [`MAX_EXPECTED_ANSWERS`]. The ordering is a published contract.
    fn expected_answers(&self, question: &EnrichmentQuestion) -> Vec<String> {
        let materials = &question.enrichment_materials;
        let mut working = Vec::new();

        for tension in materials.tensions() {
            if tension.contains("vs") {
                let mut sides = tension.split("vs");
                let left = sides.next().unwrap_or("").trim();
                let right = sides.next().unwrap_or("").trim();
                if !left.is_empty() {
                    working.push(self.answer.compress(left));
                }
                if !right.is_empty() {
                    working.push(self.answer.compress(right));
                }
            } else {
                working.push(self.answer.compress(tension));
            }
        }

        for term in materials.friendly_terms() {
            working.push(self.answer.compress(term));
        }

        let mut seen = HashSet::new();
        working
            .into_iter()
            .filter(|answer| !answer.is_empty() && seen.insert(answer.clone()))
            .take(MAX_EXPECTED_ANSWERS)
            .collect()
    }
}

impl Default for TruthComposer {
    fn default() -> Self {
        Self::new()
    }
}
