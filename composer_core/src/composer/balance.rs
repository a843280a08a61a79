//! Balance question composition.

use rand::Rng;

use question_model::{
    intimacy_level, BalanceQuestion, EnrichmentInput, EnrichmentQuestion, QuestionKind,
};

use crate::compressor::TextCompressor;

/// Raw option pair used when a question carries no usable tension phrases.
pub const FALLBACK_OPTION_PAIR: (&str, &str) = ("조용히 보내기", "활동적으로 보내기");

/// Composes forced-choice balance questions from enrichment records.
#[derive(Debug, Clone)]
pub struct BalanceComposer {
    question: TextCompressor,
    option: TextCompressor,
}

impl BalanceComposer {
    /// Create a composer with the canonical rule tables.
    pub fn new() -> Self {
        Self {
            question: TextCompressor::balance_question(),
            option: TextCompressor::balance_option(),
        }
    }

    /// Create a composer with specific compressors.
    pub fn with_compressors(question: TextCompressor, option: TextCompressor) -> Self {
        Self { question, option }
    }

    /// Compose one balance question per input question.
    ///
    /// The only randomness is the tension-phrase pick; everything else is a
    /// pure function of the input.
    pub fn compose<R: Rng>(&self, input: &EnrichmentInput, rng: &mut R) -> Vec<BalanceQuestion> {
        let intimacy = intimacy_level(&input.order_code_prefix);

        let mut composed = Vec::with_capacity(input.questions.len());
        for question in &input.questions {
            composed.push(BalanceQuestion {
                kind: QuestionKind::Balance,
                topic: input.topic.clone(),
                category: input.category.clone(),
                context_variant: question.context_variant.clone(),
                question: self.question.compress(&question.base_content),
                options: self.compose_options(question, rng),
                intimacy_level: intimacy,
                source_order_code: input.order_code_prefix.clone(),
            });
        }
        composed
    }

    /// Derive the two options for one question.
    ///
    /// One tension phrase is picked uniformly at random and split on "vs"
    /// (or, failing that, on a comma); the first two parts become the raw
    /// options. A phrase with no natural split synthesizes a "chose it" /
    /// "chose the opposite" pair. A question with no tensions at all gets
    /// the fixed fallback pair and consumes no randomness.
    fn compose_options<R: Rng>(&self, question: &EnrichmentQuestion, rng: &mut R) -> [String; 2] {
        let tensions = question.enrichment_materials.tensions();

        let (raw_a, raw_b) = if tensions.is_empty() {
            (
                FALLBACK_OPTION_PAIR.0.to_string(),
                FALLBACK_OPTION_PAIR.1.to_string(),
            )
        } else {
            let picked = tensions[rng.gen_range(0..tensions.len())];
            self.split_tension(picked, question)
        };

        [self.option.compress(&raw_a), self.option.compress(&raw_b)]
    }

    /// Split one tension phrase into a raw option pair.
    fn split_tension(&self, picked: &str, question: &EnrichmentQuestion) -> (String, String) {
        let parts: Vec<&str> = if picked.contains("vs") {
            picked.split("vs").collect()
        } else if picked.contains(',') {
            picked.split(',').collect()
        } else {
            Vec::new()
        };

        if parts.len() >= 2 {
            (
                self.expand_option(parts[0].trim(), question),
                self.expand_option(parts[1].trim(), question),
            )
        } else {
            (
                format!("{} 쪽을 선택", picked),
                format!("{} 반대 선택", picked),
            )
        }
    }

    /// Expansion hook for raw option text; currently a pass-through.
    fn expand_option(&self, option: &str, _question: &EnrichmentQuestion) -> String {
        // TODO: fold trending keywords into the raw option text for livelier phrasing.
        option.to_string()
    }
}

impl Default for BalanceComposer {
    fn default() -> Self {
        Self::new()
    }
}
