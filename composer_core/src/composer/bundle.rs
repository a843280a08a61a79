//! Final output bundle assembly.
//!
//! The upstream pipeline hands over one enrichment record per source item and
//! expects, per question, the balance and truth products side by side with
//! provenance. Assembly leans on the composers' index alignment: question `i`
//! produces balance `i` and truth `i`, so the two lists zip cleanly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use question_model::{BalanceQuestion, Category, EnrichmentInput, TruthQuestion};

use super::{BalanceComposer, TruthComposer};

/// Provenance carried on every assembled bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleMeta {
    /// Topic exactly as it appeared on the input record.
    pub raw_topic: String,

    /// Category re-derived from the order code, not the input's claim.
    pub derived_category: Category,

    pub order_code: String,
    pub context_variant: String,
}

/// One question's full output: provenance plus both products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBundle {
    pub meta: BundleMeta,
    pub balance: BalanceQuestion,
    pub truth: TruthQuestion,
}

/// Pairs composer outputs into per-question bundles.
#[derive(Debug, Clone)]
pub struct BundleAssembler {
    balance: BalanceComposer,
    truth: TruthComposer,
}

impl BundleAssembler {
    /// Create an assembler with the canonical composers.
    pub fn new() -> Self {
        Self {
            balance: BalanceComposer::new(),
            truth: TruthComposer::new(),
        }
    }

    /// Create an assembler from specific composers.
    pub fn with_composers(balance: BalanceComposer, truth: TruthComposer) -> Self {
        Self { balance, truth }
    }

    /// Compose and pair all products for one input record.
    ///
    /// The category every product carries is re-derived from the order code;
    /// the input's own category field is advisory upstream data.
    pub fn assemble<R: Rng>(&self, input: &EnrichmentInput, rng: &mut R) -> Vec<QuestionBundle> {
        let derived = Category::from_order_code(&input.order_code_prefix);

        let mut effective = input.clone();
        effective.category = derived.as_str().to_string();

        let balance = self.balance.compose(&effective, rng);
        let truth = self.truth.compose(&effective);

        balance
            .into_iter()
            .zip(truth)
            .zip(&effective.questions)
            .map(|((balance, truth), question)| QuestionBundle {
                meta: BundleMeta {
                    raw_topic: input.topic.clone(),
                    derived_category: derived,
                    order_code: input.order_code_prefix.clone(),
                    context_variant: question.context_variant.clone(),
                },
                balance,
                truth,
            })
            .collect()
    }
}

impl Default for BundleAssembler {
    fn default() -> Self {
        Self::new()
    }
}
