//! Balance question product.

use serde::{Deserialize, Serialize};

use super::QuestionKind;

/// A forced-choice question with exactly two short options.
///
/// `options` always holds exactly two strings - possibly empty, never
/// missing. Downstream UI renders them as the two halves of the choice and
/// assumes the question text respects its 50-character ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceQuestion {
    #[serde(rename = "type")]
    pub kind: QuestionKind,

    pub topic: String,
    pub category: String,
    pub context_variant: String,

    /// Compressed question text, at most 50 characters, ending in `?` or `!`.
    pub question: String,

    pub options: [String; 2],

    /// 1-5, taken from the order code's `L<n>` marker.
    pub intimacy_level: u8,

    /// The order code the record was composed from.
    pub source_order_code: String,
}
