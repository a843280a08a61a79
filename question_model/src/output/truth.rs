//! Truth question product.

use serde::{Deserialize, Serialize};

/// An open question paired with a short list of plausible answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruthQuestion {
    /// Deterministic id: `T-<order code>-<1-based index>`.
    pub id: String,

    /// 1-5, taken from the order code's `L<n>` marker.
    pub intimacy_level: u8,

    /// Compressed question text, at most 50 characters.
    pub question: String,

    /// At most 4 unique non-empty strings, in first-occurrence order.
    pub expected_answers: Vec<String>,
}
