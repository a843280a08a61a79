//! Output question products consumed by downstream persistence and export.

mod balance;
mod truth;

pub use balance::*;
pub use truth::*;

use serde::{Deserialize, Serialize};

/// Discriminator for the two question products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Balance,
    Truth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_form() {
        assert_eq!(serde_json::to_string(&QuestionKind::Balance).unwrap(), "\"balance\"");
        assert_eq!(serde_json::to_string(&QuestionKind::Truth).unwrap(), "\"truth\"");
    }
}
