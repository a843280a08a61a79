//! Order-code interpretation: intimacy levels and category derivation.
//!
//! Order codes are short strings such as "FaFsL2" or "B-0042". The leading
//! letters encode the relationship category and the `L<n>` substring encodes
//! how intimate the question is allowed to get.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches the `L<digits>` intimacy marker inside an order code.
static INTIMACY_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"L(\d+)").expect("Invalid intimacy marker regex"));

/// Extract the intimacy level (1-5) encoded in an order code.
///
/// Reads the first `L<digits>` substring; codes without a marker, with a
/// level outside 1..=5, or with unparseable digits all fall back to level 1.
/// Never fails.
pub fn intimacy_level(order_code: &str) -> u8 {
    INTIMACY_MARKER
        .captures(order_code)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
        .filter(|level| (1..=5).contains(level))
        .map(|level| level as u8)
        .unwrap_or(1)
}

/// Relationship categories a question can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    Family,
    #[default]
    Friend,
    Lover,
    /// Sentinel for situation-family records; never derived from an order code.
    Situation,
}

impl Category {
    /// Derive the category from an order code's leading letters.
    ///
    /// "Fa…" codes are Family, "Lo…" are Lover; "B…" codes and anything
    /// unrecognized land on Friend.
    pub fn from_order_code(order_code: &str) -> Self {
        if order_code.starts_with("Fa") {
            Category::Family
        } else if order_code.starts_with("Lo") {
            Category::Lover
        } else {
            Category::Friend
        }
    }

    /// The wire string for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Family => "Family",
            Category::Friend => "Friend",
            Category::Lover => "Lover",
            Category::Situation => "Situation",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
