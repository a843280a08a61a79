//! Composers - deterministic derivation of the question products.
//!
//! Each composer consumes a validated [`question_model::EnrichmentInput`] and
//! derives one output record per input question, index-aligned with the
//! input. Downstream assembly relies on that alignment: question `i` produces
//! balance `i` and truth `i`.

mod balance;
mod bundle;
mod truth;

pub use balance::*;
pub use bundle::*;
pub use truth::*;
