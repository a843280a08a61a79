//! # Question Model
//!
//! The "Question Bible" crate - contains all input records, output products,
//! order-code rules, and text compression rule tables. This crate is the single
//! source of truth for question data shapes and does not contain any
//! composition logic.

pub mod enrichment;
pub mod error;
pub mod order_code;
pub mod output;
pub mod text_rules;

pub use enrichment::*;
pub use error::*;
pub use order_code::*;
pub use output::*;
pub use text_rules::*;
