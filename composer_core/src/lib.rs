//! # Composer Core (Parlor)
//!
//! The composition engine of the conversational question pipeline. This crate
//! consumes `question_model` records, deterministically derives the two
//! short-form question products, and recovers structured records from messy
//! generated text.
//!
//! ## Core Components
//!
//! - **compressor**: Deterministic text rewriting driven by per-flavor rule tables
//! - **composer**: Balance/truth composition and index-aligned bundle assembly
//! - **ingest**: Tolerant recovery of records from free-form generated text
//!
//! ## Design Philosophy
//!
//! - **Pure**: No I/O, no shared mutable state; callers own every record
//! - **Deterministic**: The single random draw (the tension pick) is injectable
//! - **Tolerant at the edge, strict inside**: ingestion logs and skips bad
//!   records; once a record is typed, composition cannot fail

pub mod composer;
pub mod compressor;
pub mod ingest;

pub use composer::*;
pub use compressor::*;
pub use ingest::*;
