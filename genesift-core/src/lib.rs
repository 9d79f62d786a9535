//! # Core models for genesift
//!
//! Shared data model for the two genesift pipelines: gene symbols, expression
//! records and target lists on the classification side, and genomic intervals,
//! reference dictionaries and read counts on the quantification side.
//!
//! Also contains small reader helpers used by the io and classify crates.
pub mod consts;
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::*;
