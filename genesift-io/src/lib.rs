//! # Input/Output utilities for genesift.
//!
//! Readers and writers for the plain-text formats the two pipelines exchange:
//! headerless gene lists, differential expression tables, BED-like interval
//! files and raw / normalized count tables.
//!
pub mod bed;
pub mod counts;
pub mod dea;
pub mod error;
pub mod gene_list;

// re-expose core functions
pub use bed::*;
pub use counts::*;
pub use dea::*;
pub use error::*;
pub use gene_list::*;
