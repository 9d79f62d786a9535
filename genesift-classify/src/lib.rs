//! Target-set classification for genesift.
//!
//! Builds a gene universe from a genome annotation, then partitions genes
//! into targets and non-targets and filters target lists by a baseMean
//! expression threshold.
//!
//! # Example
//!
//! ```no_run
//! use genesift_classify::{ClassificationInputs, ClassifyConfig, classify_files};
//!
//! let inputs = ClassificationInputs {
//!     dea: "Gene_lists/DEA_NSC.csv".into(),
//!     targets1: "Gene_lists/targets/all_mecp2_targets_1.csv".into(),
//!     targets2: "Gene_lists/targets/all_mecp2_targets_2.csv".into(),
//!     annotation: "data/gencode.vM10.basic.annotation.gtf.gz".into(),
//! };
//!
//! let result = classify_files(&inputs, &ClassifyConfig::default()).unwrap();
//! result.write_outputs("Gene_lists/targets").unwrap();
//! println!("{}", result.summary());
//! ```
pub mod annotation;
pub mod classify;
pub mod config;
pub mod consts;
pub mod errors;
pub mod pipeline;

// re-exports
pub use annotation::extract_genes;
pub use classify::{Classification, ClassificationOutputs, ClassificationSummary, classify};
pub use config::{ClassifyConfig, TargetDefinition};
pub use errors::{ClassifyError, ClassifyResult};
pub use pipeline::{ClassificationInputs, classify_files};
