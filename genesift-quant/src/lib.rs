//! # Interval quantification for genesift.
//!
//! Counts alignment reads over peak or promoter intervals and normalizes them
//! to reads per million. Alignment and interval work goes through the
//! [IntervalTools] trait, backed either by `samtools`/`bedtools` subprocesses
//! ([ExternalTools]) or by an in-process BAM reader ([NativeTools]).
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use genesift_quant::{Backend, CountOptions, count_overlaps};
//!
//! let tools = Backend::External.tools(4);
//! let report = count_overlaps(
//!     tools.as_ref(),
//!     Path::new("peaks/NSC_peaks.bed"),
//!     Path::new("bam/NSC.bam"),
//!     Path::new("counts/NSC.tsv"),
//!     &CountOptions::new("NSC"),
//! )
//! .unwrap();
//!
//! for warning in &report.table.qc.warnings {
//!     eprintln!("{warning}");
//! }
//! ```
pub mod errors;
pub mod normalize;
pub mod orchestrator;
pub mod tools;
pub mod workspace;

// re-exports
pub use errors::{QuantError, QuantResult};
pub use normalize::{NormalizedTable, QcReport, QcWarning, normalize};
pub use orchestrator::{CountOptions, QuantReport, count_overlaps, normalize_count_file};
pub use tools::{Backend, ExternalTools, IntervalTools, NativeTools};
pub use workspace::{GenomeOrder, Workspace};
