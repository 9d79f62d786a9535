//! genesift: classify genes into targets and non-targets by expression, and
//! quantify sequencing reads over genomic intervals.
//!
//! Each component lives in its own crate and is re-exported here behind a
//! feature of the same name.

#[cfg(feature = "core")]
#[doc(inline)]
pub use genesift_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use genesift_io as io;

#[cfg(feature = "classify")]
#[doc(inline)]
pub use genesift_classify as classify;

#[cfg(feature = "quant")]
#[doc(inline)]
pub use genesift_quant as quant;
