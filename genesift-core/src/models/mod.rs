pub mod counts;
pub mod gene;
pub mod interval;
pub mod reference;

// re-export for cleaner imports
pub use self::counts::{NormalizedCount, RawCount};
pub use self::gene::{ExpressionRecord, Gene, GeneUniverse, TargetList};
pub use self::interval::GenomicInterval;
pub use self::reference::{ReferenceDictionary, ReferenceSequence};
