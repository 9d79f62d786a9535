/// Scale factor for reads-per-million normalization.
pub const RPM_SCALE: f64 = 1e6;

/// Default baseMean threshold for the high-expression filter.
pub const DEFAULT_EXPRESSION_THRESHOLD: f64 = 100.0;

/// Default biotype kept when building a gene universe from annotation.
pub const DEFAULT_BIOTYPE: &str = "protein_coding";

/// Header of a normalized count table.
pub const NORMALIZED_COUNTS_HEADER: [&str; 6] = ["chr", "start", "end", "gene", "raw_count", "count"];
