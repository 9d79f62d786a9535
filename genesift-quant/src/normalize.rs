use std::fmt::{self, Display};

use genesift_core::models::{NormalizedCount, RawCount};

use crate::errors::{QuantError, QuantResult};

/// More than this fraction of zero-count intervals triggers a warning.
pub const MAX_ZERO_FRACTION: f64 = 0.5;

/// Fewer mapped reads than this triggers a warning.
pub const MIN_MAPPED_READS: u64 = 1_000_000;

///
/// Non-fatal data quality findings.
///
#[derive(Debug, Clone, PartialEq)]
pub enum QcWarning {
    LowSignal {
        zero: usize,
        total: usize,
        fraction: f64,
    },
    LowDepth {
        total_mapped_reads: u64,
    },
}

impl Display for QcWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QcWarning::LowSignal {
                zero,
                total,
                fraction,
            } => write!(
                f,
                "More than 50% of intervals have zero reads: {}/{} ({:.4})",
                zero, total, fraction
            ),
            QcWarning::LowDepth { total_mapped_reads } => {
                write!(f, "Low number of mapped reads: {}", total_mapped_reads)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QcReport {
    pub warnings: Vec<QcWarning>,
}

impl QcReport {
    ///
    /// Evaluate both quality heuristics: zero-count fraction strictly above
    /// one half, and total mapped reads strictly below one million.
    ///
    pub fn evaluate(raw_counts: &[RawCount], total_mapped_reads: u64) -> Self {
        let mut warnings = Vec::new();

        let total = raw_counts.len();
        let zero = raw_counts.iter().filter(|c| c.is_zero()).count();
        if total > 0 {
            let fraction = zero as f64 / total as f64;
            if fraction > MAX_ZERO_FRACTION {
                warnings.push(QcWarning::LowSignal {
                    zero,
                    total,
                    fraction,
                });
            }
        }

        if total_mapped_reads < MIN_MAPPED_READS {
            warnings.push(QcWarning::LowDepth { total_mapped_reads });
        }

        QcReport { warnings }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

///
/// Reads-per-million table with the quality report of its raw counts.
///
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub rows: Vec<NormalizedCount>,
    pub total_mapped_reads: u64,
    pub qc: QcReport,
}

impl NormalizedTable {
    pub fn mean_raw_count(&self) -> f64 {
        mean(self.rows.iter().map(|r| r.raw_count as f64), self.rows.len())
    }

    pub fn mean_count(&self) -> f64 {
        mean(self.rows.iter().map(|r| r.count), self.rows.len())
    }
}

fn mean(values: impl Iterator<Item = f64>, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        values.sum::<f64>() / n as f64
    }
}

///
/// Convert raw overlap counts to reads per million:
/// `count = raw_count * 1e6 / total_mapped_reads`.
///
/// # Arguments
/// - raw_counts: one raw count per interval
/// - total_mapped_reads: library size; zero is an error
pub fn normalize(raw_counts: Vec<RawCount>, total_mapped_reads: u64) -> QuantResult<NormalizedTable> {
    if total_mapped_reads == 0 {
        return Err(QuantError::ZeroMappedReads);
    }

    let qc = QcReport::evaluate(&raw_counts, total_mapped_reads);
    let rows = raw_counts
        .into_iter()
        .map(|raw| NormalizedCount::from_raw(raw, total_mapped_reads))
        .collect();

    Ok(NormalizedTable {
        rows,
        total_mapped_reads,
        qc,
    })
}
