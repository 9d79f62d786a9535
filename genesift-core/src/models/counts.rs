use crate::consts::RPM_SCALE;
use crate::models::GenomicInterval;

///
/// Number of alignment records overlapping an interval.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCount {
    pub interval: GenomicInterval,
    pub raw_count: u64,
}

impl RawCount {
    pub fn new(interval: GenomicInterval, raw_count: u64) -> Self {
        RawCount {
            interval,
            raw_count,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.raw_count == 0
    }
}

///
/// A raw count together with its reads-per-million value.
///
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCount {
    pub interval: GenomicInterval,
    pub raw_count: u64,
    pub count: f64,
}

impl NormalizedCount {
    /// `total_mapped_reads` must be non-zero; callers check this once per table.
    pub fn from_raw(raw: RawCount, total_mapped_reads: u64) -> Self {
        let count = raw.raw_count as f64 * RPM_SCALE / total_mapped_reads as f64;
        NormalizedCount {
            interval: raw.interval,
            raw_count: raw.raw_count,
            count,
        }
    }

    ///
    /// Tab separated row: chr, start, end, gene, raw_count, count
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}",
            self.interval.as_string(),
            self.raw_count,
            self.count
        )
    }
}
