use std::fmt::{self, Display};

use crate::errors::CoreError;

///
/// GenomicInterval struct, one peak or promoter region of an interval file.
/// Coordinates are 0-based, half-open.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenomicInterval {
    pub chr: String,
    pub start: u64,
    pub end: u64,
    pub name: String,
}

impl GenomicInterval {
    ///
    /// Create a new interval, checking that `end > start`.
    ///
    pub fn new(
        chr: impl Into<String>,
        start: u64,
        end: u64,
        name: Option<String>,
    ) -> Result<Self, CoreError> {
        let chr = chr.into();
        if end <= start {
            return Err(CoreError::InvalidIntervalBounds { chr, start, end });
        }
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("{}:{}-{}", chr, start, end));

        Ok(GenomicInterval {
            chr,
            start,
            end,
            name,
        })
    }

    pub fn width(&self) -> u64 {
        self.end - self.start
    }

    /// Half-open overlap test against `[start, end)`.
    pub fn overlaps(&self, start: u64, end: u64) -> bool {
        self.start < end && self.end > start
    }

    ///
    /// Get the four column BED representation of the interval
    ///
    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.chr, self.start, self.end, self.name)
    }
}

impl TryFrom<&str> for GenomicInterval {
    type Error = CoreError;

    ///
    /// Parse one line of a BED-like file. Only the first four columns are
    /// used; the name column is optional.
    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let mut fields = line.trim_end_matches(['\r', '\n']).split('\t');

        let chr = fields
            .next()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| CoreError::IntervalParseError(format!("missing chromosome: {line}")))?;

        let start = fields
            .next()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .ok_or_else(|| CoreError::IntervalParseError(format!("invalid start: {line}")))?;

        let end = fields
            .next()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .ok_or_else(|| CoreError::IntervalParseError(format!("invalid end: {line}")))?;

        let name = fields.next().map(|s| s.trim().to_string());

        GenomicInterval::new(chr, start, end, name)
    }
}

impl Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
