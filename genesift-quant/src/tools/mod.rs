pub mod external;
pub mod native;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use genesift_core::models::{RawCount, ReferenceDictionary};

use crate::errors::QuantResult;
use crate::workspace::{GenomeOrder, Workspace};

pub use external::ExternalTools;
pub use native::NativeTools;

/// SAM flag bits excluded when counting mapped reads: unmapped (0x4) and
/// secondary (0x100).
pub const MAPPED_READS_EXCLUDE_FLAGS: u16 = 0x4 | 0x100;

///
/// The alignment / interval operations interval quantification depends on.
/// Implementations may shell out to external programs or work in-process.
///
pub trait IntervalTools {
    ///
    /// Number of alignment records that are mapped and not secondary.
    ///
    fn total_mapped_reads(&self, alignment: &Path) -> QuantResult<u64>;

    ///
    /// Reference sequences (name, length) in alignment header order.
    ///
    fn reference_dictionary(&self, alignment: &Path) -> QuantResult<ReferenceDictionary>;

    ///
    /// Sort an interval file by the genome order and return the path of the
    /// sorted copy, created inside `workspace`.
    ///
    fn sort_intervals(
        &self,
        intervals: &Path,
        genome: &GenomeOrder,
        workspace: &Workspace,
    ) -> QuantResult<PathBuf>;

    ///
    /// Count alignment records overlapping every interval of a sorted
    /// interval file. One count per interval, in file order.
    ///
    fn coverage_counts(
        &self,
        sorted_intervals: &Path,
        alignment: &Path,
        genome: &GenomeOrder,
        workspace: &Workspace,
    ) -> QuantResult<Vec<RawCount>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// samtools + bedtools subprocesses
    #[default]
    External,
    /// in-process BAM reading
    Native,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "external" => Ok(Backend::External),
            "native" => Ok(Backend::Native),
            _ => Err(format!("Invalid backend: {}", s)),
        }
    }
}

impl Backend {
    pub fn tools(&self, threads: usize) -> Box<dyn IntervalTools> {
        match self {
            Backend::External => Box::new(ExternalTools::default().with_threads(threads)),
            Backend::Native => Box::new(NativeTools),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("external", Backend::External)]
    #[case("Native", Backend::Native)]
    fn test_backend_from_str(#[case] input: &str, #[case] expected: Backend) {
        assert_eq!(Backend::from_str(input).unwrap(), expected);
    }

    #[rstest]
    fn test_exclude_flags_match_samtools_mask() {
        assert_eq!(MAPPED_READS_EXCLUDE_FLAGS, 260);
    }
}
