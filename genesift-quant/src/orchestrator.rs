use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;

use genesift_io::{read_count_table, CountTableWrite};

use crate::errors::QuantResult;
use crate::normalize::{normalize, NormalizedTable};
use crate::tools::IntervalTools;
use crate::workspace::Workspace;

#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    /// label used in log messages
    pub sample_name: String,
}

impl CountOptions {
    pub fn new(sample_name: impl Into<String>) -> Self {
        CountOptions {
            sample_name: sample_name.into(),
        }
    }
}

///
/// Result of one quantification run. The table has already been written to
/// `output` when this is returned.
///
#[derive(Debug, Clone)]
pub struct QuantReport {
    pub sample_name: String,
    pub output: PathBuf,
    pub table: NormalizedTable,
}

fn output_dir(output: &Path) -> &Path {
    match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

///
/// Scratch file for the output table. It gets the mode a plainly created file
/// would get (0666 minus umask), or the mode of an existing `output`.
fn table_tempfile(dir: &Path, output: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".genesift-table-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let tmp = builder.tempfile_in(dir)?;
    if let Ok(existing) = std::fs::metadata(output) {
        std::fs::set_permissions(tmp.path(), existing.permissions())?;
    }
    Ok(tmp)
}

///
/// Write `table` next to `output` and rename it into place, so `output` either
/// holds the complete table or is left untouched.
fn persist_table(table: &NormalizedTable, output: &Path) -> QuantResult<()> {
    let dir = output_dir(output);
    std::fs::create_dir_all(dir)?;

    let tmp = table_tempfile(dir, output)?;
    table.rows.write_counts(tmp.path())?;
    tmp.persist(output).map_err(|e| e.error)?;

    Ok(())
}

///
/// Count alignment reads over every interval of `intervals`, normalize to
/// reads per million and write the table to `output`.
///
/// Intermediate files live in a [Workspace] under the output directory and
/// are removed on return, whether the run succeeded or not.
///
/// # Arguments
/// - tools: backend answering alignment and interval queries
/// - intervals: BED file of peaks or promoter regions
/// - alignment: coordinate-sorted BAM file
/// - output: destination TSV
/// - options: per-run options
pub fn count_overlaps(
    tools: &dyn IntervalTools,
    intervals: &Path,
    alignment: &Path,
    output: &Path,
    options: &CountOptions,
) -> QuantResult<QuantReport> {
    let sample = &options.sample_name;
    let prefix = output
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "counts".to_string());
    let workspace = Workspace::new_in(output_dir(output), &prefix)?;

    info!("[{sample}] Counting mapped reads in {}", alignment.display());
    let total_mapped_reads = tools.total_mapped_reads(alignment)?;
    info!("[{sample}] Total mapped reads: {total_mapped_reads}");

    let dictionary = tools.reference_dictionary(alignment)?;
    info!(
        "[{sample}] Alignment header lists {} reference sequences",
        dictionary.len()
    );
    let genome = workspace.write_genome(dictionary)?;

    info!("[{sample}] Sorting {}", intervals.display());
    let sorted = tools.sort_intervals(intervals, &genome, &workspace)?;

    info!("[{sample}] Counting reads per interval");
    let raw_counts = tools.coverage_counts(&sorted, alignment, &genome, &workspace)?;

    let table = normalize(raw_counts, total_mapped_reads)?;
    persist_table(&table, output)?;
    info!("[{sample}] Wrote {} intervals to {}", table.rows.len(), output.display());

    workspace.close();

    Ok(QuantReport {
        sample_name: options.sample_name.clone(),
        output: output.to_path_buf(),
        table,
    })
}

///
/// Normalize an existing raw count table (`bedtools coverage -counts`
/// layout) and write it to `output`.
///
pub fn normalize_count_file(
    counts: &Path,
    total_mapped_reads: u64,
    output: &Path,
) -> QuantResult<NormalizedTable> {
    let raw_counts = read_count_table(counts)?;
    let table = normalize(raw_counts, total_mapped_reads)?;
    persist_table(&table, output)?;
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::fs;

    use genesift_core::models::{GenomicInterval, RawCount, ReferenceDictionary, ReferenceSequence};
    use genesift_io::{read_intervals, read_normalized_counts, IntervalWrite};
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::errors::QuantError;
    use crate::workspace::GenomeOrder;

    ///
    /// Backend that sorts and counts in memory, with a configurable read count
    /// per interval name and an optional failure in the coverage step.
    struct FakeTools {
        total: u64,
        counts: Vec<(&'static str, u64)>,
        fail_coverage: bool,
        seen_workspace: RefCell<Option<PathBuf>>,
    }

    impl FakeTools {
        fn new(total: u64, counts: Vec<(&'static str, u64)>) -> Self {
            FakeTools {
                total,
                counts,
                fail_coverage: false,
                seen_workspace: RefCell::new(None),
            }
        }
    }

    impl IntervalTools for FakeTools {
        fn total_mapped_reads(&self, _alignment: &Path) -> QuantResult<u64> {
            Ok(self.total)
        }

        fn reference_dictionary(&self, _alignment: &Path) -> QuantResult<ReferenceDictionary> {
            Ok(ReferenceDictionary::new(vec![
                ReferenceSequence { name: "chr1".to_string(), length: 1_000 },
                ReferenceSequence { name: "chr2".to_string(), length: 1_000 },
                ReferenceSequence { name: "chr10".to_string(), length: 1_000 },
            ]))
        }

        fn sort_intervals(
            &self,
            intervals: &Path,
            genome: &GenomeOrder,
            workspace: &Workspace,
        ) -> QuantResult<PathBuf> {
            *self.seen_workspace.borrow_mut() = Some(workspace.dir().to_path_buf());

            let mut all = read_intervals(intervals)?;
            all.sort_by_key(|i| (genome.dictionary.rank(&i.chr), i.start, i.end));
            let path = workspace.path("sorted.tmp");
            all.write_bed(&path)?;
            Ok(path)
        }

        fn coverage_counts(
            &self,
            sorted_intervals: &Path,
            _alignment: &Path,
            _genome: &GenomeOrder,
            _workspace: &Workspace,
        ) -> QuantResult<Vec<RawCount>> {
            if self.fail_coverage {
                return Err(QuantError::ToolFailed {
                    command: "bedtools coverage".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "truncated file".to_string(),
                });
            }

            Ok(read_intervals(sorted_intervals)?
                .into_iter()
                .map(|interval: GenomicInterval| {
                    let n = self
                        .counts
                        .iter()
                        .find(|(name, _)| *name == interval.name)
                        .map(|(_, n)| *n)
                        .unwrap_or(0);
                    RawCount::new(interval, n)
                })
                .collect())
        }
    }

    #[fixture]
    fn peaks() -> PathBuf {
        PathBuf::from("../tests/data/intervals/peaks.bed")
    }

    #[rstest]
    fn test_count_overlaps_writes_sorted_normalized_table(peaks: PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out").join("sample.tsv");
        let tools = FakeTools::new(
            5_000_000,
            vec![("peak_1", 10), ("peak_2", 5), ("peak_3", 0), ("peak_4", 20)],
        );

        let report = count_overlaps(
            &tools,
            &peaks,
            Path::new("sample.bam"),
            &output,
            &CountOptions::new("NSC"),
        )
        .unwrap();

        assert_eq!(report.sample_name, "NSC");
        assert!(report.table.qc.is_clean());

        let written = read_normalized_counts(&output).unwrap();
        let names: Vec<&str> = written.iter().map(|r| r.interval.name.as_str()).collect();
        assert_eq!(names, vec!["peak_4", "peak_2", "peak_1", "peak_3"]);
        assert_eq!(written[2].raw_count, 10);
        assert_eq!(written[2].count, 2.0);

        let header = fs::read_to_string(&output).unwrap();
        assert!(header.starts_with("chr\tstart\tend\tgene\traw_count\tcount\n"));
    }

    #[rstest]
    fn test_workspace_removed_after_success(peaks: PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sample.tsv");
        let tools = FakeTools::new(2_000_000, vec![("peak_1", 3)]);

        count_overlaps(&tools, &peaks, Path::new("x.bam"), &output, &CountOptions::new("s")).unwrap();

        let workspace = tools.seen_workspace.borrow().clone().unwrap();
        assert!(workspace.starts_with(dir.path()));
        assert!(!workspace.exists());
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[rstest]
    fn test_failure_leaves_no_output_and_no_workspace(peaks: PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sample.tsv");
        let mut tools = FakeTools::new(2_000_000, vec![]);
        tools.fail_coverage = true;

        let err = count_overlaps(&tools, &peaks, Path::new("x.bam"), &output, &CountOptions::new("s"))
            .unwrap_err();

        assert!(matches!(err, QuantError::ToolFailed { .. }));
        assert!(!output.exists());
        let workspace = tools.seen_workspace.borrow().clone().unwrap();
        assert!(!workspace.exists());
    }

    #[rstest]
    fn test_zero_mapped_reads_is_fatal(peaks: PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sample.tsv");
        let tools = FakeTools::new(0, vec![("peak_1", 3)]);

        let err = count_overlaps(&tools, &peaks, Path::new("x.bam"), &output, &CountOptions::new("s"))
            .unwrap_err();

        assert!(matches!(err, QuantError::ZeroMappedReads));
        assert!(!output.exists());
    }

    #[rstest]
    fn test_failure_keeps_previous_output(peaks: PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("sample.tsv");
        fs::write(&output, "previous run\n").unwrap();
        let mut tools = FakeTools::new(2_000_000, vec![]);
        tools.fail_coverage = true;

        assert!(count_overlaps(&tools, &peaks, Path::new("x.bam"), &output, &CountOptions::new("s")).is_err());
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous run\n");
    }

    #[cfg(unix)]
    #[rstest]
    fn test_output_mode_matches_plain_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("normalized.tsv");
        let plain = dir.path().join("plain.tsv");
        fs::write(&plain, "x").unwrap();

        normalize_count_file(
            Path::new("../tests/data/intervals/raw_counts.tsv"),
            2_000_000,
            &output,
        )
        .unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&output), mode(&plain));
    }

    #[cfg(unix)]
    #[rstest]
    fn test_output_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("normalized.tsv");
        fs::write(&output, "previous run\n").unwrap();
        fs::set_permissions(&output, fs::Permissions::from_mode(0o640)).unwrap();

        normalize_count_file(
            Path::new("../tests/data/intervals/raw_counts.tsv"),
            2_000_000,
            &output,
        )
        .unwrap();

        assert_eq!(fs::metadata(&output).unwrap().permissions().mode() & 0o777, 0o640);
        assert!(fs::read_to_string(&output).unwrap().starts_with("chr\t"));
    }

    #[rstest]
    fn test_normalize_count_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("normalized.tsv");

        let table = normalize_count_file(
            Path::new("../tests/data/intervals/raw_counts.tsv"),
            2_000_000,
            &output,
        )
        .unwrap();

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].count, 5.0);
        assert_eq!(table.rows[2].count, 2.0);
        assert!(table.qc.is_clean());

        let written = read_normalized_counts(&output).unwrap();
        assert_eq!(written, table.rows);
    }
}
