use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use noodles::bam;
use noodles::sam;
use noodles::sam::alignment::Record as SamRecord;
use rust_lapper::{Interval, Lapper};

use genesift_core::models::{GenomicInterval, RawCount, ReferenceDictionary, ReferenceSequence};
use genesift_io::{read_intervals, IntervalWrite};

use super::IntervalTools;
use crate::errors::{QuantError, QuantResult};
use crate::workspace::{GenomeOrder, Workspace};

///
/// In-process implementation of [IntervalTools]. Reads BAM files with noodles
/// and answers overlap queries with one [Lapper] per reference sequence.
///
/// Counting follows `bedtools coverage -counts`: every mapped record whose
/// aligned span overlaps an interval by at least one base is counted.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTools;

fn open_bam(path: &Path) -> QuantResult<(bam::io::Reader<impl Read>, sam::Header)> {
    let alignment_read = |source| QuantError::AlignmentRead {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(alignment_read)?;
    let mut reader = bam::io::reader::Builder::default().build_from_reader(file);
    let header = reader.read_header().map_err(alignment_read)?;

    Ok((reader, header))
}

///
/// Stream every record of `reader`, calling `f` on each one.
fn for_each_record<R, F>(reader: &mut bam::io::Reader<R>, path: &Path, mut f: F) -> QuantResult<()>
where
    R: Read,
    F: FnMut(&bam::Record),
{
    let mut record = bam::Record::default();
    loop {
        match reader.read_record(&mut record) {
            Ok(0) => return Ok(()),
            Ok(_) => f(&record),
            Err(source) => {
                return Err(QuantError::AlignmentRead {
                    path: path.display().to_string(),
                    source,
                });
            }
        }
    }
}

///
/// Zero-based half-open span `[start, end)` of a mapped record on its
/// reference sequence, with the reference index.
fn aligned_span(record: &bam::Record) -> Option<(usize, u64, u64)> {
    let id = record.reference_sequence_id()?.ok()?;
    let start = record.alignment_start()?.ok()?.get() as u64 - 1;
    let span = record.alignment_span()?.ok()? as u64;
    if span == 0 {
        return None;
    }
    Some((id, start, start + span))
}

fn unknown_chromosome(interval: &GenomicInterval) -> QuantError {
    QuantError::UnknownChromosome {
        chr: interval.chr.clone(),
        name: interval.name.clone(),
    }
}

impl IntervalTools for NativeTools {
    fn total_mapped_reads(&self, alignment: &Path) -> QuantResult<u64> {
        let (mut reader, _) = open_bam(alignment)?;

        let mut total = 0u64;
        for_each_record(&mut reader, alignment, |record| {
            let flags = record.flags();
            if !flags.is_unmapped() && !flags.is_secondary() {
                total += 1;
            }
        })?;

        Ok(total)
    }

    fn reference_dictionary(&self, alignment: &Path) -> QuantResult<ReferenceDictionary> {
        let (_, header) = open_bam(alignment)?;

        let sequences = header
            .reference_sequences()
            .iter()
            .map(|(name, map)| ReferenceSequence {
                name: name.to_string(),
                length: map.length().get() as u64,
            })
            .collect();

        Ok(ReferenceDictionary::new(sequences))
    }

    fn sort_intervals(
        &self,
        intervals: &Path,
        genome: &GenomeOrder,
        workspace: &Workspace,
    ) -> QuantResult<PathBuf> {
        let mut keyed = read_intervals(intervals)?
            .into_iter()
            .map(|interval| match genome.dictionary.rank(&interval.chr) {
                Some(rank) => Ok((rank, interval)),
                None => Err(unknown_chromosome(&interval)),
            })
            .collect::<QuantResult<Vec<_>>>()?;

        keyed.sort_by_key(|(rank, interval)| (*rank, interval.start, interval.end));

        let sorted: Vec<GenomicInterval> = keyed.into_iter().map(|(_, i)| i).collect();
        let path = workspace.path("sorted.tmp");
        sorted.write_bed(&path)?;

        Ok(path)
    }

    fn coverage_counts(
        &self,
        sorted_intervals: &Path,
        alignment: &Path,
        genome: &GenomeOrder,
        _workspace: &Workspace,
    ) -> QuantResult<Vec<RawCount>> {
        let intervals = read_intervals(sorted_intervals)?;

        let mut per_reference: Vec<Vec<Interval<u64, usize>>> =
            vec![Vec::new(); genome.dictionary.len()];
        for (i, interval) in intervals.iter().enumerate() {
            let rank = genome
                .dictionary
                .rank(&interval.chr)
                .ok_or_else(|| unknown_chromosome(interval))?;
            per_reference[rank].push(Interval {
                start: interval.start,
                stop: interval.end,
                val: i,
            });
        }
        let lappers: Vec<Lapper<u64, usize>> = per_reference.into_iter().map(Lapper::new).collect();

        let (mut reader, _) = open_bam(alignment)?;
        let mut counts = vec![0u64; intervals.len()];
        for_each_record(&mut reader, alignment, |record| {
            if record.flags().is_unmapped() {
                return;
            }
            let Some((id, start, end)) = aligned_span(record) else {
                return;
            };
            if let Some(lapper) = lappers.get(id) {
                for hit in lapper.find(start, end) {
                    counts[hit.val] += 1;
                }
            }
        })?;

        Ok(intervals
            .into_iter()
            .zip(counts)
            .map(|(interval, n)| RawCount::new(interval, n))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::num::NonZeroUsize;

    use noodles::core::Position;
    use noodles::sam::alignment::io::Write as _;
    use noodles::sam::alignment::record::cigar::op::{Kind, Op};
    use noodles::sam::alignment::record::Flags;
    use noodles::sam::alignment::RecordBuf;
    use noodles::sam::header::record::value::map::ReferenceSequence as SqMap;
    use noodles::sam::header::record::value::Map;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn header() -> sam::Header {
        sam::Header::builder()
            .add_reference_sequence(
                "chr2",
                Map::<SqMap>::new(NonZeroUsize::try_from(10_000).unwrap()),
            )
            .add_reference_sequence(
                "chr1",
                Map::<SqMap>::new(NonZeroUsize::try_from(20_000).unwrap()),
            )
            .build()
    }

    fn mapped(reference: usize, start_1based: usize, len: usize, flags: Flags) -> RecordBuf {
        RecordBuf::builder()
            .set_flags(flags)
            .set_reference_sequence_id(reference)
            .set_alignment_start(Position::try_from(start_1based).unwrap())
            .set_cigar([Op::new(Kind::Match, len)].into_iter().collect())
            .build()
    }

    fn write_bam(path: &Path) {
        let header = header();
        let records = vec![
            // chr2 [100, 150)
            mapped(0, 101, 50, Flags::empty()),
            // chr2 [190, 240), secondary
            mapped(0, 191, 50, Flags::SECONDARY),
            // chr1 [0, 50)
            mapped(1, 1, 50, Flags::empty()),
            // chr1 [60, 110)
            mapped(1, 61, 50, Flags::empty()),
            // chr1 [200, 250)
            mapped(1, 201, 50, Flags::empty()),
            RecordBuf::builder().set_flags(Flags::UNMAPPED).build(),
        ];

        let file = File::create(path).unwrap();
        let mut writer = bam::io::Writer::new(file);
        writer.write_alignment_header(&header).unwrap();
        for record in &records {
            writer.write_alignment_record(&header, record).unwrap();
        }
        writer.finish(&header).unwrap();
    }

    #[fixture]
    fn bam_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_bam(&dir.path().join("sample.bam"));
        dir
    }

    #[rstest]
    fn test_total_mapped_reads_skips_unmapped_and_secondary(bam_dir: tempfile::TempDir) {
        let total = NativeTools
            .total_mapped_reads(&bam_dir.path().join("sample.bam"))
            .unwrap();
        assert_eq!(total, 4);
    }

    #[rstest]
    fn test_reference_dictionary_keeps_header_order(bam_dir: tempfile::TempDir) {
        let dict = NativeTools
            .reference_dictionary(&bam_dir.path().join("sample.bam"))
            .unwrap();

        assert_eq!(
            dict.sequences(),
            &[
                ReferenceSequence { name: "chr2".to_string(), length: 10_000 },
                ReferenceSequence { name: "chr1".to_string(), length: 20_000 },
            ]
        );
    }

    #[rstest]
    fn test_sort_and_count(bam_dir: tempfile::TempDir) {
        let bam = bam_dir.path().join("sample.bam");
        let peaks = bam_dir.path().join("peaks.bed");
        std::fs::write(
            &peaks,
            "chr1\t100\t300\tb\nchr2\t120\t200\ta\nchr1\t0\t70\tc\nchr1\t5000\t5100\td\n",
        )
        .unwrap();

        let workspace = Workspace::new_in(bam_dir.path(), "counts").unwrap();
        let genome = workspace
            .write_genome(NativeTools.reference_dictionary(&bam).unwrap())
            .unwrap();

        let sorted = NativeTools.sort_intervals(&peaks, &genome, &workspace).unwrap();
        let counts = NativeTools
            .coverage_counts(&sorted, &bam, &genome, &workspace)
            .unwrap();

        let summary: Vec<(&str, u64)> = counts
            .iter()
            .map(|c| (c.interval.name.as_str(), c.raw_count))
            .collect();
        // chr2 first (header order); the secondary record at [190, 240) still overlaps `a`
        assert_eq!(summary, vec![("a", 2), ("c", 2), ("b", 2), ("d", 0)]);
    }

    #[rstest]
    fn test_unknown_chromosome_is_error(bam_dir: tempfile::TempDir) {
        let bam = bam_dir.path().join("sample.bam");
        let peaks = bam_dir.path().join("peaks.bed");
        std::fs::write(&peaks, "chrUn\t0\t10\tx\n").unwrap();

        let workspace = Workspace::new_in(bam_dir.path(), "counts").unwrap();
        let genome = workspace
            .write_genome(NativeTools.reference_dictionary(&bam).unwrap())
            .unwrap();

        assert!(matches!(
            NativeTools.sort_intervals(&peaks, &genome, &workspace),
            Err(QuantError::UnknownChromosome { .. })
        ));
    }

    #[rstest]
    fn test_missing_bam_is_alignment_error() {
        assert!(matches!(
            NativeTools.total_mapped_reads(Path::new("../tests/data/does_not_exist.bam")),
            Err(QuantError::AlignmentRead { .. })
        ));
    }
}
