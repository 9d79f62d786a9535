use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use genesift_core::consts::NORMALIZED_COUNTS_HEADER;
use genesift_core::models::{GenomicInterval, NormalizedCount, RawCount};
use genesift_core::utils::get_dynamic_reader;

use crate::error::{GeneSiftIoError, Result};

///
/// Parse one line of a coverage table: the interval columns followed by the
/// overlap count as the last column. With five or more columns the fourth
/// is the interval name; with four there is no name.
fn parse_count_line(line: &str) -> Option<RawCount> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if fields.len() < 4 {
        return None;
    }

    let raw_count = fields.last()?.trim().parse::<u64>().ok()?;
    let start = fields[1].trim().parse::<u64>().ok()?;
    let end = fields[2].trim().parse::<u64>().ok()?;
    let name = (fields.len() >= 5).then(|| fields[3].to_string());

    let interval = GenomicInterval::new(fields[0], start, end, name).ok()?;
    Some(RawCount::new(interval, raw_count))
}

///
/// Read a headerless raw count table such as the output of a coverage
/// counting tool (`chr start end name ... raw_count`).
///
/// # Arguments
/// - path: path to the table
pub fn read_count_table<T: AsRef<Path>>(path: T) -> Result<Vec<RawCount>> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)?;

    let mut counts = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let count = parse_count_line(&line).ok_or_else(|| GeneSiftIoError::InvalidCountLine {
            path: path.display().to_string(),
            line_number: i + 1,
            line: line.clone(),
        })?;
        counts.push(count);
    }

    Ok(counts)
}

///
/// Read back a normalized count table written by [CountTableWrite].
///
/// # Arguments
/// - path: path to the table
pub fn read_normalized_counts<T: AsRef<Path>>(path: T) -> Result<Vec<NormalizedCount>> {
    let path = path.as_ref();
    let reader = get_dynamic_reader(path)?;
    let invalid = |line_number: usize, line: &str| GeneSiftIoError::InvalidCountLine {
        path: path.display().to_string(),
        line_number,
        line: line.to_string(),
    };

    let mut counts = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if i == 0 {
            let header: Vec<&str> = line.split('\t').collect();
            if header != NORMALIZED_COUNTS_HEADER {
                return Err(invalid(i + 1, &line));
            }
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }

        let (rest, count) = line.rsplit_once('\t').ok_or_else(|| invalid(i + 1, &line))?;
        let count = count
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(i + 1, &line))?;
        let raw = parse_count_line(rest).ok_or_else(|| invalid(i + 1, &line))?;

        counts.push(NormalizedCount {
            interval: raw.interval,
            raw_count: raw.raw_count,
            count,
        });
    }

    Ok(counts)
}

pub trait CountTableWrite {
    ///
    /// Write a tab separated count table with a
    /// `chr start end gene raw_count count` header.
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_counts<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;
}

impl CountTableWrite for [NormalizedCount] {
    fn write_counts<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "{}", NORMALIZED_COUNTS_HEADER.join("\t"))?;
        for row in self {
            writeln!(writer, "{}", row.as_string())?;
        }
        writer.flush()
    }
}
