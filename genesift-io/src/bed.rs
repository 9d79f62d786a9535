use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use genesift_core::models::GenomicInterval;
use genesift_core::utils::get_dynamic_reader;

use crate::error::Result;

fn is_header_line(line: &str) -> bool {
    line.starts_with('#') || line.starts_with("track") || line.starts_with("browser")
}

///
/// Read a BED-like interval file (three or more tab separated columns).
/// `#`, `track` and `browser` lines are skipped.
///
/// # Arguments
/// - path: path to the interval file (plain or `.gz`)
pub fn read_intervals<T: AsRef<Path>>(path: T) -> Result<Vec<GenomicInterval>> {
    let reader = get_dynamic_reader(path.as_ref())?;

    let mut intervals = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() || is_header_line(&line) {
            continue;
        }
        intervals.push(GenomicInterval::try_from(line.as_str())?);
    }

    Ok(intervals)
}

pub trait IntervalWrite {
    ///
    /// Write intervals to disk as a four column bed file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;
}

impl IntervalWrite for [GenomicInterval] {
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        for interval in self {
            writeln!(writer, "{}", interval.as_string())?;
        }
        writer.flush()
    }
}
