use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::{CoreError, Result};

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| CoreError::FileReadError {
        path: path.display().to_string(),
        source,
    })
}

///
/// Get a reader for either a gzip'd or non-gzip'd file. Compression is
/// detected from a `.gz` extension.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = open_file(path)?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Get a reader for a file that must be gzip compressed, whatever its
/// extension. Invalid gzip content surfaces as an io error on the first read.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_gzip_reader(path: &Path) -> Result<BufReader<MultiGzDecoder<File>>> {
    let file = open_file(path)?;
    Ok(BufReader::new(MultiGzDecoder::new(file)))
}
