use std::io;
use thiserror::Error;

use genesift_core::CoreError;

/// Error type for genesift-io operations.
#[derive(Error, Debug)]
pub enum GeneSiftIoError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from the shared model layer (unreadable file, bad interval).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Malformed delimited record.
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from a headered table.
    #[error("Required column `{column}` not found in {path}")]
    MissingColumn { column: String, path: String },

    /// A cell could not be converted to the expected type.
    #[error("Invalid value `{value}` in column `{column}` at row {row} of {path}")]
    InvalidValue {
        path: String,
        column: String,
        row: usize,
        value: String,
    },

    /// A line of a count table could not be parsed.
    #[error("Invalid count table line {line_number} in {path}: {line}")]
    InvalidCountLine {
        path: String,
        line_number: usize,
        line: String,
    },
}

/// Result type alias for genesift-io operations.
pub type Result<T> = std::result::Result<T, GeneSiftIoError>;
