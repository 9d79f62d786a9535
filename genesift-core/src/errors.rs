use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Can't read file {path}: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing interval: {0}")]
    IntervalParseError(String),

    #[error("Interval end must be greater than start: {chr}:{start}-{end}")]
    InvalidIntervalBounds { chr: String, start: u64, end: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
