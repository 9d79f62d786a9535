use thiserror::Error;

use genesift_core::CoreError;
use genesift_io::GeneSiftIoError;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("Failed to read annotation {path}: {source}")]
    AnnotationRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid classification config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    InputOutput(#[from] GeneSiftIoError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ClassifyResult<T> = std::result::Result<T, ClassifyError>;
