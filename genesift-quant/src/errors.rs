use thiserror::Error;

use genesift_core::CoreError;
use genesift_io::GeneSiftIoError;

#[derive(Error, Debug)]
pub enum QuantError {
    #[error("Can't run `{tool}`, is it installed and on PATH? {source}")]
    ToolNotFound {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    ToolFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Unexpected output from `{command}`: {output}")]
    UnexpectedToolOutput { command: String, output: String },

    #[error("Total mapped reads is 0, reads per million are undefined")]
    ZeroMappedReads,

    #[error("Chromosome `{chr}` of interval `{name}` is not in the alignment header")]
    UnknownChromosome { chr: String, name: String },

    #[error("Failed to read alignment file {path}: {source}")]
    AlignmentRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    InputOutput(#[from] GeneSiftIoError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type QuantResult<T> = std::result::Result<T, QuantError>;
