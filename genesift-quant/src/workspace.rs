use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use genesift_core::models::ReferenceDictionary;

use crate::errors::QuantResult;

///
/// Per-invocation scratch directory. Everything inside is removed when the
/// workspace is dropped, on success and on every error path. Removal is
/// best-effort: a directory that is already gone is not an error.
///
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    prefix: String,
}

impl Workspace {
    ///
    /// Create a fresh scratch directory inside `parent`.
    ///
    /// # Arguments
    /// - parent: directory to create the workspace in (created if missing)
    /// - prefix: file name prefix for files created in the workspace
    pub fn new_in<P: AsRef<Path>>(parent: P, prefix: &str) -> QuantResult<Self> {
        let parent = parent.as_ref();
        fs::create_dir_all(parent)?;

        let dir = tempfile::Builder::new()
            .prefix(".genesift-tmp-")
            .tempdir_in(parent)?;

        Ok(Workspace {
            dir,
            prefix: prefix.to_string(),
        })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path for a scratch file named `<prefix>.<suffix>`.
    pub fn path(&self, suffix: &str) -> PathBuf {
        self.dir.path().join(format!("{}.{}", self.prefix, suffix))
    }

    ///
    /// Write the two column genome file (`name\tlength`) for `dictionary`
    /// and return it together with the dictionary.
    ///
    pub fn write_genome(&self, dictionary: ReferenceDictionary) -> QuantResult<GenomeOrder> {
        let file = self.path("genome");
        fs::write(&file, dictionary.to_genome_file_string())?;
        Ok(GenomeOrder { dictionary, file })
    }

    ///
    /// Remove the workspace now instead of at drop.
    ///
    pub fn close(self) {
        if let Err(e) = self.dir.close() {
            log::debug!("Could not remove temporary directory: {}", e);
        }
    }
}

///
/// Canonical chromosome order of an alignment file, both in memory and as a
/// genome file on disk for tools that take `-g`.
///
#[derive(Debug, Clone)]
pub struct GenomeOrder {
    pub dictionary: ReferenceDictionary,
    pub file: PathBuf,
}
