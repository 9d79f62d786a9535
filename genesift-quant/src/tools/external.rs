use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use genesift_core::models::{RawCount, ReferenceDictionary};
use genesift_io::read_count_table;

use super::{IntervalTools, MAPPED_READS_EXCLUDE_FLAGS};
use crate::errors::{QuantError, QuantResult};
use crate::workspace::{GenomeOrder, Workspace};

///
/// `samtools` and `bedtools` run as blocking subprocesses. Any non-zero exit
/// aborts with [QuantError::ToolFailed].
///
#[derive(Debug, Clone)]
pub struct ExternalTools {
    pub samtools: PathBuf,
    pub bedtools: PathBuf,
    pub threads: usize,
}

impl Default for ExternalTools {
    fn default() -> Self {
        ExternalTools {
            samtools: PathBuf::from("samtools"),
            bedtools: PathBuf::from("bedtools"),
            threads: 1,
        }
    }
}

fn describe(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

///
/// Run `cmd` to completion. Stdout is captured unless the caller redirected
/// it; stderr is always captured for the error message.
fn run(cmd: &mut Command) -> QuantResult<Output> {
    let command = describe(cmd);
    log::debug!("Running: {}", command);

    let output = cmd.stderr(Stdio::piped()).output().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            QuantError::ToolNotFound {
                tool: cmd.get_program().to_string_lossy().to_string(),
                source: e,
            }
        } else {
            QuantError::Io(e)
        }
    })?;

    if !output.status.success() {
        return Err(QuantError::ToolFailed {
            command,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

///
/// Run `cmd` with stdout written to `destination`.
fn run_to_file(cmd: &mut Command, destination: &Path) -> QuantResult<()> {
    let file = File::create(destination)?;
    run(cmd.stdout(Stdio::from(file)))?;
    Ok(())
}

impl ExternalTools {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    fn samtools(&self) -> Command {
        Command::new(&self.samtools)
    }

    fn bedtools(&self) -> Command {
        Command::new(&self.bedtools)
    }
}

impl IntervalTools for ExternalTools {
    fn total_mapped_reads(&self, alignment: &Path) -> QuantResult<u64> {
        let mut cmd = self.samtools();
        cmd.arg("view")
            .arg("-c")
            .arg("-F")
            .arg(MAPPED_READS_EXCLUDE_FLAGS.to_string())
            .arg("-@")
            .arg(self.threads.to_string())
            .arg(alignment);

        let output = run(&mut cmd)?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .trim()
            .parse::<u64>()
            .map_err(|_| QuantError::UnexpectedToolOutput {
                command: describe(&cmd),
                output: stdout.trim().to_string(),
            })
    }

    fn reference_dictionary(&self, alignment: &Path) -> QuantResult<ReferenceDictionary> {
        let mut cmd = self.samtools();
        cmd.arg("view").arg("-H").arg(alignment);

        let output = run(&mut cmd)?;
        let header = String::from_utf8_lossy(&output.stdout);
        Ok(ReferenceDictionary::from_sam_header(&header)?)
    }

    fn sort_intervals(
        &self,
        intervals: &Path,
        genome: &GenomeOrder,
        workspace: &Workspace,
    ) -> QuantResult<PathBuf> {
        let sorted = workspace.path("sorted.tmp");
        let mut cmd = self.bedtools();
        cmd.arg("sort")
            .arg("-g")
            .arg(&genome.file)
            .arg("-i")
            .arg(intervals);

        run_to_file(&mut cmd, &sorted)?;
        Ok(sorted)
    }

    fn coverage_counts(
        &self,
        sorted_intervals: &Path,
        alignment: &Path,
        genome: &GenomeOrder,
        workspace: &Workspace,
    ) -> QuantResult<Vec<RawCount>> {
        let counts = workspace.path("counts.tmp");
        let mut cmd = self.bedtools();
        cmd.arg("coverage")
            .arg("-a")
            .arg(sorted_intervals)
            .arg("-b")
            .arg(alignment)
            .arg("-sorted")
            .arg("-g")
            .arg(&genome.file)
            .arg("-counts");

        run_to_file(&mut cmd, &counts)?;
        Ok(read_count_table(&counts)?)
    }
}
