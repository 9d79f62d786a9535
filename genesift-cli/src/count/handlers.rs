use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use log::{info, warn};

use genesift_quant::{Backend, CountOptions, NormalizedTable, count_overlaps};

///
/// Log QC warnings and the table means the way both `count` and
/// `normalize` report them.
pub fn report_table(label: &str, table: &NormalizedTable) {
    for warning in &table.qc.warnings {
        warn!("[{label}] {warning}");
    }
    info!("[{label}] Mean raw_count: {:.4}", table.mean_raw_count());
    info!("[{label}] Mean count: {:.4}", table.mean_count());
}

pub fn run_count(matches: &ArgMatches) -> Result<()> {
    let peaks = matches
        .get_one::<String>("peaks")
        .expect("--peaks is required");
    let bam = matches
        .get_one::<String>("bam")
        .expect("--bam is required");
    let output = matches
        .get_one::<String>("output")
        .expect("--output is required");
    let sample_name = matches
        .get_one::<String>("sample-name")
        .expect("--sample-name is required");
    let threads = *matches.get_one::<usize>("threads").unwrap_or(&1);
    let backend = matches
        .get_one::<String>("backend")
        .map(|b| b.parse::<Backend>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();

    info!("[{sample_name}] Using {backend:?} backend");

    let tools = backend.tools(threads);
    let report = count_overlaps(
        tools.as_ref(),
        Path::new(peaks),
        Path::new(bam),
        Path::new(output),
        &CountOptions::new(sample_name.as_str()),
    )
    .with_context(|| format!("Read counting failed for sample {sample_name}"))?;

    report_table(&report.sample_name, &report.table);

    Ok(())
}
