use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use genesift_quant::normalize_count_file;

use crate::count::handlers::report_table;

pub fn run_normalize(matches: &ArgMatches) -> Result<()> {
    let counts = matches
        .get_one::<String>("counts")
        .expect("--counts is required");
    let total = *matches
        .get_one::<u64>("total-reads")
        .expect("--total-reads is required");
    let output = matches
        .get_one::<String>("output")
        .expect("--output is required");

    let table = normalize_count_file(Path::new(counts), total, Path::new(output))
        .with_context(|| format!("Failed to normalize {counts}"))?;

    info!("Wrote {} intervals to {}", table.rows.len(), output);
    report_table(counts, &table);

    Ok(())
}
