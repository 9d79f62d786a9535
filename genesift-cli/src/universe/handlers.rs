use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use genesift_classify::extract_genes;
use genesift_core::consts::DEFAULT_BIOTYPE;
use genesift_io::write_gene_list;

pub fn run_universe(matches: &ArgMatches) -> Result<()> {
    let gtf = matches
        .get_one::<String>("gtf")
        .expect("--gtf is required");
    let output = matches
        .get_one::<String>("output")
        .expect("--output is required");

    let biotypes: HashSet<String> = match matches.get_many::<String>("biotype") {
        Some(values) => values.cloned().collect(),
        None => HashSet::from([DEFAULT_BIOTYPE.to_string()]),
    };

    let universe = extract_genes(Path::new(gtf), &biotypes)
        .with_context(|| format!("Failed to extract genes from {gtf}"))?;

    let mut genes: Vec<&String> = universe.iter().collect();
    genes.sort();
    write_gene_list(output, genes).with_context(|| format!("Failed to write {output}"))?;

    info!("Wrote {} genes to {}", universe.len(), output);

    Ok(())
}
