use std::collections::{HashMap, HashSet};
use std::io::BufRead;
use std::path::Path;

use genesift_core::models::GeneUniverse;
use genesift_core::utils::get_gzip_reader;

use crate::errors::{ClassifyError, ClassifyResult};

const GENE_FEATURE: &str = "gene";
const GENE_TYPE_KEY: &str = "gene_type";
const GENE_BIOTYPE_KEY: &str = "gene_biotype";
const GENE_NAME_KEY: &str = "gene_name";

///
/// Parse the attribute column of a GTF line (`key "value"; key "value";`)
/// into a key -> value map. Segments without a `<space>"` separator are
/// skipped. Later duplicate keys win.
///
pub fn parse_gtf_attributes(attributes: &str) -> HashMap<&str, &str> {
    attributes
        .split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| segment.split_once(" \""))
        .map(|(key, value)| (key.trim(), value.trim_matches('"')))
        .collect()
}

///
/// Collect the names of every `gene` feature of a gzip compressed GTF whose
/// biotype is in `allowed_biotypes` and whose `gene_name` is not empty.
///
/// The biotype is read from `gene_type` (GENCODE), falling back to
/// `gene_biotype` (Ensembl). The file is streamed line by line.
///
/// # Arguments
/// - path: path to the gzip compressed annotation
/// - allowed_biotypes: biotypes to keep, e.g. `protein_coding`
pub fn extract_genes<P: AsRef<Path>>(
    path: P,
    allowed_biotypes: &HashSet<String>,
) -> ClassifyResult<GeneUniverse> {
    let path = path.as_ref();
    let reader = get_gzip_reader(path)?;

    let mut genes = GeneUniverse::new();

    for line in reader.lines() {
        let line = line.map_err(|source| ClassifyError::AnnotationRead {
            path: path.display().to_string(),
            source,
        })?;

        if line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.trim_end().split('\t').collect();
        if fields.len() < 9 || fields[2] != GENE_FEATURE {
            continue;
        }

        let attributes = parse_gtf_attributes(fields[8]);

        let biotype = attributes
            .get(GENE_TYPE_KEY)
            .or_else(|| attributes.get(GENE_BIOTYPE_KEY))
            .copied()
            .unwrap_or_default();
        let name = attributes.get(GENE_NAME_KEY).copied().unwrap_or_default();

        if allowed_biotypes.contains(biotype) && !name.is_empty() {
            genes.insert(name.to_string());
        }
    }

    Ok(genes)
}
