use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use genesift_core::models::Gene;
use genesift_core::utils::get_dynamic_reader;

use crate::error::Result;

///
/// Read a headerless, single column gene list. Order and duplicates are kept;
/// blank lines are skipped.
///
/// # Arguments
/// - path: path to the list (plain or `.gz`)
pub fn read_gene_list<T: AsRef<Path>>(path: T) -> Result<Vec<Gene>> {
    let reader = get_dynamic_reader(path.as_ref())?;

    let mut genes = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let gene = line.trim();
        if gene.is_empty() {
            continue;
        }
        genes.push(gene.to_string());
    }

    Ok(genes)
}

///
/// Write genes as a headerless single column file, one symbol per line.
/// Parent directories are created as needed.
///
/// # Arguments
/// - path: the path to the file to dump to
/// - genes: genes in the order they should be written
pub fn write_gene_list<T, I, S>(path: T, genes: I) -> Result<()>
where
    T: AsRef<Path>,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for gene in genes {
        writeln!(writer, "{}", gene.as_ref())?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/genes")
            .join(file_name)
    }

    #[rstest]
    fn test_read_gene_list_keeps_order_and_duplicates() {
        let genes = read_gene_list(get_test_path("targets1.csv")).unwrap();
        assert_eq!(genes, vec!["Bdnf", "Mecp2", "Gapdh", "Mecp2", "Xist"]);
    }

    #[rstest]
    fn test_round_trip() {
        let genes = vec!["Zfp1", "Actb", "Actb", "Sox2"];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("genes.csv");

        write_gene_list(&path, &genes).unwrap();
        let read_back = read_gene_list(&path).unwrap();

        assert_eq!(read_back, genes);
    }

    #[rstest]
    fn test_empty_list_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_gene_list(&path, Vec::<String>::new()).unwrap();

        assert!(read_gene_list(&path).unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[rstest]
    fn test_missing_file_is_error() {
        assert!(read_gene_list(get_test_path("nope.csv")).is_err());
    }
}
