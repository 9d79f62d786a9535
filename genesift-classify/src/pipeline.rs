use std::path::PathBuf;

use genesift_io::{read_dea_table, read_gene_list};

use crate::annotation::extract_genes;
use crate::classify::{Classification, classify};
use crate::config::ClassifyConfig;
use crate::errors::ClassifyResult;

///
/// Input files of one classification run.
///
#[derive(Debug, Clone)]
pub struct ClassificationInputs {
    pub dea: PathBuf,
    pub targets1: PathBuf,
    pub targets2: PathBuf,
    pub annotation: PathBuf,
}

///
/// Load every input, then classify. All inputs are read before anything is
/// computed, so a missing file fails the run before any output exists.
///
pub fn classify_files(
    inputs: &ClassificationInputs,
    config: &ClassifyConfig,
) -> ClassifyResult<Classification> {
    config.validate()?;

    let dea = read_dea_table(&inputs.dea)?;
    let targets1 = read_gene_list(&inputs.targets1)?;
    let targets2 = read_gene_list(&inputs.targets2)?;
    let universe = extract_genes(&inputs.annotation, &config.biotype_set())?;

    Ok(classify(
        &dea,
        &targets1,
        &targets2,
        &universe,
        config.threshold,
        config.target_definition,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::fs::File;
    use std::io::Write;
    use std::path::Path;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn data_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data/genes")
            .join(file_name)
    }

    fn write_annotation(dir: &Path, names: &[&str]) -> PathBuf {
        let path = dir.join("gencode.annotation.gtf.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        for name in names {
            writeln!(
                encoder,
                "chr1\tHAVANA\tgene\t1\t10\t.\t+\t.\tgene_type \"protein_coding\"; gene_name \"{name}\";"
            )
            .unwrap();
        }
        encoder.finish().unwrap();
        path
    }

    #[rstest]
    fn test_classify_files() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = ClassificationInputs {
            dea: data_path("DEA_NSC.csv"),
            targets1: data_path("targets1.csv"),
            targets2: data_path("targets2.csv"),
            annotation: write_annotation(dir.path(), &["Mecp2", "Bdnf", "Gapdh", "Tbp"]),
        };

        let result = classify_files(&inputs, &ClassifyConfig::default()).unwrap();

        // Srf sits exactly on the threshold and is excluded
        assert_eq!(result.filtered_targets2, vec!["Mecp2"]);
        assert_eq!(result.filtered_targets1, vec!["Bdnf", "Mecp2", "Mecp2"]);
        assert_eq!(
            result.all_no_targets_genome,
            HashSet::from(["Bdnf".to_string(), "Gapdh".to_string(), "Tbp".to_string()])
        );
        assert_eq!(
            result.high_expression_no_targets,
            HashSet::from(["Bdnf".to_string(), "Actb".to_string()])
        );
    }

    #[rstest]
    fn test_missing_target_list_fails() {
        let dir = tempfile::tempdir().unwrap();
        let inputs = ClassificationInputs {
            dea: data_path("DEA_NSC.csv"),
            targets1: data_path("does_not_exist.csv"),
            targets2: data_path("targets2.csv"),
            annotation: write_annotation(dir.path(), &["Mecp2"]),
        };

        assert!(classify_files(&inputs, &ClassifyConfig::default()).is_err());
    }
}
