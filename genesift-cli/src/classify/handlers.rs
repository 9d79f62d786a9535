use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use genesift_classify::{
    ClassificationInputs, ClassificationSummary, ClassifyConfig, TargetDefinition, classify_files,
};

///
/// Build the classification settings: the config file if given, otherwise
/// defaults, with any command line flag taking precedence.
///
pub fn resolve_config(matches: &ArgMatches) -> Result<ClassifyConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ClassifyConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config file {path}"))?,
        None => ClassifyConfig::default(),
    };

    if let Some(threshold) = matches.get_one::<f64>("threshold") {
        config.threshold = *threshold;
    }

    if let Some(biotypes) = matches.get_many::<String>("biotype") {
        config.biotypes = biotypes.cloned().collect();
    }

    if let Some(definition) = matches.get_one::<String>("target-definition") {
        config.target_definition = definition.parse::<TargetDefinition>()?;
    }

    config.validate()?;
    Ok(config)
}

/// Log every line of the summary at info level.
pub fn report_summary(summary: &ClassificationSummary) {
    for line in summary.to_string().lines() {
        info!("{line}");
    }
}

pub fn run_classify(matches: &ArgMatches) -> Result<()> {
    let path_arg = |name: &str| -> PathBuf {
        matches
            .get_one::<String>(name)
            .map(PathBuf::from)
            .unwrap_or_default()
    };

    let inputs = ClassificationInputs {
        dea: path_arg("dea"),
        targets1: path_arg("targets1"),
        targets2: path_arg("targets2"),
        annotation: path_arg("gtf"),
    };
    let output = path_arg("output");
    let config = resolve_config(matches)?;

    info!(
        "Classifying with threshold {} and biotypes {:?} ({:?})",
        config.threshold, config.biotypes, config.target_definition
    );

    let classification = classify_files(&inputs, &config).context("Classification failed")?;
    let outputs = classification
        .write_outputs(&output)
        .with_context(|| format!("Failed to write gene lists to {}", output.display()))?;

    info!("Wrote gene lists to {}", output.display());
    info!(
        "High expression target lists: {}, {}",
        outputs.high_expression_targets1.display(),
        outputs.high_expression_targets2.display()
    );

    report_summary(&classification.summary());

    Ok(())
}
