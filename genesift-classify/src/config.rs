use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use genesift_core::consts::{DEFAULT_BIOTYPE, DEFAULT_EXPRESSION_THRESHOLD};

use crate::errors::ClassifyError;

///
/// Which target lists define "target" status.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetDefinition {
    /// Only the second target list defines targets.
    #[default]
    List2Only,
    /// Union of both target lists.
    Union,
}

impl FromStr for TargetDefinition {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "list2_only" | "list2" => Ok(TargetDefinition::List2Only),
            "union" => Ok(TargetDefinition::Union),
            _ => Err(ClassifyError::InvalidConfig(format!(
                "unknown target definition `{s}` (expected `list2_only` or `union`)"
            ))),
        }
    }
}

fn default_threshold() -> f64 {
    DEFAULT_EXPRESSION_THRESHOLD
}

fn default_biotypes() -> Vec<String> {
    vec![DEFAULT_BIOTYPE.to_string()]
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ClassifyConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_biotypes")]
    pub biotypes: Vec<String>,
    #[serde(default)]
    pub target_definition: TargetDefinition,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        ClassifyConfig {
            threshold: default_threshold(),
            biotypes: default_biotypes(),
            target_definition: TargetDefinition::default(),
        }
    }
}

impl ClassifyConfig {
    pub fn biotype_set(&self) -> HashSet<String> {
        self.biotypes.iter().cloned().collect()
    }

    ///
    /// Check values that deserialize fine but make no sense.
    ///
    pub fn validate(&self) -> Result<(), ClassifyError> {
        if !self.threshold.is_finite() {
            return Err(ClassifyError::InvalidConfig(format!(
                "threshold must be a finite number, got {}",
                self.threshold
            )));
        }
        if self.biotypes.is_empty() {
            return Err(ClassifyError::InvalidConfig(
                "at least one biotype is required".to_string(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<&Path> for ClassifyConfig {
    type Error = ClassifyError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: ClassifyConfig = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
