use std::collections::HashSet;

/// A gene symbol. Genes are identified by symbol only.
pub type Gene = String;

/// A set of gene symbols, e.g. every protein coding gene of an assembly.
pub type GeneUniverse = HashSet<Gene>;

/// An ordered list of genes read verbatim from disk. Order and duplicates
/// are kept so the list can be written back unchanged.
pub type TargetList = Vec<Gene>;

///
/// One row of a differential expression table.
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpressionRecord {
    pub gene: Gene,
    pub base_mean: f64,
}

impl ExpressionRecord {
    pub fn new(gene: impl Into<Gene>, base_mean: f64) -> Self {
        ExpressionRecord {
            gene: gene.into(),
            base_mean,
        }
    }

    /// Strictly greater than; `NaN` never passes.
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.base_mean > threshold
    }
}
