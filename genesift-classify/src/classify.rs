use std::collections::HashSet;
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use genesift_core::models::{ExpressionRecord, Gene, GeneUniverse};
use genesift_io::write_gene_list;

use crate::config::TargetDefinition;
use crate::consts::*;
use crate::errors::ClassifyResult;

///
/// Genes with at least one expression row strictly above `threshold`.
/// Rows with a `NaN` baseMean never pass.
///
pub fn high_expression_genes(dea: &[ExpressionRecord], threshold: f64) -> HashSet<Gene> {
    dea.iter()
        .filter(|record| record.exceeds(threshold))
        .map(|record| record.gene.clone())
        .collect()
}

///
/// Keep the entries of `list` that are in `keep`, preserving order and
/// duplicates of `list`.
///
pub fn retain_members(list: &[Gene], keep: &HashSet<Gene>) -> Vec<Gene> {
    list.iter().filter(|g| keep.contains(*g)).cloned().collect()
}

fn sorted(set: &HashSet<Gene>) -> Vec<&Gene> {
    let mut genes: Vec<&Gene> = set.iter().collect();
    genes.sort_unstable();
    genes
}

///
/// Format a threshold the way it appears in output file names: shortest
/// round-trip digits with a fractional part (`100.0`, `50.5`), and a signed
/// two-digit exponent outside `[1e-4, 1e16)` (`1e+16`, `1.5e-07`).
///
pub fn format_threshold(threshold: f64) -> String {
    let repr = format!("{:?}", threshold);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}

///
/// Result of classifying genes against target lists and an expression
/// threshold. Sets are unordered; lists keep the order of their input.
///
#[derive(Debug, Clone)]
pub struct Classification {
    pub threshold: f64,
    pub target_definition: TargetDefinition,
    pub targets1: Vec<Gene>,
    pub targets2: Vec<Gene>,
    pub universe_size: usize,
    pub all_targets: HashSet<Gene>,
    pub all_genes: HashSet<Gene>,
    pub all_no_targets: HashSet<Gene>,
    pub all_no_targets_genome: HashSet<Gene>,
    pub high_expression_genes: HashSet<Gene>,
    pub high_expression_no_targets: HashSet<Gene>,
    pub filtered_targets1: Vec<Gene>,
    pub filtered_targets2: Vec<Gene>,
}

///
/// Partition genes into targets and non-targets and filter both target
/// lists by expression.
///
/// # Arguments
/// - dea: differential expression rows (gene, baseMean)
/// - targets1: first target list
/// - targets2: second target list
/// - universe: every gene of the genome annotation
/// - threshold: baseMean must be strictly greater than this
/// - target_definition: which lists define target status
pub fn classify(
    dea: &[ExpressionRecord],
    targets1: &[Gene],
    targets2: &[Gene],
    universe: &GeneUniverse,
    threshold: f64,
    target_definition: TargetDefinition,
) -> Classification {
    let all_targets: HashSet<Gene> = match target_definition {
        TargetDefinition::List2Only => targets2.iter().cloned().collect(),
        TargetDefinition::Union => targets1.iter().chain(targets2).cloned().collect(),
    };

    let all_genes: HashSet<Gene> = dea.iter().map(|r| r.gene.clone()).collect();

    let all_no_targets_genome: HashSet<Gene> = universe.difference(&all_targets).cloned().collect();
    let all_no_targets: HashSet<Gene> = all_genes.difference(&all_targets).cloned().collect();

    let high_expression_genes = high_expression_genes(dea, threshold);
    let high_expression_no_targets: HashSet<Gene> = high_expression_genes
        .difference(&all_targets)
        .cloned()
        .collect();

    let filtered_targets1 = retain_members(targets1, &high_expression_genes);
    let filtered_targets2 = retain_members(targets2, &high_expression_genes);

    Classification {
        threshold,
        target_definition,
        targets1: targets1.to_vec(),
        targets2: targets2.to_vec(),
        universe_size: universe.len(),
        all_targets,
        all_genes,
        all_no_targets,
        all_no_targets_genome,
        high_expression_genes,
        high_expression_no_targets,
        filtered_targets1,
        filtered_targets2,
    }
}

///
/// Paths of the files written by [Classification::write_outputs].
///
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationOutputs {
    pub all_targets1: PathBuf,
    pub all_targets2: PathBuf,
    pub no_targets: PathBuf,
    pub no_targets_genome: PathBuf,
    pub all_targets_final: PathBuf,
    pub high_expression_targets1: PathBuf,
    pub high_expression_targets2: PathBuf,
    pub high_expression_no_targets: PathBuf,
}

impl ClassificationOutputs {
    pub fn new(dir: &Path, threshold: f64) -> Self {
        let t = format_threshold(threshold);
        ClassificationOutputs {
            all_targets1: dir.join(ALL_TARGETS1_FILE),
            all_targets2: dir.join(ALL_TARGETS2_FILE),
            no_targets: dir.join(NO_TARGETS_FILE),
            no_targets_genome: dir.join(NO_TARGETS_GENOME_FILE),
            all_targets_final: dir.join(ALL_TARGETS_FINAL_FILE),
            high_expression_targets1: dir.join(format!("{HIGH_EXPRESSION_TARGETS1_PREFIX}_{t}.csv")),
            high_expression_targets2: dir.join(format!("{HIGH_EXPRESSION_TARGETS2_PREFIX}_{t}.csv")),
            high_expression_no_targets: dir
                .join(format!("{HIGH_EXPRESSION_NO_TARGETS_PREFIX}_{t}.csv")),
        }
    }
}

impl Classification {
    ///
    /// Write every list as a headerless single column file into `dir`.
    /// Target lists keep their input order; set-derived lists are sorted by
    /// gene symbol so reruns produce identical files.
    ///
    pub fn write_outputs<P: AsRef<Path>>(&self, dir: P) -> ClassifyResult<ClassificationOutputs> {
        let outputs = ClassificationOutputs::new(dir.as_ref(), self.threshold);

        write_gene_list(&outputs.all_targets1, &self.targets1)?;
        write_gene_list(&outputs.all_targets2, &self.targets2)?;
        write_gene_list(&outputs.no_targets, sorted(&self.all_no_targets))?;
        write_gene_list(&outputs.no_targets_genome, sorted(&self.all_no_targets_genome))?;
        write_gene_list(&outputs.all_targets_final, sorted(&self.all_targets))?;

        write_gene_list(&outputs.high_expression_targets1, &self.filtered_targets1)?;
        write_gene_list(&outputs.high_expression_targets2, &self.filtered_targets2)?;
        write_gene_list(
            &outputs.high_expression_no_targets,
            sorted(&self.high_expression_no_targets),
        )?;

        Ok(outputs)
    }

    pub fn summary(&self) -> ClassificationSummary {
        ClassificationSummary {
            threshold: self.threshold,
            targets1: self.targets1.len(),
            targets2: self.targets2.len(),
            all_targets: self.all_targets.len(),
            no_targets: self.all_no_targets.len(),
            filtered_targets1: self.filtered_targets1.len(),
            filtered_targets2: self.filtered_targets2.len(),
            high_expression_no_targets: self.high_expression_no_targets.len(),
            genome_genes: self.universe_size,
            genome_no_targets: self.all_no_targets_genome.len(),
        }
    }
}

///
/// Sizes of every classified set, for diagnostics.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationSummary {
    pub threshold: f64,
    pub targets1: usize,
    pub targets2: usize,
    pub all_targets: usize,
    pub no_targets: usize,
    pub filtered_targets1: usize,
    pub filtered_targets2: usize,
    pub high_expression_no_targets: usize,
    pub genome_genes: usize,
    pub genome_no_targets: usize,
}

impl Display for ClassificationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Unfiltered statistics:")?;
        writeln!(f, "  Total number of targets in list 1: {}", self.targets1)?;
        writeln!(f, "  Total number of targets in list 2: {}", self.targets2)?;
        writeln!(f, "  Total number of distinct targets: {}", self.all_targets)?;
        writeln!(f, "  Total number of non-target genes: {}", self.no_targets)?;
        writeln!(
            f,
            "Filtered statistics (baseMean threshold: {}):",
            format_threshold(self.threshold)
        )?;
        writeln!(f, "  Number of targets in list 1: {}", self.filtered_targets1)?;
        writeln!(f, "  Number of targets in list 2: {}", self.filtered_targets2)?;
        writeln!(
            f,
            "  Number of highly expressed non-target genes: {}",
            self.high_expression_no_targets
        )?;
        writeln!(f, "Genome statistics:")?;
        writeln!(f, "  Total number of genes in genome: {}", self.genome_genes)?;
        write!(
            f,
            "  Total number of non-target genes from genome: {}",
            self.genome_no_targets
        )
    }
}
