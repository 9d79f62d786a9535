pub const ALL_TARGETS1_FILE: &str = "all_targets1.csv";
pub const ALL_TARGETS2_FILE: &str = "all_targets2.csv";
pub const NO_TARGETS_FILE: &str = "no_targets_final.csv";
pub const NO_TARGETS_GENOME_FILE: &str = "all_no_targets_mm10.csv";
pub const ALL_TARGETS_FINAL_FILE: &str = "all_targets_final.csv";

pub const HIGH_EXPRESSION_TARGETS1_PREFIX: &str = "high_expression_targets1";
pub const HIGH_EXPRESSION_TARGETS2_PREFIX: &str = "high_expression_targets2";
pub const HIGH_EXPRESSION_NO_TARGETS_PREFIX: &str = "high_expression_no_targets";
