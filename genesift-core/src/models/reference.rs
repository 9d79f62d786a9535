use std::collections::HashMap;

use crate::errors::CoreError;

///
/// One `@SQ` entry of an alignment header.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSequence {
    pub name: String,
    pub length: u64,
}

///
/// Reference sequence dictionary of an alignment file. The order of
/// `sequences` is the canonical chromosome order of that file.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceDictionary {
    sequences: Vec<ReferenceSequence>,
    ranks: HashMap<String, usize>,
}

impl ReferenceDictionary {
    pub fn new(sequences: Vec<ReferenceSequence>) -> Self {
        let ranks = sequences
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();

        ReferenceDictionary { sequences, ranks }
    }

    ///
    /// Build the dictionary from the text of a SAM header, keeping the `SN`
    /// and `LN` tags of every `@SQ` line in file order.
    ///
    /// # Arguments
    /// - header: SAM header text, e.g. the output of `samtools view -H`
    pub fn from_sam_header(header: &str) -> Result<Self, CoreError> {
        let mut sequences = Vec::new();

        for line in header.lines().filter(|l| l.starts_with("@SQ")) {
            let mut name = None;
            let mut length = None;

            for field in line.split('\t').skip(1) {
                if let Some(sn) = field.strip_prefix("SN:") {
                    name = Some(sn.to_string());
                } else if let Some(ln) = field.strip_prefix("LN:") {
                    length = Some(ln.parse::<u64>().map_err(|_| {
                        CoreError::IntervalParseError(format!("invalid @SQ length: {line}"))
                    })?);
                }
            }

            match (name, length) {
                (Some(name), Some(length)) => sequences.push(ReferenceSequence { name, length }),
                _ => {
                    return Err(CoreError::IntervalParseError(format!(
                        "@SQ line without SN or LN: {line}"
                    )));
                }
            }
        }

        Ok(ReferenceDictionary::new(sequences))
    }

    /// Position of `chr` in the canonical order.
    pub fn rank(&self, chr: &str) -> Option<usize> {
        self.ranks.get(chr).copied()
    }

    pub fn sequences(&self) -> &[ReferenceSequence] {
        &self.sequences
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    ///
    /// Render as a two column genome file (`name\tlength`), the format
    /// interval tools take for `-g`.
    ///
    pub fn to_genome_file_string(&self) -> String {
        self.sequences
            .iter()
            .map(|s| format!("{}\t{}\n", s.name, s.length))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const HEADER: &str = "@HD\tVN:1.6\tSO:coordinate\n\
                          @SQ\tSN:chr2\tLN:2000\n\
                          @SQ\tSN:chr10\tLN:1000\n\
                          @SQ\tSN:chr1\tLN:3000\n\
                          @PG\tID:bwa\n";

    #[rstest]
    fn test_order_follows_header_not_lexicographic() {
        let dict = ReferenceDictionary::from_sam_header(HEADER).unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.rank("chr2"), Some(0));
        assert_eq!(dict.rank("chr10"), Some(1));
        assert_eq!(dict.rank("chr1"), Some(2));
        assert_eq!(dict.rank("chrX"), None);
    }

    #[rstest]
    fn test_genome_file_string() {
        let dict = ReferenceDictionary::from_sam_header(HEADER).unwrap();
        assert_eq!(
            dict.to_genome_file_string(),
            "chr2\t2000\nchr10\t1000\nchr1\t3000\n"
        );
    }

    #[rstest]
    fn test_rejects_sq_without_length() {
        assert!(ReferenceDictionary::from_sam_header("@SQ\tSN:chr1\n").is_err());
    }
}
