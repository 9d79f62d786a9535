use std::path::Path;

use genesift_core::models::ExpressionRecord;
use genesift_core::utils::get_dynamic_reader;

use crate::error::{GeneSiftIoError, Result};

pub const GENE_COLUMN: &str = "gene";
pub const BASE_MEAN_COLUMN: &str = "baseMean";

/// Missing-value markers written by R/DESeq2 and pandas.
const MISSING_VALUES: [&str; 4] = ["", "NA", "NaN", "nan"];

fn parse_base_mean(value: &str) -> Option<f64> {
    let value = value.trim();
    if MISSING_VALUES.contains(&value) {
        return Some(f64::NAN);
    }
    value.parse::<f64>().ok()
}

///
/// Read a headered, comma separated differential expression table.
///
/// The table must contain a `gene` and a `baseMean` column; every other
/// column is ignored. Rows are returned in file order, duplicates included.
/// Missing baseMean values (`NA`, empty) are read as `NaN`.
///
/// # Arguments
/// - path: path to the table (plain or `.gz`)
pub fn read_dea_table<T: AsRef<Path>>(path: T) -> Result<Vec<ExpressionRecord>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    let csv_err = |source: csv::Error| GeneSiftIoError::Csv {
        path: path_str.clone(),
        source,
    };

    let reader = get_dynamic_reader(path)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_err)?.clone();
    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| GeneSiftIoError::MissingColumn {
                column: name.to_string(),
                path: path_str.clone(),
            })
    };
    let gene_idx = column_index(GENE_COLUMN)?;
    let base_mean_idx = column_index(BASE_MEAN_COLUMN)?;

    let mut records = Vec::new();
    for (i, row) in csv_reader.records().enumerate() {
        let row = row.map_err(csv_err)?;
        let gene = row.get(gene_idx).unwrap_or_default();
        let raw_value = row.get(base_mean_idx).unwrap_or_default();

        let base_mean = parse_base_mean(raw_value).ok_or_else(|| GeneSiftIoError::InvalidValue {
            path: path_str.clone(),
            column: BASE_MEAN_COLUMN.to_string(),
            row: i + 1,
            value: raw_value.to_string(),
        })?;

        records.push(ExpressionRecord::new(gene, base_mean));
    }

    Ok(records)
}
