//! CSV-backed adapters and the column-selecting loader they share.
//!
//! Datasets are read once, up front. Required columns are located by header
//! name, so column order in the file does not matter and extra columns are
//! ignored. Cells that are not valid UTF-8 are decoded as Latin-1, which is
//! how the GTD export is encoded.

mod climate;
mod terrorism;

pub use climate::{ClimateAdapter, ClimateRecord};
pub use terrorism::{TerrorismAdapter, TerrorismRecord, TerrorismSummary};

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::DatasetError;

/// One data row, holding only the requested columns in request order.
pub(crate) type Row = Vec<String>;

/// Opens `path` for reading, tagging failures with the dataset name.
pub(crate) fn open_dataset(dataset: &'static str, path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|source| DatasetError::Io {
        dataset,
        path: path.to_path_buf(),
        source,
    })
}

/// Reads every row of a headed CSV, keeping only `columns`.
///
/// # Errors
///
/// Returns [`DatasetError::MissingColumn`] if a required header is absent and
/// [`DatasetError::Csv`] on malformed CSV.
pub(crate) fn load_rows<R: Read>(
    dataset: &'static str,
    reader: R,
    columns: &[&'static str],
) -> Result<Vec<Row>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(|source| DatasetError::Csv { dataset, source })?
        .iter()
        .map(|h| decode_cell(h).trim().to_string())
        .collect();

    let indices = columns
        .iter()
        .map(|&column| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or(DatasetError::MissingColumn { dataset, column })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|source| DatasetError::Csv { dataset, source })?;
        rows.push(
            indices
                .iter()
                .map(|&idx| record.get(idx).map(decode_cell).unwrap_or_default())
                .collect(),
        );
    }

    tracing::debug!(dataset, rows = rows.len(), "loaded dataset");
    Ok(rows)
}

fn decode_cell(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_owned(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Canonical form used for case-insensitive entity matching.
pub(crate) fn match_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Parses a numeric cell. Empty and non-numeric cells are `None`.
pub(crate) fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a year cell, accepting integral floats such as `"2021.0"`.
pub(crate) fn parse_year(cell: &str) -> Option<i32> {
    let trimmed = cell.trim();
    trimmed.parse::<i32>().ok().or_else(|| {
        parse_number(trimmed)
            .filter(|v| v.fract() == 0.0 && *v >= f64::from(i32::MIN) && *v <= f64::from(i32::MAX))
            .map(|v| {
                #[allow(clippy::cast_possible_truncation)]
                let year = v as i32;
                year
            })
    })
}

/// Returns the trimmed cell, or `None` if it is blank.
pub(crate) fn non_blank(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_rows_selects_columns_by_name() {
        let csv = "b,extra,a\n2,x,1\n4,y,3\n";
        let rows = load_rows("test", csv.as_bytes(), &["a", "b"]).unwrap();
        assert_eq!(rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn load_rows_reports_missing_column() {
        let csv = "a,b\n1,2\n";
        let err = load_rows("test", csv.as_bytes(), &["a", "c"]).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingColumn { column: "c", .. }
        ));
    }

    #[test]
    fn load_rows_rejects_ragged_rows() {
        let csv = "a,b\n1,2\n3\n";
        let err = load_rows("test", csv.as_bytes(), &["a"]).unwrap_err();
        assert!(matches!(err, DatasetError::Csv { .. }));
    }

    #[test]
    fn load_rows_decodes_latin1_cells() {
        let mut csv = b"country\n".to_vec();
        csv.extend_from_slice(b"C\xf4te d'Ivoire\n");
        let rows = load_rows("test", csv.as_slice(), &["country"]).unwrap();
        assert_eq!(rows[0][0], "Côte d'Ivoire");
    }

    #[test]
    fn open_dataset_reports_missing_file() {
        let err = open_dataset("test", Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn parse_helpers_handle_blanks_and_floats() {
        assert_eq!(parse_number(" 3.5 "), Some(3.5));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("n/a"), None);
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_year("2021.0"), Some(2021));
        assert_eq!(parse_year("2021.5"), None);
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" Civilians "), Some("Civilians".to_string()));
    }
}
