//! ND-GAIN climate vulnerability adapter.

use std::fmt::Display;
use std::io::Read;
use std::path::Path;

use grisp_core::format::{render_not_found, NOT_AVAILABLE};

use super::{load_rows, match_key, open_dataset, parse_number, parse_year, Row};
use crate::error::DatasetError;

const DATASET: &str = "ND-GAIN";
const COLUMNS: [&str; 5] = ["Country", "ND-GAIN Index", "Vulnerability", "Readiness", "Year"];

/// One country row from the ND-GAIN export. Missing cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateRecord {
    pub country: String,
    pub nd_gain_index: Option<f64>,
    pub vulnerability: Option<f64>,
    pub readiness: Option<f64>,
    pub year: Option<i32>,
}

impl ClimateRecord {
    fn from_row(row: Row) -> Self {
        Self {
            country: row[0].trim().to_string(),
            nd_gain_index: parse_number(&row[1]),
            vulnerability: parse_number(&row[2]),
            readiness: parse_number(&row[3]),
            year: parse_year(&row[4]),
        }
    }
}

/// Looks up a country's ND-GAIN index, vulnerability and readiness scores.
#[derive(Debug)]
pub struct ClimateAdapter {
    records: Vec<ClimateRecord>,
}

impl ClimateAdapter {
    pub const NAME: &'static str = "climate";

    /// Loads the dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file is missing, malformed, or lacks
    /// one of the required columns.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        Self::from_reader(open_dataset(DATASET, path)?)
    }

    /// Loads the dataset from any CSV reader.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the CSV is malformed or lacks a required column.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let records = load_rows(DATASET, reader, &COLUMNS)?
            .into_iter()
            .map(ClimateRecord::from_row)
            .collect();
        Ok(Self { records })
    }

    /// First record whose country matches `country` case-insensitively.
    #[must_use]
    pub fn lookup(&self, country: &str) -> Option<&ClimateRecord> {
        let key = match_key(country);
        self.records.iter().find(|r| match_key(&r.country) == key)
    }

    /// Renders the climate block for `country`.
    #[must_use]
    pub fn fetch(&self, country: &str) -> String {
        let Some(record) = self.lookup(country) else {
            tracing::debug!(adapter = Self::NAME, country, "no ND-GAIN match");
            return render_not_found(country.trim(), "in the ND-GAIN dataset");
        };

        format!(
            "Climate Risk Score for {}:\n\
             - ND-GAIN Index: {}\n\
             - Vulnerability: {}\n\
             - Readiness: {}\n\
             - Year: {}",
            record.country,
            or_not_available(record.nd_gain_index),
            or_not_available(record.vulnerability),
            or_not_available(record.readiness),
            or_not_available(record.year),
        )
    }
}

fn or_not_available<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}
