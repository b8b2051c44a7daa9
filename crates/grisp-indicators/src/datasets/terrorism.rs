//! Global Terrorism Database incident adapter.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

use grisp_core::format::render_not_found;
use grisp_core::TrailingWindow;

use super::{load_rows, match_key, non_blank, open_dataset, parse_number, parse_year, Row};
use crate::error::DatasetError;

const DATASET: &str = "GTD";
const COLUMNS: [&str; 5] = ["country_txt", "iyear", "nkill", "nwound", "target1"];
const TOP_TARGETS: usize = 3;

/// One incident row. Casualty counts and target are nullable in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrorismRecord {
    pub country: String,
    pub year: i32,
    pub fatalities: Option<f64>,
    pub injuries: Option<f64>,
    pub target: Option<String>,
    /// Lowercased, trimmed `country`, computed once at load.
    country_key: String,
}

impl TerrorismRecord {
    /// `row_number` is 1-based and counts data rows only.
    fn from_row(row_number: usize, row: Row) -> Result<Self, DatasetError> {
        let year = parse_year(&row[1]).ok_or_else(|| DatasetError::InvalidValue {
            dataset: DATASET,
            row: row_number,
            column: COLUMNS[1],
            value: row[1].clone(),
        })?;
        let country = row[0].trim().to_string();
        Ok(Self {
            country_key: match_key(&country),
            country,
            year,
            fatalities: parse_number(&row[2]),
            injuries: parse_number(&row[3]),
            target: non_blank(&row[4]),
        })
    }
}

/// Aggregate over one country's incidents inside the trailing window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrorismSummary {
    /// Country name as spelled in the dataset.
    pub country: String,
    pub total_attacks: usize,
    pub fatalities: u64,
    pub injuries: u64,
    /// Most frequent targets, count descending, ties in first-seen order.
    pub top_targets: Vec<(String, usize)>,
}

/// Summarizes recent terrorism incidents for a country.
#[derive(Debug)]
pub struct TerrorismAdapter {
    records: Vec<TerrorismRecord>,
    window: TrailingWindow,
}

impl TerrorismAdapter {
    pub const NAME: &'static str = "terrorism";

    /// Loads the dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file is missing, malformed, lacks a
    /// required column, or has a row with an unparsable `iyear`.
    pub fn from_path(path: &Path, window: TrailingWindow) -> Result<Self, DatasetError> {
        Self::from_reader(open_dataset(DATASET, path)?, window)
    }

    /// Loads the dataset from any CSV reader.
    ///
    /// # Errors
    ///
    /// Same conditions as [`TerrorismAdapter::from_path`], minus file access.
    pub fn from_reader<R: Read>(reader: R, window: TrailingWindow) -> Result<Self, DatasetError> {
        let records = load_rows(DATASET, reader, &COLUMNS)?
            .into_iter()
            .enumerate()
            .map(|(idx, row)| TerrorismRecord::from_row(idx + 1, row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records, window })
    }

    #[must_use]
    pub fn window(&self) -> TrailingWindow {
        self.window
    }

    /// Aggregates the incidents for `country` inside the window.
    ///
    /// Returns `None` when the country is absent or has no incidents in range.
    #[must_use]
    pub fn summarize(&self, country: &str) -> Option<TerrorismSummary> {
        let (_, matches) = self.matching(country);
        summarize_records(&matches)
    }

    /// One pass over the dataset: the first record for `country` in any year
    /// (for its canonical spelling) and every record inside the window.
    fn matching(&self, country: &str) -> (Option<&TerrorismRecord>, Vec<&TerrorismRecord>) {
        let key = match_key(country);
        let mut any_year = None;
        let mut in_window = Vec::new();
        for record in self.records.iter().filter(|r| r.country_key == key) {
            any_year.get_or_insert(record);
            if self.window.contains(record.year) {
                in_window.push(record);
            }
        }
        (any_year, in_window)
    }

    /// Renders the terrorism block for `country`.
    #[must_use]
    pub fn fetch(&self, country: &str) -> String {
        let (any_year, matches) = self.matching(country);
        let Some(summary) = summarize_records(&matches) else {
            tracing::debug!(
                adapter = Self::NAME,
                country,
                start_year = self.window.start_year(),
                "no incidents in window"
            );
            let canonical = any_year.map_or_else(|| country.trim(), |r| r.country.as_str());
            return render_not_found(
                canonical,
                &format!("in the last {} years", self.window.years),
            );
        };

        let mut out = format!(
            "Terrorism Incidents for {} ({}-{}):\n\
             - Total Attacks: {}\n\
             - Fatalities: {}\n\
             - Injuries: {}\n\
             - Top Targets:",
            summary.country,
            self.window.start_year(),
            self.window.reference_year,
            summary.total_attacks,
            summary.fatalities,
            summary.injuries,
        );
        if summary.top_targets.is_empty() {
            out.push_str("\n  - No target data available");
        }
        for (target, count) in &summary.top_targets {
            let _ = write!(out, "\n  - {target}: {count}");
        }
        out
    }
}

fn summarize_records(matches: &[&TerrorismRecord]) -> Option<TerrorismSummary> {
    let first = matches.first()?;

    Some(TerrorismSummary {
        country: first.country.clone(),
        total_attacks: matches.len(),
        fatalities: sum_counts(matches.iter().map(|r| r.fatalities)),
        injuries: sum_counts(matches.iter().map(|r| r.injuries)),
        top_targets: top_targets(matches.iter().filter_map(|r| r.target.as_deref())),
    })
}

/// Sums nullable casualty counts; missing or negative values contribute 0.
fn sum_counts(values: impl Iterator<Item = Option<f64>>) -> u64 {
    let total: f64 = values.flatten().filter(|v| *v > 0.0).sum();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = total.round() as u64;
    total
}

/// Top [`TOP_TARGETS`] targets by frequency; ties keep first-seen order.
fn top_targets<'a>(targets: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for target in targets {
        if let Some(&idx) = positions.get(target) {
            counts[idx].1 += 1;
        } else {
            positions.insert(target, counts.len());
            counts.push((target.to_string(), 1));
        }
    }

    // `sort_by` is stable, so equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_TARGETS);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "eventid,iyear,country_txt,nkill,nwound,target1\n";

    fn adapter(rows: &str) -> TerrorismAdapter {
        let csv = format!("{HEADER}{rows}");
        TerrorismAdapter::from_reader(csv.as_bytes(), TrailingWindow::new(2024, 5))
            .expect("fixture should load")
    }

    #[test]
    fn summary_counts_recent_incidents_only() {
        let adapter = adapter(
            "1,2023,India,3,4,Civilians\n\
             2,2021,India,1,,Police\n\
             3,2010,India,50,60,Military\n\
             4,2022,Pakistan,9,9,Civilians\n",
        );
        let summary = adapter.summarize("India").unwrap();
        assert_eq!(summary.total_attacks, 2);
        assert_eq!(summary.fatalities, 4);
        assert_eq!(summary.injuries, 4);
        assert_eq!(
            summary.top_targets,
            vec![("Civilians".to_string(), 1), ("Police".to_string(), 1)]
        );
    }

    #[test]
    fn fetch_renders_template() {
        let adapter = adapter(
            "1,2023,India,3,4,Civilians\n\
             2,2021,India,1,,Civilians\n\
             3,2020,India,,2,Police\n",
        );
        assert_eq!(
            adapter.fetch("India"),
            "Terrorism Incidents for India (2019-2024):\n\
             - Total Attacks: 3\n\
             - Fatalities: 4\n\
             - Injuries: 6\n\
             - Top Targets:\n  \
             - Civilians: 2\n  \
             - Police: 1"
        );
    }

    #[test]
    fn fetch_is_case_insensitive() {
        let adapter = adapter("1,2023,India,3,4,Civilians\n");
        let expected = adapter.fetch("India");
        assert_eq!(adapter.fetch("india"), expected);
        assert_eq!(adapter.fetch("INDIA"), expected);
    }

    #[test]
    fn absent_country_reports_no_data() {
        let adapter = adapter("1,2023,India,3,4,Civilians\n");
        assert_eq!(
            adapter.fetch("Iceland"),
            "No data found for Iceland in the last 5 years."
        );
    }

    #[test]
    fn country_outside_window_reports_no_data() {
        let adapter = adapter("1,2001,Peru,3,4,Civilians\n2,2025,Peru,1,1,Police\n");
        assert_eq!(
            adapter.fetch("peru"),
            "No data found for Peru in the last 5 years."
        );
        assert_eq!(adapter.fetch("PERU"), adapter.fetch("peru"));
    }

    #[test]
    fn country_key_is_normalized_at_load() {
        let adapter = adapter("1,2023,  Burkina Faso ,1,1,Civilians\n2,2001,Burkina Faso,1,1,Police\n");
        assert!(adapter.records.iter().all(|r| r.country_key == "burkina faso"));
        assert_eq!(adapter.records[0].country, "Burkina Faso");

        let (any_year, in_window) = adapter.matching(" BURKINA faso ");
        assert_eq!(any_year.map(|r| r.year), Some(2023));
        assert_eq!(in_window.len(), 1);
    }

    #[test]
    fn all_missing_fatalities_sum_to_zero() {
        let adapter = adapter("1,2023,Mali,,,\n2,2022,Mali,unknown,,\n");
        let summary = adapter.summarize("Mali").unwrap();
        assert_eq!(summary.fatalities, 0);
        assert_eq!(summary.injuries, 0);
        assert!(summary.top_targets.is_empty());
        assert!(adapter.fetch("Mali").ends_with("- Top Targets:\n  - No target data available"));
    }

    #[test]
    fn top_targets_tie_break_is_stable_and_capped() {
        let mut rows = String::new();
        let mut id = 0;
        // Source order: D, A, B, C; counts A:5, B:5, C:3, D:1.
        for target in ["D", "A", "B", "A", "B", "C", "A", "B", "C", "A", "B", "C", "A", "B"] {
            id += 1;
            rows.push_str(&format!("{id},2022,Niger,0,0,{target}\n"));
        }
        let summary = adapter(&rows).summarize("Niger").unwrap();
        assert_eq!(
            summary.top_targets,
            vec![
                ("A".to_string(), 5),
                ("B".to_string(), 5),
                ("C".to_string(), 3)
            ]
        );
    }

    #[test]
    fn fractional_casualties_are_rounded_after_summing() {
        let adapter = adapter("1,2023,Chad,1.0,2.5,\n2,2023,Chad,2.0,2.5,\n");
        let summary = adapter.summarize("Chad").unwrap();
        assert_eq!(summary.fatalities, 3);
        assert_eq!(summary.injuries, 5);
    }

    #[test]
    fn unparsable_year_fails_construction() {
        let csv = format!("{HEADER}1,twenty,India,1,1,Civilians\n");
        let err = TerrorismAdapter::from_reader(csv.as_bytes(), TrailingWindow::new(2024, 5))
            .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidValue {
                row: 1,
                column: "iyear",
                ..
            }
        ));
    }

    #[test]
    fn missing_column_fails_construction() {
        let csv = "iyear,country_txt,nkill,nwound\n2023,India,1,1\n";
        let err = TerrorismAdapter::from_reader(csv.as_bytes(), TrailingWindow::new(2024, 5))
            .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingColumn {
                column: "target1",
                ..
            }
        ));
    }
}
