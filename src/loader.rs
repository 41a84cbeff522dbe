// 📂 Record Loader - CSV → ChartRecord
// Schema check up front, then one pass over the rows.
// Bad subjects drop the row, bad references drop the token. Neither is an error.

use crate::config::ColumnNames;
use crate::dates::parse_date;
use crate::error::{RelationsError, Result};
use crate::identifier;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

// ============================================================================
// CORE TYPES
// ============================================================================

/// ChartRecord - one accepted row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRecord {
    /// Validated subject identifier
    pub wish: String,

    /// Observation date, if the text parsed
    pub date: Option<NaiveDate>,

    /// Validated references, in input order, subject excluded
    pub same_as: Vec<String>,

    /// Line in the source file (1-indexed, header is line 1)
    pub line_number: usize,
}

impl ChartRecord {
    pub fn new(wish: impl Into<String>, date: Option<NaiveDate>) -> Self {
        ChartRecord {
            wish: wish.into(),
            date,
            same_as: Vec::new(),
            line_number: 0,
        }
    }

    /// Builder pattern: add a reference
    pub fn with_reference(mut self, other: impl Into<String>) -> Self {
        self.same_as.push(other.into());
        self
    }

    /// Build from raw cell text, applying identifier and date normalization.
    ///
    /// Returns the record (if the subject is valid) and the number of
    /// reference tokens that were dropped.
    pub fn from_cells(wish: &str, date: &str, same_as: &str) -> (Option<Self>, usize) {
        let wish = match identifier::parse(wish) {
            Some(w) => w,
            None => return (None, 0),
        };

        let mut dropped = 0;
        let mut refs = Vec::new();
        for token in identifier::split_tokens(same_as) {
            match identifier::parse(token) {
                Some(other) if other != wish => refs.push(other),
                Some(_) => {} // self-reference, no effect
                None => {
                    debug!(token, subject = %wish, "dropping invalid reference");
                    dropped += 1;
                }
            }
        }

        let record = ChartRecord {
            date: parse_date(date),
            wish,
            same_as: refs,
            line_number: 0,
        };
        (Some(record), dropped)
    }
}

/// LoadReport - records plus what was skipped on the way
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<ChartRecord>,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub references_dropped: usize,
}

// ============================================================================
// LOADING
// ============================================================================

/// Load chart records from a CSV file
pub fn load_csv(path: &Path, columns: &ColumnNames) -> Result<LoadReport> {
    let file = File::open(path)?;
    let report = load_from_reader(file, columns)?;
    info!(
        path = %path.display(),
        accepted = report.records.len(),
        skipped = report.rows_skipped,
        "loaded chart records"
    );
    Ok(report)
}

/// Load chart records from any reader producing CSV with a header row
pub fn load_from_reader<R: Read>(reader: R, columns: &ColumnNames) -> Result<LoadReport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let [wish_idx, date_idx, same_idx] = resolve_columns(&headers, columns)?;

    let mut report = LoadReport::default();

    for (row_num, result) in reader.records().enumerate() {
        let row = result?;
        report.rows_read += 1;

        // Quoted cells may span lines, so ask the reader where the row began
        let line = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row_num + 2);

        let cell = |idx: usize| row.get(idx).unwrap_or("");
        let (record, dropped) = ChartRecord::from_cells(cell(wish_idx), cell(date_idx), cell(same_idx));
        report.references_dropped += dropped;

        match record {
            Some(mut record) => {
                record.line_number = line;
                report.records.push(record);
            }
            None => {
                debug!(line, wish = cell(wish_idx), "skipping row without a valid WISH id");
                report.rows_skipped += 1;
            }
        }
    }

    if report.records.is_empty() {
        warn!(rows = report.rows_read, "no rows carried a valid WISH id");
    }

    Ok(report)
}

/// Map each required column to its header position, or fail listing what is missing
fn resolve_columns(headers: &[String], columns: &ColumnNames) -> Result<[usize; 3]> {
    let required = columns.required();
    let positions = required.map(|name| headers.iter().position(|h| h == name));

    let missing: Vec<String> = required
        .iter()
        .zip(positions.iter())
        .filter(|(_, pos)| pos.is_none())
        .map(|(name, _)| name.to_string())
        .collect();

    match positions {
        [Some(w), Some(d), Some(s)] => Ok([w, d, s]),
        _ => Err(RelationsError::MissingColumns {
            missing,
            present: headers.to_vec(),
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
