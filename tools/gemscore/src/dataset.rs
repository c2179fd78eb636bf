//! Rankings export reader
//!
//! QS exports are Latin-1 encoded CSV files with a two-row header: the first
//! row holds section titles, the second the column labels. Columns are
//! located by their label in the last header row. Rows without a numeric
//! rank (repeated headers, "Sorting" banners, footnotes) are dropped.

use crate::config::ToolConfig;
use crate::error::{DatasetError, Result};
use gemscore_fuzzy::{InferenceRequest, InputVariable};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// One university row of the rankings export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniversityRecord {
    pub rank: i64,
    pub institution: String,
    pub country: String,
    /// Indicator scores in [`InputVariable::ALL`] order; `None` when the cell
    /// was empty or not a number
    pub scores: [Option<f64>; 5],
}

impl UniversityRecord {
    pub fn score(&self, variable: InputVariable) -> Option<f64> {
        self.scores[variable.index()]
    }

    /// Engine request with `fallback` substituted for missing scores
    pub fn request(&self, fallback: f64) -> InferenceRequest {
        InferenceRequest::from_optional(self.scores, fallback)
    }

    /// Number of indicator cells that were missing
    pub fn missing_count(&self) -> usize {
        self.scores.iter().filter(|s| s.is_none()).count()
    }
}

/// Decode Latin-1 bytes; every byte maps to the code point of equal value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Parse a numeric cell, `None` for blanks and text
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Positions of the columns a record is built from
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    rank: usize,
    institution: usize,
    country: usize,
    scores: [usize; 5],
}

impl ColumnLayout {
    fn locate(header: &csv::StringRecord, config: &ToolConfig) -> Result<Self> {
        let find = |label: &str| {
            header
                .iter()
                .position(|cell| cell.trim() == label.trim())
                .ok_or_else(|| DatasetError::MissingColumn {
                    label: label.to_string(),
                })
        };

        let columns = &config.columns;
        let mut scores = [0; 5];
        for variable in InputVariable::ALL {
            scores[variable.index()] = find(columns.indicator(variable))?;
        }

        Ok(Self {
            rank: find(&columns.rank)?,
            institution: find(&columns.institution)?,
            country: find(&columns.country)?,
            scores,
        })
    }

    fn record(&self, row: &csv::StringRecord) -> Option<UniversityRecord> {
        let cell = |index: usize| row.get(index).unwrap_or("").trim();

        let rank = parse_number(cell(self.rank))?.trunc() as i64;
        let scores = self.scores.map(|index| parse_number(cell(index)));

        Some(UniversityRecord {
            rank,
            institution: cell(self.institution).to_string(),
            country: cell(self.country).to_string(),
            scores,
        })
    }
}

/// Parse an already decoded rankings export
pub fn parse_rankings(text: &str, config: &ToolConfig) -> Result<Vec<UniversityRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = reader.records();

    let expected = config.input.header_rows;
    let mut header = None;
    for found in 0..expected {
        match rows.next() {
            Some(row) => header = Some(row?),
            None => return Err(DatasetError::MissingHeader { expected, found }),
        }
    }
    let header = header.ok_or(DatasetError::MissingHeader { expected, found: 0 })?;
    let layout = ColumnLayout::locate(&header, config)?;
    debug!("Column layout: {:?}", layout);

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rows.skip(config.input.skip_rows_after_header) {
        let row = row?;
        match layout.record(&row) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }

    debug!("Dropped {} rows without a numeric rank", dropped);
    Ok(records)
}

/// Read a Latin-1 rankings export from disk
pub fn read_rankings<P: AsRef<Path>>(
    path: P,
    config: &ToolConfig,
) -> Result<Vec<UniversityRecord>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| DatasetError::io(path, e))?;
    let records = parse_rankings(&decode_latin1(&bytes), config)?;
    info!("Loaded {} universities from {}", records.len(), path.display());
    Ok(records)
}
