// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV ingestion for bulk lead upload.
//!
//! The format is deliberately simple: comma-separated, no quoting or
//! escaping, one header line. Column names are matched case-insensitively
//! and may appear in any order; unknown columns are ignored.
//!
//! Rows without a name, email or language never reach assignment. They are
//! dropped during parsing and only show up in debug logs. A second,
//! structural pass (`validate_lead_records`) rejects the whole batch if any
//! surviving record is still incomplete.

use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use lead_desk_domain::{Language, LeadCandidate};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

/// Columns every upload must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = ["name", "email", "source", "date", "location", "language"];

/// Why an upload was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CsvImportError {
    /// The upload cannot be read as a lead table at all.
    #[error("{reason}")]
    MalformedInput {
        reason: String,
        /// Required columns absent from the header, in canonical order.
        missing_columns: Vec<String>,
    },

    /// Parsed records failed structural validation.
    #[error("Invalid CSV data: {}", errors.join("; "))]
    InvalidRecord { errors: Vec<String> },
}

fn no_data_rows() -> CsvImportError {
    CsvImportError::MalformedInput {
        reason: String::from("CSV file is empty or has no data rows"),
        missing_columns: Vec::new(),
    }
}

fn unreadable(err: &csv::Error) -> CsvImportError {
    CsvImportError::MalformedInput {
        reason: format!("Failed to read CSV: {err}"),
        missing_columns: Vec::new(),
    }
}

/// Maps lower-cased header names to column positions. Later duplicates win.
fn index_columns(header: &StringRecord) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.to_lowercase(), idx))
        .collect()
}

/// Parses raw CSV text into lead candidates, in row order.
///
/// # Arguments
///
/// * `content` - The uploaded CSV text
///
/// # Errors
///
/// Returns `CsvImportError::MalformedInput` if the content has fewer than
/// two non-empty lines or the header lacks a required column.
pub fn parse_leads_csv(content: &str) -> Result<Vec<LeadCandidate>, CsvImportError> {
    let trimmed: &str = content.trim();
    if trimmed.lines().filter(|l| !l.trim().is_empty()).count() < 2 {
        return Err(no_data_rows());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .trim(Trim::All)
        .from_reader(trimmed.as_bytes());
    let mut records = reader.records();

    let header: StringRecord = records
        .next()
        .transpose()
        .map_err(|e| unreadable(&e))?
        .ok_or_else(no_data_rows)?;
    let columns: HashMap<String, usize> = index_columns(&header);

    let missing_columns: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !columns.contains_key(**column))
        .map(ToString::to_string)
        .collect();
    if !missing_columns.is_empty() {
        return Err(CsvImportError::MalformedInput {
            reason: format!("Missing required columns: {}", missing_columns.join(", ")),
            missing_columns,
        });
    }

    let mut candidates: Vec<LeadCandidate> = Vec::new();
    for result in records {
        let record: StringRecord = result.map_err(|e| unreadable(&e))?;
        let field = |name: &str| -> String {
            columns
                .get(name)
                .and_then(|&idx| record.get(idx))
                .unwrap_or_default()
                .to_string()
        };

        let candidate: LeadCandidate = LeadCandidate::new(
            &field("name"),
            &field("email"),
            &field("source"),
            &field("date"),
            &field("location"),
            Language::new(&field("language")),
        );

        if candidate.name.is_empty() || candidate.email.is_empty() || candidate.language.is_empty()
        {
            debug!(
                line = record.position().map_or(0, csv::Position::line),
                "Dropping CSV row without name, email or language"
            );
            continue;
        }
        candidates.push(candidate);
    }

    Ok(candidates)
}

/// Checks parsed records for missing required fields.
///
/// Row numbers assume a header on line 1, so the first record is `Row 2`.
#[must_use]
pub fn validate_lead_records(records: &[LeadCandidate]) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let row: usize = index + 2;
        if record.name.trim().is_empty() {
            errors.push(format!("Row {row}: Name is required"));
        }
        if record.email.trim().is_empty() {
            errors.push(format!("Row {row}: Email is required"));
        }
        if record.language.value().trim().is_empty() {
            errors.push(format!("Row {row}: Language is required"));
        }
    }

    errors
}

/// Parses and validates an upload.
///
/// # Errors
///
/// Returns `MalformedInput` from parsing, or `InvalidRecord` carrying every
/// validation message if any record is incomplete. Nothing is partially
/// accepted.
pub fn ingest_leads_csv(content: &str) -> Result<Vec<LeadCandidate>, CsvImportError> {
    let candidates: Vec<LeadCandidate> = parse_leads_csv(content)?;

    let errors: Vec<String> = validate_lead_records(&candidates);
    if !errors.is_empty() {
        return Err(CsvImportError::InvalidRecord { errors });
    }

    info!(rows = candidates.len(), "Parsed lead upload");
    Ok(candidates)
}
