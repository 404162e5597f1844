// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduled-time handling for leads.
//!
//! Scheduled times are stored as UTC RFC 3339 text with whole seconds, so
//! lexical order matches chronological order in storage queries.

use std::str::FromStr;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, Time, UtcOffset};

use crate::error::DomainError;

/// Which scheduled leads an employee wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScheduleFilter {
    /// Every lead that has a scheduled time.
    #[default]
    All,
    /// Only leads scheduled within the current UTC day.
    Today,
}

impl FromStr for ScheduleFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(Self::All),
            "Today" => Ok(Self::Today),
            _ => Err(DomainError::InvalidScheduleFilter(s.to_string())),
        }
    }
}

/// Parses a scheduled time.
///
/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date, which is
/// taken as midnight UTC.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the input matches neither form.
pub fn parse_scheduled_date(input: &str) -> Result<OffsetDateTime, DomainError> {
    let trimmed: &str = input.trim();

    if let Ok(timestamp) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(timestamp);
    }

    Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
        .map(|date| date.with_time(Time::MIDNIGHT).assume_utc())
        .map_err(|e| DomainError::DateParseError {
            date_string: input.to_string(),
            error: e.to_string(),
        })
}

/// Formats a timestamp in the stored form: UTC, whole seconds, RFC 3339.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the timestamp cannot be formatted.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, DomainError> {
    let normalized: OffsetDateTime = timestamp
        .to_offset(UtcOffset::UTC)
        .replace_nanosecond(0)
        .unwrap_or(timestamp);

    normalized
        .format(&Rfc3339)
        .map_err(|e| DomainError::DateParseError {
            date_string: timestamp.to_string(),
            error: e.to_string(),
        })
}

/// Parses and normalizes a scheduled time for storage.
///
/// # Errors
///
/// Returns an error if the input cannot be parsed.
pub fn normalize_scheduled_date(input: &str) -> Result<String, DomainError> {
    format_timestamp(parse_scheduled_date(input)?)
}

/// Returns the stored-form bounds `[start, end)` of the UTC day containing `now`.
///
/// # Errors
///
/// Returns an error if the bounds cannot be formatted.
pub fn utc_day_bounds(now: OffsetDateTime) -> Result<(String, String), DomainError> {
    let start: OffsetDateTime = now
        .to_offset(UtcOffset::UTC)
        .date()
        .with_time(Time::MIDNIGHT)
        .assume_utc();
    let end: OffsetDateTime = start + Duration::days(1);

    Ok((format_timestamp(start)?, format_timestamp(end)?))
}
