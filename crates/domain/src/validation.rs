// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

use crate::error::DomainError;
use crate::schedule::parse_scheduled_date;
use crate::types::{LeadCandidate, NewEmployee};

/// Validates that a lead candidate carries the fields assignment depends on.
///
/// Name, email and language must be non-empty. Source, date and location
/// may be empty.
///
/// # Arguments
///
/// * `candidate` - The candidate to validate
///
/// # Errors
///
/// Returns `DomainError::MissingField` naming the first empty field.
pub fn validate_lead_candidate(candidate: &LeadCandidate) -> Result<(), DomainError> {
    if candidate.name.trim().is_empty() {
        return Err(DomainError::MissingField { field: "Name" });
    }
    if candidate.email.trim().is_empty() {
        return Err(DomainError::MissingField { field: "Email" });
    }
    if candidate.language.value().trim().is_empty() {
        return Err(DomainError::MissingField { field: "Language" });
    }
    Ok(())
}

/// Validates the fields of a new employee.
///
/// # Arguments
///
/// * `employee` - The employee input to validate
///
/// # Errors
///
/// Returns an error if any field is empty or the email has no `@`.
pub fn validate_new_employee(employee: &NewEmployee) -> Result<(), DomainError> {
    let required: [(&'static str, &str); 5] = [
        ("First name", &employee.first_name),
        ("Last name", &employee.last_name),
        ("Email", &employee.email),
        ("Location", &employee.location),
        ("Language", employee.language.value()),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DomainError::MissingField { field });
        }
    }

    // Rule: local part and domain on either side of a single '@'
    let mut parts = employee.email.split('@');
    let valid_email: bool = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    );
    if !valid_email {
        return Err(DomainError::InvalidEmail(employee.email.clone()));
    }

    Ok(())
}

/// Checks that a lead may be closed at `now`.
///
/// A lead without a scheduled time may be closed at any time. A lead with
/// one may only be closed once that time has been reached.
///
/// # Arguments
///
/// * `scheduled_date` - The lead's stored scheduled time, if any
/// * `now` - The current time
///
/// # Errors
///
/// Returns `DomainError::CloseBeforeScheduled` if `now` is earlier than the
/// scheduled time, or a parse error if the stored value is malformed.
pub fn validate_lead_close(
    scheduled_date: Option<&str>,
    now: OffsetDateTime,
) -> Result<(), DomainError> {
    let Some(scheduled) = scheduled_date else {
        return Ok(());
    };

    let scheduled_at: OffsetDateTime = parse_scheduled_date(scheduled)?;
    if now < scheduled_at {
        return Err(DomainError::CloseBeforeScheduled {
            scheduled_date: scheduled.to_string(),
        });
    }

    Ok(())
}
