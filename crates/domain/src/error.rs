// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field is empty or missing.
    MissingField {
        /// The display name of the field (e.g. `Name`).
        field: &'static str,
    },
    /// Email address is malformed.
    InvalidEmail(String),
    /// Role is not one of the known roles.
    InvalidRole(String),
    /// Employee status is not one of the known statuses.
    InvalidEmployeeStatus(String),
    /// Lead status is not one of the known statuses.
    InvalidLeadStatus(String),
    /// Lead type is not one of the known temperatures.
    InvalidLeadType(String),
    /// Schedule filter is not `All` or `Today`.
    InvalidScheduleFilter(String),
    /// A date or timestamp could not be parsed.
    DateParseError {
        /// The offending input.
        date_string: String,
        /// The parser's description of the failure.
        error: String,
    },
    /// A lead was closed before its scheduled time.
    CloseBeforeScheduled {
        /// The scheduled timestamp of the lead.
        scheduled_date: String,
    },
    /// An update request carried no changes.
    NoChanges,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "{field} is required"),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: '{email}'"),
            Self::InvalidRole(role) => {
                write!(f, "Invalid role: '{role}'. Must be 'admin' or 'sales'")
            }
            Self::InvalidEmployeeStatus(status) => {
                write!(
                    f,
                    "Invalid employee status: '{status}'. Must be 'Active' or 'Inactive'"
                )
            }
            Self::InvalidLeadStatus(status) => {
                write!(
                    f,
                    "Invalid lead status: '{status}'. Must be 'Ongoing' or 'Closed'"
                )
            }
            Self::InvalidLeadType(lead_type) => {
                write!(
                    f,
                    "Invalid lead type: '{lead_type}'. Must be 'Hot', 'Warm' or 'Cold'"
                )
            }
            Self::InvalidScheduleFilter(filter) => {
                write!(
                    f,
                    "Invalid schedule filter: '{filter}'. Must be 'All' or 'Today'"
                )
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::CloseBeforeScheduled { scheduled_date } => {
                write!(
                    f,
                    "Lead cannot be closed before scheduled time ({scheduled_date})"
                )
            }
            Self::NoChanges => write!(f, "No changes made"),
        }
    }
}

impl std::error::Error for DomainError {}
