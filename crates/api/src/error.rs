// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use lead_desk::CoreError;
use lead_desk_domain::DomainError;
use lead_desk_persistence::PersistenceError;

use crate::csv_import::CsvImportError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain, core and storage errors and represent
/// the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// An uploaded CSV was rejected as a whole.
    InvalidCsv {
        /// Why the upload was rejected.
        reason: String,
        /// Per-row messages, empty when the file itself was unreadable.
        errors: Vec<String>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidCsv { reason, .. } => write!(f, "{reason}"),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<CsvImportError> for ApiError {
    fn from(err: CsvImportError) -> Self {
        match err {
            CsvImportError::MalformedInput { reason, .. } => Self::InvalidCsv {
                reason,
                errors: Vec::new(),
            },
            CsvImportError::InvalidRecord { errors } => Self::InvalidCsv {
                reason: String::from("Invalid CSV data"),
                errors,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let invalid = |field: &str| ApiError::InvalidInput {
        field: field.to_string(),
        message: message.clone(),
    };

    match err {
        DomainError::MissingField { field } => invalid(&field.to_lowercase()),
        DomainError::InvalidEmail(_) => invalid("email"),
        DomainError::InvalidRole(_) => invalid("role"),
        DomainError::InvalidEmployeeStatus(_) | DomainError::InvalidLeadStatus(_) => {
            invalid("status")
        }
        DomainError::InvalidLeadType(_) => invalid("type"),
        DomainError::InvalidScheduleFilter(_) => invalid("filter"),
        DomainError::DateParseError { .. } => invalid("scheduled_date"),
        DomainError::NoChanges => invalid("update"),
        DomainError::CloseBeforeScheduled { .. } => ApiError::DomainRuleViolation {
            rule: String::from("close_after_scheduled_time"),
            message,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::UnknownAssignee { employee_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {employee_id} is not in the assignment pool"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Missing records and uniqueness conflicts keep their meaning; everything
/// else becomes an internal error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::EmployeeNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee {id} does not exist"),
        },
        PersistenceError::LeadNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Lead"),
            message: format!("Lead {id} does not exist"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::DuplicateEmail(email) => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: format!("An employee with email '{email}' already exists"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
