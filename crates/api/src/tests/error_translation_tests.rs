// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lead_desk::CoreError;
use lead_desk_domain::DomainError;
use lead_desk_persistence::PersistenceError;

use crate::{
    ApiError, AuthError, CsvImportError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};

#[test]
fn test_missing_field_names_the_field() {
    let error: ApiError = translate_domain_error(DomainError::MissingField { field: "First name" });

    assert_eq!(
        error,
        ApiError::InvalidInput {
            field: String::from("first name"),
            message: String::from("First name is required"),
        }
    );
}

#[test]
fn test_close_before_scheduled_is_a_rule_violation() {
    let error: ApiError = translate_domain_error(DomainError::CloseBeforeScheduled {
        scheduled_date: String::from("2026-03-12T09:00:00Z"),
    });

    assert!(matches!(
        error,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "close_after_scheduled_time"
    ));
}

#[test]
fn test_no_changes_is_invalid_input() {
    let error: ApiError = translate_domain_error(DomainError::NoChanges);

    assert_eq!(
        error,
        ApiError::InvalidInput {
            field: String::from("update"),
            message: String::from("No changes made"),
        }
    );
}

#[test]
fn test_core_errors_translate() {
    let unknown: ApiError = translate_core_error(CoreError::UnknownAssignee { employee_id: 42 });
    assert!(matches!(
        unknown,
        ApiError::ResourceNotFound { ref resource_type, ref message }
            if resource_type == "Employee" && message.contains("42")
    ));

    let wrapped: ApiError =
        translate_core_error(CoreError::DomainViolation(DomainError::NoChanges));
    assert_eq!(wrapped, translate_domain_error(DomainError::NoChanges));
}

#[test]
fn test_persistence_errors_translate() {
    assert!(matches!(
        translate_persistence_error(PersistenceError::LeadNotFound(9)),
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Lead"
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::DuplicateEmail(String::from("a@b.test"))),
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "unique_email"
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::DatabaseError(String::from("disk full"))),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_csv_errors_keep_row_messages() {
    let rejected: ApiError = ApiError::from(CsvImportError::InvalidRecord {
        errors: vec![String::from("Row 3: Email is required")],
    });
    assert_eq!(
        rejected,
        ApiError::InvalidCsv {
            reason: String::from("Invalid CSV data"),
            errors: vec![String::from("Row 3: Email is required")],
        }
    );

    let malformed: ApiError = ApiError::from(CsvImportError::MalformedInput {
        reason: String::from("CSV file is empty or has no data rows"),
        missing_columns: Vec::new(),
    });
    assert_eq!(malformed.to_string(), "CSV file is empty or has no data rows");
}

#[test]
fn test_auth_errors_convert() {
    let error: ApiError = ApiError::from(AuthError::Unauthorized {
        action: String::from("reassign_lead"),
        required_role: String::from("admin"),
    });

    assert_eq!(
        error.to_string(),
        "Unauthorized: 'reassign_lead' requires admin role"
    );
}
