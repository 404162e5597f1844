// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;

use crate::{
    DomainError, Language, LeadCandidate, NewEmployee, Role, validate_lead_candidate,
    validate_lead_close, validate_new_employee,
};

fn create_test_candidate(name: &str, email: &str, language: &str) -> LeadCandidate {
    LeadCandidate::new(
        name,
        email,
        "Referral",
        "2026-01-15",
        "Berlin",
        Language::new(language),
    )
}

fn create_test_new_employee(email: &str) -> NewEmployee {
    NewEmployee::new(
        "Grace",
        "Hopper",
        email,
        Role::Sales,
        "Arlington",
        Language::new("English"),
    )
}

#[test]
fn test_complete_candidate_is_valid() {
    let candidate: LeadCandidate = create_test_candidate("Jane", "jane@example.com", "English");
    assert!(validate_lead_candidate(&candidate).is_ok());
}

#[test]
fn test_candidate_missing_fields_are_reported_in_order() {
    let no_name: LeadCandidate = create_test_candidate("", "jane@example.com", "English");
    assert_eq!(
        validate_lead_candidate(&no_name),
        Err(DomainError::MissingField { field: "Name" })
    );

    let no_email: LeadCandidate = create_test_candidate("Jane", "  ", "English");
    assert_eq!(
        validate_lead_candidate(&no_email),
        Err(DomainError::MissingField { field: "Email" })
    );

    let no_language: LeadCandidate = create_test_candidate("Jane", "jane@example.com", "");
    assert_eq!(
        validate_lead_candidate(&no_language),
        Err(DomainError::MissingField { field: "Language" })
    );
}

#[test]
fn test_candidate_source_date_location_are_optional() {
    let candidate: LeadCandidate = LeadCandidate::new(
        "Jane",
        "jane@example.com",
        "",
        "",
        "",
        Language::new("Hindi"),
    );
    assert!(validate_lead_candidate(&candidate).is_ok());
}

#[test]
fn test_new_employee_requires_all_fields() {
    let mut employee: NewEmployee = create_test_new_employee("grace@example.com");
    assert!(validate_new_employee(&employee).is_ok());

    employee.location = String::new();
    assert_eq!(
        validate_new_employee(&employee),
        Err(DomainError::MissingField { field: "Location" })
    );
}

#[test]
fn test_new_employee_rejects_malformed_email() {
    for email in ["grace", "@example.com", "grace@", "a@b@c"] {
        let employee: NewEmployee = create_test_new_employee(email);
        assert!(
            matches!(
                validate_new_employee(&employee),
                Err(DomainError::InvalidEmail(_))
            ),
            "expected {email} to be rejected"
        );
    }
}

#[test]
fn test_close_without_schedule_is_allowed() {
    assert!(validate_lead_close(None, datetime!(2026-01-01 00:00 UTC)).is_ok());
}

#[test]
fn test_close_before_schedule_is_rejected() {
    let result = validate_lead_close(
        Some("2026-06-01T12:00:00Z"),
        datetime!(2026-06-01 11:59 UTC),
    );
    assert!(matches!(
        result,
        Err(DomainError::CloseBeforeScheduled { .. })
    ));
}

#[test]
fn test_close_at_or_after_schedule_is_allowed() {
    assert!(validate_lead_close(Some("2026-06-01T12:00:00Z"), datetime!(2026-06-01 12:00 UTC)).is_ok());
    assert!(validate_lead_close(Some("2026-06-01T12:00:00Z"), datetime!(2026-07-01 00:00 UTC)).is_ok());
}
