// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{
    DomainError, Employee, EmployeeStatus, Language, LeadStatus, LeadType, LeadUpdate,
    NewEmployee, Role,
};

fn create_test_employee(role: Role, status: EmployeeStatus) -> Employee {
    Employee {
        employee_id: 1,
        employee_code: String::from("#23454GHABC123"),
        first_name: String::from("Ada"),
        last_name: String::from("Byron"),
        email: String::from("ada@example.com"),
        role,
        location: String::from("London"),
        language: Language::new("English"),
        status,
        assigned_leads: 0,
        closed_leads: 0,
        created_at: String::from("2026-01-01T00:00:00Z"),
    }
}

#[test]
fn test_language_equality_is_case_sensitive() {
    assert_eq!(Language::new("English"), Language::new("English"));
    assert_ne!(Language::new("English"), Language::new("english"));
    assert_ne!(Language::new("English"), Language::new(" English"));
}

#[test]
fn test_language_defaults_to_english() {
    assert_eq!(Language::default().value(), "English");
}

#[test]
fn test_role_round_trips_through_str() {
    assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
    assert_eq!(Role::from_str("sales").unwrap(), Role::Sales);
    assert_eq!(Role::Sales.as_str(), "sales");
    assert!(matches!(
        Role::from_str("Admin"),
        Err(DomainError::InvalidRole(_))
    ));
}

#[test]
fn test_status_and_type_parsing() {
    assert_eq!(
        EmployeeStatus::from_str("Inactive").unwrap(),
        EmployeeStatus::Inactive
    );
    assert_eq!(LeadStatus::from_str("Closed").unwrap(), LeadStatus::Closed);
    assert_eq!(LeadType::from_str("Warm").unwrap(), LeadType::Warm);
    assert!(LeadType::from_str("warm").is_err());
    assert_eq!(LeadStatus::default(), LeadStatus::Ongoing);
}

#[test]
fn test_new_employee_normalizes_email() {
    let employee: NewEmployee = NewEmployee::new(
        " Ada ",
        "Byron",
        "  Ada@Example.COM ",
        Role::Sales,
        "London",
        Language::new("English"),
    );
    assert_eq!(employee.first_name, "Ada");
    assert_eq!(employee.email, "ada@example.com");
}

#[test]
fn test_display_name() {
    let employee: Employee = create_test_employee(Role::Sales, EmployeeStatus::Active);
    assert_eq!(employee.display_name(), "Ada Byron");
}

#[test]
fn test_lead_update_is_empty() {
    assert!(LeadUpdate::default().is_empty());

    let update: LeadUpdate = LeadUpdate {
        scheduled_date: Some(None),
        ..LeadUpdate::default()
    };
    assert!(!update.is_empty());
}
