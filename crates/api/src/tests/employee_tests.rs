// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lead_desk_domain::{EmployeeStatus, Language, Role};
use lead_desk_persistence::Persistence;

use super::helpers::{create_test_admin, create_test_persistence, create_test_sales, seed_employee};
use crate::{
    ApiError, CreateEmployeeRequest, CreateEmployeeResponse, ListActivitiesResponse,
    ListEmployeesQuery, ListEmployeesResponse, SetEmployeeStatusRequest,
    SetEmployeeStatusResponse, create_employee, list_employees, recent_activities,
    set_employee_status,
};

fn employee_request(first_name: &str, email: &str) -> CreateEmployeeRequest {
    CreateEmployeeRequest {
        first_name: first_name.to_string(),
        last_name: String::from("Verma"),
        email: email.to_string(),
        role: None,
        location: String::from("Pune"),
        language: None,
    }
}

#[test]
fn test_create_employee_defaults_to_english_sales() {
    let mut persistence: Persistence = create_test_persistence();

    let response: CreateEmployeeResponse = create_employee(
        &mut persistence,
        employee_request("Asha", "Asha@LeadDesk.test"),
        &create_test_admin(),
    )
    .unwrap();

    assert_eq!(response.employee.role, Role::Sales);
    assert_eq!(response.employee.language, Language::new("English"));
    assert_eq!(response.employee.status, EmployeeStatus::Active);
    assert_eq!(response.employee.email, "asha@leaddesk.test");
    assert_eq!(response.employee.assigned_leads, 0);
    assert!(response.message.contains(&response.employee.employee_code));
}

#[test]
fn test_create_employee_logs_activity() {
    let mut persistence: Persistence = create_test_persistence();
    create_employee(
        &mut persistence,
        employee_request("Asha", "asha@leaddesk.test"),
        &create_test_admin(),
    )
    .unwrap();

    let feed: ListActivitiesResponse =
        recent_activities(&mut persistence, &create_test_admin()).unwrap();

    assert_eq!(feed.activities.len(), 1);
    assert_eq!(feed.activities[0].kind, "employee_created");
    assert_eq!(feed.activities[0].description, "New employee Asha Verma was added");
    assert_eq!(feed.activities[0].actor_id, "1000");
}

#[test]
fn test_create_employee_requires_admin() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<CreateEmployeeResponse, ApiError> = create_employee(
        &mut persistence,
        employee_request("Asha", "asha@leaddesk.test"),
        &create_test_sales(5),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_create_employee_rejects_unknown_role() {
    let mut persistence: Persistence = create_test_persistence();
    let mut request: CreateEmployeeRequest = employee_request("Asha", "asha@leaddesk.test");
    request.role = Some(String::from("manager"));

    let result: Result<CreateEmployeeResponse, ApiError> =
        create_employee(&mut persistence, request, &create_test_admin());

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "role"
    ));
}

#[test]
fn test_create_employee_rejects_blank_first_name() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<CreateEmployeeResponse, ApiError> = create_employee(
        &mut persistence,
        employee_request("  ", "blank@leaddesk.test"),
        &create_test_admin(),
    );

    assert_eq!(
        result,
        Err(ApiError::InvalidInput {
            field: String::from("first name"),
            message: String::from("First name is required"),
        })
    );
}

#[test]
fn test_create_employee_rejects_duplicate_email() {
    let mut persistence: Persistence = create_test_persistence();
    create_employee(
        &mut persistence,
        employee_request("Asha", "asha@leaddesk.test"),
        &create_test_admin(),
    )
    .unwrap();

    let result: Result<CreateEmployeeResponse, ApiError> = create_employee(
        &mut persistence,
        employee_request("Other", "ASHA@leaddesk.test"),
        &create_test_admin(),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "unique_email"
    ));
}

#[test]
fn test_deactivate_and_filter_employees() {
    let mut persistence: Persistence = create_test_persistence();
    let asha_id: i64 = seed_employee(&mut persistence, "Asha", "English").employee_id;
    seed_employee(&mut persistence, "Ravi", "Hindi");

    let response: SetEmployeeStatusResponse = set_employee_status(
        &mut persistence,
        asha_id,
        &SetEmployeeStatusRequest {
            status: String::from("Inactive"),
        },
        &create_test_admin(),
    )
    .unwrap();
    assert_eq!(response.employee.status, EmployeeStatus::Inactive);
    assert_eq!(response.message, "Employee Asha Tester is now Inactive");

    let inactive: ListEmployeesResponse = list_employees(
        &mut persistence,
        &ListEmployeesQuery {
            status: Some(String::from("Inactive")),
        },
        &create_test_admin(),
    )
    .unwrap();
    assert_eq!(inactive.employees.len(), 1);
    assert_eq!(inactive.employees[0].employee_id, asha_id);

    let everyone: ListEmployeesResponse = list_employees(
        &mut persistence,
        &ListEmployeesQuery::default(),
        &create_test_admin(),
    )
    .unwrap();
    assert_eq!(everyone.employees.len(), 2);
}

#[test]
fn test_set_status_rejects_unknown_status_and_missing_employee() {
    let mut persistence: Persistence = create_test_persistence();
    let asha_id: i64 = seed_employee(&mut persistence, "Asha", "English").employee_id;

    let unknown: Result<SetEmployeeStatusResponse, ApiError> = set_employee_status(
        &mut persistence,
        asha_id,
        &SetEmployeeStatusRequest {
            status: String::from("Paused"),
        },
        &create_test_admin(),
    );
    assert!(matches!(
        unknown,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "status"
    ));

    let missing: Result<SetEmployeeStatusResponse, ApiError> = set_employee_status(
        &mut persistence,
        9999,
        &SetEmployeeStatusRequest {
            status: String::from("Inactive"),
        },
        &create_test_admin(),
    );
    assert!(matches!(missing, Err(ApiError::ResourceNotFound { .. })));
}
