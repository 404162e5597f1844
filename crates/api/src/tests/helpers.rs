// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use lead_desk_domain::{Employee, Language, Lead, LeadStatus, NewEmployee, Role};
use lead_desk_persistence::Persistence;

use crate::{AuthenticatedActor, CreateLeadRequest, UpdateLeadRequest};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(1000, Role::Admin)
}

pub fn create_test_sales(employee_id: i64) -> AuthenticatedActor {
    AuthenticatedActor::new(employee_id, Role::Sales)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

/// Stores an active sales employee named "<first_name> Tester".
pub fn seed_employee(persistence: &mut Persistence, first_name: &str, language: &str) -> Employee {
    let new_employee: NewEmployee = NewEmployee::new(
        first_name,
        "Tester",
        &format!("{}@leaddesk.test", first_name.to_lowercase()),
        Role::Sales,
        "Pune",
        Language::new(language),
    );
    persistence
        .create_employee(&new_employee)
        .expect("employee created")
}

pub fn create_lead_request(name: &str, language: &str) -> CreateLeadRequest {
    CreateLeadRequest {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        source: Some(String::from("Referral")),
        date: Some(String::from("2026-03-01")),
        location: Some(String::from("Mumbai")),
        language: language.to_string(),
        assigned_to: None,
    }
}

pub fn status_update(status: &str) -> UpdateLeadRequest {
    UpdateLeadRequest {
        status: Some(status.to_string()),
        ..UpdateLeadRequest::default()
    }
}

/// A lead value for authorization checks; never stored.
pub fn detached_lead(assigned_to: Option<i64>) -> Lead {
    Lead {
        lead_id: 1,
        name: String::from("Detached"),
        email: String::from("detached@example.com"),
        source: String::from("Referral"),
        date: String::from("2026-03-01"),
        location: String::from("Mumbai"),
        language: Language::new("English"),
        assigned_to,
        assignment_id: None,
        status: LeadStatus::Ongoing,
        lead_type: None,
        scheduled_date: None,
        created_at: String::from("2026-03-01T00:00:00Z"),
        updated_at: String::from("2026-03-01T00:00:00Z"),
    }
}
