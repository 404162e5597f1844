// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod activity_tests;

use lead_desk_activity::Actor;
use lead_desk_domain::{Employee, Language, LeadCandidate, NewEmployee, Role};

use crate::Persistence;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("1"), String::from("admin"))
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_employee(
    persistence: &mut Persistence,
    first_name: &str,
    role: Role,
    language: &str,
) -> Employee {
    let new_employee: NewEmployee = NewEmployee::new(
        first_name,
        "Tester",
        &format!("{}@leaddesk.test", first_name.to_lowercase()),
        role,
        "Pune",
        Language::new(language),
    );
    persistence
        .create_employee(&new_employee)
        .expect("employee created")
}

pub fn create_test_candidate(name: &str, language: &str) -> LeadCandidate {
    LeadCandidate::new(
        name,
        &format!("{}@example.com", name.to_lowercase()),
        "Referral",
        "2026-03-01",
        "Mumbai",
        Language::new(language),
    )
}
