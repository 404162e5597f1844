// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lead_desk_activity::{Activity, Actor};
use lead_desk_domain::{
    AssignmentId, Employee, EmployeeStatus, Language, Lead, LeadCandidate, LeadStatus, NewLead,
    Role,
};
use std::collections::BTreeMap;

use crate::{LeadMaterializer, PoolMember};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("1"), String::from("admin"))
}

pub fn create_test_member(employee_id: i64, language: &str, assigned_leads: u32) -> PoolMember {
    PoolMember {
        employee_id,
        display_name: format!("Employee {employee_id}"),
        language: Language::new(language),
        assigned_leads,
    }
}

pub fn create_test_employee(
    employee_id: i64,
    role: Role,
    status: EmployeeStatus,
    language: &str,
) -> Employee {
    Employee {
        employee_id,
        employee_code: format!("#23454GH{employee_id:06}"),
        first_name: String::from("Test"),
        last_name: format!("Employee{employee_id}"),
        email: format!("employee{employee_id}@example.com"),
        role,
        location: String::from("Remote"),
        language: Language::new(language),
        status,
        assigned_leads: 0,
        closed_leads: 0,
        created_at: String::from("2026-01-01T00:00:00Z"),
    }
}

pub fn create_test_candidate(name: &str, language: &str) -> LeadCandidate {
    LeadCandidate::new(
        name,
        &format!("{}@example.com", name.to_lowercase()),
        "Website",
        "2026-02-01",
        "Pune",
        Language::new(language),
    )
}

/// In-memory materializer recording every call.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pub leads: Vec<Lead>,
    pub counters: BTreeMap<i64, u32>,
    pub activities: Vec<Activity>,
    /// Lead names whose creation should fail.
    pub fail_on: Vec<String>,
}

impl LeadMaterializer for RecordingStore {
    type Error = String;

    fn create_lead(&mut self, lead: &NewLead) -> Result<Lead, Self::Error> {
        if self.fail_on.contains(&lead.candidate.name) {
            return Err(format!("refusing to store {}", lead.candidate.name));
        }

        let lead_id: i64 = i64::try_from(self.leads.len()).unwrap() + 1;
        let stored: Lead = Lead {
            lead_id,
            name: lead.candidate.name.clone(),
            email: lead.candidate.email.clone(),
            source: lead.candidate.source.clone(),
            date: lead.candidate.date.clone(),
            location: lead.candidate.location.clone(),
            language: lead.candidate.language.clone(),
            assigned_to: lead.assigned_to,
            assignment_id: lead
                .assigned_to
                .map(|_| AssignmentId::from_stored(format!("#ASNTEST{lead_id:06}"))),
            status: LeadStatus::Ongoing,
            lead_type: None,
            scheduled_date: None,
            created_at: String::from("2026-02-01T00:00:00Z"),
            updated_at: String::from("2026-02-01T00:00:00Z"),
        };
        self.leads.push(stored.clone());
        Ok(stored)
    }

    fn increment_assigned_leads(&mut self, employee_id: i64) -> Result<(), Self::Error> {
        *self.counters.entry(employee_id).or_insert(0) += 1;
        Ok(())
    }

    fn decrement_assigned_leads(&mut self, employee_id: i64) -> Result<(), Self::Error> {
        let counter: &mut u32 = self.counters.entry(employee_id).or_insert(0);
        *counter = counter.saturating_sub(1);
        Ok(())
    }

    fn log_activity(&mut self, activity: &Activity) -> Result<i64, Self::Error> {
        self.activities.push(activity.clone());
        Ok(i64::try_from(self.activities.len()).unwrap())
    }
}
