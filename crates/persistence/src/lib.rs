// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Lead Desk CRM.
//!
//! This crate stores employees, leads and the activity feed in `SQLite`
//! through Diesel, and implements the assignment engine's
//! `LeadMaterializer` port.
//!
//! ## Storage
//!
//! - File databases run in WAL mode
//! - Foreign key enforcement is verified at start-up
//! - Migrations are embedded and applied on open
//! - Every `new_in_memory()` call gets its own isolated database
//!
//! ## Atomicity
//!
//! Applying one assigned lead (insert, counter increment, activity) and a
//! manual reassignment each run in a single transaction. Batches are not
//! transactional as a whole: a failed lead leaves earlier leads in place.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::{Connection, SqliteConnection};
use lead_desk::{LeadMaterializer, PoolMember};
use lead_desk_activity::{Activity, Actor, RecordedActivity};
use lead_desk_domain::{
    AssignmentId, Employee, EmployeeStatus, Language, Lead, LeadCandidate, LeadUpdate,
    NewEmployee, NewLead, ScheduleFilter, employee_code_from_entropy, format_timestamp,
};
use num_traits::ToPrimitive;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::{info, warn};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::sqlite::MIGRATIONS;
pub use data_models::{EmployeeFilter, LeadFilter};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// How many fresh employee codes to try before giving up.
const EMPLOYEE_CODE_ATTEMPTS: usize = 8;

/// Returns the current time in stored form.
fn current_timestamp() -> Result<String, PersistenceError> {
    format_timestamp(OffsetDateTime::now_utc())
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Issues a new assignment ID from the clock and the thread RNG.
fn new_assignment_id() -> AssignmentId {
    let millis: u128 = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000)
        .to_u128()
        .unwrap_or_default();
    AssignmentId::from_entropy(millis, rand::random::<u64>())
}

/// Persistence adapter for the CRM.
///
/// Wraps one `SQLite` connection. The server shares it behind an async
/// mutex, so every method takes `&mut self`.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance, so tests never share state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Creates an employee with a freshly generated employee code.
    ///
    /// # Arguments
    ///
    /// * `employee` - Validated employee data (email already lower-cased)
    ///
    /// # Returns
    ///
    /// The stored employee, with zeroed counters and `Active` status.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateEmail` if the email is taken, or
    /// an error if the write fails.
    pub fn create_employee(&mut self, employee: &NewEmployee) -> Result<Employee, PersistenceError> {
        let created_at: String = current_timestamp()?;

        self.conn.transaction(|conn| {
            if queries::employees::get_employee_by_email(conn, &employee.email)?.is_some() {
                return Err(PersistenceError::DuplicateEmail(employee.email.clone()));
            }

            let mut employee_code: Option<String> = None;
            for _ in 0..EMPLOYEE_CODE_ATTEMPTS {
                let candidate: String = employee_code_from_entropy(rand::random::<u64>());
                if !queries::employees::employee_code_exists(conn, &candidate)? {
                    employee_code = Some(candidate);
                    break;
                }
            }
            let employee_code: String = employee_code.ok_or_else(|| {
                PersistenceError::DatabaseError("Could not allocate a unique employee code".into())
            })?;

            let employee_id: i64 =
                mutations::employees::insert_employee(conn, employee, &employee_code, &created_at)?;

            queries::employees::get_employee(conn, employee_id)?
                .ok_or(PersistenceError::EmployeeNotFound(employee_id))
        })
    }

    /// Retrieves an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_employee(&mut self, employee_id: i64) -> Result<Option<Employee>, PersistenceError> {
        queries::employees::get_employee(&mut self.conn, employee_id)
    }

    /// Lists employees matching a filter, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_employees(
        &mut self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, PersistenceError> {
        queries::employees::list_employees(&mut self.conn, filter)
    }

    /// Activates or deactivates an employee.
    ///
    /// Deactivated employees drop out of the assignment pool but keep
    /// their leads and counters.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if no employee has this ID.
    pub fn set_employee_status(
        &mut self,
        employee_id: i64,
        status: EmployeeStatus,
    ) -> Result<Employee, PersistenceError> {
        self.conn.transaction(|conn| {
            mutations::employees::update_employee_status(conn, employee_id, status)?;
            queries::employees::get_employee(conn, employee_id)?
                .ok_or(PersistenceError::EmployeeNotFound(employee_id))
        })
    }

    /// Lists the employees eligible for rotation.
    ///
    /// # Arguments
    ///
    /// * `language` - Restrict to one language, or `None` for every language
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_active_sales_employees(
        &mut self,
        language: Option<&Language>,
    ) -> Result<Vec<PoolMember>, PersistenceError> {
        queries::employees::list_active_sales_employees(&mut self.conn, language)
    }

    /// Adds one to an employee's closed-lead counter.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if no employee has this ID.
    pub fn increment_closed_leads(&mut self, employee_id: i64) -> Result<(), PersistenceError> {
        mutations::employees::increment_closed_leads(&mut self.conn, employee_id)
    }

    // ========================================================================
    // Leads
    // ========================================================================

    /// Retrieves a lead by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_lead(&mut self, lead_id: i64) -> Result<Option<Lead>, PersistenceError> {
        queries::leads::get_lead(&mut self.conn, lead_id)
    }

    /// Lists leads matching a filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_leads(&mut self, filter: &LeadFilter) -> Result<Vec<Lead>, PersistenceError> {
        queries::leads::list_leads(&mut self.conn, filter)
    }

    /// Lists the leads assigned to an employee, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_leads_for_employee(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<Lead>, PersistenceError> {
        queries::leads::list_leads_for_employee(&mut self.conn, employee_id)
    }

    /// Lists an employee's scheduled leads, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_scheduled_leads(
        &mut self,
        employee_id: i64,
        filter: ScheduleFilter,
        now: OffsetDateTime,
    ) -> Result<Vec<Lead>, PersistenceError> {
        queries::leads::list_scheduled_leads(&mut self.conn, employee_id, filter, now)
    }

    /// Applies an update to a lead and returns the stored result.
    ///
    /// Business rules (who may update, closing guards) are enforced by the
    /// caller. Scheduled dates must already be in stored form.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::LeadNotFound` if no lead has this ID.
    pub fn update_lead(
        &mut self,
        lead_id: i64,
        update: &LeadUpdate,
    ) -> Result<Lead, PersistenceError> {
        let now: String = current_timestamp()?;

        self.conn.transaction(|conn| {
            mutations::leads::update_lead(conn, lead_id, update, &now)?;
            queries::leads::get_lead(conn, lead_id)?.ok_or(PersistenceError::LeadNotFound(lead_id))
        })
    }

    /// Hands a lead to an employee, bypassing rotation.
    ///
    /// The previous assignee (if any) loses one from their assigned counter,
    /// the new assignee gains one, the lead gets a fresh assignment ID and a
    /// `lead_assigned` activity is logged. Language and block position are
    /// not checked. Reassigning to the current assignee still issues a new
    /// assignment ID and leaves the counter unchanged.
    ///
    /// # Arguments
    ///
    /// * `lead_id` - The lead to move
    /// * `employee_id` - The new assignee; any existing employee is accepted
    /// * `actor` - Who the activity is attributed to
    ///
    /// # Errors
    ///
    /// Returns `LeadNotFound` or `EmployeeNotFound`, or an error if a write
    /// fails. Nothing is written on error.
    pub fn reassign_lead(
        &mut self,
        lead_id: i64,
        employee_id: i64,
        actor: &Actor,
    ) -> Result<Lead, PersistenceError> {
        let now: String = current_timestamp()?;
        let assignment_id: AssignmentId = new_assignment_id();

        self.conn.transaction(|conn| {
            let lead: Lead = queries::leads::get_lead(conn, lead_id)?
                .ok_or(PersistenceError::LeadNotFound(lead_id))?;
            let employee: Employee = queries::employees::get_employee(conn, employee_id)?
                .ok_or(PersistenceError::EmployeeNotFound(employee_id))?;

            if let Some(previous) = lead.assigned_to {
                mutations::employees::decrement_assigned_leads(conn, previous)?;
            }
            mutations::leads::set_lead_assignee(conn, lead_id, employee_id, &assignment_id, &now)?;
            mutations::employees::increment_assigned_leads(conn, employee_id)?;

            let mut activity: Activity = Activity::lead_assigned(
                actor.clone(),
                &lead.name,
                &employee.display_name(),
                employee_id,
                lead_id,
            )
            .with_metadata("assignment_id", assignment_id.value());
            if let Some(previous) = lead.assigned_to {
                activity = activity.with_metadata("previous_assignee", &previous.to_string());
            }
            mutations::activities::insert_activity(conn, &activity, &now)?;

            info!(lead_id, employee_id, previous = ?lead.assigned_to, "Lead reassigned");

            queries::leads::get_lead(conn, lead_id)?.ok_or(PersistenceError::LeadNotFound(lead_id))
        })
    }

    /// Counts leads that nobody handles.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_unassigned_leads(&mut self) -> Result<i64, PersistenceError> {
        queries::leads::count_unassigned_leads(&mut self.conn)
    }

    // ========================================================================
    // Activities
    // ========================================================================

    /// Returns the most recent activities, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn recent_activities(&mut self, limit: i64) -> Result<Vec<RecordedActivity>, PersistenceError> {
        queries::activities::recent_activities(&mut self.conn, limit)
    }

    /// Returns the most recent activities concerning one employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn activities_for_employee(
        &mut self,
        employee_id: i64,
        limit: i64,
    ) -> Result<Vec<RecordedActivity>, PersistenceError> {
        queries::activities::activities_for_employee(&mut self.conn, employee_id, limit)
    }
}

impl LeadMaterializer for Persistence {
    type Error = PersistenceError;

    fn create_lead(&mut self, lead: &NewLead) -> Result<Lead, Self::Error> {
        let now: String = current_timestamp()?;
        let assignment_id: Option<AssignmentId> = lead.assigned_to.map(|_| new_assignment_id());

        self.conn.transaction(|conn| {
            let lead_id: i64 = mutations::leads::insert_lead(conn, lead, assignment_id.as_ref(), &now)?;
            queries::leads::get_lead(conn, lead_id)?.ok_or(PersistenceError::LeadNotFound(lead_id))
        })
    }

    fn increment_assigned_leads(&mut self, employee_id: i64) -> Result<(), Self::Error> {
        mutations::employees::increment_assigned_leads(&mut self.conn, employee_id)
    }

    fn decrement_assigned_leads(&mut self, employee_id: i64) -> Result<(), Self::Error> {
        mutations::employees::decrement_assigned_leads(&mut self.conn, employee_id)
    }

    fn log_activity(&mut self, activity: &Activity) -> Result<i64, Self::Error> {
        let now: String = current_timestamp()?;
        mutations::activities::insert_activity(&mut self.conn, activity, &now)
    }

    /// Writes the lead, bumps the counter and logs the assignment in one transaction.
    fn materialize_assignment(
        &mut self,
        candidate: &LeadCandidate,
        assignee: Option<&PoolMember>,
        actor: &Actor,
    ) -> Result<Lead, Self::Error> {
        let now: String = current_timestamp()?;
        let new_lead: NewLead = NewLead {
            candidate: candidate.clone(),
            assigned_to: assignee.map(|m| m.employee_id),
        };
        let assignment_id: Option<AssignmentId> = assignee.map(|_| new_assignment_id());

        let result: Result<Lead, PersistenceError> = self.conn.transaction(|conn| {
            let lead_id: i64 =
                mutations::leads::insert_lead(conn, &new_lead, assignment_id.as_ref(), &now)?;

            if let Some(member) = assignee {
                mutations::employees::increment_assigned_leads(conn, member.employee_id)?;
                let activity: Activity = Activity::lead_assigned(
                    actor.clone(),
                    &candidate.name,
                    &member.display_name,
                    member.employee_id,
                    lead_id,
                );
                mutations::activities::insert_activity(conn, &activity, &now)?;
            }

            queries::leads::get_lead(conn, lead_id)?.ok_or(PersistenceError::LeadNotFound(lead_id))
        });

        if let Err(e) = &result {
            warn!(lead = %candidate.name, error = %e, "Lead was not stored");
        }
        result
    }
}
