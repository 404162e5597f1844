// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead writes.

use diesel::prelude::*;
use diesel::SqliteConnection;
use lead_desk_domain::{AssignmentId, LeadStatus, LeadUpdate, NewLead};
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::leads;
use crate::error::PersistenceError;

/// Columns touched by a lead update. `None` leaves a column as it is.
#[derive(AsChangeset)]
#[diesel(table_name = leads)]
struct LeadChangeset<'a> {
    lead_type: Option<&'a str>,
    status: Option<&'a str>,
    scheduled_date: Option<Option<&'a str>>,
    updated_at: &'a str,
}

/// Inserts a lead.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `lead` - The lead and its decided assignee
/// * `assignment_id` - Must be `Some` exactly when `lead.assigned_to` is
/// * `now` - Creation timestamp
///
/// # Errors
///
/// Returns an error if the assignee does not exist or the insert fails.
pub fn insert_lead(
    conn: &mut SqliteConnection,
    lead: &NewLead,
    assignment_id: Option<&AssignmentId>,
    now: &str,
) -> Result<i64, PersistenceError> {
    let candidate = &lead.candidate;

    diesel::insert_into(leads::table)
        .values((
            leads::name.eq(&candidate.name),
            leads::email.eq(&candidate.email),
            leads::source.eq(&candidate.source),
            leads::date.eq(&candidate.date),
            leads::location.eq(&candidate.location),
            leads::language.eq(candidate.language.value()),
            leads::assigned_to.eq(lead.assigned_to),
            leads::assignment_id.eq(assignment_id.map(AssignmentId::value)),
            leads::status.eq(LeadStatus::Ongoing.as_str()),
            leads::created_at.eq(now),
            leads::updated_at.eq(now),
        ))
        .execute(conn)?;

    let lead_id: i64 = get_last_insert_rowid(conn)?;
    info!(
        lead_id,
        assigned_to = ?lead.assigned_to,
        language = %candidate.language,
        "Lead created"
    );

    Ok(lead_id)
}

/// Applies an update to a lead.
///
/// # Errors
///
/// Returns `PersistenceError::LeadNotFound` if no lead has this ID.
pub fn update_lead(
    conn: &mut SqliteConnection,
    lead_id: i64,
    update: &LeadUpdate,
    now: &str,
) -> Result<(), PersistenceError> {
    info!(lead_id, ?update, "Updating lead");

    let changes: LeadChangeset<'_> = LeadChangeset {
        lead_type: update.lead_type.map(|t| t.as_str()),
        status: update.status.map(|s| s.as_str()),
        scheduled_date: update.scheduled_date.as_ref().map(Option::as_deref),
        updated_at: now,
    };

    let rows_affected: usize = diesel::update(leads::table)
        .filter(leads::lead_id.eq(lead_id))
        .set(&changes)
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::LeadNotFound(lead_id));
    }
    Ok(())
}

/// Points a lead at a new assignee under a fresh assignment ID.
///
/// # Errors
///
/// Returns `PersistenceError::LeadNotFound` if no lead has this ID.
pub fn set_lead_assignee(
    conn: &mut SqliteConnection,
    lead_id: i64,
    employee_id: i64,
    assignment_id: &AssignmentId,
    now: &str,
) -> Result<(), PersistenceError> {
    info!(lead_id, employee_id, %assignment_id, "Reassigning lead");

    let rows_affected: usize = diesel::update(leads::table)
        .filter(leads::lead_id.eq(lead_id))
        .set((
            leads::assigned_to.eq(Some(employee_id)),
            leads::assignment_id.eq(Some(assignment_id.value())),
            leads::updated_at.eq(now),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::LeadNotFound(lead_id));
    }
    Ok(())
}
