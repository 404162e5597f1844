// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use lead_desk_domain::{
    AssignmentId, Language, Lead, LeadStatus, LeadType, ScheduleFilter, utc_day_bounds,
};
use time::OffsetDateTime;
use tracing::debug;

use crate::data_models::LeadFilter;
use crate::diesel_schema::leads;
use crate::error::PersistenceError;

/// Diesel Queryable struct for lead rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = leads)]
struct LeadRow {
    lead_id: i64,
    name: String,
    email: String,
    source: String,
    date: String,
    location: String,
    language: String,
    assigned_to: Option<i64>,
    assignment_id: Option<String>,
    status: String,
    lead_type: Option<String>,
    scheduled_date: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<LeadRow> for Lead {
    type Error = PersistenceError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        let lead_type: Option<LeadType> = row
            .lead_type
            .as_deref()
            .map(str::parse::<LeadType>)
            .transpose()?;

        Ok(Self {
            lead_id: row.lead_id,
            name: row.name,
            email: row.email,
            source: row.source,
            date: row.date,
            location: row.location,
            language: Language::new(&row.language),
            assigned_to: row.assigned_to,
            assignment_id: row.assignment_id.map(AssignmentId::from_stored),
            status: row.status.parse::<LeadStatus>()?,
            lead_type,
            scheduled_date: row.scheduled_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn convert_rows(rows: Vec<LeadRow>) -> Result<Vec<Lead>, PersistenceError> {
    rows.into_iter().map(Lead::try_from).collect()
}

/// Retrieves a lead by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the lead is not found.
pub fn get_lead(conn: &mut SqliteConnection, lead_id: i64) -> Result<Option<Lead>, PersistenceError> {
    debug!(lead_id, "Looking up lead");

    leads::table
        .filter(leads::lead_id.eq(lead_id))
        .select(LeadRow::as_select())
        .first(conn)
        .optional()?
        .map(Lead::try_from)
        .transpose()
}

/// Lists leads matching a filter, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be converted.
pub fn list_leads(
    conn: &mut SqliteConnection,
    filter: &LeadFilter,
) -> Result<Vec<Lead>, PersistenceError> {
    debug!(?filter, "Listing leads");

    let mut query = leads::table
        .select(LeadRow::as_select())
        .order((leads::created_at.desc(), leads::lead_id.desc()))
        .into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(leads::status.eq(status.as_str()));
    }
    if let Some(language) = &filter.language {
        query = query.filter(leads::language.eq(language.value().to_string()));
    }
    if let Some(lead_type) = filter.lead_type {
        query = query.filter(leads::lead_type.eq(lead_type.as_str()));
    }
    match filter.unassigned {
        Some(true) => query = query.filter(leads::assigned_to.is_null()),
        Some(false) => query = query.filter(leads::assigned_to.is_not_null()),
        None => {}
    }

    convert_rows(query.load::<LeadRow>(conn)?)
}

/// Lists the leads assigned to one employee, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be converted.
pub fn list_leads_for_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<Lead>, PersistenceError> {
    debug!(employee_id, "Listing leads for employee");

    let rows: Vec<LeadRow> = leads::table
        .filter(leads::assigned_to.eq(employee_id))
        .select(LeadRow::as_select())
        .order((leads::created_at.desc(), leads::lead_id.desc()))
        .load(conn)?;

    convert_rows(rows)
}

/// Lists an employee's leads that have a scheduled time, soonest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The assignee
/// * `filter` - `Today` keeps only the UTC day containing `now`
/// * `now` - The current time
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be converted.
pub fn list_scheduled_leads(
    conn: &mut SqliteConnection,
    employee_id: i64,
    filter: ScheduleFilter,
    now: OffsetDateTime,
) -> Result<Vec<Lead>, PersistenceError> {
    debug!(employee_id, ?filter, "Listing scheduled leads");

    let mut query = leads::table
        .filter(leads::assigned_to.eq(employee_id))
        .filter(leads::scheduled_date.is_not_null())
        .select(LeadRow::as_select())
        .order((leads::scheduled_date.asc(), leads::lead_id.asc()))
        .into_boxed();

    if filter == ScheduleFilter::Today {
        let (start, end): (String, String) =
            utc_day_bounds(now).map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
        query = query
            .filter(leads::scheduled_date.ge(start))
            .filter(leads::scheduled_date.lt(end));
    }

    convert_rows(query.load::<LeadRow>(conn)?)
}

/// Counts leads that nobody handles.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_unassigned_leads(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(leads::table
        .filter(leads::assigned_to.is_null())
        .count()
        .get_result(conn)?)
}
