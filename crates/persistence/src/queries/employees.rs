// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use lead_desk::PoolMember;
use lead_desk_domain::{Employee, EmployeeStatus, Language, Role};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::data_models::EmployeeFilter;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
struct EmployeeRow {
    employee_id: i64,
    employee_code: String,
    first_name: String,
    last_name: String,
    email: String,
    role: String,
    location: String,
    language: String,
    status: String,
    assigned_leads: i32,
    closed_leads: i32,
    created_at: String,
}

/// Converts a stored counter to its domain form.
pub(crate) fn counter_from_row(value: i32, column: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::CorruptRecord(format!("{column} holds negative value {value}"))
    })
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = PersistenceError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            employee_id: row.employee_id,
            employee_code: row.employee_code,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            role: row.role.parse::<Role>()?,
            location: row.location,
            language: Language::new(&row.language),
            status: row.status.parse::<EmployeeStatus>()?,
            assigned_leads: counter_from_row(row.assigned_leads, "assigned_leads")?,
            closed_leads: counter_from_row(row.closed_leads, "closed_leads")?,
            created_at: row.created_at,
        })
    }
}

/// Retrieves an employee by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the employee is not found.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<Employee>, PersistenceError> {
    debug!(employee_id, "Looking up employee");

    employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?
        .map(Employee::try_from)
        .transpose()
}

/// Retrieves an employee by email address.
///
/// The address is matched against the stored lower-case form.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_employee_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<Employee>, PersistenceError> {
    let normalized: String = email.trim().to_lowercase();
    debug!(email = %normalized, "Looking up employee by email");

    employees::table
        .filter(employees::email.eq(&normalized))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?
        .map(Employee::try_from)
        .transpose()
}

/// Returns whether an employee code is already taken.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn employee_code_exists(
    conn: &mut SqliteConnection,
    employee_code: &str,
) -> Result<bool, PersistenceError> {
    let count: i64 = employees::table
        .filter(employees::employee_code.eq(employee_code))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists employees matching a filter, ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or a row cannot be converted.
pub fn list_employees(
    conn: &mut SqliteConnection,
    filter: &EmployeeFilter,
) -> Result<Vec<Employee>, PersistenceError> {
    debug!(?filter, "Listing employees");

    let mut query = employees::table
        .select(EmployeeRow::as_select())
        .order(employees::employee_id.asc())
        .into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(employees::status.eq(status.as_str()));
    }
    if let Some(role) = filter.role {
        query = query.filter(employees::role.eq(role.as_str()));
    }

    query
        .load::<EmployeeRow>(conn)?
        .into_iter()
        .map(Employee::try_from)
        .collect()
}

/// Lists the employees eligible for rotation: active sales staff.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `language` - Restrict to one language, or `None` for every language
///
/// # Returns
///
/// Pool members ordered by employee ID, carrying their persisted counters.
///
/// # Errors
///
/// Returns an error if the database query fails or a counter is corrupt.
pub fn list_active_sales_employees(
    conn: &mut SqliteConnection,
    language: Option<&Language>,
) -> Result<Vec<PoolMember>, PersistenceError> {
    debug!(language = ?language.map(Language::value), "Loading assignment pool");

    let mut query = employees::table
        .filter(employees::role.eq(Role::Sales.as_str()))
        .filter(employees::status.eq(EmployeeStatus::Active.as_str()))
        .select((
            employees::employee_id,
            employees::first_name,
            employees::last_name,
            employees::language,
            employees::assigned_leads,
        ))
        .order(employees::employee_id.asc())
        .into_boxed();

    if let Some(language) = language {
        query = query.filter(employees::language.eq(language.value().to_string()));
    }

    query
        .load::<(i64, String, String, String, i32)>(conn)?
        .into_iter()
        .map(|(employee_id, first_name, last_name, language, assigned)| {
            Ok(PoolMember {
                employee_id,
                display_name: format!("{first_name} {last_name}"),
                language: Language::new(&language),
                assigned_leads: counter_from_row(assigned, "assigned_leads")?,
            })
        })
        .collect()
}
