// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee writes and counter maintenance.

use diesel::prelude::*;
use diesel::SqliteConnection;
use lead_desk_domain::{EmployeeStatus, NewEmployee};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::employees;
use crate::error::PersistenceError;

/// Inserts an employee with zeroed counters.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee` - The validated employee data
/// * `employee_code` - A freshly generated, unused code
/// * `created_at` - The creation timestamp
///
/// # Errors
///
/// Returns an error if the insert violates a constraint or fails.
pub fn insert_employee(
    conn: &mut SqliteConnection,
    employee: &NewEmployee,
    employee_code: &str,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    info!(
        email = %employee.email,
        role = %employee.role,
        language = %employee.language,
        "Creating employee"
    );

    diesel::insert_into(employees::table)
        .values((
            employees::employee_code.eq(employee_code),
            employees::first_name.eq(&employee.first_name),
            employees::last_name.eq(&employee.last_name),
            employees::email.eq(&employee.email),
            employees::role.eq(employee.role.as_str()),
            employees::location.eq(&employee.location),
            employees::language.eq(employee.language.value()),
            employees::status.eq(EmployeeStatus::Active.as_str()),
            employees::assigned_leads.eq(0),
            employees::closed_leads.eq(0),
            employees::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let employee_id: i64 = get_last_insert_rowid(conn)?;
    info!(employee_id, employee_code, "Employee created");

    Ok(employee_id)
}

/// Activates or deactivates an employee.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if no employee has this ID.
pub fn update_employee_status(
    conn: &mut SqliteConnection,
    employee_id: i64,
    status: EmployeeStatus,
) -> Result<(), PersistenceError> {
    info!(employee_id, %status, "Updating employee status");

    let rows_affected: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set(employees::status.eq(status.as_str()))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }
    Ok(())
}

/// Adds one to the lifetime assigned-lead counter.
///
/// The increment happens in a single statement so concurrent writers never
/// lose an update.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if no employee has this ID.
pub fn increment_assigned_leads(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    debug!(employee_id, "Incrementing assigned_leads");

    let rows_affected: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set(employees::assigned_leads.eq(employees::assigned_leads + 1))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }
    Ok(())
}

/// Subtracts one from the assigned-lead counter, stopping at zero.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if no employee has this ID.
pub fn decrement_assigned_leads(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    debug!(employee_id, "Decrementing assigned_leads");

    let rows_affected: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .filter(employees::assigned_leads.gt(0))
        .set(employees::assigned_leads.eq(employees::assigned_leads - 1))
        .execute(conn)?;

    if rows_affected == 0 {
        let exists: i64 = employees::table
            .filter(employees::employee_id.eq(employee_id))
            .count()
            .get_result(conn)?;
        if exists == 0 {
            return Err(PersistenceError::EmployeeNotFound(employee_id));
        }
    }
    Ok(())
}

/// Adds one to the closed-lead counter.
///
/// # Errors
///
/// Returns `PersistenceError::EmployeeNotFound` if no employee has this ID.
pub fn increment_closed_leads(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<(), PersistenceError> {
    debug!(employee_id, "Incrementing closed_leads");

    let rows_affected: usize = diesel::update(employees::table)
        .filter(employees::employee_id.eq(employee_id))
        .set(employees::closed_leads.eq(employees::closed_leads + 1))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::EmployeeNotFound(employee_id));
    }
    Ok(())
}
