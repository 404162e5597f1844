// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request handlers.
//!
//! Each handler authorizes the actor, validates input, delegates to the
//! rotation engine and storage, and records activities for every state
//! change it makes.

use lead_desk::{
    BatchAssignment, EmployeePoolSnapshot, LeadMaterializer, MaterializeReport, PoolMember,
    assign_batch, materialize_batch, select_assignee,
};
use lead_desk_activity::{Activity, Actor, RecordedActivity};
use lead_desk_domain::{
    DomainError, Employee, EmployeeStatus, Language, Lead, LeadCandidate, LeadStatus, LeadType,
    LeadUpdate, NewEmployee, Role, ScheduleFilter, normalize_scheduled_date,
    validate_lead_candidate, validate_lead_close, validate_new_employee,
};
use lead_desk_persistence::{EmployeeFilter, LeadFilter, Persistence};
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::csv_import::ingest_leads_csv;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    ActivityInfo, CreateEmployeeRequest, CreateEmployeeResponse, CreateLeadRequest,
    CreateLeadResponse, ImportFailureInfo, ImportLeadsResponse, LeadResponse,
    ListActivitiesResponse, ListEmployeesQuery, ListEmployeesResponse, ListLeadsQuery,
    ListLeadsResponse, ReassignLeadRequest, ScheduledLeadsQuery, SetEmployeeStatusRequest,
    SetEmployeeStatusResponse, UpdateLeadRequest,
};

/// Number of entries returned by the activity feeds.
pub const ACTIVITY_FEED_LIMIT: i64 = 7;

/// Language given to employees created without one.
pub const DEFAULT_LANGUAGE: &str = "English";

fn activity_error(e: impl std::fmt::Display) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to record activity: {e}"),
    }
}

fn lead_not_found(lead_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Lead"),
        message: format!("Lead {lead_id} does not exist"),
    }
}

/// Today's UTC date as `YYYY-MM-DD`.
fn today_iso() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .date()
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format today's date: {e}"),
        })
}

fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: std::str::FromStr<Err = DomainError>,
{
    value
        .map(str::parse)
        .transpose()
        .map_err(translate_domain_error)
}

fn to_activity_infos(activities: Vec<RecordedActivity>) -> Vec<ActivityInfo> {
    activities.into_iter().map(ActivityInfo::from).collect()
}

// ============================================================================
// Employees
// ============================================================================

/// Adds an employee to the directory.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The employee to create
/// * `authenticated_actor` - The authenticated actor performing this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - A required field is empty or the role is unknown
/// - The email is already taken
pub fn create_employee(
    persistence: &mut Persistence,
    request: CreateEmployeeRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateEmployeeResponse, ApiError> {
    AuthorizationService::authorize_create_employee(authenticated_actor)?;

    let role: Role = parse_optional(request.role.as_deref())?.unwrap_or(Role::Sales);
    let language: Language =
        Language::new(request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE));

    let new_employee: NewEmployee = NewEmployee::new(
        &request.first_name,
        &request.last_name,
        &request.email,
        role,
        &request.location,
        language,
    );
    validate_new_employee(&new_employee).map_err(translate_domain_error)?;

    let employee: Employee = persistence
        .create_employee(&new_employee)
        .map_err(translate_persistence_error)?;

    persistence
        .log_activity(&Activity::employee_created(
            authenticated_actor.to_activity_actor(),
            &employee.first_name,
            &employee.last_name,
            employee.employee_id,
        ))
        .map_err(activity_error)?;

    info!(
        employee_id = employee.employee_id,
        code = %employee.employee_code,
        role = %employee.role,
        "Created employee"
    );

    Ok(CreateEmployeeResponse {
        message: format!(
            "Created employee {} ({})",
            employee.display_name(),
            employee.employee_code
        ),
        employee,
    })
}

/// Lists the employee directory, ordered by ID.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the status filter is
/// unknown, or the query fails.
pub fn list_employees(
    persistence: &mut Persistence,
    query: &ListEmployeesQuery,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListEmployeesResponse, ApiError> {
    AuthorizationService::authorize_list_employees(authenticated_actor)?;

    let filter: EmployeeFilter = EmployeeFilter {
        status: parse_optional::<EmployeeStatus>(query.status.as_deref())?,
        role: None,
    };

    let employees: Vec<Employee> =
        persistence
            .list_employees(&filter)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to list employees: {e}"),
            })?;

    Ok(ListEmployeesResponse { employees })
}

/// Activates or deactivates an employee.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the status is unknown,
/// or the employee does not exist.
pub fn set_employee_status(
    persistence: &mut Persistence,
    employee_id: i64,
    request: &SetEmployeeStatusRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<SetEmployeeStatusResponse, ApiError> {
    AuthorizationService::authorize_set_employee_status(authenticated_actor)?;

    let status: EmployeeStatus = request.status.parse().map_err(translate_domain_error)?;

    let employee: Employee = persistence
        .set_employee_status(employee_id, status)
        .map_err(translate_persistence_error)?;

    persistence
        .log_activity(&Activity::employee_status_changed(
            authenticated_actor.to_activity_actor(),
            &employee.display_name(),
            status.as_str(),
            employee_id,
        ))
        .map_err(activity_error)?;

    info!(employee_id, status = %status, "Employee status changed");

    Ok(SetEmployeeStatusResponse {
        message: format!("Employee {} is now {status}", employee.display_name()),
        employee,
    })
}

// ============================================================================
// Leads
// ============================================================================

/// Adds a single lead.
///
/// With `assigned_to` the lead goes straight to that employee, whatever
/// their language or status. Otherwise the rotation picks the assignee
/// from a fresh snapshot of the lead's language.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an admin
/// - Name, email or language is empty
/// - `assigned_to` names an employee that does not exist
/// - The lead cannot be stored
pub fn create_lead(
    persistence: &mut Persistence,
    request: CreateLeadRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<CreateLeadResponse, ApiError> {
    AuthorizationService::authorize_create_lead(authenticated_actor)?;

    let date: String = match request.date {
        Some(date) if !date.trim().is_empty() => date,
        _ => today_iso()?,
    };
    let candidate: LeadCandidate = LeadCandidate::new(
        request.name.trim(),
        request.email.trim(),
        request.source.as_deref().unwrap_or_default().trim(),
        date.trim(),
        request.location.as_deref().unwrap_or_default().trim(),
        Language::new(request.language.trim()),
    );
    validate_lead_candidate(&candidate).map_err(translate_domain_error)?;

    let assignee: Option<PoolMember> = if let Some(employee_id) = request.assigned_to {
        let employee: Employee = persistence
            .get_employee(employee_id)
            .map_err(translate_persistence_error)?
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Employee"),
                message: format!("Employee {employee_id} does not exist"),
            })?;
        Some(PoolMember::from_employee(&employee))
    } else {
        let members: Vec<PoolMember> = persistence
            .list_active_sales_employees(Some(&candidate.language))
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to load assignment pool: {e}"),
            })?;
        let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(members);
        select_assignee(&candidate.language, &snapshot).cloned()
    };

    let lead: Lead = persistence
        .materialize_assignment(
            &candidate,
            assignee.as_ref(),
            &authenticated_actor.to_activity_actor(),
        )
        .map_err(translate_persistence_error)?;

    let message: String = match &assignee {
        Some(member) => format!("Lead created and assigned to {}", member.display_name),
        None => format!("Lead created; no employee handles {}", lead.language),
    };

    info!(
        lead_id = lead.lead_id,
        assigned_to = ?lead.assigned_to,
        "Created lead"
    );

    Ok(CreateLeadResponse { lead, message })
}

/// Imports leads from an uploaded CSV and assigns them by rotation.
///
/// The whole upload is rejected if the file is malformed or any surviving
/// row is invalid. Otherwise every lead is assigned against one snapshot
/// taken at the start of the upload and stored independently; leads that
/// fail to store are reported and do not undo the others.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the CSV is rejected, or
/// the assignment pool cannot be loaded.
pub fn import_leads_csv(
    persistence: &mut Persistence,
    content: &str,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ImportLeadsResponse, ApiError> {
    AuthorizationService::authorize_import_leads(authenticated_actor)?;

    let candidates: Vec<LeadCandidate> = ingest_leads_csv(content)?;

    let members: Vec<PoolMember> =
        persistence
            .list_active_sales_employees(None)
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to load assignment pool: {e}"),
            })?;
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(members);
    if snapshot.is_empty() {
        warn!(
            leads = candidates.len(),
            "No active sales employees; uploaded leads stay unassigned"
        );
    }
    let languages: Vec<&str> = snapshot.languages().map(Language::value).collect();
    debug!(
        members = snapshot.member_count(),
        languages = ?languages,
        leads = candidates.len(),
        "Assigning uploaded leads"
    );

    let batch: BatchAssignment = assign_batch(candidates, &snapshot);
    let actor: Actor = authenticated_actor.to_activity_actor();
    let report: MaterializeReport = materialize_batch(persistence, &batch, &snapshot, &actor);

    let count: usize = report.created.len();
    info!(
        count,
        assigned = report.assigned_count(),
        unassigned = report.unassigned_count(),
        failed = report.failures.len(),
        "Imported leads"
    );

    Ok(ImportLeadsResponse {
        message: format!("Successfully uploaded {count} leads"),
        count,
        assigned: report.assigned_count(),
        unassigned: report.unassigned_count(),
        failures: report
            .failures
            .into_iter()
            .map(|f| ImportFailureInfo {
                position: f.position,
                lead_name: f.lead_name,
                message: f.message,
            })
            .collect(),
        leads: report.created,
    })
}

/// Moves a lead to another employee, bypassing rotation.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the lead or employee
/// does not exist.
pub fn reassign_lead(
    persistence: &mut Persistence,
    lead_id: i64,
    request: &ReassignLeadRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<LeadResponse, ApiError> {
    AuthorizationService::authorize_reassign_lead(authenticated_actor)?;

    let lead: Lead = persistence
        .reassign_lead(
            lead_id,
            request.employee_id,
            &authenticated_actor.to_activity_actor(),
        )
        .map_err(translate_persistence_error)?;

    Ok(LeadResponse {
        message: format!(
            "Lead {} assigned to employee {}",
            lead.name, request.employee_id
        ),
        lead,
    })
}

/// Builds the storage update from a request, normalizing every field.
fn build_lead_update(request: &UpdateLeadRequest) -> Result<LeadUpdate, ApiError> {
    let scheduled_date: Option<Option<String>> = match request.scheduled_date.as_deref() {
        None => None,
        Some(raw) if raw.trim().is_empty() => Some(None),
        Some(raw) => Some(Some(
            normalize_scheduled_date(raw).map_err(translate_domain_error)?,
        )),
    };

    Ok(LeadUpdate {
        lead_type: parse_optional::<LeadType>(request.lead_type.as_deref())?,
        status: parse_optional::<LeadStatus>(request.status.as_deref())?,
        scheduled_date,
    })
}

/// Updates a lead's type, status or scheduled time.
///
/// Only admins and the lead's assignee may update it. A lead cannot be
/// closed before the scheduled time it already carries. Closing an
/// assigned lead credits the assignee's closed counter and logs the close.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `lead_id` - The lead to update
/// * `request` - The requested changes
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `now` - The current time, for the closing guard
///
/// # Errors
///
/// Returns an error if:
/// - The lead does not exist
/// - The actor is neither an admin nor the assignee
/// - The request changes nothing or carries an unknown value
/// - The lead is closed before its scheduled time
pub fn update_lead(
    persistence: &mut Persistence,
    lead_id: i64,
    request: &UpdateLeadRequest,
    authenticated_actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<LeadResponse, ApiError> {
    let existing: Lead = persistence
        .get_lead(lead_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| lead_not_found(lead_id))?;

    AuthorizationService::authorize_update_lead(authenticated_actor, &existing)?;

    let update: LeadUpdate = build_lead_update(request)?;
    if update.is_empty() {
        return Err(translate_domain_error(DomainError::NoChanges));
    }

    let closing: bool =
        update.status == Some(LeadStatus::Closed) && existing.status != LeadStatus::Closed;
    if closing {
        validate_lead_close(existing.scheduled_date.as_deref(), now)
            .map_err(translate_domain_error)?;
    }

    let lead: Lead = persistence
        .update_lead(lead_id, &update)
        .map_err(translate_persistence_error)?;

    if let Some(employee_id) = lead.assigned_to.filter(|_| closing) {
        persistence
            .increment_closed_leads(employee_id)
            .map_err(translate_persistence_error)?;
        persistence
            .log_activity(&Activity::lead_closed(
                authenticated_actor.to_activity_actor(),
                &lead.name,
                employee_id,
                lead_id,
            ))
            .map_err(activity_error)?;
        info!(lead_id, employee_id, "Lead closed");
    }

    Ok(LeadResponse {
        lead,
        message: String::from("Lead updated successfully"),
    })
}

/// Lists every lead, newest first.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a filter value is
/// unknown, or the query fails.
pub fn list_leads(
    persistence: &mut Persistence,
    query: &ListLeadsQuery,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListLeadsResponse, ApiError> {
    AuthorizationService::authorize_list_all_leads(authenticated_actor)?;

    let filter: LeadFilter = LeadFilter {
        status: parse_optional::<LeadStatus>(query.status.as_deref())?,
        language: query.language.as_deref().map(Language::new),
        lead_type: parse_optional::<LeadType>(query.lead_type.as_deref())?,
        unassigned: None,
    };

    let leads: Vec<Lead> = persistence
        .list_leads(&filter)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to list leads: {e}"),
        })?;
    let unassigned_count: i64 =
        persistence
            .count_unassigned_leads()
            .map_err(|e| ApiError::Internal {
                message: format!("Failed to count unassigned leads: {e}"),
            })?;

    Ok(ListLeadsResponse {
        leads,
        unassigned_count: Some(unassigned_count),
    })
}

/// Lists the leads assigned to the acting employee, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_my_leads(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListLeadsResponse, ApiError> {
    let leads: Vec<Lead> = persistence
        .list_leads_for_employee(authenticated_actor.employee_id)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to list leads: {e}"),
        })?;

    Ok(ListLeadsResponse {
        leads,
        unassigned_count: None,
    })
}

/// Lists the acting employee's scheduled leads, soonest first.
///
/// # Errors
///
/// Returns an error if the filter is unknown or the query fails.
pub fn list_scheduled_leads(
    persistence: &mut Persistence,
    query: &ScheduledLeadsQuery,
    authenticated_actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<ListLeadsResponse, ApiError> {
    let filter: ScheduleFilter =
        parse_optional::<ScheduleFilter>(query.filter.as_deref())?.unwrap_or_default();

    let leads: Vec<Lead> = persistence
        .list_scheduled_leads(authenticated_actor.employee_id, filter, now)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to list scheduled leads: {e}"),
        })?;

    Ok(ListLeadsResponse {
        leads,
        unassigned_count: None,
    })
}

// ============================================================================
// Activities
// ============================================================================

/// Returns the latest activities across the whole system.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the query fails.
pub fn recent_activities(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListActivitiesResponse, ApiError> {
    AuthorizationService::authorize_list_all_leads(authenticated_actor)?;

    let activities: Vec<RecordedActivity> = persistence
        .recent_activities(ACTIVITY_FEED_LIMIT)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to load activities: {e}"),
        })?;

    Ok(ListActivitiesResponse {
        activities: to_activity_infos(activities),
    })
}

/// Returns the latest activities concerning the acting employee.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn my_activities(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListActivitiesResponse, ApiError> {
    let activities: Vec<RecordedActivity> = persistence
        .activities_for_employee(authenticated_actor.employee_id, ACTIVITY_FEED_LIMIT)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to load activities: {e}"),
        })?;

    Ok(ListActivitiesResponse {
        activities: to_activity_infos(activities),
    })
}
