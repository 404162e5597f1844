// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use std::collections::BTreeMap;

use lead_desk_activity::{Activity, RecordedActivity};
use lead_desk_domain::{Employee, Lead};
use serde::{Deserialize, Serialize};

/// API request to add an employee to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `"admin"` or `"sales"`. Defaults to `"sales"`.
    #[serde(default)]
    pub role: Option<String>,
    pub location: String,
    /// The single language the employee handles. Defaults to `"English"`.
    #[serde(default)]
    pub language: Option<String>,
}

/// API response for a successful employee creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEmployeeResponse {
    /// The created employee.
    pub employee: Employee,
    /// A success message.
    pub message: String,
}

/// Query parameters for listing employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListEmployeesQuery {
    /// `"Active"` or `"Inactive"`.
    #[serde(default)]
    pub status: Option<String>,
}

/// API response listing employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEmployeesResponse {
    pub employees: Vec<Employee>,
}

/// API request to activate or deactivate an employee.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetEmployeeStatusRequest {
    /// `"Active"` or `"Inactive"`.
    pub status: String,
}

/// API response for a status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetEmployeeStatusResponse {
    /// The employee after the change.
    pub employee: Employee,
    /// A success message.
    pub message: String,
}

/// API request to add a single lead.
///
/// Without `assigned_to` the lead goes through rotation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateLeadRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub source: Option<String>,
    /// Defaults to today's date (UTC, `YYYY-MM-DD`).
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub language: String,
    /// Hands the lead straight to this employee.
    #[serde(default)]
    pub assigned_to: Option<i64>,
}

/// API response for a single created lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLeadResponse {
    /// The stored lead.
    pub lead: Lead,
    /// A success message.
    pub message: String,
}

/// A lead of an upload that could not be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFailureInfo {
    /// 0-based position among the uploaded leads that survived parsing.
    pub position: usize,
    pub lead_name: String,
    pub message: String,
}

/// API response for a CSV upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportLeadsResponse {
    /// A success message.
    pub message: String,
    /// Number of leads stored.
    pub count: usize,
    /// Stored leads that received an assignee.
    pub assigned: usize,
    /// Stored leads that nobody handles.
    pub unassigned: usize,
    /// Leads that were not stored.
    pub failures: Vec<ImportFailureInfo>,
    /// The stored leads, in upload order.
    pub leads: Vec<Lead>,
}

/// Query parameters for listing leads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListLeadsQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, rename = "type")]
    pub lead_type: Option<String>,
}

/// API response listing leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLeadsResponse {
    pub leads: Vec<Lead>,
    /// Leads in the whole store with no assignee. Only reported to admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unassigned_count: Option<i64>,
}

/// Query parameters for listing scheduled leads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScheduledLeadsQuery {
    /// `"All"` or `"Today"`. Defaults to `"All"`.
    #[serde(default)]
    pub filter: Option<String>,
}

/// API request to move a lead to another employee.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReassignLeadRequest {
    pub employee_id: i64,
}

/// API request to update a lead's progress.
///
/// An empty `scheduled_date` clears the scheduled time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateLeadRequest {
    #[serde(default, rename = "type")]
    pub lead_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub scheduled_date: Option<String>,
}

/// API response carrying one changed lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadResponse {
    pub lead: Lead,
    pub message: String,
}

/// One entry of the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityInfo {
    pub activity_id: i64,
    pub kind: String,
    pub description: String,
    pub actor_id: String,
    pub actor_type: String,
    pub employee_id: Option<i64>,
    pub lead_id: Option<i64>,
    pub metadata: BTreeMap<String, String>,
    pub created_at: String,
}

impl From<RecordedActivity> for ActivityInfo {
    fn from(recorded: RecordedActivity) -> Self {
        let activity: Activity = recorded.activity;
        Self {
            activity_id: recorded.activity_id,
            kind: activity.kind.as_str().to_string(),
            description: activity.description,
            actor_id: activity.actor.id,
            actor_type: activity.actor.actor_type,
            employee_id: activity.employee_id,
            lead_id: activity.lead_id,
            metadata: activity.metadata,
            created_at: recorded.created_at,
        }
    }
}

/// API response listing activities, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListActivitiesResponse {
    pub activities: Vec<ActivityInfo>,
}
