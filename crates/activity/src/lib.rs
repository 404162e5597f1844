// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::BTreeMap;
use std::str::FromStr;

#[cfg(test)]
mod tests;

/// Represents the entity that triggered an activity.
///
/// An actor is an authenticated employee acting through the console, or
/// the system itself when an activity is produced by an automated step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "admin", "sales", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The actor used for activities no person initiated directly.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("system"), String::from("system"))
    }
}

/// The kind of change an activity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    /// A lead was given to an employee, by rotation or by hand.
    LeadAssigned,
    /// A lead's progress changed (e.g. it was closed).
    LeadUpdated,
    /// An employee joined the directory.
    EmployeeCreated,
    /// An employee was activated or deactivated.
    EmployeeStatusChanged,
}

impl ActivityKind {
    /// Converts this kind to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LeadAssigned => "lead_assigned",
            Self::LeadUpdated => "lead_updated",
            Self::EmployeeCreated => "employee_created",
            Self::EmployeeStatusChanged => "employee_status_changed",
        }
    }
}

impl FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lead_assigned" => Ok(Self::LeadAssigned),
            "lead_updated" => Ok(Self::LeadUpdated),
            "employee_created" => Ok(Self::EmployeeCreated),
            "employee_status_changed" => Ok(Self::EmployeeStatusChanged),
            _ => Err(format!("Unknown activity kind: '{s}'")),
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An entry in the activity log.
///
/// Activities are append-only. Each records who did what, the employee the
/// change concerns, and optionally the lead involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// The actor who triggered this activity.
    pub actor: Actor,
    /// What happened.
    pub kind: ActivityKind,
    /// Human-readable summary shown on the dashboard feed.
    pub description: String,
    /// The employee this activity concerns.
    pub employee_id: Option<i64>,
    /// The lead this activity concerns.
    pub lead_id: Option<i64>,
    /// Free-form structured details.
    pub metadata: BTreeMap<String, String>,
}

impl Activity {
    /// Creates a new activity without metadata.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who triggered the activity
    /// * `kind` - What happened
    /// * `description` - Human-readable summary
    /// * `employee_id` - The employee concerned, if any
    /// * `lead_id` - The lead concerned, if any
    #[must_use]
    pub const fn new(
        actor: Actor,
        kind: ActivityKind,
        description: String,
        employee_id: Option<i64>,
        lead_id: Option<i64>,
    ) -> Self {
        Self {
            actor,
            kind,
            description,
            employee_id,
            lead_id,
            metadata: BTreeMap::new(),
        }
    }

    /// `Lead <name> was assigned to <assignee>`.
    #[must_use]
    pub fn lead_assigned(
        actor: Actor,
        lead_name: &str,
        assignee_display_name: &str,
        employee_id: i64,
        lead_id: i64,
    ) -> Self {
        Self::new(
            actor,
            ActivityKind::LeadAssigned,
            format!("Lead {lead_name} was assigned to {assignee_display_name}"),
            Some(employee_id),
            Some(lead_id),
        )
    }

    /// `Lead <name> was closed`.
    #[must_use]
    pub fn lead_closed(actor: Actor, lead_name: &str, employee_id: i64, lead_id: i64) -> Self {
        Self::new(
            actor,
            ActivityKind::LeadUpdated,
            format!("Lead {lead_name} was closed"),
            Some(employee_id),
            Some(lead_id),
        )
    }

    /// `New employee <first> <last> was added`.
    #[must_use]
    pub fn employee_created(
        actor: Actor,
        first_name: &str,
        last_name: &str,
        employee_id: i64,
    ) -> Self {
        Self::new(
            actor,
            ActivityKind::EmployeeCreated,
            format!("New employee {first_name} {last_name} was added"),
            Some(employee_id),
            None,
        )
    }

    /// `Employee <name> is now <status>`.
    #[must_use]
    pub fn employee_status_changed(
        actor: Actor,
        display_name: &str,
        status: &str,
        employee_id: i64,
    ) -> Self {
        Self::new(
            actor,
            ActivityKind::EmployeeStatusChanged,
            format!("Employee {display_name} is now {status}"),
            Some(employee_id),
            None,
        )
    }

    /// Adds a metadata entry, replacing any previous value for `key`.
    #[must_use]
    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }
}

/// An activity read back from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedActivity {
    /// The canonical identifier assigned by the database.
    pub activity_id: i64,
    /// The recorded activity.
    pub activity: Activity,
    /// When the activity was recorded (UTC, RFC 3339).
    pub created_at: String,
}
