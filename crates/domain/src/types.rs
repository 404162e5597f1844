// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::identifiers::AssignmentId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language an employee speaks or a lead prefers.
///
/// Equality is exact and case-sensitive: `"english"` and `"English"` are
/// different languages. No trimming or aliasing is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Creates a new `Language` from the given value, unchanged.
    ///
    /// # Arguments
    ///
    /// * `value` - The language name
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    /// Returns the language name.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns whether the language name is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::new("English")
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Console administrator. Never receives leads through rotation.
    Admin,
    /// Sales employee. Eligible for lead assignment while active.
    #[default]
    Sales,
}

impl Role {
    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Sales => "sales",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "sales" => Ok(Self::Sales),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidEmployeeStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    #[default]
    Ongoing,
    Closed,
}

impl LeadStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ongoing => "Ongoing",
            Self::Closed => "Closed",
        }
    }
}

impl FromStr for LeadStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ongoing" => Ok(Self::Ongoing),
            "Closed" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidLeadStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Temperature classification of a lead, set by the handling employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadType {
    Hot,
    Warm,
    Cold,
}

impl LeadType {
    /// Converts this type to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "Hot",
            Self::Warm => "Warm",
            Self::Cold => "Cold",
        }
    }
}

impl FromStr for LeadType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hot" => Ok(Self::Hot),
            "Warm" => Ok(Self::Warm),
            "Cold" => Ok(Self::Cold),
            _ => Err(DomainError::InvalidLeadType(s.to_string())),
        }
    }
}

impl std::fmt::Display for LeadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for creating an employee.
///
/// The email address is trimmed and lower-cased on construction so that
/// uniqueness checks are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub location: String,
    pub language: Language,
}

impl NewEmployee {
    /// Creates a new employee input.
    ///
    /// # Arguments
    ///
    /// * `first_name` - The employee's first name
    /// * `last_name` - The employee's last name
    /// * `email` - The employee's email (normalized to lowercase)
    /// * `role` - The employee's role
    /// * `location` - The employee's location
    /// * `language` - The single language the employee handles
    #[must_use]
    pub fn new(
        first_name: &str,
        last_name: &str,
        email: &str,
        role: Role,
        location: &str,
        language: Language,
    ) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            email: email.trim().to_lowercase(),
            role,
            location: location.trim().to_string(),
            language,
        }
    }
}

/// A persisted employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The canonical numeric identifier assigned by the database.
    pub employee_id: i64,
    /// Human-facing employee code (e.g. `#23454GHK3J9QZ`).
    pub employee_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub location: String,
    pub language: Language,
    pub status: EmployeeStatus,
    /// Lifetime count of leads assigned to this employee.
    pub assigned_leads: u32,
    /// Lifetime count of leads this employee has closed.
    pub closed_leads: u32,
    pub created_at: String,
}

impl Employee {
    /// Returns `"<first> <last>"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A lead that has been parsed but not yet assigned or persisted.
///
/// `date` is kept exactly as supplied; it is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadCandidate {
    pub name: String,
    pub email: String,
    pub source: String,
    pub date: String,
    pub location: String,
    pub language: Language,
}

impl LeadCandidate {
    /// Creates a new lead candidate.
    ///
    /// # Arguments
    ///
    /// * `name` - The lead's name
    /// * `email` - The lead's email
    /// * `source` - Where the lead came from
    /// * `date` - The lead's date, as supplied
    /// * `location` - The lead's location
    /// * `language` - The lead's preferred language
    #[must_use]
    pub fn new(
        name: &str,
        email: &str,
        source: &str,
        date: &str,
        location: &str,
        language: Language,
    ) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            source: source.to_string(),
            date: date.to_string(),
            location: location.to_string(),
            language,
        }
    }
}

/// A lead ready to be written, with its resolved assignee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub candidate: LeadCandidate,
    /// `None` when no eligible employee matched the lead's language.
    pub assigned_to: Option<i64>,
}

/// A persisted lead.
///
/// `assignment_id` is present if and only if `assigned_to` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub lead_id: i64,
    pub name: String,
    pub email: String,
    pub source: String,
    pub date: String,
    pub location: String,
    pub language: Language,
    pub assigned_to: Option<i64>,
    pub assignment_id: Option<AssignmentId>,
    pub status: LeadStatus,
    pub lead_type: Option<LeadType>,
    /// UTC timestamp in RFC 3339 form.
    pub scheduled_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Changes requested for an existing lead.
///
/// `None` leaves the field unchanged. `scheduled_date: Some(None)` clears
/// the scheduled time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadUpdate {
    pub lead_type: Option<LeadType>,
    pub status: Option<LeadStatus>,
    pub scheduled_date: Option<Option<String>>,
}

impl LeadUpdate {
    /// Returns whether this update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lead_type.is_none() && self.status.is_none() && self.scheduled_date.is_none()
    }
}
