// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Identity comes from the caller as an employee ID and a role string.
//! Credentials are not checked here; whoever sits in front of the API is
//! trusted to have done that.

use lead_desk_activity::Actor;
use lead_desk_domain::{Lead, Role};

use crate::error::AuthError;

/// An authenticated employee acting through the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The acting employee's canonical ID.
    pub employee_id: i64,
    /// The role the employee acts with.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The acting employee's ID
    /// * `role` - The role the employee acts with
    #[must_use]
    pub const fn new(employee_id: i64, role: Role) -> Self {
        Self { employee_id, role }
    }

    /// Converts this actor into the form recorded on activities.
    #[must_use]
    pub fn to_activity_actor(&self) -> Actor {
        Actor::new(
            self.employee_id.to_string(),
            self.role.as_str().to_string(),
        )
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Builds an actor from caller-supplied identity headers.
///
/// # Arguments
///
/// * `employee_id` - The employee ID, as text
/// * `role` - `"admin"` or `"sales"`
///
/// # Errors
///
/// Returns `AuthError::AuthenticationFailed` if either value is missing or
/// malformed.
pub fn authenticate_stub(employee_id: &str, role: &str) -> Result<AuthenticatedActor, AuthError> {
    let employee_id: i64 =
        employee_id
            .trim()
            .parse()
            .map_err(|_| AuthError::AuthenticationFailed {
                reason: format!("Invalid actor id: '{employee_id}'"),
            })?;

    let role: Role = role
        .trim()
        .parse()
        .map_err(|_| AuthError::AuthenticationFailed {
            reason: format!("Invalid actor role: '{role}'"),
        })?;

    Ok(AuthenticatedActor::new(employee_id, role))
}

/// Authorization service for enforcing role-based access control.
///
/// Admins manage the employee directory and the lead pool. Sales employees
/// work the leads assigned to them.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Sales => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("admin"),
            }),
        }
    }

    /// Checks if an actor may add employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_create_employee(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "create_employee")
    }

    /// Checks if an actor may list the employee directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_list_employees(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "list_employees")
    }

    /// Checks if an actor may activate or deactivate employees.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_set_employee_status(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "set_employee_status")
    }

    /// Checks if an actor may add a single lead.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_create_lead(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "create_lead")
    }

    /// Checks if an actor may upload a lead CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_import_leads(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "import_leads")
    }

    /// Checks if an actor may move a lead to another employee.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_reassign_lead(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "reassign_lead")
    }

    /// Checks if an actor may see every lead and the full activity feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is not an admin.
    pub fn authorize_list_all_leads(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "list_all_leads")
    }

    /// Checks if an actor may update a lead.
    ///
    /// Admins may update any lead; everyone else only the leads assigned
    /// to them.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither an admin nor the assignee.
    pub fn authorize_update_lead(actor: &AuthenticatedActor, lead: &Lead) -> Result<(), AuthError> {
        if actor.is_admin() || lead.assigned_to == Some(actor.employee_id) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("update_lead"),
            required_role: String::from("admin or assignee"),
        })
    }
}
