// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Turning rotation decisions into stored leads.

use lead_desk_activity::{Activity, Actor};
use lead_desk_domain::{Lead, LeadCandidate, NewLead, validate_lead_candidate};

use crate::error::CoreError;
use crate::pool::{EmployeePoolSnapshot, PoolMember};
use crate::rotation::BatchAssignment;

/// Storage port used to apply assignment decisions.
///
/// Implementations own ID generation (lead IDs, assignment IDs) and
/// timestamps. The rotation engine never calls this trait itself.
pub trait LeadMaterializer {
    /// The storage error type.
    type Error: std::fmt::Display;

    /// Writes a lead. A fresh assignment ID is issued when `lead.assigned_to`
    /// is present and never otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the lead cannot be written.
    fn create_lead(&mut self, lead: &NewLead) -> Result<Lead, Self::Error>;

    /// Adds one to an employee's lifetime assigned-lead counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or the write fails.
    fn increment_assigned_leads(&mut self, employee_id: i64) -> Result<(), Self::Error>;

    /// Subtracts one from an employee's assigned-lead counter, stopping at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee does not exist or the write fails.
    fn decrement_assigned_leads(&mut self, employee_id: i64) -> Result<(), Self::Error>;

    /// Appends an entry to the activity log and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    fn log_activity(&mut self, activity: &Activity) -> Result<i64, Self::Error>;

    /// Applies one lead: write it, bump the assignee's counter, log the assignment.
    ///
    /// Implementations backed by a transactional store should override this
    /// so the three writes succeed or fail together.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered.
    fn materialize_assignment(
        &mut self,
        candidate: &LeadCandidate,
        assignee: Option<&PoolMember>,
        actor: &Actor,
    ) -> Result<Lead, Self::Error> {
        let new_lead: NewLead = NewLead {
            candidate: candidate.clone(),
            assigned_to: assignee.map(|m| m.employee_id),
        };
        let lead: Lead = self.create_lead(&new_lead)?;

        if let Some(member) = assignee {
            self.increment_assigned_leads(member.employee_id)?;
            self.log_activity(&Activity::lead_assigned(
                actor.clone(),
                &lead.name,
                &member.display_name,
                member.employee_id,
                lead.lead_id,
            ))?;
        }

        Ok(lead)
    }
}

/// A lead of a batch that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializeFailure {
    /// 0-based position of the lead within the batch.
    pub position: usize,
    /// The lead's name, for reporting.
    pub lead_name: String,
    /// What went wrong.
    pub message: String,
}

/// The outcome of applying a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Leads written, in batch order.
    pub created: Vec<Lead>,
    /// Leads that were not written.
    pub failures: Vec<MaterializeFailure>,
}

impl MaterializeReport {
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.created
            .iter()
            .filter(|l| l.assigned_to.is_some())
            .count()
    }

    #[must_use]
    pub fn unassigned_count(&self) -> usize {
        self.created.len() - self.assigned_count()
    }
}

/// Resolves the pool member a decision points at.
fn resolve_assignee(
    assigned_to: Option<i64>,
    snapshot: &EmployeePoolSnapshot,
) -> Result<Option<&PoolMember>, CoreError> {
    assigned_to
        .map(|employee_id| {
            snapshot
                .member(employee_id)
                .ok_or(CoreError::UnknownAssignee { employee_id })
        })
        .transpose()
}

/// Applies every decision of a batch, in order.
///
/// Each lead is applied independently: a failure is recorded in the report
/// and the remaining leads are still applied. Leads applied before a failure
/// are not undone, and a failed lead's decision is not recomputed.
///
/// # Arguments
///
/// * `materializer` - The storage port
/// * `batch` - Decisions produced by `assign_batch`
/// * `snapshot` - The snapshot the decisions were made against
/// * `actor` - Who the resulting activities are attributed to
pub fn materialize_batch<M: LeadMaterializer>(
    materializer: &mut M,
    batch: &BatchAssignment,
    snapshot: &EmployeePoolSnapshot,
    actor: &Actor,
) -> MaterializeReport {
    let mut report: MaterializeReport = MaterializeReport::default();

    for (position, assigned) in batch.leads.iter().enumerate() {
        let checked: Result<Option<&PoolMember>, CoreError> =
            validate_lead_candidate(&assigned.candidate)
                .map_err(CoreError::from)
                .and_then(|()| resolve_assignee(assigned.assigned_to, snapshot));

        let outcome: Result<Lead, String> = match checked {
            Ok(assignee) => materializer
                .materialize_assignment(&assigned.candidate, assignee, actor)
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match outcome {
            Ok(lead) => report.created.push(lead),
            Err(message) => report.failures.push(MaterializeFailure {
                position,
                lead_name: assigned.candidate.name.clone(),
                message,
            }),
        }
    }

    report
}
