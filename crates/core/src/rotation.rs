// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Round-robin lead assignment in blocks.
//!
//! Leads are routed to employees whose language matches exactly. Within a
//! language, each employee receives leads in blocks of [`BLOCK_SIZE`] before
//! rotation moves on.
//!
//! ## Selection Rules (Authoritative)
//!
//! For each lead, in batch order:
//! 1. Candidates are the pool members whose language equals the lead's.
//!    No candidates means the lead stays unassigned.
//! 2. A candidate's block position is `total_assigned % BLOCK_SIZE`.
//! 3. Candidates with a non-zero position are mid-block and take priority,
//!    so an open block is always finished before a new one starts.
//! 4. Among the preferred set, the lowest `total_assigned` wins.
//! 5. Remaining ties go to the lowest employee ID.
//!
//! ## Invariants
//!
//! - The engine never performs I/O and never mutates employee records
//! - Counts are batch-local: later leads see earlier decisions of the same batch
//! - Identical inputs always produce identical decisions

use lead_desk_domain::{Language, LeadCandidate, NewLead};
use std::collections::BTreeMap;

use crate::pool::{EmployeePoolSnapshot, PoolMember};

/// Number of consecutive leads an employee receives before rotation moves on.
pub const BLOCK_SIZE: u32 = 3;

/// Returns the position of an employee inside their current block.
///
/// `0` means the employee sits on a block boundary.
#[must_use]
pub const fn block_position(total_assigned: u32) -> u32 {
    total_assigned % BLOCK_SIZE
}

/// Picks the winner among `(employee_id, total_assigned)` pairs.
fn choose(candidates: &[(i64, u32)]) -> Option<i64> {
    let mid_block: Vec<(i64, u32)> = candidates
        .iter()
        .copied()
        .filter(|(_, total)| block_position(*total) != 0)
        .collect();

    let preferred: &[(i64, u32)] = if mid_block.is_empty() {
        candidates
    } else {
        &mid_block
    };

    preferred
        .iter()
        .min_by_key(|(employee_id, total)| (*total, *employee_id))
        .map(|(employee_id, _)| *employee_id)
}

/// Batch-scoped working counters, seeded from a snapshot.
///
/// This is the only mutable state the engine holds. It lives exactly as long
/// as one batch and is discarded afterwards.
#[derive(Debug, Clone)]
pub struct RotationState<'a> {
    snapshot: &'a EmployeePoolSnapshot,
    working: BTreeMap<i64, u32>,
}

impl<'a> RotationState<'a> {
    /// Seeds working counters from the snapshot's persisted counts.
    #[must_use]
    pub fn seed(snapshot: &'a EmployeePoolSnapshot) -> Self {
        let working: BTreeMap<i64, u32> = snapshot
            .members()
            .map(|m| (m.employee_id, m.assigned_leads))
            .collect();
        Self { snapshot, working }
    }

    /// Returns the working count for an employee.
    #[must_use]
    pub fn total_assigned(&self, employee_id: i64) -> Option<u32> {
        self.working.get(&employee_id).copied()
    }

    /// Assigns one lead of the given language and records the decision.
    ///
    /// # Returns
    ///
    /// The chosen employee ID, or `None` if nobody handles `language`.
    pub fn assign(&mut self, language: &Language) -> Option<i64> {
        let candidates: Vec<(i64, u32)> = self
            .snapshot
            .candidates_for(language)
            .iter()
            .map(|m| {
                let total: u32 = self
                    .working
                    .get(&m.employee_id)
                    .copied()
                    .unwrap_or(m.assigned_leads);
                (m.employee_id, total)
            })
            .collect();

        let chosen: i64 = choose(&candidates)?;
        let total: &mut u32 = self.working.entry(chosen).or_insert(0);
        *total = total.saturating_add(1);
        Some(chosen)
    }

    /// Returns the counter changes accumulated so far, ordered by employee ID.
    #[must_use]
    pub fn deltas(&self) -> Vec<CounterDelta> {
        let mut deltas: Vec<CounterDelta> = self
            .snapshot
            .members()
            .filter_map(|m| {
                let after: u32 = self.total_assigned(m.employee_id)?;
                (after != m.assigned_leads).then_some(CounterDelta {
                    employee_id: m.employee_id,
                    before: m.assigned_leads,
                    after,
                })
            })
            .collect();
        deltas.sort_by_key(|d| d.employee_id);
        deltas
    }
}

/// Change in one employee's assigned-lead counter over a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterDelta {
    pub employee_id: i64,
    pub before: u32,
    pub after: u32,
}

impl CounterDelta {
    /// Number of leads this employee received in the batch.
    #[must_use]
    pub const fn assigned_in_batch(&self) -> u32 {
        self.after.saturating_sub(self.before)
    }
}

/// A lead together with the rotation decision made for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedLead {
    pub candidate: LeadCandidate,
    pub assigned_to: Option<i64>,
}

impl AssignedLead {
    /// Converts the decision into a lead ready to be written.
    #[must_use]
    pub fn to_new_lead(&self) -> NewLead {
        NewLead {
            candidate: self.candidate.clone(),
            assigned_to: self.assigned_to,
        }
    }
}

/// The outcome of assigning a whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAssignment {
    /// One entry per input lead, in input order.
    pub leads: Vec<AssignedLead>,
    /// Counter changes, ordered by employee ID. Employees who received
    /// nothing are omitted.
    pub deltas: Vec<CounterDelta>,
}

impl BatchAssignment {
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.leads.iter().filter(|l| l.assigned_to.is_some()).count()
    }

    #[must_use]
    pub fn unassigned_count(&self) -> usize {
        self.leads.len() - self.assigned_count()
    }
}

/// Assigns every lead of a batch, in order.
///
/// # Arguments
///
/// * `candidates` - Validated leads, in input order
/// * `snapshot` - Eligible employees and their persisted counts
///
/// # Returns
///
/// The per-lead decisions and the resulting counter changes.
#[must_use]
pub fn assign_batch(
    candidates: Vec<LeadCandidate>,
    snapshot: &EmployeePoolSnapshot,
) -> BatchAssignment {
    let mut state: RotationState<'_> = RotationState::seed(snapshot);

    let leads: Vec<AssignedLead> = candidates
        .into_iter()
        .map(|candidate| {
            let assigned_to: Option<i64> = state.assign(&candidate.language);
            AssignedLead {
                candidate,
                assigned_to,
            }
        })
        .collect();

    BatchAssignment {
        leads,
        deltas: state.deltas(),
    }
}

/// Chooses the assignee for a single lead.
///
/// Equivalent to the first decision of a one-lead batch.
///
/// # Returns
///
/// The chosen member as it was in the snapshot, or `None` if nobody
/// handles `language`.
#[must_use]
pub fn select_assignee<'a>(
    language: &Language,
    snapshot: &'a EmployeePoolSnapshot,
) -> Option<&'a PoolMember> {
    let mut state: RotationState<'a> = RotationState::seed(snapshot);
    let chosen: i64 = state.assign(language)?;
    snapshot.member(chosen)
}
