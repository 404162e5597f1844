// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lead_desk_domain::{Language, LeadCandidate};

use super::helpers::{create_test_candidate, create_test_member};
use crate::{
    BLOCK_SIZE, BatchAssignment, CounterDelta, EmployeePoolSnapshot, PoolMember, RotationState,
    assign_batch, block_position, select_assignee,
};

fn english_batch(count: usize) -> Vec<LeadCandidate> {
    (1..=count)
        .map(|i| create_test_candidate(&format!("Lead{i}"), "English"))
        .collect()
}

fn assignees(batch: &BatchAssignment) -> Vec<Option<i64>> {
    batch.leads.iter().map(|l| l.assigned_to).collect()
}

#[test]
fn test_block_position_wraps_at_block_size() {
    assert_eq!(BLOCK_SIZE, 3);
    assert_eq!(block_position(0), 0);
    assert_eq!(block_position(1), 1);
    assert_eq!(block_position(2), 2);
    assert_eq!(block_position(3), 0);
    assert_eq!(block_position(7), 1);
}

#[test]
fn test_five_english_leads_split_three_and_two() {
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(1, "English", 0),
        create_test_member(2, "English", 0),
    ]);

    let batch: BatchAssignment = assign_batch(english_batch(5), &snapshot);

    assert_eq!(
        assignees(&batch),
        vec![Some(1), Some(1), Some(1), Some(2), Some(2)]
    );
    assert_eq!(batch.unassigned_count(), 0);
    assert_eq!(
        batch.deltas,
        vec![
            CounterDelta {
                employee_id: 1,
                before: 0,
                after: 3
            },
            CounterDelta {
                employee_id: 2,
                before: 0,
                after: 2
            },
        ]
    );
    assert_eq!(batch.deltas[0].assigned_in_batch(), 3);
}

#[test]
fn test_language_match_is_exclusive() {
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(1, "English", 0),
        create_test_member(2, "Hindi", 0),
    ]);

    let batch: BatchAssignment = assign_batch(
        vec![
            create_test_candidate("Asha", "Hindi"),
            create_test_candidate("Bob", "English"),
            create_test_candidate("Chen", "Mandarin"),
            create_test_candidate("Dee", "english"),
        ],
        &snapshot,
    );

    assert_eq!(assignees(&batch), vec![Some(2), Some(1), None, None]);
    assert_eq!(batch.assigned_count(), 2);
    assert_eq!(batch.unassigned_count(), 2);
}

#[test]
fn test_mid_block_employee_finishes_block_before_lower_count_employee() {
    // Employee 1 has one lead of an open block; employee 2 has none at all.
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(1, "English", 4),
        create_test_member(2, "English", 0),
    ]);

    let batch: BatchAssignment = assign_batch(english_batch(3), &snapshot);

    assert_eq!(assignees(&batch), vec![Some(1), Some(1), Some(2)]);
}

#[test]
fn test_sole_mid_block_employee_completes_block_and_keeps_next() {
    let snapshot: EmployeePoolSnapshot =
        EmployeePoolSnapshot::from_members(vec![create_test_member(1, "English", 1)]);

    let batch: BatchAssignment = assign_batch(english_batch(4), &snapshot);

    assert_eq!(assignees(&batch), vec![Some(1), Some(1), Some(1), Some(1)]);
    assert_eq!(
        batch.deltas,
        vec![CounterDelta {
            employee_id: 1,
            before: 1,
            after: 5
        }]
    );
}

#[test]
fn test_mid_block_employee_completes_block_then_rotation_moves_on() {
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(1, "English", 1),
        create_test_member(2, "English", 0),
    ]);

    let batch: BatchAssignment = assign_batch(english_batch(4), &snapshot);

    assert_eq!(assignees(&batch), vec![Some(1), Some(1), Some(2), Some(2)]);
}

#[test]
fn test_lowest_count_mid_block_employee_wins() {
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(1, "English", 4),
        create_test_member(2, "English", 2),
        create_test_member(3, "English", 0),
    ]);

    let chosen: Option<&PoolMember> = select_assignee(&Language::new("English"), &snapshot);

    assert_eq!(chosen.map(|m| m.employee_id), Some(2));
}

#[test]
fn test_lowest_count_boundary_employee_starts_next_block() {
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(1, "English", 6),
        create_test_member(2, "English", 3),
    ]);

    let chosen: Option<&PoolMember> = select_assignee(&Language::new("English"), &snapshot);

    assert_eq!(chosen.map(|m| m.employee_id), Some(2));
}

#[test]
fn test_ties_go_to_lowest_employee_id() {
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(9, "English", 3),
        create_test_member(4, "English", 3),
        create_test_member(7, "English", 3),
    ]);

    let chosen: Option<&PoolMember> = select_assignee(&Language::new("English"), &snapshot);

    assert_eq!(chosen.map(|m| m.employee_id), Some(4));
}

#[test]
fn test_no_candidates_leaves_lead_unassigned_and_counters_untouched() {
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(1, "English", 2),
    ]);

    let batch: BatchAssignment = assign_batch(
        vec![create_test_candidate("Zed", "Tamil")],
        &snapshot,
    );

    assert_eq!(assignees(&batch), vec![None]);
    assert!(batch.deltas.is_empty());
}

#[test]
fn test_empty_pool_assigns_nothing() {
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::default();

    let batch: BatchAssignment = assign_batch(english_batch(2), &snapshot);

    assert_eq!(assignees(&batch), vec![None, None]);
}

#[test]
fn test_rotation_continues_across_batches() {
    let first: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(1, "English", 0),
        create_test_member(2, "English", 0),
    ]);
    let first_batch: BatchAssignment = assign_batch(english_batch(5), &first);

    // Re-read persisted counters as a new snapshot would.
    let second: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(
        first_batch
            .deltas
            .iter()
            .map(|d| create_test_member(d.employee_id, "English", d.after))
            .collect(),
    );
    let second_batch: BatchAssignment = assign_batch(english_batch(4), &second);

    assert_eq!(
        assignees(&second_batch),
        vec![Some(2), Some(1), Some(1), Some(1)]
    );
}

#[test]
fn test_batch_assignment_is_deterministic() {
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(3, "English", 1),
        create_test_member(1, "English", 5),
        create_test_member(2, "Hindi", 0),
    ]);
    let mut leads: Vec<LeadCandidate> = english_batch(6);
    leads.push(create_test_candidate("Ravi", "Hindi"));

    let first: BatchAssignment = assign_batch(leads.clone(), &snapshot);
    let second: BatchAssignment = assign_batch(leads, &snapshot);

    assert_eq!(first, second);
}

#[test]
fn test_select_assignee_matches_first_batch_decision() {
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(1, "English", 3),
        create_test_member(2, "English", 1),
    ]);

    let single: Option<i64> =
        select_assignee(&Language::new("English"), &snapshot).map(|m| m.employee_id);
    let batch: BatchAssignment = assign_batch(english_batch(1), &snapshot);

    assert_eq!(single, batch.leads[0].assigned_to);
    // The snapshot still reports the persisted count.
    assert_eq!(snapshot.member(2).map(|m| m.assigned_leads), Some(1));
}

#[test]
fn test_rotation_state_tracks_working_counts() {
    let snapshot: EmployeePoolSnapshot = EmployeePoolSnapshot::from_members(vec![
        create_test_member(1, "English", 0),
    ]);
    let mut state: RotationState<'_> = RotationState::seed(&snapshot);
    let english: Language = Language::new("English");

    assert_eq!(state.assign(&english), Some(1));
    assert_eq!(state.assign(&english), Some(1));
    assert_eq!(state.total_assigned(1), Some(2));
    assert_eq!(state.total_assigned(99), None);
    assert_eq!(state.deltas().len(), 1);
}
