// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lead_desk_domain::{Employee, Language};
use std::collections::BTreeMap;

/// An employee as seen by the rotation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolMember {
    /// The employee's canonical ID.
    pub employee_id: i64,
    /// `"<first> <last>"`, used for activity descriptions.
    pub display_name: String,
    /// The single language the employee handles.
    pub language: Language,
    /// Lifetime assigned-lead count at snapshot time.
    pub assigned_leads: u32,
}

impl PoolMember {
    /// Creates a pool member from a persisted employee.
    #[must_use]
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            employee_id: employee.employee_id,
            display_name: employee.display_name(),
            language: employee.language.clone(),
            assigned_leads: employee.assigned_leads,
        }
    }
}

/// Point-in-time view of the employees eligible for assignment, grouped by language.
///
/// A snapshot is built fresh for each batch and never mutated afterwards.
/// Members of each language are ordered by employee ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePoolSnapshot {
    by_language: BTreeMap<Language, Vec<PoolMember>>,
}

impl EmployeePoolSnapshot {
    /// Builds a snapshot from members that are already known to be eligible.
    ///
    /// Duplicate employee IDs keep their first occurrence.
    #[must_use]
    pub fn from_members(members: Vec<PoolMember>) -> Self {
        let mut by_language: BTreeMap<Language, Vec<PoolMember>> = BTreeMap::new();
        for member in members {
            by_language
                .entry(member.language.clone())
                .or_default()
                .push(member);
        }
        for group in by_language.values_mut() {
            group.sort_by_key(|m| m.employee_id);
            group.dedup_by_key(|m| m.employee_id);
        }
        Self { by_language }
    }

    /// Returns the eligible members whose language equals `language` exactly.
    #[must_use]
    pub fn candidates_for(&self, language: &Language) -> &[PoolMember] {
        self.by_language.get(language).map_or(&[], Vec::as_slice)
    }

    /// Looks up a member by employee ID.
    #[must_use]
    pub fn member(&self, employee_id: i64) -> Option<&PoolMember> {
        self.members().find(|m| m.employee_id == employee_id)
    }

    /// Iterates over every member, grouped by language.
    pub fn members(&self) -> impl Iterator<Item = &PoolMember> {
        self.by_language.values().flatten()
    }

    /// Iterates over the languages that have at least one member.
    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.by_language.keys()
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.by_language.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_language.is_empty()
    }
}
