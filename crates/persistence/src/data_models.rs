// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lead_desk_domain::{EmployeeStatus, Language, LeadStatus, LeadType, Role};

/// Optional constraints for listing employees. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub status: Option<EmployeeStatus>,
    pub role: Option<Role>,
}

/// Optional constraints for listing leads. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub language: Option<Language>,
    pub lead_type: Option<LeadType>,
    /// `Some(true)` keeps only unassigned leads, `Some(false)` only assigned ones.
    pub unassigned: Option<bool>,
}
