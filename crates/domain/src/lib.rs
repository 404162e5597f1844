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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod identifiers;
mod schedule;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use error::DomainError;
pub use identifiers::{AssignmentId, employee_code_from_entropy};
pub use schedule::{
    ScheduleFilter, format_timestamp, normalize_scheduled_date, parse_scheduled_date,
    utc_day_bounds,
};
pub use types::{
    Employee, EmployeeStatus, Language, Lead, LeadCandidate, LeadStatus, LeadType, LeadUpdate,
    NewEmployee, NewLead, Role,
};
pub use validation::{validate_lead_candidate, validate_lead_close, validate_new_employee};
