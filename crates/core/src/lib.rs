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
mod materialize;
mod pool;
mod rotation;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use error::CoreError;
pub use materialize::{
    LeadMaterializer, MaterializeFailure, MaterializeReport, materialize_batch,
};
pub use pool::{EmployeePoolSnapshot, PoolMember};
pub use rotation::{
    AssignedLead, BLOCK_SIZE, BatchAssignment, CounterDelta, RotationState, assign_batch,
    block_position, select_assignee,
};
