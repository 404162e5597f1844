// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Mutations use Diesel DSL throughout. The only raw SQL they depend on is
//! `last_insert_rowid()`, imported from the `backend` module. Callers
//! pass timestamps and generated identifiers in, so every function here is
//! a single deterministic write.

pub mod activities;
pub mod employees;
pub mod leads;
