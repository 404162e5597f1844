// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Each function takes a plain `SqliteConnection` so it can run either on
//! its own or inside a transaction opened by the `Persistence` adapter.
//! Stored rows are converted back into domain values here; a stored value
//! that no longer parses surfaces as `PersistenceError::CorruptRecord`.

pub mod activities;
pub mod employees;
pub mod leads;
