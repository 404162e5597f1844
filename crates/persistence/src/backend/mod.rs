// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend code.
//!
//! Connection set-up, migrations, PRAGMA handling and the few helpers that
//! Diesel DSL cannot express live here. Everything else goes through Diesel
//! DSL in the `queries/` and `mutations/` modules.

pub mod sqlite;
