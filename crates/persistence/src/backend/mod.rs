// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific database utilities.
//!
//! `SQLite` is the only supported backend: it covers development, tests,
//! and single-school production deployments. All domain queries and
//! mutations live in `queries/` and `mutations/` and use Diesel DSL
//! exclusively; this module holds the code that cannot be expressed in
//! the DSL (connection setup, migrations, PRAGMA statements).

pub mod sqlite;
