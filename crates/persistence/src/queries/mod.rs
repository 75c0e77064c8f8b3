// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side query operations.
//!
//! All functions take a connection and use Diesel DSL exclusively.
//! Dispatch from the public `Persistence` adapter happens in `lib.rs`.

pub mod lessons;
pub mod reference;
