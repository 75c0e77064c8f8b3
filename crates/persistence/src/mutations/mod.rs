// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side mutation operations.
//!
//! Mutations that depend on resource availability re-check conflicts
//! inside an IMMEDIATE transaction, so the window between validation
//! and commit cannot admit a competing booking.

pub mod lessons;
pub mod reference;
