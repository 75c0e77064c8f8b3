// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Scheduling core for the DriveDesk lesson scheduler.
//!
//! This crate holds the pure scheduling logic: conflict detection, the
//! booking validation pipeline, the status transition engine, bulk item
//! evaluation, and calendar projection. It performs no I/O; callers fetch
//! lesson data from the repository, the core decides, and the repository
//! commits the decision.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod booking;
mod bulk;
mod calendar;
mod conflicts;
mod error;
mod transition;

#[cfg(test)]
mod tests;

pub use booking::{BookingRequest, CourseData, PreparedLesson, ReferenceData, validate_booking};
pub use bulk::{BulkAction, BulkFailure, BulkOutcome, MAX_BULK_ITEMS};
pub use calendar::{
    CalendarFilter, MONTH_VIEW_DAY_CAP, WEEK_VIEW_FIRST_HOUR, WEEK_VIEW_LAST_HOUR, hour_buckets,
    month_view_overflow, project,
};
pub use conflicts::{ensure_available, find_conflicts};
pub use error::CoreError;
pub use transition::{
    TransitionOutcome, apply_transition, complete_lesson, reassign_instructor, reassign_vehicle,
};
