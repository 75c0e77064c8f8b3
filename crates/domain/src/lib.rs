// Copyright (C) 2026 DriveDesk Contributors
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

mod booking_window;
mod error;
mod lesson_status;
mod time_slot;
mod types;
mod validation;

pub use booking_window::{
    DEFAULT_HORIZON_MONTHS, add_months, today_in_timezone, validate_booking_date,
};
pub use error::DomainError;
pub use lesson_status::LessonStatus;
pub use time_slot::TimeSlot;
pub use types::{
    CompletionOutcome, CourseId, InstructorId, Lesson, LessonId, LessonSummary, LessonType,
    PerformanceRating, ResourceKind, StudentId, VehicleId,
};
pub use validation::{
    join_skills, parse_skills, resolve_dropoff_location, validate_pickup_location,
};
