// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the DriveDesk lesson scheduler.
//!
//! Handlers in this crate wire the pure scheduling core to the
//! persistence layer: authorization first, then validation, then the
//! transactional commit. Domain and core errors are translated into
//! `ApiError` at this boundary and never leak to callers directly.
//!
//! Identity is an external concern: callers hand every operation an
//! already-authenticated actor. This crate only decides what that
//! actor's role permits.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod error;
mod export;
mod handlers;
mod notify;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, AuthenticatedActor, AuthorizationService, Role, authenticate_stub};
pub use error::ApiError;
pub use export::{ExportError, export_lessons_csv};
pub use handlers::{
    SchedulingPolicy, book_lesson, bulk_action, calendar, check_availability, complete_lesson,
    get_lesson, reassign_lesson, transition_lesson,
};
pub use notify::{NotificationSink, TracingNotificationSink};
pub use request_response::{
    BookLessonRequest, BookLessonResponse, BulkActionRequest, BulkActionResponse, BulkFailureInfo,
    CalendarDayInfo, CalendarRequest, CalendarResponse, CheckAvailabilityRequest,
    CheckAvailabilityResponse, CompleteLessonRequest, CompleteLessonResponse, ConflictInfo,
    HistoryEntryInfo, HourBucketInfo, LessonDetailResponse, LessonInfo, ReassignLessonRequest,
    ReassignLessonResponse, TransitionLessonRequest, TransitionLessonResponse,
};
