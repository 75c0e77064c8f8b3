// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response DTOs.
//!
//! These are distinct from domain types and represent the API
//! contract. Dates and times cross the wire as ISO-8601 text and are
//! parsed into domain types in the handlers.

use crate::error::ApiError;
use drivedesk_domain::{Lesson, LessonSummary};
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
pub const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Parses a wire-format date, reporting a validation failure on bad
/// input.
///
/// # Errors
///
/// Returns `ValidationFailed` if the text is not `YYYY-MM-DD`.
pub fn parse_wire_date(field: &str, text: &str) -> Result<Date, ApiError> {
    Date::parse(text, DATE_FORMAT).map_err(|_| ApiError::ValidationFailed {
        errors: vec![format!("{field}: expected YYYY-MM-DD, got {text:?}")],
    })
}

/// Parses a wire-format time of day.
///
/// # Errors
///
/// Returns `ValidationFailed` if the text is not `HH:MM:SS`.
pub fn parse_wire_time(field: &str, text: &str) -> Result<Time, ApiError> {
    Time::parse(text, TIME_FORMAT).map_err(|_| ApiError::ValidationFailed {
        errors: vec![format!("{field}: expected HH:MM:SS, got {text:?}")],
    })
}

/// Formats a date for the wire.
///
/// # Errors
///
/// Returns `Internal` if formatting fails.
pub fn format_wire_date(date: Date) -> Result<String, ApiError> {
    date.format(DATE_FORMAT).map_err(|e| ApiError::Internal {
        message: format!("date formatting failed: {e}"),
    })
}

/// Formats a time of day for the wire.
///
/// # Errors
///
/// Returns `Internal` if formatting fails.
pub fn format_wire_time(time: Time) -> Result<String, ApiError> {
    time.format(TIME_FORMAT).map_err(|e| ApiError::Internal {
        message: format!("time formatting failed: {e}"),
    })
}

/// Request to book a new lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLessonRequest {
    pub student_id: i64,
    pub instructor_id: i64,
    pub vehicle_id: i64,
    pub course_id: i64,
    /// Lesson date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time of day, `HH:MM:SS`.
    pub start_time: String,
    /// Lesson type: `theory`, `practical`, `highway`, `parking`, or
    /// `test_preparation`.
    pub lesson_type: String,
    pub pickup_location: String,
    /// Defaults to the pickup location when omitted.
    pub dropoff_location: Option<String>,
    /// Optional initial note.
    pub notes: Option<String>,
}

/// Response for a successful booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLessonResponse {
    pub lesson_id: i64,
    pub status: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub message: String,
}

/// Request to move a lesson to a new status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionLessonRequest {
    pub lesson_id: i64,
    /// The target status name.
    pub new_status: String,
    /// Optional note recorded with the transition.
    pub note: Option<String>,
}

/// Response for a successful transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionLessonResponse {
    pub lesson_id: i64,
    pub previous_status: String,
    pub new_status: String,
    pub message: String,
}

/// Request to complete a lesson with its outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteLessonRequest {
    pub lesson_id: i64,
    /// Performance rating, 1 through 5.
    pub rating: u8,
    /// Skills practiced during the lesson.
    #[serde(default)]
    pub skills_practiced: Vec<String>,
    /// Optional completion note.
    pub note: Option<String>,
}

/// Response for a successful completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteLessonResponse {
    pub lesson_id: i64,
    pub rating: u8,
    pub message: String,
}

/// Request to reassign a lesson's instructor or vehicle.
///
/// Exactly one of `instructor_id` and `vehicle_id` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignLessonRequest {
    pub lesson_id: i64,
    pub instructor_id: Option<i64>,
    pub vehicle_id: Option<i64>,
}

/// Response for a successful reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignLessonResponse {
    pub lesson_id: i64,
    pub instructor_id: i64,
    pub vehicle_id: i64,
    pub message: String,
}

/// Request to check availability for a prospective slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAvailabilityRequest {
    /// Instructor to check, if any.
    pub instructor_id: Option<i64>,
    /// Vehicle to check, if any.
    pub vehicle_id: Option<i64>,
    pub date: String,
    pub start_time: String,
    pub duration_minutes: i64,
    /// Lesson to exclude from the check (when editing).
    pub exclude_lesson_id: Option<i64>,
}

/// One lesson blocking a requested slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictInfo {
    pub lesson_id: i64,
    /// Which resource this conflict is for.
    pub resource: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: String,
}

/// Response for an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAvailabilityResponse {
    pub available: bool,
    pub conflicts: Vec<ConflictInfo>,
}

/// Request for a bulk action over a set of lesson ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkActionRequest {
    pub lesson_ids: Vec<i64>,
    /// One of `complete`, `cancel`, `change_status`,
    /// `assign_instructor`, `delete`, `export`.
    pub action: String,
    /// Cancellation reason, required for `cancel`.
    pub reason: Option<String>,
    /// Target status, required for `change_status`.
    pub new_status: Option<String>,
    /// New instructor, required for `assign_instructor`.
    pub instructor_id: Option<i64>,
}

/// One failed bulk item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailureInfo {
    pub lesson_id: i64,
    pub reason: String,
}

/// Response for a bulk action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkActionResponse {
    pub success_count: usize,
    pub failure_count: usize,
    /// Every failure with its reason; display capping is the client's
    /// concern.
    pub failures: Vec<BulkFailureInfo>,
    /// CSV payload for the `export` action, absent otherwise.
    pub export_csv: Option<String>,
}

/// Request for a calendar projection over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRequest {
    pub from: String,
    pub to: String,
    /// `day`, `week`, or `month`; `week` adds hour buckets.
    pub view: Option<String>,
    pub instructor_id: Option<i64>,
    pub student_id: Option<i64>,
    pub status: Option<String>,
}

/// A lesson summary as rendered in calendars and conflict lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonInfo {
    pub lesson_id: i64,
    pub student_id: i64,
    pub instructor_id: i64,
    pub vehicle_id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub lesson_type: String,
    pub status: String,
}

impl LessonInfo {
    /// Builds the wire representation of a lesson summary.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if date or time formatting fails.
    pub fn from_summary(summary: &LessonSummary) -> Result<Self, ApiError> {
        Ok(Self {
            lesson_id: summary.lesson_id.value(),
            student_id: summary.student_id.value(),
            instructor_id: summary.instructor_id.value(),
            vehicle_id: summary.vehicle_id.value(),
            date: format_wire_date(summary.slot.date)?,
            start_time: format_wire_time(summary.slot.start)?,
            end_time: format_wire_time(summary.slot.end)?,
            lesson_type: summary.lesson_type.as_str().to_string(),
            status: summary.status.as_str().to_string(),
        })
    }
}

/// One hour of the week-view grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBucketInfo {
    pub hour: u8,
    pub lesson_ids: Vec<i64>,
}

/// One day of a calendar projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDayInfo {
    pub date: String,
    /// All lessons on this date, start time ascending. Never truncated.
    pub lessons: Vec<LessonInfo>,
    /// Count beyond the month-view per-day cap.
    pub overflow: usize,
    /// Hour buckets for the week view, absent for other views.
    pub hours: Option<Vec<HourBucketInfo>>,
}

/// Response for a calendar projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub days: Vec<CalendarDayInfo>,
}

/// One entry of a lesson's status history timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryInfo {
    pub actor_id: String,
    pub actor_type: String,
    pub from_status: Option<String>,
    pub to_status: String,
    pub transitioned_at: String,
    pub note: Option<String>,
}

/// Full lesson detail with its history timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDetailResponse {
    pub lesson_id: i64,
    pub student_id: i64,
    pub instructor_id: i64,
    pub vehicle_id: i64,
    pub course_id: i64,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub lesson_type: String,
    pub status: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub instructor_notes: String,
    pub performance_rating: Option<u8>,
    pub skills_practiced: Vec<String>,
    pub created_at: String,
    pub history: Vec<HistoryEntryInfo>,
}

impl LessonDetailResponse {
    /// Builds the wire representation of a lesson and its history.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if date or time formatting fails.
    pub fn from_lesson(
        lesson: &Lesson,
        history: Vec<HistoryEntryInfo>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            lesson_id: lesson.lesson_id.value(),
            student_id: lesson.student_id.value(),
            instructor_id: lesson.instructor_id.value(),
            vehicle_id: lesson.vehicle_id.value(),
            course_id: lesson.course_id.value(),
            date: format_wire_date(lesson.slot.date)?,
            start_time: format_wire_time(lesson.slot.start)?,
            end_time: format_wire_time(lesson.slot.end)?,
            lesson_type: lesson.lesson_type.as_str().to_string(),
            status: lesson.status.as_str().to_string(),
            pickup_location: lesson.pickup_location.clone(),
            dropoff_location: lesson.dropoff_location.clone(),
            instructor_notes: lesson.instructor_notes.clone(),
            performance_rating: lesson.performance_rating.map(|r| r.value()),
            skills_practiced: lesson.skills_practiced.clone(),
            created_at: lesson.created_at.clone(),
            history,
        })
    }
}
