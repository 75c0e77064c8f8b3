// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lesson query operations.

use crate::data_models::{
    LessonHistoryRow, LessonRow, format_date, lesson_from_row, record_from_history_row,
};
use crate::diesel_schema::{lesson_status_history, lessons};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use drivedesk::CalendarFilter;
use drivedesk_audit::TransitionRecord;
use drivedesk_domain::{Lesson, LessonSummary, ResourceKind};
use time::Date;

/// Loads a single lesson by id.
///
/// # Errors
///
/// Returns `LessonNotFound` if no row exists, or a query error.
pub fn get_lesson(conn: &mut SqliteConnection, lesson_id: i64) -> Result<Lesson, PersistenceError> {
    let row: LessonRow = lessons::table
        .filter(lessons::lesson_id.eq(lesson_id))
        .first::<LessonRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_lesson: {e}")))?
        .ok_or(PersistenceError::LessonNotFound(lesson_id))?;

    lesson_from_row(row)
}

/// Loads lessons by id, ordered by id ascending.
///
/// Ids that have no row are simply absent from the result; the caller
/// decides whether a missing id is an error.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_lessons(
    conn: &mut SqliteConnection,
    lesson_ids: &[i64],
) -> Result<Vec<Lesson>, PersistenceError> {
    let rows: Vec<LessonRow> = lessons::table
        .filter(lessons::lesson_id.eq_any(lesson_ids))
        .order(lessons::lesson_id.asc())
        .load::<LessonRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_lessons: {e}")))?;

    rows.into_iter().map(lesson_from_row).collect()
}

/// Loads the lessons of one instructor or vehicle on one date.
///
/// These are the conflict-check candidates for a booking or
/// reassignment; status filtering happens in the scheduling core, not
/// here.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn for_resource_on_date(
    conn: &mut SqliteConnection,
    resource: ResourceKind,
    resource_id: i64,
    date: Date,
) -> Result<Vec<LessonSummary>, PersistenceError> {
    let date_text: String = format_date(date)?;

    let rows: Vec<LessonRow> = match resource {
        ResourceKind::Instructor => lessons::table
            .filter(lessons::instructor_id.eq(resource_id))
            .filter(lessons::lesson_date.eq(&date_text))
            .load::<LessonRow>(conn),
        ResourceKind::Vehicle => lessons::table
            .filter(lessons::vehicle_id.eq(resource_id))
            .filter(lessons::lesson_date.eq(&date_text))
            .load::<LessonRow>(conn),
    }
    .map_err(|e| PersistenceError::QueryFailed(format!("for_resource_on_date: {e}")))?;

    rows.into_iter()
        .map(|row| lesson_from_row(row).map(|lesson| lesson.summary()))
        .collect()
}

/// Loads lesson summaries in a date range, both endpoints inclusive,
/// applying the calendar filter in SQL.
///
/// Results are ordered by date, start time, then id, which is the order
/// the calendar projector expects.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn in_range(
    conn: &mut SqliteConnection,
    from: Date,
    to: Date,
    filter: &CalendarFilter,
) -> Result<Vec<LessonSummary>, PersistenceError> {
    let from_text: String = format_date(from)?;
    let to_text: String = format_date(to)?;

    let mut query = lessons::table
        .filter(lessons::lesson_date.ge(from_text))
        .filter(lessons::lesson_date.le(to_text))
        .into_boxed();

    if let Some(id) = filter.instructor_id {
        query = query.filter(lessons::instructor_id.eq(id.value()));
    }
    if let Some(id) = filter.student_id {
        query = query.filter(lessons::student_id.eq(id.value()));
    }
    if let Some(status) = filter.status {
        query = query.filter(lessons::status.eq(status.as_str()));
    }

    let rows: Vec<LessonRow> = query
        .order((
            lessons::lesson_date.asc(),
            lessons::start_time.asc(),
            lessons::lesson_id.asc(),
        ))
        .load::<LessonRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("in_range: {e}")))?;

    rows.into_iter()
        .map(|row| lesson_from_row(row).map(|lesson| lesson.summary()))
        .collect()
}

/// Loads the status history timeline for a lesson, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored status is not
/// recognized.
pub fn history(
    conn: &mut SqliteConnection,
    lesson_id: i64,
) -> Result<Vec<TransitionRecord>, PersistenceError> {
    let rows: Vec<LessonHistoryRow> = lesson_status_history::table
        .filter(lesson_status_history::lesson_id.eq(lesson_id))
        .order(lesson_status_history::history_id.asc())
        .load::<LessonHistoryRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("history: {e}")))?;

    rows.into_iter().map(record_from_history_row).collect()
}
