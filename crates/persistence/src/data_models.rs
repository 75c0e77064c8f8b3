// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and conversions between storage rows and domain types.
//!
//! Dates and times are stored as ISO-8601 text. Conversion failures on
//! read mean the row was written outside the application and surface as
//! `SerializationError`.

use crate::error::PersistenceError;
use diesel::prelude::*;
use drivedesk_audit::{Actor, TransitionRecord};
use drivedesk_domain::{
    CourseId, InstructorId, Lesson, LessonId, LessonStatus, LessonType, PerformanceRating,
    StudentId, TimeSlot, VehicleId, join_skills, parse_skills,
};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Time};

pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
pub const TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");

/// Formats a date as ISO-8601 text for storage.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Formats a time as ISO-8601 text for storage.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub fn format_time(time: Time) -> Result<String, PersistenceError> {
    time.format(TIME_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses a stored ISO-8601 date.
///
/// # Errors
///
/// Returns an error if the text is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, PersistenceError> {
    Date::parse(text, DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("invalid date {text:?}: {e}")))
}

/// Parses a stored ISO-8601 time.
///
/// # Errors
///
/// Returns an error if the text is not a valid time.
pub fn parse_time(text: &str) -> Result<Time, PersistenceError> {
    Time::parse(text, TIME_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("invalid time {text:?}: {e}")))
}

/// A full lesson row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct LessonRow {
    pub lesson_id: i64,
    pub student_id: i64,
    pub instructor_id: i64,
    pub vehicle_id: i64,
    pub course_id: i64,
    pub lesson_date: String,
    pub start_time: String,
    pub end_time: String,
    pub lesson_type: String,
    pub status: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub instructor_notes: String,
    pub performance_rating: Option<i32>,
    pub skills_practiced: String,
    pub created_at: String,
}

/// An insertable lesson. The database assigns the id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::lessons)]
pub struct NewLesson {
    pub student_id: i64,
    pub instructor_id: i64,
    pub vehicle_id: i64,
    pub course_id: i64,
    pub lesson_date: String,
    pub start_time: String,
    pub end_time: String,
    pub lesson_type: String,
    pub status: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub instructor_notes: String,
    pub performance_rating: Option<i32>,
    pub skills_practiced: String,
    pub created_at: String,
}

/// A status history row as stored.
#[derive(Debug, Clone, Queryable)]
pub struct LessonHistoryRow {
    pub history_id: i64,
    pub lesson_id: i64,
    pub actor_id: String,
    pub actor_type: String,
    pub previous_status: Option<String>,
    pub new_status: String,
    pub transitioned_at: String,
    pub notes: Option<String>,
}

/// An insertable history record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::diesel_schema::lesson_status_history)]
pub struct NewLessonHistory {
    pub lesson_id: i64,
    pub actor_id: String,
    pub actor_type: String,
    pub previous_status: Option<String>,
    pub new_status: String,
    pub transitioned_at: String,
    pub notes: Option<String>,
}

impl NewLessonHistory {
    /// Builds an insertable history record from a transition record.
    ///
    /// `lesson_id` is taken explicitly rather than from the record so
    /// that booking can insert the record for a freshly assigned row id.
    #[must_use]
    pub fn from_record(lesson_id: i64, record: &TransitionRecord) -> Self {
        Self {
            lesson_id,
            actor_id: record.actor.id.clone(),
            actor_type: record.actor.actor_type.clone(),
            previous_status: record.from_status.map(|s| s.as_str().to_string()),
            new_status: record.to_status.as_str().to_string(),
            transitioned_at: record.transitioned_at.clone(),
            notes: record.note.clone(),
        }
    }
}

/// Converts a stored lesson row back into the domain type.
///
/// # Errors
///
/// Returns `SerializationError` if any stored field fails domain
/// validation.
pub fn lesson_from_row(row: LessonRow) -> Result<Lesson, PersistenceError> {
    let date: Date = parse_date(&row.lesson_date)?;
    let start: Time = parse_time(&row.start_time)?;
    let end: Time = parse_time(&row.end_time)?;
    let slot: TimeSlot = TimeSlot::new(date, start, end)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

    let lesson_type: LessonType = row
        .lesson_type
        .parse()
        .map_err(|e: drivedesk_domain::DomainError| {
            PersistenceError::SerializationError(e.to_string())
        })?;
    let status: LessonStatus = row
        .status
        .parse()
        .map_err(|e: drivedesk_domain::DomainError| {
            PersistenceError::SerializationError(e.to_string())
        })?;

    let performance_rating: Option<PerformanceRating> = match row.performance_rating {
        None => None,
        Some(raw) => {
            let value: u8 = u8::try_from(raw).map_err(|_| {
                PersistenceError::SerializationError(format!("invalid rating {raw}"))
            })?;
            Some(PerformanceRating::new(value).map_err(|e| {
                PersistenceError::SerializationError(e.to_string())
            })?)
        }
    };

    Ok(Lesson {
        lesson_id: LessonId(row.lesson_id),
        student_id: StudentId(row.student_id),
        instructor_id: InstructorId(row.instructor_id),
        vehicle_id: VehicleId(row.vehicle_id),
        course_id: CourseId(row.course_id),
        slot,
        lesson_type,
        status,
        pickup_location: row.pickup_location,
        dropoff_location: row.dropoff_location,
        instructor_notes: row.instructor_notes,
        performance_rating,
        skills_practiced: parse_skills(&row.skills_practiced),
        created_at: row.created_at,
    })
}

/// Converts a domain lesson into an insertable row.
///
/// # Errors
///
/// Returns an error if date or time formatting fails.
pub fn new_lesson_from_domain(lesson: &Lesson) -> Result<NewLesson, PersistenceError> {
    Ok(NewLesson {
        student_id: lesson.student_id.value(),
        instructor_id: lesson.instructor_id.value(),
        vehicle_id: lesson.vehicle_id.value(),
        course_id: lesson.course_id.value(),
        lesson_date: format_date(lesson.slot.date)?,
        start_time: format_time(lesson.slot.start)?,
        end_time: format_time(lesson.slot.end)?,
        lesson_type: lesson.lesson_type.as_str().to_string(),
        status: lesson.status.as_str().to_string(),
        pickup_location: lesson.pickup_location.clone(),
        dropoff_location: lesson.dropoff_location.clone(),
        instructor_notes: lesson.instructor_notes.clone(),
        performance_rating: lesson.performance_rating.map(|r| i32::from(r.value())),
        skills_practiced: join_skills(&lesson.skills_practiced),
        created_at: lesson.created_at.clone(),
    })
}

/// Converts a stored history row into an audit transition record.
///
/// # Errors
///
/// Returns `SerializationError` if a stored status is not recognized.
pub fn record_from_history_row(row: LessonHistoryRow) -> Result<TransitionRecord, PersistenceError> {
    let from_status: Option<LessonStatus> = match row.previous_status {
        None => None,
        Some(text) => Some(text.parse().map_err(|e: drivedesk_domain::DomainError| {
            PersistenceError::SerializationError(e.to_string())
        })?),
    };
    let to_status: LessonStatus =
        row.new_status
            .parse()
            .map_err(|e: drivedesk_domain::DomainError| {
                PersistenceError::SerializationError(e.to_string())
            })?;

    Ok(TransitionRecord::new(
        LessonId(row.lesson_id),
        Actor::new(row.actor_id, row.actor_type),
        row.transitioned_at,
        from_status,
        to_status,
        row.notes,
    ))
}
