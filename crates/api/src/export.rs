// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export for the bulk `export` action.

use crate::request_response::{DATE_FORMAT, TIME_FORMAT};
use drivedesk_domain::{Lesson, join_skills};
use thiserror::Error;

/// Errors from CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing a CSV record failed.
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
    /// A date or time could not be formatted.
    #[error("formatting failed: {0}")]
    Format(#[from] time::error::Format),
    /// The CSV output was not valid UTF-8.
    #[error("CSV output was not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

const HEADERS: [&str; 13] = [
    "lesson_id",
    "date",
    "start_time",
    "end_time",
    "student_id",
    "instructor_id",
    "vehicle_id",
    "lesson_type",
    "status",
    "pickup_location",
    "dropoff_location",
    "performance_rating",
    "skills_practiced",
];

/// Renders lessons as a CSV document with a header row.
///
/// # Errors
///
/// Returns an error if a record cannot be written or a date fails to
/// format.
pub fn export_lessons_csv(lessons: &[Lesson]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;

    for lesson in lessons {
        let rating: String = lesson
            .performance_rating
            .map(|r| r.value().to_string())
            .unwrap_or_default();

        writer.write_record([
            lesson.lesson_id.value().to_string(),
            lesson.slot.date.format(DATE_FORMAT)?,
            lesson.slot.start.format(TIME_FORMAT)?,
            lesson.slot.end.format(TIME_FORMAT)?,
            lesson.student_id.value().to_string(),
            lesson.instructor_id.value().to_string(),
            lesson.vehicle_id.value().to_string(),
            lesson.lesson_type.as_str().to_string(),
            lesson.status.as_str().to_string(),
            lesson.pickup_location.clone(),
            lesson.dropoff_location.clone(),
            rating,
            join_skills(&lesson.skills_practiced),
        ])?;
    }

    let bytes: Vec<u8> = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}
