// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference data lookups for booking validation.
//!
//! Missing entities are represented as `None`, never as errors; the
//! booking pipeline turns them into validation defects.

use crate::diesel_schema::{courses, instructors, students, vehicles};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use drivedesk::{CourseData, ReferenceData};
use drivedesk_domain::{CourseId, InstructorId, StudentId, VehicleId};

fn active_flag(value: Option<i32>) -> Option<bool> {
    value.map(|v| v != 0)
}

/// Resolves the reference data for one booking request.
///
/// # Errors
///
/// Returns an error if a lookup query fails.
pub fn reference_data(
    conn: &mut SqliteConnection,
    student_id: StudentId,
    instructor_id: InstructorId,
    vehicle_id: VehicleId,
    course_id: CourseId,
) -> Result<ReferenceData, PersistenceError> {
    let student_active: Option<i32> = students::table
        .filter(students::student_id.eq(student_id.value()))
        .select(students::is_active)
        .first::<i32>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("reference_data/student: {e}")))?;

    let instructor_active: Option<i32> = instructors::table
        .filter(instructors::instructor_id.eq(instructor_id.value()))
        .select(instructors::is_active)
        .first::<i32>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("reference_data/instructor: {e}")))?;

    let vehicle_active: Option<i32> = vehicles::table
        .filter(vehicles::vehicle_id.eq(vehicle_id.value()))
        .select(vehicles::is_active)
        .first::<i32>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("reference_data/vehicle: {e}")))?;

    let course: Option<(i32, i32)> = courses::table
        .filter(courses::course_id.eq(course_id.value()))
        .select((courses::duration_minutes, courses::is_active))
        .first::<(i32, i32)>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("reference_data/course: {e}")))?;

    Ok(ReferenceData {
        student_active: active_flag(student_active),
        instructor_active: active_flag(instructor_active),
        vehicle_active: active_flag(vehicle_active),
        course: course.map(|(duration_minutes, is_active)| CourseData {
            is_active: is_active != 0,
            duration_minutes: i64::from(duration_minutes),
        }),
    })
}
