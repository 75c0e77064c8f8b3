// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reference entity mutations.
//!
//! Students, instructors, vehicles, and courses are administered
//! outside the scheduling flow; these inserts back the admin surface
//! and the test fixtures.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{courses, instructors, students, vehicles};
use crate::error::PersistenceError;
use diesel::SqliteConnection;
use diesel::prelude::*;

/// Inserts a student and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn add_student(
    conn: &mut SqliteConnection,
    full_name: &str,
    is_active: bool,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(students::table)
        .values((
            students::full_name.eq(full_name),
            students::is_active.eq(i32::from(is_active)),
        ))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Inserts an instructor and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn add_instructor(
    conn: &mut SqliteConnection,
    full_name: &str,
    is_active: bool,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(instructors::table)
        .values((
            instructors::full_name.eq(full_name),
            instructors::is_active.eq(i32::from(is_active)),
        ))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Inserts a vehicle and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn add_vehicle(
    conn: &mut SqliteConnection,
    registration: &str,
    is_active: bool,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(vehicles::table)
        .values((
            vehicles::registration.eq(registration),
            vehicles::is_active.eq(i32::from(is_active)),
        ))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}

/// Inserts a course and returns the assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn add_course(
    conn: &mut SqliteConnection,
    course_name: &str,
    duration_minutes: i32,
    is_active: bool,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(courses::table)
        .values((
            courses::course_name.eq(course_name),
            courses::duration_minutes.eq(duration_minutes),
            courses::is_active.eq(i32::from(is_active)),
        ))
        .execute(conn)?;
    get_last_insert_rowid(conn)
}
