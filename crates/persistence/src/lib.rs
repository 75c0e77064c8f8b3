// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the DriveDesk lesson scheduler.
//!
//! This crate stores lessons, reference entities, and the per-lesson
//! status history timeline. It is built on Diesel over `SQLite`.
//!
//! `SQLite` covers development, tests, and single-school production
//! deployments: in-memory databases for fast deterministic tests,
//! file-based databases with WAL mode for servers.
//!
//! ## Concurrency
//!
//! Availability-sensitive mutations (booking, reassignment) re-run the
//! conflict check inside an IMMEDIATE transaction. The write lock is
//! taken before the re-check, so two requests racing for the same slot
//! serialize and the loser gets a `SlotConflict` error instead of a
//! double-booking.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use drivedesk::{CalendarFilter, PreparedLesson, ReferenceData, TransitionOutcome};
use drivedesk_audit::{Actor, TransitionRecord};
use drivedesk_domain::{
    CourseId, InstructorId, Lesson, LessonId, LessonSummary, ResourceKind, StudentId, VehicleId,
};
use time::Date;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for lessons, reference data, and history.
///
/// Holds one `SQLite` connection; callers serialize access (the server
/// wraps the adapter in a mutex).
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file-based databases
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Lessons
    // ========================================================================

    /// Books a validated lesson, re-checking availability transactionally.
    ///
    /// Returns the lesson with its database-assigned id. The initial
    /// history record is written in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `SlotConflict` if the instructor or vehicle was claimed
    /// since validation, or a database error.
    pub fn book_lesson(
        &mut self,
        prepared: &PreparedLesson,
        actor: &Actor,
        booked_at: &str,
    ) -> Result<Lesson, PersistenceError> {
        mutations::lessons::book_lesson(&mut self.conn, prepared, actor, booked_at)
    }

    /// Retrieves a lesson by id.
    ///
    /// # Errors
    ///
    /// Returns `LessonNotFound` if no such lesson exists.
    pub fn get_lesson(&mut self, lesson_id: LessonId) -> Result<Lesson, PersistenceError> {
        queries::lessons::get_lesson(&mut self.conn, lesson_id.value())
    }

    /// Retrieves lessons by id, ordered by id ascending.
    ///
    /// Missing ids are absent from the result rather than errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_lessons(&mut self, lesson_ids: &[LessonId]) -> Result<Vec<Lesson>, PersistenceError> {
        let ids: Vec<i64> = lesson_ids.iter().map(|id| id.value()).collect();
        queries::lessons::get_lessons(&mut self.conn, &ids)
    }

    /// Retrieves the lessons of one instructor or vehicle on one date,
    /// as conflict-check candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn lessons_for_resource_on_date(
        &mut self,
        resource: ResourceKind,
        resource_id: i64,
        date: Date,
    ) -> Result<Vec<LessonSummary>, PersistenceError> {
        queries::lessons::for_resource_on_date(&mut self.conn, resource, resource_id, date)
    }

    /// Retrieves lesson summaries in a date range, both endpoints
    /// inclusive, with the calendar filter applied in SQL.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn lessons_in_range(
        &mut self,
        from: Date,
        to: Date,
        filter: &CalendarFilter,
    ) -> Result<Vec<LessonSummary>, PersistenceError> {
        queries::lessons::in_range(&mut self.conn, from, to, filter)
    }

    /// Retrieves a lesson's status history timeline, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn lesson_history(
        &mut self,
        lesson_id: LessonId,
    ) -> Result<Vec<TransitionRecord>, PersistenceError> {
        queries::lessons::history(&mut self.conn, lesson_id.value())
    }

    /// Persists a status transition outcome and its history record.
    ///
    /// # Errors
    ///
    /// Returns `LessonNotFound` if the lesson row no longer exists, or
    /// a database error.
    pub fn persist_transition(
        &mut self,
        outcome: &TransitionOutcome,
    ) -> Result<(), PersistenceError> {
        mutations::lessons::persist_transition(&mut self.conn, outcome)
    }

    /// Persists a reassignment outcome, re-checking that the new
    /// resource is still free inside the transaction.
    ///
    /// # Errors
    ///
    /// Returns `SlotConflict` if the new resource was claimed since the
    /// core-side check, or a database error.
    pub fn persist_reassignment(
        &mut self,
        outcome: &TransitionOutcome,
        resource: ResourceKind,
    ) -> Result<(), PersistenceError> {
        mutations::lessons::persist_reassignment(&mut self.conn, outcome, resource)
    }

    /// Permanently removes a lesson and its history timeline.
    ///
    /// Deletion is distinct from cancellation: the row is gone, not
    /// marked. Callers gate this behind admin authorization.
    ///
    /// # Errors
    ///
    /// Returns `LessonNotFound` if the lesson does not exist.
    pub fn delete_lesson(&mut self, lesson_id: LessonId) -> Result<(), PersistenceError> {
        mutations::lessons::delete_lesson(&mut self.conn, lesson_id.value())
    }

    // ========================================================================
    // Reference data
    // ========================================================================

    /// Resolves the reference data for a booking request.
    ///
    /// Missing entities come back as `None`; the booking pipeline turns
    /// them into validation defects.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup query fails.
    pub fn reference_data(
        &mut self,
        student_id: StudentId,
        instructor_id: InstructorId,
        vehicle_id: VehicleId,
        course_id: CourseId,
    ) -> Result<ReferenceData, PersistenceError> {
        queries::reference::reference_data(
            &mut self.conn,
            student_id,
            instructor_id,
            vehicle_id,
            course_id,
        )
    }

    /// Inserts a student and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_student(
        &mut self,
        full_name: &str,
        is_active: bool,
    ) -> Result<StudentId, PersistenceError> {
        mutations::reference::add_student(&mut self.conn, full_name, is_active).map(StudentId)
    }

    /// Inserts an instructor and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_instructor(
        &mut self,
        full_name: &str,
        is_active: bool,
    ) -> Result<InstructorId, PersistenceError> {
        mutations::reference::add_instructor(&mut self.conn, full_name, is_active)
            .map(InstructorId)
    }

    /// Inserts a vehicle and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_vehicle(
        &mut self,
        registration: &str,
        is_active: bool,
    ) -> Result<VehicleId, PersistenceError> {
        mutations::reference::add_vehicle(&mut self.conn, registration, is_active).map(VehicleId)
    }

    /// Inserts a course and returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_course(
        &mut self,
        course_name: &str,
        duration_minutes: i32,
        is_active: bool,
    ) -> Result<CourseId, PersistenceError> {
        mutations::reference::add_course(&mut self.conn, course_name, duration_minutes, is_active)
            .map(CourseId)
    }
}
