// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lesson mutation operations.
//!
//! Booking and reassignment run their availability re-check and their
//! writes inside one IMMEDIATE transaction: `SQLite` takes the write
//! lock up front, so no competing connection can insert a conflicting
//! lesson between the check and the commit.

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewLessonHistory, new_lesson_from_domain};
use crate::diesel_schema::{lesson_status_history, lessons};
use crate::error::PersistenceError;
use crate::queries;
use diesel::SqliteConnection;
use diesel::prelude::*;
use drivedesk::{PreparedLesson, TransitionOutcome, find_conflicts};
use drivedesk_audit::{Actor, TransitionRecord};
use drivedesk_domain::{
    Lesson, LessonId, LessonStatus, LessonSummary, ResourceKind, TimeSlot, join_skills,
};

fn ensure_slot_free(
    conn: &mut SqliteConnection,
    resource: ResourceKind,
    resource_id: i64,
    slot: &TimeSlot,
    exclude: Option<LessonId>,
) -> Result<(), PersistenceError> {
    let candidates: Vec<LessonSummary> =
        queries::lessons::for_resource_on_date(conn, resource, resource_id, slot.date)?;
    let blocking: Vec<LessonSummary> = find_conflicts(&candidates, slot, exclude);

    if blocking.is_empty() {
        Ok(())
    } else {
        Err(PersistenceError::SlotConflict {
            resource: resource.as_str().to_string(),
            resource_id,
            blocking: blocking.iter().map(|l| l.lesson_id.value()).collect(),
        })
    }
}

/// Inserts a validated lesson after re-checking that instructor and
/// vehicle are still free, all inside one IMMEDIATE transaction.
///
/// Also writes the initial history record (`None -> scheduled`).
/// Returns the lesson with its database-assigned id.
///
/// # Errors
///
/// Returns `SlotConflict` if a competing booking claimed either
/// resource since validation, or a database error.
pub fn book_lesson(
    conn: &mut SqliteConnection,
    prepared: &PreparedLesson,
    actor: &Actor,
    booked_at: &str,
) -> Result<Lesson, PersistenceError> {
    let lesson: &Lesson = &prepared.lesson;

    conn.immediate_transaction::<Lesson, PersistenceError, _>(|conn| {
        ensure_slot_free(
            conn,
            ResourceKind::Instructor,
            lesson.instructor_id.value(),
            &lesson.slot,
            None,
        )?;
        ensure_slot_free(
            conn,
            ResourceKind::Vehicle,
            lesson.vehicle_id.value(),
            &lesson.slot,
            None,
        )?;

        let row = new_lesson_from_domain(lesson)?;
        diesel::insert_into(lessons::table)
            .values(&row)
            .execute(conn)?;
        let lesson_id: i64 = get_last_insert_rowid(conn)?;

        let record = TransitionRecord::new(
            LessonId(lesson_id),
            actor.clone(),
            booked_at.to_string(),
            None,
            LessonStatus::Scheduled,
            None,
        );
        diesel::insert_into(lesson_status_history::table)
            .values(&NewLessonHistory::from_record(lesson_id, &record))
            .execute(conn)?;

        let mut created: Lesson = lesson.clone();
        created.lesson_id = LessonId(lesson_id);
        Ok(created)
    })
}

/// Persists a status transition: the updated lesson fields and the
/// history record, in one transaction.
///
/// # Errors
///
/// Returns `LessonNotFound` if the lesson row no longer exists, or a
/// database error.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    outcome: &TransitionOutcome,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction::<(), PersistenceError, _>(|conn| {
        let updated: &Lesson = &outcome.updated;

        let affected: usize = diesel::update(
            lessons::table.filter(lessons::lesson_id.eq(updated.lesson_id.value())),
        )
        .set((
            lessons::status.eq(updated.status.as_str()),
            lessons::instructor_notes.eq(&updated.instructor_notes),
            lessons::performance_rating
                .eq(updated.performance_rating.map(|r| i32::from(r.value()))),
            lessons::skills_practiced.eq(join_skills(&updated.skills_practiced)),
        ))
        .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::LessonNotFound(updated.lesson_id.value()));
        }

        diesel::insert_into(lesson_status_history::table)
            .values(&NewLessonHistory::from_record(
                updated.lesson_id.value(),
                &outcome.record,
            ))
            .execute(conn)?;

        Ok(())
    })
}

/// Persists a reassignment after re-checking that the new resource is
/// still free for the lesson's slot.
///
/// # Errors
///
/// Returns `SlotConflict` if the new resource was claimed since the
/// core-side check, `LessonNotFound` if the row no longer exists, or a
/// database error.
pub fn persist_reassignment(
    conn: &mut SqliteConnection,
    outcome: &TransitionOutcome,
    resource: ResourceKind,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction::<(), PersistenceError, _>(|conn| {
        let updated: &Lesson = &outcome.updated;
        let resource_id: i64 = match resource {
            ResourceKind::Instructor => updated.instructor_id.value(),
            ResourceKind::Vehicle => updated.vehicle_id.value(),
        };

        ensure_slot_free(
            conn,
            resource,
            resource_id,
            &updated.slot,
            Some(updated.lesson_id),
        )?;

        let affected: usize = diesel::update(
            lessons::table.filter(lessons::lesson_id.eq(updated.lesson_id.value())),
        )
        .set((
            lessons::instructor_id.eq(updated.instructor_id.value()),
            lessons::vehicle_id.eq(updated.vehicle_id.value()),
            lessons::instructor_notes.eq(&updated.instructor_notes),
        ))
        .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::LessonNotFound(updated.lesson_id.value()));
        }

        diesel::insert_into(lesson_status_history::table)
            .values(&NewLessonHistory::from_record(
                updated.lesson_id.value(),
                &outcome.record,
            ))
            .execute(conn)?;

        Ok(())
    })
}

/// Permanently removes a lesson and its history timeline.
///
/// # Errors
///
/// Returns `LessonNotFound` if the lesson does not exist, or a
/// database error.
pub fn delete_lesson(
    conn: &mut SqliteConnection,
    lesson_id: i64,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction::<(), PersistenceError, _>(|conn| {
        diesel::delete(
            lesson_status_history::table.filter(lesson_status_history::lesson_id.eq(lesson_id)),
        )
        .execute(conn)?;

        let affected: usize =
            diesel::delete(lessons::table.filter(lessons::lesson_id.eq(lesson_id)))
                .execute(conn)?;

        if affected == 0 {
            return Err(PersistenceError::LessonNotFound(lesson_id));
        }

        Ok(())
    })
}
