// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The status transition engine.
//!
//! Every transition is validated against the lesson status lifecycle and
//! produces both the updated lesson and a structured `TransitionRecord`.
//! The human-readable trail in `instructor_notes` is appended for
//! compatibility; the structured record is what audit queries read.

use crate::conflicts::ensure_available;
use crate::error::CoreError;
use drivedesk_audit::{Actor, TransitionRecord};
use drivedesk_domain::{
    CompletionOutcome, DomainError, InstructorId, Lesson, LessonStatus, LessonSummary,
    ResourceKind, VehicleId, join_skills,
};

/// The result of a successful transition or reassignment.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The caller persists `updated` and `record` together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// The lesson after the change.
    pub updated: Lesson,
    /// The structured audit record for this change.
    pub record: TransitionRecord,
}

fn append_notes_line(notes: &str, line: &str) -> String {
    if notes.is_empty() {
        line.to_string()
    } else {
        format!("{notes}\n{line}")
    }
}

/// Applies a status transition to a lesson.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the transition is not
/// permitted by the status lifecycle rules.
pub fn apply_transition(
    lesson: &Lesson,
    new_status: LessonStatus,
    actor: &Actor,
    note: Option<&str>,
    now: &str,
) -> Result<TransitionOutcome, CoreError> {
    lesson.status.validate_transition(new_status)?;

    let record = TransitionRecord::new(
        lesson.lesson_id,
        actor.clone(),
        now.to_string(),
        Some(lesson.status),
        new_status,
        note.map(ToString::to_string),
    );

    let mut updated = lesson.clone();
    updated.status = new_status;
    updated.instructor_notes = append_notes_line(&lesson.instructor_notes, &record.notes_line());

    Ok(TransitionOutcome { updated, record })
}

/// Completes a lesson, attaching the outcome fields.
///
/// Completion is the only path that populates the performance rating and
/// the skills-practiced list.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the lesson cannot transition
/// to `completed` from its current status.
pub fn complete_lesson(
    lesson: &Lesson,
    outcome: &CompletionOutcome,
    actor: &Actor,
    now: &str,
) -> Result<TransitionOutcome, CoreError> {
    let note = outcome.note.clone().unwrap_or_else(|| {
        format!(
            "rated {}/5, skills: {}",
            outcome.rating.value(),
            join_skills(&outcome.skills_practiced)
        )
    });

    let mut result = apply_transition(
        lesson,
        LessonStatus::Completed,
        actor,
        Some(note.as_str()),
        now,
    )?;

    result.updated.performance_rating = Some(outcome.rating);
    result.updated.skills_practiced = outcome.skills_practiced.clone();

    Ok(result)
}

fn reassignment_record(
    lesson: &Lesson,
    actor: &Actor,
    note: String,
    now: &str,
) -> TransitionRecord {
    // Reassignment keeps the status; the record documents the change
    // with identical from/to so the history stays a single timeline.
    TransitionRecord::new(
        lesson.lesson_id,
        actor.clone(),
        now.to_string(),
        Some(lesson.status),
        lesson.status,
        Some(note),
    )
}

/// Reassigns a lesson to a different instructor.
///
/// Only scheduled lessons may be reassigned, and the new instructor must
/// be free for the lesson's existing slot. `candidates` are the new
/// instructor's lessons on the lesson date, fetched by the caller.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the lesson is not scheduled,
/// or `CoreError::ResourceConflict` naming the blocking lessons.
pub fn reassign_instructor(
    lesson: &Lesson,
    new_instructor: InstructorId,
    candidates: &[LessonSummary],
    actor: &Actor,
    now: &str,
) -> Result<TransitionOutcome, CoreError> {
    if lesson.status != LessonStatus::Scheduled {
        return Err(DomainError::ReassignmentNotAllowed {
            status: lesson.status.as_str().to_string(),
        }
        .into());
    }

    ensure_available(
        ResourceKind::Instructor,
        new_instructor.value(),
        candidates,
        &lesson.slot,
        Some(lesson.lesson_id),
    )?;

    let record = reassignment_record(
        lesson,
        actor,
        format!(
            "instructor reassigned from {} to {}",
            lesson.instructor_id.value(),
            new_instructor.value()
        ),
        now,
    );

    let mut updated = lesson.clone();
    updated.instructor_id = new_instructor;
    updated.instructor_notes = append_notes_line(&lesson.instructor_notes, &record.notes_line());

    Ok(TransitionOutcome { updated, record })
}

/// Reassigns a lesson to a different vehicle.
///
/// Same preconditions as instructor reassignment: the lesson must be
/// scheduled and the new vehicle free for the existing slot.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if the lesson is not scheduled,
/// or `CoreError::ResourceConflict` naming the blocking lessons.
pub fn reassign_vehicle(
    lesson: &Lesson,
    new_vehicle: VehicleId,
    candidates: &[LessonSummary],
    actor: &Actor,
    now: &str,
) -> Result<TransitionOutcome, CoreError> {
    if lesson.status != LessonStatus::Scheduled {
        return Err(DomainError::ReassignmentNotAllowed {
            status: lesson.status.as_str().to_string(),
        }
        .into());
    }

    ensure_available(
        ResourceKind::Vehicle,
        new_vehicle.value(),
        candidates,
        &lesson.slot,
        Some(lesson.lesson_id),
    )?;

    let record = reassignment_record(
        lesson,
        actor,
        format!(
            "vehicle reassigned from {} to {}",
            lesson.vehicle_id.value(),
            new_vehicle.value()
        ),
        now,
    );

    let mut updated = lesson.clone();
    updated.vehicle_id = new_vehicle;
    updated.instructor_notes = append_notes_line(&lesson.instructor_notes, &record.notes_line());

    Ok(TransitionOutcome { updated, record })
}
