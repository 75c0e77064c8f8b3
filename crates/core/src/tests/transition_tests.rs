// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{TODAY, lesson, slot, staff_actor, summary};
use crate::{CoreError, apply_transition, complete_lesson, reassign_instructor, reassign_vehicle};
use drivedesk_domain::{
    CompletionOutcome, DomainError, InstructorId, LessonStatus, PerformanceRating, VehicleId,
};
use time::macros::time;

const NOW: &str = "2026-09-14T10:00:00Z";

#[test]
fn test_transition_updates_status_and_appends_notes() {
    let scheduled = lesson(1, LessonStatus::Scheduled, slot(TODAY, time!(09:00), time!(10:00)));

    let outcome = apply_transition(
        &scheduled,
        LessonStatus::InProgress,
        &staff_actor(),
        None,
        NOW,
    )
    .expect("transition should succeed");

    assert_eq!(outcome.updated.status, LessonStatus::InProgress);
    assert!(outcome.updated.instructor_notes.contains("scheduled -> in_progress"));
    assert!(outcome.updated.instructor_notes.contains("staff-7"));
    assert_eq!(outcome.record.from_status, Some(LessonStatus::Scheduled));
    assert_eq!(outcome.record.to_status, LessonStatus::InProgress);
}

#[test]
fn test_notes_trail_accumulates_lines() {
    let scheduled = lesson(1, LessonStatus::Scheduled, slot(TODAY, time!(09:00), time!(10:00)));

    let first = apply_transition(
        &scheduled,
        LessonStatus::InProgress,
        &staff_actor(),
        None,
        NOW,
    )
    .expect("first transition");
    let second = apply_transition(
        &first.updated,
        LessonStatus::Completed,
        &staff_actor(),
        Some("finished early"),
        NOW,
    )
    .expect("second transition");

    let lines: Vec<&str> = second.updated.instructor_notes.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("in_progress -> completed"));
    assert!(lines[1].contains("finished early"));
}

#[test]
fn test_cancelling_cancelled_lesson_is_precondition_error() {
    let cancelled = lesson(1, LessonStatus::Cancelled, slot(TODAY, time!(09:00), time!(10:00)));

    let result = apply_transition(
        &cancelled,
        LessonStatus::Cancelled,
        &staff_actor(),
        None,
        NOW,
    );
    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}

#[test]
fn test_completion_attaches_outcome_fields() {
    let scheduled = lesson(1, LessonStatus::Scheduled, slot(TODAY, time!(09:00), time!(10:00)));
    let outcome_data = CompletionOutcome {
        rating: PerformanceRating::new(4).expect("valid rating"),
        skills_practiced: vec![String::from("parallel parking"), String::from("mirrors")],
        note: None,
    };

    let outcome = complete_lesson(&scheduled, &outcome_data, &staff_actor(), NOW)
        .expect("completion should succeed");

    assert_eq!(outcome.updated.status, LessonStatus::Completed);
    assert_eq!(
        outcome.updated.performance_rating.map(|r| r.value()),
        Some(4)
    );
    assert_eq!(outcome.updated.skills_practiced.len(), 2);
    assert!(outcome.updated.instructor_notes.contains("rated 4/5"));
}

#[test]
fn test_completion_from_terminal_state_rejected() {
    let completed = lesson(1, LessonStatus::Completed, slot(TODAY, time!(09:00), time!(10:00)));
    let outcome_data = CompletionOutcome {
        rating: PerformanceRating::new(5).expect("valid rating"),
        skills_practiced: Vec::new(),
        note: None,
    };

    assert!(complete_lesson(&completed, &outcome_data, &staff_actor(), NOW).is_err());
}

#[test]
fn test_reassign_instructor_on_free_slot() {
    let scheduled = lesson(1, LessonStatus::Scheduled, slot(TODAY, time!(09:00), time!(10:00)));
    // The new instructor teaches elsewhere later that day.
    let candidates = vec![summary(
        9,
        LessonStatus::Scheduled,
        slot(TODAY, time!(10:00), time!(11:00)),
    )];

    let outcome = reassign_instructor(
        &scheduled,
        InstructorId(99),
        &candidates,
        &staff_actor(),
        NOW,
    )
    .expect("reassignment should succeed");

    assert_eq!(outcome.updated.instructor_id, InstructorId(99));
    assert_eq!(outcome.updated.status, LessonStatus::Scheduled);
    assert!(
        outcome
            .updated
            .instructor_notes
            .contains("instructor reassigned from 21 to 99")
    );
}

#[test]
fn test_reassign_instructor_blocked_by_conflict() {
    let scheduled = lesson(1, LessonStatus::Scheduled, slot(TODAY, time!(09:00), time!(10:00)));
    let candidates = vec![summary(
        9,
        LessonStatus::Scheduled,
        slot(TODAY, time!(09:30), time!(10:30)),
    )];

    let result = reassign_instructor(
        &scheduled,
        InstructorId(99),
        &candidates,
        &staff_actor(),
        NOW,
    );
    assert!(matches!(result, Err(CoreError::ResourceConflict { .. })));
}

#[test]
fn test_reassignment_requires_scheduled_status() {
    let completed = lesson(1, LessonStatus::Completed, slot(TODAY, time!(09:00), time!(10:00)));

    let result = reassign_instructor(&completed, InstructorId(99), &[], &staff_actor(), NOW);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ReassignmentNotAllowed { .. }
        ))
    ));
}

#[test]
fn test_reassign_vehicle_checks_vehicle_availability() {
    let scheduled = lesson(1, LessonStatus::Scheduled, slot(TODAY, time!(09:00), time!(10:00)));
    let busy = vec![summary(
        5,
        LessonStatus::InProgress,
        slot(TODAY, time!(09:00), time!(09:45)),
    )];

    let blocked = reassign_vehicle(&scheduled, VehicleId(77), &busy, &staff_actor(), NOW);
    assert!(matches!(blocked, Err(CoreError::ResourceConflict { .. })));

    let free = reassign_vehicle(&scheduled, VehicleId(77), &[], &staff_actor(), NOW)
        .expect("reassignment should succeed");
    assert_eq!(free.updated.vehicle_id, VehicleId(77));
}
