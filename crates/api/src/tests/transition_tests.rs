// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::{complete_lesson, get_lesson, transition_lesson};
use crate::notify::TracingNotificationSink;
use crate::request_response::{CompleteLessonRequest, TransitionLessonRequest};
use crate::tests::{book, instructor_actor, setup, staff, student_actor, wire_date};

fn cancel_request(lesson_id: i64, note: &str) -> TransitionLessonRequest {
    TransitionLessonRequest {
        lesson_id,
        new_status: String::from("cancelled"),
        note: Some(note.to_string()),
    }
}

#[test]
fn test_staff_cancels_a_lesson() {
    let (mut persistence, seed) = setup();
    let booked = book(&mut persistence, &seed, &wire_date(1), "10:00:00");

    let response = transition_lesson(
        &mut persistence,
        &staff(),
        &TracingNotificationSink,
        &cancel_request(booked.lesson_id, "student ill"),
    )
    .unwrap();

    assert_eq!(response.previous_status, "scheduled");
    assert_eq!(response.new_status, "cancelled");
}

#[test]
fn test_cancelling_twice_fails_the_precondition() {
    let (mut persistence, seed) = setup();
    let booked = book(&mut persistence, &seed, &wire_date(1), "10:00:00");
    let request = cancel_request(booked.lesson_id, "student ill");

    transition_lesson(&mut persistence, &staff(), &TracingNotificationSink, &request).unwrap();
    let result =
        transition_lesson(&mut persistence, &staff(), &TracingNotificationSink, &request);

    assert!(matches!(result, Err(ApiError::PreconditionFailed { .. })));
}

#[test]
fn test_transitioning_a_missing_lesson_is_not_found() {
    let (mut persistence, _seed) = setup();

    let result = transition_lesson(
        &mut persistence,
        &staff(),
        &TracingNotificationSink,
        &cancel_request(42, "no such lesson"),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_instructor_transitions_own_lesson_only() {
    let (mut persistence, seed) = setup();
    let booked = book(&mut persistence, &seed, &wire_date(1), "10:00:00");
    let request = TransitionLessonRequest {
        lesson_id: booked.lesson_id,
        new_status: String::from("in_progress"),
        note: None,
    };

    let other = instructor_actor(seed.instructor + 1);
    let denied =
        transition_lesson(&mut persistence, &other, &TracingNotificationSink, &request);
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));

    let own = instructor_actor(seed.instructor);
    let response =
        transition_lesson(&mut persistence, &own, &TracingNotificationSink, &request).unwrap();
    assert_eq!(response.new_status, "in_progress");
}

#[test]
fn test_completion_records_rating_and_skills() {
    let (mut persistence, seed) = setup();
    let booked = book(&mut persistence, &seed, &wire_date(1), "10:00:00");

    let response = complete_lesson(
        &mut persistence,
        &instructor_actor(seed.instructor),
        &CompleteLessonRequest {
            lesson_id: booked.lesson_id,
            rating: 4,
            skills_practiced: vec![String::from("parallel parking"), String::from("merging")],
            note: Some(String::from("good progress")),
        },
    )
    .unwrap();
    assert_eq!(response.rating, 4);

    let detail = get_lesson(&mut persistence, &staff(), booked.lesson_id).unwrap();
    assert_eq!(detail.status, "completed");
    assert_eq!(detail.performance_rating, Some(4));
    assert_eq!(
        detail.skills_practiced,
        vec!["parallel parking".to_string(), "merging".to_string()]
    );
}

#[test]
fn test_out_of_range_rating_is_rejected() {
    let (mut persistence, seed) = setup();
    let booked = book(&mut persistence, &seed, &wire_date(1), "10:00:00");

    let result = complete_lesson(
        &mut persistence,
        &staff(),
        &CompleteLessonRequest {
            lesson_id: booked.lesson_id,
            rating: 6,
            skills_practiced: Vec::new(),
            note: None,
        },
    );

    assert!(matches!(result, Err(ApiError::ValidationFailed { .. })));
}

#[test]
fn test_lesson_detail_carries_the_history_timeline() {
    let (mut persistence, seed) = setup();
    let booked = book(&mut persistence, &seed, &wire_date(1), "10:00:00");
    transition_lesson(
        &mut persistence,
        &staff(),
        &TracingNotificationSink,
        &cancel_request(booked.lesson_id, "vehicle in service"),
    )
    .unwrap();

    let detail = get_lesson(&mut persistence, &staff(), booked.lesson_id).unwrap();

    assert_eq!(detail.history.len(), 2);
    assert_eq!(detail.history[0].from_status, None);
    assert_eq!(detail.history[0].to_status, "scheduled");
    assert_eq!(detail.history[1].from_status, Some(String::from("scheduled")));
    assert_eq!(detail.history[1].to_status, "cancelled");
    assert_eq!(
        detail.history[1].note,
        Some(String::from("vehicle in service"))
    );
}

#[test]
fn test_students_read_only_their_own_lessons() {
    let (mut persistence, seed) = setup();
    let booked = book(&mut persistence, &seed, &wire_date(1), "10:00:00");

    let own = get_lesson(&mut persistence, &student_actor(seed.student), booked.lesson_id);
    assert!(own.is_ok());

    let other = get_lesson(&mut persistence, &student_actor(seed.student + 1), booked.lesson_id);
    assert!(matches!(other, Err(ApiError::Unauthorized { .. })));
}
