// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::ApiError;
use crate::handlers::{book_lesson, reassign_lesson};
use crate::notify::TracingNotificationSink;
use crate::request_response::ReassignLessonRequest;
use crate::tests::{book, booking_request, policy, setup, staff, student_actor, wire_date};

#[test]
fn test_reassigning_to_a_free_instructor_succeeds() {
    let (mut persistence, seed) = setup();
    let booked = book(&mut persistence, &seed, &wire_date(1), "10:00:00");
    let substitute = persistence.add_instructor("Ann Carter", true).unwrap();

    let response = reassign_lesson(
        &mut persistence,
        &staff(),
        &TracingNotificationSink,
        &ReassignLessonRequest {
            lesson_id: booked.lesson_id,
            instructor_id: Some(substitute.value()),
            vehicle_id: None,
        },
    )
    .unwrap();

    assert_eq!(response.instructor_id, substitute.value());
    assert_eq!(response.vehicle_id, seed.vehicle);
}

#[test]
fn test_reassigning_to_a_busy_instructor_conflicts() {
    let (mut persistence, seed) = setup();
    let date = wire_date(1);
    let booked = book(&mut persistence, &seed, &date, "10:00:00");

    // The substitute already teaches an overlapping lesson in another car.
    let substitute = persistence.add_instructor("Ann Carter", true).unwrap();
    let other_vehicle = persistence.add_vehicle("EF-456-GH", true).unwrap();
    let mut competing = booking_request(&seed, &date, "10:30:00");
    competing.instructor_id = substitute.value();
    competing.vehicle_id = other_vehicle.value();
    let blocking = book_lesson(
        &mut persistence,
        &staff(),
        &policy(),
        &TracingNotificationSink,
        &competing,
    )
    .unwrap();

    let result = reassign_lesson(
        &mut persistence,
        &staff(),
        &TracingNotificationSink,
        &ReassignLessonRequest {
            lesson_id: booked.lesson_id,
            instructor_id: Some(substitute.value()),
            vehicle_id: None,
        },
    );

    match result {
        Err(ApiError::Conflict { resource, blocking: ids }) => {
            assert_eq!(resource, "instructor");
            assert_eq!(ids, vec![blocking.lesson_id]);
        }
        other => panic!("expected Conflict, got {other:?}"),
    }
}

#[test]
fn test_exactly_one_resource_must_be_given() {
    let (mut persistence, seed) = setup();
    let booked = book(&mut persistence, &seed, &wire_date(1), "10:00:00");

    for (instructor_id, vehicle_id) in [(None, None), (Some(seed.instructor), Some(seed.vehicle))]
    {
        let result = reassign_lesson(
            &mut persistence,
            &staff(),
            &TracingNotificationSink,
            &ReassignLessonRequest {
                lesson_id: booked.lesson_id,
                instructor_id,
                vehicle_id,
            },
        );
        assert!(matches!(result, Err(ApiError::ValidationFailed { .. })));
    }
}

#[test]
fn test_students_cannot_reassign() {
    let (mut persistence, seed) = setup();
    let booked = book(&mut persistence, &seed, &wire_date(1), "10:00:00");

    let result = reassign_lesson(
        &mut persistence,
        &student_actor(seed.student),
        &TracingNotificationSink,
        &ReassignLessonRequest {
            lesson_id: booked.lesson_id,
            instructor_id: Some(99),
            vehicle_id: None,
        },
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}
