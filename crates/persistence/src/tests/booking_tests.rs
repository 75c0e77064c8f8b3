// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{NOW, TODAY, book, booking_request, seed_references, test_actor};
use crate::{Persistence, PersistenceError};
use drivedesk::validate_booking;
use drivedesk_domain::{DEFAULT_HORIZON_MONTHS, LessonId, LessonStatus};
use time::macros::time;

#[test]
fn test_book_lesson_assigns_id_and_persists() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let refs = seed_references(&mut persistence);

    let created = book(&mut persistence, &refs, TODAY, time!(09:00));
    assert_ne!(created.lesson_id, LessonId(0));

    let loaded = persistence.get_lesson(created.lesson_id).unwrap();
    assert_eq!(loaded.status, LessonStatus::Scheduled);
    assert_eq!(loaded.slot.start, time!(09:00));
    assert_eq!(loaded.slot.end, time!(10:30));
    assert_eq!(loaded.dropoff_location, "Main office");
}

#[test]
fn test_booking_writes_initial_history_record() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let refs = seed_references(&mut persistence);

    let created = book(&mut persistence, &refs, TODAY, time!(09:00));
    let history = persistence.lesson_history(created.lesson_id).unwrap();

    assert_eq!(history.len(), 1);
    assert_eq!(history[0].from_status, None);
    assert_eq!(history[0].to_status, LessonStatus::Scheduled);
    assert_eq!(history[0].actor.id, "staff-7");
}

#[test]
fn test_double_booking_same_instructor_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let refs = seed_references(&mut persistence);

    let first = book(&mut persistence, &refs, TODAY, time!(09:00));

    // Second student, same instructor and vehicle, overlapping slot.
    let other_student = persistence.add_student("Sam Novak", true).unwrap();
    let mut request = booking_request(&refs, TODAY, time!(10:00));
    request.student_id = other_student;

    let reference = persistence
        .reference_data(other_student, refs.instructor, refs.vehicle, refs.course)
        .unwrap();
    let prepared =
        validate_booking(&request, &reference, TODAY, DEFAULT_HORIZON_MONTHS, NOW).unwrap();

    let result = persistence.book_lesson(&prepared, &test_actor(), NOW);
    match result {
        Err(PersistenceError::SlotConflict {
            resource, blocking, ..
        }) => {
            assert_eq!(resource, "instructor");
            assert_eq!(blocking, vec![first.lesson_id.value()]);
        }
        other => panic!("expected slot conflict, got {other:?}"),
    }
}

#[test]
fn test_vehicle_conflict_detected_with_different_instructor() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let refs = seed_references(&mut persistence);

    book(&mut persistence, &refs, TODAY, time!(09:00));

    // Different student and instructor, same vehicle.
    let other_student = persistence.add_student("Sam Novak", true).unwrap();
    let other_instructor = persistence.add_instructor("Ana Ruiz", true).unwrap();
    let mut request = booking_request(&refs, TODAY, time!(09:30));
    request.student_id = other_student;
    request.instructor_id = other_instructor;

    let reference = persistence
        .reference_data(other_student, other_instructor, refs.vehicle, refs.course)
        .unwrap();
    let prepared =
        validate_booking(&request, &reference, TODAY, DEFAULT_HORIZON_MONTHS, NOW).unwrap();

    let result = persistence.book_lesson(&prepared, &test_actor(), NOW);
    match result {
        Err(PersistenceError::SlotConflict { resource, .. }) => {
            assert_eq!(resource, "vehicle");
        }
        other => panic!("expected slot conflict, got {other:?}"),
    }
}

#[test]
fn test_failed_booking_leaves_no_rows_behind() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let refs = seed_references(&mut persistence);

    let first = book(&mut persistence, &refs, TODAY, time!(09:00));

    let request = booking_request(&refs, TODAY, time!(09:30));
    let reference = persistence
        .reference_data(refs.student, refs.instructor, refs.vehicle, refs.course)
        .unwrap();
    let prepared =
        validate_booking(&request, &reference, TODAY, DEFAULT_HORIZON_MONTHS, NOW).unwrap();
    assert!(
        persistence
            .book_lesson(&prepared, &test_actor(), NOW)
            .is_err()
    );

    // The transaction rolled back: only the first lesson exists.
    let all = persistence
        .lessons_in_range(TODAY, TODAY, &drivedesk::CalendarFilter::default())
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].lesson_id, first.lesson_id);
}

#[test]
fn test_back_to_back_bookings_succeed() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let refs = seed_references(&mut persistence);

    let first = book(&mut persistence, &refs, TODAY, time!(09:00));
    // 10:30 is exactly where the first lesson ends.
    let second = book(&mut persistence, &refs, TODAY, time!(10:30));

    assert_ne!(first.lesson_id, second.lesson_id);
}
