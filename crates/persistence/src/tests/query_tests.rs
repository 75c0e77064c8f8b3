// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, PersistenceError};
use crate::tests::{TODAY, book, seed_references};
use drivedesk::CalendarFilter;
use drivedesk_domain::LessonId;
use time::macros::{date, time};

#[test]
fn test_lessons_in_range_is_inclusive_and_ordered() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let refs = seed_references(&mut persistence);

    let day_two = date!(2026 - 09 - 15);
    let day_three = date!(2026 - 09 - 16);
    book(&mut persistence, &refs, day_two, time!(11:00));
    book(&mut persistence, &refs, TODAY, time!(09:00));
    book(&mut persistence, &refs, day_three, time!(08:00));

    let in_range = persistence
        .lessons_in_range(TODAY, day_two, &CalendarFilter::default())
        .unwrap();

    assert_eq!(in_range.len(), 2);
    assert_eq!(in_range[0].slot.date, TODAY);
    assert_eq!(in_range[1].slot.date, day_two);
}

#[test]
fn test_range_filter_restricts_by_instructor() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let refs = seed_references(&mut persistence);
    book(&mut persistence, &refs, TODAY, time!(09:00));

    let other_instructor = persistence.add_instructor("Ana Ruiz", true).unwrap();
    let filter = CalendarFilter {
        instructor_id: Some(other_instructor),
        ..CalendarFilter::default()
    };

    let scoped = persistence
        .lessons_in_range(TODAY, TODAY, &filter)
        .unwrap();
    assert!(scoped.is_empty());

    let own = persistence
        .lessons_in_range(
            TODAY,
            TODAY,
            &CalendarFilter {
                instructor_id: Some(refs.instructor),
                ..CalendarFilter::default()
            },
        )
        .unwrap();
    assert_eq!(own.len(), 1);
}

#[test]
fn test_reference_data_reports_missing_and_inactive_entities() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let refs = seed_references(&mut persistence);
    let inactive_vehicle = persistence.add_vehicle("ZZ-999-ZZ", false).unwrap();

    let reference = persistence
        .reference_data(
            refs.student,
            drivedesk_domain::InstructorId(999),
            inactive_vehicle,
            refs.course,
        )
        .unwrap();

    assert_eq!(reference.student_active, Some(true));
    assert_eq!(reference.instructor_active, None);
    assert_eq!(reference.vehicle_active, Some(false));
    let course = reference.course.unwrap();
    assert!(course.is_active);
    assert_eq!(course.duration_minutes, 90);
}

#[test]
fn test_get_lessons_skips_missing_ids() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let refs = seed_references(&mut persistence);
    let lesson = book(&mut persistence, &refs, TODAY, time!(09:00));

    let loaded = persistence
        .get_lessons(&[lesson.lesson_id, LessonId(999)])
        .unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].lesson_id, lesson.lesson_id);
}

#[test]
fn test_delete_removes_lesson_and_history() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let refs = seed_references(&mut persistence);
    let lesson = book(&mut persistence, &refs, TODAY, time!(09:00));

    persistence.delete_lesson(lesson.lesson_id).unwrap();

    assert!(matches!(
        persistence.get_lesson(lesson.lesson_id),
        Err(PersistenceError::LessonNotFound(_))
    ));
    assert!(persistence.lesson_history(lesson.lesson_id).unwrap().is_empty());
}

#[test]
fn test_delete_missing_lesson_is_an_error() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    seed_references(&mut persistence);

    assert!(matches!(
        persistence.delete_lesson(LessonId(42)),
        Err(PersistenceError::LessonNotFound(42))
    ));
}
