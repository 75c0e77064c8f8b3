// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod booking_tests;
mod query_tests;

use crate::Persistence;
use drivedesk::{BookingRequest, validate_booking};
use drivedesk_audit::Actor;
use drivedesk_domain::{
    CourseId, DEFAULT_HORIZON_MONTHS, InstructorId, Lesson, LessonType, StudentId, VehicleId,
};
use time::macros::date;
use time::{Date, Time};

pub const TODAY: Date = date!(2026 - 09 - 14);
pub const NOW: &str = "2026-09-14T08:00:00Z";

pub fn test_actor() -> Actor {
    Actor::new(String::from("staff-7"), String::from("staff"))
}

/// Ids of a seeded set of reference entities.
pub struct Refs {
    pub student: StudentId,
    pub instructor: InstructorId,
    pub vehicle: VehicleId,
    pub course: CourseId,
}

/// Seeds one active student, instructor, vehicle, and a 90-minute course.
pub fn seed_references(persistence: &mut Persistence) -> Refs {
    let student = persistence.add_student("Jane Miller", true).unwrap();
    let instructor = persistence.add_instructor("Tom Baker", true).unwrap();
    let vehicle = persistence.add_vehicle("AB-123-CD", true).unwrap();
    let course = persistence.add_course("Standard B", 90, true).unwrap();
    Refs {
        student,
        instructor,
        vehicle,
        course,
    }
}

pub fn booking_request(refs: &Refs, date: Date, start: Time) -> BookingRequest {
    BookingRequest {
        student_id: refs.student,
        instructor_id: refs.instructor,
        vehicle_id: refs.vehicle,
        course_id: refs.course,
        date,
        start_time: start,
        lesson_type: LessonType::Practical,
        pickup_location: String::from("Main office"),
        dropoff_location: None,
        notes: None,
    }
}

/// Validates and books a lesson for the seeded references.
pub fn book(persistence: &mut Persistence, refs: &Refs, date: Date, start: Time) -> Lesson {
    let request = booking_request(refs, date, start);
    let reference = persistence
        .reference_data(refs.student, refs.instructor, refs.vehicle, refs.course)
        .unwrap();
    let prepared = validate_booking(&request, &reference, TODAY, DEFAULT_HORIZON_MONTHS, NOW)
        .expect("booking should validate");
    persistence
        .book_lesson(&prepared, &test_actor(), NOW)
        .expect("booking should commit")
}
