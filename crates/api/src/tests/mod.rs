// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod reassign_tests;
mod transition_tests;

use drivedesk_persistence::Persistence;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use crate::auth::{AuthenticatedActor, Role, authenticate_stub};
use crate::handlers::{SchedulingPolicy, book_lesson};
use crate::notify::TracingNotificationSink;
use crate::request_response::{BookLessonRequest, BookLessonResponse};

const WIRE_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Reference rows seeded into every test database, as raw wire ids.
pub struct Seed {
    pub student: i64,
    pub instructor: i64,
    pub vehicle: i64,
    pub course: i64,
}

/// Fresh in-memory database with one active row per reference table.
/// The course runs 90 minutes.
pub fn setup() -> (Persistence, Seed) {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let student = persistence.add_student("Jane Miller", true).unwrap();
    let instructor = persistence.add_instructor("Tom Baker", true).unwrap();
    let vehicle = persistence.add_vehicle("AB-123-CD", true).unwrap();
    let course = persistence.add_course("Standard B", 90, true).unwrap();
    let seed = Seed {
        student: student.value(),
        instructor: instructor.value(),
        vehicle: vehicle.value(),
        course: course.value(),
    };
    (persistence, seed)
}

pub fn staff() -> AuthenticatedActor {
    authenticate_stub(String::from("staff-7"), Role::Staff, None).unwrap()
}

pub fn admin() -> AuthenticatedActor {
    authenticate_stub(String::from("admin-1"), Role::Admin, None).unwrap()
}

pub fn instructor_actor(instructor_id: i64) -> AuthenticatedActor {
    authenticate_stub(
        format!("instructor-{instructor_id}"),
        Role::Instructor,
        Some(instructor_id),
    )
    .unwrap()
}

pub fn student_actor(student_id: i64) -> AuthenticatedActor {
    authenticate_stub(
        format!("student-{student_id}"),
        Role::Student,
        Some(student_id),
    )
    .unwrap()
}

pub fn policy() -> SchedulingPolicy {
    SchedulingPolicy::default()
}

/// Wire-format date `days` days from the real today. Bookings validate
/// against the actual clock, so fixtures are expressed relative to it.
pub fn wire_date(days: i64) -> String {
    (OffsetDateTime::now_utc().date() + Duration::days(days))
        .format(&WIRE_DATE)
        .unwrap()
}

pub fn booking_request(seed: &Seed, date: &str, start: &str) -> BookLessonRequest {
    BookLessonRequest {
        student_id: seed.student,
        instructor_id: seed.instructor,
        vehicle_id: seed.vehicle,
        course_id: seed.course,
        date: date.to_string(),
        start_time: start.to_string(),
        lesson_type: String::from("practical"),
        pickup_location: String::from("Main Office"),
        dropoff_location: None,
        notes: None,
    }
}

/// Books a lesson as staff and panics on any failure.
pub fn book(persistence: &mut Persistence, seed: &Seed, date: &str, start: &str) -> BookLessonResponse {
    let request = booking_request(seed, date, start);
    book_lesson(
        persistence,
        &staff(),
        &policy(),
        &TracingNotificationSink,
        &request,
    )
    .unwrap()
}
