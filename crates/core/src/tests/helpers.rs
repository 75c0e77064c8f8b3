// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use drivedesk_audit::Actor;
use drivedesk_domain::{
    CourseId, InstructorId, Lesson, LessonId, LessonStatus, LessonSummary, LessonType, StudentId,
    TimeSlot, VehicleId,
};
use time::macros::date;
use time::{Date, Time};

pub const TODAY: Date = date!(2026 - 09 - 14);

pub fn staff_actor() -> Actor {
    Actor::new(String::from("staff-7"), String::from("staff"))
}

pub fn slot(date: Date, start: Time, end: Time) -> TimeSlot {
    TimeSlot::new(date, start, end).expect("valid slot")
}

pub fn lesson(id: i64, status: LessonStatus, slot: TimeSlot) -> Lesson {
    Lesson {
        lesson_id: LessonId(id),
        student_id: StudentId(11),
        instructor_id: InstructorId(21),
        vehicle_id: VehicleId(31),
        course_id: CourseId(41),
        slot,
        lesson_type: LessonType::Practical,
        status,
        pickup_location: String::from("Main office"),
        dropoff_location: String::from("Main office"),
        instructor_notes: String::new(),
        performance_rating: None,
        skills_practiced: Vec::new(),
        created_at: String::from("2026-09-01T08:00:00Z"),
    }
}

pub fn summary(id: i64, status: LessonStatus, slot: TimeSlot) -> LessonSummary {
    lesson(id, status, slot).summary()
}
