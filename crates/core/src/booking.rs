// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The booking validation pipeline.
//!
//! Validation is deliberately separate from conflict-checking and
//! persistence: the same conflict logic is reused unmodified by lesson
//! edits and reassignment. This stage collects every validation defect
//! rather than stopping at the first, so the caller can report all
//! reasons a request did not go through at once.

use drivedesk_domain::{
    CourseId, DomainError, InstructorId, Lesson, LessonId, LessonStatus, LessonType, StudentId,
    TimeSlot, VehicleId, resolve_dropoff_location, validate_booking_date, validate_pickup_location,
};
use time::{Date, Time};

/// A request to book a new lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// The student taking the lesson.
    pub student_id: StudentId,
    /// The instructor giving the lesson.
    pub instructor_id: InstructorId,
    /// The vehicle used for the lesson.
    pub vehicle_id: VehicleId,
    /// The course that supplies the lesson duration.
    pub course_id: CourseId,
    /// The requested lesson date.
    pub date: Date,
    /// The requested start time of day.
    pub start_time: Time,
    /// Lesson type classification.
    pub lesson_type: LessonType,
    /// Where the student is picked up.
    pub pickup_location: String,
    /// Optional dropoff location; defaults to the pickup location.
    pub dropoff_location: Option<String>,
    /// Optional initial instructor note.
    pub notes: Option<String>,
}

/// Course reference data needed to derive the lesson slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseData {
    /// Whether the course is currently offered.
    pub is_active: bool,
    /// Lesson duration supplied by the course, in minutes.
    pub duration_minutes: i64,
}

/// Resolved reference data for a booking request.
///
/// The caller looks each referenced entity up in the repository; `None`
/// means the entity does not exist. Missing and inactive references are
/// reported as validation defects, not infrastructure errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReferenceData {
    /// Whether the student exists and is active.
    pub student_active: Option<bool>,
    /// Whether the instructor exists and is active.
    pub instructor_active: Option<bool>,
    /// Whether the vehicle exists and is active.
    pub vehicle_active: Option<bool>,
    /// The course, if it exists.
    pub course: Option<CourseData>,
}

/// A fully validated lesson, ready for the transactional conflict check
/// and insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLesson {
    /// The lesson to persist. Carries id 0 until the database assigns one.
    pub lesson: Lesson,
}

fn check_reference(
    errors: &mut Vec<DomainError>,
    resource: &'static str,
    id: i64,
    active: Option<bool>,
) {
    match active {
        None => errors.push(DomainError::ResourceNotFound { resource, id }),
        Some(false) => errors.push(DomainError::ResourceInactive { resource, id }),
        Some(true) => {}
    }
}

/// Validates a booking request against reference data and the booking
/// window, producing a `PreparedLesson` on success.
///
/// All defects are collected; the request fails with the complete list.
///
/// # Errors
///
/// Returns every `DomainError` found: missing or inactive references,
/// out-of-window dates, blank pickup location, and non-positive or
/// date-crossing durations.
pub fn validate_booking(
    request: &BookingRequest,
    refs: &ReferenceData,
    today: Date,
    horizon_months: u32,
    created_at: &str,
) -> Result<PreparedLesson, Vec<DomainError>> {
    let mut errors: Vec<DomainError> = Vec::new();

    check_reference(
        &mut errors,
        "student",
        request.student_id.value(),
        refs.student_active,
    );
    check_reference(
        &mut errors,
        "instructor",
        request.instructor_id.value(),
        refs.instructor_active,
    );
    check_reference(
        &mut errors,
        "vehicle",
        request.vehicle_id.value(),
        refs.vehicle_active,
    );

    // The course supplies the duration, from which the end time is derived.
    let slot: Option<TimeSlot> = match refs.course {
        None => {
            errors.push(DomainError::ResourceNotFound {
                resource: "course",
                id: request.course_id.value(),
            });
            None
        }
        Some(course) => {
            if !course.is_active {
                errors.push(DomainError::ResourceInactive {
                    resource: "course",
                    id: request.course_id.value(),
                });
            }
            match TimeSlot::from_start_and_duration(
                request.date,
                request.start_time,
                course.duration_minutes,
            ) {
                Ok(slot) => Some(slot),
                Err(e) => {
                    errors.push(e);
                    None
                }
            }
        }
    };

    if let Err(e) = validate_booking_date(request.date, today, horizon_months) {
        errors.push(e);
    }

    if let Err(e) = validate_pickup_location(&request.pickup_location) {
        errors.push(e);
    }

    let Some(slot) = slot else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    let pickup = request.pickup_location.trim().to_string();
    let dropoff = resolve_dropoff_location(&pickup, request.dropoff_location.as_deref());

    Ok(PreparedLesson {
        lesson: Lesson {
            lesson_id: LessonId(0),
            student_id: request.student_id,
            instructor_id: request.instructor_id,
            vehicle_id: request.vehicle_id,
            course_id: request.course_id,
            slot,
            lesson_type: request.lesson_type,
            status: LessonStatus::Scheduled,
            pickup_location: pickup,
            dropoff_location: dropoff,
            instructor_notes: request.notes.clone().unwrap_or_default(),
            performance_rating: None,
            skills_practiced: Vec::new(),
            created_at: created_at.to_string(),
        },
    })
}
