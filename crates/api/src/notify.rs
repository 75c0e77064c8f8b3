// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification boundary.
//!
//! Instructors are notified about bookings, cancellations, and
//! reassignments. Delivery is fire-and-forget: a sink must never fail
//! the operation that triggered it, so the trait is infallible and
//! implementations swallow their own delivery problems.

use drivedesk_domain::{InstructorId, Lesson, LessonId, LessonStatus};
use tracing::info;

/// Receiver for scheduling notifications.
pub trait NotificationSink {
    /// A lesson was booked for an instructor.
    fn lesson_booked(&self, lesson: &Lesson);

    /// A lesson changed status.
    fn lesson_status_changed(
        &self,
        lesson_id: LessonId,
        instructor_id: InstructorId,
        from: LessonStatus,
        to: LessonStatus,
    );

    /// A lesson moved to a different instructor.
    fn lesson_reassigned(&self, lesson_id: LessonId, new_instructor: InstructorId);
}

/// Sink that logs notifications through `tracing`.
///
/// The default sink for deployments without an external notification
/// channel; also what tests run against.
pub struct TracingNotificationSink;

impl NotificationSink for TracingNotificationSink {
    fn lesson_booked(&self, lesson: &Lesson) {
        info!(
            lesson_id = lesson.lesson_id.value(),
            instructor_id = lesson.instructor_id.value(),
            student_id = lesson.student_id.value(),
            date = %lesson.slot.date,
            "lesson booked"
        );
    }

    fn lesson_status_changed(
        &self,
        lesson_id: LessonId,
        instructor_id: InstructorId,
        from: LessonStatus,
        to: LessonStatus,
    ) {
        info!(
            lesson_id = lesson_id.value(),
            instructor_id = instructor_id.value(),
            from = from.as_str(),
            to = to.as_str(),
            "lesson status changed"
        );
    }

    fn lesson_reassigned(&self, lesson_id: LessonId, new_instructor: InstructorId) {
        info!(
            lesson_id = lesson_id.value(),
            new_instructor = new_instructor.value(),
            "lesson reassigned"
        );
    }
}
