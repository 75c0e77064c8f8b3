// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar projection.
//!
//! Projects a set of lesson summaries into per-date groups for rendering.
//! The projector is role-agnostic: role scoping is applied by the caller
//! through the filter, never here. Presentation caps (the month-view
//! per-day limit) are exposed as counts; the projector never truncates
//! the data it returns.

use drivedesk_domain::{InstructorId, LessonStatus, LessonSummary, StudentId};
use std::collections::BTreeMap;
use time::Date;

/// First hour (inclusive) of the week-view hourly grid.
pub const WEEK_VIEW_FIRST_HOUR: u8 = 8;

/// Last hour (inclusive) of the week-view hourly grid.
pub const WEEK_VIEW_LAST_HOUR: u8 = 18;

/// Number of lessons the month view renders per day before showing a
/// "+N more" indicator.
pub const MONTH_VIEW_DAY_CAP: usize = 3;

/// Read-side filter for calendar queries.
///
/// Role scoping works by pre-setting `instructor_id` or `student_id`
/// before the query runs: an instructor's filter carries their own id, a
/// student's their own, staff and admin leave the fields free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarFilter {
    /// Restrict to one instructor's lessons.
    pub instructor_id: Option<InstructorId>,
    /// Restrict to one student's lessons.
    pub student_id: Option<StudentId>,
    /// Restrict to one status.
    pub status: Option<LessonStatus>,
}

/// Groups lessons by date, each date's lessons ordered by start time
/// ascending (lesson id breaks ties).
///
/// The map contains exactly the dates that have lessons; empty dates in
/// the queried range do not appear.
#[must_use]
pub fn project(lessons: Vec<LessonSummary>) -> BTreeMap<Date, Vec<LessonSummary>> {
    let mut by_date: BTreeMap<Date, Vec<LessonSummary>> = BTreeMap::new();

    for lesson in lessons {
        by_date.entry(lesson.slot.date).or_default().push(lesson);
    }

    for day in by_date.values_mut() {
        day.sort_by_key(|l| (l.slot.start, l.lesson_id));
    }

    by_date
}

/// Buckets one date's lessons by the hour component of their start time,
/// for the week-view hourly grid.
///
/// Only hours within the operating band (8-18 inclusive) appear; lessons
/// starting outside the band are omitted from the grid but remain visible
/// in day and month projections.
#[must_use]
pub fn hour_buckets(day: &[LessonSummary]) -> BTreeMap<u8, Vec<LessonSummary>> {
    let mut buckets: BTreeMap<u8, Vec<LessonSummary>> = BTreeMap::new();

    for lesson in day {
        let hour = lesson.slot.start.hour();
        if (WEEK_VIEW_FIRST_HOUR..=WEEK_VIEW_LAST_HOUR).contains(&hour) {
            buckets.entry(hour).or_default().push(*lesson);
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by_key(|l| (l.slot.start, l.lesson_id));
    }

    buckets
}

/// Number of lessons beyond the month-view per-day cap.
///
/// The caller renders the first `MONTH_VIEW_DAY_CAP` lessons and a
/// "+N more" indicator with this count.
#[must_use]
pub const fn month_view_overflow(day_lesson_count: usize) -> usize {
    day_lesson_count.saturating_sub(MONTH_VIEW_DAY_CAP)
}
