// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{TODAY, slot, summary};
use crate::{MONTH_VIEW_DAY_CAP, hour_buckets, month_view_overflow, project};
use drivedesk_domain::{LessonId, LessonStatus};
use time::macros::{date, time};

#[test]
fn test_projection_groups_by_date_and_keeps_every_lesson() {
    let day_two = date!(2026 - 09 - 15);
    let lessons = vec![
        summary(1, LessonStatus::Scheduled, slot(TODAY, time!(09:00), time!(10:00))),
        summary(2, LessonStatus::Scheduled, slot(day_two, time!(11:00), time!(12:00))),
        summary(3, LessonStatus::Completed, slot(TODAY, time!(14:00), time!(15:00))),
    ];

    let projected = project(lessons);

    assert_eq!(projected.len(), 2);
    assert_eq!(projected[&TODAY].len(), 2);
    assert_eq!(projected[&day_two].len(), 1);

    // Every input lesson appears exactly once across the projection.
    let total: usize = projected.values().map(Vec::len).sum();
    assert_eq!(total, 3);
}

#[test]
fn test_days_within_projection_are_ordered_by_start_time() {
    let lessons = vec![
        summary(3, LessonStatus::Scheduled, slot(TODAY, time!(14:00), time!(15:00))),
        summary(1, LessonStatus::Scheduled, slot(TODAY, time!(08:00), time!(09:00))),
        summary(2, LessonStatus::Scheduled, slot(TODAY, time!(10:00), time!(11:00))),
    ];

    let projected = project(lessons);
    let ids: Vec<LessonId> = projected[&TODAY].iter().map(|l| l.lesson_id).collect();
    assert_eq!(ids, vec![LessonId(1), LessonId(2), LessonId(3)]);
}

#[test]
fn test_same_start_time_breaks_tie_by_lesson_id() {
    let lessons = vec![
        summary(8, LessonStatus::Scheduled, slot(TODAY, time!(09:00), time!(10:00))),
        summary(4, LessonStatus::Scheduled, slot(TODAY, time!(09:00), time!(10:00))),
    ];

    let projected = project(lessons);
    let ids: Vec<LessonId> = projected[&TODAY].iter().map(|l| l.lesson_id).collect();
    assert_eq!(ids, vec![LessonId(4), LessonId(8)]);
}

#[test]
fn test_empty_input_projects_to_empty_map() {
    assert!(project(Vec::new()).is_empty());
}

#[test]
fn test_hour_buckets_cover_operating_band_only() {
    let day = vec![
        summary(1, LessonStatus::Scheduled, slot(TODAY, time!(07:30), time!(08:30))),
        summary(2, LessonStatus::Scheduled, slot(TODAY, time!(08:00), time!(09:00))),
        summary(3, LessonStatus::Scheduled, slot(TODAY, time!(08:45), time!(09:30))),
        summary(4, LessonStatus::Scheduled, slot(TODAY, time!(18:30), time!(19:30))),
        summary(5, LessonStatus::Scheduled, slot(TODAY, time!(19:00), time!(20:00))),
    ];

    let buckets = hour_buckets(&day);

    // 07:30 and 19:00 starts fall outside the 8-18 band; 18:30 is inside.
    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[&8].len(), 2);
    assert_eq!(buckets[&18].len(), 1);
    assert!(!buckets.contains_key(&7));
    assert!(!buckets.contains_key(&19));
}

#[test]
fn test_month_view_overflow_counts_beyond_cap() {
    assert_eq!(month_view_overflow(0), 0);
    assert_eq!(month_view_overflow(MONTH_VIEW_DAY_CAP), 0);
    assert_eq!(month_view_overflow(MONTH_VIEW_DAY_CAP + 1), 1);
    assert_eq!(month_view_overflow(10), 7);
}
