// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability checking for instructors and vehicles.
//!
//! Candidates are the lessons already on file for one resource on one
//! date; the caller fetches them from the repository. A candidate blocks
//! the proposed interval iff its status occupies the resource and its
//! half-open `[start, end)` interval overlaps the proposal.

use crate::error::CoreError;
use drivedesk_domain::{LessonId, LessonSummary, ResourceKind, TimeSlot};

/// Returns the lessons among `candidates` that conflict with `slot`.
///
/// Cancelled, rescheduled, and no-show candidates never conflict. When
/// `exclude` is given, that lesson is skipped; this is used when a lesson
/// being edited is checked against itself. The result is ordered by start
/// time so conflict reports read chronologically.
#[must_use]
pub fn find_conflicts(
    candidates: &[LessonSummary],
    slot: &TimeSlot,
    exclude: Option<LessonId>,
) -> Vec<LessonSummary> {
    let mut blocking: Vec<LessonSummary> = candidates
        .iter()
        .filter(|candidate| exclude != Some(candidate.lesson_id))
        .filter(|candidate| candidate.status.blocks_resource())
        .filter(|candidate| candidate.slot.overlaps(slot))
        .copied()
        .collect();

    blocking.sort_by_key(|l| (l.slot.start, l.lesson_id));
    blocking
}

/// Checks that a resource is free for `slot`.
///
/// # Errors
///
/// Returns `CoreError::ResourceConflict` carrying every blocking lesson
/// when the interval is not free.
pub fn ensure_available(
    resource: ResourceKind,
    resource_id: i64,
    candidates: &[LessonSummary],
    slot: &TimeSlot,
    exclude: Option<LessonId>,
) -> Result<(), CoreError> {
    let blocking = find_conflicts(candidates, slot, exclude);
    if blocking.is_empty() {
        Ok(())
    } else {
        Err(CoreError::ResourceConflict {
            resource,
            resource_id,
            blocking,
        })
    }
}
