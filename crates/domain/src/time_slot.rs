// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The lesson time slot: a date plus a half-open time interval.
//!
//! ## Invariants
//!
//! - `start < end` on the same date; a slot never crosses midnight.
//! - Overlap is defined on the half-open interval `[start, end)`:
//!   a slot ending at 10:00 does not overlap a slot starting at 10:00.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Time};

/// A date plus a half-open `[start, end)` time-of-day interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// The calendar date of the lesson.
    pub date: Date,
    /// Start time of day (inclusive).
    pub start: Time,
    /// End time of day (exclusive).
    pub end: Time,
}

impl TimeSlot {
    /// Creates a new time slot, enforcing `start < end`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeRange` if `start >= end`.
    pub fn new(date: Date, start: Time, end: Time) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidTimeRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { date, start, end })
    }

    /// Creates a slot from a start time and a duration in minutes.
    ///
    /// The end time is derived as `start + duration`. The duration must be
    /// positive and the resulting end must land on the same date.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDuration` if the duration is not
    /// positive or the slot would cross midnight.
    pub fn from_start_and_duration(
        date: Date,
        start: Time,
        duration_minutes: i64,
    ) -> Result<Self, DomainError> {
        if duration_minutes <= 0 {
            return Err(DomainError::InvalidDuration {
                minutes: duration_minutes,
            });
        }

        let start_seconds = i64::from(start.hour()) * 3600
            + i64::from(start.minute()) * 60
            + i64::from(start.second());
        let end_seconds = start_seconds + duration_minutes * 60;
        if end_seconds >= 24 * 3600 {
            return Err(DomainError::InvalidDuration {
                minutes: duration_minutes,
            });
        }

        let end = start + Duration::minutes(duration_minutes);
        Self::new(date, start, end)
    }

    /// Returns the slot duration in whole minutes. Always positive.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).whole_minutes()
    }

    /// Half-open overlap test against another slot.
    ///
    /// Two slots conflict iff they share a date and
    /// `self.start < other.end && self.end > other.start`. Touching
    /// endpoints do not conflict.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.date == other.date && self.start < other.end && self.end > other.start
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}-{}", self.date, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    fn slot(start: Time, end: Time) -> TimeSlot {
        match TimeSlot::new(date!(2026 - 09 - 14), start, end) {
            Ok(s) => s,
            Err(e) => panic!("slot construction failed: {e}"),
        }
    }

    #[test]
    fn test_start_must_precede_end() {
        assert!(TimeSlot::new(date!(2026 - 09 - 14), time!(10:00), time!(09:00)).is_err());
        assert!(TimeSlot::new(date!(2026 - 09 - 14), time!(10:00), time!(10:00)).is_err());
        assert!(TimeSlot::new(date!(2026 - 09 - 14), time!(09:00), time!(10:00)).is_ok());
    }

    #[test]
    fn test_duration_derivation() {
        let s = match TimeSlot::from_start_and_duration(date!(2026 - 09 - 14), time!(09:00), 90) {
            Ok(s) => s,
            Err(e) => panic!("slot construction failed: {e}"),
        };
        assert_eq!(s.end, time!(10:30));
        assert_eq!(s.duration_minutes(), 90);
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        assert!(TimeSlot::from_start_and_duration(date!(2026 - 09 - 14), time!(09:00), 0).is_err());
        assert!(
            TimeSlot::from_start_and_duration(date!(2026 - 09 - 14), time!(09:00), -30).is_err()
        );
    }

    #[test]
    fn test_slot_crossing_midnight_rejected() {
        let result = TimeSlot::from_start_and_duration(date!(2026 - 09 - 14), time!(23:30), 60);
        assert!(result.is_err());
    }

    #[test]
    fn test_overlapping_slots_conflict() {
        let a = slot(time!(09:00), time!(10:00));
        let b = slot(time!(09:30), time!(10:30));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_contained_slot_conflicts() {
        let outer = slot(time!(09:00), time!(12:00));
        let inner = slot(time!(10:00), time!(11:00));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_touching_endpoints_do_not_conflict() {
        let first = slot(time!(09:00), time!(10:00));
        let second = slot(time!(10:00), time!(11:00));
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_different_dates_never_conflict() {
        let a = slot(time!(09:00), time!(10:00));
        let b = match TimeSlot::new(date!(2026 - 09 - 15), time!(09:00), time!(10:00)) {
            Ok(s) => s,
            Err(e) => panic!("slot construction failed: {e}"),
        };
        assert!(!a.overlaps(&b));
    }
}
