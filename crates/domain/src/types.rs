// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::lesson_status::LessonStatus;
use crate::time_slot::TimeSlot;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Canonical numeric identifier for a lesson.
///
/// A value of 0 indicates the lesson has not been persisted yet; the
/// database assigns the real id on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LessonId(pub i64);

impl LessonId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// Canonical numeric identifier for a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub i64);

impl StudentId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// Canonical numeric identifier for an instructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstructorId(pub i64);

impl InstructorId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// Canonical numeric identifier for a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub i64);

impl VehicleId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// Canonical numeric identifier for a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseId(pub i64);

impl CourseId {
    /// Returns the raw id value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

/// The two resource kinds subject to double-booking prevention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// An instructor.
    Instructor,
    /// A vehicle.
    Vehicle,
}

impl ResourceKind {
    /// Returns the string representation of the resource kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Instructor => "instructor",
            Self::Vehicle => "vehicle",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lesson type classification.
///
/// The canonical set is `theory`, `practical`, `highway`, `parking`, and
/// `test_preparation`. The legacy `highway_driving` spelling is accepted
/// on parse as an alias of `highway` and is never emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonType {
    /// Classroom theory lesson.
    Theory,
    /// Standard in-vehicle practice.
    Practical,
    /// Highway driving practice.
    #[serde(alias = "highway_driving")]
    Highway,
    /// Parking maneuvers.
    Parking,
    /// Preparation for the driving test.
    TestPreparation,
}

impl LessonType {
    /// Returns the canonical string representation of the lesson type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Theory => "theory",
            Self::Practical => "practical",
            Self::Highway => "highway",
            Self::Parking => "parking",
            Self::TestPreparation => "test_preparation",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "theory" => Ok(Self::Theory),
            "practical" => Ok(Self::Practical),
            // Legacy alias retained for records written by older forms.
            "highway" | "highway_driving" => Ok(Self::Highway),
            "parking" => Ok(Self::Parking),
            "test_preparation" => Ok(Self::TestPreparation),
            _ => Err(DomainError::InvalidLessonType(s.to_string())),
        }
    }
}

impl FromStr for LessonType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated student performance rating, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRating(u8);

impl PerformanceRating {
    /// Creates a new rating, enforcing the 1-5 range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRating` if the value is out of range.
    pub const fn new(value: u8) -> Result<Self, DomainError> {
        if matches!(value, 1..=5) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidRating { value })
        }
    }

    /// Returns the raw rating value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

/// Outcome data attached to a lesson when it completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// The student's performance rating for this lesson.
    pub rating: PerformanceRating,
    /// Skills practiced during the lesson.
    pub skills_practiced: Vec<String>,
    /// Free-form instructor note for this lesson.
    pub note: Option<String>,
}

/// The central scheduling entity: one lesson bound to a student, an
/// instructor, a vehicle, and a course, occupying a time slot on a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    /// Canonical lesson id (0 until persisted).
    pub lesson_id: LessonId,
    /// The student taking the lesson.
    pub student_id: StudentId,
    /// The instructor giving the lesson.
    pub instructor_id: InstructorId,
    /// The vehicle used for the lesson.
    pub vehicle_id: VehicleId,
    /// The course this lesson belongs to (supplies the duration).
    pub course_id: CourseId,
    /// The date and half-open time interval of the lesson.
    pub slot: TimeSlot,
    /// Lesson type classification.
    pub lesson_type: LessonType,
    /// Current lifecycle status.
    pub status: LessonStatus,
    /// Where the student is picked up. Never empty.
    pub pickup_location: String,
    /// Where the student is dropped off. Defaults to the pickup location
    /// at booking time and is never empty once resolved.
    pub dropoff_location: String,
    /// Instructor notes. Also carries the human-readable audit trail of
    /// status changes (one line per transition).
    pub instructor_notes: String,
    /// Performance rating, populated only on completion.
    pub performance_rating: Option<PerformanceRating>,
    /// Skills practiced, populated only on completion.
    pub skills_practiced: Vec<String>,
    /// Creation timestamp (RFC 3339, UTC).
    pub created_at: String,
}

impl Lesson {
    /// Produces the summary view of this lesson used by conflict reports
    /// and calendar projections.
    #[must_use]
    pub fn summary(&self) -> LessonSummary {
        LessonSummary {
            lesson_id: self.lesson_id,
            student_id: self.student_id,
            instructor_id: self.instructor_id,
            vehicle_id: self.vehicle_id,
            slot: self.slot,
            lesson_type: self.lesson_type,
            status: self.status,
        }
    }
}

/// A compact view of a lesson: enough to report conflicts and render
/// calendar cells without loading the full record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonSummary {
    /// Canonical lesson id.
    pub lesson_id: LessonId,
    /// The student taking the lesson.
    pub student_id: StudentId,
    /// The instructor giving the lesson.
    pub instructor_id: InstructorId,
    /// The vehicle used for the lesson.
    pub vehicle_id: VehicleId,
    /// The date and time interval of the lesson.
    pub slot: TimeSlot,
    /// Lesson type classification.
    pub lesson_type: LessonType,
    /// Current lifecycle status.
    pub status: LessonStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_type_round_trip() {
        let types = vec![
            LessonType::Theory,
            LessonType::Practical,
            LessonType::Highway,
            LessonType::Parking,
            LessonType::TestPreparation,
        ];

        for lesson_type in types {
            let s = lesson_type.as_str();
            match LessonType::parse_str(s) {
                Ok(parsed) => assert_eq!(lesson_type, parsed),
                Err(e) => panic!("Failed to parse lesson type: {s}: {e}"),
            }
        }
    }

    #[test]
    fn test_highway_driving_alias_maps_to_highway() {
        let parsed = LessonType::parse_str("highway_driving");
        assert_eq!(parsed, Ok(LessonType::Highway));
        // The alias is never emitted back out.
        assert_eq!(LessonType::Highway.as_str(), "highway");
    }

    #[test]
    fn test_invalid_lesson_type() {
        assert!(LessonType::parse_str("night_driving").is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(PerformanceRating::new(0).is_err());
        assert!(PerformanceRating::new(1).is_ok());
        assert!(PerformanceRating::new(5).is_ok());
        assert!(PerformanceRating::new(6).is_err());
    }

    #[test]
    fn test_resource_kind_strings() {
        assert_eq!(ResourceKind::Instructor.as_str(), "instructor");
        assert_eq!(ResourceKind::Vehicle.as_str(), "vehicle");
    }
}
