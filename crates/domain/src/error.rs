// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Lesson status string is not a valid status.
    InvalidLessonStatus(String),
    /// Lesson type string is not a valid type.
    InvalidLessonType(String),
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// A lesson time range has `start >= end`.
    InvalidTimeRange {
        /// The start time (ISO 8601 time of day).
        start: String,
        /// The end time (ISO 8601 time of day).
        end: String,
    },
    /// A lesson duration is not positive or does not fit the lesson date.
    InvalidDuration {
        /// The duration in minutes.
        minutes: i64,
    },
    /// A required field is missing or blank.
    MissingField {
        /// The field name.
        field: &'static str,
    },
    /// Pickup location is empty.
    EmptyPickupLocation,
    /// Performance rating is outside the 1-5 range.
    InvalidRating {
        /// The rejected value.
        value: u8,
    },
    /// Booking date is before today.
    DateInPast {
        /// The requested date.
        date: time::Date,
        /// Today in the operating timezone.
        today: time::Date,
    },
    /// Booking date is beyond the booking horizon.
    DateBeyondHorizon {
        /// The requested date.
        date: time::Date,
        /// The latest bookable date (inclusive).
        latest: time::Date,
    },
    /// The operating timezone name is not recognized.
    InvalidTimezone(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to parse a time of day from a string.
    TimeParseError {
        /// The invalid time string.
        time_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Instructor or vehicle reassignment attempted on a lesson that is
    /// not in the scheduled state.
    ReassignmentNotAllowed {
        /// The lesson's current status.
        status: String,
    },
    /// A referenced entity does not exist.
    ResourceNotFound {
        /// The entity kind ("student", "instructor", "vehicle", "course").
        resource: &'static str,
        /// The referenced id.
        id: i64,
    },
    /// A referenced entity exists but is not active.
    ResourceInactive {
        /// The entity kind.
        resource: &'static str,
        /// The referenced id.
        id: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLessonStatus(status) => {
                write!(f, "Invalid lesson status: '{status}'")
            }
            Self::InvalidLessonType(lesson_type) => {
                write!(f, "Invalid lesson type: '{lesson_type}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition lesson from '{from}' to '{to}': {reason}")
            }
            Self::InvalidTimeRange { start, end } => {
                write!(f, "Lesson start {start} must be before end {end}")
            }
            Self::InvalidDuration { minutes } => {
                write!(
                    f,
                    "Invalid lesson duration: {minutes} minutes. Must be positive and end on the same date"
                )
            }
            Self::MissingField { field } => write!(f, "Missing required field: {field}"),
            Self::EmptyPickupLocation => write!(f, "Pickup location cannot be empty"),
            Self::InvalidRating { value } => {
                write!(f, "Invalid performance rating: {value}. Must be between 1 and 5")
            }
            Self::DateInPast { date, today } => {
                write!(f, "Lesson date {date} is in the past (today is {today})")
            }
            Self::DateBeyondHorizon { date, latest } => {
                write!(
                    f,
                    "Lesson date {date} is beyond the booking horizon (latest bookable date is {latest})"
                )
            }
            Self::InvalidTimezone(tz) => write!(f, "Invalid operating timezone: '{tz}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::TimeParseError { time_string, error } => {
                write!(f, "Failed to parse time '{time_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::ReassignmentNotAllowed { status } => {
                write!(
                    f,
                    "Reassignment is only allowed while a lesson is scheduled (current status: '{status}')"
                )
            }
            Self::ResourceNotFound { resource, id } => {
                write!(f, "{resource} {id} not found")
            }
            Self::ResourceInactive { resource, id } => {
                write!(f, "{resource} {id} is not active")
            }
        }
    }
}

impl std::error::Error for DomainError {}
