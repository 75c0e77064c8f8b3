// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lesson status tracking and transition logic.
//!
//! This module defines the lesson status states and the valid transitions
//! between them. Transitions are actor-initiated only; the system never
//! advances a lesson based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lesson status states tracking a lesson through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
    /// The lesson is booked and has not yet started.
    Scheduled,
    /// The lesson is currently being given.
    InProgress,
    /// The lesson took place; outcome fields are populated.
    Completed,
    /// The lesson was called off. The record is preserved.
    Cancelled,
    /// The lesson was moved to a new time. The replacement lesson is
    /// booked separately through the booking pipeline.
    Rescheduled,
    /// The student did not appear for the lesson.
    NoShow,
}

impl LessonStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rescheduled => "rescheduled",
            Self::NoShow => "no_show",
        }
    }

    /// Parses a status from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "rescheduled" => Ok(Self::Rescheduled),
            "no_show" => Ok(Self::NoShow),
            _ => Err(DomainError::InvalidLessonStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (no further transition is permitted).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns true if a lesson in this status occupies its instructor and
    /// vehicle for availability purposes.
    ///
    /// Cancelled, rescheduled, and no-show lessons never conflict.
    #[must_use]
    pub const fn blocks_resource(&self) -> bool {
        matches!(self, Self::Scheduled | Self::InProgress | Self::Completed)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        if *self == new_status {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "lesson is already in this status".to_string(),
            });
        }

        let valid = match self {
            Self::Scheduled => matches!(
                new_status,
                Self::InProgress
                    | Self::Completed
                    | Self::Cancelled
                    | Self::Rescheduled
                    | Self::NoShow
            ),
            Self::InProgress => {
                matches!(new_status, Self::Completed | Self::Cancelled | Self::Rescheduled)
            }
            // Rescheduled and no-show lessons can still be explicitly cancelled.
            Self::Rescheduled | Self::NoShow => matches!(new_status, Self::Cancelled),
            Self::Completed | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by status lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for LessonStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
