// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk action evaluation.
//!
//! Bulk actions apply one operation to a set of lesson ids. Items are
//! validated and applied independently: one item's failure never blocks
//! or rolls back others, and the batch result attributes every failure
//! to a lesson id and a reason.

use drivedesk_domain::{DomainError, InstructorId, Lesson, LessonId, LessonStatus};

/// Upper bound on the number of ids a single bulk request may carry.
///
/// Oversize batches are rejected up front rather than partially applied.
pub const MAX_BULK_ITEMS: usize = 500;

/// One bulk action, applied per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkAction {
    /// Mark scheduled lessons completed.
    Complete,
    /// Cancel lessons that are not already terminal.
    Cancel {
        /// The cancellation reason, recorded per lesson.
        reason: String,
    },
    /// Move lessons to an explicit status.
    ChangeStatus {
        /// The target status.
        new_status: LessonStatus,
    },
    /// Move scheduled lessons to a different instructor.
    AssignInstructor {
        /// The new instructor.
        instructor_id: InstructorId,
    },
    /// Permanently remove lessons. Admin only; irreversible, distinct
    /// from cancellation.
    Delete,
    /// Produce a tabular row per lesson. Read-only.
    Export,
}

impl BulkAction {
    /// Returns the action name used in logs and failure reasons.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Cancel { .. } => "cancel",
            Self::ChangeStatus { .. } => "change_status",
            Self::AssignInstructor { .. } => "assign_instructor",
            Self::Delete => "delete",
            Self::Export => "export",
        }
    }

    /// Returns true if this action mutates lesson state.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Export)
    }

    /// Validates this action's per-item precondition against one lesson.
    ///
    /// Availability for `AssignInstructor` is checked separately inside
    /// the mutation transaction; this only covers status preconditions.
    ///
    /// # Errors
    ///
    /// Returns the `DomainError` describing why the lesson is not
    /// eligible for this action.
    pub fn validate_precondition(&self, lesson: &Lesson) -> Result<(), DomainError> {
        match self {
            Self::Complete => {
                if lesson.status == LessonStatus::Scheduled {
                    Ok(())
                } else {
                    Err(DomainError::InvalidStatusTransition {
                        from: lesson.status.as_str().to_string(),
                        to: LessonStatus::Completed.as_str().to_string(),
                        reason: "bulk complete requires a scheduled lesson".to_string(),
                    })
                }
            }
            Self::Cancel { .. } => lesson.status.validate_transition(LessonStatus::Cancelled),
            Self::ChangeStatus { new_status } => lesson.status.validate_transition(*new_status),
            Self::AssignInstructor { .. } => {
                if lesson.status == LessonStatus::Scheduled {
                    Ok(())
                } else {
                    Err(DomainError::ReassignmentNotAllowed {
                        status: lesson.status.as_str().to_string(),
                    })
                }
            }
            // Delete authorization is checked once for the batch by the
            // caller; export has no precondition.
            Self::Delete | Self::Export => Ok(()),
        }
    }
}

/// One failed bulk item: the lesson and the human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    /// The lesson that failed.
    pub lesson_id: LessonId,
    /// Why the item failed.
    pub reason: String,
}

/// The per-batch result: how many items succeeded and every failure.
///
/// The full failure list is always retained; capping how many reasons are
/// displayed is a presentation concern for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkOutcome {
    /// Number of items applied successfully.
    pub success_count: usize,
    /// Every failed item with its reason.
    pub failures: Vec<BulkFailure>,
}

impl BulkOutcome {
    /// Creates an empty outcome.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            success_count: 0,
            failures: Vec::new(),
        }
    }

    /// Records one successful item.
    pub const fn record_success(&mut self) {
        self.success_count += 1;
    }

    /// Records one failed item with its reason.
    pub fn record_failure(&mut self, lesson_id: LessonId, reason: String) {
        self.failures.push(BulkFailure { lesson_id, reason });
    }

    /// Total number of items accounted for.
    #[must_use]
    pub fn total(&self) -> usize {
        self.success_count + self.failures.len()
    }
}
