// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use drivedesk_domain::{DomainError, LessonSummary, ResourceKind};

/// Errors that can occur while evaluating scheduling decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The requested time overlaps existing lessons for a resource.
    ///
    /// Carries the full list of blocking lessons so callers can report
    /// which lesson(s) block the request, not just that one does.
    ResourceConflict {
        /// The resource kind that is double-booked.
        resource: ResourceKind,
        /// The id of the conflicting resource.
        resource_id: i64,
        /// The lessons blocking the requested interval.
        blocking: Vec<LessonSummary>,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ResourceConflict {
                resource,
                resource_id,
                blocking,
            } => {
                let ids: Vec<String> = blocking
                    .iter()
                    .map(|l| l.lesson_id.value().to_string())
                    .collect();
                write!(
                    f,
                    "{resource} {resource_id} is not available: blocked by lesson(s) {}",
                    ids.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
