// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API-level errors and the translation functions that keep domain,
//! core, and persistence errors from leaking past this boundary.

use crate::auth::AuthError;
use drivedesk::CoreError;
use drivedesk_domain::DomainError;
use drivedesk_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The request failed validation. Every defect is listed.
    ValidationFailed {
        /// All validation failure messages.
        errors: Vec<String>,
    },
    /// The requested slot is taken for a resource.
    Conflict {
        /// The contended resource kind (`instructor` or `vehicle`).
        resource: String,
        /// The ids of the lessons blocking the slot.
        blocking: Vec<i64>,
    },
    /// The operation is not valid for the lesson's current state.
    PreconditionFailed {
        /// A human-readable description of the failed precondition.
        message: String,
    },
    /// The requested resource does not exist.
    ResourceNotFound {
        /// What was looked up.
        what: String,
    },
    /// An infrastructure failure.
    Internal {
        /// A human-readable description of the failure.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::ValidationFailed { errors } => {
                write!(f, "Validation failed: ")?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            }
            Self::Conflict { resource, blocking } => {
                write!(f, "{resource} is not available: blocked by lesson(s) ")?;
                for (i, id) in blocking.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{id}")?;
                }
                Ok(())
            }
            Self::PreconditionFailed { message } => {
                write!(f, "Precondition failed: {message}")
            }
            Self::ResourceNotFound { what } => write!(f, "Not found: {what}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a list of domain validation defects into one
/// `ValidationFailed` carrying every message.
pub fn translate_validation_errors(errors: Vec<DomainError>) -> ApiError {
    ApiError::ValidationFailed {
        errors: errors.iter().map(ToString::to_string).collect(),
    }
}

/// Translates a single domain error into an API error.
///
/// Lifecycle violations become precondition failures; everything else
/// is a validation failure.
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidStatusTransition { .. }
        | DomainError::ReassignmentNotAllowed { .. } => ApiError::PreconditionFailed {
            message: err.to_string(),
        },
        _ => ApiError::ValidationFailed {
            errors: vec![err.to_string()],
        },
    }
}

/// Translates a core error into an API error.
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ResourceConflict {
            resource,
            resource_id: _,
            blocking,
        } => ApiError::Conflict {
            resource: resource.as_str().to_string(),
            blocking: blocking.iter().map(|l| l.lesson_id.value()).collect(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// The transactional slot conflict maps to `Conflict`, missing rows to
/// `ResourceNotFound`, and everything else to `Internal`.
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::SlotConflict {
            resource, blocking, ..
        } => ApiError::Conflict { resource, blocking },
        PersistenceError::LessonNotFound(id) => ApiError::ResourceNotFound {
            what: format!("lesson {id}"),
        },
        PersistenceError::NotFound(what) => ApiError::ResourceNotFound { what },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
