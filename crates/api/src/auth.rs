// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roles and authorization rules.
//!
//! Authentication itself lives outside this system; handlers receive an
//! `AuthenticatedActor` and this module decides what the role permits.
//! Restricted roles (instructor, student) carry the id of their own
//! database row so calendar queries can be scoped to it.

use drivedesk::{BulkAction, CalendarFilter};
use drivedesk_audit::Actor;
use drivedesk_domain::{InstructorId, Lesson, StudentId};

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// School administrators: full authority, including hard deletes.
    Admin,
    /// Front-desk staff: book, transition, reassign, and run bulk
    /// actions, but never hard-delete.
    Staff,
    /// Instructors: manage the lifecycle of their own lessons and see
    /// their own calendar.
    Instructor,
    /// Students: read-only view of their own lessons.
    Student,
}

impl Role {
    /// Returns the role name used in audit records and error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
            Self::Instructor => "instructor",
            Self::Student => "student",
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
    /// For instructor and student roles, the id of the actor's own
    /// instructor or student row. `None` for admin and staff.
    pub subject_id: Option<i64>,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: Role, subject_id: Option<i64>) -> Self {
        Self {
            id,
            role,
            subject_id,
        }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }

    /// Scopes a calendar filter to what this actor may see.
    ///
    /// Admin and staff pass the requested filter through; instructors
    /// and students get their own id forced into the filter regardless
    /// of what was requested.
    ///
    /// # Errors
    ///
    /// Returns an error if a restricted role has no subject id to
    /// scope by.
    pub fn scoped_filter(&self, requested: CalendarFilter) -> Result<CalendarFilter, AuthError> {
        match self.role {
            Role::Admin | Role::Staff => Ok(requested),
            Role::Instructor => {
                let own = self.require_subject_id("calendar")?;
                Ok(CalendarFilter {
                    instructor_id: Some(InstructorId(own)),
                    ..requested
                })
            }
            Role::Student => {
                let own = self.require_subject_id("calendar")?;
                Ok(CalendarFilter {
                    student_id: Some(StudentId(own)),
                    ..requested
                })
            }
        }
    }

    fn require_subject_id(&self, action: &str) -> Result<i64, AuthError> {
        self.subject_id.ok_or_else(|| AuthError::AuthenticationFailed {
            reason: format!("{} actor '{}' has no subject id for {action}", self.role.as_str(), self.id),
        })
    }
}

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
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
        }
    }
}

impl std::error::Error for AuthError {}

/// Stub authentication function.
///
/// Identity resolution is external to this system; this placeholder
/// turns an already-verified identity into an `AuthenticatedActor`.
///
/// # Errors
///
/// Returns an error if the actor id is empty.
pub fn authenticate_stub(
    actor_id: String,
    role: Role,
    subject_id: Option<i64>,
) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role, subject_id))
}

fn unauthorized(action: &str, required_role: &str) -> AuthError {
    AuthError::Unauthorized {
        action: action.to_string(),
        required_role: required_role.to_string(),
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the actor may book lessons. Admin and Staff only.
    ///
    /// # Errors
    ///
    /// Returns an error for instructor and student actors.
    pub fn authorize_booking(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Staff => Ok(()),
            Role::Instructor | Role::Student => Err(unauthorized("book_lesson", "Staff")),
        }
    }

    /// Checks that the actor may transition the given lesson.
    ///
    /// Admin and Staff may transition any lesson; an instructor only
    /// their own.
    ///
    /// # Errors
    ///
    /// Returns an error for students, and for instructors acting on
    /// another instructor's lesson.
    pub fn authorize_transition(
        actor: &AuthenticatedActor,
        lesson: &Lesson,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Staff => Ok(()),
            Role::Instructor => {
                if actor.subject_id == Some(lesson.instructor_id.value()) {
                    Ok(())
                } else {
                    Err(unauthorized("transition_lesson", "Staff"))
                }
            }
            Role::Student => Err(unauthorized("transition_lesson", "Instructor")),
        }
    }

    /// Checks that the actor may reassign lessons. Admin and Staff only.
    ///
    /// # Errors
    ///
    /// Returns an error for instructor and student actors.
    pub fn authorize_reassignment(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Staff => Ok(()),
            Role::Instructor | Role::Student => Err(unauthorized("reassign_lesson", "Staff")),
        }
    }

    /// Checks that the actor may run the given bulk action.
    ///
    /// Hard deletion requires Admin; everything else requires Admin or
    /// Staff. The check runs once for the whole batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the role does not permit the action.
    pub fn authorize_bulk(
        actor: &AuthenticatedActor,
        action: &BulkAction,
    ) -> Result<(), AuthError> {
        match (actor.role, action) {
            (Role::Admin, _) => Ok(()),
            (Role::Staff, BulkAction::Delete) => Err(unauthorized("bulk_delete", "Admin")),
            (Role::Staff, _) => Ok(()),
            (Role::Instructor | Role::Student, _) => {
                Err(unauthorized(action.name(), "Staff"))
            }
        }
    }

    /// Checks that the actor may read the given lesson's detail and
    /// history.
    ///
    /// # Errors
    ///
    /// Returns an error for restricted roles reading lessons that are
    /// not their own.
    pub fn authorize_lesson_read(
        actor: &AuthenticatedActor,
        lesson: &Lesson,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin | Role::Staff => Ok(()),
            Role::Instructor => {
                if actor.subject_id == Some(lesson.instructor_id.value()) {
                    Ok(())
                } else {
                    Err(unauthorized("get_lesson", "Staff"))
                }
            }
            Role::Student => {
                if actor.subject_id == Some(lesson.student_id.value()) {
                    Ok(())
                } else {
                    Err(unauthorized("get_lesson", "Staff"))
                }
            }
        }
    }
}
