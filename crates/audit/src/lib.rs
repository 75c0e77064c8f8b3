// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use drivedesk_domain::{LessonId, LessonStatus};

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a lesson state
/// change. This is usually a staff member or instructor resolved by the
/// external identity collaborator, but may be a system process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The kind of actor (e.g., "admin", "staff", "instructor", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The kind of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// A structured record of one lesson status transition.
///
/// Every successful status change produces exactly one transition record.
/// Records are immutable once created and capture who changed what, when,
/// and why, so audit queries never need to parse the human-readable trail
/// kept in `instructor_notes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecord {
    /// The lesson whose status changed.
    pub lesson_id: LessonId,
    /// The actor who initiated this change.
    pub actor: Actor,
    /// When the transition happened (RFC 3339, UTC).
    pub transitioned_at: String,
    /// The status before the transition. `None` for the initial
    /// booking record.
    pub from_status: Option<LessonStatus>,
    /// The status after the transition.
    pub to_status: LessonStatus,
    /// Optional free-form note attached to the transition.
    pub note: Option<String>,
}

impl TransitionRecord {
    /// Creates a new `TransitionRecord`.
    ///
    /// Once created, a transition record is immutable.
    #[must_use]
    pub const fn new(
        lesson_id: LessonId,
        actor: Actor,
        transitioned_at: String,
        from_status: Option<LessonStatus>,
        to_status: LessonStatus,
        note: Option<String>,
    ) -> Self {
        Self {
            lesson_id,
            actor,
            transitioned_at,
            from_status,
            to_status,
            note,
        }
    }

    /// Renders the human-readable audit line appended to the lesson's
    /// `instructor_notes` for this transition.
    ///
    /// The line carries actor identity, timestamp, and the action, in a
    /// stable single-line form.
    #[must_use]
    pub fn notes_line(&self) -> String {
        let action = self.from_status.map_or_else(
            || format!("booked as {}", self.to_status.as_str()),
            |from| format!("{} -> {}", from.as_str(), self.to_status.as_str()),
        );
        match &self.note {
            Some(note) if !note.is_empty() => format!(
                "[{}] {} ({}): {} - {}",
                self.transitioned_at, self.actor.id, self.actor.actor_type, action, note
            ),
            _ => format!(
                "[{}] {} ({}): {}",
                self.transitioned_at, self.actor.id, self.actor.actor_type, action
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_actor() -> Actor {
        Actor::new(String::from("staff-7"), String::from("staff"))
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = sample_actor();

        assert_eq!(actor.id, "staff-7");
        assert_eq!(actor.actor_type, "staff");
    }

    #[test]
    fn test_transition_record_is_immutable_once_created() {
        let record: TransitionRecord = TransitionRecord::new(
            LessonId(42),
            sample_actor(),
            String::from("2026-09-14T10:00:00Z"),
            Some(LessonStatus::Scheduled),
            LessonStatus::Completed,
            Some(String::from("good progress")),
        );

        let cloned: TransitionRecord = record.clone();
        assert_eq!(record, cloned);
        assert_eq!(record.lesson_id, LessonId(42));
        assert_eq!(record.from_status, Some(LessonStatus::Scheduled));
        assert_eq!(record.to_status, LessonStatus::Completed);
    }

    #[test]
    fn test_notes_line_for_transition() {
        let record: TransitionRecord = TransitionRecord::new(
            LessonId(42),
            sample_actor(),
            String::from("2026-09-14T10:00:00Z"),
            Some(LessonStatus::Scheduled),
            LessonStatus::Cancelled,
            Some(String::from("student ill")),
        );

        assert_eq!(
            record.notes_line(),
            "[2026-09-14T10:00:00Z] staff-7 (staff): scheduled -> cancelled - student ill"
        );
    }

    #[test]
    fn test_notes_line_for_initial_booking() {
        let record: TransitionRecord = TransitionRecord::new(
            LessonId(1),
            sample_actor(),
            String::from("2026-09-14T08:00:00Z"),
            None,
            LessonStatus::Scheduled,
            None,
        );

        assert_eq!(
            record.notes_line(),
            "[2026-09-14T08:00:00Z] staff-7 (staff): booked as scheduled"
        );
    }
}
