// Copyright (C) 2026 DriveDesk Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for scheduling operations.
//!
//! Every handler follows the same shape: authorize, parse the wire
//! request into domain types, let the core decide, commit through the
//! persistence layer, notify. Errors are translated at each step and
//! never leak raw domain or database errors.

use std::collections::{HashMap, HashSet};

use drivedesk::{
    BookingRequest, BulkAction, BulkOutcome, CalendarFilter, MAX_BULK_ITEMS, TransitionOutcome,
    apply_transition, complete_lesson as apply_completion, find_conflicts, hour_buckets,
    month_view_overflow, project, reassign_instructor, reassign_vehicle, validate_booking,
};
use drivedesk_audit::Actor;
use drivedesk_domain::{
    CompletionOutcome, CourseId, DEFAULT_HORIZON_MONTHS, InstructorId, Lesson, LessonId,
    LessonStatus, LessonSummary, LessonType, PerformanceRating, ResourceKind, StudentId, TimeSlot,
    VehicleId, today_in_timezone,
};
use drivedesk_persistence::Persistence;
use time::Date;
use time::format_description::well_known::Rfc3339;
use tracing::{info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
    translate_validation_errors,
};
use crate::export::export_lessons_csv;
use crate::notify::NotificationSink;
use crate::request_response::{
    BookLessonRequest, BookLessonResponse, BulkActionRequest, BulkActionResponse, BulkFailureInfo,
    CalendarDayInfo, CalendarRequest, CalendarResponse, CheckAvailabilityRequest,
    CheckAvailabilityResponse, CompleteLessonRequest, CompleteLessonResponse, ConflictInfo,
    HistoryEntryInfo, HourBucketInfo, LessonDetailResponse, LessonInfo, ReassignLessonRequest,
    ReassignLessonResponse, TransitionLessonRequest, TransitionLessonResponse, format_wire_date,
    format_wire_time, parse_wire_date, parse_wire_time,
};

/// Scheduling configuration threaded into handlers by the server.
///
/// The core never reads ambient global state; "today" and the booking
/// horizon come from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingPolicy {
    /// IANA timezone name the school operates in.
    pub timezone: String,
    /// How far ahead bookings may be placed, in months.
    pub horizon_months: u32,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            timezone: String::from("UTC"),
            horizon_months: DEFAULT_HORIZON_MONTHS,
        }
    }
}

fn current_timestamp() -> Result<String, ApiError> {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: format!("timestamp formatting failed: {e}"),
        })
}

fn validation_failure(message: String) -> ApiError {
    ApiError::ValidationFailed {
        errors: vec![message],
    }
}

/// Books a new lesson.
///
/// Runs the full pipeline: authorization, reference resolution, core
/// validation (all defects collected), and the transactional conflict
/// check + insert. The instructor is notified on success.
///
/// # Errors
///
/// Returns `Unauthorized`, `ValidationFailed` with every defect,
/// `Conflict` with the blocking lessons, or `Internal`.
pub fn book_lesson(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    policy: &SchedulingPolicy,
    sink: &dyn NotificationSink,
    request: &BookLessonRequest,
) -> Result<BookLessonResponse, ApiError> {
    AuthorizationService::authorize_booking(actor)?;

    let date: Date = parse_wire_date("date", &request.date)?;
    let start_time = parse_wire_time("start_time", &request.start_time)?;
    let lesson_type: LessonType = request
        .lesson_type
        .parse()
        .map_err(translate_domain_error)?;

    let refs = persistence
        .reference_data(
            StudentId(request.student_id),
            InstructorId(request.instructor_id),
            VehicleId(request.vehicle_id),
            CourseId(request.course_id),
        )
        .map_err(translate_persistence_error)?;

    let today: Date = today_in_timezone(&policy.timezone).map_err(|e| ApiError::Internal {
        message: format!("timezone resolution failed: {e}"),
    })?;
    let created_at: String = current_timestamp()?;

    let booking_request = BookingRequest {
        student_id: StudentId(request.student_id),
        instructor_id: InstructorId(request.instructor_id),
        vehicle_id: VehicleId(request.vehicle_id),
        course_id: CourseId(request.course_id),
        date,
        start_time,
        lesson_type,
        pickup_location: request.pickup_location.clone(),
        dropoff_location: request.dropoff_location.clone(),
        notes: request.notes.clone(),
    };

    let prepared = validate_booking(
        &booking_request,
        &refs,
        today,
        policy.horizon_months,
        &created_at,
    )
    .map_err(translate_validation_errors)?;

    let lesson: Lesson = persistence
        .book_lesson(&prepared, &actor.to_audit_actor(), &created_at)
        .map_err(translate_persistence_error)?;

    info!(
        lesson_id = lesson.lesson_id.value(),
        actor = %actor.id,
        "lesson booked"
    );
    sink.lesson_booked(&lesson);

    Ok(BookLessonResponse {
        lesson_id: lesson.lesson_id.value(),
        status: lesson.status.as_str().to_string(),
        date: format_wire_date(lesson.slot.date)?,
        start_time: format_wire_time(lesson.slot.start)?,
        end_time: format_wire_time(lesson.slot.end)?,
        message: String::from("Lesson booked"),
    })
}

/// Checks availability for a prospective slot without booking anything.
///
/// At least one of instructor and vehicle must be given; each provided
/// resource is checked independently and all blocking lessons are
/// reported.
///
/// # Errors
///
/// Returns `ValidationFailed` for malformed input or `Internal` for
/// query failures.
pub fn check_availability(
    persistence: &mut Persistence,
    request: &CheckAvailabilityRequest,
) -> Result<CheckAvailabilityResponse, ApiError> {
    if request.instructor_id.is_none() && request.vehicle_id.is_none() {
        return Err(validation_failure(String::from(
            "at least one of instructor_id and vehicle_id is required",
        )));
    }

    let date: Date = parse_wire_date("date", &request.date)?;
    let start_time = parse_wire_time("start_time", &request.start_time)?;
    let slot: TimeSlot = TimeSlot::from_start_and_duration(date, start_time, request.duration_minutes)
        .map_err(translate_domain_error)?;
    let exclude = request.exclude_lesson_id.map(LessonId);

    let mut conflicts: Vec<ConflictInfo> = Vec::new();
    let checks: [(ResourceKind, Option<i64>); 2] = [
        (ResourceKind::Instructor, request.instructor_id),
        (ResourceKind::Vehicle, request.vehicle_id),
    ];

    for (kind, maybe_id) in checks {
        let Some(resource_id) = maybe_id else {
            continue;
        };
        let candidates: Vec<LessonSummary> = persistence
            .lessons_for_resource_on_date(kind, resource_id, date)
            .map_err(translate_persistence_error)?;

        for blocking in find_conflicts(&candidates, &slot, exclude) {
            conflicts.push(ConflictInfo {
                lesson_id: blocking.lesson_id.value(),
                resource: kind.as_str().to_string(),
                date: format_wire_date(blocking.slot.date)?,
                start_time: format_wire_time(blocking.slot.start)?,
                end_time: format_wire_time(blocking.slot.end)?,
                status: blocking.status.as_str().to_string(),
            });
        }
    }

    Ok(CheckAvailabilityResponse {
        available: conflicts.is_empty(),
        conflicts,
    })
}

/// Moves a lesson to a new status.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound`, `PreconditionFailed`
/// for lifecycle violations, or `Internal`.
pub fn transition_lesson(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    sink: &dyn NotificationSink,
    request: &TransitionLessonRequest,
) -> Result<TransitionLessonResponse, ApiError> {
    let lesson: Lesson = persistence
        .get_lesson(LessonId(request.lesson_id))
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_transition(actor, &lesson)?;

    let new_status: LessonStatus = request
        .new_status
        .parse()
        .map_err(translate_domain_error)?;
    let now: String = current_timestamp()?;

    let outcome: TransitionOutcome = apply_transition(
        &lesson,
        new_status,
        &actor.to_audit_actor(),
        request.note.as_deref(),
        &now,
    )
    .map_err(translate_core_error)?;

    persistence
        .persist_transition(&outcome)
        .map_err(translate_persistence_error)?;

    info!(
        lesson_id = lesson.lesson_id.value(),
        from = lesson.status.as_str(),
        to = new_status.as_str(),
        actor = %actor.id,
        "lesson transitioned"
    );
    sink.lesson_status_changed(lesson.lesson_id, lesson.instructor_id, lesson.status, new_status);

    Ok(TransitionLessonResponse {
        lesson_id: lesson.lesson_id.value(),
        previous_status: lesson.status.as_str().to_string(),
        new_status: new_status.as_str().to_string(),
        message: String::from("Status updated"),
    })
}

/// Completes a lesson, attaching the rating and skills practiced.
///
/// # Errors
///
/// Returns `Unauthorized`, `ResourceNotFound`, `ValidationFailed` for
/// an out-of-range rating, `PreconditionFailed` if the lesson cannot
/// complete from its current status, or `Internal`.
pub fn complete_lesson(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CompleteLessonRequest,
) -> Result<CompleteLessonResponse, ApiError> {
    let lesson: Lesson = persistence
        .get_lesson(LessonId(request.lesson_id))
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_transition(actor, &lesson)?;

    let rating = PerformanceRating::new(request.rating).map_err(translate_domain_error)?;
    let outcome_data = CompletionOutcome {
        rating,
        skills_practiced: request.skills_practiced.clone(),
        note: request.note.clone(),
    };
    let now: String = current_timestamp()?;

    let outcome: TransitionOutcome =
        apply_completion(&lesson, &outcome_data, &actor.to_audit_actor(), &now)
            .map_err(translate_core_error)?;

    persistence
        .persist_transition(&outcome)
        .map_err(translate_persistence_error)?;

    info!(
        lesson_id = lesson.lesson_id.value(),
        rating = request.rating,
        actor = %actor.id,
        "lesson completed"
    );

    Ok(CompleteLessonResponse {
        lesson_id: lesson.lesson_id.value(),
        rating: request.rating,
        message: String::from("Lesson completed"),
    })
}

/// Reassigns a lesson's instructor or vehicle.
///
/// Exactly one of the two must be given. The core checks availability
/// against current data and the persistence layer re-checks inside the
/// mutation transaction.
///
/// # Errors
///
/// Returns `Unauthorized`, `ValidationFailed`, `PreconditionFailed`
/// for non-scheduled lessons, `Conflict`, or `Internal`.
pub fn reassign_lesson(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    sink: &dyn NotificationSink,
    request: &ReassignLessonRequest,
) -> Result<ReassignLessonResponse, ApiError> {
    AuthorizationService::authorize_reassignment(actor)?;

    let lesson: Lesson = persistence
        .get_lesson(LessonId(request.lesson_id))
        .map_err(translate_persistence_error)?;
    let now: String = current_timestamp()?;
    let audit_actor: Actor = actor.to_audit_actor();

    let (outcome, resource): (TransitionOutcome, ResourceKind) =
        match (request.instructor_id, request.vehicle_id) {
            (Some(new_instructor), None) => {
                let candidates = persistence
                    .lessons_for_resource_on_date(
                        ResourceKind::Instructor,
                        new_instructor,
                        lesson.slot.date,
                    )
                    .map_err(translate_persistence_error)?;
                let outcome = reassign_instructor(
                    &lesson,
                    InstructorId(new_instructor),
                    &candidates,
                    &audit_actor,
                    &now,
                )
                .map_err(translate_core_error)?;
                (outcome, ResourceKind::Instructor)
            }
            (None, Some(new_vehicle)) => {
                let candidates = persistence
                    .lessons_for_resource_on_date(
                        ResourceKind::Vehicle,
                        new_vehicle,
                        lesson.slot.date,
                    )
                    .map_err(translate_persistence_error)?;
                let outcome = reassign_vehicle(
                    &lesson,
                    VehicleId(new_vehicle),
                    &candidates,
                    &audit_actor,
                    &now,
                )
                .map_err(translate_core_error)?;
                (outcome, ResourceKind::Vehicle)
            }
            _ => {
                return Err(validation_failure(String::from(
                    "exactly one of instructor_id and vehicle_id is required",
                )));
            }
        };

    persistence
        .persist_reassignment(&outcome, resource)
        .map_err(translate_persistence_error)?;

    info!(
        lesson_id = lesson.lesson_id.value(),
        resource = resource.as_str(),
        actor = %actor.id,
        "lesson reassigned"
    );
    if resource == ResourceKind::Instructor {
        sink.lesson_reassigned(outcome.updated.lesson_id, outcome.updated.instructor_id);
    }

    Ok(ReassignLessonResponse {
        lesson_id: outcome.updated.lesson_id.value(),
        instructor_id: outcome.updated.instructor_id.value(),
        vehicle_id: outcome.updated.vehicle_id.value(),
        message: String::from("Lesson reassigned"),
    })
}

fn parse_bulk_action(request: &BulkActionRequest) -> Result<BulkAction, ApiError> {
    match request.action.as_str() {
        "complete" => Ok(BulkAction::Complete),
        "cancel" => {
            let reason = request.reason.clone().ok_or_else(|| {
                validation_failure(String::from("reason is required for cancel"))
            })?;
            Ok(BulkAction::Cancel { reason })
        }
        "change_status" => {
            let status_text = request.new_status.as_deref().ok_or_else(|| {
                validation_failure(String::from("new_status is required for change_status"))
            })?;
            let new_status: LessonStatus =
                status_text.parse().map_err(translate_domain_error)?;
            Ok(BulkAction::ChangeStatus { new_status })
        }
        "assign_instructor" => {
            let instructor_id = request.instructor_id.ok_or_else(|| {
                validation_failure(String::from(
                    "instructor_id is required for assign_instructor",
                ))
            })?;
            Ok(BulkAction::AssignInstructor {
                instructor_id: InstructorId(instructor_id),
            })
        }
        "delete" => Ok(BulkAction::Delete),
        "export" => Ok(BulkAction::Export),
        other => Err(validation_failure(format!("unknown bulk action {other:?}"))),
    }
}

fn apply_bulk_item(
    persistence: &mut Persistence,
    action: &BulkAction,
    lesson: &Lesson,
    audit_actor: &Actor,
    now: &str,
) -> Result<(), ApiError> {
    match action {
        BulkAction::Complete => {
            let outcome = apply_transition(
                lesson,
                LessonStatus::Completed,
                audit_actor,
                Some("completed in bulk"),
                now,
            )
            .map_err(translate_core_error)?;
            persistence
                .persist_transition(&outcome)
                .map_err(translate_persistence_error)
        }
        BulkAction::Cancel { reason } => {
            let outcome = apply_transition(
                lesson,
                LessonStatus::Cancelled,
                audit_actor,
                Some(reason),
                now,
            )
            .map_err(translate_core_error)?;
            persistence
                .persist_transition(&outcome)
                .map_err(translate_persistence_error)
        }
        BulkAction::ChangeStatus { new_status } => {
            let outcome = apply_transition(lesson, *new_status, audit_actor, None, now)
                .map_err(translate_core_error)?;
            persistence
                .persist_transition(&outcome)
                .map_err(translate_persistence_error)
        }
        BulkAction::AssignInstructor { instructor_id } => {
            let candidates = persistence
                .lessons_for_resource_on_date(
                    ResourceKind::Instructor,
                    instructor_id.value(),
                    lesson.slot.date,
                )
                .map_err(translate_persistence_error)?;
            let outcome =
                reassign_instructor(lesson, *instructor_id, &candidates, audit_actor, now)
                    .map_err(translate_core_error)?;
            persistence
                .persist_reassignment(&outcome, ResourceKind::Instructor)
                .map_err(translate_persistence_error)
        }
        BulkAction::Delete => persistence
            .delete_lesson(lesson.lesson_id)
            .map_err(translate_persistence_error),
        // Export collects rows outside this function.
        BulkAction::Export => Ok(()),
    }
}

/// Runs one bulk action over a set of lesson ids.
///
/// Items are applied independently: a failure is recorded with its
/// lesson id and reason and the batch continues. Authorization and the
/// batch-size bound are checked once, up front.
///
/// # Errors
///
/// Returns `Unauthorized` or `ValidationFailed` for batch-level
/// problems; per-item problems are reported in the response, never as
/// errors.
pub fn bulk_action(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &BulkActionRequest,
) -> Result<BulkActionResponse, ApiError> {
    let action: BulkAction = parse_bulk_action(request)?;
    AuthorizationService::authorize_bulk(actor, &action)?;

    if request.lesson_ids.len() > MAX_BULK_ITEMS {
        return Err(validation_failure(format!(
            "bulk request carries {} ids, limit is {MAX_BULK_ITEMS}",
            request.lesson_ids.len()
        )));
    }

    // The id list is a set: a repeated id would be validated and
    // applied against the pre-loop snapshot, re-running a transition
    // the first occurrence already made.
    let mut seen: HashSet<i64> = HashSet::with_capacity(request.lesson_ids.len());
    let unique_ids: Vec<i64> = request
        .lesson_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    let ids: Vec<LessonId> = unique_ids.iter().copied().map(LessonId).collect();
    let lessons: HashMap<i64, Lesson> = persistence
        .get_lessons(&ids)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|lesson| (lesson.lesson_id.value(), lesson))
        .collect();

    let now: String = current_timestamp()?;
    let audit_actor: Actor = actor.to_audit_actor();
    let mut outcome = BulkOutcome::new();
    let mut export_rows: Vec<Lesson> = Vec::new();

    for &id in &unique_ids {
        let Some(lesson) = lessons.get(&id) else {
            outcome.record_failure(LessonId(id), String::from("lesson not found"));
            continue;
        };

        if let Err(err) = action.validate_precondition(lesson) {
            outcome.record_failure(lesson.lesson_id, err.to_string());
            continue;
        }

        if action == BulkAction::Export {
            export_rows.push(lesson.clone());
            outcome.record_success();
            continue;
        }

        match apply_bulk_item(persistence, &action, lesson, &audit_actor, &now) {
            Ok(()) => outcome.record_success(),
            Err(err) => {
                warn!(
                    lesson_id = id,
                    action = action.name(),
                    error = %err,
                    "bulk item failed"
                );
                outcome.record_failure(lesson.lesson_id, err.to_string());
            }
        }
    }

    let export_csv: Option<String> = if action == BulkAction::Export {
        Some(
            export_lessons_csv(&export_rows).map_err(|e| ApiError::Internal {
                message: format!("CSV export failed: {e}"),
            })?,
        )
    } else {
        None
    };

    info!(
        action = action.name(),
        total = outcome.total(),
        succeeded = outcome.success_count,
        failed = outcome.failures.len(),
        actor = %actor.id,
        "bulk action finished"
    );

    Ok(BulkActionResponse {
        success_count: outcome.success_count,
        failure_count: outcome.failures.len(),
        failures: outcome
            .failures
            .into_iter()
            .map(|f| BulkFailureInfo {
                lesson_id: f.lesson_id.value(),
                reason: f.reason,
            })
            .collect(),
        export_csv,
    })
}

/// Projects lessons in a date range into per-day calendar groups.
///
/// Instructors and students are scoped to their own lessons regardless
/// of the requested filter. The `week` view adds hour buckets over the
/// operating band.
///
/// # Errors
///
/// Returns `ValidationFailed` for malformed dates or an inverted
/// range, or `Internal` for query failures.
pub fn calendar(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CalendarRequest,
) -> Result<CalendarResponse, ApiError> {
    let from: Date = parse_wire_date("from", &request.from)?;
    let to: Date = parse_wire_date("to", &request.to)?;
    if from > to {
        return Err(validation_failure(String::from(
            "from must not be after to",
        )));
    }

    let status: Option<LessonStatus> = match request.status.as_deref() {
        None => None,
        Some(text) => Some(text.parse().map_err(translate_domain_error)?),
    };
    let requested = CalendarFilter {
        instructor_id: request.instructor_id.map(InstructorId),
        student_id: request.student_id.map(StudentId),
        status,
    };
    let filter: CalendarFilter = actor.scoped_filter(requested)?;

    let summaries: Vec<LessonSummary> = persistence
        .lessons_in_range(from, to, &filter)
        .map_err(translate_persistence_error)?;

    let want_hours: bool = request.view.as_deref() == Some("week");
    let mut days: Vec<CalendarDayInfo> = Vec::new();

    for (date, lessons) in project(summaries) {
        let infos: Vec<LessonInfo> = lessons
            .iter()
            .map(LessonInfo::from_summary)
            .collect::<Result<_, _>>()?;

        let hours: Option<Vec<HourBucketInfo>> = if want_hours {
            Some(
                hour_buckets(&lessons)
                    .into_iter()
                    .map(|(hour, bucket)| HourBucketInfo {
                        hour,
                        lesson_ids: bucket.iter().map(|l| l.lesson_id.value()).collect(),
                    })
                    .collect(),
            )
        } else {
            None
        };

        days.push(CalendarDayInfo {
            date: format_wire_date(date)?,
            overflow: month_view_overflow(lessons.len()),
            lessons: infos,
            hours,
        });
    }

    Ok(CalendarResponse { days })
}

/// Retrieves a lesson's full detail and history timeline.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `Unauthorized` for restricted roles
/// reading someone else's lesson, or `Internal`.
pub fn get_lesson(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    lesson_id: i64,
) -> Result<LessonDetailResponse, ApiError> {
    let lesson: Lesson = persistence
        .get_lesson(LessonId(lesson_id))
        .map_err(translate_persistence_error)?;
    AuthorizationService::authorize_lesson_read(actor, &lesson)?;

    let history: Vec<HistoryEntryInfo> = persistence
        .lesson_history(lesson.lesson_id)
        .map_err(translate_persistence_error)?
        .into_iter()
        .map(|record| HistoryEntryInfo {
            actor_id: record.actor.id,
            actor_type: record.actor.actor_type,
            from_status: record.from_status.map(|s| s.as_str().to_string()),
            to_status: record.to_status.as_str().to_string(),
            transitioned_at: record.transitioned_at,
            note: record.note,
        })
        .collect();

    LessonDetailResponse::from_lesson(&lesson, history)
}
