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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use drivedesk_api::{
    ApiError, AuthenticatedActor, BookLessonRequest, BookLessonResponse, BulkActionRequest,
    BulkActionResponse, CalendarRequest, CalendarResponse, CheckAvailabilityRequest,
    CheckAvailabilityResponse, CompleteLessonRequest, CompleteLessonResponse,
    LessonDetailResponse, ReassignLessonRequest, ReassignLessonResponse, Role, SchedulingPolicy,
    TracingNotificationSink, TransitionLessonRequest, TransitionLessonResponse,
    authenticate_stub, book_lesson, bulk_action, calendar, check_availability, complete_lesson,
    get_lesson, reassign_lesson, transition_lesson,
};
use drivedesk_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// DriveDesk Server - HTTP server for the DriveDesk lesson scheduler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone the school operates in
    #[arg(short, long, default_value = "UTC")]
    timezone: String,

    /// How far ahead bookings may be placed, in months
    #[arg(long, default_value_t = 3)]
    horizon_months: u32,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex to allow safe concurrent
/// access over a single database connection.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    policy: SchedulingPolicy,
}

/// Request body wrapper carrying the stub-authenticated actor alongside
/// the operation payload. Identity is a body concern until a real
/// authentication layer fronts this server.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorEnvelope<T> {
    /// The actor ID performing this action.
    actor_id: String,
    /// The actor's role: `admin`, `staff`, `instructor`, or `student`.
    actor_role: String,
    /// The instructor or student id the actor acts as, for restricted roles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subject_id: Option<i64>,
    /// The operation payload.
    #[serde(flatten)]
    request: T,
}

/// Query parameters identifying the actor on read endpoints.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    actor_id: String,
    actor_role: String,
    subject_id: Option<i64>,
}

/// Query parameters for the availability check endpoint.
#[derive(Debug, Deserialize)]
struct AvailabilityQuery {
    instructor_id: Option<i64>,
    vehicle_id: Option<i64>,
    date: String,
    start_time: String,
    duration_minutes: i64,
    exclude_lesson_id: Option<i64>,
}

/// Query parameters for the calendar endpoint.
#[derive(Debug, Deserialize)]
struct CalendarQuery {
    actor_id: String,
    actor_role: String,
    subject_id: Option<i64>,
    from: String,
    to: String,
    view: Option<String>,
    instructor_id: Option<i64>,
    student_id: Option<i64>,
    status: Option<String>,
}

/// Response for the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::PreconditionFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses a role string into a Role enum.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    match role_str.to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "staff" => Ok(Role::Staff),
        "instructor" => Ok(Role::Instructor),
        "student" => Ok(Role::Student),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!(
                "Invalid role: '{role_str}'. Must be 'admin', 'staff', 'instructor', or 'student'"
            ),
        }),
    }
}

/// Authenticates the stub actor identified in the request.
fn authenticate(
    actor_id: String,
    role_str: &str,
    subject_id: Option<i64>,
) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = parse_role(role_str)?;
    authenticate_stub(actor_id, role, subject_id).map_err(|e| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: e.to_string(),
    })
}

/// Handler for POST `/lessons` endpoint.
///
/// Books a new lesson.
async fn handle_book_lesson(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<BookLessonRequest>>,
) -> Result<Json<BookLessonResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        date = %req.request.date,
        "Handling book_lesson request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role, req.subject_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: BookLessonResponse = book_lesson(
        &mut persistence,
        &actor,
        &app_state.policy,
        &TracingNotificationSink,
        &req.request,
    )?;

    Ok(Json(response))
}

/// Handler for POST `/lessons/transition` endpoint.
///
/// Moves a lesson to a new status.
async fn handle_transition_lesson(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<TransitionLessonRequest>>,
) -> Result<Json<TransitionLessonResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        lesson_id = req.request.lesson_id,
        new_status = %req.request.new_status,
        "Handling transition_lesson request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role, req.subject_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionLessonResponse = transition_lesson(
        &mut persistence,
        &actor,
        &TracingNotificationSink,
        &req.request,
    )?;

    Ok(Json(response))
}

/// Handler for POST `/lessons/complete` endpoint.
///
/// Completes a lesson with its rating and skills.
async fn handle_complete_lesson(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<CompleteLessonRequest>>,
) -> Result<Json<CompleteLessonResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        lesson_id = req.request.lesson_id,
        "Handling complete_lesson request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role, req.subject_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CompleteLessonResponse =
        complete_lesson(&mut persistence, &actor, &req.request)?;

    Ok(Json(response))
}

/// Handler for POST `/lessons/reassign` endpoint.
///
/// Reassigns a lesson's instructor or vehicle.
async fn handle_reassign_lesson(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<ReassignLessonRequest>>,
) -> Result<Json<ReassignLessonResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        lesson_id = req.request.lesson_id,
        "Handling reassign_lesson request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role, req.subject_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ReassignLessonResponse = reassign_lesson(
        &mut persistence,
        &actor,
        &TracingNotificationSink,
        &req.request,
    )?;

    Ok(Json(response))
}

/// Handler for POST `/lessons/bulk` endpoint.
///
/// Runs one bulk action over a set of lesson ids.
async fn handle_bulk_action(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ActorEnvelope<BulkActionRequest>>,
) -> Result<Json<BulkActionResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        action = %req.request.action,
        count = req.request.lesson_ids.len(),
        "Handling bulk_action request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_role, req.subject_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: BulkActionResponse = bulk_action(&mut persistence, &actor, &req.request)?;

    Ok(Json(response))
}

/// Handler for GET `/availability` endpoint.
///
/// Checks a prospective slot for conflicts without booking.
async fn handle_check_availability(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<CheckAvailabilityResponse>, HttpError> {
    info!(
        date = %query.date,
        start_time = %query.start_time,
        "Handling check_availability request"
    );

    let request: CheckAvailabilityRequest = CheckAvailabilityRequest {
        instructor_id: query.instructor_id,
        vehicle_id: query.vehicle_id,
        date: query.date,
        start_time: query.start_time,
        duration_minutes: query.duration_minutes,
        exclude_lesson_id: query.exclude_lesson_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CheckAvailabilityResponse = check_availability(&mut persistence, &request)?;

    Ok(Json(response))
}

/// Handler for GET `/calendar` endpoint.
///
/// Projects lessons in a date range into per-day groups, scoped to the
/// actor's role.
async fn handle_calendar(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, HttpError> {
    info!(
        actor_id = %query.actor_id,
        from = %query.from,
        to = %query.to,
        "Handling calendar request"
    );

    let actor: AuthenticatedActor =
        authenticate(query.actor_id, &query.actor_role, query.subject_id)?;

    let request: CalendarRequest = CalendarRequest {
        from: query.from,
        to: query.to,
        view: query.view,
        instructor_id: query.instructor_id,
        student_id: query.student_id,
        status: query.status,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CalendarResponse = calendar(&mut persistence, &actor, &request)?;

    Ok(Json(response))
}

/// Handler for GET `/lessons/{lesson_id}` endpoint.
///
/// Retrieves a lesson's full detail and history timeline.
async fn handle_get_lesson(
    AxumState(app_state): AxumState<AppState>,
    Path(lesson_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<LessonDetailResponse>, HttpError> {
    info!(
        actor_id = %query.actor_id,
        lesson_id = lesson_id,
        "Handling get_lesson request"
    );

    let actor: AuthenticatedActor =
        authenticate(query.actor_id, &query.actor_role, query.subject_id)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: LessonDetailResponse = get_lesson(&mut persistence, &actor, lesson_id)?;

    Ok(Json(response))
}

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all routes.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/lessons", post(handle_book_lesson))
        .route("/lessons/transition", post(handle_transition_lesson))
        .route("/lessons/complete", post(handle_complete_lesson))
        .route("/lessons/reassign", post(handle_reassign_lesson))
        .route("/lessons/bulk", post(handle_bulk_action))
        .route("/lessons/{lesson_id}", get(handle_get_lesson))
        .route("/availability", get(handle_check_availability))
        .route("/calendar", get(handle_calendar))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing DriveDesk Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        policy: SchedulingPolicy {
            timezone: args.timezone.clone(),
            horizon_months: args.horizon_months,
        },
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
