// Copyright (C) 2026 Fred Clausen
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

mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use lead_desk_api::{
    ApiError, CreateEmployeeRequest, CreateEmployeeResponse, CreateLeadRequest,
    CreateLeadResponse, ImportLeadsResponse, LeadResponse, ListActivitiesResponse,
    ListEmployeesQuery, ListEmployeesResponse, ListLeadsQuery, ListLeadsResponse,
    ReassignLeadRequest, ScheduledLeadsQuery, SetEmployeeStatusRequest,
    SetEmployeeStatusResponse, UpdateLeadRequest, create_employee, create_lead, import_leads_csv,
    list_employees, list_leads, list_my_leads, list_scheduled_leads, my_activities,
    reassign_lead, recent_activities, set_employee_status, update_lead,
};
use lead_desk_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::session::SessionActor;

/// Lead Desk Server - HTTP server for the Lead Desk assignment engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "LEAD_DESK_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, env = "LEAD_DESK_BIND", default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer for employees, leads and activities.
    persistence: Arc<Mutex<Persistence>>,
}

/// Generic error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Per-row problems of a rejected upload.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

impl ErrorResponse {
    #[must_use]
    pub const fn new(message: String) -> Self {
        Self {
            error: true,
            message,
            errors: Vec::new(),
        }
    }
}

/// Health check response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Per-row details, if any.
    errors: Vec<String>,
}

impl HttpError {
    const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            errors: Vec::new(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => {
                Self::new(StatusCode::UNAUTHORIZED, err.to_string())
            }
            ApiError::Unauthorized { .. } => Self::new(StatusCode::FORBIDDEN, err.to_string()),
            ApiError::DomainRuleViolation { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            ApiError::InvalidInput { .. } => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::InvalidCsv { reason, errors } => Self {
                status: StatusCode::BAD_REQUEST,
                message: reason,
                errors,
            },
            ApiError::ResourceNotFound { .. } => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

/// Handler for GET `/api/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

// ============================================================================
// Employees
// ============================================================================

/// Handler for POST `/api/employees`.
async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<CreateEmployeeResponse>, HttpError> {
    info!(
        actor_id = actor.employee_id,
        email = %req.email,
        "Handling create_employee request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEmployeeResponse = create_employee(&mut persistence, req, &actor)?;

    Ok(Json(response))
}

/// Handler for GET `/api/employees`.
async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Query(query): Query<ListEmployeesQuery>,
) -> Result<Json<ListEmployeesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListEmployeesResponse = list_employees(&mut persistence, &query, &actor)?;

    Ok(Json(response))
}

/// Handler for PUT `/api/employees/{employee_id}/status`.
async fn handle_set_employee_status(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(employee_id): Path<i64>,
    Json(req): Json<SetEmployeeStatusRequest>,
) -> Result<Json<SetEmployeeStatusResponse>, HttpError> {
    info!(
        actor_id = actor.employee_id,
        employee_id,
        status = %req.status,
        "Handling set_employee_status request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: SetEmployeeStatusResponse =
        set_employee_status(&mut persistence, employee_id, &req, &actor)?;

    Ok(Json(response))
}

// ============================================================================
// Leads
// ============================================================================

/// Handler for GET `/api/leads`.
async fn handle_list_leads(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Query(query): Query<ListLeadsQuery>,
) -> Result<Json<ListLeadsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListLeadsResponse = list_leads(&mut persistence, &query, &actor)?;

    Ok(Json(response))
}

/// Handler for POST `/api/leads`.
async fn handle_create_lead(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Json(req): Json<CreateLeadRequest>,
) -> Result<Json<CreateLeadResponse>, HttpError> {
    info!(
        actor_id = actor.employee_id,
        language = %req.language,
        "Handling create_lead request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateLeadResponse = create_lead(&mut persistence, req, &actor)?;

    Ok(Json(response))
}

/// Handler for GET `/api/leads/my-leads`.
async fn handle_my_leads(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<ListLeadsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListLeadsResponse = list_my_leads(&mut persistence, &actor)?;

    Ok(Json(response))
}

/// Handler for GET `/api/leads/scheduled`.
async fn handle_scheduled_leads(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Query(query): Query<ScheduledLeadsQuery>,
) -> Result<Json<ListLeadsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListLeadsResponse =
        list_scheduled_leads(&mut persistence, &query, &actor, OffsetDateTime::now_utc())?;

    Ok(Json(response))
}

/// Handler for POST `/api/leads/upload-csv`.
///
/// The request body is the raw CSV text and must be sent as `text/csv`.
async fn handle_upload_csv(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ImportLeadsResponse>, HttpError> {
    let is_csv: bool = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("text/csv"));
    if !is_csv {
        return Err(HttpError::new(
            StatusCode::BAD_REQUEST,
            String::from("Invalid file type. CSV file required."),
        ));
    }

    info!(
        actor_id = actor.employee_id,
        bytes = body.len(),
        "Handling upload_csv request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ImportLeadsResponse = import_leads_csv(&mut persistence, &body, &actor)?;

    Ok(Json(response))
}

/// Handler for PUT `/api/leads/{lead_id}`.
async fn handle_update_lead(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(lead_id): Path<i64>,
    Json(req): Json<UpdateLeadRequest>,
) -> Result<Json<LeadResponse>, HttpError> {
    info!(
        actor_id = actor.employee_id,
        lead_id,
        "Handling update_lead request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: LeadResponse = update_lead(
        &mut persistence,
        lead_id,
        &req,
        &actor,
        OffsetDateTime::now_utc(),
    )?;

    Ok(Json(response))
}

/// Handler for PUT `/api/leads/{lead_id}/assign`.
async fn handle_reassign_lead(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
    Path(lead_id): Path<i64>,
    Json(req): Json<ReassignLeadRequest>,
) -> Result<Json<LeadResponse>, HttpError> {
    info!(
        actor_id = actor.employee_id,
        lead_id,
        employee_id = req.employee_id,
        "Handling reassign_lead request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: LeadResponse = reassign_lead(&mut persistence, lead_id, &req, &actor)?;

    Ok(Json(response))
}

// ============================================================================
// Activities
// ============================================================================

/// Handler for GET `/api/activities/recent`.
async fn handle_recent_activities(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<ListActivitiesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListActivitiesResponse = recent_activities(&mut persistence, &actor)?;

    Ok(Json(response))
}

/// Handler for GET `/api/activities/my-activities`.
async fn handle_my_activities(
    AxumState(app_state): AxumState<AppState>,
    SessionActor(actor): SessionActor,
) -> Result<Json<ListActivitiesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListActivitiesResponse = my_activities(&mut persistence, &actor)?;

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handle_health))
        .route(
            "/api/employees",
            post(handle_create_employee).get(handle_list_employees),
        )
        .route(
            "/api/employees/{employee_id}/status",
            put(handle_set_employee_status),
        )
        .route("/api/leads", get(handle_list_leads).post(handle_create_lead))
        .route("/api/leads/my-leads", get(handle_my_leads))
        .route("/api/leads/scheduled", get(handle_scheduled_leads))
        .route("/api/leads/upload-csv", post(handle_upload_csv))
        .route("/api/leads/{lead_id}", put(handle_update_lead))
        .route("/api/leads/{lead_id}/assign", put(handle_reassign_lead))
        .route("/api/activities/recent", get(handle_recent_activities))
        .route("/api/activities/my-activities", get(handle_my_activities))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Lead Desk Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
