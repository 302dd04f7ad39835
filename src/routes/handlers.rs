use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::http::app::AppState;
use crate::http::openapi::API_VERSION;
use crate::scheduler::JobInfo;
use crate::settings::Settings;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub project: String,
    pub version: String,
    pub mode: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JobsResponse {
    /// Whether the scheduler stopped accepting work.
    pub closed: bool,
    pub jobs: Vec<JobInfo>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        project: state.settings.project_name.clone(),
        version: API_VERSION.to_string(),
        mode: state.settings.api_mode.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/jobs",
    tag = "jobs",
    responses((status = 200, description = "Scheduled background jobs", body = JobsResponse))
)]
pub async fn list_jobs(State(state): State<AppState>) -> Json<JobsResponse> {
    Json(JobsResponse {
        closed: state.scheduler.is_closed(),
        jobs: state.scheduler.jobs(),
    })
}

pub async fn openapi(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(state.openapi.as_ref().clone())
}

pub async fn debug_settings(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.as_ref().clone())
}
