use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use interno::domain::{
    ApplicationDraft, ApplicationId, ApplicationPatch, CompanyId, InternId, InterviewId,
    InterviewKind, InterviewPatch, JobId, JobPatch, NewJob, ProfilePatch, SavedListingId,
};

use crate::infra::{AppState, BoardError, BoardStore};

const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub(crate) fn board_router(board: Arc<BoardStore>) -> Router {
    Router::new()
        .route("/api/v1/jobs", get(jobs_index).post(jobs_create))
        .route("/api/v1/jobs/:job_id", patch(jobs_update).delete(jobs_delete))
        .route("/api/v1/applications", get(applications_index))
        .route(
            "/api/v1/applications/:application_id",
            patch(applications_update).delete(applications_delete),
        )
        .route(
            "/api/v1/applications/:application_id/interviews",
            get(interviews_index).post(interviews_create),
        )
        .route("/api/v1/interviews/:interview_id", patch(interviews_update))
        .route("/api/v1/listings", get(listings_index))
        .route("/api/v1/listings/:job_id", get(listings_show))
        .route("/api/v1/listings/:job_id/applications", post(listings_apply))
        .route(
            "/api/v1/interns/:intern_id/profile",
            get(profile_show).patch(profile_update),
        )
        .route("/api/v1/interns/:intern_id/saved", post(saved_create))
        .route(
            "/api/v1/interns/:intern_id/saved/:saved_id",
            delete(saved_delete),
        )
        .route("/api/v1/session", get(session_show))
        .route(
            "/api/v1/uploads",
            post(uploads_create).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(board)
}

pub(crate) fn with_ops_routes(router: Router) -> Router {
    router
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

fn reject(err: BoardError) -> Response {
    let status = match &err {
        BoardError::NotFound { .. } => StatusCode::NOT_FOUND,
        BoardError::DuplicateApplication => StatusCode::CONFLICT,
        BoardError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct CompanyQuery {
    pub(crate) company_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadQuery {
    pub(crate) filename: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InterviewRequest {
    pub(crate) scheduled_at: DateTime<Utc>,
    pub(crate) duration_minutes: u16,
    pub(crate) kind: InterviewKind,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SaveListingRequest {
    pub(crate) job_id: JobId,
}

async fn jobs_index(
    State(board): State<Arc<BoardStore>>,
    Query(query): Query<CompanyQuery>,
) -> Response {
    let jobs = board.jobs_for(&CompanyId(query.company_id));
    Json(jobs).into_response()
}

async fn jobs_create(State(board): State<Arc<BoardStore>>, Json(draft): Json<NewJob>) -> Response {
    let job = board.create_job(draft);
    (StatusCode::CREATED, Json(job)).into_response()
}

async fn jobs_update(
    State(board): State<Arc<BoardStore>>,
    Path(job_id): Path<String>,
    Json(patch): Json<JobPatch>,
) -> Response {
    match board.update_job(&JobId(job_id), &patch) {
        Ok(job) => Json(job).into_response(),
        Err(err) => reject(err),
    }
}

async fn jobs_delete(State(board): State<Arc<BoardStore>>, Path(job_id): Path<String>) -> Response {
    match board.delete_job(&JobId(job_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => reject(err),
    }
}

async fn applications_index(
    State(board): State<Arc<BoardStore>>,
    Query(query): Query<CompanyQuery>,
) -> Response {
    let details = board.company_applications(&CompanyId(query.company_id));
    Json(details).into_response()
}

async fn applications_update(
    State(board): State<Arc<BoardStore>>,
    Path(application_id): Path<String>,
    Json(patch): Json<ApplicationPatch>,
) -> Response {
    match board.update_application(&ApplicationId(application_id), &patch) {
        Ok(application) => Json(application).into_response(),
        Err(err) => reject(err),
    }
}

async fn applications_delete(
    State(board): State<Arc<BoardStore>>,
    Path(application_id): Path<String>,
) -> Response {
    match board.delete_application(&ApplicationId(application_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => reject(err),
    }
}

async fn interviews_index(
    State(board): State<Arc<BoardStore>>,
    Path(application_id): Path<String>,
) -> Response {
    Json(board.interviews_for(&ApplicationId(application_id))).into_response()
}

async fn interviews_create(
    State(board): State<Arc<BoardStore>>,
    Path(application_id): Path<String>,
    Json(request): Json<InterviewRequest>,
) -> Response {
    match board.create_interview(
        &ApplicationId(application_id),
        request.scheduled_at,
        request.duration_minutes,
        request.kind,
    ) {
        Ok(interview) => (StatusCode::CREATED, Json(interview)).into_response(),
        Err(err) => reject(err),
    }
}

async fn interviews_update(
    State(board): State<Arc<BoardStore>>,
    Path(interview_id): Path<String>,
    Json(patch): Json<InterviewPatch>,
) -> Response {
    match board.update_interview(&InterviewId(interview_id), &patch) {
        Ok(interview) => Json(interview).into_response(),
        Err(err) => reject(err),
    }
}

async fn listings_index(State(board): State<Arc<BoardStore>>) -> Response {
    Json(board.listings()).into_response()
}

async fn listings_show(
    State(board): State<Arc<BoardStore>>,
    Path(job_id): Path<String>,
) -> Response {
    match board.view_listing(&JobId(job_id)) {
        Ok(listing) => Json(listing).into_response(),
        Err(err) => reject(err),
    }
}

async fn listings_apply(
    State(board): State<Arc<BoardStore>>,
    Path(job_id): Path<String>,
    Json(draft): Json<ApplicationDraft>,
) -> Response {
    match board.submit_application(&JobId(job_id), &draft) {
        Ok(application) => (StatusCode::CREATED, Json(application)).into_response(),
        Err(err) => reject(err),
    }
}

async fn profile_show(
    State(board): State<Arc<BoardStore>>,
    Path(intern_id): Path<String>,
) -> Response {
    match board.profile(&InternId(intern_id)) {
        Ok(profile) => Json(profile).into_response(),
        Err(err) => reject(err),
    }
}

async fn profile_update(
    State(board): State<Arc<BoardStore>>,
    Path(intern_id): Path<String>,
    Json(patch): Json<ProfilePatch>,
) -> Response {
    match board.update_profile(&InternId(intern_id), &patch) {
        Ok(profile) => Json(profile).into_response(),
        Err(err) => reject(err),
    }
}

async fn saved_create(
    State(board): State<Arc<BoardStore>>,
    Path(intern_id): Path<String>,
    Json(request): Json<SaveListingRequest>,
) -> Response {
    match board.save_listing(&InternId(intern_id), &request.job_id) {
        Ok(saved) => (StatusCode::CREATED, Json(saved)).into_response(),
        Err(err) => reject(err),
    }
}

async fn saved_delete(
    State(board): State<Arc<BoardStore>>,
    Path((intern_id, saved_id)): Path<(String, String)>,
) -> Response {
    match board.remove_saved(&InternId(intern_id), &SavedListingId(saved_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => reject(err),
    }
}

async fn session_show(State(board): State<Arc<BoardStore>>) -> Response {
    match board.session() {
        Some(user) => Json(user).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no active session" })),
        )
            .into_response(),
    }
}

async fn uploads_create(
    State(board): State<Arc<BoardStore>>,
    Query(query): Query<UploadQuery>,
    body: axum::body::Bytes,
) -> Response {
    if body.is_empty() {
        return reject(BoardError::Invalid("upload body must not be empty"));
    }
    match board.store_upload(&query.filename) {
        Ok(url) => (StatusCode::CREATED, Json(json!({ "url": url }))).into_response(),
        Err(err) => reject(err),
    }
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
