use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::draft::{DraftUpdate, DraftView};
use super::repository::{
    DraftId, DraftRecord, DraftRepository, EnrollmentGateway, EnrollmentReceipt, RepositoryError,
};
use super::service::{EnrollmentService, EnrollmentServiceError};
use crate::roster::RosterStore;

/// Router builder exposing the wizard over HTTP.
pub fn enrollment_router<R, S, G>(service: Arc<EnrollmentService<R, S, G>>) -> Router
where
    R: DraftRepository + 'static,
    S: RosterStore + 'static,
    G: EnrollmentGateway + 'static,
{
    Router::new()
        .route("/api/v1/enrollment/drafts", post(start_handler::<R, S, G>))
        .route(
            "/api/v1/enrollment/drafts/:draft_id",
            get(view_handler::<R, S, G>),
        )
        .route(
            "/api/v1/enrollment/drafts/:draft_id/update",
            post(update_handler::<R, S, G>),
        )
        .route(
            "/api/v1/enrollment/drafts/:draft_id/advance",
            post(advance_handler::<R, S, G>),
        )
        .route(
            "/api/v1/enrollment/drafts/:draft_id/back",
            post(back_handler::<R, S, G>),
        )
        .route(
            "/api/v1/enrollment/drafts/:draft_id/quote",
            get(quote_handler::<R, S, G>),
        )
        .route(
            "/api/v1/enrollment/drafts/:draft_id/submit",
            post(submit_handler::<R, S, G>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartDraftRequest {
    pub(crate) employer_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DraftEnvelope {
    pub(crate) id: DraftId,
    pub(crate) draft: DraftView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) receipt: Option<EnrollmentReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) last_failure: Option<String>,
}

fn envelope(record: DraftRecord) -> DraftEnvelope {
    DraftEnvelope {
        id: record.id,
        draft: record.draft.to_view(),
        receipt: record.receipt,
        last_failure: record.last_failure,
    }
}

fn error_response(error: EnrollmentServiceError) -> Response {
    let status = match &error {
        EnrollmentServiceError::Wizard(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EnrollmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        EnrollmentServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        EnrollmentServiceError::Repository(RepositoryError::Unavailable(_))
        | EnrollmentServiceError::Roster(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EnrollmentServiceError::Gateway(_) => StatusCode::BAD_GATEWAY,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn start_handler<R, S, G>(
    State(service): State<Arc<EnrollmentService<R, S, G>>>,
    axum::Json(request): axum::Json<StartDraftRequest>,
) -> Response
where
    R: DraftRepository + 'static,
    S: RosterStore + 'static,
    G: EnrollmentGateway + 'static,
{
    match service.start(&request.employer_id) {
        Ok(record) => (StatusCode::CREATED, axum::Json(envelope(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn view_handler<R, S, G>(
    State(service): State<Arc<EnrollmentService<R, S, G>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
    S: RosterStore + 'static,
    G: EnrollmentGateway + 'static,
{
    match service.get(&DraftId(draft_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_handler<R, S, G>(
    State(service): State<Arc<EnrollmentService<R, S, G>>>,
    Path(draft_id): Path<String>,
    axum::Json(update): axum::Json<DraftUpdate>,
) -> Response
where
    R: DraftRepository + 'static,
    S: RosterStore + 'static,
    G: EnrollmentGateway + 'static,
{
    match service.update(&DraftId(draft_id), update) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn advance_handler<R, S, G>(
    State(service): State<Arc<EnrollmentService<R, S, G>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
    S: RosterStore + 'static,
    G: EnrollmentGateway + 'static,
{
    match service.advance(&DraftId(draft_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn back_handler<R, S, G>(
    State(service): State<Arc<EnrollmentService<R, S, G>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
    S: RosterStore + 'static,
    G: EnrollmentGateway + 'static,
{
    match service.back(&DraftId(draft_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(envelope(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn quote_handler<R, S, G>(
    State(service): State<Arc<EnrollmentService<R, S, G>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
    S: RosterStore + 'static,
    G: EnrollmentGateway + 'static,
{
    match service.quote(&DraftId(draft_id)) {
        Ok(breakdown) => (StatusCode::OK, axum::Json(breakdown)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R, S, G>(
    State(service): State<Arc<EnrollmentService<R, S, G>>>,
    Path(draft_id): Path<String>,
) -> Response
where
    R: DraftRepository + 'static,
    S: RosterStore + 'static,
    G: EnrollmentGateway + 'static,
{
    match service.submit(&DraftId(draft_id)).await {
        Ok(record) => (StatusCode::OK, axum::Json(envelope(record))).into_response(),
        Err(error) => error_response(error),
    }
}
