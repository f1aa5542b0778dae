use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::center::{AutoResponder, MessageCenter};
use super::domain::MessagingError;

#[derive(Debug, Deserialize)]
pub(crate) struct SendMessageRequest {
    pub(crate) body: String,
}

/// Router builder exposing the contact list and message threads.
pub fn messaging_router<A>(center: Arc<MessageCenter<A>>) -> Router
where
    A: AutoResponder + 'static,
{
    Router::new()
        .route("/api/v1/messages", get(contacts_handler::<A>))
        .route(
            "/api/v1/messages/:contact_id",
            get(thread_handler::<A>).post(send_handler::<A>),
        )
        .with_state(center)
}

pub(crate) async fn contacts_handler<A>(State(center): State<Arc<MessageCenter<A>>>) -> Response
where
    A: AutoResponder + 'static,
{
    (StatusCode::OK, axum::Json(center.contacts())).into_response()
}

pub(crate) async fn thread_handler<A>(
    State(center): State<Arc<MessageCenter<A>>>,
    Path(contact_id): Path<String>,
) -> Response
where
    A: AutoResponder + 'static,
{
    match center.thread(&contact_id) {
        Ok(messages) => (StatusCode::OK, axum::Json(messages)).into_response(),
        Err(error) => messaging_error_response(error),
    }
}

pub(crate) async fn send_handler<A>(
    State(center): State<Arc<MessageCenter<A>>>,
    Path(contact_id): Path<String>,
    axum::Json(request): axum::Json<SendMessageRequest>,
) -> Response
where
    A: AutoResponder + 'static,
{
    match center.send(&contact_id, &request.body) {
        Ok(messages) => (StatusCode::CREATED, axum::Json(messages)).into_response(),
        Err(error) => messaging_error_response(error),
    }
}

fn messaging_error_response(error: MessagingError) -> Response {
    let status = match &error {
        MessagingError::ContactNotFound(_) => StatusCode::NOT_FOUND,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
