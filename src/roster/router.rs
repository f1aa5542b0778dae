use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::RosterError;
use super::import::{parse_roster, roster_template};
use super::repository::RosterStore;

/// Router builder exposing roster listing, CSV import, and the template
/// download.
pub fn roster_router<S>(store: Arc<S>) -> Router
where
    S: RosterStore + 'static,
{
    Router::new()
        .route("/api/v1/roster/template", get(template_handler))
        .route("/api/v1/roster/:employer_id", get(list_handler::<S>))
        .route(
            "/api/v1/roster/:employer_id/import",
            post(import_handler::<S>),
        )
        .with_state(store)
}

pub(crate) async fn list_handler<S>(
    State(store): State<Arc<S>>,
    Path(employer_id): Path<String>,
) -> Response
where
    S: RosterStore + 'static,
{
    match store.list(&employer_id) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => roster_error_response(error),
    }
}

pub(crate) async fn import_handler<S>(
    State(store): State<Arc<S>>,
    Path(employer_id): Path<String>,
    body: String,
) -> Response
where
    S: RosterStore + 'static,
{
    let records = match parse_roster(body.as_bytes()) {
        Ok(records) => records,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    let mut imported = 0usize;
    for record in records {
        match store.create(&employer_id, record) {
            Ok(_) => imported += 1,
            Err(RosterError::Duplicate(id)) => {
                let payload = json!({
                    "error": format!("employee {id} is already on the roster"),
                    "imported": imported,
                });
                return (StatusCode::CONFLICT, axum::Json(payload)).into_response();
            }
            Err(error) => return roster_error_response(error),
        }
    }

    (
        StatusCode::CREATED,
        axum::Json(json!({ "imported": imported })),
    )
        .into_response()
}

pub(crate) async fn template_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/csv")],
        roster_template(),
    )
}

fn roster_error_response(error: RosterError) -> Response {
    let status = match &error {
        RosterError::Duplicate(_) => StatusCode::CONFLICT,
        RosterError::UnknownEmployee(_) => StatusCode::NOT_FOUND,
        RosterError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
