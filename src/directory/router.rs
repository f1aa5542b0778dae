use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::catalog::DirectoryCatalog;
use super::domain::{BrokerListing, ProviderListing};

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    pub(crate) query: String,
}

/// Router builder exposing the provider and broker directories.
pub fn directory_router(catalog: Arc<DirectoryCatalog>) -> Router {
    Router::new()
        .route("/api/v1/directory/providers", get(providers_handler))
        .route("/api/v1/directory/brokers", get(brokers_handler))
        .with_state(catalog)
}

pub(crate) async fn providers_handler(
    State(catalog): State<Arc<DirectoryCatalog>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<ProviderListing>> {
    Json(catalog.providers(&params.query))
}

pub(crate) async fn brokers_handler(
    State(catalog): State<Arc<DirectoryCatalog>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<BrokerListing>> {
    Json(catalog.brokers(&params.query))
}
