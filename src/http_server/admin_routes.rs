//! Admin HTTP Routes
//!
//! Catalog maintenance: regenerate the product index and update synonyms.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::catalog::IndexingReport;

use super::errors::HttpResult;
use super::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct IndexDataParams {
    #[serde(rename = "numberOfProducts", default)]
    pub number_of_products: i64,
}

#[derive(Debug, Deserialize)]
pub struct SynonymsRequest {
    #[serde(default)]
    pub synonyms: String,
}

#[derive(Debug, Serialize)]
pub struct SynonymsResponse {
    pub rules: usize,
}

/// Create admin routes
pub fn admin_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/index_data", post(index_data_handler))
        .route("/configure_synonyms", post(configure_synonyms_handler))
        .with_state(state)
}

async fn index_data_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndexDataParams>,
) -> HttpResult<Json<IndexingReport>> {
    let count = state.product_count(params.number_of_products);
    let report = state.indexer.index_products(count).await?;
    Ok(Json(report))
}

async fn configure_synonyms_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SynonymsRequest>,
) -> HttpResult<Json<SynonymsResponse>> {
    let rules = state.indexer.configure_synonyms(&request.synonyms).await?;
    Ok(Json(SynonymsResponse { rules }))
}
