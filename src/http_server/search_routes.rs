//! Search HTTP Routes
//!
//! One POST endpoint per consistency mode. The engine's response body is
//! returned as-is.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};

use crate::observability::Event;
use crate::search::{RawSearchRequest, SearchMode};

use super::errors::HttpResult;
use super::server::AppState;

/// Create search routes
pub fn search_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/products_only", post(products_only_handler))
        .route("/products_with_aggs", post(products_with_aggs_handler))
        .route(
            "/products_with_filtered_aggs",
            post(products_with_filtered_aggs_handler),
        )
        .with_state(state)
}

async fn products_only_handler(State(state): State<Arc<AppState>>, body: String) -> HttpResult<Response> {
    run_search(&state, SearchMode::ProductsOnly, &body).await
}

async fn products_with_aggs_handler(
    State(state): State<Arc<AppState>>,
    body: String,
) -> HttpResult<Response> {
    run_search(&state, SearchMode::ProductsWithAggs, &body).await
}

async fn products_with_filtered_aggs_handler(
    State(state): State<Arc<AppState>>,
    body: String,
) -> HttpResult<Response> {
    run_search(&state, SearchMode::ProductsWithFilteredAggs, &body).await
}

/// Parse, plan, execute. Rejections never reach the engine.
async fn run_search(state: &AppState, mode: SearchMode, body: &str) -> HttpResult<Response> {
    let planned = RawSearchRequest::parse(body).and_then(|raw| state.planner.plan_raw(raw, mode));
    let plan = match planned {
        Ok(plan) => plan,
        Err(e) => {
            state.metrics.record_rejected();
            tracing::info!(
                event = %Event::SearchRejected,
                %mode,
                code = e.code().code(),
                reason = e.message(),
                "search rejected"
            );
            return Err(e.into());
        }
    };

    tracing::debug!(
        event = %Event::SearchPlanned,
        %mode,
        from = plan.from,
        aggregations = plan.aggregations.len(),
        post_filter = plan.post_filter.is_some(),
        "search planned"
    );

    match state.executor.execute(&plan).await {
        Ok(response) => {
            state.metrics.record_executed(mode);
            Ok(([(header::CONTENT_TYPE, "application/json")], response.body).into_response())
        }
        Err(e) => {
            state.metrics.record_failed();
            Err(e.into())
        }
    }
}
