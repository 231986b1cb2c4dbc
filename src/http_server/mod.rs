//! # shopsearch HTTP Server Module
//!
//! Axum server exposing the faceted search API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/search/products_only` - hits only
//! - `/search/products_with_aggs` - hits plus flat facet counts
//! - `/search/products_with_filtered_aggs` - hits plus cross-filtered facet counts
//! - `/admin/index_data` - regenerate the product index
//! - `/admin/configure_synonyms` - replace synonym rules
//! - `/observability/*` - Health and metrics

mod admin_routes;
pub mod config;
mod errors;
mod observability_routes;
mod search_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ErrorResponse, HttpError, HttpResult};
pub use server::{build_router, AppState, HttpServer};
