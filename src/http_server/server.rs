//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::CatalogIndexer;
use crate::config::AppConfig;
use crate::executor::{ElasticsearchExecutor, EngineClient, QueryExecutor};
use crate::observability::{Event, SearchMetrics};
use crate::search::SearchPlanner;

use super::admin_routes::admin_routes;
use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes};
use super::search_routes::search_routes;

/// State shared by all handlers
pub struct AppState {
    pub planner: SearchPlanner,
    pub executor: Arc<dyn QueryExecutor>,
    pub indexer: Arc<CatalogIndexer>,
    pub metrics: Arc<SearchMetrics>,
    /// Used when `numberOfProducts` is missing or not positive
    pub default_product_count: usize,
}

impl AppState {
    /// Wires the Elasticsearch-backed executor and indexer from configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let client = EngineClient::new(config.elasticsearch_url.clone());
        let metrics = Arc::new(SearchMetrics::new());
        let executor = ElasticsearchExecutor::new(client.clone(), config.index.clone());
        let indexer = CatalogIndexer::new(client, config.index.clone(), Arc::clone(&metrics))
            .with_max_bulk_bytes(config.max_bulk_size_bytes);

        Self {
            planner: SearchPlanner::new(config.page_size),
            executor: Arc::new(executor),
            indexer: Arc::new(indexer),
            metrics,
            default_product_count: config.default_product_count,
        }
    }

    /// Resolves the admin product count; non-positive means default
    pub fn product_count(&self, requested: i64) -> usize {
        if requested <= 0 {
            self.default_product_count
        } else {
            requested as usize
        }
    }
}

/// HTTP server for the search API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server from the full application configuration
    pub fn from_app_config(config: &AppConfig) -> Self {
        let state = Arc::new(AppState::from_config(config));
        Self::with_state(config.http.clone(), state)
    }

    /// Create a server around existing state
    pub fn with_state(config: HttpServerConfig, state: Arc<AppState>) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(event = %Event::Serving, %addr, "search API listening");
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router(config: &HttpServerConfig, state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health_routes())
        .nest("/search", search_routes(Arc::clone(&state)))
        .nest("/admin", admin_routes(Arc::clone(&state)))
        .nest("/observability", observability_routes(state))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
