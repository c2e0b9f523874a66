mod products;
mod tools;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use marketlens_core::{AppConfig, Product};
use marketlens_upstream::{SearchClient, SearchResults, SearchWindow, UpstreamError, UpstreamSettings};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<SearchClient>,
    /// Query used when a request does not name one.
    pub default_query: String,
    pub window: SearchWindow,
}

impl AppState {
    /// Builds the upstream client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] if the HTTP client cannot be built or the
    /// configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, UpstreamError> {
        let client = SearchClient::new(&UpstreamSettings::from_app_config(config))?;
        Ok(Self {
            client: Arc::new(client),
            default_query: config.default_query.clone(),
            window: SearchWindow::first(config.page_size),
        })
    }
}

/// Body of the search endpoint.
///
/// `query` is always echoed so an empty `products` list reads as "no
/// results for this query".
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total: usize,
    pub products: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResponse {
    pub(super) fn found(results: SearchResults) -> Self {
        Self {
            total: results.total(),
            query: results.query,
            products: results.products,
            error: None,
        }
    }

    pub(super) fn failed(query: String, error: &UpstreamError) -> Self {
        Self {
            query,
            total: 0,
            products: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/products", get(products::search_products))
        .route("/api/tools/search_products", post(tools::search_products_tool))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthData {
            status: "ok",
            timestamp: Utc::now(),
        }),
    )
}
