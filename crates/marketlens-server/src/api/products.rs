use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{AppState, SearchResponse};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
}

/// `GET /api/products?q=<text>`. A missing or blank `q` searches the
/// configured default query.
pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> (StatusCode, Json<SearchResponse>) {
    let text = query
        .q
        .map(|q| q.trim().to_owned())
        .filter(|q| !q.is_empty())
        .unwrap_or_else(|| state.default_query.clone());

    match state.client.search_products(&text, state.window).await {
        Ok(results) => (StatusCode::OK, Json(SearchResponse::found(results))),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, query = %text, error = %e, "product search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse::failed(text, &e)),
            )
        }
    }
}
