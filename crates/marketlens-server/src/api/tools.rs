//! Tool contract consumed by conversational hosts that embed the carousel
//! widget. Failures travel in the body with HTTP 200 so the host can show
//! them next to the query.

use axum::{extract::State, http::StatusCode, Extension, Json};
use marketlens_core::Product;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct ToolRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(super) enum ToolResponse {
    Results {
        query: String,
        products: Vec<Product>,
        total: usize,
    },
    Failure {
        query: String,
        error: String,
    },
}

/// `POST /api/tools/search_products` with `{ "query": "<text>" }`.
pub(super) async fn search_products_tool(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<ToolRequest>,
) -> (StatusCode, Json<ToolResponse>) {
    let query = request.query.trim().to_owned();
    if query.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ToolResponse::Failure {
                query,
                error: "query must not be empty".to_owned(),
            }),
        );
    }

    match state.client.search_products(&query, state.window).await {
        Ok(results) => (
            StatusCode::OK,
            Json(ToolResponse::Results {
                total: results.total(),
                query: results.query,
                products: results.products,
            }),
        ),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, query = %query, error = %e, "tool search failed");
            (
                StatusCode::OK,
                Json(ToolResponse::Failure {
                    query,
                    error: e.to_string(),
                }),
            )
        }
    }
}
