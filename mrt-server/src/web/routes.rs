//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Local;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::data::{RailwaySnapshot, SnapshotError};
use crate::domain::parse_timestamp;
use crate::planner::{OrderBy, Planner, SearchConfig, SearchError, SearchRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search", get(search_routes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Find the shortest routes between two stations.
///
/// Query failures are reported in the response body with status 200.
/// Only a broken snapshot produces an error status.
async fn search_routes(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let snapshot = state.snapshots.get().await?;
    let response = plan(&snapshot, &state.config, &query)?;

    info!(
        from = %query.from,
        to = %query.to,
        result = ?response.result,
        description = %response.description,
        "Route search"
    );
    Ok(Json(response))
}

fn plan(
    snapshot: &RailwaySnapshot,
    config: &SearchConfig,
    query: &SearchQuery,
) -> Result<SearchResponse, AppError> {
    let departure = match query.time.as_deref().map(str::trim) {
        Some(time) if !time.is_empty() => match parse_timestamp(time) {
            Ok(departure) => departure,
            Err(_) => {
                return Ok(SearchResponse::failed(format!(
                    "{time} is not a valid time, expected YYYY-MM-DD HH:MM"
                )));
            }
        },
        _ => Local::now().naive_local(),
    };

    let order_by = match query.order_by.as_deref().map(str::trim) {
        Some(order_by) if !order_by.is_empty() => match order_by.parse::<OrderBy>() {
            Ok(order_by) => order_by,
            Err(e) => return Ok(SearchResponse::failed(e.to_string())),
        },
        _ => OrderBy::default(),
    };

    let request = SearchRequest::new(
        title_case(&query.from),
        title_case(&query.to),
        departure,
        order_by,
    );
    let planner = Planner::new(&snapshot.network, &snapshot.costs, config);

    match planner.search(&request) {
        Ok(result) => Ok(SearchResponse::success(&result)),
        Err(e) if e.is_config() => Err(e.into()),
        Err(e) => Ok(SearchResponse::failed(e.to_string())),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl From<Arc<SnapshotError>> for AppError {
    fn from(e: Arc<SnapshotError>) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
