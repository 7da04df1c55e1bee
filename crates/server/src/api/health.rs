//! Health and dataset summary endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub rows: usize,
    pub columns: usize,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: "0.1.0",
        rows: state.standardized.n_rows(),
        columns: state.standardized.n_cols(),
    })
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StatsResponse {
    pub rows: usize,
    pub feature_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub current_k: usize,
    pub max_k: usize,
}

/// Dataset summary and the currently active cluster count.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Health",
    responses(
        (status = 200, description = "Dataset summary", body = StatsResponse)
    )
)]
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let clustering = state.clustering.read().await;
    Json(StatsResponse {
        rows: state.standardized.n_rows(),
        feature_columns: state.standardized.column_names().to_vec(),
        categorical_columns: state.dataset.categorical_columns.clone(),
        current_k: clustering.k,
        max_k: state.max_k,
    })
}
