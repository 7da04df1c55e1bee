//! Cluster-count endpoints: the elbow sweep and runtime k adjustment.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use vizlab_analytics::{select_k, KMeansConfig};

use crate::state::{AppState, ClusterSnapshot};

use super::{bad_request, ErrorResponse};

// ── Elbow sweep ──────────────────────────────────────────────────

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ElbowParams {
    /// Principal component shown on the x axis (default 0).
    pub comp1: Option<usize>,
    /// Principal component shown on the y axis (default 1).
    pub comp2: Option<usize>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ElbowResponse {
    pub optimal_k: usize,
    pub mse_scores: Vec<f64>,
    pub k_values: Vec<usize>,
    pub columns: Vec<String>,
    pub selected_components: Vec<usize>,
}

/// Inertia sweep over k = 1..=max_k with automatic elbow selection.
///
/// Recomputed on every request: the shared cluster count is runtime
/// adjustable, so the curve must reflect the live data rather than a
/// startup-time cache.
#[utoipa::path(
    get,
    path = "/cluster/elbow",
    tag = "Cluster",
    params(ElbowParams),
    responses(
        (status = 200, description = "Selected k and the full inertia curve", body = ElbowResponse)
    )
)]
pub async fn cluster_elbow(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ElbowParams>,
) -> Result<Json<ElbowResponse>, (StatusCode, Json<ErrorResponse>)> {
    let comp1 = params.comp1.unwrap_or(0);
    let comp2 = params.comp2.unwrap_or(1);

    let selection = select_k(&state.projection, state.max_k)
        .map_err(|e| bad_request(e.to_string()))?;

    Ok(Json(ElbowResponse {
        optimal_k: selection.k,
        mse_scores: selection.inertia_curve,
        k_values: (1..=state.max_k).collect(),
        columns: state.standardized.column_names().to_vec(),
        selected_components: vec![comp1, comp2],
    }))
}

// ── Runtime k adjustment ─────────────────────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
pub struct SetKResponse {
    pub message: &'static str,
    pub new_k: usize,
}

/// Replace the shared clustering with a fresh k-cluster partition.
///
/// The new snapshot is built outside the lock and swapped in whole, so
/// concurrent readers never observe a partially updated assignment.
#[utoipa::path(
    post,
    path = "/cluster/k",
    tag = "Cluster",
    responses(
        (status = 200, description = "Cluster count updated", body = SetKResponse),
        (status = 400, description = "Invalid k value", body = ErrorResponse)
    )
)]
pub async fn cluster_set_k(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<SetKResponse>, (StatusCode, Json<ErrorResponse>)> {
    let k = match body.get("k").and_then(|v| v.as_u64()) {
        Some(k) if k >= 1 && (k as usize) <= state.standardized.n_rows() => k as usize,
        _ => return Err(bad_request("Invalid k value")),
    };

    let fit = KMeansConfig::new(k)
        .fit(&state.standardized)
        .map_err(|e| bad_request(e.to_string()))?;

    let mut clustering = state.clustering.write().await;
    *clustering = ClusterSnapshot {
        k: fit.k,
        labels: fit.labels,
        inertia: fit.inertia,
    };
    info!("Cluster count updated to k={} (inertia {:.2})", k, clustering.inertia);

    Ok(Json(SetKResponse {
        message: "Updated k value",
        new_k: k,
    }))
}
