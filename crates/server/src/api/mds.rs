//! MDS endpoints: the data-point embedding and the variable embedding.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct MdsPoint {
    pub x: f64,
    pub y: f64,
    pub cluster: usize,
}

/// Euclidean MDS embedding of the standardized rows, labeled with the
/// current shared clustering.
#[utoipa::path(
    get,
    path = "/mds/points",
    tag = "MDS",
    responses(
        (status = 200, description = "Embedded data points", body = Vec<MdsPoint>)
    )
)]
pub async fn mds_points(State(state): State<Arc<AppState>>) -> Json<Vec<MdsPoint>> {
    let clustering = state.clustering.read().await;
    let points = state
        .mds_points
        .coords
        .iter()
        .zip(clustering.labels.iter())
        .map(|(coord, &cluster)| MdsPoint {
            x: coord[0],
            y: coord[1],
            cluster,
        })
        .collect();
    Json(points)
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MdsVariable {
    pub x: f64,
    pub y: f64,
    pub variable: String,
}

/// SMACOF embedding of the feature columns under the 1 - |corr| distance.
#[utoipa::path(
    get,
    path = "/mds/variables",
    tag = "MDS",
    responses(
        (status = 200, description = "Embedded variables", body = Vec<MdsVariable>)
    )
)]
pub async fn mds_variables(State(state): State<Arc<AppState>>) -> Json<Vec<MdsVariable>> {
    let variables = state
        .mds_variables
        .coords
        .iter()
        .zip(state.standardized.column_names().iter())
        .map(|(coord, name)| MdsVariable {
            x: coord[0],
            y: coord[1],
            variable: name.clone(),
        })
        .collect();
    Json(variables)
}
