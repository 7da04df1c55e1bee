//! PCA endpoints: scree data, biplot, and top-attribute scatterplot.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use vizlab_analytics::KMeansConfig;
use vizlab_core::Matrix;

use crate::state::AppState;

use super::{bad_request, ErrorResponse};

// ── Scree ────────────────────────────────────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
pub struct ScreeResponse {
    pub eigenvalues: Vec<f64>,
    pub explained_variance_ratio: Vec<f64>,
}

/// Eigenvalues for the scree plot, descending.
#[utoipa::path(
    get,
    path = "/pca/scree",
    tag = "PCA",
    responses(
        (status = 200, description = "Explained variance per component", body = ScreeResponse)
    )
)]
pub async fn pca_scree(State(state): State<Arc<AppState>>) -> Json<ScreeResponse> {
    Json(ScreeResponse {
        eigenvalues: state.pca.eigenvalues().to_vec(),
        explained_variance_ratio: state.pca.explained_variance_ratio(),
    })
}

// ── Biplot ───────────────────────────────────────────────────────

#[derive(Deserialize, utoipa::IntoParams)]
pub struct BiplotParams {
    /// Principal component on the x axis (default 0).
    pub comp1: Option<usize>,
    /// Principal component on the y axis (default 1).
    pub comp2: Option<usize>,
    /// Cluster count used to color the points (default 3).
    pub k: Option<usize>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BiplotPoint {
    pub x: f64,
    pub y: f64,
    pub cluster: usize,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct FeatureVector {
    pub feature: String,
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub length: f64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BiplotResponse {
    pub points: Vec<BiplotPoint>,
    pub feature_vectors: Vec<FeatureVector>,
}

/// Projected points clustered in the selected component plane, plus the
/// loading vector of every feature in that plane.
#[utoipa::path(
    get,
    path = "/pca/biplot",
    tag = "PCA",
    params(BiplotParams),
    responses(
        (status = 200, description = "Biplot data", body = BiplotResponse),
        (status = 400, description = "Invalid component index or k", body = ErrorResponse)
    )
)]
pub async fn pca_biplot(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BiplotParams>,
) -> Result<Json<BiplotResponse>, (StatusCode, Json<ErrorResponse>)> {
    let comp1 = params.comp1.unwrap_or(0);
    let comp2 = params.comp2.unwrap_or(1);
    let k = params.k.unwrap_or(3);

    let (plane, labels) = cluster_component_plane(&state, comp1, comp2, k)?;

    let components = state.pca.components();
    let feature_vectors = state
        .standardized
        .column_names()
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let dx = components[comp1][i];
            let dy = components[comp2][i];
            FeatureVector {
                feature: feature.clone(),
                x: 0.0,
                y: 0.0,
                dx,
                dy,
                length: (dx * dx + dy * dy).sqrt(),
            }
        })
        .collect();

    let points = plane
        .rows()
        .iter()
        .zip(labels.iter())
        .map(|(row, &cluster)| BiplotPoint {
            x: row[0],
            y: row[1],
            cluster,
        })
        .collect();

    Ok(Json(BiplotResponse {
        points,
        feature_vectors,
    }))
}

// ── Scatterplot ──────────────────────────────────────────────────

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ScatterplotParams {
    pub comp1: Option<usize>,
    pub comp2: Option<usize>,
    pub k: Option<usize>,
    /// Number of leading components the attribute ranking sums over
    /// (default 2, clamped to the component count).
    pub di: Option<usize>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ScatterplotResponse {
    pub top_attributes: Vec<String>,
    pub squared_sums: Vec<f64>,
    pub scatter_data: Vec<Vec<f64>>,
    pub cluster: Vec<usize>,
}

/// The four attributes with the highest squared loading sums over the top
/// `di` components, their raw values, and fresh cluster labels.
#[utoipa::path(
    get,
    path = "/pca/scatterplot",
    tag = "PCA",
    params(ScatterplotParams),
    responses(
        (status = 200, description = "Scatterplot matrix data", body = ScatterplotResponse),
        (status = 400, description = "Invalid component index or k", body = ErrorResponse)
    )
)]
pub async fn pca_scatterplot(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScatterplotParams>,
) -> Result<Json<ScatterplotResponse>, (StatusCode, Json<ErrorResponse>)> {
    let comp1 = params.comp1.unwrap_or(0);
    let comp2 = params.comp2.unwrap_or(1);
    let k = params.k.unwrap_or(3);
    let di = params.di.unwrap_or(2).clamp(1, state.pca.n_components());

    let (_, labels) = cluster_component_plane(&state, comp1, comp2, k)?;

    let sums = state.pca.squared_loading_sums(di);
    let mut indices: Vec<usize> = (0..sums.len()).collect();
    indices.sort_by(|&a, &b| {
        sums[b]
            .partial_cmp(&sums[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(4);

    let top_attributes = indices
        .iter()
        .map(|&i| state.dataset.features.column_names()[i].clone())
        .collect();
    let squared_sums = indices.iter().map(|&i| sums[i]).collect();
    let scatter_data = state
        .dataset
        .features
        .select_columns(&indices)
        .map_err(|e| bad_request(e.to_string()))?
        .rows()
        .to_vec();

    Ok(Json(ScatterplotResponse {
        top_attributes,
        squared_sums,
        scatter_data,
        cluster: labels,
    }))
}

// ── Helpers ──────────────────────────────────────────────────────

/// Select two projection columns and cluster the rows within that plane.
fn cluster_component_plane(
    state: &AppState,
    comp1: usize,
    comp2: usize,
    k: usize,
) -> Result<(Matrix, Vec<usize>), (StatusCode, Json<ErrorResponse>)> {
    let n_components = state.pca.n_components();
    if comp1 >= n_components || comp2 >= n_components {
        return Err(bad_request(format!(
            "component index out of range (have {} components)",
            n_components
        )));
    }

    let plane = state
        .projection
        .select_columns(&[comp1, comp2])
        .map_err(|e| bad_request(e.to_string()))?;
    let fit = KMeansConfig::new(k)
        .fit(&plane)
        .map_err(|e| bad_request(e.to_string()))?;

    Ok((plane, fit.labels))
}
