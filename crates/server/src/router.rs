//! HTTP router construction.
//!
//! Assembles all Axum routes, middleware, and OpenAPI docs into a single `Router`.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

/// Build the complete application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/stats", get(api::stats))
        .route("/pca/scree", get(api::pca_scree))
        .route("/pca/biplot", get(api::pca_biplot))
        .route("/pca/scatterplot", get(api::pca_scatterplot))
        .route("/cluster/elbow", get(api::cluster_elbow))
        .route("/cluster/k", post(api::cluster_set_k))
        .route("/mds/points", get(api::mds_points))
        .route("/mds/variables", get(api::mds_variables))
        .route("/pcp/data", get(api::pcp_data))
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}
