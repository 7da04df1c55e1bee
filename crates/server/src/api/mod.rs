//! Domain-focused API endpoint modules.
//!
//! Each sub-module owns a single responsibility area. Shared types live
//! here in mod.rs.

mod cluster;
pub mod doc;
mod health;
mod mds;
mod pca;
mod pcp;

#[cfg(test)]
pub(crate) mod test_support;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

// ── Shared types ─────────────────────────────────────────────────

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// 400 with a descriptive message, for invalid request parameters.
pub(crate) fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// ── Re-exports ───────────────────────────────────────────────────
// Preserves flat `api::foo` import paths used by route registration.

pub use cluster::{cluster_elbow, cluster_set_k};
pub use health::{health, stats};
pub use mds::{mds_points, mds_variables};
pub use pca::{pca_biplot, pca_scatterplot, pca_scree};
pub use pcp::pcp_data;
