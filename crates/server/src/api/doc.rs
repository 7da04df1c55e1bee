//! OpenAPI documentation aggregator.
//!
//! Collects all `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into a single OpenAPI spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "vizlab API",
        version = "0.1.0",
        description = "Read-only analytics backend: PCA, K-means clustering with automatic cluster-count selection, and multidimensional scaling over a fixed dataset.",
    ),
    tags(
        (name = "Health", description = "Server readiness and dataset summary"),
        (name = "PCA", description = "Scree, biplot, and top-attribute scatterplot data"),
        (name = "Cluster", description = "Elbow sweep and runtime cluster-count adjustment"),
        (name = "MDS", description = "Data-point and variable embeddings"),
        (name = "PCP", description = "Parallel-coordinates records"),
    ),
    paths(
        // Health
        crate::api::health::health,
        crate::api::health::stats,
        // PCA
        crate::api::pca::pca_scree,
        crate::api::pca::pca_biplot,
        crate::api::pca::pca_scatterplot,
        // Cluster
        crate::api::cluster::cluster_elbow,
        crate::api::cluster::cluster_set_k,
        // MDS
        crate::api::mds::mds_points,
        crate::api::mds::mds_variables,
        // PCP
        crate::api::pcp::pcp_data,
    )
)]
pub struct ApiDoc;
