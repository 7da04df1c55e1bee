use tokio::sync::RwLock;

use vizlab_analytics::{MdsEmbedding, Pca};
use vizlab_core::{Dataset, Matrix};

/// A complete cluster assignment for the dataset.
///
/// Never mutated in place: `POST /cluster/k` builds a fresh snapshot and
/// swaps it in under the write lock, so readers always see a consistent
/// (k, labels) pair.
#[derive(Debug, Clone)]
pub struct ClusterSnapshot {
    pub k: usize,
    pub labels: Vec<usize>,
    pub inertia: f64,
}

/// Everything computed by the startup pipeline, shared across handlers.
pub struct AppState {
    pub dataset: Dataset,
    /// Z-scored feature matrix; all analytics run on this.
    pub standardized: Matrix,
    pub pca: Pca,
    /// Full PCA projection of the standardized rows (columns PC1..PCn).
    pub projection: Matrix,
    pub mds_points: MdsEmbedding,
    pub mds_variables: MdsEmbedding,
    pub clustering: RwLock<ClusterSnapshot>,
    /// Upper bound of the elbow search range, clamped to the row count.
    pub max_k: usize,
}
