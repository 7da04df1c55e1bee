//! One-shot startup pipeline: load the dataset, standardize it, and compute
//! every startup artifact (PCA, initial clustering, both MDS embeddings).
//!
//! Dataset failures here are fatal: there is no reload path once serving.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use vizlab_analytics::algorithms::{mds, preprocess};
use vizlab_analytics::{select_k, KMeansConfig, Pca};
use vizlab_core::{Config, Dataset, Matrix};
use vizlab_ingest::CsvImporter;

use crate::state::{AppState, ClusterSnapshot};

pub fn build_app_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let dataset = CsvImporter::import(&config.data.csv_path, &config.data.feature_columns)?;
    analyze(dataset, config.data.max_k)
}

/// Run the full analytics pipeline over an already-loaded dataset.
pub fn analyze(dataset: Dataset, max_k: usize) -> anyhow::Result<Arc<AppState>> {
    let start = std::time::Instant::now();

    let standardized = preprocess::standardize(&dataset.features);
    let max_k = max_k.min(standardized.n_rows());

    info!("Fitting PCA on {} rows...", standardized.n_rows());
    let pca = Pca::fit(&standardized)?;
    let projection = project(&pca, &standardized)?;

    info!("Selecting cluster count (k = 1..={})...", max_k);
    let selection = select_k(&standardized, max_k)?;
    let fit = KMeansConfig::new(selection.k).fit(&standardized)?;
    info!("  optimal k = {} (inertia {:.2})", selection.k, fit.inertia);

    info!("Embedding data points (MDS)...");
    let mds_config = mds::MdsConfig::default();
    let mds_points = mds::fit_euclidean(&standardized, &mds_config)?;

    info!("Embedding variables (MDS over 1 - |corr|)...");
    let corr = preprocess::correlation_matrix(&standardized);
    let dissimilarity: Vec<Vec<f64>> = corr
        .iter()
        .map(|row| row.iter().map(|r| (1.0 - r.abs()).max(0.0)).collect())
        .collect();
    let mds_variables = mds::fit_precomputed(&dissimilarity, &mds_config)?;

    info!(
        "Analytics ready in {:.1}s ({} rows, {} features)",
        start.elapsed().as_secs_f64(),
        standardized.n_rows(),
        standardized.n_cols()
    );

    Ok(Arc::new(AppState {
        dataset,
        standardized,
        pca,
        projection,
        mds_points,
        mds_variables,
        clustering: RwLock::new(ClusterSnapshot {
            k: fit.k,
            labels: fit.labels,
            inertia: fit.inertia,
        }),
        max_k,
    }))
}

/// Project the standardized rows onto all principal components, keeping the
/// result as a named matrix so handlers can select component columns.
fn project(pca: &Pca, standardized: &Matrix) -> anyhow::Result<Matrix> {
    let rows = pca.transform(standardized)?;
    let columns = (1..=pca.n_components()).map(|i| format!("PC{}", i)).collect();
    Ok(Matrix::new(columns, rows)?)
}
