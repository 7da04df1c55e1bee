//! Parallel-coordinates data endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct PcpResponse {
    /// One object per retained record, raw string values plus `Cluster_ID`.
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<serde_json::Value>,
    pub numerical_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
}

/// Full records for parallel-coordinates rendering, each tagged with its
/// current cluster id.
#[utoipa::path(
    get,
    path = "/pcp/data",
    tag = "PCP",
    responses(
        (status = 200, description = "Parallel-coordinates records", body = PcpResponse)
    )
)]
pub async fn pcp_data(State(state): State<Arc<AppState>>) -> Json<PcpResponse> {
    let clustering = state.clustering.read().await;

    let data = state
        .dataset
        .records
        .iter()
        .zip(clustering.labels.iter())
        .map(|(record, &cluster)| {
            let mut object = serde_json::Map::with_capacity(record.len() + 1);
            for (key, value) in record {
                object.insert(key.clone(), serde_json::Value::String(value.clone()));
            }
            object.insert("Cluster_ID".to_string(), serde_json::Value::from(cluster));
            serde_json::Value::Object(object)
        })
        .collect();

    Json(PcpResponse {
        data,
        numerical_columns: state.standardized.column_names().to_vec(),
        categorical_columns: state.dataset.categorical_columns.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::test_state;

    #[tokio::test]
    async fn records_keep_raw_values_and_gain_cluster_ids() {
        let state = test_state();
        let response = pcp_data(State(state.clone())).await;

        assert_eq!(response.0.data.len(), state.dataset.records.len());
        assert_eq!(response.0.numerical_columns, vec!["X", "Y"]);
        assert_eq!(response.0.categorical_columns, vec!["Name"]);

        let clustering = state.clustering.read().await;
        for (object, &label) in response.0.data.iter().zip(clustering.labels.iter()) {
            assert!(object.get("Name").is_some());
            assert_eq!(object["Cluster_ID"], serde_json::Value::from(label));
        }
    }
}
