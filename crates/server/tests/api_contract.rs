//! Contract tests for the JSON wire shapes.
//!
//! `vizlab-server` is a binary crate (no lib.rs), so these tests pin the
//! response contracts consumed by the front-end plots: mirror types are
//! serialized and the exact field names asserted.

use serde::{Deserialize, Serialize};

// ── Mirror types matching the wire contract ───────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct ElbowResponse {
    optimal_k: usize,
    mse_scores: Vec<f64>,
    k_values: Vec<usize>,
    columns: Vec<String>,
    selected_components: [usize; 2],
}

#[derive(Debug, Serialize, Deserialize)]
struct BiplotPoint {
    x: f64,
    y: f64,
    cluster: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct FeatureVector {
    feature: String,
    x: f64,
    y: f64,
    dx: f64,
    dy: f64,
    length: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ScreeResponse {
    eigenvalues: Vec<f64>,
    explained_variance_ratio: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MdsPoint {
    x: f64,
    y: f64,
    cluster: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct MdsVariable {
    x: f64,
    y: f64,
    variable: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SetKResponse {
    message: String,
    new_k: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

// ── The POST /cluster/k validation rule, mirrored ─────────────────

/// A request body is accepted only when `k` is a plain integer within
/// 1..=rows. Fractions, strings, and non-positive values are rejected.
fn k_is_valid(body: &serde_json::Value, rows: usize) -> bool {
    match body.get("k").and_then(|v| v.as_u64()) {
        Some(k) => k >= 1 && (k as usize) <= rows,
        None => false,
    }
}

// ── Tests ─────────────────────────────────────────────────────────

#[test]
fn elbow_response_uses_snake_case_field_names() {
    let response = ElbowResponse {
        optimal_k: 4,
        mse_scores: vec![100.0, 40.0, 15.0, 5.0, 4.0],
        k_values: vec![1, 2, 3, 4, 5],
        columns: vec!["Metascore".to_string()],
        selected_components: [0, 1],
    };
    let json = serde_json::to_value(&response).unwrap();

    assert!(json.get("optimal_k").is_some());
    assert!(json.get("mse_scores").is_some());
    assert!(json.get("k_values").is_some());
    assert_eq!(json["optimal_k"], 4);
    assert_eq!(
        json["mse_scores"].as_array().unwrap().len(),
        json["k_values"].as_array().unwrap().len()
    );
}

#[test]
fn elbow_k_values_ascend_from_one() {
    let json = serde_json::json!({
        "optimal_k": 3,
        "mse_scores": [9.0, 4.0, 1.0],
        "k_values": [1, 2, 3],
        "columns": [],
        "selected_components": [0, 1],
    });
    let response: ElbowResponse = serde_json::from_value(json).unwrap();
    for (i, &k) in response.k_values.iter().enumerate() {
        assert_eq!(k, i + 1);
    }
    assert!(response.optimal_k >= 1 && response.optimal_k <= response.k_values.len());
}

#[test]
fn biplot_feature_vectors_anchor_at_origin() {
    let json = serde_json::json!({
        "feature": "Metascore",
        "x": 0.0,
        "y": 0.0,
        "dx": 0.42,
        "dy": -0.13,
        "length": 0.4396589,
    });
    let vector: FeatureVector = serde_json::from_value(json).unwrap();
    assert_eq!(vector.x, 0.0);
    assert_eq!(vector.y, 0.0);
    let expected = (vector.dx * vector.dx + vector.dy * vector.dy).sqrt();
    assert!((vector.length - expected).abs() < 1e-6);
}

#[test]
fn scree_arrays_are_parallel() {
    let response = ScreeResponse {
        eigenvalues: vec![4.2, 2.1, 0.5],
        explained_variance_ratio: vec![0.61, 0.31, 0.08],
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json["eigenvalues"].as_array().unwrap().len(),
        json["explained_variance_ratio"].as_array().unwrap().len()
    );
}

#[test]
fn mds_points_and_variables_share_coordinate_fields() {
    let point: MdsPoint =
        serde_json::from_value(serde_json::json!({"x": 1.5, "y": -2.0, "cluster": 2})).unwrap();
    assert_eq!(point.cluster, 2);

    let variable: MdsVariable =
        serde_json::from_value(serde_json::json!({"x": 0.1, "y": 0.9, "variable": "Year"}))
            .unwrap();
    assert_eq!(variable.variable, "Year");
}

#[test]
fn pcp_records_carry_cluster_id() {
    // Every record object gains a numeric Cluster_ID next to the raw columns.
    let record = serde_json::json!({
        "Name": "Alpha",
        "Metascore": "91",
        "Cluster_ID": 2,
    });
    assert!(record["Cluster_ID"].is_u64());
    assert!(record["Metascore"].is_string());
}

#[test]
fn set_k_accepts_only_positive_integers_within_range() {
    let rows = 100;

    assert!(k_is_valid(&serde_json::json!({"k": 1}), rows));
    assert!(k_is_valid(&serde_json::json!({"k": 4}), rows));
    assert!(k_is_valid(&serde_json::json!({"k": 100}), rows));

    assert!(!k_is_valid(&serde_json::json!({"k": 0}), rows));
    assert!(!k_is_valid(&serde_json::json!({"k": -3}), rows));
    assert!(!k_is_valid(&serde_json::json!({"k": 2.5}), rows));
    assert!(!k_is_valid(&serde_json::json!({"k": "4"}), rows));
    assert!(!k_is_valid(&serde_json::json!({"k": 101}), rows));
    assert!(!k_is_valid(&serde_json::json!({}), rows));
}

#[test]
fn set_k_response_and_error_shapes() {
    let ok: SetKResponse =
        serde_json::from_value(serde_json::json!({"message": "Updated k value", "new_k": 5}))
            .unwrap();
    assert_eq!(ok.new_k, 5);

    let err: ErrorResponse =
        serde_json::from_value(serde_json::json!({"error": "Invalid k value"})).unwrap();
    assert_eq!(err.error, "Invalid k value");
}
