//! In-memory `AppState` fixtures for handler tests.

use std::sync::Arc;

use vizlab_core::{Dataset, Matrix, Record};

use crate::startup;
use crate::state::AppState;

/// Three well-separated blobs, 18 rows, 2 features, max_k = 8.
pub fn test_state() -> Arc<AppState> {
    let centers = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
    let mut rows = Vec::new();
    let mut records = Vec::new();

    for (ci, &(cx, cy)) in centers.iter().enumerate() {
        for i in 0..6 {
            let x = cx + (i as f64) * 0.05;
            let y = cy + (i as f64) * 0.05;
            rows.push(vec![x, y]);

            let mut record = Record::new();
            record.insert("Name".to_string(), format!("row-{}-{}", ci, i));
            record.insert("X".to_string(), x.to_string());
            record.insert("Y".to_string(), y.to_string());
            records.push(record);
        }
    }

    let features = Matrix::new(vec!["X".to_string(), "Y".to_string()], rows).unwrap();
    let dataset = Dataset {
        records,
        features,
        categorical_columns: vec!["Name".to_string()],
    };

    startup::analyze(dataset, 8).unwrap()
}
