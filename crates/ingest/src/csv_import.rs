use std::path::Path;

use indexmap::IndexMap;
use tracing::info;

use vizlab_core::{Dataset, Matrix, Record, VizlabError};

/// Marker the source data uses for not-yet-scored entries.
const PLACEHOLDER: &str = "tbd";

pub struct CsvImporter;

impl CsvImporter {
    /// Load a CSV file, keeping only rows where every cell is populated and
    /// every feature column parses as a number.
    ///
    /// Rows containing the `tbd` placeholder in any cell are dropped, as are
    /// rows with an empty or unparseable feature cell. Record order is
    /// preserved.
    pub fn import(path: &Path, feature_columns: &[String]) -> Result<Dataset, VizlabError> {
        let file = std::fs::File::open(path).map_err(VizlabError::Io)?;
        let mut reader = csv::Reader::from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| VizlabError::Csv(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let feature_indices: Vec<usize> = feature_columns
            .iter()
            .map(|col| {
                headers
                    .iter()
                    .position(|h| h == col)
                    .ok_or_else(|| VizlabError::UnknownColumn(col.clone()))
            })
            .collect::<Result<_, _>>()?;

        let mut records: Vec<Record> = Vec::new();
        let mut feature_rows: Vec<Vec<f64>> = Vec::new();
        let mut dropped = 0usize;

        for result in reader.records() {
            let record = result.map_err(|e| VizlabError::Csv(e.to_string()))?;

            if record.iter().any(|cell| cell.trim() == PLACEHOLDER) {
                dropped += 1;
                continue;
            }

            let parsed: Option<Vec<f64>> = feature_indices
                .iter()
                .map(|&idx| {
                    record
                        .get(idx)
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .and_then(|c| c.parse::<f64>().ok())
                })
                .collect();

            match parsed {
                Some(row) => {
                    let full: Record = headers
                        .iter()
                        .zip(record.iter())
                        .map(|(h, c)| (h.clone(), c.trim().to_string()))
                        .collect::<IndexMap<_, _>>();
                    records.push(full);
                    feature_rows.push(row);
                }
                None => dropped += 1,
            }
        }

        if feature_rows.is_empty() {
            return Err(VizlabError::EmptyDataset(format!(
                "{}: no usable rows after filtering ({} dropped)",
                path.display(),
                dropped
            )));
        }

        let features = Matrix::new(feature_columns.to_vec(), feature_rows)?;
        let categorical_columns: Vec<String> = headers
            .iter()
            .filter(|h| !feature_columns.contains(h))
            .cloned()
            .collect();

        info!(
            "Imported {} rows from {} ({} dropped, {} feature columns, {} categorical columns)",
            records.len(),
            path.display(),
            dropped,
            feature_columns.len(),
            categorical_columns.len()
        );

        Ok(Dataset {
            records,
            features,
            categorical_columns,
        })
    }
}
