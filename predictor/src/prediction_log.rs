use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::info;

use ml_core::Feature;

use crate::PredictError;

/// Append-only CSV log of served predictions.
///
/// One row per prediction: timestamp, the raw input values in stored feature
/// order, and the predicted price. The header is written once when the file
/// is created; existing rows are never rewritten.
#[derive(Debug, Clone)]
pub struct PredictionLog {
    path: PathBuf,
}

impl PredictionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one prediction row, creating the file (and its parent
    /// directory) with a header on first use.
    ///
    /// # Errors
    /// - `PredictError::MissingFeature` if the input lacks a named feature;
    ///   nothing is written in that case.
    /// - `PredictError::Io` / `PredictError::Log` on write failures.
    pub fn append(
        &self,
        features: &[Feature],
        input: &BTreeMap<String, f64>,
        prediction: f64,
    ) -> Result<(), PredictError> {
        // Validate the whole row before touching the file.
        let mut values = Vec::with_capacity(features.len());
        for feature in features {
            match input.get(feature.name()) {
                Some(value) => values.push(value.to_string()),
                None => return Err(PredictError::MissingFeature(feature.name().to_string())),
            }
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let write_header = fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            let mut header = vec!["timestamp".to_string()];
            header.extend(features.iter().map(|f| f.name().to_string()));
            header.push("prediction".to_string());
            writer.write_record(&header)?;
        }

        let mut row = vec![Utc::now().to_rfc3339()];
        row.extend(values);
        row.push(prediction.to_string());
        writer.write_record(&row)?;
        writer.flush()?;

        info!("logged prediction to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn temp_log(tag: &str) -> PredictionLog {
        let path = std::env::temp_dir().join(format!(
            "land_predlog_{tag}_{}.csv",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        PredictionLog::new(path)
    }

    fn sample_input() -> BTreeMap<String, f64> {
        [("year".to_string(), 2024.0), ("q_num".to_string(), 2.0)]
            .into_iter()
            .collect()
    }

    const FEATURES: &[Feature] = &[Feature::Year, Feature::QuarterNum];

    #[test]
    fn test_two_appends_yield_header_plus_two_rows() {
        let log = temp_log("two_rows");
        log.append(FEATURES, &sample_input(), 2100.0).unwrap();

        let after_first = fs::read_to_string(log.path()).unwrap();

        log.append(FEATURES, &sample_input(), 2200.0).unwrap();
        let after_second = fs::read_to_string(log.path()).unwrap();

        let lines: Vec<&str> = after_second.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "timestamp,year,q_num,prediction");
        assert!(lines[1].ends_with(",2024,2,2100"));
        assert!(lines[2].ends_with(",2024,2,2200"));

        // Appending never rewrites what was already there.
        assert!(after_second.starts_with(&after_first));

        let _ = fs::remove_file(log.path());
    }

    #[test]
    fn test_missing_feature_writes_nothing() {
        let log = temp_log("missing");
        let mut input = sample_input();
        input.remove("q_num");

        match log.append(FEATURES, &input, 2100.0) {
            Err(PredictError::MissingFeature(name)) => assert_eq!(name, "q_num"),
            other => panic!("expected MissingFeature, got {other:?}"),
        }
        assert!(!log.path().exists());
    }
}
