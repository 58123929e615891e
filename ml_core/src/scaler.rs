use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Feature, MlError, QuarterRecord};

/// Per-feature min/max scaling parameters.
///
/// Fitted once on the training split and reused verbatim for the test split
/// and every future inference input. Scaling is a pure function of the
/// stored ranges; nothing here is ever recomputed from new data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScalerParams {
    ranges: BTreeMap<String, (f64, f64)>,
}

impl ScalerParams {
    /// Computes the min and max of each named feature over the reference
    /// records.
    ///
    /// # Errors
    /// Returns `MlError::InvalidInput` if `records` is empty.
    pub fn fit(records: &[QuarterRecord], features: &[Feature]) -> Result<Self, MlError> {
        if records.is_empty() {
            return Err(MlError::InvalidInput("cannot fit scaler on zero records"));
        }

        let mut ranges = BTreeMap::new();
        for &feature in features {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for record in records {
                let v = record.get(feature);
                min = min.min(v);
                max = max.max(v);
            }
            ranges.insert(feature.name().to_string(), (min, max));
        }

        Ok(Self { ranges })
    }

    /// Rebuilds params from persisted ranges.
    pub fn from_ranges(ranges: BTreeMap<String, (f64, f64)>) -> Self {
        Self { ranges }
    }

    /// Returns the stored `(min, max)` range for a feature name.
    ///
    /// # Errors
    /// Returns `MlError::UnknownFeature` if the name has no stored range;
    /// that means the caller holds stale or mismatched artifacts.
    pub fn range(&self, name: &str) -> Result<(f64, f64), MlError> {
        self.ranges
            .get(name)
            .copied()
            .ok_or_else(|| MlError::UnknownFeature(name.to_string()))
    }

    /// Whether a range is stored for the given feature name.
    pub fn contains(&self, name: &str) -> bool {
        self.ranges.contains_key(name)
    }

    /// Scales a single value with the stored range of `name`.
    ///
    /// A zero-variance feature (`min == max` in the training data) scales to
    /// the constant `0.0` for every input.
    ///
    /// # Errors
    /// Returns `MlError::UnknownFeature` for a name without a stored range.
    pub fn scale_value(&self, name: &str, value: f64) -> Result<f64, MlError> {
        let (min, max) = self.range(name)?;
        if max == min {
            Ok(0.0)
        } else {
            Ok((value - min) / (max - min))
        }
    }

    /// Scales the named features of one record into a vector, in feature
    /// order.
    ///
    /// # Errors
    /// Returns `MlError::UnknownFeature` if any feature lacks a stored range.
    pub fn scale_record(
        &self,
        record: &QuarterRecord,
        features: &[Feature],
    ) -> Result<Vec<f64>, MlError> {
        features
            .iter()
            .map(|&f| self.scale_value(f.name(), record.get(f)))
            .collect()
    }
}
