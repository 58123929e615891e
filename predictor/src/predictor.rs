use std::collections::BTreeMap;

use log::debug;

use artifacts::{ArtifactStore, ModelBundle};
use ml_core::Feature;

use crate::PredictError;

/// Serves point predictions from the persisted training artifacts.
///
/// The bundle is loaded exactly once at construction; every call afterwards
/// reuses the same model, scaler parameters, and feature order.
#[derive(Debug)]
pub struct LandPricePredictor {
    bundle: ModelBundle,
}

impl LandPricePredictor {
    /// Loads the artifacts from the store.
    ///
    /// # Errors
    /// Returns `PredictError::Artifact` if any artifact document is missing,
    /// malformed, or mutually inconsistent. No partially initialized
    /// predictor is ever handed out.
    pub fn from_store(store: &ArtifactStore) -> Result<Self, PredictError> {
        let bundle = store.load()?;
        debug!(
            "loaded model over {} feature(s) from {}",
            bundle.features().len(),
            store.dir().display()
        );
        Ok(Self { bundle })
    }

    /// Wraps an already assembled bundle. The bundle's own consistency
    /// check has run by construction.
    pub fn from_bundle(bundle: ModelBundle) -> Self {
        Self { bundle }
    }

    /// The feature list the stored model expects, in fit order.
    pub fn features(&self) -> &[Feature] {
        self.bundle.features()
    }

    /// Predicts the price per square meter for one raw observation.
    ///
    /// The input maps feature names to raw (unscaled) values; scaling uses
    /// the stored training-time parameters.
    ///
    /// # Errors
    /// Returns `PredictError::MissingFeature` naming the first absent
    /// feature, before any scaling is performed.
    pub fn predict(&self, input: &BTreeMap<String, f64>) -> Result<f64, PredictError> {
        let mut raw = Vec::with_capacity(self.bundle.features().len());
        for feature in self.bundle.features() {
            match input.get(feature.name()) {
                Some(&value) => raw.push(value),
                None => return Err(PredictError::MissingFeature(feature.name().to_string())),
            }
        }

        let mut scaled = Vec::with_capacity(raw.len());
        for (feature, value) in self.bundle.features().iter().zip(raw) {
            scaled.push(self.bundle.scaler().scale_value(feature.name(), value)?);
        }

        Ok(self.bundle.model().predict_one(&scaled)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use ml_core::{LinearModel, ScalerParams};

    use super::*;

    fn predictor() -> LandPricePredictor {
        let ranges = [
            ("keskipinta_ala".to_string(), (80.0, 100.0)),
            ("kauppojen_lkm".to_string(), (40.0, 60.0)),
        ]
        .into_iter()
        .collect();

        let bundle = ModelBundle::new(
            LinearModel::from_parts(vec![100.0, -50.0], 2000.0),
            ScalerParams::from_ranges(ranges),
            vec![Feature::AvgLotArea, Feature::SaleCount],
        )
        .unwrap();

        LandPricePredictor::from_bundle(bundle)
    }

    fn input(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_predict_scales_then_applies_the_model() {
        let p = predictor();
        // area 90 scales to 0.5, count 60 scales to 1.0.
        let got = p
            .predict(&input(&[("keskipinta_ala", 90.0), ("kauppojen_lkm", 60.0)]))
            .unwrap();
        assert!((got - (2000.0 + 100.0 * 0.5 - 50.0 * 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_missing_feature_is_named() {
        let p = predictor();
        match p.predict(&input(&[("keskipinta_ala", 90.0)])) {
            Err(PredictError::MissingFeature(name)) => assert_eq!(name, "kauppojen_lkm"),
            other => panic!("expected MissingFeature, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_input_features_are_ignored() {
        let p = predictor();
        let got = p.predict(&input(&[
            ("keskipinta_ala", 80.0),
            ("kauppojen_lkm", 40.0),
            ("reaalihintaindeksi", 999.0),
        ]));
        assert!((got.unwrap() - 2000.0).abs() < 1e-12);
    }
}
