//! Prediction pipeline around the decision engine.
//!
//! The `Recommender` owns the classifier handle it was constructed with;
//! nothing is looked up from global state.

use crate::classifier::{self, CropModel};
use crate::engine::{self, soil, EnvironmentalReading, RecommendationResult};
use crate::error::EngineError;

// ---

#[derive(Debug, Clone)]
pub struct Recommender {
    model: CropModel,
}

impl Recommender {
    // ---
    pub fn new(model: CropModel) -> Self {
        Self { model }
    }

    /// Estimate soil chemistry, classify, then evaluate.
    ///
    /// Invalid readings are rejected before the classifier runs; classifier
    /// failures are returned unchanged.
    pub fn recommend(
        &self,
        reading: &EnvironmentalReading,
    ) -> Result<RecommendationResult, EngineError> {
        // ---
        reading.validate()?;

        let chem = soil::estimate(reading);
        let features = classifier::features(reading, &chem);
        let output = self.model.classify(&features)?;

        tracing::debug!("Classifier output: {:?}", output.entries());

        engine::evaluate(reading, &output)
    }
}
