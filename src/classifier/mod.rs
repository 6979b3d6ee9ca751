//! Crop classifier collaborators.
//!
//! The engine never talks to a model directly. A [`CropModel`] bundles the
//! three collaborators a prediction needs (feature scaler, probability
//! model, label decoder) behind traits, and is handed to the
//! `Recommender` at construction. Tests inject their own implementations.

use std::sync::Arc;

use crate::engine::{ClassifierOutput, EnvironmentalReading, SoilChemistryEstimate};
use crate::error::EngineError;

pub mod artifact;
pub mod source;

pub use artifact::{LabelEncoder, ModelArtifacts, SoftmaxClassifier, StandardScaler};
pub use source::{load_first_available, ArtifactSource, LoadedArtifacts};

// ---

/// Number of features the classifier was trained on.
pub const FEATURE_COUNT: usize = 9;

/// Raw feature vector in training order: temperature, humidity, ph,
/// rainfall, nitrogen, phosphorus, potassium, soil code, moisture.
pub type Features = [f64; FEATURE_COUNT];

pub fn features(reading: &EnvironmentalReading, chem: &SoilChemistryEstimate) -> Features {
    // ---
    [
        reading.temperature,
        reading.humidity,
        chem.ph,
        reading.rainfall,
        chem.nitrogen,
        chem.phosphorus,
        chem.potassium,
        f64::from(reading.soil_type.code()),
        reading.moisture,
    ]
}

pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: &Features) -> Result<Vec<f64>, EngineError>;
}

pub trait ProbabilityModel: Send + Sync {
    /// One probability per class, in class-index order.
    fn predict_probabilities(&self, scaled: &[f64]) -> Result<Vec<f64>, EngineError>;
}

pub trait LabelDecoder: Send + Sync {
    fn decode(&self, index: usize) -> Option<&str>;
}

/// Handle on the scaler, model and decoder used for one deployment.
#[derive(Clone)]
pub struct CropModel {
    scaler: Arc<dyn FeatureScaler>,
    model: Arc<dyn ProbabilityModel>,
    decoder: Arc<dyn LabelDecoder>,
}

impl CropModel {
    // ---
    pub fn new(
        scaler: Arc<dyn FeatureScaler>,
        model: Arc<dyn ProbabilityModel>,
        decoder: Arc<dyn LabelDecoder>,
    ) -> Self {
        Self {
            scaler,
            model,
            decoder,
        }
    }

    /// Build from a validated artifact bundle.
    pub fn from_artifacts(artifacts: ModelArtifacts) -> Self {
        // ---
        let ModelArtifacts {
            scaler,
            classifier,
            encoder,
        } = artifacts;
        Self::new(Arc::new(scaler), Arc::new(classifier), Arc::new(encoder))
    }

    /// Scale, classify and label a feature vector.
    pub fn classify(&self, features: &Features) -> Result<ClassifierOutput, EngineError> {
        // ---
        let scaled = self.scaler.transform(features)?;
        let probabilities = self.model.predict_probabilities(&scaled)?;

        probabilities
            .into_iter()
            .enumerate()
            .map(|(index, p)| {
                self.decoder
                    .decode(index)
                    .map(|label| (label.to_string(), p))
                    .ok_or_else(|| {
                        EngineError::classifier(format!("no label for class index {index}"))
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ClassifierOutput::new)
    }
}

impl std::fmt::Debug for CropModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CropModel").finish_non_exhaustive()
    }
}
