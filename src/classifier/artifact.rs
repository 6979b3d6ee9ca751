//! Portable JSON model artifact.
//!
//! ```json
//! {
//!   "scaler":     { "mean": [..9], "scale": [..9] },
//!   "classifier": { "coefficients": [[..9], ..], "intercepts": [..] },
//!   "encoder":    { "classes": ["Cotton", ..] }
//! }
//! ```
//!
//! One coefficient row, one intercept and one class label per crop.

use serde::Deserialize;

use super::{FeatureScaler, Features, LabelDecoder, ProbabilityModel, FEATURE_COUNT};
use crate::error::{ArtifactError, EngineError};

// ---

#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &Features) -> Result<Vec<f64>, EngineError> {
        // ---
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(EngineError::classifier("scaler dimensions do not match features"));
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let centered = x - mean;
                // Constant features were stored with a zero scale.
                if *scale == 0.0 {
                    centered
                } else {
                    centered / scale
                }
            })
            .collect())
    }
}

/// Multinomial linear classifier with a softmax output.
#[derive(Debug, Clone, Deserialize)]
pub struct SoftmaxClassifier {
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl ProbabilityModel for SoftmaxClassifier {
    fn predict_probabilities(&self, scaled: &[f64]) -> Result<Vec<f64>, EngineError> {
        // ---
        if self.coefficients.is_empty() || self.coefficients.len() != self.intercepts.len() {
            return Err(EngineError::classifier("classifier has inconsistent class count"));
        }

        let mut logits = Vec::with_capacity(self.coefficients.len());
        for (row, intercept) in self.coefficients.iter().zip(&self.intercepts) {
            if row.len() != scaled.len() {
                return Err(EngineError::classifier(format!(
                    "expected {} features, got {}",
                    row.len(),
                    scaled.len()
                )));
            }
            let dot: f64 = row.iter().zip(scaled).map(|(w, x)| w * x).sum();
            logits.push(dot + intercept);
        }

        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
        let total: f64 = exps.iter().sum();

        if !total.is_finite() || total <= 0.0 {
            return Err(EngineError::classifier("softmax produced no finite probabilities"));
        }
        Ok(exps.into_iter().map(|e| e / total).collect())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }
}

impl LabelDecoder for LabelEncoder {
    fn decode(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifacts {
    pub scaler: StandardScaler,
    pub classifier: SoftmaxClassifier,
    pub encoder: LabelEncoder,
}

impl ModelArtifacts {
    // ---
    /// Parse and validate an artifact document. `origin` names the source
    /// in error messages.
    pub fn from_slice(bytes: &[u8], origin: &str) -> Result<Self, ArtifactError> {
        // ---
        let artifacts: Self =
            serde_json::from_slice(bytes).map_err(|source| ArtifactError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        artifacts.validate()?;
        Ok(artifacts)
    }

    /// Check every dimension agrees before the artifacts serve requests.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        // ---
        let classes = self.encoder.classes.len();

        if classes == 0 {
            return Err(ArtifactError::Shape("encoder has no classes".into()));
        }
        if self.scaler.mean.len() != FEATURE_COUNT || self.scaler.scale.len() != FEATURE_COUNT {
            return Err(ArtifactError::Shape(format!(
                "scaler must have {FEATURE_COUNT} means and scales, got {} and {}",
                self.scaler.mean.len(),
                self.scaler.scale.len()
            )));
        }
        if self.classifier.coefficients.len() != classes
            || self.classifier.intercepts.len() != classes
        {
            return Err(ArtifactError::Shape(format!(
                "classifier must have {classes} coefficient rows and intercepts"
            )));
        }
        if let Some(row) = self
            .classifier
            .coefficients
            .iter()
            .position(|r| r.len() != FEATURE_COUNT)
        {
            return Err(ArtifactError::Shape(format!(
                "coefficient row {row} must have {FEATURE_COUNT} weights"
            )));
        }
        Ok(())
    }
}
