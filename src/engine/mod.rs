//! Agronomic decision engine.
//!
//! Turns an [`EnvironmentalReading`] and the classifier's per-crop
//! probabilities into a [`RecommendationResult`]:
//!
//! ```text
//! reading -> soil::estimate -> selector::select(classifier output)
//!         -> irrigation::plan, fertilizer::advise, warnings::generate
//!         -> RecommendationResult
//! ```
//!
//! Every step is a pure function over its inputs and the static crop
//! profile table, so [`evaluate`] can run concurrently without locking.

use serde::Serialize;

pub mod fertilizer;
pub mod irrigation;
pub mod profiles;
pub mod reading;
pub mod selector;
pub mod soil;
pub mod summary;
pub mod warnings;

pub use fertilizer::FertilizerPlan;
pub use irrigation::IrrigationPlan;
pub use profiles::CropProfile;
pub use reading::{EnvironmentalReading, SoilType};
pub use selector::{ClassifierOutput, SelectionConfidence};
pub use soil::SoilChemistryEstimate;
pub use summary::PredictionSummary;
pub use warnings::Warning;

use crate::error::EngineError;

// ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherConditions {
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilConditions {
    pub moisture: f64,
    #[serde(rename = "type")]
    pub soil_type: SoilType,
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

impl SoilConditions {
    fn echo(reading: &EnvironmentalReading, chem: &SoilChemistryEstimate) -> Self {
        // ---
        Self {
            moisture: reading.moisture,
            soil_type: reading.soil_type,
            ph: round2(chem.ph),
            nitrogen: round2(chem.nitrogen),
            phosphorus: round2(chem.phosphorus),
            potassium: round2(chem.potassium),
        }
    }
}

/// Everything the engine recommends for one reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub predicted_crop: String,
    pub confidence: SelectionConfidence,
    pub irrigation: IrrigationPlan,
    pub fertilizer: FertilizerPlan,
    pub warnings: Vec<Warning>,
    pub weather_conditions: WeatherConditions,
    pub soil_conditions: SoilConditions,
    pub prediction_summary: PredictionSummary,
}

/// Evaluate a reading against the classifier's probabilities.
///
/// Fails fast with [`EngineError::InvalidInput`] on a non-finite reading or
/// an empty/out-of-range classifier output; otherwise always succeeds.
pub fn evaluate(
    reading: &EnvironmentalReading,
    output: &ClassifierOutput,
) -> Result<RecommendationResult, EngineError> {
    // ---
    reading.validate()?;

    let chem = soil::estimate(reading);
    let selection = selector::select(output, reading)?;
    let crop = selection.crop;

    let irrigation = irrigation::plan(&crop, reading);
    let fertilizer = fertilizer::advise(&crop, reading.soil_type, &chem);
    let warnings = warnings::generate(reading, &crop);
    let prediction_summary = PredictionSummary::build(&warnings, reading, &crop);

    tracing::debug!(
        crop = %crop,
        score = selection.score,
        warnings = prediction_summary.total_warnings,
        critical = prediction_summary.critical_warnings,
        "Evaluated reading"
    );

    Ok(RecommendationResult {
        predicted_crop: crop,
        confidence: selection.confidence,
        irrigation,
        fertilizer,
        warnings,
        weather_conditions: WeatherConditions {
            temperature: reading.temperature,
            humidity: reading.humidity,
            rainfall: reading.rainfall,
        },
        soil_conditions: SoilConditions::echo(reading, &chem),
        prediction_summary,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
