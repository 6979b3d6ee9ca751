//! Roll-up figures reported alongside a recommendation.

use serde::Serialize;

use super::profiles::CropProfile;
use super::reading::{EnvironmentalReading, SoilType};
use super::warnings::Warning;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Suitability {
    Good,
    #[serde(rename = "Caution Required")]
    CautionRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Favorability {
    Excellent,
    Good,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionSummary {
    pub total_warnings: usize,
    pub critical_warnings: usize,
    pub overall_suitability: Suitability,
    pub soil_health_score: u32,
    pub weather_favorability: Favorability,
}

impl PredictionSummary {
    // ---
    pub fn build(warnings: &[Warning], reading: &EnvironmentalReading, crop: &str) -> Self {
        // ---
        let critical = warnings.iter().filter(|w| w.is_critical()).count();
        let overall_suitability = if critical == 0 {
            Suitability::Good
        } else {
            Suitability::CautionRequired
        };

        Self {
            total_warnings: warnings.len(),
            critical_warnings: critical,
            overall_suitability,
            soil_health_score: soil_health_score(reading.moisture, reading.soil_type),
            weather_favorability: weather_favorability(
                reading.temperature,
                reading.humidity,
                crop,
            ),
        }
    }
}

/// 0-100 score from soil moisture and soil class.
pub fn soil_health_score(moisture: f64, soil_type: SoilType) -> u32 {
    // ---
    let moisture_points = match moisture {
        m if (40.0..=70.0).contains(&m) => 30,
        m if (30.0..40.0).contains(&m) => 20,
        m if m > 70.0 && m <= 80.0 => 20,
        _ => 10,
    };
    let soil_points = match soil_type {
        SoilType::Loamy => 20,
        SoilType::Clay => 15,
        SoilType::Sandy => 10,
    };

    (50 + moisture_points + soil_points).min(100)
}

/// Crop whose ranges are used when the selected crop has no profile.
const FALLBACK_CROP: &str = "Wheat";

/// How well the weather matches the crop's optimal ranges.
pub fn weather_favorability(temperature: f64, humidity: f64, crop: &str) -> Favorability {
    // ---
    let Some(profile) = CropProfile::lookup(crop).or_else(|| CropProfile::lookup(FALLBACK_CROP))
    else {
        return Favorability::Poor;
    };
    let temp = profile.optimal_temperature;
    let hum = profile.optimal_humidity;

    if temp.contains(temperature) && hum.contains(humidity) {
        Favorability::Excellent
    } else if temp.widened(5.0).contains(temperature) || hum.widened(10.0).contains(humidity) {
        Favorability::Good
    } else {
        Favorability::Poor
    }
}
