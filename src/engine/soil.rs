//! Soil chemistry estimation from weather and soil class.
//!
//! pH and N/P/K are not measured in the field; they are inferred with one
//! linear formula set per soil class and then clamped to plausible bounds.

use serde::Serialize;

use super::reading::{EnvironmentalReading, SoilType};

// ---

pub const PH_BOUNDS: (f64, f64) = (5.5, 8.5);
pub const NITROGEN_BOUNDS: (f64, f64) = (20.0, 100.0);
pub const PHOSPHORUS_BOUNDS: (f64, f64) = (15.0, 80.0);
pub const POTASSIUM_BOUNDS: (f64, f64) = (20.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoilChemistryEstimate {
    pub ph: f64,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
}

/// Estimate pH and N/P/K for a reading.
pub fn estimate(reading: &EnvironmentalReading) -> SoilChemistryEstimate {
    // ---
    let t = reading.temperature;
    let h = reading.humidity;
    let m = reading.moisture;
    let r = reading.rainfall;

    let (ph, nitrogen, phosphorus, potassium) = match reading.soil_type {
        SoilType::Loamy => (
            6.5 + 0.03 * (t - 25.0) + 0.01 * (m - 50.0),
            50.0 + 0.4 * m + 0.2 * (h - 60.0),
            30.0 + 0.8 * (t - 20.0) + 2.0 * r,
            40.0 + 0.6 * t + 0.3 * (m - 40.0),
        ),
        // Sandy soils leach: more acidic, lower retention.
        SoilType::Sandy => (
            6.0 + 0.04 * (t - 20.0) + 0.1 * r,
            25.0 + 0.5 * m + 0.3 * (t - 25.0),
            20.0 + 0.4 * (h - 50.0) + 0.2 * m,
            25.0 + 0.8 * t + 0.2 * (h - 60.0),
        ),
        SoilType::Clay => (
            7.0 + 0.03 * (m - 50.0) + 0.02 * (t - 25.0),
            60.0 + 0.6 * (t - 25.0) + 0.2 * m,
            35.0 + 0.3 * m + 0.3 * (h - 70.0),
            50.0 + 0.4 * h + 0.4 * (t - 20.0),
        ),
    };

    SoilChemistryEstimate {
        ph: clamp(ph, PH_BOUNDS),
        nitrogen: clamp(nitrogen, NITROGEN_BOUNDS),
        phosphorus: clamp(phosphorus, PHOSPHORUS_BOUNDS),
        potassium: clamp(potassium, POTASSIUM_BOUNDS),
    }
}

fn clamp(value: f64, (low, high): (f64, f64)) -> f64 {
    value.clamp(low, high)
}
