//! Irrigation planning from crop water need and the current rainfall deficit.

use serde::Serialize;

use super::profiles::CropProfile;
use super::reading::EnvironmentalReading;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WaterAmount {
    None,
    Light,
    Moderate,
    Heavy,
}

impl WaterAmount {
    // ---
    /// Tier for a deficit in mm. Boundaries are lower-inclusive.
    pub fn for_deficit(deficit: f64) -> Self {
        // ---
        match deficit {
            d if d < 2.0 => Self::None,
            d if d < 5.0 => Self::Light,
            d if d < 10.0 => Self::Moderate,
            _ => Self::Heavy,
        }
    }
}

/// Confidence in the irrigation tier. Only the unknown-crop fallback is Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IrrigationConfidence {
    High,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IrrigationPlan {
    pub irrigation_needed: bool,
    pub recommendation: String,
    pub water_amount: WaterAmount,
    pub confidence: IrrigationConfidence,
    pub daily_water_need: Option<f64>,
    pub rainfall_deficit: Option<f64>,
    pub crop_description: Option<String>,
}

/// Multipliers applied to the crop's base daily need.
#[derive(Debug, Clone, Copy, PartialEq)]
struct NeedFactors {
    temperature: f64,
    humidity: f64,
    moisture: f64,
}

impl NeedFactors {
    fn for_conditions(profile: &CropProfile, reading: &EnvironmentalReading) -> Self {
        // ---
        let t = reading.temperature;
        let h = reading.humidity;
        let m = reading.moisture;

        let temperature = match t {
            t if t > profile.optimal_temperature.high => 1.2,
            t if t < profile.optimal_temperature.low => 0.9,
            _ => 1.0,
        };
        let humidity = match h {
            h if h < profile.optimal_humidity.low => 1.15,
            h if h > profile.optimal_humidity.high => 0.9,
            _ => 1.0,
        };
        let moisture = match m {
            m if m < 30.0 => 1.3,
            m if m > 70.0 => 0.7,
            _ => 1.0,
        };

        Self {
            temperature,
            humidity,
            moisture,
        }
    }
}

/// Plan irrigation for `crop` under the given reading.
pub fn plan(crop: &str, reading: &EnvironmentalReading) -> IrrigationPlan {
    // ---
    let Some(profile) = CropProfile::lookup(crop) else {
        return fallback(crop);
    };

    let daily_need = profile.daily_water_need();
    let factors = NeedFactors::for_conditions(profile, reading);
    let adjusted_need = daily_need * factors.temperature * factors.humidity * factors.moisture;
    let deficit = (adjusted_need - reading.rainfall).max(0.0);
    let amount = WaterAmount::for_deficit(deficit);

    let recommendation = match amount {
        WaterAmount::None => format!(
            "No irrigation needed. Rainfall of {:.1}mm covers the adjusted daily need of \
             {:.1}mm for {}.",
            reading.rainfall, adjusted_need, crop
        ),
        WaterAmount::Light => format!(
            "Light irrigation recommended: apply 2-5mm to cover a {deficit:.1}mm deficit for {crop}."
        ),
        WaterAmount::Moderate => format!(
            "Moderate irrigation recommended: apply 5-10mm to cover a {deficit:.1}mm deficit \
             for {crop}."
        ),
        WaterAmount::Heavy => format!(
            "Heavy irrigation required: apply 10mm or more to cover a {deficit:.1}mm deficit \
             for {crop}."
        ),
    };

    IrrigationPlan {
        irrigation_needed: amount != WaterAmount::None,
        recommendation,
        water_amount: amount,
        confidence: IrrigationConfidence::High,
        daily_water_need: Some(daily_need),
        rainfall_deficit: Some(deficit),
        crop_description: Some(profile.description.to_string()),
    }
}

fn fallback(crop: &str) -> IrrigationPlan {
    // ---
    tracing::warn!("No crop profile for '{}', using generic irrigation advice", crop);

    IrrigationPlan {
        irrigation_needed: true,
        recommendation: "No crop profile available: apply moderate irrigation (5-10mm) and \
                         monitor soil moisture daily."
            .to_string(),
        water_amount: WaterAmount::Moderate,
        confidence: IrrigationConfidence::Low,
        daily_water_need: None,
        rainfall_deficit: None,
        crop_description: None,
    }
}
