//! Fertilizer formulation and soil nutrient diagnostics.

use serde::Serialize;

use super::profiles::{CropProfile, Formulation};
use super::reading::SoilType;
use super::soil::SoilChemistryEstimate;

// ---

/// Used when the selected crop has no profile.
const GENERIC_FORMULATION: Formulation = Formulation {
    primary: "NPK (10-10-10)",
    secondary: "Urea, DAP",
    organic: "Compost, FYM",
    micronutrients: "Zinc, Boron, Iron as needed",
};

const GENERIC_TIMING: &str = "Apply 50% at sowing and 50% at mid-season";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoilAnalysis {
    pub ph_status: String,
    pub nitrogen_status: String,
    pub phosphorus_status: String,
    pub potassium_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FertilizerPlan {
    pub primary: String,
    pub secondary: String,
    pub organic: String,
    pub micronutrients: String,
    pub recommendation: String,
    pub specific_advice: Vec<String>,
    pub application_timing: String,
    pub soil_analysis: SoilAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NutrientLevel {
    Low,
    Adequate,
    High,
}

impl NutrientLevel {
    // ---
    fn classify(value: f64, low_below: f64, adequate_below: f64) -> Self {
        // ---
        match value {
            v if v < low_below => Self::Low,
            v if v < adequate_below => Self::Adequate,
            _ => Self::High,
        }
    }

    pub fn nitrogen(value: f64) -> Self {
        Self::classify(value, 30.0, 60.0)
    }

    pub fn phosphorus(value: f64) -> Self {
        Self::classify(value, 20.0, 50.0)
    }

    pub fn potassium(value: f64) -> Self {
        Self::classify(value, 30.0, 60.0)
    }

    fn describe(self, nutrient: &str, value: f64) -> String {
        // ---
        match self {
            Self::Low => format!("Low ({value:.1}) - {nutrient} deficiency likely"),
            Self::Adequate => format!("Adequate ({value:.1}) - {nutrient} sufficient for growth"),
            Self::High => format!("High ({value:.1}) - {nutrient} abundant, avoid excess"),
        }
    }
}

fn ph_status(ph: f64) -> String {
    // ---
    match ph {
        p if p < 6.0 => format!("Acidic ({p:.1})"),
        p if p > 7.5 => format!("Alkaline ({p:.1})"),
        p => format!("Neutral ({p:.1})"),
    }
}

/// Soil-driven advice in a fixed order. Each group fires at most once.
fn specific_advice(
    formulation: &Formulation,
    soil_type: SoilType,
    chem: &SoilChemistryEstimate,
) -> Vec<String> {
    // ---
    let mut advice = Vec::new();

    if chem.ph < 6.0 {
        advice.push(format!(
            "Soil is acidic (pH {:.1}): apply agricultural lime to raise pH",
            chem.ph
        ));
    } else if chem.ph > 7.5 {
        advice.push(format!(
            "Soil is alkaline (pH {:.1}): apply sulfur or organic matter to lower pH",
            chem.ph
        ));
    }

    if chem.nitrogen < 40.0 {
        let booster = formulation
            .secondary
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or("Urea");
        advice.push(format!(
            "Nitrogen is low ({:.1}): apply {booster} for a nitrogen boost",
            chem.nitrogen
        ));
    } else if chem.nitrogen > 80.0 {
        advice.push(format!(
            "Nitrogen is high ({:.1}): reduce nitrogen application",
            chem.nitrogen
        ));
    }

    if chem.phosphorus < 25.0 {
        advice.push(format!(
            "Phosphorus is low ({:.1}): apply DAP or SSP",
            chem.phosphorus
        ));
    }

    if chem.potassium < 35.0 {
        advice.push(format!(
            "Potassium is low ({:.1}): apply MOP (muriate of potash)",
            chem.potassium
        ));
    }

    match soil_type {
        SoilType::Sandy => advice
            .push("Sandy soil: apply organic matter to improve nutrient and water retention".into()),
        SoilType::Clay => advice.push("Clay soil: apply organic matter to improve drainage".into()),
        SoilType::Loamy => {}
    }

    if advice.is_empty() {
        advice.push("Current soil conditions are suitable; follow the standard schedule".into());
    }
    advice
}

/// Build the fertilizer plan for `crop` on the estimated soil.
pub fn advise(crop: &str, soil_type: SoilType, chem: &SoilChemistryEstimate) -> FertilizerPlan {
    // ---
    let (formulation, timing, recommendation) = match CropProfile::lookup(crop) {
        Some(profile) => (
            profile.fertilizer,
            profile.application_timing,
            format!(
                "For {crop} in {} soil: apply {} as base fertilizer",
                soil_type.name(),
                profile.fertilizer.primary
            ),
        ),
        None => (
            GENERIC_FORMULATION,
            GENERIC_TIMING,
            format!(
                "No fertilizer profile for {crop}: apply a balanced {} in {} soil",
                GENERIC_FORMULATION.primary,
                soil_type.name()
            ),
        ),
    };

    let soil_analysis = SoilAnalysis {
        ph_status: ph_status(chem.ph),
        nitrogen_status: NutrientLevel::nitrogen(chem.nitrogen).describe("nitrogen", chem.nitrogen),
        phosphorus_status: NutrientLevel::phosphorus(chem.phosphorus)
            .describe("phosphorus", chem.phosphorus),
        potassium_status: NutrientLevel::potassium(chem.potassium)
            .describe("potassium", chem.potassium),
    };

    FertilizerPlan {
        primary: formulation.primary.to_string(),
        secondary: formulation.secondary.to_string(),
        organic: formulation.organic.to_string(),
        micronutrients: formulation.micronutrients.to_string(),
        recommendation,
        specific_advice: specific_advice(&formulation, soil_type, chem),
        application_timing: timing.to_string(),
        soil_analysis,
    }
}
