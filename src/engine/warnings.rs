//! Environmental hazard warnings.
//!
//! Categories are checked in a fixed order (temperature, moisture, humidity,
//! rainfall, crop-specific) and each category yields at most one warning:
//! the first matching threshold wins, most severe first.

use serde::Serialize;

use super::reading::EnvironmentalReading;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    Temperature,
    Moisture,
    Humidity,
    Rainfall,
    CropSpecific,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub severity: Severity,
    pub category: WarningCategory,
    pub message: String,
    pub recommendation: String,
}

impl Warning {
    // ---
    fn new(
        severity: Severity,
        category: WarningCategory,
        message: String,
        recommendation: &str,
    ) -> Self {
        Self {
            severity,
            category,
            message,
            recommendation: recommendation.to_string(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

fn temperature(t: f64) -> Option<Warning> {
    // ---
    let cat = WarningCategory::Temperature;

    match t {
        t if t > 40.0 => Some(Warning::new(
            Severity::Critical,
            cat,
            format!("Extreme heat ({t:.1}°C) can cause severe crop damage"),
            "Irrigate during cooler hours and use mulch or shade to reduce heat stress",
        )),
        t if t > 35.0 => Some(Warning::new(
            Severity::Warning,
            cat,
            format!("High temperature ({t:.1}°C) may affect crop growth"),
            "Ensure adequate water supply and consider heat-resistant varieties",
        )),
        t if t < 5.0 => Some(Warning::new(
            Severity::Critical,
            cat,
            format!("Freezing risk ({t:.1}°C) may damage crops"),
            "Apply frost protection such as row covers or light evening irrigation",
        )),
        t if t < 10.0 => Some(Warning::new(
            Severity::Warning,
            cat,
            format!("Cold weather ({t:.1}°C) may slow crop growth"),
            "Delay sowing of warm-season crops and monitor for frost",
        )),
        _ => None,
    }
}

fn moisture(m: f64) -> Option<Warning> {
    // ---
    let cat = WarningCategory::Moisture;

    match m {
        m if m < 20.0 => Some(Warning::new(
            Severity::Critical,
            cat,
            format!("Very low soil moisture ({m:.1}%) - crops may wilt"),
            "Immediate irrigation required. Consider drip irrigation for efficiency",
        )),
        m if m < 30.0 => Some(Warning::new(
            Severity::Warning,
            cat,
            format!("Low soil moisture ({m:.1}%) may stress crops"),
            "Schedule irrigation within the next day",
        )),
        m if m > 90.0 => Some(Warning::new(
            Severity::Warning,
            cat,
            format!("Very high soil moisture ({m:.1}%) raises root rot risk"),
            "Suspend irrigation and improve field drainage",
        )),
        _ => None,
    }
}

fn humidity(h: f64) -> Option<Warning> {
    // ---
    let cat = WarningCategory::Humidity;

    match h {
        h if h > 90.0 => Some(Warning::new(
            Severity::Warning,
            cat,
            format!("Very high humidity ({h:.1}%) increases fungal disease risk"),
            "Monitor for fungal infections and ensure good air circulation",
        )),
        h if h < 30.0 => Some(Warning::new(
            Severity::Warning,
            cat,
            format!("Low humidity ({h:.1}%) increases crop water stress"),
            "Increase irrigation frequency and mulch to reduce evaporation",
        )),
        _ => None,
    }
}

fn rainfall(r: f64, m: f64) -> Option<Warning> {
    // ---
    let cat = WarningCategory::Rainfall;

    if r > 50.0 {
        Some(Warning::new(
            Severity::Warning,
            cat,
            format!("Heavy rainfall ({r:.1}mm) may cause waterlogging"),
            "Clear drainage channels and hold off on irrigation",
        ))
    } else if r == 0.0 && m < 40.0 {
        Some(Warning::new(
            Severity::Warning,
            cat,
            format!("No rainfall and low soil moisture ({m:.1}%)"),
            "Plan supplemental irrigation to maintain soil moisture",
        ))
    } else {
        None
    }
}

fn crop_specific(crop: &str, t: f64, m: f64) -> Option<Warning> {
    // ---
    let cat = WarningCategory::CropSpecific;

    match crop {
        "Paddy" if m < 60.0 => Some(Warning::new(
            Severity::Warning,
            cat,
            format!("Paddy needs saturated soil but moisture is only {m:.1}%"),
            "Maintain 2-5cm of standing water in the field",
        )),
        "Cotton" if t < 20.0 => Some(Warning::new(
            Severity::Warning,
            cat,
            format!("Cotton growth stalls below 20°C (currently {t:.1}°C)"),
            "Delay sowing until temperatures rise",
        )),
        "Wheat" if t > 30.0 => Some(Warning::new(
            Severity::Warning,
            cat,
            format!("Wheat is heat sensitive above 30°C (currently {t:.1}°C)"),
            "Irrigate to cool the canopy and consider earlier sowing next season",
        )),
        _ => None,
    }
}

/// Scan a reading for hazards, aware of the selected crop.
pub fn generate(reading: &EnvironmentalReading, crop: &str) -> Vec<Warning> {
    // ---
    let t = reading.temperature;
    let m = reading.moisture;

    [
        temperature(t),
        moisture(m),
        humidity(reading.humidity),
        rainfall(reading.rainfall, m),
        crop_specific(crop, t, m),
    ]
    .into_iter()
    .flatten()
    .collect()
}
