//! Field reading and soil classification types.

use serde::Serialize;

use crate::error::EngineError;

// ---

/// Soil classes the estimator and advisors understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SoilType {
    Loamy,
    Sandy,
    Clay,
}

impl SoilType {
    // ---
    /// Map the integer code used by clients and the classifier (0/1/2).
    pub fn from_code(code: i64) -> Result<Self, EngineError> {
        // ---
        match code {
            0 => Ok(Self::Loamy),
            1 => Ok(Self::Sandy),
            2 => Ok(Self::Clay),
            other => Err(EngineError::invalid(format!(
                "soil_type must be 0 (Loamy), 1 (Sandy) or 2 (Clay), got {other}"
            ))),
        }
    }

    /// Integer code fed to the classifier as a feature.
    pub fn code(self) -> u8 {
        // ---
        match self {
            Self::Loamy => 0,
            Self::Sandy => 1,
            Self::Clay => 2,
        }
    }

    pub fn name(self) -> &'static str {
        // ---
        match self {
            Self::Loamy => "Loamy",
            Self::Sandy => "Sandy",
            Self::Clay => "Clay",
        }
    }
}

/// One set of weather and soil observations for a field.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentalReading {
    // ---
    /// Air temperature in °C.
    pub temperature: f64,

    /// Relative humidity in %.
    pub humidity: f64,

    /// Soil moisture in %.
    pub moisture: f64,

    /// Recent rainfall in mm.
    pub rainfall: f64,

    pub soil_type: SoilType,
}

impl EnvironmentalReading {
    // ---
    pub fn new(
        temperature: f64,
        humidity: f64,
        moisture: f64,
        rainfall: f64,
        soil_type: SoilType,
    ) -> Result<Self, EngineError> {
        // ---
        let reading = Self {
            temperature,
            humidity,
            moisture,
            rainfall,
            soil_type,
        };
        reading.validate()?;
        Ok(reading)
    }

    /// Reject non-finite numeric fields before any estimate is computed.
    pub fn validate(&self) -> Result<(), EngineError> {
        // ---
        let fields = [
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("moisture", self.moisture),
            ("rainfall", self.rainfall),
        ];

        for (name, value) in fields {
            if !value.is_finite() {
                return Err(EngineError::invalid(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
