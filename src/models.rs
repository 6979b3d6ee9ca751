//! Wire-level request model for the prediction endpoint.

use serde::Deserialize;
use serde_json::Value;

use crate::engine::{EnvironmentalReading, SoilType};
use crate::error::EngineError;

// ---

/// Raw prediction request as posted by clients.
///
/// Accepts the legacy field spellings (`Temparature`, `Soil Type`, ...)
/// next to the snake_case names. Fields are kept as raw JSON values so that
/// missing or non-numeric readings surface as `InvalidInput` rather than a
/// deserialization rejection. Numeric strings such as `"31.5"` are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct RawPredictRequest {
    // ---
    #[serde(alias = "Temparature", alias = "Temperature")]
    pub temperature: Option<Value>,

    #[serde(alias = "Humidity")]
    pub humidity: Option<Value>,

    #[serde(alias = "Moisture")]
    pub moisture: Option<Value>,

    #[serde(alias = "Soil Type", alias = "soilType")]
    pub soil_type: Option<Value>,

    #[serde(alias = "Rainfall")]
    pub rainfall: Option<Value>,
}

/// Read a JSON number or numeric string as `f64`.
fn as_number(name: &str, value: &Value) -> Result<f64, EngineError> {
    // ---
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        EngineError::invalid(format!("field '{name}' must be numeric, got {value}"))
    })
}

fn require(name: &str, value: Option<&Value>) -> Result<f64, EngineError> {
    // ---
    let value =
        value.ok_or_else(|| EngineError::invalid(format!("missing required field '{name}'")))?;
    as_number(name, value)
}

/// Soil codes may arrive as `1`, `1.0` or `"1"`; anything fractional is rejected.
fn soil_code(value: &Value) -> Result<i64, EngineError> {
    // ---
    let code = as_number("soil_type", value)?;
    if code.fract() != 0.0 || !code.is_finite() {
        return Err(EngineError::invalid(format!(
            "soil_type must be an integer code, got {value}"
        )));
    }
    Ok(code as i64)
}

impl RawPredictRequest {
    // ---
    /// Validate and convert into an engine reading. Rainfall defaults to 0.
    pub fn to_reading(&self) -> Result<EnvironmentalReading, EngineError> {
        // ---
        let temperature = require("temperature", self.temperature.as_ref())?;
        let humidity = require("humidity", self.humidity.as_ref())?;
        let moisture = require("moisture", self.moisture.as_ref())?;
        let soil = self
            .soil_type
            .as_ref()
            .ok_or_else(|| EngineError::invalid("missing required field 'soil_type'"))?;
        let rainfall = match &self.rainfall {
            Some(value) => as_number("rainfall", value)?,
            None => 0.0,
        };

        EnvironmentalReading::new(
            temperature,
            humidity,
            moisture,
            rainfall,
            SoilType::from_code(soil_code(soil)?)?,
        )
    }
}
