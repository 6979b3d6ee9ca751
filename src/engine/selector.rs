//! Crop selection: re-rank classifier probabilities with field heuristics.

use serde::Serialize;

use super::reading::{EnvironmentalReading, SoilType};
use crate::error::EngineError;

// ---

/// Classifier probabilities in the classifier's native class order.
///
/// The order is significant: it breaks ties between equal adjusted scores.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassifierOutput {
    entries: Vec<(String, f64)>,
}

impl ClassifierOutput {
    // ---
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        // ---
        if self.entries.is_empty() {
            return Err(EngineError::invalid("classifier output has no classes"));
        }
        for (label, p) in &self.entries {
            if !(0.0..=1.0).contains(p) {
                return Err(EngineError::invalid(format!(
                    "probability for '{label}' must be in [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ClassifierOutput {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(l, p)| (l.into(), p)).collect())
    }
}

/// How strongly the engine backs its crop choice. There is no "Low".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionConfidence {
    High,
    Medium,
}

impl SelectionConfidence {
    fn from_score(score: f64) -> Self {
        // ---
        // Anything at or below 0.4 is still reported as Medium.
        if score > 0.6 {
            Self::High
        } else {
            Self::Medium
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub crop: String,
    pub confidence: SelectionConfidence,
    /// Winning adjusted score; used for logging only.
    pub score: f64,
}

/// Boolean view of the reading the heuristics key off.
#[derive(Debug, Clone, Copy)]
struct Conditions {
    temperature: f64,
    moisture: f64,
    soil_type: SoilType,
    is_hot: bool,
    is_cold: bool,
    is_humid: bool,
    is_dry: bool,
    is_wet_soil: bool,
    is_dry_soil: bool,
}

impl Conditions {
    fn from_reading(r: &EnvironmentalReading) -> Self {
        // ---
        Self {
            temperature: r.temperature,
            moisture: r.moisture,
            soil_type: r.soil_type,
            is_hot: r.temperature > 30.0,
            is_cold: r.temperature < 20.0,
            is_humid: r.humidity > 80.0,
            is_dry: r.humidity < 50.0,
            is_wet_soil: r.moisture > 70.0,
            is_dry_soil: r.moisture < 30.0,
        }
    }
}

/// Multiply `score` by `factor` when `cond` holds.
fn boost(score: f64, cond: bool, factor: f64) -> f64 {
    if cond {
        score * factor
    } else {
        score
    }
}

fn adjusted_score(crop: &str, probability: f64, c: &Conditions) -> f64 {
    // ---
    let t = c.temperature;
    let m = c.moisture;
    let mut s = probability;

    match crop {
        "Paddy" => {
            s = boost(s, c.is_humid && c.is_wet_soil, 1.5);
            s = boost(s, c.is_dry || c.is_dry_soil, 0.6);
            s = boost(s, c.soil_type == SoilType::Clay, 1.2);
        }
        "Wheat" => {
            s = boost(s, c.is_cold || (15.0..=25.0).contains(&t), 1.3);
            s = boost(s, c.is_hot, 0.7);
            s = boost(s, (30.0..=60.0).contains(&m), 1.2);
        }
        "Cotton" => {
            s = boost(s, c.is_hot, 1.8);
            s = boost(s, c.is_cold, 0.3);
            s = boost(s, c.soil_type == SoilType::Sandy, 1.5);
            s = boost(s, c.is_dry || c.is_dry_soil, 1.3);
            s = boost(s, t > 32.0, 1.6);
        }
        "Pulses" => {
            s = boost(s, (20.0..=30.0).contains(&t), 1.1);
            s = boost(s, (40.0..=70.0).contains(&m), 1.1);
            s *= 0.7;
        }
        _ => {}
    }
    s
}

/// Pick the crop with the highest adjusted score.
///
/// Ties go to the crop that comes first in the classifier's ordering.
pub fn select(
    output: &ClassifierOutput,
    reading: &EnvironmentalReading,
) -> Result<Selection, EngineError> {
    // ---
    output.validate()?;
    let conditions = Conditions::from_reading(reading);

    let mut best: Option<(&str, f64)> = None;
    for (crop, probability) in output.entries() {
        let score = adjusted_score(crop, *probability, &conditions);
        // Strictly greater: earlier classes keep ties.
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((crop.as_str(), score));
        }
    }

    let (crop, score) =
        best.ok_or_else(|| EngineError::invalid("classifier output has no classes"))?;

    Ok(Selection {
        crop: crop.to_string(),
        confidence: SelectionConfidence::from_score(score),
        score,
    })
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use approx::assert_relative_eq;

    fn create_test_reading(t: f64, h: f64, m: f64, soil: SoilType) -> EnvironmentalReading {
        // ---
        EnvironmentalReading::new(t, h, m, 0.0, soil).unwrap()
    }

    fn uniform() -> ClassifierOutput {
        // ---
        [("Cotton", 0.25), ("Paddy", 0.25), ("Pulses", 0.25), ("Wheat", 0.25)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_pulses_penalty_lets_rival_win() {
        // ---
        // T=25, M=40: Pulses gets 1.1 * 1.1 * 0.7 = 0.847; Wheat gets 1.3 * 1.2.
        let reading = create_test_reading(25.0, 60.0, 40.0, SoilType::Loamy);
        let output: ClassifierOutput =
            [("Cotton", 0.05), ("Paddy", 0.05), ("Pulses", 0.48), ("Wheat", 0.42)]
                .into_iter()
                .collect();

        let selection = select(&output, &reading).unwrap();
        assert_eq!(selection.crop, "Wheat");
        assert_relative_eq!(selection.score, 0.42 * 1.3 * 1.2, epsilon = 1e-9);
        assert_eq!(selection.confidence, SelectionConfidence::High);
    }

    #[test]
    fn test_pulses_adjustment_is_exact() {
        // ---
        let reading = create_test_reading(25.0, 60.0, 50.0, SoilType::Loamy);
        let output: ClassifierOutput = [("Pulses", 0.9)].into_iter().collect();

        let selection = select(&output, &reading).unwrap();
        assert_relative_eq!(selection.score, 0.9 * 1.1 * 1.1 * 0.7, epsilon = 1e-9);
    }

    #[test]
    fn test_hot_dry_sandy_favors_cotton() {
        // ---
        let reading = create_test_reading(35.0, 30.0, 15.0, SoilType::Sandy);
        let output: ClassifierOutput =
            [("Cotton", 0.1), ("Paddy", 0.3), ("Pulses", 0.3), ("Wheat", 0.3)]
                .into_iter()
                .collect();

        let selection = select(&output, &reading).unwrap();
        assert_eq!(selection.crop, "Cotton");
        // 1.8 (hot) * 1.5 (sandy) * 1.3 (dry) * 1.6 (above 32°C)
        assert_relative_eq!(selection.score, 0.1 * 1.8 * 1.5 * 1.3 * 1.6, epsilon = 1e-9);
    }

    #[test]
    fn test_humid_wet_clay_favors_paddy() {
        // ---
        let reading = create_test_reading(28.0, 85.0, 80.0, SoilType::Clay);
        let selection = select(&uniform(), &reading).unwrap();

        assert_eq!(selection.crop, "Paddy");
        assert_relative_eq!(selection.score, 0.25 * 1.5 * 1.2, epsilon = 1e-9);
        assert_eq!(selection.confidence, SelectionConfidence::Medium);
    }

    #[test]
    fn test_hot_edge_is_strict() {
        // ---
        // 30°C is not hot: no Cotton x1.8 and no Wheat x0.7.
        let c = Conditions::from_reading(&create_test_reading(30.0, 60.0, 70.0, SoilType::Loamy));
        assert_relative_eq!(adjusted_score("Cotton", 0.5, &c), 0.5, epsilon = 1e-9);
        assert_relative_eq!(adjusted_score("Wheat", 0.5, &c), 0.5, epsilon = 1e-9);

        let c = Conditions::from_reading(&create_test_reading(30.1, 60.0, 70.0, SoilType::Loamy));
        assert_relative_eq!(adjusted_score("Cotton", 0.5, &c), 0.5 * 1.8, epsilon = 1e-9);
        assert_relative_eq!(adjusted_score("Wheat", 0.5, &c), 0.5 * 0.7, epsilon = 1e-9);
    }

    #[test]
    fn test_wheat_moisture_edges_are_inclusive() {
        // ---
        let wheat_at = |m| {
            let c = Conditions::from_reading(&create_test_reading(27.0, 60.0, m, SoilType::Loamy));
            adjusted_score("Wheat", 0.5, &c)
        };
        assert_relative_eq!(wheat_at(30.0), 0.5 * 1.2, epsilon = 1e-9);
        assert_relative_eq!(wheat_at(60.0), 0.5 * 1.2, epsilon = 1e-9);
        assert_relative_eq!(wheat_at(29.9), 0.5, epsilon = 1e-9);
        assert_relative_eq!(wheat_at(60.1), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_ties_go_to_first_in_classifier_order() {
        // ---
        // Neither crop label is adjusted, so both keep 0.5.
        let reading = create_test_reading(25.0, 60.0, 40.0, SoilType::Loamy);
        let output: ClassifierOutput = [("Maize", 0.5), ("Sorghum", 0.5)].into_iter().collect();
        assert_eq!(select(&output, &reading).unwrap().crop, "Maize");

        let reversed: ClassifierOutput = [("Sorghum", 0.5), ("Maize", 0.5)].into_iter().collect();
        assert_eq!(select(&reversed, &reading).unwrap().crop, "Sorghum");
    }

    #[test]
    fn test_confidence_is_never_low() {
        // ---
        for t in [0.0, 18.0, 25.0, 31.0, 40.0] {
            for m in [10.0, 45.0, 80.0] {
                for p in [0.0, 0.01, 0.3, 0.5, 1.0] {
                    let reading = create_test_reading(t, 60.0, m, SoilType::Loamy);
                    let output: ClassifierOutput = [("Pulses", p)].into_iter().collect();
                    let confidence = select(&output, &reading).unwrap().confidence;
                    assert!(matches!(
                        confidence,
                        SelectionConfidence::High | SelectionConfidence::Medium
                    ));
                }
            }
        }
    }

    #[test]
    fn test_confidence_thresholds() {
        // ---
        assert_eq!(SelectionConfidence::from_score(0.61), SelectionConfidence::High);
        assert_eq!(SelectionConfidence::from_score(0.6), SelectionConfidence::Medium);
        assert_eq!(SelectionConfidence::from_score(0.41), SelectionConfidence::Medium);
        assert_eq!(SelectionConfidence::from_score(0.1), SelectionConfidence::Medium);
    }

    #[test]
    fn test_invalid_classifier_output() {
        // ---
        let reading = create_test_reading(25.0, 60.0, 40.0, SoilType::Loamy);

        let empty = ClassifierOutput::default();
        assert!(matches!(select(&empty, &reading), Err(EngineError::InvalidInput(_))));

        let out_of_range: ClassifierOutput = [("Wheat", 1.2)].into_iter().collect();
        assert!(matches!(
            select(&out_of_range, &reading),
            Err(EngineError::InvalidInput(_))
        ));

        let nan: ClassifierOutput = [("Wheat", f64::NAN)].into_iter().collect();
        assert!(select(&nan, &reading).is_err());
    }
}
