//! Static reference data for the crops the classifier knows about.

// ---

/// Inclusive optimal range for a weather variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    // ---
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Same range widened by `margin` on both sides.
    pub fn widened(&self, margin: f64) -> Self {
        Self::new(self.low - margin, self.high + margin)
    }
}

/// Fertilizer formulation recommended for a crop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Formulation {
    pub primary: &'static str,
    /// Comma-separated, most important first.
    pub secondary: &'static str,
    pub organic: &'static str,
    pub micronutrients: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropProfile {
    // ---
    pub name: &'static str,

    /// Seasonal water requirement in mm.
    pub water_requirement: f64,

    /// Growing season length in days.
    pub growing_season: f64,

    pub optimal_temperature: Range,
    pub optimal_humidity: Range,
    pub description: &'static str,
    pub fertilizer: Formulation,
    pub application_timing: &'static str,
}

impl CropProfile {
    // ---
    /// Look up a crop by its classifier label.
    pub fn lookup(name: &str) -> Option<&'static CropProfile> {
        PROFILES.iter().find(|p| p.name == name)
    }

    pub fn all() -> &'static [CropProfile] {
        &PROFILES
    }

    /// Average water need per day of the season, in mm.
    pub fn daily_water_need(&self) -> f64 {
        self.water_requirement / self.growing_season
    }
}

static PROFILES: [CropProfile; 4] = [
    CropProfile {
        name: "Cotton",
        water_requirement: 1080.0,
        growing_season: 180.0,
        optimal_temperature: Range::new(25.0, 35.0),
        optimal_humidity: Range::new(40.0, 70.0),
        description: "Cotton is a warm-season fibre crop that tolerates heat and dry spells",
        fertilizer: Formulation {
            primary: "NPK (17-17-17)",
            secondary: "Urea, MOP",
            organic: "FYM, Neem cake",
            micronutrients: "Zinc, Boron",
        },
        application_timing: "Apply 50% at planting, 25% at flowering, 25% at boll formation",
    },
    CropProfile {
        name: "Paddy",
        water_requirement: 960.0,
        growing_season: 120.0,
        optimal_temperature: Range::new(20.0, 35.0),
        optimal_humidity: Range::new(60.0, 80.0),
        description: "Paddy (rice) needs warm weather and standing water through most of its season",
        fertilizer: Formulation {
            primary: "NPK (20-10-10)",
            secondary: "Urea, SSP",
            organic: "Green manure, Compost",
            micronutrients: "Zinc sulphate, Iron",
        },
        application_timing: "Apply 50% at transplanting, 25% at tillering, 25% at panicle initiation",
    },
    CropProfile {
        name: "Pulses",
        water_requirement: 315.0,
        growing_season: 90.0,
        optimal_temperature: Range::new(20.0, 30.0),
        optimal_humidity: Range::new(50.0, 80.0),
        description: "Pulses are short-season legumes with low water needs that fix their own nitrogen",
        fertilizer: Formulation {
            primary: "NPK (10-26-26)",
            secondary: "DAP, MOP",
            organic: "Rhizobium culture, Compost",
            micronutrients: "Molybdenum, Zinc",
        },
        application_timing: "Apply full dose at planting (pulses fix their own nitrogen)",
    },
    CropProfile {
        name: "Wheat",
        water_requirement: 540.0,
        growing_season: 120.0,
        optimal_temperature: Range::new(15.0, 25.0),
        optimal_humidity: Range::new(50.0, 70.0),
        description: "Wheat is a cool-season cereal that prefers moderate moisture",
        fertilizer: Formulation {
            primary: "NPK (12-32-16)",
            secondary: "Urea, DAP",
            organic: "FYM, Vermicompost",
            micronutrients: "Zinc, Manganese",
        },
        application_timing: "Apply 50% at sowing, 25% at crown root initiation, 25% at jointing",
    },
];
