//! Fixed weighted-threshold water quality classifier.
//!
//! Four independent bucketed contributions are summed into a score in
//! [0, 1]:
//!
//! | feature      | max  |
//! |--------------|------|
//! | turbidity    | 0.40 |
//! | pH           | 0.35 |
//! | temperature  | 0.15 |
//! | conductivity | 0.10 |
//!
//! Contributions are kept as integer hundredths ("points") so the cut
//! points at 0.75 and 0.45 compare exactly.  The classifier is a pure
//! function with no state and no learned parameters.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::context::{DerivedMetrics, SensorReading};

/// Points at or above which a cycle is `Good`.
pub const GOOD_CUT_POINTS: u8 = 75;
/// Points at or above which a cycle is `Moderate`.
pub const MODERATE_CUT_POINTS: u8 = 45;

/// Water quality category, ordered by severity (`Good < Moderate < Poor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityClass {
    Good,
    Moderate,
    Poor,
}

impl QualityClass {
    /// Upper-case label used in reports and on the uplink.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "GOOD",
            Self::Moderate => "MODERATE",
            Self::Poor => "POOR",
        }
    }

    pub fn from_points(points: u8) -> Self {
        if points >= GOOD_CUT_POINTS {
            Self::Good
        } else if points >= MODERATE_CUT_POINTS {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}

impl fmt::Display for QualityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a scalar score to a class.  Ties go to the higher category.
pub fn classify_score(score: f32) -> QualityClass {
    if score >= 0.75 {
        QualityClass::Good
    } else if score >= 0.45 {
        QualityClass::Moderate
    } else {
        QualityClass::Poor
    }
}

/// Per-feature contributions for one cycle, in points (hundredths).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScoreBreakdown {
    pub turbidity: u8,
    pub ph: u8,
    pub temperature: u8,
    pub conductivity: u8,
}

impl ScoreBreakdown {
    pub fn compute(reading: &SensorReading, metrics: &DerivedMetrics) -> Self {
        Self {
            turbidity: turbidity_points(reading.turbidity),
            ph: ph_points(reading.ph),
            temperature: temperature_points(reading.temperature_c),
            conductivity: conductivity_points(metrics.conductivity),
        }
    }

    pub fn points(&self) -> u8 {
        self.turbidity + self.ph + self.temperature + self.conductivity
    }

    pub fn score(&self) -> f32 {
        f32::from(self.points()) / 100.0
    }

    pub fn class(&self) -> QualityClass {
        QualityClass::from_points(self.points())
    }
}

/// Score and classify a reading in one call.
pub fn classify(reading: &SensorReading, metrics: &DerivedMetrics) -> (ScoreBreakdown, QualityClass) {
    let breakdown = ScoreBreakdown::compute(reading, metrics);
    (breakdown, breakdown.class())
}

// ── Buckets ───────────────────────────────────────────────────

pub fn turbidity_points(ntu: f32) -> u8 {
    if ntu <= 5.0 {
        40
    } else if ntu <= 50.0 {
        25
    } else if ntu <= 100.0 {
        10
    } else {
        0
    }
}

pub fn ph_points(ph: f32) -> u8 {
    if (6.5..=8.5).contains(&ph) {
        35
    } else if (6.0..=9.0).contains(&ph) {
        20
    } else {
        0
    }
}

pub fn temperature_points(celsius: f32) -> u8 {
    if (10.0..=30.0).contains(&celsius) {
        15
    } else if (5.0..=35.0).contains(&celsius) {
        8
    } else {
        0
    }
}

pub fn conductivity_points(us_per_cm: f32) -> u8 {
    if us_per_cm <= 800.0 {
        10
    } else if us_per_cm <= 1200.0 {
        5
    } else {
        0
    }
}
