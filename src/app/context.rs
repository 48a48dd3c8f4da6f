//! Cycle-scoped state threaded through the sampler and classifier.
//!
//! `CycleState` holds everything one sample/classify cycle produces: the
//! averaged reading, the derived metrics, the score breakdown and the
//! resulting class.  It is rebuilt from scratch every cycle; the service
//! keeps only the most recent one for queries.

use serde::Serialize;

use super::classifier::{QualityClass, ScoreBreakdown};

// ---------------------------------------------------------------------------
// Sensor reading (produced by the sampler)
// ---------------------------------------------------------------------------

/// Averaged, clamped probe values for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorReading {
    /// pH, clamped to [`PH_RANGE`].
    pub ph: f32,
    /// Turbidity (NTU), clamped to [`TURBIDITY_RANGE_NTU`].
    pub turbidity: f32,
    /// Water temperature (°C); the configured default on probe fault.
    pub temperature_c: f32,
}

/// Physical pH range.
pub const PH_RANGE: (f32, f32) = (0.0, 14.0);
/// Turbidity probe range (NTU).
pub const TURBIDITY_RANGE_NTU: (f32, f32) = (0.0, 800.0);

impl SensorReading {
    /// Build a reading, clamping pH and turbidity to their physical ranges.
    pub fn new(ph: f32, turbidity: f32, temperature_c: f32) -> Self {
        Self {
            ph: clamp_range(ph, PH_RANGE),
            turbidity: clamp_range(turbidity, TURBIDITY_RANGE_NTU),
            temperature_c,
        }
    }
}

/// `f32::clamp` that maps NaN to the lower bound instead of propagating it.
pub(crate) fn clamp_range(value: f32, (lo, hi): (f32, f32)) -> f32 {
    if value.is_nan() {
        return lo;
    }
    value.clamp(lo, hi)
}

// ---------------------------------------------------------------------------
// Derived metrics
// ---------------------------------------------------------------------------

/// Features computed from a [`SensorReading`] with no lifecycle of their own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    /// Estimated conductivity (µS/cm).
    pub conductivity: f32,
}

impl DerivedMetrics {
    /// `conductivity = 500 + 30·ph + 2·turbidity`
    pub fn from_reading(reading: &SensorReading) -> Self {
        Self {
            conductivity: conductivity(reading.ph, reading.turbidity),
        }
    }
}

#[inline]
pub fn conductivity(ph: f32, turbidity: f32) -> f32 {
    500.0 + 30.0 * ph + 2.0 * turbidity
}

// ---------------------------------------------------------------------------
// CycleState
// ---------------------------------------------------------------------------

/// Everything computed during one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleState {
    /// 1-based index of the cycle that produced this state.
    pub cycle: u64,
    pub reading: SensorReading,
    pub metrics: DerivedMetrics,
    pub breakdown: ScoreBreakdown,
    pub class: QualityClass,
    /// True if the temperature probe faulted and the default was used.
    pub temperature_fallback: bool,
}
