//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, draw on a display,
//! record for a test.

use core::fmt;

use serde::Serialize;

use super::alerts::Alert;
use super::classifier::QualityClass;
use super::context::CycleState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started.
    Started,

    /// One sample/classify cycle completed.
    Report(CycleReport),

    /// An alert condition held during the last cycle.
    Alert(Alert),

    /// The uplink line could not be encoded or sent.
    UplinkFailed { consecutive: u32 },
}

/// Human-readable per-cycle report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleReport {
    pub cycle: u64,
    pub ph: f32,
    pub turbidity: f32,
    pub temperature_c: f32,
    pub conductivity: f32,
    pub score: f32,
    pub class: QualityClass,
}

impl From<&CycleState> for CycleReport {
    fn from(state: &CycleState) -> Self {
        Self {
            cycle: state.cycle,
            ph: state.reading.ph,
            turbidity: state.reading.turbidity,
            temperature_c: state.reading.temperature_c,
            conductivity: state.metrics.conductivity,
            score: state.breakdown.score(),
            class: state.class,
        }
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pH: {:.2} | Turbidity: {:.2} NTU | Temp: {:.2} C | Conductivity: {:.2} uS/cm | Quality: {}",
            self.ph, self.turbidity, self.temperature_c, self.conductivity, self.class
        )
    }
}
