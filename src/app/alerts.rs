//! Alert evaluation against fixed safe bounds.
//!
//! Consumes a cycle's [`SensorReading`] and [`QualityClass`] and yields
//! the alerts that apply.  Delivery is someone else's job: the service
//! forwards each alert to the [`EventSink`](super::ports::EventSink).

use core::fmt;

use heapless::Vec;

use crate::config::AlertLimits;

use super::classifier::QualityClass;
use super::context::SensorReading;

/// Upper bound on alerts per cycle (one per condition).
pub const MAX_ALERTS: usize = 4;

/// A single out-of-bounds condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alert {
    PhOutOfRange { ph: f32 },
    HighTurbidity { ntu: f32 },
    TemperatureAbnormal { celsius: f32 },
    PoorQuality,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhOutOfRange { ph } => write!(f, "ALERT: pH out of safe range ({:.2})", ph),
            Self::HighTurbidity { ntu } => write!(f, "ALERT: high turbidity ({:.2} NTU)", ntu),
            Self::TemperatureAbnormal { celsius } => {
                write!(f, "ALERT: abnormal water temperature ({:.2} C)", celsius)
            }
            Self::PoorQuality => write!(f, "ALERT: poor water quality detected"),
        }
    }
}

/// Evaluate every alert condition for one cycle.
pub fn evaluate(
    reading: &SensorReading,
    class: QualityClass,
    limits: &AlertLimits,
) -> Vec<Alert, MAX_ALERTS> {
    let mut alerts = Vec::new();

    // Each condition pushes at most once, so capacity is never exceeded.
    if !(limits.ph_min..=limits.ph_max).contains(&reading.ph) {
        let _ = alerts.push(Alert::PhOutOfRange { ph: reading.ph });
    }
    if reading.turbidity > limits.turbidity_max_ntu {
        let _ = alerts.push(Alert::HighTurbidity {
            ntu: reading.turbidity,
        });
    }
    if !(limits.temperature_min_c..=limits.temperature_max_c).contains(&reading.temperature_c) {
        let _ = alerts.push(Alert::TemperatureAbnormal {
            celsius: reading.temperature_c,
        });
    }
    if class == QualityClass::Poor {
        let _ = alerts.push(Alert::PoorQuality);
    }

    alerts
}
