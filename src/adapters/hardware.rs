//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and exposes it through [`SensorPort`].  This
//! is the only module in the system that touches probe hardware.  On
//! non-espidf targets, the underlying drivers use cfg-gated simulation
//! stubs.

use crate::app::ports::{AnalogChannel, SensorPort};
use crate::sensors::SensorHub;

/// Concrete adapter that puts all probes behind the sensor port.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
}

impl HardwareAdapter {
    pub fn new(sensor_hub: SensorHub) -> Self {
        Self { sensor_hub }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_raw(&mut self, channel: AnalogChannel) -> u16 {
        match channel {
            AnalogChannel::Ph => self.sensor_hub.ph.read_raw(),
            AnalogChannel::Turbidity => self.sensor_hub.turbidity.read_raw(),
        }
    }

    fn read_temperature_c(&mut self) -> f32 {
        self.sensor_hub.read_temperature_c()
    }
}
