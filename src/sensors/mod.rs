//! Sensor subsystem — individual probe drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every probe driver and answers per-channel raw reads for
//! the [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter).
//! Averaging and calibration belong to the domain sampler, not here.

pub mod ph;
pub mod temperature;
pub mod turbidity;

use log::warn;

use ph::PhProbe;
use temperature::TemperatureProbe;
use turbidity::TurbidityProbe;

/// Aggregates all probe drivers.
pub struct SensorHub {
    pub ph: PhProbe,
    pub turbidity: TurbidityProbe,
    pub temperature: TemperatureProbe,
    /// Temperature probe faults seen since boot.
    temperature_faults: u32,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(ph: PhProbe, turbidity: TurbidityProbe, temperature: TemperatureProbe) -> Self {
        Self {
            ph,
            turbidity,
            temperature,
            temperature_faults: 0,
        }
    }

    /// One temperature conversion; faults are counted and logged, not filtered.
    pub fn read_temperature_c(&mut self) -> f32 {
        let reading = self.temperature.read();
        if reading.is_fault() {
            self.temperature_faults = self.temperature_faults.saturating_add(1);
            warn!(
                "temperature probe fault #{} since boot (raw={})",
                self.temperature_faults, reading.raw
            );
        }
        reading.celsius
    }
}
