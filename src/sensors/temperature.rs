//! NTC thermistor water temperature probe (10 kOhm @ 25 C, B = 3950).
//!
//! Wired in a voltage-divider with a fixed 10 kOhm resistor, read via
//! the ESP32-S3 ADC. The simplified Beta (Steinhart-Hart) equation
//! converts resistance to temperature.
//!
//! An open or shorted probe pins the divider to a rail; the driver then
//! reports [`TEMPERATURE_FAULT_SENTINEL_C`] and leaves recovery to the
//! sampler.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH8 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(2048);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temp_adc(raw: u16) {
    SIM_TEMP_ADC.store(raw, Ordering::Relaxed);
}

/// Reported when the probe is disconnected or shorted.
pub const TEMPERATURE_FAULT_SENTINEL_C: f32 = -127.0;

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;
/// Closer than this to either rail means open or short circuit.
const RAIL_MARGIN_V: f32 = 0.01;

#[derive(Debug, Clone, Copy)]
pub struct TemperatureReading {
    pub raw: u16,
    pub celsius: f32,
}

impl TemperatureReading {
    pub fn is_fault(&self) -> bool {
        self.celsius <= TEMPERATURE_FAULT_SENTINEL_C
    }
}

pub struct TemperatureProbe {
    _adc_gpio: i32,
}

impl TemperatureProbe {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read(&self) -> TemperatureReading {
        let raw = self.read_adc();
        TemperatureReading {
            raw,
            celsius: adc_to_celsius(raw),
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_TEMP)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_TEMP_ADC.load(Ordering::Relaxed)
    }
}

fn adc_to_celsius(raw: u16) -> f32 {
    let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
    if voltage <= RAIL_MARGIN_V || voltage >= (V_REF - RAIL_MARGIN_V) {
        return TEMPERATURE_FAULT_SENTINEL_C;
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return TEMPERATURE_FAULT_SENTINEL_C;
    }
    (1.0 / inv_t) - 273.15
}
