//! Analog turbidity probe (infrared scatter, 0 – 4.5 V output).
//!
//! The probe output is brought down to the 3.3 V ADC range by a 2:3
//! resistive divider, so clear water reads about 2.8 V at the pin and
//! the voltage falls as the water gets cloudier.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH4 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// ~2.8 V at 12 bits: clear water.
#[cfg(not(target_os = "espidf"))]
static SIM_TURBIDITY_ADC: AtomicU16 = AtomicU16::new(3475);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_turbidity_adc(raw: u16) {
    SIM_TURBIDITY_ADC.store(raw, Ordering::Relaxed);
}

pub struct TurbidityProbe {
    _adc_gpio: i32,
}

impl TurbidityProbe {
    pub fn new(adc_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read_raw(&mut self) -> u16 {
        self.read_adc()
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_TURBIDITY)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_TURBIDITY_ADC.load(Ordering::Relaxed)
    }
}
