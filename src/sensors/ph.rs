//! Analog pH probe (gravity-style amplifier board, 3.3 V supply).
//!
//! The board outputs roughly 2.5 V at pH 7 with a negative slope of
//! about 0.18 V per pH unit.  This driver only returns raw ADC counts;
//! conversion to pH uses the calibration in
//! [`SystemConfig`](crate::config::SystemConfig) so it can be retuned
//! without touching hardware code.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH3 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// ~2.5 V at 12 bits: a neutral probe.
#[cfg(not(target_os = "espidf"))]
static SIM_PH_ADC: AtomicU16 = AtomicU16::new(3103);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ph_adc(raw: u16) {
    SIM_PH_ADC.store(raw, Ordering::Relaxed);
}

pub struct PhProbe {
    _adc_gpio: i32,
}

impl PhProbe {
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
        hw_init::adc1_read(hw_init::ADC1_CH_PH)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_PH_ADC.load(Ordering::Relaxed)
    }
}
