//! Fixed-window averaging sampler.
//!
//! For each analog channel the sampler takes `num_samples` raw ADC
//! conversions spaced `sample_delay_ms` apart, converts each one to
//! physical units through the channel's [`LinearCalibration`], and
//! returns the arithmetic mean.  There is no outlier rejection; the mean
//! is clamped to the physical range afterwards.
//!
//! The temperature probe is read once per cycle.  A sentinel or
//! implausible value is replaced by the configured default instead of
//! being reported as an error.

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::config::{LinearCalibration, SystemConfig};
use crate::sensors::temperature::TEMPERATURE_FAULT_SENTINEL_C;

use super::context::SensorReading;
use super::ports::{AnalogChannel, SensorPort};

/// Readings above this (°C) are treated as a probe fault.
pub const TEMPERATURE_PLAUSIBLE_MAX_C: f32 = 100.0;

/// Output of one sampling pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub reading: SensorReading,
    /// The temperature probe faulted and the default was substituted.
    pub temperature_fallback: bool,
}

/// Sampling parameters copied out of [`SystemConfig`].
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    adc_max: u16,
    adc_vref: f32,
    ph_cal: LinearCalibration,
    turbidity_cal: LinearCalibration,
    num_samples: u8,
    sample_delay_ms: u32,
    default_temperature_c: f32,
}

impl Sampler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            adc_max: config.adc_max,
            adc_vref: config.adc_vref,
            ph_cal: config.ph_calibration,
            turbidity_cal: config.turbidity_calibration,
            num_samples: config.num_samples.max(1),
            sample_delay_ms: config.sample_delay_ms,
            default_temperature_c: config.default_temperature_c,
        }
    }

    /// Sample every probe and build a clamped [`SensorReading`].
    pub fn sample(&self, hw: &mut impl SensorPort, delay: &mut impl DelayNs) -> Sample {
        let ph = self.channel_mean(hw, delay, AnalogChannel::Ph);
        let turbidity = self.channel_mean(hw, delay, AnalogChannel::Turbidity);

        let raw_temp = hw.read_temperature_c();
        let (temperature_c, temperature_fallback) =
            sanitize_temperature(raw_temp, self.default_temperature_c);
        if temperature_fallback {
            warn!(
                "Temperature probe fault (read {:.1}\u{00b0}C), using default {:.1}\u{00b0}C",
                raw_temp, temperature_c
            );
        }

        Sample {
            reading: SensorReading::new(ph, turbidity, temperature_c),
            temperature_fallback,
        }
    }

    /// Mean of `num_samples` calibrated conversions on `channel`.
    ///
    /// The delay is issued between conversions, so one call blocks for
    /// `(num_samples - 1) * sample_delay_ms`.
    pub fn channel_mean(
        &self,
        hw: &mut impl SensorPort,
        delay: &mut impl DelayNs,
        channel: AnalogChannel,
    ) -> f32 {
        let cal = match channel {
            AnalogChannel::Ph => self.ph_cal,
            AnalogChannel::Turbidity => self.turbidity_cal,
        };

        let mut sum = 0.0_f32;
        for i in 0..self.num_samples {
            if i > 0 {
                delay.delay_ms(self.sample_delay_ms);
            }
            let raw = hw.read_raw(channel);
            sum += cal.apply(self.adc_to_volts(raw));
        }
        let mean = sum / f32::from(self.num_samples);
        debug!("{} mean over {} samples: {:.3}", channel.name(), self.num_samples, mean);
        mean
    }

    fn adc_to_volts(&self, raw: u16) -> f32 {
        f32::from(raw) / f32::from(self.adc_max) * self.adc_vref
    }
}

/// Replace a faulted probe value with `default_c`.
///
/// Returns the value to use and whether a substitution happened.  The
/// sentinel (or anything colder), anything above
/// [`TEMPERATURE_PLAUSIBLE_MAX_C`], and NaN all count as faults.
pub fn sanitize_temperature(celsius: f32, default_c: f32) -> (f32, bool) {
    let faulted = celsius.is_nan()
        || celsius <= TEMPERATURE_FAULT_SENTINEL_C
        || celsius > TEMPERATURE_PLAUSIBLE_MAX_C;
    if faulted {
        (default_c, true)
    } else {
        (celsius, false)
    }
}
