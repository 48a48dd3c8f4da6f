//! System configuration parameters
//!
//! All tunable parameters for the AquaSense monitor: ADC scaling, probe
//! calibration, sampling cadence, alert limits and the uplink path.
//! The whole struct is owned by [`MonitorService`](crate::app::service::MonitorService)
//! and threaded into each cycle; nothing here is global.

use serde::{Deserialize, Serialize};

use crate::app::ports::{AnalogChannel, ConfigError};
use crate::uplink::codec;

/// Linear calibration `value = scale * volts + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCalibration {
    pub scale: f32,
    pub offset: f32,
}

impl LinearCalibration {
    /// Gravity analog pH meter, 3.3 V supply.
    pub const PH_DEFAULT: Self = Self {
        scale: -5.70,
        offset: 21.34,
    };

    /// Analog turbidity probe behind a 2:3 divider (2.8 V = clear water).
    pub const TURBIDITY_DEFAULT: Self = Self {
        scale: -285.71,
        offset: 800.0,
    };

    pub const fn new(scale: f32, offset: f32) -> Self {
        Self { scale, offset }
    }

    #[inline]
    pub fn apply(&self, volts: f32) -> f32 {
        self.scale * volts + self.offset
    }

    fn is_finite(&self) -> bool {
        self.scale.is_finite() && self.offset.is_finite()
    }
}

/// Safe operating bounds used by the alert evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertLimits {
    pub ph_min: f32,
    pub ph_max: f32,
    /// Turbidity above this (NTU) raises an alert.
    pub turbidity_max_ntu: f32,
    pub temperature_min_c: f32,
    pub temperature_max_c: f32,
}

impl Default for AlertLimits {
    fn default() -> Self {
        Self {
            ph_min: 6.5,
            ph_max: 8.5,
            turbidity_max_ntu: 5.0,
            temperature_min_c: 5.0,
            temperature_max_c: 35.0,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- ADC ---
    /// Full-scale ADC count (4095 for the 12-bit ESP32-S3 ADC)
    pub adc_max: u16,
    /// ADC reference voltage (V)
    pub adc_vref: f32,

    // --- Calibration ---
    pub ph_calibration: LinearCalibration,
    pub turbidity_calibration: LinearCalibration,

    // --- Sampling ---
    /// Sub-samples averaged per analog channel each cycle
    pub num_samples: u8,
    /// Delay between sub-samples (milliseconds)
    pub sample_delay_ms: u32,
    /// Period of one sample/classify/uplink cycle (milliseconds)
    pub cycle_interval_ms: u32,
    /// Substituted when the temperature probe reports a fault
    pub default_temperature_c: f32,

    // --- Alerts ---
    pub alert_limits: AlertLimits,

    // --- Uplink ---
    /// Request path prefixed to the uplink query line
    pub uplink_path: heapless::String<32>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut uplink_path = heapless::String::new();
        // "/update" is well under the 32-byte capacity.
        let _ = uplink_path.push_str("/update");

        Self {
            // ADC
            adc_max: 4095,
            adc_vref: 3.3,

            // Calibration
            ph_calibration: LinearCalibration::PH_DEFAULT,
            turbidity_calibration: LinearCalibration::TURBIDITY_DEFAULT,

            // Sampling
            num_samples: 10,
            sample_delay_ms: 100,
            cycle_interval_ms: 5000, // every 5 s
            default_temperature_c: 25.0,

            alert_limits: AlertLimits::default(),
            uplink_path,
        }
    }
}

impl SystemConfig {
    /// Upper bound on `num_samples`; keeps one cycle's busy-wait bounded.
    pub const MAX_SAMPLES: u8 = 64;

    /// Check every field for a physically meaningful value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adc_max == 0 {
            return Err(ConfigError::ValidationFailed("adc_max must be non-zero"));
        }
        if !(self.adc_vref.is_finite() && self.adc_vref > 0.0) {
            return Err(ConfigError::ValidationFailed("adc_vref must be positive"));
        }
        if !self.ph_calibration.is_finite() {
            return Err(ConfigError::ValidationFailed("ph_calibration not finite"));
        }
        if !self.turbidity_calibration.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "turbidity_calibration not finite",
            ));
        }
        if self.num_samples == 0 || self.num_samples > Self::MAX_SAMPLES {
            return Err(ConfigError::ValidationFailed("num_samples must be 1..=64"));
        }
        if self.sampling_window_ms() >= u64::from(self.cycle_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "sampling window must be shorter than cycle_interval_ms",
            ));
        }
        if !self.default_temperature_c.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "default_temperature_c not finite",
            ));
        }
        let l = &self.alert_limits;
        if l.ph_min >= l.ph_max {
            return Err(ConfigError::ValidationFailed("alert ph_min >= ph_max"));
        }
        if l.temperature_min_c >= l.temperature_max_c {
            return Err(ConfigError::ValidationFailed(
                "alert temperature_min_c >= temperature_max_c",
            ));
        }
        if l.turbidity_max_ntu < 0.0 {
            return Err(ConfigError::ValidationFailed(
                "alert turbidity_max_ntu negative",
            ));
        }
        if !self.uplink_path.starts_with('/') {
            return Err(ConfigError::ValidationFailed(
                "uplink_path must start with '/'",
            ));
        }
        if !self
            .uplink_path
            .bytes()
            .all(|b| b == b'/' || codec::is_unreserved(b))
        {
            return Err(ConfigError::ValidationFailed(
                "uplink_path has reserved URL characters",
            ));
        }
        Ok(())
    }

    /// Time one sampling pass spends in inter-sample delays: `n - 1`
    /// gaps on every analog channel.
    pub fn sampling_window_ms(&self) -> u64 {
        let gaps = u64::from(self.num_samples.max(1) - 1);
        AnalogChannel::ALL.len() as u64 * gaps * u64::from(self.sample_delay_ms)
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Boot-time config: the JSON override if one is given, else defaults.
    pub fn load(override_json: Option<&str>) -> Result<Self, ConfigError> {
        match override_json {
            Some(json) => Self::from_json(json),
            None => Ok(Self::default()),
        }
    }
}
