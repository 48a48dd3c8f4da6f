//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (probes, event sinks) implement these traits.  The
//! [`MonitorService`](super::service::MonitorService) consumes them via
//! generics, so the domain core never touches hardware directly.  The
//! uplink byte channel lives in [`crate::uplink::transport`].

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Analog probe channels sampled by the [`Sampler`](super::sampler::Sampler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalogChannel {
    Ph,
    Turbidity,
}

impl AnalogChannel {
    /// Every channel the sampler averages, in sampling order.
    pub const ALL: [Self; 2] = [Self::Ph, Self::Turbidity];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ph => "ph",
            Self::Turbidity => "turbidity",
        }
    }
}

/// Read-side port: the domain calls this to obtain raw probe data.
///
/// Conversion to physical units happens in the domain, using the
/// calibration carried in [`SystemConfig`](crate::config::SystemConfig).
pub trait SensorPort {
    /// One raw ADC conversion on `channel` (0 – `adc_max`).
    fn read_raw(&mut self, channel: AnalogChannel) -> u16;

    /// One temperature probe conversion in °C.
    ///
    /// A disconnected or shorted probe reports
    /// [`TEMPERATURE_FAULT_SENTINEL_C`](crate::sensors::temperature::TEMPERATURE_FAULT_SENTINEL_C)
    /// rather than an error.
    fn read_temperature_c(&mut self) -> f32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, a
/// display, a test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from loading or validating [`SystemConfig`](crate::config::SystemConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Document failed to parse.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}
