//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the configuration, the sampler and the last
//! cycle's state.  It exposes a clean, hardware-agnostic API.  All I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!     DelayNs ──▶ │        MonitorService         │
//!                 │ Sampler · Classifier · Alerts │ ──▶ Transport (uplink)
//!                 └──────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::SystemConfig;
use crate::uplink::{self, Transport, UplinkError, UplinkRequest};

use super::alerts;
use super::classifier;
use super::context::{CycleState, DerivedMetrics};
use super::events::{AppEvent, CycleReport};
use super::ports::{EventSink, SensorPort};
use super::sampler::Sampler;

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The monitor service orchestrates one sample/classify/report cycle.
pub struct MonitorService {
    config: SystemConfig,
    sampler: Sampler,
    last: Option<CycleState>,
    cycle_count: u64,
    uplink_failures: u32,
}

impl MonitorService {
    /// Construct the service from configuration.
    pub fn new(config: SystemConfig) -> Self {
        let sampler = Sampler::new(&config);
        Self {
            config,
            sampler,
            last: None,
            cycle_count: 0,
            uplink_failures: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started);
        info!(
            "MonitorService started: {} samples x {} ms, cycle {} ms",
            self.config.num_samples, self.config.sample_delay_ms, self.config.cycle_interval_ms
        );
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle: sample → derive → classify → alert → report → uplink.
    ///
    /// Always produces a report; uplink failures are counted and emitted
    /// but never abort the cycle.
    pub fn run_cycle<T: Transport>(
        &mut self,
        hw: &mut impl SensorPort,
        delay: &mut impl DelayNs,
        uplink: &mut T,
        sink: &mut impl EventSink,
    ) -> CycleReport {
        self.cycle_count += 1;

        // 1. Sample every probe
        let sample = self.sampler.sample(hw, delay);
        let reading = sample.reading;

        // 2. Derived features
        let metrics = DerivedMetrics::from_reading(&reading);

        // 3. Score and classify
        let (breakdown, class) = classifier::classify(&reading, &metrics);

        let state = CycleState {
            cycle: self.cycle_count,
            reading,
            metrics,
            breakdown,
            class,
            temperature_fallback: sample.temperature_fallback,
        };
        self.last = Some(state);

        // 4. Report
        let report = CycleReport::from(&state);
        sink.emit(&AppEvent::Report(report));

        // 5. Alerts
        for alert in alerts::evaluate(&reading, class, &self.config.alert_limits) {
            sink.emit(&AppEvent::Alert(alert));
        }

        // 6. Uplink
        match self.send_uplink(&state, uplink) {
            Ok(()) => {
                if self.uplink_failures > 0 {
                    info!("Uplink recovered after {} failed cycle(s)", self.uplink_failures);
                }
                self.uplink_failures = 0;
            }
            Err(e) => {
                self.uplink_failures = self.uplink_failures.saturating_add(1);
                warn!("Uplink failed ({}), {} consecutive", e, self.uplink_failures);
                sink.emit(&AppEvent::UplinkFailed {
                    consecutive: self.uplink_failures,
                });
            }
        }

        report
    }

    // ── Queries ───────────────────────────────────────────────

    /// State of the most recent cycle, if any has run.
    pub fn last_cycle(&self) -> Option<&CycleState> {
        self.last.as_ref()
    }

    /// Total cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Consecutive cycles whose uplink failed (0 after any success).
    pub fn uplink_failures(&self) -> u32 {
        self.uplink_failures
    }

    // ── Internal ──────────────────────────────────────────────

    fn send_uplink<T: Transport>(
        &self,
        state: &CycleState,
        uplink: &mut T,
    ) -> Result<(), UplinkError> {
        let request = UplinkRequest::from_cycle(&state.reading, state.class)?;
        let line = request.encode(&self.config.uplink_path)?;
        uplink::send_line(uplink, &line)
    }
}
