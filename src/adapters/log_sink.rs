//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! This is the per-cycle human-readable report stream.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | water quality monitor running");
            }
            AppEvent::Report(report) => {
                info!("CYCLE {} | {}", report.cycle, report);
            }
            AppEvent::Alert(alert) => {
                warn!("{}", alert);
            }
            AppEvent::UplinkFailed { consecutive } => {
                warn!("UPLINK | send failed ({} in a row)", consecutive);
            }
        }
    }
}
