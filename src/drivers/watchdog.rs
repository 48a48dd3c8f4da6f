//! Task Watchdog Timer (TWDT) driver.
//!
//! Wraps the ESP-IDF TWDT API to reset the device if the sampling loop
//! stalls for longer than [`WATCHDOG_TIMEOUT_MS`].
//!
//! A cycle blocks for the configured sampling window, and the loop then
//! sleeps out the rest of the period, so the timeout is derived from the
//! configured cadence rather than fixed.  The loop calls `feed()` once
//! per cycle and once after the inter-cycle sleep.

use crate::config::SystemConfig;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

/// Floor for the TWDT timeout.
pub const WATCHDOG_TIMEOUT_MS: u32 = 10_000;

/// Timeout that covers one worst-case feed interval with 2x headroom.
pub fn timeout_for(config: &SystemConfig) -> u32 {
    let sampling = u32::try_from(config.sampling_window_ms()).unwrap_or(u32::MAX);
    let longest = sampling.max(config.cycle_interval_ms);
    longest.saturating_mul(2).max(WATCHDOG_TIMEOUT_MS)
}

pub struct Watchdog {
    #[cfg(target_os = "espidf")]
    subscribed: bool,
}

impl Watchdog {
    /// Initialise and subscribe the current task to the TWDT.
    pub fn new(timeout_ms: u32) -> Self {
        #[cfg(target_os = "espidf")]
        {
            unsafe {
                let cfg = esp_task_wdt_config_t {
                    timeout_ms,
                    idle_core_mask: 0,
                    trigger_panic: true,
                };
                let ret = esp_task_wdt_reconfigure(&cfg);
                if ret != ESP_OK {
                    log::warn!(
                        "TWDT reconfigure returned {} (may already be configured)",
                        ret
                    );
                }

                let ret = esp_task_wdt_add(core::ptr::null_mut());
                let subscribed = ret == ESP_OK;
                if subscribed {
                    info!("Watchdog: subscribed ({} ms timeout, panic on trigger)", timeout_ms);
                } else {
                    log::warn!("Watchdog: failed to subscribe ({})", ret);
                }

                Self { subscribed }
            }
        }

        #[cfg(not(target_os = "espidf"))]
        {
            log::info!("Watchdog(sim): no-op ({} ms)", timeout_ms);
            Self {}
        }
    }

    /// Feed the watchdog. Must be called at least once per timeout.
    pub fn feed(&self) {
        #[cfg(target_os = "espidf")]
        {
            if self.subscribed {
                unsafe {
                    esp_task_wdt_reset();
                }
            }
        }
    }
}
