//! GPIO / peripheral pin assignments for the AquaSense probe board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Probes — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Gravity analog pH meter signal board.
/// ADC1 channel 3 (GPIO 4 on ESP32-S3).
pub const PH_ADC_GPIO: i32 = 4;

/// Analog turbidity probe, output through a 2:3 resistive divider.
/// ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const TURBIDITY_ADC_GPIO: i32 = 5;

/// NTC thermistor — 10 kΩ @ 25 °C, voltage-divider to ADC.
/// ADC1 channel 8 (GPIO 9 on ESP32-S3).
pub const TEMP_ADC_GPIO: i32 = 9;

/// ADC attenuation for all probes (12 dB → 0 – 3.3 V range).
pub const PROBE_ADC_ATTEN: u32 = 3; // adc_atten_t_ADC_ATTEN_DB_12

// ---------------------------------------------------------------------------
// Uplink UART (WiFi companion module)
// ---------------------------------------------------------------------------

pub const UPLINK_UART_TX_GPIO: i32 = 17;
pub const UPLINK_UART_RX_GPIO: i32 = 18;
/// Line rate agreed with the companion firmware.
pub const UPLINK_UART_BAUD: u32 = 115_200;
