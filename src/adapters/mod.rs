//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements  | Connects to                 |
//! |-----------------|-------------|-----------------------------|
//! | `hardware`      | SensorPort  | ESP32 ADC (pH, turbidity, NTC) |
//! | `log_sink`      | EventSink   | Serial log output           |
//! | `serial_uplink` | Transport   | UART to WiFi companion      |
//! | `time`          | DelayNs     | ESP32 system timer, FreeRTOS |

pub mod hardware;
pub mod log_sink;
pub mod serial_uplink;
pub mod time;
