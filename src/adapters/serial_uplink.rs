//! UART link to the WiFi companion module.
//!
//! Implements [`Transport`] for the uplink.  The companion reads one
//! query line at a time and forwards it to the cloud endpoint.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: UART1 via hw_init (driver installed at boot).
//! - **all other targets**: bytes are kept in memory so host tests and
//!   simulation can inspect what would have gone out.

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::uplink::Transport;

/// Transport errors carry the raw ESP-IDF return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialError(pub i32);

/// Line-oriented serial uplink.
pub struct SerialUplink {
    bytes_sent: u64,
    #[cfg(not(target_os = "espidf"))]
    sent: Vec<u8>,
}

impl Default for SerialUplink {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialUplink {
    pub fn new() -> Self {
        Self {
            bytes_sent: 0,
            #[cfg(not(target_os = "espidf"))]
            sent: Vec::new(),
        }
    }

    /// Total bytes accepted by the UART since boot.
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    /// Everything written so far (simulation only).
    #[cfg(not(target_os = "espidf"))]
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }
}

impl Transport for SerialUplink {
    type Error = SerialError;

    #[cfg(target_os = "espidf")]
    fn write(&mut self, data: &[u8]) -> Result<usize, SerialError> {
        let n = hw_init::uart_write(data).map_err(SerialError)?;
        self.bytes_sent += n as u64;
        Ok(n)
    }

    #[cfg(not(target_os = "espidf"))]
    fn write(&mut self, data: &[u8]) -> Result<usize, SerialError> {
        self.sent.extend_from_slice(data);
        self.bytes_sent += data.len() as u64;
        Ok(data.len())
    }

    #[cfg(target_os = "espidf")]
    fn flush(&mut self) -> Result<(), SerialError> {
        hw_init::uart_wait_tx_done().map_err(SerialError)
    }

    #[cfg(not(target_os = "espidf"))]
    fn flush(&mut self) -> Result<(), SerialError> {
        Ok(())
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;
    use crate::uplink::send_line;

    #[test]
    fn sim_records_lines() {
        let mut uplink = SerialUplink::new();
        send_line(&mut uplink, "/update?status=GOOD\n").unwrap();
        send_line(&mut uplink, "/update?status=POOR\n").unwrap();
        assert_eq!(uplink.sent(), b"/update?status=GOOD\n/update?status=POOR\n");
        assert_eq!(uplink.bytes_sent(), 40);
    }
}
