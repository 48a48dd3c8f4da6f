//! Transport abstraction — any byte-oriented channel to the companion module.
//!
//! Concrete implementations:
//! - UART serial to the WiFi companion ([`SerialUplink`](crate::adapters::serial_uplink::SerialUplink))
//! - [`NullTransport`] when no companion is fitted
//!
//! The encoder and service are generic over `Transport`, so adding a new
//! link requires zero changes to the uplink logic.

use super::UplinkError;

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Write one encoded line and flush it.
///
/// Short writes are retried until the whole line is out; a write that
/// accepts zero bytes is treated as a failure rather than spun on.
pub fn send_line<T: Transport>(transport: &mut T, line: &str) -> Result<(), UplinkError> {
    let mut remaining = line.as_bytes();
    while !remaining.is_empty() {
        match transport.write(remaining) {
            Ok(0) => return Err(UplinkError::TransportWrite),
            Ok(n) => remaining = &remaining[n.min(remaining.len())..],
            Err(e) => {
                log::debug!("uplink write error: {:?}", e);
                return Err(UplinkError::TransportWrite);
            }
        }
    }
    transport.flush().map_err(|e| {
        log::debug!("uplink flush error: {:?}", e);
        UplinkError::TransportFlush
    })
}

/// A null transport that discards all writes.
/// Useful as a default when no companion module is connected.
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = ();

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}
