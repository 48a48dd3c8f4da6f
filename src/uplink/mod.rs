//! Uplink to the companion network module.
//!
//! ```text
//! ┌───────────────┐   ┌──────────────┐   ┌──────────────────────┐
//! │ UplinkRequest │──▶│    Codec     │──▶│ Transport (UART/null)│──▶ companion
//! │ (key/value)   │   │ (query line) │   │                      │
//! └───────────────┘   └──────────────┘   └──────────────────────┘
//! ```
//!
//! Building the request, formatting the line and moving bytes are kept
//! apart so the sampler and classifier never see protocol details.

pub mod codec;
pub mod transport;

use core::fmt;

pub use codec::UplinkRequest;
pub use transport::{send_line, NullTransport, Transport};

/// Errors from encoding or sending an uplink line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UplinkError {
    /// Request map or line buffer is full.
    BufferFull,
    /// Key is empty or contains reserved URL characters.
    InvalidKey,
    /// Value is too long or contains reserved URL characters.
    InvalidValue,
    /// Transport rejected or stalled on a write.
    TransportWrite,
    /// Transport flush failed.
    TransportFlush,
}

impl fmt::Display for UplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferFull => write!(f, "uplink buffer full"),
            Self::InvalidKey => write!(f, "invalid uplink key"),
            Self::InvalidValue => write!(f, "invalid uplink value"),
            Self::TransportWrite => write!(f, "uplink write failed"),
            Self::TransportFlush => write!(f, "uplink flush failed"),
        }
    }
}
