//! Query-line codec for the companion network module.
//!
//! Wire format (one ASCII line per cycle):
//! ```text
//! /update?ph=7.00&turbidity=2.00&temperature=22.00&status=GOOD\n
//! └─path─┘└──────────────── key=value pairs, '&'-joined ──────┘
//! ```
//!
//! The companion reads a line, appends it to its cloud endpoint URL and
//! issues the request.  Values are never percent-encoded, so keys and
//! values are restricted to unreserved URL characters.

use core::fmt::Write;

use heapless::{LinearMap, String};

use crate::app::classifier::QualityClass;
use crate::app::context::SensorReading;

use super::UplinkError;

/// Maximum key/value pairs in one request.
pub const MAX_PARAMS: usize = 8;
/// Maximum length of one encoded value.
pub const VALUE_CAP: usize = 16;
/// Maximum length of one encoded line, terminator included.
pub const LINE_CAP: usize = 128;

/// Insertion-ordered key/value map for one uplink request.
#[derive(Debug, Clone, Default)]
pub struct UplinkRequest {
    params: LinearMap<&'static str, String<VALUE_CAP>, MAX_PARAMS>,
}

impl UplinkRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard per-cycle request: `ph`, `turbidity`, `temperature`, `status`.
    pub fn from_cycle(reading: &SensorReading, class: QualityClass) -> Result<Self, UplinkError> {
        let mut req = Self::new();
        req.insert_f32("ph", reading.ph)?;
        req.insert_f32("turbidity", reading.turbidity)?;
        req.insert_f32("temperature", reading.temperature_c)?;
        req.insert("status", class.label())?;
        Ok(req)
    }

    /// Insert or replace `key`.  Replacing keeps the key's original position.
    pub fn insert(&mut self, key: &'static str, value: &str) -> Result<(), UplinkError> {
        if key.is_empty() || !key.bytes().all(is_unreserved) {
            return Err(UplinkError::InvalidKey);
        }
        if !value.bytes().all(is_unreserved) {
            return Err(UplinkError::InvalidValue);
        }
        let mut v = String::new();
        v.push_str(value).map_err(|_| UplinkError::InvalidValue)?;
        self.params
            .insert(key, v)
            .map_err(|_| UplinkError::BufferFull)?;
        Ok(())
    }

    /// Insert a value rendered with two decimals.
    pub fn insert_f32(&mut self, key: &'static str, value: f32) -> Result<(), UplinkError> {
        let mut v: String<VALUE_CAP> = String::new();
        write!(v, "{:.2}", value).map_err(|_| UplinkError::InvalidValue)?;
        self.insert(key, &v)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| **k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Encode as `path?k=v&k=v\n`.
    pub fn encode(&self, path: &str) -> Result<String<LINE_CAP>, UplinkError> {
        let mut line: String<LINE_CAP> = String::new();
        line.push_str(path).map_err(|_| UplinkError::BufferFull)?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(line, "{}{}={}", sep, key, value).map_err(|_| UplinkError::BufferFull)?;
        }
        line.push('\n').map_err(|_| UplinkError::BufferFull)?;
        Ok(line)
    }
}

/// RFC 3986 unreserved characters.
pub(crate) fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}
