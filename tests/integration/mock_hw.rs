//! Mock adapters for integration tests.
//!
//! Scripted sensor input plus recording delay, transport and event sink,
//! so tests can assert on everything a cycle did without real ADC or
//! UART hardware.

use std::collections::VecDeque;

use aquasense::app::events::AppEvent;
use aquasense::app::ports::{AnalogChannel, EventSink, SensorPort};
use aquasense::uplink::Transport;
use embedded_hal::delay::DelayNs;

// ── ScriptedSensors ───────────────────────────────────────────

/// Replays queued values per channel; the last value repeats once the
/// queue runs dry.
pub struct ScriptedSensors {
    ph: VecDeque<u16>,
    turbidity: VecDeque<u16>,
    temperature: VecDeque<f32>,
    last_ph: u16,
    last_turbidity: u16,
    last_temperature: f32,
    pub raw_reads: u32,
    pub temperature_reads: u32,
}

#[allow(dead_code)]
impl ScriptedSensors {
    /// Constant input on every channel.
    pub fn constant(ph_raw: u16, turbidity_raw: u16, temperature_c: f32) -> Self {
        Self {
            ph: VecDeque::new(),
            turbidity: VecDeque::new(),
            temperature: VecDeque::new(),
            last_ph: ph_raw,
            last_turbidity: turbidity_raw,
            last_temperature: temperature_c,
            raw_reads: 0,
            temperature_reads: 0,
        }
    }

    pub fn queue_ph(&mut self, raws: &[u16]) -> &mut Self {
        self.ph.extend(raws);
        self
    }

    pub fn queue_turbidity(&mut self, raws: &[u16]) -> &mut Self {
        self.turbidity.extend(raws);
        self
    }

    pub fn queue_temperature(&mut self, values: &[f32]) -> &mut Self {
        self.temperature.extend(values);
        self
    }
}

impl SensorPort for ScriptedSensors {
    fn read_raw(&mut self, channel: AnalogChannel) -> u16 {
        self.raw_reads += 1;
        match channel {
            AnalogChannel::Ph => {
                if let Some(v) = self.ph.pop_front() {
                    self.last_ph = v;
                }
                self.last_ph
            }
            AnalogChannel::Turbidity => {
                if let Some(v) = self.turbidity.pop_front() {
                    self.last_turbidity = v;
                }
                self.last_turbidity
            }
        }
    }

    fn read_temperature_c(&mut self) -> f32 {
        self.temperature_reads += 1;
        if let Some(v) = self.temperature.pop_front() {
            self.last_temperature = v;
        }
        self.last_temperature
    }
}

// ── RecordingDelay ────────────────────────────────────────────

/// Records every requested delay instead of sleeping.
#[derive(Default)]
pub struct RecordingDelay {
    pub delays_ns: Vec<u32>,
}

#[allow(dead_code)]
impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.delays_ns.iter().map(|&ns| u64::from(ns)).sum::<u64>() / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ns.push(ns);
    }
}

// ── Transports ────────────────────────────────────────────────

/// Accepts at most `chunk` bytes per write and keeps everything.
pub struct RecordingTransport {
    pub sent: Vec<u8>,
    pub flushes: u32,
    chunk: usize,
}

#[allow(dead_code)]
impl RecordingTransport {
    pub fn new() -> Self {
        Self::with_chunk(usize::MAX)
    }

    pub fn with_chunk(chunk: usize) -> Self {
        Self {
            sent: Vec::new(),
            flushes: 0,
            chunk,
        }
    }

    /// Sent bytes split into newline-terminated lines.
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.sent)
            .split_inclusive('\n')
            .map(str::to_owned)
            .collect()
    }
}

impl Transport for RecordingTransport {
    type Error = ();

    fn write(&mut self, data: &[u8]) -> Result<usize, ()> {
        let n = data.len().min(self.chunk);
        self.sent.extend_from_slice(&data[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), ()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Fails every write while `down` is set.
pub struct FlakyTransport {
    pub down: bool,
    pub inner: RecordingTransport,
}

impl FlakyTransport {
    pub fn down() -> Self {
        Self {
            down: true,
            inner: RecordingTransport::new(),
        }
    }
}

impl Transport for FlakyTransport {
    type Error = &'static str;

    fn write(&mut self, data: &[u8]) -> Result<usize, &'static str> {
        if self.down {
            return Err("link down");
        }
        self.inner.write(data).map_err(|()| "unreachable")
    }

    fn flush(&mut self) -> Result<(), &'static str> {
        if self.down {
            return Err("link down");
        }
        self.inner.flush().map_err(|()| "unreachable")
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that collects every emitted event.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Alert(a) => Some(a.to_string()),
                _ => None,
            })
            .collect()
    }

    pub fn reports(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Report(_)))
            .count()
    }

    pub fn uplink_failures(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::UplinkFailed { consecutive } => Some(*consecutive),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
