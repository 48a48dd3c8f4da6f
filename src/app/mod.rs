//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the AquaSense monitor:
//! sampling, conductivity derivation, quality scoring, and alert
//! evaluation.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod alerts;
pub mod classifier;
pub mod context;
pub mod events;
pub mod ports;
pub mod sampler;
pub mod service;
