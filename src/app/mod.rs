//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the check-in rules for the Lifeline device: the
//! state machine orchestration and the translation of its outputs into
//! port calls.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
