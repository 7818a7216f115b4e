//! Lifeline firmware library.
//!
//! A dead-man's-switch check-in device: the wearer must press "Safe" at
//! least once per check-in window, or the device counts down and raises
//! an alert.  Exposes the pure-logic modules for integration testing;
//! all ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod runner;

pub mod adapters;
pub mod drivers;
