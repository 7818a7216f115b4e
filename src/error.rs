//! Unified error types for the Lifeline firmware.
//!
//! Two peripheral categories with very different consequences:
//!
//! - [`PeripheralInitError`] happens once at boot and is fatal: `main`
//!   fails fast.
//! - [`PeripheralWriteError`] happens at runtime and is never fatal: the
//!   check-in timer keeps running and the output is retried next tick.
//!
//! The timer/state logic itself has no failure paths.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A peripheral could not be brought up.
    Init(PeripheralInitError),
    /// A runtime write to an output failed.
    Write(PeripheralWriteError),
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Write(e) => write!(f, "write: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Initialisation errors (fatal)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralInitError {
    /// The OLED did not acknowledge its init sequence.
    Display,
    /// LEDC timer/channel config for the buzzer failed (ESP-IDF return code).
    Buzzer(i32),
    /// A GPIO could not be configured.
    Gpio,
    /// The I2C bus could not be configured.
    I2c,
}

impl fmt::Display for PeripheralInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display => write!(f, "display init failed"),
            Self::Buzzer(rc) => write!(f, "buzzer LEDC init failed (rc={})", rc),
            Self::Gpio => write!(f, "GPIO config failed"),
            Self::I2c => write!(f, "I2C bus init failed"),
        }
    }
}

impl std::error::Error for PeripheralInitError {}

impl From<PeripheralInitError> for Error {
    fn from(e: PeripheralInitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Runtime write errors (non-fatal)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralWriteError {
    /// Frame flush to the OLED failed.
    Display,
    /// A status LED GPIO write failed.
    Led,
    /// Buzzer frequency/duty update failed.
    Buzzer,
}

impl fmt::Display for PeripheralWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display => write!(f, "display write failed"),
            Self::Led => write!(f, "LED write failed"),
            Self::Buzzer => write!(f, "buzzer write failed"),
        }
    }
}

impl std::error::Error for PeripheralWriteError {}

impl From<PeripheralWriteError> for Error {
    fn from(e: PeripheralWriteError) -> Self {
        Self::Write(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
