//! Check-in timing configuration
//!
//! All deadlines, pulse shapes and buzzer frequencies for the Lifeline
//! device.  The configuration is fixed at construction time; nothing in the
//! running system mutates it.  Tests build shortened variants to keep
//! scenarios deterministic and fast.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core check-in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinConfig {
    // --- Timing ---
    /// Main loop cadence (milliseconds)
    pub tick_interval_ms: u32,
    /// Time without a check-in before the countdown starts (milliseconds)
    pub wait_timeout_ms: u32,
    /// Length of the escalating countdown (milliseconds)
    pub countdown_duration_ms: u32,
    /// Buzzer on-time at the start of every countdown second (milliseconds)
    pub countdown_pulse_on_ms: u32,

    // --- Buzzer ---
    /// Countdown tone at the first second (Hz)
    pub buzzer_base_freq_hz: u32,
    /// Countdown tone ceiling (Hz)
    pub buzzer_max_freq_hz: u32,
    /// Emergency alert tone (Hz)
    pub emergency_freq_hz: u32,

    // --- Alert pattern ---
    /// Number of emergency tone pulses
    pub alert_pulse_count: u8,
    /// Emergency pulse on-time (milliseconds)
    pub alert_pulse_on_ms: u32,
    /// Silence between emergency pulses (milliseconds)
    pub alert_pulse_off_ms: u32,
    /// Red hold after the last pulse before returning to waiting (milliseconds)
    pub alert_hold_ms: u32,

    // --- Safe confirmation ---
    /// How long the "SEGURO" screen stays up (milliseconds)
    pub safe_dwell_ms: u32,
}

impl Default for CheckinConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_interval_ms: 1000,       // 1 Hz
            wait_timeout_ms: 30_000,      // 30 s
            countdown_duration_ms: 10_000, // 10 s
            countdown_pulse_on_ms: 500,

            // Buzzer
            buzzer_base_freq_hz: 500,
            buzzer_max_freq_hz: 2000,
            emergency_freq_hz: 1000,

            // Alert pattern
            alert_pulse_count: 5,
            alert_pulse_on_ms: 500,
            alert_pulse_off_ms: 200,
            alert_hold_ms: 1000,

            // Safe confirmation
            safe_dwell_ms: 2000,
        }
    }
}

impl CheckinConfig {
    /// Configuration the board runs with.
    ///
    /// Same deadlines as [`Default`], sampled every 100 ms so the 500 ms
    /// countdown pulses and the 500/200 ms alert pulses land on tick
    /// boundaries.  [`Default`] keeps the 1 s check-in step.
    pub fn device() -> Self {
        Self {
            tick_interval_ms: 100,
            ..Self::default()
        }
    }

    /// Reject configurations the state machine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        if self.wait_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("wait_timeout_ms must be > 0"));
        }
        if self.countdown_duration_ms < 1000 {
            return Err(ConfigError::ValidationFailed(
                "countdown_duration_ms must cover at least one second",
            ));
        }
        if self.countdown_pulse_on_ms > 1000 {
            return Err(ConfigError::ValidationFailed(
                "countdown_pulse_on_ms must fit in one second",
            ));
        }
        if self.buzzer_base_freq_hz == 0 || self.emergency_freq_hz == 0 {
            return Err(ConfigError::ValidationFailed("buzzer frequencies must be > 0"));
        }
        if self.buzzer_max_freq_hz < self.buzzer_base_freq_hz {
            return Err(ConfigError::ValidationFailed(
                "buzzer_max_freq_hz must be >= buzzer_base_freq_hz",
            ));
        }
        if self.alert_pulse_count == 0 || self.alert_pulse_on_ms == 0 {
            return Err(ConfigError::ValidationFailed("alert pattern must contain a pulse"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.tick_interval_ms))
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.wait_timeout_ms))
    }

    pub fn countdown_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.countdown_duration_ms))
    }

    /// Whole seconds shown at the start of the countdown.
    pub fn countdown_secs(&self) -> u32 {
        self.countdown_duration_ms.div_ceil(1000)
    }

    pub fn safe_dwell(&self) -> Duration {
        Duration::from_millis(u64::from(self.safe_dwell_ms))
    }

    /// One emergency pulse plus the silence after it (milliseconds).
    pub fn alert_period_ms(&self) -> u64 {
        u64::from(self.alert_pulse_on_ms) + u64::from(self.alert_pulse_off_ms)
    }

    /// Total length of the emergency sequence: pulses plus the final hold.
    pub fn alert_duration(&self) -> Duration {
        Duration::from_millis(
            self.alert_period_ms() * u64::from(self.alert_pulse_count)
                + u64::from(self.alert_hold_ms),
        )
    }
}
