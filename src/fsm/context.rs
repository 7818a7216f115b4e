//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the latest input sample, the check-in timers, the output
//! commands and the configuration.  The [`CheckinService`] applies the
//! outputs to the hardware ports after every tick.
//!
//! [`CheckinService`]: crate::app::service::CheckinService

use core::fmt::Write;

use crate::config::CheckinConfig;

/// Characters per display row: 128 px wide panel / 6 px glyphs.
pub const LINE_CHARS: usize = 21;

// ---------------------------------------------------------------------------
// Input sample (written by the run loop; read by state handlers)
// ---------------------------------------------------------------------------

/// One tick's view of the two buttons.  Consumed immediately, never queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEvent {
    pub safe_pressed: bool,
    pub emergency_pressed: bool,
}

impl InputEvent {
    pub const NONE: Self = Self {
        safe_pressed: false,
        emergency_pressed: false,
    };
    pub const SAFE: Self = Self {
        safe_pressed: true,
        emergency_pressed: false,
    };
    pub const EMERGENCY: Self = Self {
        safe_pressed: false,
        emergency_pressed: true,
    };
}

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Which of the three mutually exclusive status indicators is lit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LedColour {
    #[default]
    Off,
    /// Safe confirmed.
    Green,
    /// Countdown / alert.
    Red,
    /// Idle / waiting for check-in.
    Blue,
}

/// Desired LED + buzzer configuration for the current instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertCommand {
    pub led: LedColour,
    /// Tone frequency in Hz; `None` = silent.
    pub tone: Option<u32>,
}

impl AlertCommand {
    /// Everything dark and silent.
    pub const fn off() -> Self {
        Self {
            led: LedColour::Off,
            tone: None,
        }
    }
}

/// One display row, truncated to the panel width.
///
/// Non-ASCII characters are replaced with `?` since the font only covers ASCII.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayText(heapless::String<LINE_CHARS>);

impl DisplayText {
    pub fn new(text: &str) -> Self {
        let mut line = heapless::String::new();
        for c in text.chars().take(LINE_CHARS) {
            let c = if c.is_ascii() { c } else { '?' };
            // Capacity equals LINE_CHARS ASCII bytes, so this cannot overflow.
            let _ = line.push(c);
        }
        Self(line)
    }

    /// Format into a row, truncating anything past the panel width.
    pub fn from_fmt(args: core::fmt::Arguments<'_>) -> Self {
        let mut buf = heapless::String::<64>::new();
        // Overflow just truncates; the row keeps what fit.
        let _ = buf.write_fmt(args);
        Self::new(&buf)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Both rows of the status display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub line1: DisplayText,
    pub line2: DisplayText,
}

impl Screen {
    pub fn new(line1: &str, line2: &str) -> Self {
        Self {
            line1: DisplayText::new(line1),
            line2: DisplayText::new(line2),
        }
    }
}

/// Why the emergency alert fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertCause {
    /// Emergency-Request button pressed while waiting.
    Manual,
    /// Countdown expired without a Safe-Confirm.
    Timeout,
}

/// Outputs requested by the state handlers.
#[derive(Debug, Clone, Default)]
pub struct Outputs {
    pub alert: AlertCommand,
    /// New screen content, set only when the content changes.
    /// Taken (and cleared) by the service once rendered.
    pub screen: Option<Screen>,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Milliseconds elapsed since the current state was entered.
    pub ms_in_state: u64,
    /// Duration of the tick currently being processed (milliseconds).
    pub tick_ms: u64,

    // -- Input --
    /// Button sample for this tick.
    pub input: InputEvent,

    // -- Countdown --
    /// Whole countdown second last shown on the display.
    pub shown_secs: u32,

    // -- Outputs --
    pub outputs: Outputs,

    // -- Alert bookkeeping --
    /// Cause of the alert being (or about to be) sounded.
    pub alert_cause: AlertCause,
    /// Number of alerts raised since startup.
    pub alert_count: u32,
    /// Set by handlers for the service to turn into events.
    pub notices: Notices,

    // -- Configuration --
    pub config: CheckinConfig,
}

/// One-shot flags raised by handlers during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Notices {
    pub countdown_started: bool,
    /// Countdown second that was just shown, if any.
    pub countdown_tick: Option<u32>,
    pub alert_raised: Option<AlertCause>,
    pub safe_confirmed: bool,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: CheckinConfig) -> Self {
        Self {
            ms_in_state: 0,
            tick_ms: u64::from(config.tick_interval_ms),
            input: InputEvent::NONE,
            shown_secs: 0,
            outputs: Outputs::default(),
            alert_cause: AlertCause::Timeout,
            alert_count: 0,
            notices: Notices::default(),
            config,
        }
    }

    pub fn show(&mut self, line1: &str, line2: &str) {
        self.outputs.screen = Some(Screen::new(line1, line2));
    }

    /// Countdown time still to run, in milliseconds.
    pub fn remaining_ms(&self) -> u64 {
        u64::from(self.config.countdown_duration_ms).saturating_sub(self.ms_in_state)
    }

    /// Countdown seconds as displayed: remaining time rounded up.
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_ms().div_ceil(1000) as u32
    }
}

/// Countdown tone for a displayed second.
///
/// Linear ramp from base to max across the countdown, with integer
/// truncation: `base + (max - base) * (total - remaining) / total`.
pub fn countdown_frequency(config: &CheckinConfig, remaining_secs: u32) -> u32 {
    let total = config.countdown_secs().max(1);
    let remaining = remaining_secs.min(total);
    let span = config
        .buzzer_max_freq_hz
        .saturating_sub(config.buzzer_base_freq_hz);
    let step = u64::from(span) * u64::from(total - remaining) / u64::from(total);
    config.buzzer_base_freq_hz + step as u32
}
