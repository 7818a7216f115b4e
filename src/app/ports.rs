//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ CheckinService (domain)
//! ```
//!
//! Driven adapters (buttons, LEDs + buzzer, OLED, event sinks) implement
//! these traits.  The [`CheckinService`](super::service::CheckinService)
//! and [`MainLoop`](crate::runner::MainLoop) consume them via generics, so
//! the domain core never touches hardware directly.

use crate::error::PeripheralWriteError;
use crate::fsm::context::{DisplayText, InputEvent, LedColour};

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: buttons → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the run loop calls this once per tick.
pub trait InputPort {
    /// Non-blocking read of both buttons.
    ///
    /// No queuing: a press shorter than one tick may be missed.
    fn sample(&mut self) -> InputEvent;
}

// ───────────────────────────────────────────────────────────────
// Alert port (driven adapter: domain → LEDs + buzzer)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the status indicators and the tone generator.
pub trait AlertPort {
    /// Light exactly one indicator (or none).  Idempotent.
    fn set_led(&mut self, colour: LedColour) -> Result<(), PeripheralWriteError>;

    /// `Some(hz)` configures and gates on the oscillator at `hz`; `None`
    /// silences it.  Changing frequency mid-tone is allowed.
    fn sound(&mut self, tone: Option<u32>) -> Result<(), PeripheralWriteError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → two-line text sink)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// Replace the whole screen with two rows of text.
    fn show(&mut self, line1: &DisplayText, line2: &DisplayText)
        -> Result<(), PeripheralWriteError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
