//! Outbound application events.
//!
//! The [`CheckinService`](super::service::CheckinService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  They are
//! advisory only; nothing in the device consumes them besides the log.

use crate::error::PeripheralWriteError;
use crate::fsm::StateId;
use crate::fsm::context::AlertCause;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// No check-in within the deadline; the countdown began.
    CountdownStarted { secs: u32 },

    /// A new countdown second is on screen.
    CountdownTick(u32),

    /// The emergency alert fired.
    AlertRaised(AlertCause),

    /// The user confirmed they are safe.
    SafeConfirmed,

    /// An output write failed; the timer logic carried on.
    PeripheralFault(PeripheralWriteError),
}
