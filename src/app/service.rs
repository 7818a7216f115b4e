//! Check-in service: the hexagonal core.
//!
//! [`CheckinService`] owns the FSM, the shared context and the two output
//! ports (alert + display) it was constructed with.  Each call to
//! [`step`](CheckinService::step) feeds one input sample and the elapsed
//! tick time through the state machine, then applies the resulting
//! outputs.
//!
//! ```text
//!  InputEvent ──▶ ┌────────────────────────┐ ──▶ AlertPort (LED, tone)
//!   + elapsed     │     CheckinService     │ ──▶ DisplayPort
//!                 │   FSM · output apply   │ ──▶ EventSink
//!                 └────────────────────────┘
//! ```
//!
//! Output failures never stop the timer.  A failed write is reported, and
//! the output is re-applied on the following ticks until it sticks.

use core::time::Duration;

use log::{info, warn};

use crate::config::CheckinConfig;
use crate::error::{ConfigError, PeripheralWriteError};
use crate::fsm::context::{AlertCommand, FsmContext, InputEvent, LedColour, Notices, Screen};
use crate::fsm::states::build_state_table;
use crate::fsm::{CheckinState, Fsm, StateId};

use super::events::AppEvent;
use super::ports::{AlertPort, DisplayPort, EventSink};

// ───────────────────────────────────────────────────────────────
// CheckinService
// ───────────────────────────────────────────────────────────────

pub struct CheckinService<A, D> {
    fsm: Fsm,
    ctx: FsmContext,
    alert: A,
    display: D,
    started: bool,
    /// Last LED colour the port accepted.
    applied_led: Option<LedColour>,
    /// Last tone the port accepted.
    applied_tone: Option<Option<u32>>,
    /// Screen waiting to be rendered (kept until a write succeeds).
    pending_screen: Option<Screen>,
}

impl<A: AlertPort, D: DisplayPort> CheckinService<A, D> {
    /// Construct the service from configuration and its output ports.
    ///
    /// Does **not** start the FSM: call [`start`](Self::start) next.
    pub fn new(config: CheckinConfig, alert: A, display: D) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            fsm: Fsm::new(build_state_table(), StateId::Idle),
            ctx: FsmContext::new(config),
            alert,
            display,
            started: false,
            applied_led: None,
            applied_tone: None,
            pending_screen: None,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the startup banner in Idle and move straight into Waiting(0).
    /// Calling it again is a no-op.
    pub fn start(&mut self, sink: &mut impl EventSink) {
        if self.started {
            return;
        }
        self.started = true;

        self.fsm.start(&mut self.ctx);
        self.apply_outputs(sink);
        sink.emit(&AppEvent::Started(StateId::Idle));
        info!("CheckinService started in {:?}", self.fsm.current_state());

        self.fsm.force_transition(StateId::Waiting, &mut self.ctx);
        self.apply_outputs(sink);
        sink.emit(&AppEvent::StateChanged {
            from: StateId::Idle,
            to: StateId::Waiting,
        });
    }

    /// Advance the machine by one tick.
    pub fn step(&mut self, input: InputEvent, elapsed: Duration, sink: &mut impl EventSink) {
        if !self.started {
            self.start(sink);
        }

        let prev_state = self.fsm.current_state();
        self.ctx.input = input;
        self.ctx.tick_ms = elapsed.as_millis() as u64;

        self.fsm.tick(&mut self.ctx);
        self.apply_outputs(sink);

        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }
        self.emit_notices(sink);
    }

    /// Switch every output off (LEDs dark, buzzer silent).  Best effort.
    pub fn shutdown(&mut self, sink: &mut impl EventSink) {
        info!("CheckinService shutting down outputs");
        self.ctx.outputs.alert = AlertCommand::off();
        self.apply_outputs(sink);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current state with its timer.
    pub fn state(&self) -> CheckinState {
        CheckinState::from_parts(self.fsm.current_state(), &self.ctx)
    }

    pub fn state_id(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.fsm.tick_count()
    }

    /// Alerts raised since startup (manual and timeout).
    pub fn alert_count(&self) -> u32 {
        self.ctx.alert_count
    }

    /// The LED/tone the state machine currently wants.
    pub fn current_command(&self) -> AlertCommand {
        self.ctx.outputs.alert
    }

    pub fn config(&self) -> &CheckinConfig {
        &self.ctx.config
    }

    pub fn alert_port(&self) -> &A {
        &self.alert
    }

    pub fn alert_port_mut(&mut self) -> &mut A {
        &mut self.alert
    }

    pub fn display_port(&self) -> &D {
        &self.display
    }

    pub fn display_port_mut(&mut self) -> &mut D {
        &mut self.display
    }

    // ── Internal ──────────────────────────────────────────────

    /// Push changed outputs to the ports.
    fn apply_outputs(&mut self, sink: &mut impl EventSink) {
        let cmd = self.ctx.outputs.alert;

        // ── Status LED ───────────────────────────────────────
        if self.applied_led != Some(cmd.led) {
            match self.alert.set_led(cmd.led) {
                Ok(()) => self.applied_led = Some(cmd.led),
                Err(e) => Self::report(e, sink),
            }
        }

        // ── Buzzer ───────────────────────────────────────────
        if self.applied_tone != Some(cmd.tone) {
            match self.alert.sound(cmd.tone) {
                Ok(()) => self.applied_tone = Some(cmd.tone),
                Err(e) => Self::report(e, sink),
            }
        }

        // ── Display ──────────────────────────────────────────
        if let Some(screen) = self.ctx.outputs.screen.take() {
            self.pending_screen = Some(screen);
        }
        if let Some(screen) = &self.pending_screen {
            match self.display.show(&screen.line1, &screen.line2) {
                Ok(()) => self.pending_screen = None,
                Err(e) => Self::report(e, sink),
            }
        }
    }

    fn emit_notices(&mut self, sink: &mut impl EventSink) {
        let notices = core::mem::take(&mut self.ctx.notices);
        let Notices {
            countdown_started,
            countdown_tick,
            alert_raised,
            safe_confirmed,
        } = notices;

        if countdown_started {
            sink.emit(&AppEvent::CountdownStarted {
                secs: self.ctx.config.countdown_secs(),
            });
        }
        if let Some(secs) = countdown_tick {
            sink.emit(&AppEvent::CountdownTick(secs));
        }
        if let Some(cause) = alert_raised {
            sink.emit(&AppEvent::AlertRaised(cause));
        }
        if safe_confirmed {
            sink.emit(&AppEvent::SafeConfirmed);
        }
    }

    fn report(e: PeripheralWriteError, sink: &mut impl EventSink) {
        warn!("Peripheral write failed: {} (timer unaffected)", e);
        sink.emit(&AppEvent::PeripheralFault(e));
    }
}
