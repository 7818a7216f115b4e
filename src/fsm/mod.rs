//! Check-in state machine engine.
//!
//! Every state is a row of plain `fn` pointers, looked up by [`StateId`]:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  StateTable                                                │
//! │  ┌───────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ StateId   │ on_enter  │ on_exit  │ on_update         │  │
//! │  ├───────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Idle      │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Waiting   │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Countdown │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Alert     │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  │ Safe      │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  └───────────┴───────────┴──────────┴───────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! A tick adds `ctx.tick_ms` to the in-state clock and runs the active
//! row's `on_update`.  A `Some(next)` answer leaves the state (`on_exit`),
//! zeroes the clock and enters `next` (`on_enter`).
//!
//! Nothing here blocks: multi-step sequences (countdown pulses, the alert
//! pattern, the safe dwell) are evaluated from the in-state clock on every
//! tick, so input is sampled between every step.

pub mod context;
pub mod states;

use core::time::Duration;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// The five check-in states.  Discriminants index the state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    Waiting = 1,
    Countdown = 2,
    Alert = 3,
    Safe = 4,
}

impl StateId {
    pub const COUNT: usize = 5;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Idle,
        Self::Waiting,
        Self::Countdown,
        Self::Alert,
        Self::Safe,
    ];
}

/// Externally visible state, with the timer carried by the timed states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckinState {
    Idle,
    Waiting { elapsed: Duration },
    Countdown { remaining: Duration },
    AlertActive,
    SafeActive,
}

impl CheckinState {
    /// Project the engine state plus context timers into the public view.
    pub fn from_parts(id: StateId, ctx: &FsmContext) -> Self {
        match id {
            StateId::Idle => Self::Idle,
            StateId::Waiting => Self::Waiting {
                elapsed: Duration::from_millis(ctx.ms_in_state),
            },
            StateId::Countdown => Self::Countdown {
                remaining: Duration::from_millis(ctx.remaining_ms()),
            },
            StateId::Alert => Self::AlertActive,
            StateId::Safe => Self::SafeActive,
        }
    }

    pub fn id(&self) -> StateId {
        match self {
            Self::Idle => StateId::Idle,
            Self::Waiting { .. } => StateId::Waiting,
            Self::Countdown { .. } => StateId::Countdown,
            Self::AlertActive => StateId::Alert,
            Self::SafeActive => StateId::Safe,
        }
    }
}

// ---------------------------------------------------------------------------
// Handler signatures and table rows
// ---------------------------------------------------------------------------

/// Entry / exit hook, run once per transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Per-tick handler; `Some(next)` requests a transition.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

/// One row of the state table.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Table-driven engine.  The [`FsmContext`] is owned by the caller and
/// lent to every handler.
pub struct Fsm {
    table: [StateDescriptor; StateId::COUNT],
    current: StateId,
    ticks: u64,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().zip(StateId::ALL).all(|(row, id)| row.id == id),
            "state table rows out of order"
        );
        Self {
            table,
            current: initial,
            ticks: 0,
        }
    }

    /// Enter the initial state.  Must precede the first [`tick`](Self::tick).
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM start: {}", self.row(self.current).name);
        ctx.ms_in_state = 0;
        if let Some(enter) = self.row(self.current).on_enter {
            enter(ctx);
        }
    }

    /// Advance by `ctx.tick_ms` and let the active state decide.
    pub fn tick(&mut self, ctx: &mut FsmContext) {
        self.ticks += 1;
        ctx.ms_in_state = ctx.ms_in_state.saturating_add(ctx.tick_ms);

        if let Some(next) = (self.row(self.current).on_update)(ctx) {
            self.transition(next, ctx);
        }
    }

    /// Jump to `next` outside the normal update path.  Ignored when
    /// `next` is already active.
    pub fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        if next != self.current {
            self.transition(next, ctx);
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Ticks processed since construction.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    fn row(&self, id: StateId) -> &StateDescriptor {
        &self.table[id as usize]
    }

    fn transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        info!("FSM: {} -> {}", self.row(self.current).name, self.row(next).name);

        if let Some(exit) = self.row(self.current).on_exit {
            exit(ctx);
        }
        self.current = next;
        ctx.ms_in_state = 0;
        if let Some(enter) = self.row(next).on_enter {
            enter(ctx);
        }
    }
}
