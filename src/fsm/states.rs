//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  IDLE ──▶ WAITING ──[timeout]──▶ COUNTDOWN ──[expired]──▶ ALERT
//!            │    │                    │                      │
//!            │    └──[emergency]───────┼─────────────────────▶│
//!          [safe]                    [safe]                   │
//!            ▼                         │                      │
//!           SAFE ◀─────────────────────┘                      │
//!            │                                                │
//!            └──[dwell done]──▶ WAITING(0) ◀──[pattern done]──┘
//! ```
//!
//! Precedence inside a tick: Safe-Confirm, then Emergency-Request, then
//! timer expiry.

use super::context::{countdown_frequency, AlertCause, DisplayText, FsmContext, LedColour, Screen};
use super::{StateDescriptor, StateId};
use log::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1: Waiting
        StateDescriptor {
            id: StateId::Waiting,
            name: "Waiting",
            on_enter: Some(waiting_enter),
            on_exit: None,
            on_update: waiting_update,
        },
        // Index 2: Countdown
        StateDescriptor {
            id: StateId::Countdown,
            name: "Countdown",
            on_enter: Some(countdown_enter),
            on_exit: Some(countdown_exit),
            on_update: countdown_update,
        },
        // Index 3: Alert
        StateDescriptor {
            id: StateId::Alert,
            name: "Alert",
            on_enter: Some(alert_enter),
            on_exit: Some(alert_exit),
            on_update: alert_update,
        },
        // Index 4: Safe
        StateDescriptor {
            id: StateId::Safe,
            name: "Safe",
            on_enter: Some(safe_enter),
            on_exit: None,
            on_update: safe_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state: momentary, before the first check-in window
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    ctx.outputs.alert.led = LedColour::Blue;
    ctx.outputs.alert.tone = None;
    ctx.show("Sistema Iniciado", "Aguardando...");
    info!("IDLE: system started");
}

fn idle_update(_ctx: &mut FsmContext) -> Option<StateId> {
    Some(StateId::Waiting)
}

// ═══════════════════════════════════════════════════════════════════════════
//  WAITING state: check-in window open
// ═══════════════════════════════════════════════════════════════════════════

fn waiting_enter(ctx: &mut FsmContext) {
    ctx.outputs.alert.led = LedColour::Blue;
    ctx.outputs.alert.tone = None;
    ctx.show("Aguardando acao", "Pressione botao");
    info!(
        "WAITING: check-in due within {}s",
        ctx.config.wait_timeout_ms / 1000
    );
}

fn waiting_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.input.safe_pressed {
        return Some(StateId::Safe);
    }

    if ctx.input.emergency_pressed {
        ctx.alert_cause = AlertCause::Manual;
        return Some(StateId::Alert);
    }

    if ctx.ms_in_state >= u64::from(ctx.config.wait_timeout_ms) {
        info!(
            "WAITING: no check-in after {}s → countdown",
            ctx.ms_in_state / 1000
        );
        return Some(StateId::Countdown);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  COUNTDOWN state: escalating warning before the alert
// ═══════════════════════════════════════════════════════════════════════════

fn countdown_enter(ctx: &mut FsmContext) {
    ctx.outputs.alert.led = LedColour::Red;
    ctx.notices.countdown_started = true;
    ctx.shown_secs = 0;
    show_countdown_second(ctx);
    warn!(
        "COUNTDOWN: {}s to confirm safety",
        ctx.config.countdown_secs()
    );
}

fn countdown_exit(ctx: &mut FsmContext) {
    ctx.outputs.alert.led = LedColour::Off;
    ctx.outputs.alert.tone = None;
}

fn countdown_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.input.safe_pressed {
        info!(
            "COUNTDOWN: cancelled with {}s left",
            ctx.remaining_secs()
        );
        return Some(StateId::Safe);
    }

    if ctx.remaining_ms() == 0 {
        ctx.alert_cause = AlertCause::Timeout;
        return Some(StateId::Alert);
    }

    show_countdown_second(ctx);
    None
}

/// Refresh the screen on a new whole second and gate the tone pulse.
///
/// Every countdown second opens with `countdown_pulse_on_ms` of tone at the
/// second's ramp frequency, then stays silent until the next second.
fn show_countdown_second(ctx: &mut FsmContext) {
    let secs = ctx.remaining_secs();
    let freq = countdown_frequency(&ctx.config, secs);

    if secs != ctx.shown_secs {
        ctx.shown_secs = secs;
        ctx.outputs.screen = Some(Screen {
            line1: DisplayText::new("ATENCAO!"),
            line2: DisplayText::from_fmt(format_args!("Tempo: {} seg", secs)),
        });
        ctx.notices.countdown_tick = Some(secs);
        debug!("COUNTDOWN: {}s left, tone {} Hz", secs, freq);
    }

    let phase = ctx.ms_in_state % 1000;
    ctx.outputs.alert.tone = if phase < u64::from(ctx.config.countdown_pulse_on_ms) {
        Some(freq)
    } else {
        None
    };
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALERT state: fixed emergency pattern, not cancellable
// ═══════════════════════════════════════════════════════════════════════════

fn alert_enter(ctx: &mut FsmContext) {
    ctx.outputs.alert.led = LedColour::Red;
    ctx.outputs.alert.tone = Some(ctx.config.emergency_freq_hz);
    ctx.show("  EMERGENCIA!", "Alerta Ativado");
    ctx.alert_count = ctx.alert_count.saturating_add(1);
    ctx.notices.alert_raised = Some(ctx.alert_cause);
    warn!("ALERT: emergency activated ({:?})", ctx.alert_cause);
}

fn alert_exit(ctx: &mut FsmContext) {
    ctx.outputs.alert.tone = None;
    ctx.alert_cause = AlertCause::Timeout;
    info!("ALERT: pattern complete, resuming check-in");
}

fn alert_update(ctx: &mut FsmContext) -> Option<StateId> {
    let cfg = &ctx.config;
    if ctx.ms_in_state >= cfg.alert_duration().as_millis() as u64 {
        return Some(StateId::Waiting);
    }

    let period = cfg.alert_period_ms();
    let pulses_end = period * u64::from(cfg.alert_pulse_count);
    let sounding = ctx.ms_in_state < pulses_end
        && ctx.ms_in_state % period < u64::from(cfg.alert_pulse_on_ms);

    ctx.outputs.alert.tone = sounding.then_some(cfg.emergency_freq_hz);
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  SAFE state: check-in acknowledged, brief dwell
// ═══════════════════════════════════════════════════════════════════════════

fn safe_enter(ctx: &mut FsmContext) {
    ctx.outputs.alert.led = LedColour::Green;
    ctx.outputs.alert.tone = None;
    let next_secs = ctx.config.wait_timeout_ms / 1000;
    ctx.outputs.screen = Some(Screen {
        line1: DisplayText::new("Status: SEGURO"),
        line2: DisplayText::from_fmt(format_args!("Prox. ver: {}s", next_secs)),
    });
    ctx.notices.safe_confirmed = true;
    info!("SAFE: check-in confirmed, next check in {}s", next_secs);
}

fn safe_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.ms_in_state >= u64::from(ctx.config.safe_dwell_ms) {
        return Some(StateId::Waiting);
    }
    None
}
