//! Integration tests: MainLoop → CheckinService → FSM → mock ports.

use core::time::Duration;

use lifeline::app::events::AppEvent;
use lifeline::config::CheckinConfig;
use lifeline::fsm::context::{AlertCause, InputEvent, LedColour};
use lifeline::fsm::{CheckinState, StateId};

use super::mock_hw::{ScriptedInput, default_loop, main_loop};

fn waiting(secs: u64) -> CheckinState {
    CheckinState::Waiting {
        elapsed: Duration::from_secs(secs),
    }
}

fn countdown(secs: u64) -> CheckinState {
    CheckinState::Countdown {
        remaining: Duration::from_secs(secs),
    }
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_shows_banner_blue_then_waiting_screen() {
    let mut ml = default_loop();
    ml.run_ticks(1);

    let svc = ml.service();
    assert_eq!(svc.state(), waiting(1));
    assert_eq!(svc.alert_port().led, LedColour::Blue);
    assert_eq!(svc.alert_port().tone, None);

    let screens = &svc.display_port().screens;
    assert_eq!(screens[0].0, "Sistema Iniciado");
    assert_eq!(screens[0].1, "Aguardando...");
    assert_eq!(screens[1].0, "Aguardando acao");
    assert_eq!(screens[1].1, "Pressione botao");

    let events = &ml.sink().events;
    assert_eq!(events[0], AppEvent::Started(StateId::Idle));
    assert_eq!(
        events[1],
        AppEvent::StateChanged {
            from: StateId::Idle,
            to: StateId::Waiting
        }
    );
}

// ── End-to-end unattended scenario ────────────────────────────

#[test]
fn unattended_device_counts_down_alerts_once_and_resumes() {
    let mut ml = default_loop();

    ml.run_ticks(29);
    assert_eq!(ml.service().state(), waiting(29));

    ml.run_ticks(1);
    assert_eq!(ml.service().state(), countdown(10));
    assert_eq!(ml.service().alert_port().led, LedColour::Red);
    assert_eq!(
        ml.sink().count(|e| *e == AppEvent::CountdownStarted { secs: 10 }),
        1
    );

    ml.run_ticks(9);
    assert_eq!(ml.service().state(), countdown(1));

    ml.run_ticks(1);
    assert_eq!(ml.service().state(), CheckinState::AlertActive);
    assert_eq!(ml.service().alert_port().tone, Some(1000));

    // 5 x (500 + 200) ms pulses plus the 1 s hold.
    ml.run_ticks(4);
    assert_eq!(ml.service().state_id(), StateId::Alert);
    ml.run_ticks(1);
    assert_eq!(ml.service().state(), waiting(0));
    assert_eq!(ml.service().alert_port().led, LedColour::Blue);
    assert_eq!(ml.service().alert_port().tone, None);

    ml.run_ticks(20);
    assert_eq!(ml.service().alert_count(), 1);
    assert_eq!(
        ml.sink()
            .count(|e| *e == AppEvent::AlertRaised(AlertCause::Timeout)),
        1
    );
    assert_eq!(ml.delay().elapsed_ms(), 65_000);
}

#[test]
fn countdown_screens_and_ramp_follow_each_second() {
    let mut ml = default_loop();
    ml.run_ticks(40);

    let seconds: Vec<String> = ml
        .service()
        .display_port()
        .screens
        .iter()
        .filter(|(l1, _)| l1 == "ATENCAO!")
        .map(|(_, l2)| l2.clone())
        .collect();
    let expected: Vec<String> = (1..=10).rev().map(|s| format!("Tempo: {} seg", s)).collect();
    assert_eq!(seconds, expected);

    let ticks: Vec<u32> = ml
        .sink()
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::CountdownTick(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, (1..=10).rev().collect::<Vec<_>>());

    let ramp: Vec<u32> = ml
        .service()
        .alert_port()
        .tones()
        .into_iter()
        .filter(|&hz| hz != 1000)
        .collect();
    assert_eq!(ramp.first(), Some(&500));
    assert_eq!(ramp.last(), Some(&1850));
    assert!(ramp.windows(2).all(|w| w[0] <= w[1]));
}

// ── Safe-Confirm ──────────────────────────────────────────────

#[test]
fn safe_press_in_waiting_resets_the_window() {
    let input = ScriptedInput::new().at(12, InputEvent::SAFE);
    let mut ml = main_loop(CheckinConfig::default(), input);

    ml.run_ticks(12);
    assert_eq!(ml.service().state(), CheckinState::SafeActive);
    assert_eq!(ml.service().alert_port().led, LedColour::Green);
    assert_eq!(
        ml.service().display_port().last(),
        Some(("Status: SEGURO", "Prox. ver: 30s"))
    );

    ml.run_ticks(2);
    assert_eq!(ml.service().state(), waiting(0));

    // A fresh 30 s window starts after the dwell.
    ml.run_ticks(29);
    assert_eq!(ml.service().state(), waiting(29));
    ml.run_ticks(1);
    assert_eq!(ml.service().state_id(), StateId::Countdown);
    assert_eq!(ml.sink().count(|e| *e == AppEvent::SafeConfirmed), 1);
}

#[test]
fn safe_press_during_countdown_cancels_without_alert() {
    let input = ScriptedInput::new().at(35, InputEvent::SAFE);
    let mut ml = main_loop(CheckinConfig::default(), input);

    ml.run_ticks(35);
    assert_eq!(ml.service().state(), CheckinState::SafeActive);
    assert_eq!(ml.service().alert_port().tone, None);
    assert_ne!(ml.service().alert_port().led, LedColour::Red);

    ml.run_ticks(2 + 29);
    assert_eq!(ml.service().state(), waiting(29));
    assert_eq!(ml.service().alert_count(), 0);
    assert_eq!(
        ml.sink().count(|e| matches!(e, AppEvent::AlertRaised(_))),
        0
    );
}

#[test]
fn safe_press_on_last_countdown_second_still_wins() {
    let input = ScriptedInput::new().at(40, InputEvent::SAFE);
    let mut ml = main_loop(CheckinConfig::default(), input);
    ml.run_ticks(40);
    assert_eq!(ml.service().state(), CheckinState::SafeActive);
    assert_eq!(ml.service().alert_count(), 0);
}

// ── Emergency-Request ─────────────────────────────────────────

#[test]
fn emergency_press_bypasses_countdown() {
    let input = ScriptedInput::new().at(3, InputEvent::EMERGENCY);
    let mut ml = main_loop(CheckinConfig::default(), input);

    ml.run_ticks(3);
    assert_eq!(ml.service().state(), CheckinState::AlertActive);
    assert_eq!(
        ml.service().display_port().last(),
        Some(("  EMERGENCIA!", "Alerta Ativado"))
    );
    assert_eq!(
        ml.sink().count(|e| *e == AppEvent::AlertRaised(AlertCause::Manual)),
        1
    );
    assert_eq!(ml.sink().count(|e| matches!(e, AppEvent::CountdownStarted { .. })), 0);

    ml.run_ticks(5);
    assert_eq!(ml.service().state(), waiting(0));
}

#[test]
fn emergency_during_countdown_is_ignored() {
    let input = ScriptedInput::new().at(33, InputEvent::EMERGENCY);
    let mut ml = main_loop(CheckinConfig::default(), input);
    ml.run_ticks(33);
    assert_eq!(ml.service().state(), countdown(7));
}

#[test]
fn alert_pattern_cannot_be_cancelled() {
    let mut ml = default_loop();
    ml.input_mut().press_next(InputEvent::EMERGENCY);
    ml.run_ticks(1);
    assert_eq!(ml.service().state_id(), StateId::Alert);

    for _ in 0..4 {
        ml.input_mut().press_next(InputEvent::SAFE);
        ml.run_ticks(1);
        assert_eq!(ml.service().state_id(), StateId::Alert);
    }
    assert_eq!(ml.sink().count(|e| *e == AppEvent::SafeConfirmed), 0);
}

// ── Configurable timings ──────────────────────────────────────

#[test]
fn shortened_config_scales_every_phase() {
    let config = CheckinConfig {
        wait_timeout_ms: 5_000,
        countdown_duration_ms: 3_000,
        ..CheckinConfig::default()
    };
    let mut ml = main_loop(config, ScriptedInput::new());

    ml.run_ticks(5);
    assert_eq!(ml.service().state(), countdown(3));
    assert_eq!(
        ml.sink().count(|e| *e == AppEvent::CountdownStarted { secs: 3 }),
        1
    );
    ml.run_ticks(3);
    assert_eq!(ml.service().state_id(), StateId::Alert);
    // Top of a three-second ramp: 500 + 1500 * 2 / 3.
    assert!(ml.service().alert_port().tones().contains(&1500));
}

#[test]
fn fine_cadence_renders_half_second_countdown_pulses() {
    let config = CheckinConfig {
        tick_interval_ms: 100,
        ..CheckinConfig::default()
    };
    let mut ml = main_loop(config, ScriptedInput::new());

    ml.run_ticks(300);
    assert_eq!(ml.service().state_id(), StateId::Countdown);
    assert_eq!(ml.service().alert_port().tone, Some(500));

    ml.run_ticks(4);
    assert_eq!(ml.service().alert_port().tone, Some(500));
    ml.run_ticks(1);
    assert_eq!(ml.service().alert_port().tone, None);
    ml.run_ticks(5);
    assert_eq!(ml.service().alert_port().tone, Some(650));
    assert_eq!(ml.service().state(), countdown(9));
}

// ── Device cadence ────────────────────────────────────────────

#[test]
fn device_config_sounds_countdown_and_alert_pulses() {
    use super::mock_hw::AlertCall;

    let mut ml = main_loop(CheckinConfig::device(), ScriptedInput::new());

    ml.run_ticks(299);
    assert_eq!(
        ml.service().state(),
        CheckinState::Waiting {
            elapsed: Duration::from_millis(29_900)
        }
    );
    let mark = ml.service().alert_port().calls.len();

    ml.run_ticks(1);
    assert_eq!(ml.service().state(), countdown(10));
    ml.run_ticks(99);
    assert_eq!(ml.service().state_id(), StateId::Countdown);
    ml.run_ticks(1);
    assert_eq!(ml.service().state_id(), StateId::Alert);
    ml.run_ticks(45);
    assert_eq!(ml.service().state(), waiting(0));

    let sounds: Vec<Option<u32>> = ml.service().alert_port().calls[mark..]
        .iter()
        .filter_map(|c| match c {
            AlertCall::Sound(tone) => Some(*tone),
            AlertCall::SetLed(_) => None,
        })
        .collect();
    let alert_start = sounds
        .iter()
        .position(|t| *t == Some(1000))
        .expect("alert tone sounded");
    let (countdown, alert) = sounds.split_at(alert_start);

    // 500 ms on, 500 ms off, once per second at the ramp frequency.
    let mut expected = Vec::new();
    for secs in (1..=10u32).rev() {
        expected.push(Some(500 + 150 * (10 - secs)));
        expected.push(None);
    }
    assert_eq!(countdown, expected.as_slice());

    // 5 x (500 on + 200 off), then silent for the hold.
    assert_eq!(alert, [Some(1000), None].repeat(5).as_slice());
    assert_eq!(ml.sink().count(|e| matches!(e, AppEvent::CountdownTick(_))), 10);
    assert_eq!(ml.delay().elapsed_ms(), 44_500);
}

#[test]
fn repeated_led_command_leaves_pins_untouched() {
    use lifeline::adapters::hardware::HardwareAdapter;
    use lifeline::app::ports::AlertPort;
    use lifeline::drivers::buzzer::Buzzer;
    use lifeline::drivers::status_led::StatusLeds;

    use super::mock_hw::RecordingPin;

    let (green, red, blue) = (
        RecordingPin::default(),
        RecordingPin::default(),
        RecordingPin::default(),
    );
    let pins = [green.clone(), red.clone(), blue.clone()];
    let mut hw = HardwareAdapter::new(StatusLeds::new(green, red, blue), Buzzer::new());

    hw.set_led(LedColour::Blue).unwrap();
    let once: Vec<_> = pins.iter().map(RecordingPin::log).collect();
    assert_eq!(
        once.iter().map(|p| p.high).collect::<Vec<_>>(),
        [false, false, true]
    );

    hw.set_led(LedColour::Blue).unwrap();
    let twice: Vec<_> = pins.iter().map(RecordingPin::log).collect();
    assert_eq!(twice, once);

    hw.set_led(LedColour::Red).unwrap();
    assert_eq!(
        pins.iter().map(|p| p.log().high).collect::<Vec<_>>(),
        [false, true, false]
    );
}
