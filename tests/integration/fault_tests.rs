//! Integration tests: peripheral write failures never disturb the timer.

use core::time::Duration;

use lifeline::app::events::AppEvent;
use lifeline::error::PeripheralWriteError;
use lifeline::fsm::context::LedColour;
use lifeline::fsm::{CheckinState, StateId};

use super::mock_hw::default_loop;

fn faults(events: &[AppEvent], kind: PeripheralWriteError) -> usize {
    events
        .iter()
        .filter(|e| **e == AppEvent::PeripheralFault(kind))
        .count()
}

#[test]
fn dead_display_does_not_delay_countdown_or_alert() {
    let mut ml = default_loop();
    ml.service_mut().display_port_mut().fail = true;

    ml.run_ticks(30);
    assert_eq!(
        ml.service().state(),
        CheckinState::Countdown {
            remaining: Duration::from_secs(10)
        }
    );
    ml.run_ticks(10);
    assert_eq!(ml.service().state_id(), StateId::Alert);
    assert_eq!(ml.service().alert_port().tone, Some(1000));
    assert!(ml.service().display_port().screens.is_empty());
    assert!(faults(&ml.sink().events, PeripheralWriteError::Display) >= 40);
}

#[test]
fn display_recovers_with_latest_screen() {
    let mut ml = default_loop();
    ml.service_mut().display_port_mut().fail = true;
    ml.run_ticks(32);

    ml.service_mut().display_port_mut().fail = false;
    ml.run_ticks(1);
    let screens = &ml.service().display_port().screens;
    assert_eq!(screens.len(), 1);
    assert_eq!(screens[0].1, "Tempo: 7 seg");
}

#[test]
fn led_failure_is_retried_until_it_sticks() {
    let mut ml = default_loop();
    ml.run_ticks(29);

    ml.service_mut().alert_port_mut().fail_led = true;
    ml.run_ticks(3);
    assert_eq!(ml.service().state_id(), StateId::Countdown);
    assert_eq!(ml.service().alert_port().led, LedColour::Blue);
    assert_eq!(faults(&ml.sink().events, PeripheralWriteError::Led), 3);

    ml.service_mut().alert_port_mut().fail_led = false;
    ml.run_ticks(1);
    assert_eq!(ml.service().alert_port().led, LedColour::Red);
}

#[test]
fn silent_buzzer_still_counts_alert() {
    let mut ml = default_loop();
    ml.service_mut().alert_port_mut().fail_sound = true;
    ml.run_ticks(40);
    assert_eq!(ml.service().alert_count(), 1);
    assert_eq!(ml.service().current_command().tone, Some(1000));
    assert!(ml.service().alert_port().tones().is_empty());
    assert!(faults(&ml.sink().events, PeripheralWriteError::Buzzer) >= 11);
}
