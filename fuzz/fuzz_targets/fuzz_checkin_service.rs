//! Fuzz target: `CheckinService::step`
//!
//! Drives the service with arbitrary button samples and tick lengths
//! (0..=2520 ms) under a config whose timings are also taken from the
//! input, and verifies:
//! - No panics under any byte sequence
//! - Waiting never exceeds its window; Countdown never exceeds its duration
//! - The lit LED always matches the active state
//! - `alert_count` equals the number of `AlertRaised` events
//!
//! cargo fuzz run fuzz_checkin_service

#![no_main]

use core::time::Duration;

use libfuzzer_sys::fuzz_target;
use lifeline::app::events::AppEvent;
use lifeline::app::ports::{AlertPort, DisplayPort, EventSink};
use lifeline::app::service::CheckinService;
use lifeline::config::CheckinConfig;
use lifeline::error::PeripheralWriteError;
use lifeline::fsm::context::{DisplayText, InputEvent, LedColour};
use lifeline::fsm::CheckinState;

#[derive(Default)]
struct Leds(LedColour);

impl AlertPort for Leds {
    fn set_led(&mut self, colour: LedColour) -> Result<(), PeripheralWriteError> {
        self.0 = colour;
        Ok(())
    }

    fn sound(&mut self, _tone: Option<u32>) -> Result<(), PeripheralWriteError> {
        Ok(())
    }
}

struct Blank;

impl DisplayPort for Blank {
    fn show(&mut self, _: &DisplayText, _: &DisplayText) -> Result<(), PeripheralWriteError> {
        Ok(())
    }
}

#[derive(Default)]
struct AlertTally(u32);

impl EventSink for AlertTally {
    fn emit(&mut self, event: &AppEvent) {
        if matches!(event, AppEvent::AlertRaised(_)) {
            self.0 += 1;
        }
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let (head, ticks) = data.split_at(2);
    let config = CheckinConfig {
        wait_timeout_ms: 1000 * (u32::from(head[0] % 60) + 1),
        countdown_duration_ms: 1000 * (u32::from(head[1] % 15) + 1),
        ..CheckinConfig::default()
    };
    let wait = u64::from(config.wait_timeout_ms);
    let countdown = u64::from(config.countdown_duration_ms);

    let Ok(mut svc) = CheckinService::new(config, Leds::default(), Blank) else {
        return;
    };
    let mut sink = AlertTally::default();
    svc.start(&mut sink);

    for &b in ticks {
        let input = InputEvent {
            safe_pressed: b & 0x01 != 0,
            emergency_pressed: b & 0x02 != 0,
        };
        let elapsed = Duration::from_millis(u64::from(b >> 2) * 10 * 4);
        svc.step(input, elapsed, &mut sink);

        let led = svc.alert_port().0;
        match svc.state() {
            CheckinState::Waiting { elapsed } => {
                assert!((elapsed.as_millis() as u64) < wait);
                assert_eq!(led, LedColour::Blue);
            }
            CheckinState::Countdown { remaining } => {
                assert!((remaining.as_millis() as u64) <= countdown);
                assert_eq!(led, LedColour::Red);
            }
            CheckinState::AlertActive => assert_eq!(led, LedColour::Red),
            CheckinState::SafeActive => assert_eq!(led, LedColour::Green),
            CheckinState::Idle => panic!("Idle after startup"),
        }
        assert_eq!(svc.alert_count(), sink.0);
    }
});
