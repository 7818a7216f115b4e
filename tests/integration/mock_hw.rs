//! Mock hardware adapters for integration tests.
//!
//! Record every port call so tests can assert on the full command
//! history without touching real GPIO/PWM/I2C.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use lifeline::app::events::AppEvent;
use lifeline::app::ports::{AlertPort, DisplayPort, EventSink, InputPort};
use lifeline::app::service::CheckinService;
use lifeline::config::CheckinConfig;
use lifeline::error::PeripheralWriteError;
use lifeline::fsm::context::{DisplayText, InputEvent, LedColour};
use lifeline::runner::MainLoop;

// ── Alert call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertCall {
    SetLed(LedColour),
    Sound(Option<u32>),
}

// ── MockAlert ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockAlert {
    pub calls: Vec<AlertCall>,
    pub led: LedColour,
    pub tone: Option<u32>,
    pub fail_led: bool,
    pub fail_sound: bool,
}

#[allow(dead_code)]
impl MockAlert {
    /// Every tone that was actually sounded, in order.
    pub fn tones(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                AlertCall::Sound(Some(hz)) => Some(*hz),
                _ => None,
            })
            .collect()
    }

    pub fn led_history(&self) -> Vec<LedColour> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                AlertCall::SetLed(colour) => Some(*colour),
                _ => None,
            })
            .collect()
    }
}

impl AlertPort for MockAlert {
    fn set_led(&mut self, colour: LedColour) -> Result<(), PeripheralWriteError> {
        if self.fail_led {
            return Err(PeripheralWriteError::Led);
        }
        self.calls.push(AlertCall::SetLed(colour));
        self.led = colour;
        Ok(())
    }

    fn sound(&mut self, tone: Option<u32>) -> Result<(), PeripheralWriteError> {
        if self.fail_sound {
            return Err(PeripheralWriteError::Buzzer);
        }
        self.calls.push(AlertCall::Sound(tone));
        self.tone = tone;
        Ok(())
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub screens: Vec<(String, String)>,
    pub fail: bool,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn last(&self) -> Option<(&str, &str)> {
        self.screens.last().map(|(a, b)| (a.as_str(), b.as_str()))
    }
}

impl DisplayPort for MockDisplay {
    fn show(&mut self, line1: &DisplayText, line2: &DisplayText) -> Result<(), PeripheralWriteError> {
        if self.fail {
            return Err(PeripheralWriteError::Display);
        }
        self.screens
            .push((line1.as_str().to_owned(), line2.as_str().to_owned()));
        Ok(())
    }
}

// ── ScriptedInput ─────────────────────────────────────────────

/// Plays back presses at given tick numbers (1-based); released otherwise.
#[derive(Default)]
pub struct ScriptedInput {
    script: Vec<(u32, InputEvent)>,
    sampled: u32,
}

#[allow(dead_code)]
impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press `input` on sample number `tick`.
    pub fn at(mut self, tick: u32, input: InputEvent) -> Self {
        self.script.push((tick, input));
        self
    }

    pub fn press_next(&mut self, input: InputEvent) {
        self.script.push((self.sampled + 1, input));
    }

    pub fn samples(&self) -> u32 {
        self.sampled
    }
}

impl InputPort for ScriptedInput {
    fn sample(&mut self) -> InputEvent {
        self.sampled += 1;
        self.script
            .iter()
            .find(|(tick, _)| *tick == self.sampled)
            .map_or(InputEvent::NONE, |(_, input)| *input)
    }
}

// ── RecordingPin ──────────────────────────────────────────────

/// Output pin whose level and write count stay visible to the test
/// after the pin has been moved into a driver.
#[derive(Clone, Default)]
pub struct RecordingPin {
    state: Rc<RefCell<PinLog>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PinLog {
    pub high: bool,
    pub writes: u32,
}

#[allow(dead_code)]
impl RecordingPin {
    pub fn log(&self) -> PinLog {
        *self.state.borrow()
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        let mut log = self.state.borrow_mut();
        log.high = false;
        log.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut log = self.state.borrow_mut();
        log.high = true;
        log.writes += 1;
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── VirtualDelay ──────────────────────────────────────────────

/// Advances a virtual clock instead of sleeping.
#[derive(Default)]
pub struct VirtualDelay {
    pub elapsed_ns: u64,
}

#[allow(dead_code)]
impl VirtualDelay {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for VirtualDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}

// ── Harness ───────────────────────────────────────────────────

pub type TestLoop = MainLoop<ScriptedInput, MockAlert, MockDisplay, RecordingSink, VirtualDelay>;

pub fn main_loop(config: CheckinConfig, input: ScriptedInput) -> TestLoop {
    let service = CheckinService::new(config, MockAlert::default(), MockDisplay::default())
        .expect("valid config");
    MainLoop::new(service, input, RecordingSink::default(), VirtualDelay::default())
}

#[allow(dead_code)]
pub fn default_loop() -> TestLoop {
    main_loop(CheckinConfig::default(), ScriptedInput::new())
}
