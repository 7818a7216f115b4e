//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! [`HardwareAdapter`] owns the status LEDs and the buzzer and exposes
//! them through [`AlertPort`].  [`ButtonInputs`] is exposed directly as the
//! [`InputPort`].  On non-espidf targets the buzzer uses the cfg-gated
//! simulation stubs in `hw_init`, and the pins are whatever
//! `embedded-hal` implementations the caller supplies.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{AlertPort, InputPort};
use crate::drivers::button::ButtonInputs;
use crate::drivers::buzzer::Buzzer;
use crate::drivers::status_led::StatusLeds;
use crate::error::PeripheralWriteError;
use crate::fsm::context::{InputEvent, LedColour};

/// Concrete adapter combining the indicator LEDs and the buzzer.
pub struct HardwareAdapter<G, R, B> {
    leds: StatusLeds<G, R, B>,
    buzzer: Buzzer,
}

impl<G: OutputPin, R: OutputPin, B: OutputPin> HardwareAdapter<G, R, B> {
    pub fn new(leds: StatusLeds<G, R, B>, buzzer: Buzzer) -> Self {
        Self { leds, buzzer }
    }

    pub fn leds(&self) -> &StatusLeds<G, R, B> {
        &self.leds
    }

    pub fn buzzer(&self) -> &Buzzer {
        &self.buzzer
    }
}

// ── AlertPort implementation ──────────────────────────────────

impl<G: OutputPin, R: OutputPin, B: OutputPin> AlertPort for HardwareAdapter<G, R, B> {
    fn set_led(&mut self, colour: LedColour) -> Result<(), PeripheralWriteError> {
        if self.leds.current() == colour {
            return Ok(());
        }
        self.leds.set(colour)
    }

    fn sound(&mut self, tone: Option<u32>) -> Result<(), PeripheralWriteError> {
        match tone {
            Some(hz) => self.buzzer.tone(hz),
            None => self.buzzer.silence(),
        }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<S: InputPin, E: InputPin> InputPort for ButtonInputs<S, E> {
    fn sample(&mut self) -> InputEvent {
        self.read()
    }
}
