//! Check-in button driver.
//!
//! ## Hardware
//!
//! Two active-low momentary switches with pull-ups: "Safe-Confirm" and
//! "Emergency-Request".  The run loop samples both once per tick; a
//! pressed button reads LOW.  There is no edge latching, so a press
//! shorter than one tick can be missed.
//!
//! A pin read error counts as "released" for that tick.

use embedded_hal::digital::InputPin;
use log::warn;

use crate::fsm::context::InputEvent;

pub struct ButtonInputs<S, E> {
    safe: S,
    emergency: E,
}

impl<S: InputPin, E: InputPin> ButtonInputs<S, E> {
    pub fn new(safe: S, emergency: E) -> Self {
        Self { safe, emergency }
    }

    /// Level-sample both buttons.
    pub fn read(&mut self) -> InputEvent {
        InputEvent {
            safe_pressed: is_pressed(&mut self.safe, "safe"),
            emergency_pressed: is_pressed(&mut self.emergency, "emergency"),
        }
    }
}

fn is_pressed<P: InputPin>(pin: &mut P, name: &str) -> bool {
    match pin.is_low() {
        Ok(low) => low,
        Err(e) => {
            warn!("button: {} read failed: {:?} (treated as released)", name, e);
            false
        }
    }
}
