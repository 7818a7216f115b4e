//! Tri-colour status indicator driver.
//!
//! Three discrete active-high LEDs (green, red, blue) on plain GPIOs.
//! At most one is lit: every colour change drives all three pins low
//! before raising the selected one.
//!
//! Generic over [`embedded_hal::digital::OutputPin`] so the same driver
//! runs on `esp-idf-hal` `PinDriver`s and on host-side test pins.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::PeripheralWriteError;
use crate::fsm::context::LedColour;

pub struct StatusLeds<G, R, B> {
    green: G,
    red: R,
    blue: B,
    current: LedColour,
}

impl<G: OutputPin, R: OutputPin, B: OutputPin> StatusLeds<G, R, B> {
    /// Takes ownership of the pins; call [`set`](Self::set) or
    /// [`off`](Self::off) to establish a known level.
    pub fn new(green: G, red: R, blue: B) -> Self {
        Self {
            green,
            red,
            blue,
            current: LedColour::Off,
        }
    }

    pub fn set(&mut self, colour: LedColour) -> Result<(), PeripheralWriteError> {
        self.all_low()?;
        match colour {
            LedColour::Off => Ok(()),
            LedColour::Green => drive_high(&mut self.green, "green"),
            LedColour::Red => drive_high(&mut self.red, "red"),
            LedColour::Blue => drive_high(&mut self.blue, "blue"),
        }?;
        self.current = colour;
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), PeripheralWriteError> {
        self.set(LedColour::Off)
    }

    /// Colour of the last successful [`set`](Self::set).
    pub fn current(&self) -> LedColour {
        self.current
    }

    fn all_low(&mut self) -> Result<(), PeripheralWriteError> {
        // Any failure leaves the lit colour unknown.
        self.current = LedColour::Off;
        drive_low(&mut self.green, "green")?;
        drive_low(&mut self.red, "red")?;
        drive_low(&mut self.blue, "blue")
    }
}

fn drive_high<P: OutputPin>(pin: &mut P, name: &str) -> Result<(), PeripheralWriteError> {
    pin.set_high().map_err(|e| {
        warn!("status_led: {} set_high failed: {:?}", name, e);
        PeripheralWriteError::Led
    })
}

fn drive_low<P: OutputPin>(pin: &mut P, name: &str) -> Result<(), PeripheralWriteError> {
    pin.set_low().map_err(|e| {
        warn!("status_led: {} set_low failed: {:?}", name, e);
        PeripheralWriteError::Led
    })
}
