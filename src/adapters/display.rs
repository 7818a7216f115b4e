//! Display adapter: renders the two-row status screen on the OLED.
//!
//! Each [`DisplayPort::show`] clears the frame buffer, draws both rows
//! with the 6x10 ASCII font and flushes the whole frame over I2C.

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    text::Text,
};
use embedded_hal::i2c::I2c;

use crate::app::ports::DisplayPort;
use crate::drivers::ssd1306::Ssd1306;
use crate::error::PeripheralWriteError;
use crate::fsm::context::DisplayText;

/// Baseline of the first and second text rows.
const LINE1_Y: i32 = 8;
const LINE2_Y: i32 = 24;

/// Draw two text rows onto any monochrome target.
pub fn render_lines<D>(target: &mut D, line1: &DisplayText, line2: &DisplayText) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    Text::new(line1.as_str(), Point::new(0, LINE1_Y), style).draw(target)?;
    Text::new(line2.as_str(), Point::new(0, LINE2_Y), style).draw(target)?;
    Ok(())
}

pub struct OledPresenter<I2C> {
    oled: Ssd1306<I2C>,
}

impl<I2C: I2c> OledPresenter<I2C> {
    /// Takes an already initialised panel.
    pub fn new(oled: Ssd1306<I2C>) -> Self {
        Self { oled }
    }

    pub fn panel(&self) -> &Ssd1306<I2C> {
        &self.oled
    }
}

impl<I2C: I2c> DisplayPort for OledPresenter<I2C> {
    fn show(&mut self, line1: &DisplayText, line2: &DisplayText) -> Result<(), PeripheralWriteError> {
        // The frame buffer target is infallible.
        let Ok(()) = self.oled.clear(BinaryColor::Off);
        let Ok(()) = render_lines(&mut self.oled, line1, line2);
        self.oled.flush()
    }
}
