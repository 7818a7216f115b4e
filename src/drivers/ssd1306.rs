//! SSD1306 OLED display driver.
//!
//! 128x64 monochrome panel over I2C.  Drawing goes into a page-organised
//! frame buffer through [`embedded_graphics::draw_target::DrawTarget`];
//! [`Ssd1306::flush`] pushes the whole buffer to the panel.

use core::convert::Infallible;

use embedded_graphics::{
    Pixel,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Size},
};
use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::error::{PeripheralInitError, PeripheralWriteError};

pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Control byte prefixes.
const CONTROL_CMD: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
}

const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_MEMORY_MODE,
    0x00, // horizontal addressing
    cmd::SET_START_LINE,
    cmd::SET_SEG_REMAP,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x30,
    cmd::SET_CONTRAST,
    0xFF,
    cmd::RESUME_RAM,
    cmd::SET_NORMAL,
    cmd::SET_CHARGE_PUMP,
    0x14, // internal charge pump on
    cmd::DEACTIVATE_SCROLL,
    cmd::DISPLAY_ON,
];

pub struct Ssd1306<I2C> {
    i2c: I2C,
    addr: u8,
    /// One bit per pixel, `buffer[page][column]`, LSB = top row of the page.
    buffer: [[u8; WIDTH]; PAGES],
}

impl<I2C: I2c> Ssd1306<I2C> {
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            buffer: [[0; WIDTH]; PAGES],
        }
    }

    /// Send the power-up sequence and blank the panel.
    pub fn init(&mut self) -> Result<(), PeripheralInitError> {
        for &c in INIT_SEQUENCE {
            self.command(c).map_err(|_| PeripheralInitError::Display)?;
        }
        self.buffer = [[0; WIDTH]; PAGES];
        self.flush().map_err(|_| PeripheralInitError::Display)?;
        info!("ssd1306: initialised at 0x{:02X}", self.addr);
        Ok(())
    }

    /// Write the whole frame buffer to the panel.
    pub fn flush(&mut self) -> Result<(), PeripheralWriteError> {
        for c in [
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ] {
            self.command(c).map_err(|_| PeripheralWriteError::Display)?;
        }

        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;
        for page in 0..PAGES {
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c.write(self.addr, &data).map_err(|e| {
                warn!("ssd1306: page {} write failed: {:?}", page, e);
                PeripheralWriteError::Display
            })?;
        }
        Ok(())
    }

    /// Pixel state in the frame buffer (not the panel).
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn command(&mut self, c: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.addr, &[CONTROL_CMD, c])
    }
}

impl<I2C> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C> DrawTarget for Ssd1306<I2C> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<It>(&mut self, pixels: It) -> Result<(), Self::Error>
    where
        It: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, colour) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= HEIGHT {
                continue;
            }
            let bit = 1 << (y % 8);
            match colour {
                BinaryColor::On => self.buffer[y / 8][x] |= bit,
                BinaryColor::Off => self.buffer[y / 8][x] &= !bit,
            }
        }
        Ok(())
    }

    fn clear(&mut self, colour: Self::Color) -> Result<(), Self::Error> {
        let fill = match colour {
            BinaryColor::On => 0xFF,
            BinaryColor::Off => 0x00,
        };
        self.buffer = [[fill; WIDTH]; PAGES];
        Ok(())
    }
}
