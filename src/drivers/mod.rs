//! Peripheral drivers and one-shot hardware initialisation.

pub mod button;
pub mod buzzer;
pub mod hw_init;
pub mod ssd1306;
pub mod status_led;
