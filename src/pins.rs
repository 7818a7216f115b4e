//! GPIO / peripheral pin assignments for the Lifeline board.
//!
//! `main` takes the matching `peripherals.pins.gpioN` fields and logs this
//! map at boot; keep the two in step when rewiring.

// ---------------------------------------------------------------------------
// Buttons (active-low momentary, internal pull-up)
// ---------------------------------------------------------------------------

/// "Estou seguro": Safe-Confirm.
pub const BTN_SAFE_GPIO: i32 = 5;
/// "Nao estou seguro": Emergency-Request.
pub const BTN_EMERGENCY_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Status indicators (active-high discrete LEDs)
// ---------------------------------------------------------------------------

pub const LED_GREEN_GPIO: i32 = 11;
pub const LED_BLUE_GPIO: i32 = 12;
pub const LED_RED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Buzzer (passive piezo on LEDC PWM)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 21;
/// Initial LEDC timer frequency before the first tone command.
pub const BUZZER_INIT_FREQ_HZ: u32 = 500;

// ---------------------------------------------------------------------------
// SSD1306 OLED on I2C
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
pub const I2C_FREQ_HZ: u32 = 400_000;
pub const OLED_I2C_ADDR: u8 = 0x3C;
