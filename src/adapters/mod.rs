//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                     |
//! |------------|-------------|---------------------------------|
//! | `hardware` | AlertPort   | GPIO status LEDs, LEDC buzzer   |
//! |            | InputPort   | GPIO buttons                    |
//! | `display`  | DisplayPort | SSD1306 OLED over I2C           |
//! | `log_sink` | EventSink   | Serial log output               |

pub mod display;
pub mod hardware;
pub mod log_sink;
