//! Lifeline Firmware: Main Entry Point
//!
//! Hexagonal architecture driven by a fixed-cadence run loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  ButtonInputs      HardwareAdapter     OledPresenter           │
//! │  (InputPort)       (AlertPort)         (DisplayPort)           │
//! │  LogEventSink (EventSink)                                      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            CheckinService (pure logic)                 │    │
//! │  │  FSM · output apply · event emission                   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  MainLoop (sample → step → FreeRTOS delay)                     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use core::sync::atomic::AtomicBool;

// ── Imports ───────────────────────────────────────────────────
use anyhow::{Context, Result};
use esp_idf_svc::hal::{
    delay::FreeRtos,
    gpio::{PinDriver, Pull},
    i2c::{I2cConfig, I2cDriver},
    peripherals::Peripherals,
    units::Hertz,
};
use log::info;

use lifeline::adapters::display::OledPresenter;
use lifeline::adapters::hardware::HardwareAdapter;
use lifeline::adapters::log_sink::LogEventSink;
use lifeline::app::service::CheckinService;
use lifeline::config::CheckinConfig;
use lifeline::drivers::button::ButtonInputs;
use lifeline::drivers::buzzer::Buzzer;
use lifeline::drivers::hw_init;
use lifeline::drivers::ssd1306::Ssd1306;
use lifeline::drivers::status_led::StatusLeds;
use lifeline::pins;
use lifeline::runner::MainLoop;

/// Never set on the device; the loop runs until power-off or reset.
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Lifeline v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = CheckinConfig::device();
    config.validate().context("invalid check-in config")?;
    info!(
        "Config: check-in every {} ms, countdown {} ms, tick {} ms",
        config.wait_timeout_ms, config.countdown_duration_ms, config.tick_interval_ms
    );

    // ── 3. Hardware peripherals ───────────────────────────────
    let peripherals = Peripherals::take().context("peripherals already taken")?;
    hw_init::init_peripherals().context("buzzer init failed")?;

    // Pin fields below follow the map in `pins`.
    let mut btn_safe = PinDriver::input(peripherals.pins.gpio5)?;
    btn_safe.set_pull(Pull::Up)?;
    let mut btn_emergency = PinDriver::input(peripherals.pins.gpio6)?;
    btn_emergency.set_pull(Pull::Up)?;
    info!(
        "Buttons: safe=GPIO{} emergency=GPIO{} (active-low)",
        pins::BTN_SAFE_GPIO,
        pins::BTN_EMERGENCY_GPIO
    );
    let buttons = ButtonInputs::new(btn_safe, btn_emergency);

    let led_green = PinDriver::output(peripherals.pins.gpio11)?;
    let led_blue = PinDriver::output(peripherals.pins.gpio12)?;
    let led_red = PinDriver::output(peripherals.pins.gpio13)?;
    info!(
        "LEDs: green=GPIO{} blue=GPIO{} red=GPIO{}",
        pins::LED_GREEN_GPIO,
        pins::LED_BLUE_GPIO,
        pins::LED_RED_GPIO
    );
    let mut leds = StatusLeds::new(led_green, led_red, led_blue);
    leds.off().context("status LEDs unavailable")?;
    let hw = HardwareAdapter::new(leds, Buzzer::new());

    info!(
        "OLED: SDA=GPIO{} SCL=GPIO{} addr=0x{:02X} @ {} Hz",
        pins::I2C_SDA_GPIO,
        pins::I2C_SCL_GPIO,
        pins::OLED_I2C_ADDR,
        pins::I2C_FREQ_HZ
    );
    let i2c_config = I2cConfig::new().baudrate(Hertz(pins::I2C_FREQ_HZ));
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio14,
        peripherals.pins.gpio15,
        &i2c_config,
    )
    .context("I2C bus init failed")?;
    let mut oled = Ssd1306::new(i2c, pins::OLED_I2C_ADDR);
    oled.init().context("OLED init failed")?;
    let display = OledPresenter::new(oled);

    // ── 4. Application core ───────────────────────────────────
    let service = CheckinService::new(config, hw, display)?;
    let mut main_loop = MainLoop::new(service, buttons, LogEventSink::new(), FreeRtos);

    info!("System ready. Entering run loop.");

    // ── 5. Run loop ───────────────────────────────────────────
    main_loop.run(&SHUTDOWN);
    Ok(())
}
