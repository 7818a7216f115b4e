//! Buzzer PWM bring-up and the two LEDC calls the buzzer driver needs.
//!
//! Configures the LEDC timer/channel that drives the piezo buzzer using
//! raw ESP-IDF sys calls. Called once from `main()` before the run loop
//! starts.  Buttons, LEDs and the I2C bus are owned by `esp-idf-hal`
//! drivers and configured where they are constructed.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::PeripheralInitError;
#[cfg(target_os = "espidf")]
use crate::pins;

/// Buzzer duty resolution (10-bit).
pub const BUZZER_DUTY_MAX: u32 = 1023;
/// 50 % square wave.
pub const BUZZER_DUTY_HALF: u32 = BUZZER_DUTY_MAX / 2 + 1;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), PeripheralInitError> {
    // SAFETY: Called once from main() before the run loop; single-threaded.
    unsafe {
        init_buzzer_ledc()?;
    }
    info!("hw_init: buzzer PWM ready");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), PeripheralInitError> {
    log::info!("hw_init(host): no LEDC to configure");
    Ok(())
}

// ── LEDC PWM (buzzer) ────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_buzzer_ledc() -> Result<(), PeripheralInitError> {
    // Timer 0: buzzer tone (frequency changes per command, 10-bit)
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_10_BIT,
        freq_hz: pins::BUZZER_INIT_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    let ret = unsafe { ledc_timer_config(&timer0) };
    if ret != ESP_OK as i32 {
        return Err(PeripheralInitError::Buzzer(ret));
    }

    // Channel 0: buzzer output, silent until the first tone
    let ret = unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: ledc_channel_t_LEDC_CHANNEL_0,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: pins::BUZZER_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        })
    };
    if ret != ESP_OK as i32 {
        return Err(PeripheralInitError::Buzzer(ret));
    }

    info!(
        "hw_init: LEDC configured (buzzer=CH0 on GPIO{}, {} Hz)",
        pins::BUZZER_GPIO,
        pins::BUZZER_INIT_FREQ_HZ
    );
    Ok(())
}

/// Retune the buzzer timer.  Returns the ESP-IDF error code on failure.
#[cfg(target_os = "espidf")]
pub fn buzzer_set_freq(hz: u32) -> Result<(), i32> {
    // SAFETY: LEDC timer 0 was configured in init_buzzer_ledc(); only the
    // main loop calls this function.
    let ret = unsafe {
        ledc_set_freq(
            ledc_mode_t_LEDC_LOW_SPEED_MODE,
            ledc_timer_t_LEDC_TIMER_0,
            hz,
        )
    };
    if ret != ESP_OK as i32 {
        return Err(ret);
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn buzzer_set_freq(_hz: u32) -> Result<(), i32> {
    Ok(())
}

/// Set the buzzer channel duty (0 = silent).
#[cfg(target_os = "espidf")]
pub fn buzzer_set_duty(duty: u32) -> Result<(), i32> {
    // SAFETY: LEDC channel 0 was configured in init_buzzer_ledc(); duty
    // register writes are race-free since only the main loop calls this.
    unsafe {
        let ret = ledc_set_duty(
            ledc_mode_t_LEDC_LOW_SPEED_MODE,
            ledc_channel_t_LEDC_CHANNEL_0,
            duty.min(BUZZER_DUTY_MAX),
        );
        if ret != ESP_OK as i32 {
            return Err(ret);
        }
        let ret = ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, ledc_channel_t_LEDC_CHANNEL_0);
        if ret != ESP_OK as i32 {
            return Err(ret);
        }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn buzzer_set_duty(_duty: u32) -> Result<(), i32> {
    Ok(())
}
