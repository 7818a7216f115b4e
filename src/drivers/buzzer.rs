//! Passive piezo buzzer driver.
//!
//! A single LEDC PWM channel (CH0) at 50 % duty; the timer frequency sets
//! the pitch.  Silence is duty 0 with the timer left running.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the LEDC timer/channel via hw_init helpers.
//! On host/test: tracks state in-memory only.

use log::warn;

use crate::drivers::hw_init;
use crate::error::PeripheralWriteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Tone { hz: u32 },
}

pub struct Buzzer {
    state: BuzzerState,
}

impl Buzzer {
    pub fn new() -> Self {
        Self {
            state: BuzzerState::Silent,
        }
    }

    /// Sound `hz` continuously until [`silence`](Self::silence).
    /// A zero frequency is treated as silence.
    pub fn tone(&mut self, hz: u32) -> Result<(), PeripheralWriteError> {
        if hz == 0 {
            return self.silence();
        }
        if self.state == (BuzzerState::Tone { hz }) {
            return Ok(());
        }

        hw_init::buzzer_set_freq(hz).map_err(|rc| {
            warn!("buzzer: set_freq({} Hz) failed (rc={})", hz, rc);
            PeripheralWriteError::Buzzer
        })?;
        if self.state == BuzzerState::Silent {
            hw_init::buzzer_set_duty(hw_init::BUZZER_DUTY_HALF).map_err(|rc| {
                warn!("buzzer: set_duty failed (rc={})", rc);
                PeripheralWriteError::Buzzer
            })?;
        }

        self.state = BuzzerState::Tone { hz };
        Ok(())
    }

    pub fn silence(&mut self) -> Result<(), PeripheralWriteError> {
        hw_init::buzzer_set_duty(0).map_err(|rc| {
            warn!("buzzer: silence failed (rc={})", rc);
            PeripheralWriteError::Buzzer
        })?;
        self.state = BuzzerState::Silent;
        Ok(())
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        !matches!(self.state, BuzzerState::Silent)
    }
}

impl Default for Buzzer {
    fn default() -> Self {
        Self::new()
    }
}
