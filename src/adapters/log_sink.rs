//! [`EventSink`] that prints one `TAG | key=value` line per event through
//! the `log` facade.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::CountdownStarted { secs } => {
                warn!("COUNTDOWN | no check-in, {}s to respond", secs);
            }
            AppEvent::CountdownTick(secs) => {
                info!("COUNTDOWN | {}s left", secs);
            }
            AppEvent::AlertRaised(cause) => {
                warn!("ALERT | cause={:?}", cause);
            }
            AppEvent::SafeConfirmed => {
                info!("SAFE | check-in confirmed, timer reset");
            }
            AppEvent::PeripheralFault(e) => {
                warn!("FAULT | {}", e);
            }
        }
    }
}
