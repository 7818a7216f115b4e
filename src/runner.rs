//! The explicit run loop.
//!
//! ```text
//!   ┌──────────── every tick_interval ─────────────┐
//!   │  InputPort::sample ─▶ CheckinService::step   │
//!   │        ▲                    │                │
//!   │        └──── DelayNs ◀──────┘                │
//!   └──────────────────────────────────────────────┘
//! ```
//!
//! [`MainLoop`] owns the service and every port it is driven by, plus an
//! [`embedded_hal::delay::DelayNs`] for pacing.  On the device the delay
//! is FreeRTOS; tests substitute a virtual clock so whole scenarios run
//! instantly.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;
use log::info;

use crate::app::ports::{AlertPort, DisplayPort, EventSink, InputPort};
use crate::app::service::CheckinService;

pub struct MainLoop<I, A, D, S, W> {
    service: CheckinService<A, D>,
    input: I,
    sink: S,
    delay: W,
}

impl<I, A, D, S, W> MainLoop<I, A, D, S, W>
where
    I: InputPort,
    A: AlertPort,
    D: DisplayPort,
    S: EventSink,
    W: DelayNs,
{
    pub fn new(service: CheckinService<A, D>, input: I, sink: S, delay: W) -> Self {
        Self {
            service,
            input,
            sink,
            delay,
        }
    }

    /// One iteration: sample, step by one tick interval, wait one tick.
    /// Starts the service on first use.
    pub fn run_once(&mut self) {
        self.service.start(&mut self.sink);

        let tick = self.service.config().tick_interval();
        let input = self.input.sample();
        self.service.step(input, tick, &mut self.sink);
        self.delay.delay_ms(self.service.config().tick_interval_ms);
    }

    /// Drive exactly `n` iterations.
    pub fn run_ticks(&mut self, n: u32) {
        for _ in 0..n {
            self.run_once();
        }
    }

    /// Run until `shutdown` is set, then switch every output off.
    pub fn run(&mut self, shutdown: &AtomicBool) {
        self.service.start(&mut self.sink);
        info!(
            "Entering run loop (tick={} ms)",
            self.service.config().tick_interval_ms
        );

        while !shutdown.load(Ordering::Acquire) {
            self.run_once();
        }

        info!("Shutdown requested after {} ticks", self.service.tick_count());
        self.service.shutdown(&mut self.sink);
    }

    pub fn service(&self) -> &CheckinService<A, D> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut CheckinService<A, D> {
        &mut self.service
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn delay(&self) -> &W {
        &self.delay
    }
}
