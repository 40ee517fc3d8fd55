//! Connectivity status LED
//!
//! Blinks fast while the link is down and slowly once it is up. Timing is
//! deadline based, so the LED never blocks the loop.

use embassy_time::{Duration, Instant};
use embedded_hal::digital::OutputPin;

use crate::config::StatusConfig;

pub struct StatusIndicator<P> {
    pin: P,
    config: StatusConfig,
    lit: bool,
    next_toggle: Instant,
}

impl<P: OutputPin> StatusIndicator<P> {
    pub fn new(pin: P, config: StatusConfig) -> Self {
        Self {
            pin,
            config,
            lit: true,
            next_toggle: Instant::from_millis(0),
        }
    }

    /// Toggle the LED if its deadline has passed
    ///
    /// After a stall longer than one period the deadline is re-anchored to
    /// `now` rather than replaying the missed toggles.
    pub fn update(&mut self, now: Instant, connected: bool) {
        if now <= self.next_toggle {
            return;
        }

        let period = self.period(connected);
        if now > self.next_toggle + period {
            self.next_toggle = now;
        }

        self.lit = !self.lit;
        // A failed write just skips this blink
        let _ = if self.lit {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        self.next_toggle += period;
    }

    const fn period(&self, connected: bool) -> Duration {
        if connected {
            self.config.connected
        } else {
            self.config.disconnected
        }
    }

    pub const fn is_lit(&self) -> bool {
        self.lit
    }

    pub const fn next_toggle(&self) -> Instant {
        self.next_toggle
    }
}
