//! Whole-strip rainbow
//!
//! The entire strip shows one wheel color; the color walks once around
//! the wheel every 256 steps.

use embassy_time::{Duration, Instant};
use rand_core::RngCore;

use super::{Animation, StepTimer};
use crate::color::{Rgb, wheel};

#[derive(Debug, Clone)]
pub struct RainbowAnimation {
    timer: StepTimer,
    /// Wheel position drawn by the next step
    hue: u8,
}

impl RainbowAnimation {
    pub const fn new(interval: Duration) -> Self {
        Self {
            timer: StepTimer::new(interval),
            hue: 0,
        }
    }

    pub const fn hue(&self) -> u8 {
        self.hue
    }
}

impl Animation for RainbowAnimation {
    fn render<R: RngCore>(&mut self, now: Instant, leds: &mut [Rgb], _rng: &mut R) -> bool {
        if !self.timer.ready(now) {
            return false;
        }

        leds.fill(wheel(self.hue));
        self.hue = self.hue.wrapping_add(1);
        true
    }
}
