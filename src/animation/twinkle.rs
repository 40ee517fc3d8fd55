use embassy_time::{Duration, Instant};
use rand_core::RngCore;

use super::{Animation, StepTimer};
use crate::color::{OFF, Rgb};

/// Random sparkle: each step toggles one uniformly chosen pixel
#[derive(Debug, Clone)]
pub struct TwinkleAnimation {
    timer: StepTimer,
    color: Rgb,
}

impl TwinkleAnimation {
    pub const fn new(interval: Duration, color: Rgb) -> Self {
        Self {
            timer: StepTimer::new(interval),
            color,
        }
    }
}

impl Animation for TwinkleAnimation {
    fn render<R: RngCore>(&mut self, now: Instant, leds: &mut [Rgb], rng: &mut R) -> bool {
        if leds.is_empty() || !self.timer.ready(now) {
            return false;
        }

        let index = rng.next_u32() as usize % leds.len();
        leds[index] = if leds[index] == OFF { self.color } else { OFF };
        true
    }
}
