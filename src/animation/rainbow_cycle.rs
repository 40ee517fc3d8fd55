use embassy_time::{Duration, Instant};
use rand_core::RngCore;

use super::{Animation, StepTimer};
use crate::color::{Rgb, wheel};

/// Full wheel spread along the strip, rotating one step at a time
///
/// Source pixel `i` gets hue `i * 256 / len + offset` and is written to the
/// mirrored position `len - 1 - i`, so the colors flow towards the start
/// of the strip.
#[derive(Debug, Clone)]
pub struct RainbowCycleAnimation {
    timer: StepTimer,
    offset: u8,
}

impl RainbowCycleAnimation {
    pub const fn new(interval: Duration) -> Self {
        Self {
            timer: StepTimer::new(interval),
            offset: 0,
        }
    }

    pub const fn offset(&self) -> u8 {
        self.offset
    }
}

/// Wheel position of source pixel `index` on a strip of `len` pixels
#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn pixel_hue(index: usize, len: usize, offset: u8) -> u8 {
    ((index * 256 / len + offset as usize) & 0xFF) as u8
}

impl Animation for RainbowCycleAnimation {
    fn render<R: RngCore>(&mut self, now: Instant, leds: &mut [Rgb], _rng: &mut R) -> bool {
        if !self.timer.ready(now) {
            return false;
        }

        let len = leds.len();
        for index in 0..len {
            leds[len - 1 - index] = wheel(pixel_hue(index, len, self.offset));
        }
        self.offset = self.offset.wrapping_add(1);
        true
    }
}
