//! Single-channel breathing fade
//!
//! The whole strip ramps one primary up to 254 and back down to 0, one
//! unit per step. Each time the ramp bottoms out the next primary takes
//! over: red, green, blue, red again.

use embassy_time::{Duration, Instant};
use rand_core::RngCore;

use super::{Animation, StepTimer};
use crate::color::Rgb;

/// Ramp turns around here on the way up
const FADE_PEAK: u8 = 254;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FadeChannel {
    #[default]
    Red,
    Green,
    Blue,
}

impl FadeChannel {
    pub const fn next(self) -> Self {
        match self {
            Self::Red => Self::Green,
            Self::Green => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    /// Solid color with only this channel lit at `level`
    pub const fn color(self, level: u8) -> Rgb {
        match self {
            Self::Red => Rgb { r: level, g: 0, b: 0 },
            Self::Green => Rgb { r: 0, g: level, b: 0 },
            Self::Blue => Rgb { r: 0, g: 0, b: level },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FadeAnimation {
    timer: StepTimer,
    level: u8,
    rising: bool,
    channel: FadeChannel,
}

impl FadeAnimation {
    pub const fn new(interval: Duration) -> Self {
        Self {
            timer: StepTimer::new(interval),
            level: 0,
            rising: true,
            channel: FadeChannel::Red,
        }
    }

    pub const fn level(&self) -> u8 {
        self.level
    }

    pub const fn channel(&self) -> FadeChannel {
        self.channel
    }

    fn advance(&mut self) {
        self.level = if self.rising {
            self.level.saturating_add(1)
        } else {
            self.level.saturating_sub(1)
        };

        if self.level == FADE_PEAK || self.level == 0 {
            self.rising = !self.rising;
        }
        if self.level == 0 {
            self.channel = self.channel.next();
        }
    }
}

impl Animation for FadeAnimation {
    fn render<R: RngCore>(&mut self, now: Instant, leds: &mut [Rgb], _rng: &mut R) -> bool {
        if !self.timer.ready(now) {
            return false;
        }

        self.advance();
        leds.fill(self.channel.color(self.level));
        true
    }
}
