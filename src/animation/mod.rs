//! Animation system with compile-time known variants
//!
//! Every mode's cursor lives in an [`AnimationSlot`] variant instead of
//! loose statics, so switching modes is a matter of building a fresh slot.
//! Each animation paces itself: `render` is a no-op until its own step
//! interval has elapsed.

mod engine;
mod fade;
mod frame;
mod rainbow;
mod rainbow_cycle;
mod twinkle;

use embassy_time::{Duration, Instant};
use rand_core::RngCore;

pub use engine::AnimationEngine;
pub use fade::{FadeAnimation, FadeChannel};
pub use frame::FrameBuffer;
pub use rainbow::RainbowAnimation;
pub use rainbow_cycle::RainbowCycleAnimation;
pub use twinkle::TwinkleAnimation;

use crate::{color::Rgb, config::AnimationConfig, state::Mode};

pub trait Animation {
    /// Draw the next step into `leds` if the step interval has elapsed
    ///
    /// Returns `true` when the frame changed and should be flushed.
    fn render<R: RngCore>(&mut self, now: Instant, leds: &mut [Rgb], rng: &mut R) -> bool;
}

/// Gate that opens at most once per interval
#[derive(Debug, Clone, Copy)]
pub struct StepTimer {
    interval: Duration,
    last: Option<Instant>,
}

impl StepTimer {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether a step is due at `now`; records `now` as the last step if so
    pub fn ready(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last
            && now.saturating_duration_since(last) < self.interval
        {
            return false;
        }
        self.last = Some(now);
        true
    }
}

/// Animation slot - enum containing all possible animations
#[derive(Debug, Clone, Default)]
pub enum AnimationSlot {
    /// Strip dark, nothing to step
    #[default]
    Off,
    Rainbow(RainbowAnimation),
    RainbowCycle(RainbowCycleAnimation),
    Fade(FadeAnimation),
    Twinkle(TwinkleAnimation),
}

impl AnimationSlot {
    /// Fresh animation state for `mode`
    pub fn for_mode(mode: Mode, config: &AnimationConfig) -> Self {
        match mode {
            Mode::Off => Self::Off,
            Mode::Rainbow => Self::Rainbow(RainbowAnimation::new(config.rainbow_interval)),
            Mode::RainbowCycle => {
                Self::RainbowCycle(RainbowCycleAnimation::new(config.rainbow_interval))
            }
            Mode::Fade => Self::Fade(FadeAnimation::new(config.fade_interval)),
            Mode::Twinkle => Self::Twinkle(TwinkleAnimation::new(
                config.twinkle_interval,
                config.twinkle_color,
            )),
        }
    }

    /// Render the current animation
    pub fn render<R: RngCore>(&mut self, now: Instant, leds: &mut [Rgb], rng: &mut R) -> bool {
        match self {
            Self::Off => false,
            Self::Rainbow(animation) => animation.render(now, leds, rng),
            Self::RainbowCycle(animation) => animation.render(now, leds, rng),
            Self::Fade(animation) => animation.render(now, leds, rng),
            Self::Twinkle(animation) => animation.render(now, leds, rng),
        }
    }

    /// Get the mode for external observation
    pub fn mode(&self) -> Mode {
        match self {
            Self::Off => Mode::Off,
            Self::Rainbow(_) => Mode::Rainbow,
            Self::RainbowCycle(_) => Mode::RainbowCycle,
            Self::Fade(_) => Mode::Fade,
            Self::Twinkle(_) => Mode::Twinkle,
        }
    }
}
