use embassy_time::Instant;
use rand_core::RngCore;

use super::{AnimationSlot, FrameBuffer};
use crate::PixelSink;
use crate::color::{OFF, Rgb};
use crate::config::AnimationConfig;
use crate::math8::scale_frame;
use crate::state::{ControllerState, Mode};

/// Animation engine - turns the shared mode into pixel frames
///
/// Holds the unscaled frame buffer and the active animation's cursor.
/// Brightness is applied on the way out, into a separate output buffer,
/// so animations that read back their own pixels see unscaled colors.
pub struct AnimationEngine<const MAX_PIXELS: usize> {
    config: AnimationConfig,
    frame: FrameBuffer<MAX_PIXELS>,
    output: [Rgb; MAX_PIXELS],
    slot: AnimationSlot,
    /// Mode seen on the previous tick, `None` before the first one
    previous_mode: Option<Mode>,
}

impl<const MAX_PIXELS: usize> AnimationEngine<MAX_PIXELS> {
    /// Create an engine for a strip of `pixel_count` pixels
    pub const fn new(pixel_count: usize, config: AnimationConfig) -> Self {
        Self {
            config,
            frame: FrameBuffer::new(pixel_count),
            output: [OFF; MAX_PIXELS],
            slot: AnimationSlot::Off,
            previous_mode: None,
        }
    }

    /// Advance the active animation by at most one step
    ///
    /// A mode change clears the frame and starts the new mode from a fresh
    /// cursor before anything is drawn. Returns `true` if a frame was
    /// flushed to `sink`.
    pub fn tick<S: PixelSink, R: RngCore>(
        &mut self,
        now: Instant,
        state: &ControllerState,
        sink: &mut S,
        rng: &mut R,
    ) -> bool {
        let mode = state.mode();
        let switched = self.previous_mode != Some(mode);
        if switched {
            log!("[LEDS] Mode set to {}", mode);
            self.frame.clear();
            self.slot = AnimationSlot::for_mode(mode, &self.config);
            self.previous_mode = Some(mode);
        }

        // Off only has to push the cleared frame once
        let rendered = if matches!(self.slot, AnimationSlot::Off) {
            switched
        } else {
            self.slot.render(now, self.frame.as_mut_slice(), rng)
        };
        if rendered {
            self.flush(state, sink);
        }
        rendered
    }

    fn flush<S: PixelSink>(&mut self, state: &ControllerState, sink: &mut S) {
        let len = self.frame.len();
        let output = &mut self.output[..len];
        scale_frame(self.frame.as_slice(), state.brightness().output_scale(), output);
        sink.write(output);
    }

    /// Unscaled pixels of the current frame
    pub fn frame(&self) -> &FrameBuffer<MAX_PIXELS> {
        &self.frame
    }

    /// Pixels as last written to the sink
    pub fn output(&self) -> &[Rgb] {
        &self.output[..self.frame.len()]
    }

    pub fn slot(&self) -> &AnimationSlot {
        &self.slot
    }
}
