use crate::color::{OFF, Rgb};

/// Pixel buffer sized for the largest supported strip
///
/// Only the first `len` pixels are addressable; `len` is fixed when the
/// buffer is created from the sink's pixel count.
#[derive(Debug, Clone)]
pub struct FrameBuffer<const MAX_PIXELS: usize> {
    pixels: [Rgb; MAX_PIXELS],
    len: usize,
}

impl<const MAX_PIXELS: usize> FrameBuffer<MAX_PIXELS> {
    /// Create a dark buffer of `len` pixels, clamped to `MAX_PIXELS`
    pub const fn new(len: usize) -> Self {
        Self {
            pixels: [OFF; MAX_PIXELS],
            len: if len > MAX_PIXELS { MAX_PIXELS } else { len },
        }
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn pixel(&self, index: usize) -> Option<Rgb> {
        self.as_slice().get(index).copied()
    }

    pub fn fill(&mut self, color: Rgb) {
        self.as_mut_slice().fill(color);
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.fill(OFF);
    }

    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [Rgb] {
        &mut self.pixels[..self.len]
    }
}
