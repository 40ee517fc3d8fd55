use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Black, every channel off
pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Position on the 256-step hue wheel to a fully saturated color.
///
/// The wheel runs green, red, blue and back to green in three 85-step
/// segments.
/// Inside a segment two channels are interpolated linearly and the third
/// stays at zero.
pub const fn wheel(position: u8) -> Rgb {
    if position < 85 {
        Rgb {
            r: position * 3,
            g: 255 - position * 3,
            b: 0,
        }
    } else if position < 170 {
        let position = position - 85;
        Rgb {
            r: 255 - position * 3,
            g: 0,
            b: position * 3,
        }
    } else {
        let position = position - 170;
        Rgb {
            r: 0,
            g: position * 3,
            b: 255 - position * 3,
        }
    }
}
