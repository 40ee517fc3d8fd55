//! Shared controller state
//!
//! [`ControllerState`] is the one record every component sees: the button
//! and remote commands write it, the animation engine reads it every tick.
//! All mutators leave it valid before returning.

use core::fmt;

const MODE_NAME_OFF: &str = "off";
const MODE_NAME_RAINBOW: &str = "rainbow";
const MODE_NAME_RAINBOW_CYCLE: &str = "rainbow_cycle";
const MODE_NAME_FADE: &str = "fade";
const MODE_NAME_TWINKLE: &str = "twinkle";

const MODE_ID_OFF: u8 = 0;
const MODE_ID_RAINBOW: u8 = 1;
const MODE_ID_RAINBOW_CYCLE: u8 = 2;
const MODE_ID_FADE: u8 = 3;
const MODE_ID_TWINKLE: u8 = 4;

/// Number of built-in animation modes
pub const TOTAL_MODES: u8 = 5;

/// Highest brightness the strip accepts
pub const MAX_BRIGHTNESS: u8 = 255;

/// Animation modes, in button cycling order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    #[default]
    Off = MODE_ID_OFF,
    Rainbow = MODE_ID_RAINBOW,
    RainbowCycle = MODE_ID_RAINBOW_CYCLE,
    Fade = MODE_ID_FADE,
    Twinkle = MODE_ID_TWINKLE,
}

impl Mode {
    pub const fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_OFF => Self::Off,
            MODE_ID_RAINBOW => Self::Rainbow,
            MODE_ID_RAINBOW_CYCLE => Self::RainbowCycle,
            MODE_ID_FADE => Self::Fade,
            MODE_ID_TWINKLE => Self::Twinkle,
            _ => return None,
        })
    }

    /// Any raw value, wrapped modulo [`TOTAL_MODES`]
    pub const fn wrapping_from_raw(value: u8) -> Self {
        match Self::from_raw(value % TOTAL_MODES) {
            Some(mode) => mode,
            None => Self::Off,
        }
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    /// The mode a single click switches to
    pub const fn next(self) -> Self {
        Self::wrapping_from_raw(self.as_raw() + 1)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => MODE_NAME_OFF,
            Self::Rainbow => MODE_NAME_RAINBOW,
            Self::RainbowCycle => MODE_NAME_RAINBOW_CYCLE,
            Self::Fade => MODE_NAME_FADE,
            Self::Twinkle => MODE_NAME_TWINKLE,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            MODE_NAME_OFF => Some(Self::Off),
            MODE_NAME_RAINBOW => Some(Self::Rainbow),
            MODE_NAME_RAINBOW_CYCLE => Some(Self::RainbowCycle),
            MODE_NAME_FADE => Some(Self::Fade),
            MODE_NAME_TWINKLE => Some(Self::Twinkle),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_raw(), self.as_str())
    }
}

/// Global strip brightness, never zero
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Brightness(u8);

impl Brightness {
    pub const MAX: Self = Self(MAX_BRIGHTNESS);

    /// Clamp any value into `1..=MAX_BRIGHTNESS`
    pub const fn new(value: u8) -> Self {
        if value == 0 { Self(1) } else { Self(value) }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Double the brightness, wrapping to `floor` once it passes the maximum
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn doubled(self, floor: Self) -> Self {
        let doubled = self.0 as u16 * 2;
        if doubled > MAX_BRIGHTNESS as u16 {
            floor
        } else {
            Self(doubled as u8)
        }
    }

    /// Scale factor handed to the output stage.
    ///
    /// One below the brightness: the WS2812 driver stores its factor plus
    /// one, and the full value saturates on the last step.
    pub const fn output_scale(self) -> u8 {
        self.0 - 1
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Self::MAX
    }
}

/// Mode and brightness shared between input, network and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerState {
    mode: Mode,
    brightness: Brightness,
    brightness_floor: Brightness,
}

impl ControllerState {
    pub const fn new(mode: Mode, brightness: u8, brightness_floor: u8) -> Self {
        Self {
            mode,
            brightness: Brightness::new(brightness),
            brightness_floor: Brightness::new(brightness_floor),
        }
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Switch mode, doing nothing when it is already active
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            log!("[STATE] Mode {}", self.mode);
        }
    }

    /// Advance to the next mode, wrapping after the last one
    pub fn next_mode(&mut self) {
        self.set_mode(self.mode.next());
    }

    /// Overwrite the mode unconditionally.
    ///
    /// Used for remote commands, which skip the changed-only check.
    pub fn apply_mode_command(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Double the brightness, falling back to the floor past the maximum
    pub fn increase_brightness(&mut self) {
        self.brightness = self.brightness.doubled(self.brightness_floor);
        log!("[STATE] Brightness {}", self.brightness.get());
    }
}
