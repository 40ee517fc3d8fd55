//! Controller configuration
//!
//! Every knob the firmware exposes lives here as a plain `Copy` struct
//! with a `const DEFAULT`, so a board can build its configuration in a
//! `static` and override only what differs.

use embassy_time::Duration;

use crate::color::Rgb;
use crate::state::Mode;

/// Per-mode step intervals and twinkle color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationConfig {
    /// Step interval for `Rainbow` and `RainbowCycle`
    pub rainbow_interval: Duration,
    /// Step interval for `Fade`
    pub fade_interval: Duration,
    /// Step interval for `Twinkle`
    pub twinkle_interval: Duration,
    /// Color of a lit twinkle pixel
    pub twinkle_color: Rgb,
}

impl AnimationConfig {
    pub const DEFAULT: Self = Self {
        rainbow_interval: Duration::from_millis(50),
        fade_interval: Duration::from_millis(10),
        twinkle_interval: Duration::from_millis(200),
        twinkle_color: Rgb { r: 0, g: 0, b: 255 },
    };
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Button debounce and click classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    /// How long the raw level must hold before it is trusted
    pub debounce: Duration,
    /// Presses held at least this long are reported as long clicks
    pub long_click: Duration,
    /// Pin reads low while the button is pressed (pull-up wiring)
    pub active_low: bool,
}

impl ButtonConfig {
    pub const DEFAULT: Self = Self {
        debounce: Duration::from_millis(50),
        long_click: Duration::from_millis(1000),
        active_low: true,
    };
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Transport reconnect policy and topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityConfig {
    /// Minimum spacing between two connect attempts
    pub retry_interval: Duration,
    /// Prefix of the random client identifier
    pub client_id_prefix: &'static str,
    /// Topic that receives the liveness message after every connect
    pub status_topic: &'static str,
    /// Topic carrying remote mode commands
    pub mode_topic: &'static str,
    /// Liveness payload
    pub status_payload: &'static [u8],
}

impl ConnectivityConfig {
    pub const DEFAULT: Self = Self {
        retry_interval: Duration::from_millis(5000),
        client_id_prefix: "ESP8266Client-",
        status_topic: "xmastree/status",
        mode_topic: "xmastree/mode",
        status_payload: b"1",
    };
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Status LED toggle periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusConfig {
    /// Toggle period while the link is down
    pub disconnected: Duration,
    /// Toggle period while the link is up
    pub connected: Duration,
}

impl StatusConfig {
    pub const DEFAULT: Self = Self {
        disconnected: Duration::from_millis(500),
        connected: Duration::from_millis(2000),
    };
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for the whole controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Mode after power-up
    pub default_mode: Mode,
    /// Brightness after power-up, clamped to `1..=255`
    pub default_brightness: u8,
    /// Brightness a long click wraps to once doubling overshoots the maximum
    pub brightness_floor: u8,
    pub animation: AnimationConfig,
    pub button: ButtonConfig,
    pub connectivity: ConnectivityConfig,
    pub status: StatusConfig,
}

impl ControllerConfig {
    pub const DEFAULT: Self = Self {
        default_mode: Mode::RainbowCycle,
        default_brightness: 128,
        brightness_floor: 32,
        animation: AnimationConfig::DEFAULT,
        button: ButtonConfig::DEFAULT,
        connectivity: ConnectivityConfig::DEFAULT,
        status: StatusConfig::DEFAULT,
    };
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
