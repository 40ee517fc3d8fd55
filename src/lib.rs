#![no_std]

#[macro_use]
mod logging;

pub mod animation;
pub mod channel;
pub mod color;
pub mod config;
pub mod controller;
pub mod firmware;
pub mod input;
pub mod math8;
pub mod network;
pub mod state;
pub mod status;

pub use animation::{AnimationEngine, FrameBuffer};
pub use config::{
    AnimationConfig, ButtonConfig, ConnectivityConfig, ControllerConfig, StatusConfig,
};
pub use controller::{Controller, ControllerParts, ControllerQueues};
pub use firmware::{FirmwareUpdate, UpdateError, UpdateEvent};
pub use input::{ButtonEvent, DebouncedButton};
pub use network::{
    ConnectionPhase, ConnectivitySupervisor, InboundMessage, LinkEvent, LinkInfo, LinkLayer,
    Transport,
};
pub use state::{Brightness, ControllerState, Mode, TOTAL_MODES};
pub use status::StatusIndicator;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED strip trait
///
/// Implement this trait to support different hardware platforms.
/// The animation engine renders into its own frame buffer and hands
/// the finished, brightness-scaled frame to the sink.
pub trait PixelSink {
    /// Number of pixels on the physical strip
    fn pixel_count(&self) -> usize;

    /// Write colors to the LED strip and latch them
    fn write(&mut self, colors: &[Rgb]);
}
