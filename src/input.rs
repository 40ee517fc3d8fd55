//! Debounced push button
//!
//! Samples a raw input pin once per tick and turns its transitions into
//! click events. A level only counts once it has held for the debounce
//! window; an event is surfaced on the debounced release, classified by
//! how long the debounced press lasted.

use embassy_time::{Duration, Instant};
use embedded_hal::digital::InputPin;

use crate::config::ButtonConfig;

/// Logical button events
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ButtonEvent {
    /// Short press and release
    SingleClick,
    /// Press held past the long-click threshold
    LongClick,
}

#[derive(Debug)]
pub struct DebouncedButton<P> {
    pin: P,
    debounce: Duration,
    long_click: Duration,
    active_low: bool,
    /// Last sampled pressed level, bouncing included
    raw_pressed: bool,
    /// When `raw_pressed` last changed
    raw_since: Instant,
    /// Debounced pressed level
    stable_pressed: bool,
    /// When the debounced press began
    pressed_at: Instant,
}

impl<P: InputPin> DebouncedButton<P> {
    pub fn new(pin: P, config: &ButtonConfig) -> Self {
        Self {
            pin,
            debounce: config.debounce,
            long_click: config.long_click,
            active_low: config.active_low,
            raw_pressed: false,
            raw_since: Instant::from_millis(0),
            stable_pressed: false,
            pressed_at: Instant::from_millis(0),
        }
    }

    /// Sample the pin and report a completed click, if any
    ///
    /// A failed pin read is treated as an unchanged level.
    pub fn poll(&mut self, now: Instant) -> Option<ButtonEvent> {
        let pressed = match self.pin.is_high() {
            Ok(high) => high != self.active_low,
            Err(_) => self.raw_pressed,
        };

        if pressed != self.raw_pressed {
            self.raw_pressed = pressed;
            self.raw_since = now;
            return None;
        }

        if pressed == self.stable_pressed
            || now.saturating_duration_since(self.raw_since) < self.debounce
        {
            return None;
        }

        self.stable_pressed = pressed;
        if pressed {
            self.pressed_at = self.raw_since;
            return None;
        }

        let held = self.raw_since.saturating_duration_since(self.pressed_at);
        let event = if held >= self.long_click {
            ButtonEvent::LongClick
        } else {
            ButtonEvent::SingleClick
        };
        log!("[BUTTON] {:?} after {}ms", event, held.as_millis());
        Some(event)
    }

    /// Whether the debounced level is currently pressed
    pub const fn is_pressed(&self) -> bool {
        self.stable_pressed
    }
}
