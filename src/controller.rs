//! Cooperative main loop
//!
//! One [`Controller::tick`] polls every component once, in a fixed order,
//! and never blocks. Components that only act every so often keep their
//! own deadlines and return immediately when nothing is due.
//!
//! # Usage
//!
//! ```ignore
//! static QUEUES: ControllerQueues<8> = ControllerQueues::new();
//!
//! let transport = MqttTransport::new(QUEUES.messages.sender());
//! let link = Station::new(QUEUES.link_events.sender());
//! let updater = OtaServer::new(QUEUES.update_events.sender());
//!
//! let mut controller: Controller<_, _, _, _, _, _, _, 41, 8> = Controller::new(
//!     ControllerParts { link, transport, updater, button, status_led, pixels, rng },
//!     &QUEUES,
//!     &ControllerConfig::DEFAULT,
//! );
//! controller.run()
//! ```

use embassy_time::Instant;
use embedded_hal::digital::{InputPin, OutputPin};
use rand_core::RngCore;

use crate::PixelSink;
use crate::animation::AnimationEngine;
use crate::config::ControllerConfig;
use crate::firmware::{FirmwareUpdate, UpdateEventQueue, UpdateEventReceiver, log_update_event};
use crate::input::{ButtonEvent, DebouncedButton};
use crate::network::{
    ConnectivitySupervisor, LinkEventQueue, LinkEventReceiver, LinkLayer, MessageQueue, Transport,
    log_link_event,
};
use crate::state::ControllerState;
use crate::status::StatusIndicator;

/// Queues the collaborators report into
///
/// Meant to live in a `static`; hand each collaborator the sender of its
/// queue before building the controller.
pub struct ControllerQueues<const SIZE: usize> {
    pub link_events: LinkEventQueue<SIZE>,
    pub messages: MessageQueue<SIZE>,
    pub update_events: UpdateEventQueue<SIZE>,
}

impl<const SIZE: usize> ControllerQueues<SIZE> {
    pub const fn new() -> Self {
        Self {
            link_events: LinkEventQueue::new(),
            messages: MessageQueue::new(),
            update_events: UpdateEventQueue::new(),
        }
    }
}

impl<const SIZE: usize> Default for ControllerQueues<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Hardware and platform services the controller drives
pub struct ControllerParts<L, T, F, B, S, P, R> {
    pub link: L,
    pub transport: T,
    pub updater: F,
    /// Raw mode button pin
    pub button: B,
    /// Connectivity status LED pin
    pub status_led: S,
    pub pixels: P,
    pub rng: R,
}

/// The controller - owns shared state and every component
pub struct Controller<'a, L, T, F, B, S, P, R, const MAX_PIXELS: usize, const QUEUE_SIZE: usize> {
    state: ControllerState,

    link: L,
    link_events: LinkEventReceiver<'a, QUEUE_SIZE>,
    transport: T,
    supervisor: ConnectivitySupervisor<'a, QUEUE_SIZE>,
    updater: F,
    update_events: UpdateEventReceiver<'a, QUEUE_SIZE>,
    button: DebouncedButton<B>,
    engine: AnimationEngine<MAX_PIXELS>,
    pixels: P,
    status: StatusIndicator<S>,
    rng: R,
}

impl<'a, L, T, F, B, S, P, R, const MAX_PIXELS: usize, const QUEUE_SIZE: usize>
    Controller<'a, L, T, F, B, S, P, R, MAX_PIXELS, QUEUE_SIZE>
where
    L: LinkLayer,
    T: Transport,
    F: FirmwareUpdate,
    B: InputPin,
    S: OutputPin,
    P: PixelSink,
    R: RngCore,
{
    pub fn new(
        parts: ControllerParts<L, T, F, B, S, P, R>,
        queues: &'a ControllerQueues<QUEUE_SIZE>,
        config: &ControllerConfig,
    ) -> Self {
        let pixel_count = parts.pixels.pixel_count();
        Self {
            state: ControllerState::new(
                config.default_mode,
                config.default_brightness,
                config.brightness_floor,
            ),
            link: parts.link,
            link_events: queues.link_events.receiver(),
            transport: parts.transport,
            supervisor: ConnectivitySupervisor::new(
                queues.messages.receiver(),
                config.connectivity,
            ),
            updater: parts.updater,
            update_events: queues.update_events.receiver(),
            button: DebouncedButton::new(parts.button, &config.button),
            engine: AnimationEngine::new(pixel_count, config.animation),
            pixels: parts.pixels,
            status: StatusIndicator::new(parts.status_led, config.status),
            rng: parts.rng,
        }
    }

    /// Run one loop iteration
    ///
    /// Order matters: input is applied before the engine renders, so a
    /// click shows up in the frame drawn during the same tick.
    pub fn tick(&mut self, now: Instant) {
        self.link.poll();
        for event in self.link_events.drain() {
            log_link_event(&event);
        }
        let associated = self.link.is_associated();

        self.supervisor.poll(
            now,
            associated,
            &mut self.transport,
            &mut self.rng,
            &mut self.state,
        );

        self.updater.handle();
        for event in self.update_events.drain() {
            log_update_event(event);
        }

        if let Some(event) = self.button.poll(now) {
            apply_button_event(&mut self.state, event);
        }

        self.engine
            .tick(now, &self.state, &mut self.pixels, &mut self.rng);

        self.status.update(now, associated);
    }

    /// Tick forever on the embassy-time clock
    pub fn run(&mut self) -> ! {
        loop {
            self.tick(Instant::now());
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn supervisor(&self) -> &ConnectivitySupervisor<'a, QUEUE_SIZE> {
        &self.supervisor
    }

    pub fn engine(&self) -> &AnimationEngine<MAX_PIXELS> {
        &self.engine
    }

    pub fn status(&self) -> &StatusIndicator<S> {
        &self.status
    }

    pub fn pixels(&self) -> &P {
        &self.pixels
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}

/// Apply a click: single advances the mode, long doubles the brightness
pub fn apply_button_event(state: &mut ControllerState, event: ButtonEvent) {
    match event {
        ButtonEvent::SingleClick => state.next_mode(),
        ButtonEvent::LongClick => state.increase_brightness(),
    }
}
