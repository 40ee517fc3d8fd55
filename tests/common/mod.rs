#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use rand_core::RngCore;
use xmas_tree_controller::network::{LinkEventSender, MessageSender};
use xmas_tree_controller::{
    Controller, ControllerConfig, ControllerParts, ControllerQueues, FirmwareUpdate,
    InboundMessage, LinkEvent, LinkLayer, PixelSink, Rgb, Transport,
};

pub const MAX_PIXELS: usize = 64;
pub const QUEUE_SIZE: usize = 8;
pub const PIXELS: usize = 41;

/// Button pin whose level the test flips through a shared cell
#[derive(Clone)]
pub struct MockInput {
    pub high: Rc<Cell<bool>>,
}

impl MockInput {
    pub fn new(high: bool) -> Self {
        Self {
            high: Rc::new(Cell::new(high)),
        }
    }
}

impl ErrorType for MockInput {
    type Error = Infallible;
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high.get())
    }
}

/// Status LED pin counting its level changes
#[derive(Clone, Default)]
pub struct MockOutput {
    pub high: Rc<Cell<bool>>,
    pub toggles: Rc<Cell<u32>>,
}

impl MockOutput {
    fn set(&mut self, high: bool) {
        self.high.set(high);
        self.toggles.set(self.toggles.get() + 1);
    }
}

impl ErrorType for MockOutput {
    type Error = Infallible;
}

impl OutputPin for MockOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

/// Pixel sink keeping every frame written to it
pub struct RecordingSink {
    pub count: usize,
    pub frames: Vec<Vec<Rgb>>,
}

impl RecordingSink {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            frames: Vec::new(),
        }
    }

    pub fn last(&self) -> Option<&[Rgb]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl PixelSink for RecordingSink {
    fn pixel_count(&self) -> usize {
        self.count
    }

    fn write(&mut self, colors: &[Rgb]) {
        self.frames.push(colors.to_vec());
    }
}

/// Replays a fixed list of values, round robin
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            index: 0,
        }
    }
}

impl RngCore for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refused(pub i8);

/// Scripted MQTT client
pub struct MockTransport<'a> {
    pub connected: bool,
    pub accept: bool,
    pub client_ids: Vec<String>,
    pub published: Vec<(String, Vec<u8>)>,
    pub subscribed: Vec<String>,
    pub pumps: u32,
    /// Delivered into the inbox on the next pump
    pub pending: Vec<(String, Vec<u8>)>,
    inbox: MessageSender<'a, QUEUE_SIZE>,
}

impl<'a> MockTransport<'a> {
    pub fn new(inbox: MessageSender<'a, QUEUE_SIZE>) -> Self {
        Self {
            connected: false,
            accept: true,
            client_ids: Vec::new(),
            published: Vec::new(),
            subscribed: Vec::new(),
            pumps: 0,
            pending: Vec::new(),
            inbox,
        }
    }

    pub fn deliver(&mut self, topic: &str, payload: &[u8]) {
        self.pending.push((topic.to_owned(), payload.to_vec()));
    }
}

impl Transport for MockTransport<'_> {
    type Error = Refused;

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self, client_id: &str) -> Result<(), Self::Error> {
        self.client_ids.push(client_id.to_owned());
        if self.accept {
            self.connected = true;
            Ok(())
        } else {
            Err(Refused(-2))
        }
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error> {
        self.published.push((topic.to_owned(), payload.to_vec()));
        Ok(())
    }

    fn subscribe(&mut self, topic: &str) -> Result<(), Self::Error> {
        self.subscribed.push(topic.to_owned());
        Ok(())
    }

    fn pump(&mut self) {
        self.pumps += 1;
        for (topic, payload) in self.pending.drain(..) {
            let _ = self.inbox.try_send(InboundMessage::new(&topic, &payload));
        }
    }
}

/// Wi-Fi station with a settable association flag
pub struct MockLink<'a> {
    pub associated: bool,
    pub polls: u32,
    pub pending: Vec<LinkEvent>,
    events: LinkEventSender<'a, QUEUE_SIZE>,
}

impl LinkLayer for MockLink<'_> {
    fn poll(&mut self) {
        self.polls += 1;
        for event in self.pending.drain(..) {
            let _ = self.events.try_send(event);
        }
    }

    fn is_associated(&self) -> bool {
        self.associated
    }
}

pub struct MockUpdater {
    pub handles: Rc<Cell<u32>>,
}

impl FirmwareUpdate for MockUpdater {
    fn handle(&mut self) {
        self.handles.set(self.handles.get() + 1);
    }
}

pub type TestController<'a> = Controller<
    'a,
    MockLink<'a>,
    MockTransport<'a>,
    MockUpdater,
    MockInput,
    MockOutput,
    RecordingSink,
    SequenceRng,
    MAX_PIXELS,
    QUEUE_SIZE,
>;

/// Test-side handles into a controller's fake hardware
pub struct Handles {
    pub button: Rc<Cell<bool>>,
    pub status_led: MockOutput,
    pub updates: Rc<Cell<u32>>,
}

pub fn build_controller<'a>(
    queues: &'a ControllerQueues<QUEUE_SIZE>,
    config: &ControllerConfig,
) -> (TestController<'a>, Handles) {
    // Pull-up wiring: released reads high
    let button = MockInput::new(true);
    let status_led = MockOutput::default();
    let updates = Rc::new(Cell::new(0));
    let handles = Handles {
        button: button.high.clone(),
        status_led: status_led.clone(),
        updates: updates.clone(),
    };

    let parts = ControllerParts {
        link: MockLink {
            associated: false,
            polls: 0,
            pending: Vec::new(),
            events: queues.link_events.sender(),
        },
        transport: MockTransport::new(queues.messages.sender()),
        updater: MockUpdater { handles: updates },
        button,
        status_led,
        pixels: RecordingSink::new(PIXELS),
        rng: SequenceRng::new(&[7, 13, 29, 3]),
    };

    (TestController::new(parts, queues, config), handles)
}
