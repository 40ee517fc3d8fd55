use core::fmt::Debug;

use heapless::{String, Vec};

use super::clip_str;
use crate::channel::{Queue, QueueReceiver, QueueSender};

/// Longest topic an inbound message keeps
pub const TOPIC_CAPACITY: usize = 64;

/// Longest payload an inbound message keeps
pub const PAYLOAD_CAPACITY: usize = 64;

/// Publish/subscribe client (MQTT on the device)
///
/// Inbound messages are not returned from here: the implementation owns a
/// [`MessageSender`] and pushes whatever arrives during [`Transport::pump`].
pub trait Transport {
    /// Status reported when an operation is refused
    type Error: Debug;

    fn is_connected(&self) -> bool;

    /// Open a session under `client_id`
    fn connect(&mut self, client_id: &str) -> Result<(), Self::Error>;

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), Self::Error>;

    fn subscribe(&mut self, topic: &str) -> Result<(), Self::Error>;

    /// Service the session once: keepalives and inbound delivery. Must not block.
    fn pump(&mut self);
}

/// A message delivered on a subscribed topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    topic: String<TOPIC_CAPACITY>,
    payload: Vec<u8, PAYLOAD_CAPACITY>,
}

impl InboundMessage {
    /// Copy a received message, cutting topic and payload to their capacities
    ///
    /// Commands only read the first payload byte, so the cut never changes
    /// their meaning.
    pub fn new(topic: &str, payload: &[u8]) -> Self {
        let mut owned_topic = String::new();
        // Clipped to capacity, cannot fail
        let _ = owned_topic.push_str(clip_str(topic, TOPIC_CAPACITY));
        let payload = &payload[..payload.len().min(PAYLOAD_CAPACITY)];
        let mut owned_payload = Vec::new();
        let _ = owned_payload.extend_from_slice(payload);
        Self {
            topic: owned_topic,
            payload: owned_payload,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

pub type MessageQueue<const SIZE: usize> = Queue<InboundMessage, SIZE>;
pub type MessageSender<'a, const SIZE: usize> = QueueSender<'a, InboundMessage, SIZE>;
pub type MessageReceiver<'a, const SIZE: usize> = QueueReceiver<'a, InboundMessage, SIZE>;
