//! Network connectivity: Wi-Fi link, MQTT transport, remote commands

pub mod command;
mod link;
mod supervisor;
mod transport;

pub use command::{handle_message, parse_mode_command};
pub use link::{
    HOSTNAME_CAPACITY, LinkEvent, LinkEventQueue, LinkEventReceiver, LinkEventSender, LinkInfo,
    LinkLayer, SSID_CAPACITY, Ssid, log_link_event,
};
pub use supervisor::{CLIENT_ID_CAPACITY, ConnectionPhase, ConnectivitySupervisor};
pub use transport::{
    InboundMessage, MessageQueue, MessageReceiver, MessageSender, PAYLOAD_CAPACITY,
    TOPIC_CAPACITY, Transport,
};

/// Longest prefix of `text` that fits in `max` bytes without splitting a char
pub(crate) fn clip_str(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
