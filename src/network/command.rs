//! Remote mode commands
//!
//! The command payload is an ASCII digit; only the first byte counts.

use super::InboundMessage;
use crate::state::{ControllerState, Mode};

/// Mode selected by a command payload, if it names one
pub fn parse_mode_command(payload: &[u8]) -> Option<Mode> {
    let digit = payload.first()?.checked_sub(b'0')?;
    Mode::from_raw(digit)
}

/// Apply an inbound message to the controller state
///
/// A valid command overwrites the mode directly, even when it is already
/// active. Anything else is ignored.
pub fn handle_message(message: &InboundMessage, state: &mut ControllerState) {
    let text = core::str::from_utf8(message.payload()).unwrap_or("<binary>");
    log!("[MQTT] Message arrived [{}] {}", message.topic(), text);

    match parse_mode_command(message.payload()) {
        Some(mode) => state.apply_mode_command(mode),
        None => log!("[MQTT] Ignoring payload, not a mode"),
    }
}
