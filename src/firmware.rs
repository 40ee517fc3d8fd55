//! Over-the-air firmware update service
//!
//! The update server itself is platform code. The controller gives it one
//! `handle` call per tick and logs the progress events it queues.

use crate::channel::{Queue, QueueReceiver, QueueSender};

/// Polled OTA update listener
pub trait FirmwareUpdate {
    /// Service pending update traffic. Must not block between chunks.
    fn handle(&mut self);
}

/// Why an update was aborted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateError {
    Auth,
    Begin,
    Connect,
    Receive,
    End,
}

impl UpdateError {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "Auth Failed",
            Self::Begin => "Begin Failed",
            Self::Connect => "Connect Failed",
            Self::Receive => "Receive Failed",
            Self::End => "End Failed",
        }
    }
}

/// Update lifecycle notifications
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateEvent {
    Start,
    Progress { done: u32, total: u32 },
    End,
    Error(UpdateError),
}

impl UpdateEvent {
    /// Completed share of a `Progress` event in percent
    #[allow(clippy::cast_possible_truncation)]
    pub const fn percent(self) -> Option<u32> {
        match self {
            Self::Progress { done, total } if total > 0 => {
                Some((done as u64 * 100 / total as u64) as u32)
            }
            _ => None,
        }
    }
}

pub type UpdateEventQueue<const SIZE: usize> = Queue<UpdateEvent, SIZE>;
pub type UpdateEventSender<'a, const SIZE: usize> = QueueSender<'a, UpdateEvent, SIZE>;
pub type UpdateEventReceiver<'a, const SIZE: usize> = QueueReceiver<'a, UpdateEvent, SIZE>;

/// Write one update event to the log
pub fn log_update_event(event: UpdateEvent) {
    match event {
        UpdateEvent::Start => log!("[OTA] Start"),
        UpdateEvent::Progress { .. } => {
            log!("[OTA] Progress: {}%", event.percent().unwrap_or(0));
        }
        UpdateEvent::End => log!("[OTA] End"),
        UpdateEvent::Error(err) => log!("[OTA] Error: {}", err.as_str()),
    }
}
