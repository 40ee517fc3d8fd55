use core::fmt::Write;

use embassy_time::Instant;
use heapless::String;
use rand_core::RngCore;

use super::clip_str;
use super::command::handle_message;
use super::{MessageReceiver, Transport};
use crate::config::ConnectivityConfig;
use crate::state::ControllerState;

/// Room for the configured prefix plus the hex suffix
pub const CLIENT_ID_CAPACITY: usize = 32;

/// Digits of the largest suffix, `0xfffe`
const CLIENT_ID_SUFFIX_LEN: usize = 4;

/// Transport session phase
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionPhase {
    #[default]
    Disconnected,
    /// A connect attempt is in flight
    Connecting,
    Connected,
}

/// Keeps the transport session alive
///
/// Reconnects on a fixed interval while the link is up, resubscribes after
/// every successful connect and routes inbound messages to the command
/// handler. Failures are logged and retried; nothing here is fatal.
pub struct ConnectivitySupervisor<'a, const QUEUE_SIZE: usize> {
    config: ConnectivityConfig,
    phase: ConnectionPhase,
    last_attempt: Option<Instant>,
    inbox: MessageReceiver<'a, QUEUE_SIZE>,
}

impl<'a, const QUEUE_SIZE: usize> ConnectivitySupervisor<'a, QUEUE_SIZE> {
    pub const fn new(inbox: MessageReceiver<'a, QUEUE_SIZE>, config: ConnectivityConfig) -> Self {
        Self {
            config,
            phase: ConnectionPhase::Disconnected,
            last_attempt: None,
            inbox,
        }
    }

    pub const fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    pub const fn last_attempt(&self) -> Option<Instant> {
        self.last_attempt
    }

    /// Run one supervision step
    ///
    /// `link_associated` is the link layer's view for this tick. Inbound
    /// commands are applied to `state` before this returns.
    pub fn poll<T: Transport, R: RngCore>(
        &mut self,
        now: Instant,
        link_associated: bool,
        transport: &mut T,
        rng: &mut R,
        state: &mut ControllerState,
    ) {
        if self.phase == ConnectionPhase::Connected && !transport.is_connected() {
            log!("[MQTT] Connection lost");
            self.phase = ConnectionPhase::Disconnected;
        }

        if self.phase != ConnectionPhase::Connected {
            if !link_associated || !self.attempt_due(now) {
                return;
            }
            self.attempt(now, transport, rng);
        }

        if self.phase == ConnectionPhase::Connected {
            transport.pump();
            for message in self.inbox.drain() {
                handle_message(&message, state);
            }
        }
    }

    fn attempt_due(&self, now: Instant) -> bool {
        match self.last_attempt {
            Some(last) => now.saturating_duration_since(last) > self.config.retry_interval,
            None => true,
        }
    }

    fn attempt<T: Transport, R: RngCore>(&mut self, now: Instant, transport: &mut T, rng: &mut R) {
        self.last_attempt = Some(now);
        self.phase = ConnectionPhase::Connecting;

        let client_id = self.client_id(rng);
        log!("[MQTT] Attempting MQTT connection as {}...", client_id);

        if let Err(err) = transport.connect(&client_id) {
            log!(
                "[MQTT] Failed, rc={:?} try again in {}ms",
                err,
                self.config.retry_interval.as_millis()
            );
            self.phase = ConnectionPhase::Disconnected;
            return;
        }

        log!("[MQTT] Connected");
        self.phase = ConnectionPhase::Connected;

        if let Err(err) = transport.publish(self.config.status_topic, self.config.status_payload) {
            log!("[MQTT] Status publish failed: {:?}", err);
        }
        // Subscriptions do not survive a reconnect
        if let Err(err) = transport.subscribe(self.config.mode_topic) {
            log!("[MQTT] Subscribe to {} failed: {:?}", self.config.mode_topic, err);
        }
    }

    /// Prefix followed by a random 16-bit hex suffix
    ///
    /// A prefix too long for the buffer is cut so the suffix always fits.
    fn client_id<R: RngCore>(&self, rng: &mut R) -> String<CLIENT_ID_CAPACITY> {
        let prefix = clip_str(
            self.config.client_id_prefix,
            CLIENT_ID_CAPACITY - CLIENT_ID_SUFFIX_LEN,
        );
        let mut id = String::new();
        // Both parts fit by construction
        let _ = write!(id, "{}{:x}", prefix, rng.next_u32() % 0xFFFF);
        id
    }
}
