//! Station Wi-Fi link layer
//!
//! Association and scanning are owned by the platform; the controller
//! only polls it, asks whether it is associated, and logs the lifecycle
//! events it queues.

use core::net::Ipv4Addr;

use heapless::String;

use crate::channel::{Queue, QueueReceiver, QueueSender};

/// Longest SSID allowed by 802.11
pub const SSID_CAPACITY: usize = 32;

/// Hostname capacity
pub const HOSTNAME_CAPACITY: usize = 32;

pub type Ssid = String<SSID_CAPACITY>;

/// Polled Wi-Fi station
///
/// Once associated, the station also announces its hostname over mDNS and
/// reports the outcome as [`LinkEvent::MdnsAnnounced`] or
/// [`LinkEvent::MdnsFailed`].
pub trait LinkLayer {
    /// Run association and scan housekeeping. Must not block.
    fn poll(&mut self);

    /// Whether the station is associated and has an address
    fn is_associated(&self) -> bool;
}

/// Addressing details reported once the station is up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    pub ssid: Ssid,
    pub ip: Ipv4Addr,
    pub gateway: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub dns: Ipv4Addr,
    pub mac: [u8; 6],
    pub hostname: String<HOSTNAME_CAPACITY>,
}

/// Link lifecycle notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEvent {
    Scanning,
    ScanFailed,
    NoNetworks,
    NoKnownNetworks,
    FoundNetwork(Ssid),
    Connecting(Ssid),
    /// Still waiting for association; too frequent to log
    ConnectWaiting,
    ConnectFailed(Ssid),
    Connected(LinkInfo),
    /// Hostname and `_http._tcp` service announced over mDNS after connecting
    MdnsAnnounced,
    MdnsFailed,
    Disconnected,
}

pub type LinkEventQueue<const SIZE: usize> = Queue<LinkEvent, SIZE>;
pub type LinkEventSender<'a, const SIZE: usize> = QueueSender<'a, LinkEvent, SIZE>;
pub type LinkEventReceiver<'a, const SIZE: usize> = QueueReceiver<'a, LinkEvent, SIZE>;

struct Mac<'a>(&'a [u8; 6]);

impl core::fmt::Display for Mac<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// Write one link event to the log
pub fn log_link_event(event: &LinkEvent) {
    match event {
        LinkEvent::Scanning => log!("[WIFI] Scanning"),
        LinkEvent::ScanFailed => log!("[WIFI] Scan failed"),
        LinkEvent::NoNetworks => log!("[WIFI] No networks found"),
        LinkEvent::NoKnownNetworks => log!("[WIFI] No known networks found"),
        LinkEvent::FoundNetwork(ssid) => log!("[WIFI] {}", ssid),
        LinkEvent::Connecting(ssid) => log!("[WIFI] Connecting to {}", ssid),
        LinkEvent::ConnectWaiting => {}
        LinkEvent::ConnectFailed(ssid) => log!("[WIFI] Could not connect to {}", ssid),
        LinkEvent::Connected(info) => {
            log!("[WIFI] MODE STA -------------------------------------");
            log!("[WIFI] SSID {}", info.ssid);
            log!("[WIFI] IP   {}", info.ip);
            log!("[WIFI] MAC  {}", Mac(&info.mac));
            log!("[WIFI] GW   {}", info.gateway);
            log!("[WIFI] MASK {}", info.netmask);
            log!("[WIFI] DNS  {}", info.dns);
            log!("[WIFI] HOST {}", info.hostname);
            log!("[WIFI] ----------------------------------------------");
        }
        LinkEvent::MdnsAnnounced => log!("[MDNS] OK"),
        LinkEvent::MdnsFailed => log!("[MDNS] FAIL"),
        LinkEvent::Disconnected => log!("[WIFI] Disconnected"),
    }
}
