//! Capabilities the bridge is wired to.
//!
//! Each trait stands for something the bridge does not own:
//!
//! | Trait             | Stands for                                             |
//! |-------------------|--------------------------------------------------------|
//! | [`Document`]      | The page that holds the mount point                    |
//! | [`Program`]       | The compiled front-end, before it is started           |
//! | [`FrontEnd`]      | The running front-end instance and its named ports     |
//! | [`HostChannel`]   | The host's message-delivery primitive                  |
//! | [`InboundRegistry`] | Wherever the host looks up the inbound function      |
//!
//! All of them are `Send + Sync` where they are shared, so a multi-threaded
//! host may call the relays from any thread.

use std::sync::Arc;

use crate::application::bridge::InboundRelay;
use crate::domain::{BridgeError, InboundMessage, OutboundMessage};

/// Callback registered on an outbound port.
///
/// The returned error goes back to whoever emitted the message.
pub type OutboundHandler =
    Arc<dyn Fn(&OutboundMessage) -> Result<(), BridgeError> + Send + Sync>;

/// A running front-end instance with named ports.
pub trait FrontEnd: Send + Sync {
    /// Registers `handler` for every message emitted on `port`.
    fn subscribe(&self, port: &str, handler: OutboundHandler);

    /// Pushes `message` into the inbound `port`.
    fn send(&self, port: &str, message: InboundMessage);
}

/// The host's message-delivery primitive.
///
/// Fire-and-forget: the bridge does not look at any outcome.
#[cfg_attr(test, mockall::automock)]
pub trait HostChannel: Send + Sync {
    fn invoke(&self, payload: &str);
}

/// The page the front-end is mounted into.
pub trait Document {
    type Node;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
}

/// A compiled front-end program that can be started on a mount node.
pub trait Program<N> {
    type App: FrontEnd + 'static;

    fn init(&self, node: N) -> Self::App;
}

/// Host-side lookup table for functions the page exposes.
pub trait InboundRegistry {
    fn register(&self, name: &str, relay: InboundRelay);
}
