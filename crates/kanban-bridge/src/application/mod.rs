//! Application layer for kanban-bridge.
//!
//! [`bridge::Bridge`] holds the front-end instance and implements the two
//! forwarding wires.  It depends only on the traits in [`ports`]; concrete
//! front-ends and hosts are injected at construction.

pub mod bridge;
pub mod ports;

pub use bridge::{Bridge, InboundRelay};
pub use ports::{Document, FrontEnd, HostChannel, InboundRegistry, OutboundHandler, Program};
