//! kanban-bridge library crate.
//!
//! Relays messages between the compiled front-end program embedded in a page
//! and the native host shell around it.
//!
//! # Architecture
//!
//! ```text
//! Front-end program  (outbound port "sendRequest", inbound port "receiveResponse")
//!         ↕
//! [kanban-bridge]
//!   ├── domain/          BridgeConfig, message aliases, BridgeError
//!   ├── application/     Bridge: the two forwarding wires, plus the ports it
//!   │                    is wired to (FrontEnd, HostChannel, Document, ...)
//!   └── infrastructure/
//!         ├── script/          The same relay rendered as in-page JavaScript
//!         └── function_table/  Name → inbound relay registry for Rust hosts
//!         ↕
//! Host shell  (HostChannel::invoke / registered inbound function)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no framework types.
//! - `application` only talks to the outside world through the traits in
//!   [`application::ports`], so every wire can be tested with doubles.
//! - `infrastructure` provides concrete adapters for real hosts.

/// Domain layer: configuration, message aliases, and errors.
pub mod domain;

/// Application layer: the bridge itself and the ports it depends on.
pub mod application;

/// Infrastructure layer: in-page bootstrap script and the function table.
pub mod infrastructure;

pub use application::bridge::{Bridge, InboundRelay};
pub use application::ports::{
    Document, FrontEnd, HostChannel, InboundRegistry, OutboundHandler, Program,
};
pub use domain::{BridgeConfig, BridgeError, InboundMessage, OutboundMessage};
pub use infrastructure::{render_bootstrap, FunctionTable};
