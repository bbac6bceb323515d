//! Domain layer for kanban-bridge.
//!
//! Pure types with no dependencies on I/O, the webview, or the front-end
//! runtime.
//!
//! - Message aliases (what crosses the boundary in each direction)
//! - Configuration (channel and function names)
//! - Error types

pub mod config;
pub mod error;
pub mod messages;

pub use config::BridgeConfig;
pub use error::BridgeError;
pub use messages::{InboundMessage, OutboundMessage};
