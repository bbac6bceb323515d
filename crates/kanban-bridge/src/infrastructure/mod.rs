//! Infrastructure layer for kanban-bridge.
//!
//! Concrete adapters for real hosts:
//!
//! - [`script`] renders the relay as in-page JavaScript for webview hosts,
//!   where the front-end runs inside the page.
//! - [`function_table`] is an [`crate::InboundRegistry`] for hosts that run
//!   the front-end in-process and look inbound functions up by name.

pub mod function_table;
pub mod script;

pub use function_table::FunctionTable;
pub use script::render_bootstrap;
