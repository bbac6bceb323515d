//! Host side of the front-end bridge.
//!
//! The front-end hands request text to the host primitive; on our side that
//! text lands in [`HostEndpoint::invoke`].  The endpoint runs the request
//! through the [`RequestHandler`], encodes the reply, and gives the text to a
//! [`ResponseSink`], which pushes it back through the page's inbound function.
//!
//! ```text
//! front-end ──► HostChannel::invoke(text) ──► RequestHandler ──► Response
//!                                                                   │
//! front-end ◄── inbound function(text) ◄── ResponseSink ◄── encode ◄┘
//! ```
//!
//! Two hosts are provided:
//!
//! - [`console`]: the terminal plays the front-end (default build).
//! - `webview`: a native window with the real page (feature `webview`).

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{error, warn};

use kanban_bridge::{FunctionTable, HostChannel};
use kanban_core::encode_response;

use crate::application::RequestHandler;

pub mod console;
pub mod page;
#[cfg(feature = "webview")]
pub mod webview;

/// Delivers one encoded reply to the front-end.
pub trait ResponseSink: Send + Sync {
    fn deliver(&self, text: String);
}

/// The host end of the bridge.
pub struct HostEndpoint {
    handler: Mutex<Box<dyn RequestHandler>>,
    sink: Box<dyn ResponseSink>,
}

impl HostEndpoint {
    pub fn new(handler: Box<dyn RequestHandler>, sink: Box<dyn ResponseSink>) -> Self {
        Self {
            handler: Mutex::new(handler),
            sink,
        }
    }
}

impl HostChannel for HostEndpoint {
    fn invoke(&self, payload: &str) {
        // Handler lock is released before delivery; the sink may re-enter the
        // front-end, which may emit again.
        let reply = self
            .handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handle_text(payload);

        let Some(reply) = reply else {
            return;
        };
        match encode_response(&reply) {
            Ok(text) => self.sink.deliver(text),
            Err(e) => error!("dropping reply for the front-end: {e}"),
        }
    }
}

/// Sink for hosts that run the front-end in-process: calls the inbound
/// function the bridge registered in a [`FunctionTable`].
pub struct RegisteredFunctionSink {
    table: Arc<FunctionTable>,
    function: String,
}

impl RegisteredFunctionSink {
    pub fn new(table: Arc<FunctionTable>, function: impl Into<String>) -> Self {
        Self {
            table,
            function: function.into(),
        }
    }
}

impl ResponseSink for RegisteredFunctionSink {
    fn deliver(&self, text: String) {
        if let Err(e) = self.table.call(&self.function, text) {
            warn!("reply not delivered: {e}");
        }
    }
}

/// Script that calls the page's inbound function with the encoded reply.
///
/// `json` is spliced in as a JavaScript literal, so the front-end receives
/// the reply as an object rather than as text.
pub fn inbound_call_script(function: &str, json: &str) -> String {
    format!("{function}({json});")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
