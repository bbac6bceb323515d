//! Bridge configuration types.
//!
//! [`BridgeConfig`] names every conduit the bridge touches: the DOM mount
//! point, the front-end program, its two ports, the inbound function exposed
//! to the host, and the host's invocation primitive.  The defaults match a
//! compiled `Elm.Main` program embedded in a `wry` webview.
//!
//! The struct is deserializable so the host can read it from the `[bridge]`
//! table of its TOML config file; missing keys fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::domain::error::BridgeError;

/// All names the bridge is wired with.
///
/// # Example
///
/// ```rust
/// use kanban_bridge::BridgeConfig;
///
/// let cfg = BridgeConfig::default();
/// assert_eq!(cfg.outbound_port, "sendRequest");
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// `id` of the element the front-end program mounts into.
    #[serde(default = "default_mount_id")]
    pub mount_id: String,

    /// Global path of the compiled program, e.g. `Elm.Main`.
    #[serde(default = "default_program")]
    pub program: String,

    /// Port the front-end emits requests on.
    #[serde(default = "default_outbound_port")]
    pub outbound_port: String,

    /// Port the front-end receives replies on.
    #[serde(default = "default_inbound_port")]
    pub inbound_port: String,

    /// Name under which the inbound relay is reachable by the host.
    #[serde(default = "default_inbound_function")]
    pub inbound_function: String,

    /// Global path of the host's message-delivery primitive inside the page.
    ///
    /// `wry` injects `window.ipc.postMessage`; older webview shells used
    /// `window.external.invoke`.
    #[serde(default = "default_host_invoke")]
    pub host_invoke: String,
}

fn default_mount_id() -> String {
    "app".to_string()
}
fn default_program() -> String {
    "Elm.Main".to_string()
}
fn default_outbound_port() -> String {
    "sendRequest".to_string()
}
fn default_inbound_port() -> String {
    "receiveResponse".to_string()
}
fn default_inbound_function() -> String {
    "sendResponse".to_string()
}
fn default_host_invoke() -> String {
    "window.ipc.postMessage".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            mount_id: default_mount_id(),
            program: default_program(),
            outbound_port: default_outbound_port(),
            inbound_port: default_inbound_port(),
            inbound_function: default_inbound_function(),
            host_invoke: default_host_invoke(),
        }
    }
}

impl BridgeConfig {
    /// Checks that every name can be spliced into the page safely.
    ///
    /// Ports and the inbound function must be plain JavaScript identifiers;
    /// the program and host primitive may be dotted paths; the mount id may
    /// only contain ASCII letters, digits, `-` and `_`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidName`] naming the first offending field.
    pub fn validate(&self) -> Result<(), BridgeError> {
        check(&self.mount_id, "mount id", is_mount_id)?;
        check(&self.program, "program path", is_js_path)?;
        check(&self.outbound_port, "outbound port", is_js_identifier)?;
        check(&self.inbound_port, "inbound port", is_js_identifier)?;
        check(&self.inbound_function, "inbound function", is_js_identifier)?;
        check(&self.host_invoke, "host primitive path", is_js_path)
    }
}

fn check(value: &str, field: &'static str, ok: fn(&str) -> bool) -> Result<(), BridgeError> {
    if ok(value) {
        Ok(())
    } else {
        Err(BridgeError::InvalidName {
            field,
            value: value.to_string(),
        })
    }
}

fn is_mount_id(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn is_js_path(s: &str) -> bool {
    s.split('.').all(is_js_identifier)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
