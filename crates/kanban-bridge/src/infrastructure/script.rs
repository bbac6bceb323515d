//! The relay rendered as in-page JavaScript.
//!
//! Inside a webview the front-end program runs in the page, so the bridge has
//! to run there too.  [`render_bootstrap`] emits a classic (non-module) script
//! that performs the same three steps as [`crate::Bridge`]:
//!
//! ```js
//! 'use strict';
//! var app = Elm.Main.init({ node: document.getElementById("app") });
//! app.ports.sendRequest.subscribe(function (data) {
//!     window.ipc.postMessage(JSON.stringify(data));
//! });
//! function sendResponse(text) {
//!     app.ports.receiveResponse.send(text);
//! }
//! ```
//!
//! `sendResponse` is a top-level function declaration, which makes it a
//! global the host can call with `evaluate_script`.  A missing mount element
//! throws inside the program's `init`, the in-page equivalent of
//! [`crate::BridgeError::MountPointMissing`].

use crate::domain::{BridgeConfig, BridgeError};

/// Renders the bootstrap script for `config`.
///
/// # Errors
///
/// Returns [`BridgeError::InvalidName`] if `config` fails validation; names
/// are spliced into the script, so only validated names are accepted.
pub fn render_bootstrap(config: &BridgeConfig) -> Result<String, BridgeError> {
    config.validate()?;
    let mount_id = serde_json::to_string(&config.mount_id).map_err(BridgeError::Serialize)?;

    Ok(format!(
        r#"'use strict';
var app = {program}.init({{
    node: document.getElementById({mount_id})
}});

app.ports.{outbound}.subscribe(function (data) {{
    {host}(JSON.stringify(data));
}});

function {function}(text) {{
    app.ports.{inbound}.send(text);
}}
"#,
        program = config.program,
        mount_id = mount_id,
        outbound = config.outbound_port,
        host = config.host_invoke,
        function = config.inbound_function,
        inbound = config.inbound_port,
    ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
