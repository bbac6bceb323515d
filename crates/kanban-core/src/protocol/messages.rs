//! JSON message types exchanged between the front-end and the host shell.
//!
//! # Message flow
//!
//! ```text
//! Front-end → Host:  JSON text  →  Action    (discriminant field "cmd")
//! Host → Front-end:  Response   →  JSON text (discriminant field "data")
//! ```
//!
//! Every message is a JSON object; the discriminant names the variant and all
//! other fields are flattened into the same object:
//!
//! ```json
//! {"cmd":"Log","text":"board opened"}
//! {"data":"Tasks","tasks":[]}
//! ```
//!
//! Requests and replies are distinct enums so the host can never send a
//! request-only message back to the front-end.

use serde::{Deserialize, Serialize};

use crate::domain::task::Task;

/// Requests the front-end sends to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cmd")]
pub enum Action {
    /// Front-end finished loading and wants the current board.
    Init,

    /// Diagnostic line the front-end wants written to the host log.
    Log { text: String },

    /// Replace the stored board with `tasks`.
    ///
    /// The host replies with the board as it should now be displayed.
    StoreTasks { tasks: Vec<Task> },
}

/// Replies the host sends back to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "data")]
pub enum Response {
    /// The visible board.
    Tasks { tasks: Vec<Task> },

    /// The request could not be handled.
    Error { error: String },
}

// ── Tests ─────────────────────────────────────────────────────────────────────
