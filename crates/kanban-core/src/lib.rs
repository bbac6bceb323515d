//! # kanban-core
//!
//! Shared library for Kanban for Managers containing the task model, the rules
//! that decide which tasks are visible on the board, and the JSON protocol the
//! front-end uses to talk to the host shell.
//!
//! This crate has zero dependencies on OS APIs, UI frameworks, or the file
//! system.
//!
//! - **`domain`** – Tasks, statuses, and the board visibility rules.
//! - **`protocol`** – Requests sent by the front-end (`Action`) and replies
//!   sent back by the host (`Response`), plus their JSON codec.

pub mod domain;
pub mod protocol;

pub use domain::board::{active_tasks, ONE_DAY_IN_SECONDS};
pub use domain::task::{Task, TaskStatus};
pub use protocol::codec::{decode_action, encode_response, ProtocolError};
pub use protocol::messages::{Action, Response};
