//! Infrastructure layer for the desktop shell.
//!
//! Contains OS-facing adapters: the config and task files, and the host side
//! of the front-end bridge (console and webview).
//!
//! **Dependency rule**: this layer may depend on `application`, `kanban_core`
//! and `kanban_bridge`, but MUST NOT be imported by the `application` layer.

pub mod storage;
pub mod ui_bridge;
