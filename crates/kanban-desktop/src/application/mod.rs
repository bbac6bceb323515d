//! Application layer for the desktop shell.
//!
//! - [`task_cache`]: the in-memory board and the storage port behind it.
//! - [`handle_action`]: turns front-end requests into replies.
//!
//! Nothing here touches the file system, the webview, or the terminal; those
//! live in `infrastructure` and are injected.

pub mod handle_action;
pub mod task_cache;

pub use handle_action::{ActionHandler, Clock, RequestHandler, SystemClock};
pub use task_cache::{StorageError, TaskCache, TaskRepository};
