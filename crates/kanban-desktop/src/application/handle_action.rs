//! HandleActionUseCase: turns one front-end request into at most one reply.
//!
//! | Request       | Effect                                  | Reply             |
//! |---------------|-----------------------------------------|-------------------|
//! | `Init`        | none                                    | `Tasks` (visible) |
//! | `Log`         | text written to the `frontend` log      | none              |
//! | `StoreTasks`  | board replaced and persisted            | `Tasks` (visible) |
//! | undecodable   | warning logged                          | `Error`           |
//!
//! A failed write answers with `Error` instead of `Tasks`.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{info, warn};

use kanban_core::{decode_action, Action, Response};

use crate::application::task_cache::{TaskCache, TaskRepository};

/// Source of the current time in epoch seconds.
pub trait Clock: Send {
    fn now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // A clock set before 1970 shows every snoozed task as still snoozed
        // and keeps every finished task; both are harmless.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Anything that can answer a raw request text from the front-end.
///
/// The host endpoint owns one of these behind a mutex.
pub trait RequestHandler: Send {
    fn handle_text(&mut self, text: &str) -> Option<Response>;
}

pub struct ActionHandler<R, C = SystemClock> {
    cache: TaskCache<R>,
    clock: C,
}

impl<R: TaskRepository, C: Clock> ActionHandler<R, C> {
    pub fn new(cache: TaskCache<R>, clock: C) -> Self {
        Self { cache, clock }
    }

    /// Applies one decoded request.
    pub fn handle(&mut self, action: Action) -> Option<Response> {
        match action {
            Action::Init => Some(self.visible_tasks()),
            Action::Log { text } => {
                info!(target: "frontend", "{text}");
                None
            }
            Action::StoreTasks { tasks } => match self.cache.store(tasks) {
                Ok(()) => Some(self.visible_tasks()),
                Err(e) => {
                    warn!("failed to persist task board: {e}");
                    Some(Response::Error {
                        error: e.to_string(),
                    })
                }
            },
        }
    }

    pub fn cache(&self) -> &TaskCache<R> {
        &self.cache
    }

    fn visible_tasks(&self) -> Response {
        Response::Tasks {
            tasks: self.cache.active(self.clock.now()),
        }
    }
}

impl<R: TaskRepository, C: Clock> RequestHandler for ActionHandler<R, C> {
    fn handle_text(&mut self, text: &str) -> Option<Response> {
        match decode_action(text) {
            Ok(action) => self.handle(action),
            Err(e) => {
                warn!(request = text, "rejecting front-end request: {e}");
                Some(Response::Error {
                    error: e.to_string(),
                })
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
