//! Board visibility rules.
//!
//! The stored task list keeps everything the front-end ever saved.  Before the
//! list is handed to the front-end, two rules are applied:
//!
//! 1. A `Done` task disappears once it has not been touched for a full day.
//! 2. A `Snooze` task whose `wait_until` has passed wakes up: it is shown as
//!    `InProgress` with `wait_until` cleared.
//!
//! The rules produce a view; the stored list is not changed.  A woken task is
//! only persisted as `InProgress` when the front-end next stores the board.

use crate::domain::task::{Task, TaskStatus};

/// Age after which a finished task is hidden from the board.
pub const ONE_DAY_IN_SECONDS: u64 = 86_400;

/// Returns the tasks that should be shown on the board at `now` (epoch seconds).
///
/// Order is preserved.
pub fn active_tasks(tasks: &[Task], now: u64) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| !is_expired(task, now))
        .cloned()
        .map(|task| wake(task, now))
        .collect()
}

fn is_expired(task: &Task, now: u64) -> bool {
    task.status == TaskStatus::Done && now.saturating_sub(task.updated) > ONE_DAY_IN_SECONDS
}

fn wake(mut task: Task, now: u64) -> Task {
    if task.status == TaskStatus::Snooze {
        if let Some(until) = task.wait_until {
            if now > until {
                task.status = TaskStatus::InProgress;
                task.wait_until = None;
            }
        }
    }
    task
}

// ── Tests ─────────────────────────────────────────────────────────────────────
