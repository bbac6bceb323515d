//! In-memory board backed by a task repository.
//!
//! The board is read from storage once at startup and then served from
//! memory.  Every `StoreTasks` request replaces the whole board and writes it
//! through to storage.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use kanban_core::{active_tasks, Task};

/// Errors reported by a [`TaskRepository`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing task file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored content is not a JSON task list.
    #[error("task file {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The board could not be serialized.
    #[error("failed to encode tasks: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Where the board is persisted.
pub trait TaskRepository: Send {
    fn load(&self) -> Result<Vec<Task>, StorageError>;

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError>;
}

pub struct TaskCache<R> {
    repository: R,
    tasks: Vec<Task>,
}

impl<R: TaskRepository> TaskCache<R> {
    /// Creates an empty cache; call [`TaskCache::initialize`] to load the board.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            tasks: Vec::new(),
        }
    }

    /// Loads the board from the repository.
    ///
    /// A board that cannot be read or parsed is replaced by an empty one so
    /// the front-end can still start; the problem is logged.
    pub fn initialize(&mut self) {
        match self.repository.load() {
            Ok(tasks) => {
                info!(count = tasks.len(), "loaded task board");
                self.tasks = tasks;
            }
            Err(e) => {
                warn!("could not load task board, starting empty: {e}");
                self.tasks = Vec::new();
            }
        }
    }

    /// Tasks visible at `now` (epoch seconds).
    pub fn active(&self, now: u64) -> Vec<Task> {
        active_tasks(&self.tasks, now)
    }

    /// Replaces the board and writes it through to the repository.
    ///
    /// The in-memory board is replaced even when the write fails, so the
    /// running session keeps what the front-end sent.
    ///
    /// # Errors
    ///
    /// Returns the repository's [`StorageError`] if persisting fails.
    pub fn store(&mut self, tasks: Vec<Task>) -> Result<(), StorageError> {
        self.tasks = tasks;
        self.repository.save(&self.tasks)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
