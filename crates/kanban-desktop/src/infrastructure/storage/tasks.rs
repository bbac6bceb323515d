//! JSON task file.
//!
//! The whole board is one JSON array of tasks, rewritten on every save:
//!
//! ```json
//! [{"subject":"Review budget","status":"Todo","priority":1,"wait_until":null,"updated":1700000000}]
//! ```

use std::path::{Path, PathBuf};

use tracing::debug;

use kanban_core::Task;

use crate::application::task_cache::{StorageError, TaskRepository};

#[derive(Debug, Clone)]
pub struct JsonTaskStore {
    path: PathBuf,
}

impl JsonTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskRepository for JsonTaskStore {
    /// Reads the board.  A missing or empty file is an empty board.
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no task file yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| StorageError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the board, creating the parent directory if needed.
    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string(tasks).map_err(StorageError::Encode)?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = tasks.len(), "task board saved");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
