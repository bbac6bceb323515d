//! Domain entities for Kanban for Managers.
//!
//! Pure business logic with no infrastructure dependencies.  Time is always
//! passed in as epoch seconds so every rule can be tested with a fixed clock.

/// Task entity and its status.
pub mod task;

/// Board visibility rules applied before tasks are shown to the front-end.
pub mod board;
