//! Task model and validation
//!
//! Tasks are owned by the server; the client never invents ids or
//! timestamps, it only caches what `/tasks` returns.

mod model;

pub use model::{
    validate_description, StatusFilter, Task, TaskStats, TaskStatus, MAX_DESCRIPTION_LEN,
};
