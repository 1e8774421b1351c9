//! Remote API surface
//!
//! The store reaches the network only through the `TaskApi` trait, so
//! tests can substitute an in-memory double. The HTTP implementation
//! lives in `http`.

mod http;

use async_trait::async_trait;

use crate::session::{Credentials, Session};
use crate::task::{Task, TaskStatus};
use crate::Result;

pub use http::{HttpConfig, HttpTaskApi};

/// Client-side view of the server endpoints
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// GET `/me`; any non-success reply means unauthenticated
    async fn me(&self) -> Result<Session>;

    /// POST `/register`; returns the server's message, if any
    async fn register(&self, credentials: &Credentials) -> Result<Option<String>>;

    /// POST `/login`; returns the server's message, if any
    async fn login(&self, credentials: &Credentials) -> Result<Option<String>>;

    /// POST `/logout`; returns the server's message, if any
    async fn logout(&self) -> Result<Option<String>>;

    /// GET `/tasks`, the full list for the current session
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// POST `/tasks` with status `todo`
    async fn create_task(&self, description: &str) -> Result<()>;

    /// PUT `/tasks/{id}`
    async fn update_task(&self, id: i64, description: &str, status: TaskStatus) -> Result<()>;

    /// DELETE `/tasks/{id}`; success is exclusively `204 No Content`
    async fn delete_task(&self, id: i64) -> Result<()>;
}
