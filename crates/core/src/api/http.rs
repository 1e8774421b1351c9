//! HTTP implementation of the task API
//!
//! The server drives authentication entirely through the `sessionID`
//! cookie, so the client is built with a cookie store and never inspects
//! the cookie itself.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TaskApi;
use crate::session::{Credentials, Session};
use crate::task::{Task, TaskStatus};
use crate::{Error, Result};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Server origin, without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:18080".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateTaskRequest<'a> {
    description: &'a str,
    status: TaskStatus,
}

#[derive(Debug, Serialize)]
struct UpdateTaskRequest<'a> {
    description: &'a str,
    status: TaskStatus,
}

#[derive(Debug, Deserialize)]
struct TasksResponse {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Debug, Default, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

/// `TaskApi` over HTTP with a cookie-based session
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    /// Create a new client for the given server
    pub fn new(config: HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Pull the optional `message` field out of a response body.
///
/// Bodies that are empty or not JSON yield no message.
async fn read_message(response: Response) -> Option<String> {
    let text = response.text().await.ok()?;
    serde_json::from_str::<MessageBody>(&text)
        .ok()
        .and_then(|body| body.message)
}

/// Map a non-success response to the unified error contract.
async fn status_error(response: Response) -> Error {
    let status = response.status();
    let message = read_message(response).await;

    if status == StatusCode::UNAUTHORIZED {
        Error::unauthenticated(message.unwrap_or_else(|| "Authentication required".to_string()))
    } else {
        Error::remote(
            status.as_u16(),
            message.unwrap_or_else(|| format!("Request failed with status {}", status)),
        )
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn me(&self) -> Result<Session> {
        let response = self.client.get(self.url("/me")).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(response.json::<Session>().await?)
    }

    async fn register(&self, credentials: &Credentials) -> Result<Option<String>> {
        let response = self
            .client
            .post(self.url("/register"))
            .json(credentials)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        debug!("registered user {}", credentials.username);
        Ok(read_message(response).await)
    }

    async fn login(&self, credentials: &Credentials) -> Result<Option<String>> {
        let response = self
            .client
            .post(self.url("/login"))
            .json(credentials)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        debug!("logged in as {}", credentials.username);
        Ok(read_message(response).await)
    }

    async fn logout(&self) -> Result<Option<String>> {
        let response = self.client.post(self.url("/logout")).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(read_message(response).await)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let response = self.client.get(self.url("/tasks")).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        let body = response.json::<TasksResponse>().await?;
        debug!("fetched {} tasks", body.tasks.len());
        Ok(body.tasks)
    }

    async fn create_task(&self, description: &str) -> Result<()> {
        let request = CreateTaskRequest {
            description,
            status: TaskStatus::Todo,
        };
        let response = self
            .client
            .post(self.url("/tasks"))
            .json(&request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }

    async fn update_task(&self, id: i64, description: &str, status: TaskStatus) -> Result<()> {
        let request = UpdateTaskRequest {
            description,
            status,
        };
        let response = self
            .client
            .put(self.url(&format!("/tasks/{}", id)))
            .json(&request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        Ok(())
    }

    async fn delete_task(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/tasks/{}", id)))
            .send()
            .await?;
        // Success is exclusively 204; anything else carries an error body.
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }
        Err(status_error(response).await)
    }
}
