//! Client-side task and session state
//!
//! `ClientTaskStore` is the single owner of everything the presentation
//! layer renders: the session, the cached task list, the active filter,
//! and the task currently open for editing. Every operation takes
//! `&mut self`, so two network calls can never overlap on one store
//! instance. The server is the source of truth: mutations never touch the
//! cache directly, they resynchronize through `load_tasks`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::TaskApi;
use crate::session::{AuthMode, Credentials, Session};
use crate::task::{validate_description, StatusFilter, Task, TaskStats, TaskStatus};
use crate::{Error, Result};

pub struct ClientTaskStore {
    api: Arc<dyn TaskApi>,
    session: Option<Session>,
    tasks: Vec<Task>,
    filter: StatusFilter,
    editing: Option<i64>,
}

impl ClientTaskStore {
    /// Create an unauthenticated store backed by the given API
    pub fn new(api: Arc<dyn TaskApi>) -> Self {
        Self {
            api,
            session: None,
            tasks: Vec::new(),
            filter: StatusFilter::default(),
            editing: None,
        }
    }

    /// Ask the server whether an earlier session is still valid.
    ///
    /// On success the session is restored and the task cache reloaded.
    /// Every failure collapses into the unauthenticated state; this never
    /// returns an error.
    pub async fn check_session(&mut self) -> Option<Session> {
        match self.api.me().await {
            Ok(session) => {
                debug!("session restored for {}", session.username);
                self.session = Some(session);
                if let Err(err) = self.load_tasks().await {
                    warn!("task reload after session check failed: {}", err);
                }
                self.session.clone()
            }
            Err(err) => {
                debug!("no active session: {}", err);
                self.reset();
                None
            }
        }
    }

    /// Sign in or create an account.
    ///
    /// Register success does not establish a session; the caller is
    /// expected to switch to login mode and authenticate again. On
    /// failure the session state is left unchanged.
    pub async fn authenticate(
        &mut self,
        username: &str,
        password: &str,
        mode: AuthMode,
    ) -> Result<String> {
        let credentials = Credentials::new(username, password)?;

        match mode {
            AuthMode::Login => {
                let message = self.api.login(&credentials).await?;
                self.session = Some(Session {
                    username: credentials.username,
                });
                if let Err(err) = self.load_tasks().await {
                    warn!("initial task load failed: {}", err);
                }
                Ok(message.unwrap_or_else(|| "Welcome back!".to_string()))
            }
            AuthMode::Register => {
                let message = self.api.register(&credentials).await?;
                Ok(message.unwrap_or_else(|| {
                    "Account created! Please sign in with your credentials.".to_string()
                }))
            }
        }
    }

    /// End the session.
    ///
    /// The remote call is best-effort; local state is cleared no matter
    /// what the server says.
    pub async fn logout(&mut self) {
        match self.api.logout().await {
            Ok(message) => debug!("logged out: {:?}", message),
            Err(err) => warn!("logout request failed: {}", err),
        }
        self.reset();
    }

    /// Replace the cache with the server's current list.
    ///
    /// The cache is only ever swapped wholesale; a failed fetch leaves the
    /// previous contents in place, except that an unauthenticated reply
    /// discards everything. Returns the number of tasks cached.
    pub async fn load_tasks(&mut self) -> Result<usize> {
        match self.api.list_tasks().await {
            Ok(tasks) => {
                debug!("loaded {} tasks", tasks.len());
                self.tasks = tasks;
                Ok(self.tasks.len())
            }
            Err(err) => {
                self.clear_if_unauthenticated(&err);
                Err(err)
            }
        }
    }

    /// Create a task with status `todo` and resynchronize.
    ///
    /// The server assigns the id, so there is no optimistic insert.
    pub async fn add_task(&mut self, description: &str) -> Result<()> {
        let description = validate_description(description)?;

        if let Err(err) = self.api.create_task(&description).await {
            self.clear_if_unauthenticated(&err);
            return Err(err);
        }
        self.load_tasks().await?;
        Ok(())
    }

    /// Rewrite the description and status of the task open for editing.
    pub async fn update_task(
        &mut self,
        id: i64,
        description: &str,
        status: TaskStatus,
    ) -> Result<()> {
        let description = validate_description(description)?;
        if self.editing != Some(id) {
            return Err(Error::validation("No task is open for editing"));
        }

        if let Err(err) = self.api.update_task(id, &description, status).await {
            self.clear_if_unauthenticated(&err);
            return Err(err);
        }
        self.editing = None;
        self.load_tasks().await?;
        Ok(())
    }

    /// Delete a task and resynchronize. Confirmation is the caller's
    /// concern; by the time this runs the decision is final.
    pub async fn delete_task(&mut self, id: i64) -> Result<()> {
        if let Err(err) = self.api.delete_task(id).await {
            self.clear_if_unauthenticated(&err);
            return Err(err);
        }
        self.editing = None;
        self.load_tasks().await?;
        Ok(())
    }

    /// Change the view filter. No network involved.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// The cache as seen through the current filter, server order preserved
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Mark a cached task as open for editing.
    ///
    /// An id absent from the cache leaves the edit state untouched.
    pub fn open_for_edit(&mut self, id: i64) -> Option<&Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        self.editing = Some(id);
        Some(&self.tasks[index])
    }

    /// Drop the edit reference
    pub fn close_edit(&mut self) {
        self.editing = None;
    }

    /// Status counts over the full cache, ignoring the filter
    pub fn stats(&self) -> TaskStats {
        TaskStats::tally(&self.tasks)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    /// An unauthenticated reply invalidates everything the client holds.
    fn clear_if_unauthenticated(&mut self, err: &Error) {
        if err.is_unauthenticated() {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.session = None;
        self.tasks.clear();
        self.editing = None;
    }
}
