use async_trait::async_trait;

use crate::day::DayRange;
use crate::error::Error;
use crate::task::{Task, TaskDraft, TaskId, TaskUpdate};

/// A remote source of tasks.
///
/// The production implementation is [`Client`](crate::client::Client), a REST client;
/// integration tests substitute an in-memory mock. Whatever the implementation, the
/// record a mutating call returns is authoritative: the provider overwrites its local
/// guess with it.
#[async_trait]
pub trait TaskSource {
    /// Whether this source holds a credential.
    /// When it does not, the board runs in demo mode and mutations are restricted to
    /// local-only reordering.
    fn is_authenticated(&self) -> bool;

    /// Every task owned by the authenticated user
    async fn owned_tasks(&self) -> Result<Vec<Task>, Error>;

    /// The publicly shared tasks within a day range. No credential required, read-only use
    async fn public_tasks(&self, range: &DayRange) -> Result<Vec<Task>, Error>;

    /// Persist a new task. The returned record carries the server-assigned id
    async fn create_task(&self, draft: &TaskDraft) -> Result<Task, Error>;

    /// Update a task (position and/or content)
    async fn update_task(&self, id: &TaskId, update: &TaskUpdate) -> Result<Task, Error>;

    /// Delete a task
    async fn delete_task(&self, id: &TaskId) -> Result<(), Error>;
}
