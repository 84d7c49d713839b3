//! This module bridges the local task board and a remote source
//!
//! The provider applies every permitted user action to the local board immediately, so
//! the UI stays responsive, then sends the matching request when the session is
//! authenticated and lets the server's response overwrite the local guess. A failed
//! request does not roll the board back: the board keeps showing the user's intent and
//! the failure is recorded for the UI to surface.
//!
//! Unauthenticated sessions run in demo mode: tasks can still be dragged around (the
//! moves stay local), but creating, deleting and editing require a credential.

use crate::day::{DayKey, DayRange};
use crate::error::Error;
use crate::ordering;
use crate::store::TaskStore;
use crate::task::{self, Task, TaskDraft, TaskId, TaskPatch, TaskStatus, TaskUpdate};
use crate::traits::TaskSource;

pub mod feedback;
use feedback::{FeedbackSender, SyncEvent};

/// A task board backed by a remote source.
///
/// `remote` is usually a [`Client`](crate::client::Client); integration tests
/// substitute an in-memory mock. The provider owns the local board exclusively:
/// consumers read it through [`Provider::local`] and mutate it only through the
/// operations below.
pub struct Provider<R: TaskSource> {
    /// The remote source (usually a server)
    remote: R,
    /// The local board
    local: TaskStore,

    /// The message of the last failure, kept for the UI to display
    last_error: Option<String>,
    feedback_channel: Option<FeedbackSender>,
}

impl<R: TaskSource> Provider<R> {
    /// Create a provider over `remote`, starting from the given (usually empty) board
    pub fn new(remote: R, local: TaskStore) -> Self {
        Self {
            remote,
            local,
            last_error: None,
            feedback_channel: None,
        }
    }

    /// Create a provider that also reports request progress on a feedback channel
    pub fn new_with_feedback_channel(remote: R, local: TaskStore, channel: FeedbackSender) -> Self {
        Self {
            remote,
            local,
            last_error: None,
            feedback_channel: Some(channel),
        }
    }

    /// The local board
    pub fn local(&self) -> &TaskStore {
        &self.local
    }

    /// The remote source
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// The remote source, mutably, e.g. to install a credential after a login.
    /// Remember to [`refresh`](Self::refresh) afterwards so the board matches the new session.
    pub fn remote_mut(&mut self) -> &mut R {
        &mut self.remote
    }

    /// Whether mutations currently reach the server. When false, the board runs in demo mode
    pub fn is_authenticated(&self) -> bool {
        self.remote.is_authenticated()
    }

    /// The failure message of the last operation that did not succeed, for an error banner.
    /// Cleared whenever a new operation starts
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetch every task this session can see and replace the whole board with the result.
    ///
    /// Authenticated sessions fetch their own tasks; demo sessions fetch the publicly
    /// shared tasks within `public_range` (the days the calendar screen shows). The
    /// result of a refresh fully replaces whatever an earlier one loaded, it never merges.
    pub async fn refresh(&mut self, public_range: &DayRange) -> Result<(), Error> {
        self.last_error = None;
        self.feedback(SyncEvent::InFlight { operation: String::from("refresh") });

        let fetched = if self.remote.is_authenticated() {
            log::debug!("Refreshing the board with the session's own tasks");
            self.remote.owned_tasks().await
        } else {
            log::debug!("Refreshing the board with the public tasks of {} to {}",
                public_range.start(), public_range.end());
            self.remote.public_tasks(public_range).await
        };

        let tasks = self.settle("refresh", fetched)?;
        log::info!("Refreshed the board: {} tasks", tasks.len());
        self.local = TaskStore::from_tasks(tasks);
        Ok(())
    }

    /// Create a task at the newest-first boundary of `date` and persist it.
    ///
    /// A provisional record (client-generated id) shows up on the board immediately;
    /// the server's record replaces it once the request resolves, and stays in place
    /// if the request fails. Returns the id the task is stored under when the call returns.
    ///
    /// Demo sessions cannot create tasks: the call returns [`Error::AuthRequired`]
    /// and the board is left untouched.
    pub async fn create_task(&mut self, text: &str, date: &DayKey) -> Result<TaskId, Error> {
        self.last_error = None;
        let text = task::validated_text(text)?;
        if self.remote.is_authenticated() == false {
            return self.deny("create a task");
        }

        let order = ordering::boundary_order(&self.local.day(date));
        let provisional = Task::new_with_parameters(
            TaskId::random(), text.clone(), date.clone(), order, None, TaskStatus::default());
        let provisional_id = provisional.id().clone();
        let draft = TaskDraft {
            text,
            date: date.clone(),
            order,
            status: provisional.status(),
        };
        self.local.add(provisional);

        self.feedback(SyncEvent::InFlight { operation: String::from("create") });
        let created = self.remote.create_task(&draft).await;
        match self.settle("create", created) {
            // The provisional record stays: the board keeps showing the user's intent
            Err(err) => Err(err),
            Ok(confirmed) => {
                self.local.remove(&provisional_id, date);
                let id = confirmed.id().clone();
                self.local.add(confirmed);
                Ok(id)
            },
        }
    }

    /// Move a task to `new_order` on day `to` (which may equal `from`), optionally
    /// patching its text and/or status in the same transition.
    ///
    /// The board is updated immediately. Authenticated sessions then push the full
    /// target state to the server; its response overwrites the local record on success,
    /// while a failure leaves the optimistic state in place and records the error.
    ///
    /// Demo sessions may move tasks around (drag-and-drop stays usable on the welcome
    /// screen) but may not change text or status: a non-empty patch is rejected with
    /// [`Error::AuthRequired`] before anything is applied.
    pub async fn move_task(&mut self, id: &TaskId, from: &DayKey, to: &DayKey,
                           new_order: f64, patch: Option<TaskPatch>) -> Result<(), Error>
    {
        self.last_error = None;
        let new_order = task::validated_order(new_order)?;
        let patch = match patch {
            Some(patch) if patch.is_empty() == false => Some(validated_patch(patch)?),
            _ => None,
        };

        if self.remote.is_authenticated() == false {
            if patch.is_some() {
                return self.deny("edit a task");
            }
            log::debug!("Demo mode: moving task {} locally only", id);
            self.local.move_task(id, from, to, new_order, None);
            return Ok(());
        }

        self.local.move_task(id, from, to, new_order, patch.as_ref());

        let update = TaskUpdate {
            text: patch.as_ref().and_then(|patch| patch.text.clone()),
            date: Some(to.clone()),
            order: Some(new_order),
            status: patch.as_ref().and_then(|patch| patch.status),
        };

        self.feedback(SyncEvent::InFlight { operation: String::from("update") });
        let updated = self.remote.update_task(id, &update).await;
        match self.settle("update", updated) {
            // No rollback: the optimistic state stays and the UI surfaces the banner
            Err(err) => Err(err),
            Ok(confirmed) => {
                self.local.remove(id, to);
                self.local.add(confirmed);
                Ok(())
            },
        }
    }

    /// Advance a task's status (`plan → progress → done → plan`), the single-click
    /// action on a card. This is a content edit, so demo sessions are denied.
    pub async fn cycle_status(&mut self, id: &TaskId, date: &DayKey) -> Result<(), Error> {
        let (order, next) = match self.local.task(id, date) {
            // Already gone, e.g. superseded by a refresh
            None => return Ok(()),
            Some(task) => (task.order(), task.status().cycled()),
        };
        let patch = TaskPatch { text: None, status: Some(next) };
        self.move_task(id, date, date, order, Some(patch)).await
    }

    /// Renumber a whole day from an explicit id sequence (what a drag that reorders a
    /// visible column produces).
    ///
    /// The renumbering is applied locally first; demo sessions stop there, without any
    /// server call. Authenticated sessions then push every renumbered task to the
    /// server; individual failures are logged and recorded, but do not undo the
    /// renumbering, and the remaining tasks are still pushed.
    pub async fn reorder_day(&mut self, date: &DayKey, sequence: &[TaskId]) -> Result<(), Error> {
        self.last_error = None;
        self.local.reorder(date, sequence);

        if self.remote.is_authenticated() == false {
            log::debug!("Demo mode: reordered {} locally only", date);
            return Ok(());
        }

        self.feedback(SyncEvent::InFlight { operation: String::from("reorder") });
        let renumbered: Vec<(TaskId, f64)> = self.local.day(date)
            .iter()
            .map(|task| (task.id().clone(), task.order()))
            .collect();

        let mut failure = None;
        for (id, order) in renumbered {
            let update = TaskUpdate {
                date: Some(date.clone()),
                order: Some(order),
                ..TaskUpdate::default()
            };
            match self.remote.update_task(&id, &update).await {
                Err(err) => {
                    log::warn!("Unable to push the new position of {}: {}. Keeping the local value.", id, err);
                    failure = Some(err);
                },
                Ok(confirmed) => {
                    self.local.remove(&id, date);
                    self.local.add(confirmed);
                },
            }
        }

        match failure {
            None => {
                self.feedback(SyncEvent::Finished { operation: String::from("reorder"), success: true });
                Ok(())
            },
            Some(err) => {
                self.last_error = Some(err.to_string());
                self.feedback(SyncEvent::Finished { operation: String::from("reorder"), success: false });
                Err(err)
            },
        }
    }

    /// Delete a task. The server is asked first: the local record is only removed once
    /// it confirms, and stays on a failure.
    ///
    /// Demo sessions are denied and the board is left untouched.
    pub async fn delete_task(&mut self, id: &TaskId, date: &DayKey) -> Result<(), Error> {
        self.last_error = None;
        if self.remote.is_authenticated() == false {
            return self.deny("delete a task");
        }

        self.feedback(SyncEvent::InFlight { operation: String::from("delete") });
        let deleted = self.remote.delete_task(id).await;
        self.settle("delete", deleted)?;
        self.local.remove(id, date);
        Ok(())
    }

    /// Send an event as a feedback to the listener (if any)
    fn feedback(&mut self, event: SyncEvent) {
        self.feedback_channel
            .as_ref()
            .map(|sender| {
                sender.send(event)
            });
    }

    /// Record the outcome of a remote round trip, keeping the error message for the UI
    fn settle<T>(&mut self, operation: &str, result: Result<T, Error>) -> Result<T, Error> {
        match &result {
            Ok(_) => {
                self.feedback(SyncEvent::Finished { operation: operation.to_string(), success: true });
            },
            Err(err) => {
                log::warn!("Operation {} failed: {}", operation, err);
                self.last_error = Some(err.to_string());
                self.feedback(SyncEvent::Finished { operation: operation.to_string(), success: false });
            },
        }
        result
    }

    /// Reject a mutation that demo sessions may not perform. Leaves the board untouched
    fn deny<T>(&mut self, what: &str) -> Result<T, Error> {
        log::info!("Rejecting an attempt to {} without authentication", what);
        self.last_error = Some(Error::AuthRequired.to_string());
        Err(Error::AuthRequired)
    }
}

/// Trim and check the texts a patch carries, so transitions can apply it as-is
fn validated_patch(patch: TaskPatch) -> Result<TaskPatch, Error> {
    let text = match patch.text {
        None => None,
        Some(text) => Some(task::validated_text(&text)?),
    };
    Ok(TaskPatch { text, status: patch.status })
}
