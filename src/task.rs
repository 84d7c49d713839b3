//! Task records, the unit of content on a board

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::day::DayKey;
use crate::error::Error;

/// A task identifier.
///
/// Tasks that have reached the server carry its primary key; provisional tasks that only
/// exist in the local board carry a client-generated UUID until the server's record
/// replaces them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random TaskId, for a task that has no server-assigned key yet
    pub fn random() -> Self {
        let random = Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = String::deserialize(deserializer)?;
        Ok(TaskId { content })
    }
}

/// The progress state of a task.
///
/// A single click on a task card cycles `Plan → Progress → Done → Plan`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Plan,
    Progress,
    Done,
}

impl TaskStatus {
    /// The status a single click moves a task to
    pub fn cycled(self) -> Self {
        match self {
            TaskStatus::Plan => TaskStatus::Progress,
            TaskStatus::Progress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Plan,
        }
    }
}

/// Server records written before statuses existed carry none; they count as `Plan`
impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Plan
    }
}

/// A task on the board
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// The document-store primary key, or a client-generated UUID for provisional tasks
    #[serde(rename = "_id", alias = "id")]
    id: TaskId,

    /// The display text
    text: String,

    /// The day partition this task belongs to
    date: DayKey,

    /// The sort key within the day partition.
    /// Not necessarily an integer: midpoint insertion produces fractional values
    order: f64,

    /// The owning user. Public (demo) tasks have no owner
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none", default)]
    owner_id: Option<String>,

    #[serde(default)]
    status: TaskStatus,

    /// Server-side timestamps. This crate never sets them, it only carries what the server sent
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none", default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none", default)]
    updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a brand new task that is not on the server yet.
    /// This picks a new (random) task id; the text is trimmed and must not be blank,
    /// and `order` must be finite.
    pub fn new(text: &str, date: DayKey, order: f64) -> Result<Self, Error> {
        let text = validated_text(text)?;
        let order = validated_order(order)?;
        Ok(Self::new_with_parameters(TaskId::random(), text, date, order, None, TaskStatus::default()))
    }

    /// Create a task instance that may exist on the server already.
    /// No validation happens here: server data is taken as-is.
    pub fn new_with_parameters(id: TaskId, text: String, date: DayKey, order: f64,
                               owner_id: Option<String>, status: TaskStatus) -> Self
    {
        Self {
            id,
            text,
            date,
            order,
            owner_id,
            status,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn id(&self) -> &TaskId   { &self.id   }
    pub fn text(&self) -> &str    { &self.text }
    pub fn date(&self) -> &DayKey { &self.date }
    pub fn order(&self) -> f64    { self.order }
    pub fn status(&self) -> TaskStatus                 { self.status }
    pub fn owner_id(&self) -> Option<&str>             { self.owner_id.as_deref() }
    pub fn created_at(&self) -> Option<&DateTime<Utc>> { self.created_at.as_ref() }
    pub fn updated_at(&self) -> Option<&DateTime<Utc>> { self.updated_at.as_ref() }

    /// Change the display text. The new text is trimmed and must not be blank
    pub fn set_text(&mut self, new_text: &str) -> Result<(), Error> {
        self.text = validated_text(new_text)?;
        Ok(())
    }

    pub fn set_status(&mut self, new_status: TaskStatus) {
        self.status = new_status;
    }

    pub(crate) fn set_date(&mut self, new_date: DayKey) {
        self.date = new_date;
    }

    pub(crate) fn set_order(&mut self, new_order: f64) {
        self.order = new_order;
    }

    /// Apply a partial content change. Patch texts are applied as-is: they have been
    /// validated where the patch was built, at the boundary
    pub(crate) fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// The payload of a create request
#[derive(Clone, Debug, Serialize)]
pub struct TaskDraft {
    pub text: String,
    pub date: DayKey,
    pub order: f64,
    pub status: TaskStatus,
}

/// The payload of an update request: the full target position, plus the content
/// changes (if any). Absent fields are left untouched by the server
#[derive(Clone, Debug, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DayKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

/// A partial content change (text and/or status) that a move transition applies
/// atomically with the position change
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.status.is_none()
    }
}

/// Trim `text`, rejecting it if nothing remains
pub(crate) fn validated_text(text: &str) -> Result<String, Error> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyText);
    }
    Ok(trimmed.to_string())
}

/// Reject NaN and infinite order values, which would break the partition's total order
pub(crate) fn validated_order(order: f64) -> Result<f64, Error> {
    if order.is_finite() == false {
        return Err(Error::NonFiniteOrder(order));
    }
    Ok(order)
}
