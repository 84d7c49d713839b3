//! The in-memory task board: one ordered task list per calendar day
//!
//! This is the only shared mutable state of the crate. It is owned by the
//! [`Provider`](crate::provider::Provider) and mutated exclusively through the four
//! transitions defined here; consumers read it through [`TaskStore::day`], which sorts
//! at the read boundary (storage order is an implementation detail).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::day::DayKey;
use crate::task::{Task, TaskId, TaskPatch};
use crate::utils::comparison::compare_tasks;

/// The per-day partition map behind a calendar screen.
///
/// Transitions are no-ops when the referenced task or partition does not exist:
/// a server reconciliation may have removed it in the meantime, which is a
/// recoverable situation rather than an error.
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskStore {
    days: HashMap<DayKey, Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self { days: HashMap::new() }
    }

    /// Build a whole board from a fetched task list.
    /// A refresh replaces the previous board with this, it never merges.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut store = Self::new();
        for task in tasks {
            store.add(task);
        }
        store
    }

    /// Insert a task into its day's partition
    pub fn add(&mut self, task: Task) {
        self.days.entry(task.date().clone()).or_insert_with(Vec::new).push(task);
    }

    /// Remove a task from a day's partition
    pub fn remove(&mut self, id: &TaskId, date: &DayKey) {
        let day = match self.days.get_mut(date) {
            None => return,
            Some(day) => day,
        };
        day.retain(|task| task.id() != id);
        if day.is_empty() {
            self.days.remove(date);
        }
    }

    /// Move a task to `new_order` on day `to` (which may equal `from`), applying
    /// `patch` atomically with the position change.
    ///
    /// There is no observable state in which the task belongs to zero or two partitions.
    pub fn move_task(&mut self, id: &TaskId, from: &DayKey, to: &DayKey, new_order: f64, patch: Option<&TaskPatch>) {
        let day = match self.days.get_mut(from) {
            None => return,
            Some(day) => day,
        };
        let index = match day.iter().position(|task| task.id() == id) {
            None => return,
            Some(index) => index,
        };

        let mut task = day.remove(index);
        if day.is_empty() {
            self.days.remove(from);
        }

        if let Some(patch) = patch {
            task.apply_patch(patch);
        }
        task.set_date(to.clone());
        task.set_order(new_order);
        self.add(task);
    }

    /// Renumber a whole day from an explicit id sequence (what a drag that reorders a
    /// visible column produces): each task gets its sequence index (0, 1, 2, ...) as order.
    ///
    /// The partition is rebuilt strictly from the sequence: ids it does not know are
    /// skipped, and tasks it does not mention are dropped. Applying the same sequence
    /// twice yields the same partition.
    pub fn reorder(&mut self, date: &DayKey, sequence: &[TaskId]) {
        let day = match self.days.get_mut(date) {
            None => return,
            Some(day) => day,
        };

        let mut pool: HashMap<TaskId, Task> = day
            .drain(..)
            .map(|task| (task.id().clone(), task))
            .collect();
        for (index, id) in sequence.iter().enumerate() {
            if let Some(mut task) = pool.remove(id) {
                task.set_order(index as f64);
                day.push(task);
            }
        }
        if day.is_empty() {
            self.days.remove(date);
        }
    }

    /// The tasks of one day, sorted for display (order ascending, id as tie-break)
    pub fn day(&self, date: &DayKey) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = match self.days.get(date) {
            None => return Vec::new(),
            Some(day) => day.iter().collect(),
        };
        tasks.sort_by(|left, right| compare_tasks(left, right));
        tasks
    }

    /// Look up a single task
    pub fn task(&self, id: &TaskId, date: &DayKey) -> Option<&Task> {
        self.days.get(date).and_then(|day| day.iter().find(|task| task.id() == id))
    }

    /// Every day that currently has tasks, in chronological order
    pub fn days(&self) -> Vec<&DayKey> {
        let mut days: Vec<&DayKey> = self.days.keys().collect();
        days.sort();
        days
    }

    /// Total number of tasks on the board
    pub fn task_count(&self) -> usize {
        self.days.values().map(|day| day.len()).sum()
    }
}
