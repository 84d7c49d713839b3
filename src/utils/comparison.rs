//! Utilities to compare custom types
//!
//! These can be used to sort partitions before display

use std::cmp::Ordering;

use crate::task::Task;

/// Compare two tasks of the same day for display: `order` ascending, with the id as a
/// stable tie-break for midpoint collisions
pub fn compare_tasks(left: &Task, right: &Task) -> Ordering {
    left.order()
        .partial_cmp(&right.order())
        .unwrap_or(Ordering::Equal)
        .then_with(|| left.id().cmp(right.id()))
}
