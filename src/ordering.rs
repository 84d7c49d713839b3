//! Where a dragged or newly created task lands within a day's column
//!
//! Every function here is pure: it looks at the (sorted) tasks of the target partition
//! and computes a new `order` value for a single task, without renumbering the others.
//! The only whole-partition renumber is [`TaskStore::reorder`](crate::store::TaskStore::reorder).

use crate::task::{Task, TaskId};

/// Which half of the drop target the cursor was in when the task was released
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropHalf {
    /// Above the target's vertical midpoint: the task lands just before it
    Above,
    /// Below the midpoint: the task lands just after it
    Below,
}

/// The order value a brand new task receives.
///
/// New tasks go to the newest-first boundary of the partition, so they always show up
/// at the same predictable spot: `0` on an empty day, otherwise below the current
/// minimum. Existing tasks are never renumbered.
pub fn boundary_order(sorted: &[&Task]) -> f64 {
    match sorted.first() {
        None => 0.0,
        Some(first) => first.order() - 1.0,
    }
}

/// The order value for a task dropped onto the empty space of a day, i.e. after
/// every task already there
pub fn append_order(sorted: &[&Task]) -> f64 {
    match sorted.last() {
        None => 0.0,
        Some(last) => last.order() + 1.0,
    }
}

/// The order value for `dragged` dropped onto `target` in a day's sorted column.
///
/// Dropping on the top half slots the task between the target and its predecessor,
/// on the bottom half between the target and its successor; a missing neighbour
/// degrades to `target ± 1`. Returns `None` when the task is dropped onto itself
/// or the target is not in `sorted` (both are no-ops).
pub fn drop_order(sorted: &[&Task], dragged: &TaskId, target: &TaskId, half: DropHalf) -> Option<f64> {
    if dragged == target {
        return None;
    }
    let target_index = sorted.iter().position(|task| task.id() == target)?;
    let target_order = sorted[target_index].order();

    let new_order = match half {
        DropHalf::Above => match target_index.checked_sub(1) {
            None => target_order - 1.0,
            Some(previous) => midpoint(sorted[previous].order(), target_order),
        },
        DropHalf::Below => match sorted.get(target_index + 1) {
            None => target_order + 1.0,
            Some(next) => midpoint(target_order, next.order()),
        },
    };
    Some(new_order)
}

/// Midway between two neighbouring order values.
/// Equal neighbours produce a collision; that is tolerated, since the display sort
/// breaks ties by id and a later bulk reorder normalizes the partition.
fn midpoint(before: f64, after: f64) -> f64 {
    (before + after) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::DayKey;
    use crate::task::TaskStatus;

    fn task(id: &str, order: f64) -> Task {
        let date: DayKey = "2024-06-01".parse().unwrap();
        Task::new_with_parameters(TaskId::from(id), format!("Task {}", id), date, order, None, TaskStatus::Plan)
    }

    #[test]
    fn new_tasks_go_to_the_boundary() {
        assert_eq!(boundary_order(&[]), 0.0);

        let a = task("A", 0.0);
        let b = task("B", 1.0);
        assert_eq!(boundary_order(&[&a, &b]), -1.0);

        let low = task("L", -3.5);
        assert_eq!(boundary_order(&[&low, &a]), -4.5);
    }

    #[test]
    fn append_goes_after_the_last_task() {
        assert_eq!(append_order(&[]), 0.0);
        let a = task("A", 0.0);
        let b = task("B", 1.0);
        assert_eq!(append_order(&[&a, &b]), 2.0);
    }

    #[test]
    fn dropping_below_the_last_task_appends() {
        let a = task("A", 0.0);
        let b = task("B", 1.0);
        let c = task("C", 2.0);
        let sorted = [&a, &b, &c];

        // A dropped on the bottom half of C: no successor, so C.order + 1
        let new_order = drop_order(&sorted, a.id(), c.id(), DropHalf::Below).unwrap();
        assert_eq!(new_order, 3.0);

        // applying it yields the display sequence [B, C, A]
        let mut reordered = vec![(new_order, "A"), (b.order(), "B"), (c.order(), "C")];
        reordered.sort_by(|left, right| left.0.partial_cmp(&right.0).unwrap());
        let ids: Vec<&str> = reordered.iter().map(|pair| pair.1).collect();
        assert_eq!(ids, vec!["B", "C", "A"]);
    }

    #[test]
    fn dropping_above_the_first_task_prepends() {
        let a = task("A", 0.0);
        let b = task("B", 1.0);
        let sorted = [&a, &b];

        let new_order = drop_order(&sorted, b.id(), a.id(), DropHalf::Above).unwrap();
        assert_eq!(new_order, -1.0);
    }

    #[test]
    fn dropping_between_two_tasks_takes_the_midpoint() {
        let a = task("A", 0.0);
        let b = task("B", 1.0);
        let c = task("C", 2.0);
        let sorted = [&a, &b, &c];

        // top half of B: between A and B
        assert_eq!(drop_order(&sorted, c.id(), b.id(), DropHalf::Above).unwrap(), 0.5);
        // bottom half of B: between B and C
        assert_eq!(drop_order(&sorted, a.id(), b.id(), DropHalf::Below).unwrap(), 1.5);
    }

    #[test]
    fn dropping_a_task_onto_itself_is_a_no_op() {
        let a = task("A", 0.0);
        let b = task("B", 1.0);
        let sorted = [&a, &b];

        assert_eq!(drop_order(&sorted, a.id(), a.id(), DropHalf::Above), None);
        assert_eq!(drop_order(&sorted, a.id(), a.id(), DropHalf::Below), None);
    }

    #[test]
    fn dropping_onto_an_unknown_target_is_a_no_op() {
        let a = task("A", 0.0);
        let sorted = [&a];
        assert_eq!(drop_order(&sorted, a.id(), &TaskId::from("vanished"), DropHalf::Below), None);
    }

    #[test]
    fn cross_day_drops_ignore_the_dragged_id() {
        // the dragged task lives on another day: only the target matters
        let x = task("X", 0.0);
        let y = task("Y", 1.0);
        let sorted = [&x, &y];

        let foreign = TaskId::from("from-another-day");
        assert_eq!(drop_order(&sorted, &foreign, x.id(), DropHalf::Below).unwrap(), 0.5);
    }
}
