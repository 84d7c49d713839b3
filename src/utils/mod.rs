//! Some utility functions

pub mod comparison;

use crate::store::TaskStore;
use crate::task::{Task, TaskStatus};

/// A debug utility that pretty-prints a whole board, day by day
pub fn print_board(store: &TaskStore) {
    for date in store.days() {
        println!("DAY {}", date);
        for task in store.day(date) {
            print_task(task);
        }
    }
}

pub fn print_task(task: &Task) {
    let status = match task.status() {
        TaskStatus::Plan => " ",
        TaskStatus::Progress => "~",
        TaskStatus::Done => "✓",
    };
    println!("    {} [{:>6.1}] {}\t{}", status, task.order(), task.text(), task.id());
}
