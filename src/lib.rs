//! This crate provides the state and ordering engine behind a calendar task board.
//!
//! It provides a REST client for a task API in the [`client`] module, that can be used as a stand-alone module.
//!
//! Tasks are grouped into one partition per calendar day, held in a [`TaskStore`]: an in-memory board that the UI reads its columns from. \
//! The [`ordering`] module computes where a dragged or newly created task lands within a day, using fractional midpoint insertion so the rest of the day never needs renumbering.
//!
//! These two sides (remote client and local board) are bridged by a [`Provider`](provider::Provider): it applies each user action to the board immediately, pushes it to the server when the session is authenticated, and lets the server's response overwrite the local guess. \
//! Unauthenticated sessions run in demo mode, where drag-and-drop stays usable locally but nothing reaches the server.

pub mod traits;

mod day;
pub use day::{DayKey, DayRange};
mod task;
pub use task::{Task, TaskDraft, TaskId, TaskPatch, TaskStatus, TaskUpdate};
mod error;
pub use error::Error;

pub mod ordering;
pub mod store;
pub use store::TaskStore;
pub mod provider;
pub use provider::Provider;

pub mod client;

pub mod config;
pub mod utils;
