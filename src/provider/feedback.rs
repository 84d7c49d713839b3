//! Utilities to track the progression of remote operations

use std::fmt::{Display, Error, Formatter};

/// What the provider is currently doing with the server
#[derive(Clone, Debug)]
pub enum SyncEvent {
    /// No request is in flight
    Idle,
    /// A request has been sent and has not resolved yet.
    /// The board may already show the optimistic outcome
    InFlight { operation: String },
    /// The last request has resolved
    Finished { operation: String, success: bool },
}

impl Display for SyncEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            SyncEvent::Idle => write!(f, "Idle"),
            SyncEvent::InFlight { operation } => write!(f, "[{}] in flight...", operation),
            SyncEvent::Finished { operation, success } => match success {
                true => write!(f, "[{}] done", operation),
                false => write!(f, "[{}] failed", operation),
            },
        }
    }
}

impl Default for SyncEvent {
    fn default() -> Self {
        Self::Idle
    }
}

/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<SyncEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<SyncEvent>;

/// Create a feedback channel, that a UI can watch to display request progress
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(SyncEvent::default())
}
