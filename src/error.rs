//! The error type shared by every fallible operation of this crate

use thiserror::Error;

/// Everything that can go wrong while validating, storing or syncing tasks.
#[derive(Debug, Error)]
pub enum Error {
    /// The task text was empty (or blank) after trimming.
    /// Raised at the boundary, before anything is stored or sent
    #[error("task text must not be empty")]
    EmptyText,

    /// A day key that is not in the canonical `YYYY-MM-DD` form
    #[error("invalid day key {0:?}")]
    InvalidDayKey(String),

    /// An order value that is NaN or infinite, and thus cannot take part in a total order
    #[error("order value must be finite, got {0}")]
    NonFiniteOrder(f64),

    /// The operation requires a logged-in user.
    /// Raised by the demo-mode gate, and also for a 401 from the server (an expired
    /// credential degrades to demo mode)
    #[error("authentication required")]
    AuthRequired,

    /// The server does not know this task, or it belongs to somebody else
    #[error("task not found on the server")]
    NotFound,

    /// The server replied with an unexpected HTTP status code
    #[error("unexpected HTTP status code {status}: {message}")]
    Server { status: u16, message: String },

    /// The request did not complete (DNS, connection, timeout...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    pub fn is_auth_required(&self) -> bool {
        match self {
            Error::AuthRequired => true,
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound => true,
            _ => false,
        }
    }
}
