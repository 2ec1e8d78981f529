//! Error types for the todo client and the user-visible error banner.
//!
//! # Design
//! `ApiError` describes why a single round-trip failed. The session never
//! surfaces it directly: every failure is recovered locally and collapsed
//! into one `ErrorMessage`, shown in a single-slot `ErrorBanner` that clears
//! itself after a fixed delay. Concurrent failures overwrite each other, so
//! the last one to land is the one displayed.

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;

/// How long an error stays on screen unless dismissed earlier.
pub const DEFAULT_ERROR_TIMEOUT: Duration = Duration::from_secs(3);

/// Errors returned by `TodoClient` parse methods and reported by hosts.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 — the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned an unexpected status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The host could not complete the round-trip at all.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// The user-visible error taxonomy. Absence of a message is `None` at the
/// `Option<ErrorMessage>` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMessage {
    LoadFailed,
    AddFailed,
    DeleteFailed,
    UpdateFailed,
    /// Client-side validation; never contacts the network.
    EmptyTitle,
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ErrorMessage::LoadFailed => "Unable to load todos",
            ErrorMessage::AddFailed => "Unable to add a todo",
            ErrorMessage::DeleteFailed => "Unable to delete a todo",
            ErrorMessage::UpdateFailed => "Unable to update a todo",
            ErrorMessage::EmptyTitle => "Title should not be empty",
        };
        f.write_str(text)
    }
}

/// Single-slot transient error display.
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    current: Option<(ErrorMessage, Instant)>,
    timeout: Duration,
}

impl Default for ErrorBanner {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_TIMEOUT)
    }
}

impl ErrorBanner {
    pub fn new(timeout: Duration) -> Self {
        Self {
            current: None,
            timeout,
        }
    }

    pub fn message(&self) -> Option<ErrorMessage> {
        self.current.map(|(message, _)| message)
    }

    /// Show `message`, replacing whatever is displayed and restarting the
    /// timer from `now`.
    pub fn raise(&mut self, message: ErrorMessage, now: Instant) {
        self.current = Some((message, now + self.timeout));
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Clear the message if its deadline has passed. Returns true if a message
    /// was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.current {
            Some((_, deadline)) if now >= deadline => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the current message clears itself.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.current
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_clears_after_timeout() {
        let start = Instant::now();
        let mut banner = ErrorBanner::default();
        banner.raise(ErrorMessage::LoadFailed, start);

        assert!(!banner.expire(start + Duration::from_millis(2999)));
        assert_eq!(banner.message(), Some(ErrorMessage::LoadFailed));

        assert!(banner.expire(start + DEFAULT_ERROR_TIMEOUT));
        assert_eq!(banner.message(), None);
    }

    #[test]
    fn newer_error_restarts_the_timer() {
        let start = Instant::now();
        let mut banner = ErrorBanner::default();
        banner.raise(ErrorMessage::DeleteFailed, start);
        banner.raise(ErrorMessage::UpdateFailed, start + Duration::from_secs(2));

        assert!(!banner.expire(start + Duration::from_secs(3)));
        assert_eq!(banner.message(), Some(ErrorMessage::UpdateFailed));
        assert!(banner.expire(start + Duration::from_secs(5)));
    }

    #[test]
    fn dismiss_clears_immediately() {
        let mut banner = ErrorBanner::default();
        banner.raise(ErrorMessage::EmptyTitle, Instant::now());
        banner.dismiss();
        assert_eq!(banner.message(), None);
        assert_eq!(banner.remaining(Instant::now()), None);
    }

    #[test]
    fn messages_render_user_facing_text() {
        assert_eq!(ErrorMessage::EmptyTitle.to_string(), "Title should not be empty");
        assert_eq!(ErrorMessage::AddFailed.to_string(), "Unable to add a todo");
    }
}
