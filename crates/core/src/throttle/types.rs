//! Types for throttle control.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to the torrent client.
#[derive(Debug, Error)]
pub enum ThrottleError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("API error: {0}")]
    ApiError(String),
}

/// The torrent client's alternative speed limits setting, on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThrottleMode {
    /// Alternative (reduced) speed limits are active.
    Throttled,
    /// Full speed.
    Unthrottled,
}

impl ThrottleMode {
    /// Returns the string representation for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThrottleMode::Throttled => "throttled",
            ThrottleMode::Unthrottled => "unthrottled",
        }
    }
}

/// Outcome of a throttle mode query.
///
/// The query itself can fail, so this is an explicit tri-state: `Unknown`
/// must be handled distinctly from `Unthrottled` and never collapsed into
/// a boolean default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeReading {
    Throttled,
    Unthrottled,
    Unknown,
}

impl ModeReading {
    /// Whether this reading observed the given mode. `Unknown` matches
    /// nothing.
    pub fn matches(&self, mode: ThrottleMode) -> bool {
        match (*self, mode) {
            (ModeReading::Throttled, ThrottleMode::Throttled) => true,
            (ModeReading::Unthrottled, ThrottleMode::Unthrottled) => true,
            _ => false,
        }
    }
}

impl From<ThrottleMode> for ModeReading {
    fn from(mode: ThrottleMode) -> Self {
        match mode {
            ThrottleMode::Throttled => ModeReading::Throttled,
            ThrottleMode::Unthrottled => ModeReading::Unthrottled,
        }
    }
}

/// Trait for torrent client session backends.
///
/// Implementations own one authenticated session and expose the raw
/// primitives; the confirm-after-toggle protocol lives in
/// [`super::ThrottleController`].
#[async_trait]
pub trait ThrottleSession: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Log in. Returns false when the backend rejects the credentials;
    /// transport failures are errors.
    async fn login(&self) -> Result<bool, ThrottleError>;

    /// Read the current throttle mode. An unrecognized response body is
    /// `Ok(ModeReading::Unknown)`; an expired session is
    /// `Err(ThrottleError::SessionExpired)`.
    async fn read_mode(&self) -> Result<ModeReading, ThrottleError>;

    /// Flip the throttle mode. Success is only observable via a
    /// subsequent [`Self::read_mode`].
    async fn toggle(&self) -> Result<(), ThrottleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_mode_as_str() {
        assert_eq!(ThrottleMode::Throttled.as_str(), "throttled");
        assert_eq!(ThrottleMode::Unthrottled.as_str(), "unthrottled");
    }

    #[test]
    fn test_mode_reading_matches() {
        assert!(ModeReading::Throttled.matches(ThrottleMode::Throttled));
        assert!(ModeReading::Unthrottled.matches(ThrottleMode::Unthrottled));
        assert!(!ModeReading::Throttled.matches(ThrottleMode::Unthrottled));
        assert!(!ModeReading::Unthrottled.matches(ThrottleMode::Throttled));
    }

    #[test]
    fn test_mode_reading_unknown_matches_nothing() {
        assert!(!ModeReading::Unknown.matches(ThrottleMode::Throttled));
        assert!(!ModeReading::Unknown.matches(ThrottleMode::Unthrottled));
    }

    #[test]
    fn test_mode_reading_from_mode() {
        assert_eq!(
            ModeReading::from(ThrottleMode::Throttled),
            ModeReading::Throttled
        );
        assert_eq!(
            ModeReading::from(ThrottleMode::Unthrottled),
            ModeReading::Unthrottled
        );
    }

    #[test]
    fn test_error_display() {
        let err = ThrottleError::SessionExpired;
        assert_eq!(err.to_string(), "Session expired");

        let err = ThrottleError::AuthenticationFailed("Invalid credentials".to_string());
        assert_eq!(err.to_string(), "Authentication failed: Invalid credentials");
    }
}
