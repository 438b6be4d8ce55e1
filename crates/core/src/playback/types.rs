//! Types for playback monitoring.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while querying the monitoring service.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout")]
    Timeout,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Trait for playback monitoring backends.
///
/// The production implementation answers from one blocking HTTP query and
/// treats any transport or parse failure as "no playback" so the
/// coordination loop keeps running. An `Err` from this trait is reserved
/// for failures a backend cannot absorb locally; the loop counts those
/// toward its session-recovery threshold.
#[async_trait]
pub trait PlaybackMonitor: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Whether any session is currently playing.
    async fn has_active_playback(&self) -> Result<bool, MonitorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MonitorError::ConnectionFailed("refused".to_string());
        assert_eq!(err.to_string(), "Connection failed: refused");

        let err = MonitorError::ParseError("missing field `sessions`".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to parse response: missing field `sessions`"
        );
    }
}
