//! Tautulli playback monitor implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::TautulliConfig;

use super::{MonitorError, PlaybackMonitor};

/// Playback monitor backed by the Tautulli v2 API.
pub struct TautulliMonitor {
    client: Client,
    config: TautulliConfig,
}

impl TautulliMonitor {
    /// Create a new Tautulli monitor.
    pub fn new(config: TautulliConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Query `get_activity` and return the number of active sessions.
    async fn fetch_session_count(&self) -> Result<usize, MonitorError> {
        let response = self
            .client
            .get(self.config.base_url())
            .query(&[
                ("apikey", self.config.api_key.as_str()),
                ("cmd", "get_activity"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MonitorError::Timeout
                } else if e.is_connect() {
                    MonitorError::ConnectionFailed(e.to_string())
                } else {
                    MonitorError::ApiError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MonitorError::ApiError(format!("HTTP {}", status)));
        }

        let envelope: ActivityEnvelope = response
            .json()
            .await
            .map_err(|e| MonitorError::ParseError(e.to_string()))?;

        Ok(envelope.response.data.sessions.len())
    }
}

/// Tautulli API envelope: `{"response": {"data": {"sessions": [...]}}}`.
#[derive(Debug, Deserialize)]
struct ActivityEnvelope {
    response: ActivityResponse,
}

#[derive(Debug, Deserialize)]
struct ActivityResponse {
    data: ActivityData,
}

#[derive(Debug, Deserialize)]
struct ActivityData {
    sessions: Vec<Value>,
}

#[async_trait]
impl PlaybackMonitor for TautulliMonitor {
    fn name(&self) -> &str {
        "tautulli"
    }

    async fn has_active_playback(&self) -> Result<bool, MonitorError> {
        match self.fetch_session_count().await {
            Ok(count) => {
                debug!("Active playback sessions: {}", count);
                Ok(count > 0)
            }
            Err(e) => {
                // Any query failure reads as "no playback"; the loop must
                // keep running and the next cycle re-queries anyway.
                warn!("Tautulli activity query failed: {}", e);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_activity_with_sessions() {
        let body = r#"{"response": {"result": "success", "data": {"stream_count": "2", "sessions": [{"session_id": "a"}, {"session_id": "b"}]}}}"#;
        let envelope: ActivityEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.response.data.sessions.len(), 2);
    }

    #[test]
    fn test_parse_activity_empty() {
        let body = r#"{"response": {"data": {"sessions": []}}}"#;
        let envelope: ActivityEnvelope = serde_json::from_str(body).unwrap();
        assert!(envelope.response.data.sessions.is_empty());
    }

    #[test]
    fn test_parse_activity_missing_sessions_fails() {
        let body = r#"{"response": {"data": {}}}"#;
        let result: Result<ActivityEnvelope, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_activity_wrong_shape_fails() {
        let body = r#"{"error": "unauthorized"}"#;
        let result: Result<ActivityEnvelope, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }
}
