//! qBittorrent throttle session implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::QBittorrentConfig;

use super::{ModeReading, ThrottleError, ThrottleSession};

/// Throttle session backed by the qBittorrent WebUI API.
///
/// The SID cookie issued at login is held by the client's cookie jar, so
/// one instance is one authenticated session; a fresh `login` refreshes it
/// in place.
pub struct QBittorrentSession {
    client: Client,
    config: QBittorrentConfig,
}

impl QBittorrentSession {
    /// Create a new qBittorrent session.
    pub fn new(config: QBittorrentConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url(), endpoint)
    }

    fn map_transport_error(e: reqwest::Error) -> ThrottleError {
        if e.is_timeout() {
            ThrottleError::Timeout
        } else if e.is_connect() {
            ThrottleError::ConnectionFailed(e.to_string())
        } else {
            ThrottleError::ApiError(e.to_string())
        }
    }
}

#[async_trait]
impl ThrottleSession for QBittorrentSession {
    fn name(&self) -> &str {
        "qbittorrent"
    }

    async fn login(&self) -> Result<bool, ThrottleError> {
        let params = [
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
        ];

        let response = self
            .client
            .post(self.url("/api/v2/auth/login"))
            .form(&params)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let body = response.text().await.unwrap_or_default();

        if body.contains("Ok.") {
            debug!("qBittorrent login successful");
            Ok(true)
        } else {
            warn!(
                "qBittorrent login rejected: {}",
                body.chars().take(100).collect::<String>()
            );
            Ok(false)
        }
    }

    async fn read_mode(&self) -> Result<ModeReading, ThrottleError> {
        let response = self
            .client
            .get(self.url("/api/v2/transfer/speedLimitsMode"))
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if status.as_u16() == 403 {
            return Err(ThrottleError::SessionExpired);
        }
        if !status.is_success() {
            return Err(ThrottleError::ApiError(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ThrottleError::ApiError(e.to_string()))?;

        // The API answers with the literal text "1" or "0".
        let reading = match body.trim() {
            "1" => ModeReading::Throttled,
            "0" => ModeReading::Unthrottled,
            other => {
                warn!(
                    "Unrecognized speedLimitsMode response: {}",
                    other.chars().take(20).collect::<String>()
                );
                ModeReading::Unknown
            }
        };

        debug!("Current throttle mode reading: {:?}", reading);
        Ok(reading)
    }

    async fn toggle(&self) -> Result<(), ThrottleError> {
        let response = self
            .client
            .post(self.url("/api/v2/transfer/toggleSpeedLimitsMode"))
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if status.as_u16() == 403 {
            return Err(ThrottleError::SessionExpired);
        }
        if !status.is_success() {
            return Err(ThrottleError::ApiError(format!("HTTP {}", status)));
        }

        Ok(())
    }
}
