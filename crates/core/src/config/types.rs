use serde::{Deserialize, Serialize};

pub use crate::coordinator::CoordinatorConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub tautulli: TautulliConfig,
    pub qbittorrent: QBittorrentConfig,
    pub coordinator: CoordinatorConfig,
}

/// Tautulli monitoring service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TautulliConfig {
    /// Hostname or IP of the Tautulli server
    pub host: String,
    /// Tautulli HTTP port
    pub port: u16,
    /// Tautulli API key
    pub api_key: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl TautulliConfig {
    /// Base URL of the Tautulli v2 API.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/api/v2", self.host, self.port)
    }
}

/// qBittorrent WebUI configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QBittorrentConfig {
    /// Hostname or IP of the qBittorrent WebUI
    pub host: String,
    /// qBittorrent WebUI port
    pub port: u16,
    /// WebUI username
    pub username: String,
    /// WebUI password
    pub password: String,
    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Wait after issuing a toggle before re-reading the mode (default: 1000)
    #[serde(default = "default_confirm_delay")]
    pub confirm_delay_ms: u64,
    /// Wait between failed toggle attempts (default: 2000)
    #[serde(default = "default_toggle_backoff")]
    pub toggle_backoff_ms: u64,
}

impl QBittorrentConfig {
    /// Base URL of the qBittorrent WebUI.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn default_timeout() -> u32 {
    10
}

fn default_confirm_delay() -> u64 {
    1000
}

fn default_toggle_backoff() -> u64 {
    2000
}

/// Sanitized config for startup logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub tautulli: SanitizedTautulliConfig,
    pub qbittorrent: SanitizedQBittorrentConfig,
    pub coordinator: CoordinatorConfig,
}

/// Sanitized Tautulli config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTautulliConfig {
    pub host: String,
    pub port: u16,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

/// Sanitized qBittorrent config (password hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedQBittorrentConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            tautulli: SanitizedTautulliConfig {
                host: config.tautulli.host.clone(),
                port: config.tautulli.port,
                api_key_configured: !config.tautulli.api_key.is_empty(),
                timeout_secs: config.tautulli.timeout_secs,
            },
            qbittorrent: SanitizedQBittorrentConfig {
                host: config.qbittorrent.host.clone(),
                port: config.qbittorrent.port,
                username: config.qbittorrent.username.clone(),
                password_configured: !config.qbittorrent.password.is_empty(),
                timeout_secs: config.qbittorrent.timeout_secs,
            },
            coordinator: config.coordinator.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_toml() -> &'static str {
        r#"
[tautulli]
host = "127.0.0.1"
port = 8181
api_key = "tautulli-key"

[qbittorrent]
host = "127.0.0.1"
port = 8080
username = "admin"
password = "adminadmin"

[coordinator]
poll_interval_ms = 20000
grace_period_ms = 10000
min_change_interval_ms = 5000
"#
    }

    #[test]
    fn test_deserialize_valid_config() {
        let config: Config = toml::from_str(full_toml()).unwrap();
        assert_eq!(config.tautulli.port, 8181);
        assert_eq!(config.tautulli.api_key, "tautulli-key");
        assert_eq!(config.qbittorrent.username, "admin");
        assert_eq!(config.coordinator.poll_interval_ms, 20000);
    }

    #[test]
    fn test_deserialize_applies_timeout_defaults() {
        let config: Config = toml::from_str(full_toml()).unwrap();
        assert_eq!(config.tautulli.timeout_secs, 10);
        assert_eq!(config.qbittorrent.timeout_secs, 10);
        assert_eq!(config.qbittorrent.confirm_delay_ms, 1000);
        assert_eq!(config.qbittorrent.toggle_backoff_ms, 2000);
    }

    #[test]
    fn test_deserialize_missing_section_fails() {
        let toml = r#"
[tautulli]
host = "127.0.0.1"
port = 8181
api_key = "key"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_missing_tunable_fails() {
        // coordinator tunables carry no defaults; all three are required
        let toml = r#"
[tautulli]
host = "127.0.0.1"
port = 8181
api_key = "key"

[qbittorrent]
host = "127.0.0.1"
port = 8080
username = "admin"
password = "adminadmin"

[coordinator]
poll_interval_ms = 20000
grace_period_ms = 10000
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_base_urls() {
        let config: Config = toml::from_str(full_toml()).unwrap();
        assert_eq!(config.tautulli.base_url(), "http://127.0.0.1:8181/api/v2");
        assert_eq!(config.qbittorrent.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_sanitized_config() {
        let config: Config = toml::from_str(full_toml()).unwrap();
        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.tautulli.api_key_configured);
        assert!(sanitized.qbittorrent.password_configured);
        assert_eq!(sanitized.qbittorrent.username, "admin");

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("tautulli-key"));
        assert!(!json.contains("adminadmin"));
    }
}
