use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Ports and timeouts are nonzero
/// - API key and credentials are nonempty
/// - Coordinator tunables are nonzero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Tautulli validation
    if config.tautulli.port == 0 {
        return Err(ConfigError::ValidationError(
            "tautulli.port cannot be 0".to_string(),
        ));
    }
    if config.tautulli.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "tautulli.api_key cannot be empty".to_string(),
        ));
    }
    if config.tautulli.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "tautulli.timeout_secs cannot be 0".to_string(),
        ));
    }

    // qBittorrent validation
    if config.qbittorrent.port == 0 {
        return Err(ConfigError::ValidationError(
            "qbittorrent.port cannot be 0".to_string(),
        ));
    }
    if config.qbittorrent.username.is_empty() {
        return Err(ConfigError::ValidationError(
            "qbittorrent.username cannot be empty".to_string(),
        ));
    }
    if config.qbittorrent.password.is_empty() {
        return Err(ConfigError::ValidationError(
            "qbittorrent.password cannot be empty".to_string(),
        ));
    }
    if config.qbittorrent.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "qbittorrent.timeout_secs cannot be 0".to_string(),
        ));
    }

    // Coordinator validation
    if config.coordinator.poll_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "coordinator.poll_interval_ms cannot be 0".to_string(),
        ));
    }
    if config.coordinator.grace_period_ms == 0 {
        return Err(ConfigError::ValidationError(
            "coordinator.grace_period_ms cannot be 0".to_string(),
        ));
    }
    if config.coordinator.min_change_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "coordinator.min_change_interval_ms cannot be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    fn valid_config() -> Config {
        load_config_from_str(
            r#"
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
min_change_interval_ms = 5000
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let mut config = valid_config();
        config.qbittorrent.port = 0;
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_empty_api_key_fails() {
        let mut config = valid_config();
        config.tautulli.api_key.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_password_fails() {
        let mut config = valid_config();
        config.qbittorrent.password.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_tunable_fails() {
        let mut config = valid_config();
        config.coordinator.grace_period_ms = 0;
        assert!(validate_config(&config).is_err());
    }
}
