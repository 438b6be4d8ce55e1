use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from file with environment variable overrides
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed("PLAYBRAKE_").split("_"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_TOML: &str = r#"
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
"#;

    #[test]
    fn test_load_config_from_str_valid() {
        let config = load_config_from_str(VALID_TOML).unwrap();
        assert_eq!(config.qbittorrent.port, 8080);
        assert_eq!(config.coordinator.grace_period_ms, 10000);
    }

    #[test]
    fn test_load_config_from_str_missing_section() {
        let toml = r#"
[tautulli]
host = "127.0.0.1"
port = 8181
api_key = "key"
"#;
        let result = load_config_from_str(toml);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", VALID_TOML).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.tautulli.host, "127.0.0.1");
        assert_eq!(config.coordinator.min_change_interval_ms, 5000);
    }
}
