//! Coordinator configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the coordination loop.
///
/// All three tunables are required; a missing one fails config parsing and
/// keeps the daemon from starting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Sleep between poll cycles (milliseconds).
    pub poll_interval_ms: u64,

    /// Wait after playback appears to stop before restoring full speed
    /// (milliseconds). Debounces brief pauses.
    pub grace_period_ms: u64,

    /// Minimum elapsed time between two throttle changes (milliseconds).
    pub min_change_interval_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            poll_interval_ms = 20000
            grace_period_ms = 10000
            min_change_interval_ms = 5000
        "#;
        let config: CoordinatorConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.poll_interval_ms, 20000);
        assert_eq!(config.grace_period_ms, 10000);
        assert_eq!(config.min_change_interval_ms, 5000);
    }

    #[test]
    fn test_deserialize_missing_field_fails() {
        let toml = r#"
            poll_interval_ms = 20000
            min_change_interval_ms = 5000
        "#;
        let result: Result<CoordinatorConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
