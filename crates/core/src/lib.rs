pub mod config;
pub mod coordinator;
pub mod playback;
pub mod testing;
pub mod throttle;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, QBittorrentConfig,
    SanitizedConfig, TautulliConfig,
};
pub use coordinator::{CoordinatorConfig, CoordinatorError, LoopState, SpeedCoordinator};
pub use playback::{MonitorError, PlaybackMonitor, TautulliMonitor};
pub use throttle::{
    ModeReading, QBittorrentSession, ThrottleController, ThrottleError, ThrottleMode,
    ThrottleSession,
};
