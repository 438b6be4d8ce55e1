//! Coordination loop.
//!
//! Polls the playback monitor and drives the throttle controller: throttle
//! down while something is playing, restore full speed once playback has
//! been gone for the grace period. Owns all mutable loop state and the
//! debounce, anti-flap, drift-correction and session-recovery rules.

mod config;
mod runner;
mod types;

pub use config::CoordinatorConfig;
pub use runner::SpeedCoordinator;
pub use types::{CoordinatorError, LoopState};
