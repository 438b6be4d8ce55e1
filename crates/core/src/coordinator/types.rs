//! Types for the coordination loop.

use std::time::Instant;

use thiserror::Error;

/// Errors that can end a poll cycle early.
///
/// The collaborators absorb ordinary transport and parse failures locally;
/// what reaches this type is the unexpected remainder, which the loop
/// counts toward its session-recovery threshold.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// Playback monitor error.
    #[error("playback monitor error: {0}")]
    Monitor(#[from] crate::playback::MonitorError),

    /// Throttle control error.
    #[error("throttle control error: {0}")]
    Throttle(#[from] crate::throttle::ThrottleError),
}

/// Mutable state of the coordination loop.
///
/// Owned exclusively by the loop and touched only from its sequential
/// execution; rebuilt from scratch on restart.
#[derive(Debug)]
pub struct LoopState {
    /// Last believed playback state.
    pub playback_active: bool,
    /// Time of the last confirmed throttle change. Starts at construction
    /// time, so the first change waits out the anti-flap interval.
    pub last_change_at: Instant,
    /// Cycles ended by an unexpected error since the last clean cycle.
    pub consecutive_errors: u32,
}

impl LoopState {
    pub fn new() -> Self {
        Self {
            playback_active: false,
            last_change_at: Instant::now(),
            consecutive_errors: 0,
        }
    }
}

impl Default for LoopState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::MonitorError;
    use crate::throttle::ThrottleError;

    #[test]
    fn test_loop_state_new() {
        let state = LoopState::new();
        assert!(!state.playback_active);
        assert_eq!(state.consecutive_errors, 0);
    }

    #[test]
    fn test_error_display() {
        let err = CoordinatorError::from(MonitorError::Timeout);
        assert_eq!(err.to_string(), "playback monitor error: Request timeout");

        let err = CoordinatorError::from(ThrottleError::SessionExpired);
        assert_eq!(err.to_string(), "throttle control error: Session expired");
    }
}
