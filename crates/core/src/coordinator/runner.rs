//! Coordination loop implementation.
//!
//! One sequential task: query the monitor, compare against the tracked
//! belief, command the throttle controller under the guard rules, sleep,
//! repeat. The only suspension points are the per-cycle poll sleep, the
//! grace-period wait and the controller's confirm delay, all awaited
//! inside this single flow, so no locking is needed around [`LoopState`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::playback::PlaybackMonitor;
use crate::throttle::{ModeReading, ThrottleController, ThrottleMode};

use super::config::CoordinatorConfig;
use super::types::{CoordinatorError, LoopState};

/// Consecutive failed cycles before the session is re-authenticated.
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// The coordination loop: owns the loop state and drives the throttle
/// from the monitor's answers.
pub struct SpeedCoordinator {
    config: CoordinatorConfig,
    monitor: Arc<dyn PlaybackMonitor>,
    throttle: ThrottleController,
    state: LoopState,
}

impl SpeedCoordinator {
    /// Create a new coordinator. State starts as "not playing, not
    /// throttled"; nothing is read back from the backends until the first
    /// cycle.
    pub fn new(
        config: CoordinatorConfig,
        monitor: Arc<dyn PlaybackMonitor>,
        throttle: ThrottleController,
    ) -> Self {
        Self {
            config,
            monitor,
            throttle,
            state: LoopState::new(),
        }
    }

    /// Last believed playback state.
    pub fn playback_active(&self) -> bool {
        self.state.playback_active
    }

    /// Failed cycles since the last clean one.
    pub fn consecutive_errors(&self) -> u32 {
        self.state.consecutive_errors
    }

    /// Run until the shutdown signal fires. The loop has no terminal state
    /// of its own.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        info!("Coordination loop started");
        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    info!("Coordination loop received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(Duration::from_millis(self.config.poll_interval_ms)) => {
                    self.tick().await;
                }
            }
        }
        info!("Coordination loop stopped");
    }

    /// One scheduled tick: run the cycle and apply the error bookkeeping.
    /// No error escapes this boundary.
    pub async fn tick(&mut self) {
        match self.run_cycle().await {
            Ok(()) => {
                self.state.consecutive_errors = 0;
            }
            Err(e) => {
                self.state.consecutive_errors += 1;
                warn!(
                    "Cycle failed ({} consecutive): {}",
                    self.state.consecutive_errors, e
                );
                if self.state.consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    error!(
                        "Too many consecutive errors ({}), re-authenticating session",
                        self.state.consecutive_errors
                    );
                    match self.throttle.authenticate().await {
                        Ok(true) => info!("Session re-established"),
                        _ => error!("Re-authentication failed, waiting for next cycle"),
                    }
                }
            }
        }
    }

    /// Evaluate one poll cycle.
    pub async fn run_cycle(&mut self) -> Result<(), CoordinatorError> {
        let playing = self.monitor.has_active_playback().await?;
        let now = Instant::now();

        if playing && !self.state.playback_active {
            self.start_throttling(now).await?;
        } else if !playing && self.state.playback_active {
            self.stop_throttling_after_grace(now).await?;
        } else if self.state.playback_active {
            self.heal_drift(now).await?;
        }

        Ok(())
    }

    /// Idle -> Active: playback appeared, throttle down.
    async fn start_throttling(&mut self, now: Instant) -> Result<(), CoordinatorError> {
        if !self.min_interval_elapsed(now) {
            debug!("Playback detected inside the min change interval, deferring");
            return Ok(());
        }

        if self.throttle.set_mode(ThrottleMode::Throttled).await? {
            self.state.playback_active = true;
            self.state.last_change_at = now;
            info!("Playback detected, alternative speed limits enabled");
        }
        Ok(())
    }

    /// Active -> Idle: playback gone, wait out the grace period and
    /// confirm before restoring full speed. The guard is checked against
    /// the cycle-start timestamp captured before the wait.
    async fn stop_throttling_after_grace(&mut self, now: Instant) -> Result<(), CoordinatorError> {
        debug!(
            "No playback, waiting {}ms before restoring full speed",
            self.config.grace_period_ms
        );
        tokio::time::sleep(Duration::from_millis(self.config.grace_period_ms)).await;

        if self.monitor.has_active_playback().await? {
            debug!("Playback resumed during the grace period, keeping throttle");
            return Ok(());
        }

        if !self.min_interval_elapsed(now) {
            debug!("Stop confirmed but inside the min change interval, deferring");
            return Ok(());
        }

        if self.throttle.set_mode(ThrottleMode::Unthrottled).await? {
            self.state.playback_active = false;
            self.state.last_change_at = now;
            info!("Playback stopped, alternative speed limits disabled");
        }
        Ok(())
    }

    /// Active steady state: verify nothing flipped the throttle back
    /// externally while playback continues. An `Unknown` reading does
    /// nothing; the next cycle re-checks.
    async fn heal_drift(&mut self, now: Instant) -> Result<(), CoordinatorError> {
        if self.throttle.current_mode().await? != ModeReading::Unthrottled {
            return Ok(());
        }

        warn!("Throttle was disabled externally while playback is active");
        if !self.min_interval_elapsed(now) {
            return Ok(());
        }

        if self.throttle.set_mode(ThrottleMode::Throttled).await? {
            self.state.last_change_at = now;
            info!("Alternative speed limits re-enabled");
        }
        Ok(())
    }

    fn min_interval_elapsed(&self, now: Instant) -> bool {
        now.duration_since(self.state.last_change_at)
            >= Duration::from_millis(self.config.min_change_interval_ms)
    }
}
