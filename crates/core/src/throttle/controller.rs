//! Throttle controller with the confirm-after-toggle protocol.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::{ModeReading, ThrottleError, ThrottleMode, ThrottleSession};

/// Attempts per `set_mode` call before reporting failure.
const MAX_TOGGLE_ATTEMPTS: u32 = 3;

const DEFAULT_CONFIRM_DELAY: Duration = Duration::from_millis(1000);
const DEFAULT_TOGGLE_BACKOFF: Duration = Duration::from_millis(2000);

/// Drives the torrent client's throttle mode through a [`ThrottleSession`].
///
/// The mode toggle endpoint gives no feedback of its own, so every change
/// is verified by re-reading the mode after a short settle delay and
/// retried up to [`MAX_TOGGLE_ATTEMPTS`] times. An exhausted retry budget
/// is a reported failure, not a process error; the caller's next cycle
/// re-decides from scratch.
pub struct ThrottleController {
    session: Arc<dyn ThrottleSession>,
    confirm_delay: Duration,
    toggle_backoff: Duration,
}

impl ThrottleController {
    /// Create a new controller with default timing.
    pub fn new(session: Arc<dyn ThrottleSession>) -> Self {
        Self {
            session,
            confirm_delay: DEFAULT_CONFIRM_DELAY,
            toggle_backoff: DEFAULT_TOGGLE_BACKOFF,
        }
    }

    /// Set the wait between issuing a toggle and re-reading the mode.
    pub fn with_confirm_delay(mut self, delay: Duration) -> Self {
        self.confirm_delay = delay;
        self
    }

    /// Set the wait between failed toggle attempts.
    pub fn with_toggle_backoff(mut self, backoff: Duration) -> Self {
        self.toggle_backoff = backoff;
        self
    }

    /// Log in to the torrent client. Any failure is logged and reported as
    /// false; the caller decides whether that is fatal (startup) or
    /// retryable (the loop's recovery path).
    pub async fn authenticate(&self) -> Result<bool, ThrottleError> {
        match self.session.login().await {
            Ok(true) => {
                info!("Authenticated against {}", self.session.name());
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                error!("Login to {} failed: {}", self.session.name(), e);
                Ok(false)
            }
        }
    }

    /// Read the current throttle mode. Transport failures are logged and
    /// reported as `Unknown`; an expired session propagates so the loop's
    /// recovery path can re-authenticate.
    pub async fn current_mode(&self) -> Result<ModeReading, ThrottleError> {
        match self.session.read_mode().await {
            Ok(reading) => Ok(reading),
            Err(ThrottleError::SessionExpired) => Err(ThrottleError::SessionExpired),
            Err(e) => {
                warn!("Throttle mode query failed: {}", e);
                Ok(ModeReading::Unknown)
            }
        }
    }

    /// Drive the throttle into `desired` mode and confirm it took effect.
    ///
    /// Returns `Ok(true)` once a mode read matches `desired` (including the
    /// idempotent case where it already did), `Ok(false)` after exhausting
    /// the retry budget. Transport failures inside an attempt are retried
    /// after a backoff; only an expired session cuts the attempts short.
    pub async fn set_mode(&self, desired: ThrottleMode) -> Result<bool, ThrottleError> {
        for attempt in 1..=MAX_TOGGLE_ATTEMPTS {
            match self.try_toggle(desired).await {
                Ok(true) => {
                    info!("Throttle mode set to {}", desired.as_str());
                    return Ok(true);
                }
                Ok(false) => {
                    warn!(
                        "Throttle change to {} did not apply, attempt {}/{}",
                        desired.as_str(),
                        attempt,
                        MAX_TOGGLE_ATTEMPTS
                    );
                }
                Err(ThrottleError::SessionExpired) => return Err(ThrottleError::SessionExpired),
                Err(e) => {
                    warn!("Throttle change to {} failed: {}", desired.as_str(), e);
                    if attempt < MAX_TOGGLE_ATTEMPTS {
                        tokio::time::sleep(self.toggle_backoff).await;
                    }
                }
            }
        }

        error!(
            "Could not set throttle mode to {} after {} attempts",
            desired.as_str(),
            MAX_TOGGLE_ATTEMPTS
        );
        Ok(false)
    }

    /// One toggle attempt: read, toggle if needed, settle, confirm.
    async fn try_toggle(&self, desired: ThrottleMode) -> Result<bool, ThrottleError> {
        let current = self.session.read_mode().await?;
        if current.matches(desired) {
            debug!("Throttle already {}", desired.as_str());
            return Ok(true);
        }

        self.session.toggle().await?;

        // Give the backend a moment to apply the change before confirming.
        tokio::time::sleep(self.confirm_delay).await;

        let confirmed = self.session.read_mode().await?;
        Ok(confirmed.matches(desired))
    }
}
