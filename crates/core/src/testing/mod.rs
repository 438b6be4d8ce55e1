//! Testing utilities and mock implementations for integration tests.
//!
//! This module provides mock implementations of the external service
//! traits, allowing the coordination loop to be exercised without real
//! infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use playbrake_core::testing::{MockPlaybackMonitor, MockThrottleSession};
//!
//! let monitor = MockPlaybackMonitor::new();
//! let session = MockThrottleSession::new(ThrottleMode::Unthrottled);
//!
//! // Configure mock behavior
//! monitor.set_playing(true);
//! session.set_toggles_stick(false);
//! ```

mod mock_monitor;
mod mock_session;

pub use mock_monitor::MockPlaybackMonitor;
pub use mock_session::MockThrottleSession;
