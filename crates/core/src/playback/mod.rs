//! Playback monitoring abstraction.
//!
//! This module provides a `PlaybackMonitor` trait for answering "is anything
//! playing right now?" against a media monitoring service (Tautulli).

mod tautulli;
mod types;

pub use tautulli::TautulliMonitor;
pub use types::*;
