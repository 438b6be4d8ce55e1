//! Mock playback monitor for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::playback::{MonitorError, PlaybackMonitor};

/// Mock implementation of the PlaybackMonitor trait.
///
/// Answers from a scripted queue first, then from a steady value, so tests
/// can express both per-query sequences (the grace-period re-query) and a
/// stable background state.
#[derive(Debug, Default)]
pub struct MockPlaybackMonitor {
    /// Scripted answers, consumed front to back.
    scripted: Mutex<VecDeque<Result<bool, MonitorError>>>,
    /// Answer once the script is exhausted.
    steady: AtomicBool,
    /// Number of queries served.
    query_count: AtomicU32,
}

impl MockPlaybackMonitor {
    /// Create a mock reporting no playback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the steady answer used when no scripted answer is queued.
    pub fn set_playing(&self, playing: bool) {
        self.steady.store(playing, Ordering::SeqCst);
    }

    /// Queue one scripted answer.
    pub fn push_response(&self, response: Result<bool, MonitorError>) {
        self.scripted.lock().unwrap().push_back(response);
    }

    /// Queue an error answer.
    pub fn push_error(&self, error: MonitorError) {
        self.push_response(Err(error));
    }

    /// Number of queries served so far.
    pub fn query_count(&self) -> u32 {
        self.query_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaybackMonitor for MockPlaybackMonitor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn has_active_playback(&self) -> Result<bool, MonitorError> {
        self.query_count.fetch_add(1, Ordering::SeqCst);

        if let Some(response) = self.scripted.lock().unwrap().pop_front() {
            return response;
        }
        Ok(self.steady.load(Ordering::SeqCst))
    }
}
