//! Mock throttle session for testing.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::throttle::{ModeReading, ThrottleError, ThrottleMode, ThrottleSession};

/// Mock implementation of the ThrottleSession trait.
///
/// Provides controllable behavior for testing:
/// - Track login/read/toggle calls for assertions
/// - Flip the mode externally to simulate drift
/// - Make toggles silently fail to apply (never-confirming backend)
/// - Inject errors
#[derive(Debug)]
pub struct MockThrottleSession {
    mode: Mutex<ThrottleMode>,
    /// When false, toggles are accepted but have no effect.
    toggles_stick: AtomicBool,
    /// When true, mode reads answer `Unknown`.
    reads_unknown: AtomicBool,
    /// Whether login attempts succeed.
    login_ok: AtomicBool,
    /// If set, the next primitive call fails with this error.
    next_error: Mutex<Option<ThrottleError>>,
    login_count: AtomicU32,
    read_count: AtomicU32,
    toggle_count: AtomicU32,
}

impl MockThrottleSession {
    /// Create a mock session with the given starting mode.
    pub fn new(initial: ThrottleMode) -> Self {
        Self {
            mode: Mutex::new(initial),
            toggles_stick: AtomicBool::new(true),
            reads_unknown: AtomicBool::new(false),
            login_ok: AtomicBool::new(true),
            next_error: Mutex::new(None),
            login_count: AtomicU32::new(0),
            read_count: AtomicU32::new(0),
            toggle_count: AtomicU32::new(0),
        }
    }

    /// Current mode held by the mock backend.
    pub fn current_mode(&self) -> ThrottleMode {
        *self.mode.lock().unwrap()
    }

    /// Set the mode directly, as an external actor would.
    pub fn set_current_mode(&self, mode: ThrottleMode) {
        *self.mode.lock().unwrap() = mode;
    }

    /// Control whether toggles take effect. With `false` the backend
    /// accepts every toggle but the mode never changes.
    pub fn set_toggles_stick(&self, stick: bool) {
        self.toggles_stick.store(stick, Ordering::SeqCst);
    }

    /// Control whether mode reads answer `Unknown`.
    pub fn set_reads_unknown(&self, unknown: bool) {
        self.reads_unknown.store(unknown, Ordering::SeqCst);
    }

    /// Control whether login attempts succeed.
    pub fn set_login_ok(&self, ok: bool) {
        self.login_ok.store(ok, Ordering::SeqCst);
    }

    /// Configure the next primitive call to fail with the given error.
    pub fn set_next_error(&self, error: ThrottleError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Number of login calls.
    pub fn login_count(&self) -> u32 {
        self.login_count.load(Ordering::SeqCst)
    }

    /// Number of mode reads.
    pub fn read_count(&self) -> u32 {
        self.read_count.load(Ordering::SeqCst)
    }

    /// Number of toggle commands.
    pub fn toggle_count(&self) -> u32 {
        self.toggle_count.load(Ordering::SeqCst)
    }

    fn take_error(&self) -> Option<ThrottleError> {
        self.next_error.lock().unwrap().take()
    }
}

#[async_trait]
impl ThrottleSession for MockThrottleSession {
    fn name(&self) -> &str {
        "mock"
    }

    async fn login(&self) -> Result<bool, ThrottleError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.login_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.login_ok.load(Ordering::SeqCst))
    }

    async fn read_mode(&self) -> Result<ModeReading, ThrottleError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.read_count.fetch_add(1, Ordering::SeqCst);

        if self.reads_unknown.load(Ordering::SeqCst) {
            return Ok(ModeReading::Unknown);
        }
        Ok(ModeReading::from(self.current_mode()))
    }

    async fn toggle(&self) -> Result<(), ThrottleError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        self.toggle_count.fetch_add(1, Ordering::SeqCst);

        if self.toggles_stick.load(Ordering::SeqCst) {
            let mut mode = self.mode.lock().unwrap();
            *mode = match *mode {
                ThrottleMode::Throttled => ThrottleMode::Unthrottled,
                ThrottleMode::Unthrottled => ThrottleMode::Throttled,
            };
        }
        Ok(())
    }
}
