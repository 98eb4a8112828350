//! Stub camera for testing.
//!
//! Counts capture calls with atomics so tests can prove lifecycle properties
//! (exactly one capture loop, no captures after stop) after the camera has
//! been moved into a service.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};

use super::CaptureSource;

/// Shared observation handle for a `StubCamera`.
#[derive(Default)]
pub struct StubCameraState {
    frames: AtomicU64,
    in_capture: AtomicU32,
    max_in_capture: AtomicU32,
    configured: AtomicBool,
}

impl StubCameraState {
    /// Total `capture_frame` calls recorded.
    pub fn frames_captured(&self) -> u64 {
        self.frames.load(Ordering::SeqCst)
    }

    /// Highest number of `capture_frame` calls observed in flight at once.
    /// Anything above 1 means a duplicate capture loop existed.
    pub fn max_concurrent_captures(&self) -> u32 {
        self.max_in_capture.load(Ordering::SeqCst)
    }

    /// Whether a `configure` call has succeeded.
    pub fn is_configured(&self) -> bool {
        self.configured.load(Ordering::SeqCst)
    }
}

/// Stub camera. Capture is near-instant and never fails.
pub struct StubCamera {
    state: Arc<StubCameraState>,
    fail_configure: bool,
}

impl StubCamera {
    pub fn new() -> Self {
        Self {
            state: Arc::new(StubCameraState::default()),
            fail_configure: false,
        }
    }

    /// A stub whose `configure` always fails.
    pub fn failing_configure() -> Self {
        Self {
            fail_configure: true,
            ..Self::new()
        }
    }

    /// Observation handle, valid after the camera is moved away.
    pub fn state(&self) -> Arc<StubCameraState> {
        Arc::clone(&self.state)
    }
}

impl Default for StubCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSource for StubCamera {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn configure(&mut self, width: u32, height: u32, fps: u32) -> Result<()> {
        if self.fail_configure {
            return Err(anyhow!("stub camera configured to fail"));
        }
        if width == 0 || height == 0 || fps == 0 {
            return Err(anyhow!("resolution and fps must be non-zero"));
        }
        self.state.configured.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<()> {
        let entered = self.state.in_capture.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_capture.fetch_max(entered, Ordering::SeqCst);
        self.state.frames.fetch_add(1, Ordering::SeqCst);
        self.state.in_capture.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}
