//! Depth camera service facade.
//!
//! Composes a driver with a `StreamingController` and forwards the
//! init/start/stop lifecycle. The only logic of its own is the configuration
//! gate: a stream cannot start until `init` has succeeded.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};

use crate::controller::StreamingController;
use crate::source::CaptureSource;

/// Lifecycle facade over one depth camera.
pub struct DepthCameraService<S: CaptureSource + 'static> {
    source: Arc<Mutex<S>>,
    controller: StreamingController<S>,
    configured: bool,
}

impl<S: CaptureSource + 'static> DepthCameraService<S> {
    pub fn new(source: S) -> Self {
        let source = Arc::new(Mutex::new(source));
        Self {
            controller: StreamingController::new(Arc::clone(&source)),
            source,
            configured: false,
        }
    }

    /// Configure the device session. Must succeed before `start` is allowed.
    ///
    /// A failed call disarms the gate again: after an unsuccessful re-init,
    /// `start` is refused until a later `init` succeeds.
    pub fn init(&mut self, width: u32, height: u32, fps: u32) -> Result<()> {
        self.configured = false;
        let mut source = self
            .source
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        source
            .configure(width, height, fps)
            .with_context(|| format!("{}: configure failed", source.name()))?;
        self.configured = true;
        Ok(())
    }

    /// Start streaming. Returns `false` when not yet configured or when a
    /// stream is already running.
    pub fn start(&mut self) -> bool {
        if !self.configured {
            log::warn!("start refused: camera not configured");
            return false;
        }
        self.controller.start_streaming()
    }

    /// Stop streaming. Idempotent; never fails.
    pub fn stop(&mut self) {
        self.controller.stop_streaming();
    }

    /// Whether a stream is currently running.
    pub fn is_streaming(&self) -> bool {
        self.controller.is_streaming()
    }
}
