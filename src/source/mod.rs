//! Depth camera drivers.
//!
//! This module defines the `CaptureSource` capability and its implementors:
//! - Intel RealSense devices (`realsense`)
//! - Instrumented stub camera (`stub`, testing)
//!
//! A driver is responsible for:
//! - One-shot session configuration (resolution, frame rate)
//! - Producing one frame per `capture_frame` call, in-memory
//!
//! A driver MUST NOT:
//! - Spawn long-lived threads of its own (the controller owns the capture loop)
//! - Block for more than a small fraction of the frame interval

pub mod realsense;
pub mod stub;

pub use realsense::RealSenseCamera;
pub use stub::{StubCamera, StubCameraState};

use anyhow::Result;

/// Depth camera driver trait.
///
/// Implementations are driven by a single dedicated capture thread: `configure`
/// is called once per device session before streaming starts, then
/// `capture_frame` is called repeatedly in a paced loop.
///
/// Re-configuring an already configured session is driver-defined; the
/// lifecycle layer never does it while a stream is running.
pub trait CaptureSource: Send {
    /// Driver identifier, used in logs.
    fn name(&self) -> &'static str;

    /// One-shot session setup. All parameters must be strictly positive.
    ///
    /// An `Err` means no session was established and no stream may start
    /// until a subsequent `configure` succeeds.
    fn configure(&mut self, width: u32, height: u32, fps: u32) -> Result<()>;

    /// Perform one capture step.
    ///
    /// Must be safe to call repeatedly in a tight loop from a single thread.
    /// A failed frame is logged and skipped by the capture loop; it does not
    /// stop the stream.
    fn capture_frame(&mut self) -> Result<()>;
}
