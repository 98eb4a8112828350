//! Depth camera streaming service.
//!
//! This crate implements the configure/start/stop lifecycle for depth camera
//! devices. The core is `StreamingController`, which owns a background capture
//! loop and enforces:
//!
//! 1. **Single stream**: at most one capture worker is alive at any time;
//!    double starts are rejected, never duplicated.
//! 2. **Race-free shutdown**: stopping flips an atomic flag and joins the
//!    worker, so no capture call is in flight after stop returns.
//! 3. **Idempotent stop**: stopping an idle controller is a silent no-op.
//! 4. **Configuration gate**: a stream cannot start until the driver has been
//!    configured successfully.
//!
//! # Module Structure
//!
//! - `source`: the `CaptureSource` driver trait and implementors (RealSense, stub)
//! - `controller`: the streaming lifecycle state machine and capture loop
//! - `service`: thin facade composing a driver with a controller
//! - `config`: depthcamd configuration (file + env)

pub mod config;
pub mod controller;
pub mod service;
pub mod source;

pub use config::{CameraSettings, ServiceConfig};
pub use controller::{StreamingController, FRAME_INTERVAL};
pub use service::DepthCameraService;
pub use source::{CaptureSource, RealSenseCamera, StubCamera, StubCameraState};
