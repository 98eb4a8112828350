//! Intel RealSense depth camera driver.
//!
//! The driver is responsible for:
//! - Validating the requested mode (resolution, frame rate)
//! - Refusing to configure outside the sensor's operating temperature range
//! - Producing one depth frame per capture call, in-memory
//!
//! Frame synthesis is a stand-in for the SDK capture call: the device session
//! bookkeeping and the lifecycle contract are real, the pixels are a
//! deterministic gradient.

use anyhow::{anyhow, Result};

use super::CaptureSource;

/// Lower bound of the valid operating temperature range (inclusive).
pub const MIN_OPERATING_TEMP_C: f32 = 15.0;
/// Upper bound of the valid operating temperature range (inclusive).
pub const MAX_OPERATING_TEMP_C: f32 = 35.0;

/// Returns true when the sensor temperature is within the valid operating
/// range (15-35 C, boundaries included).
pub fn temperature_in_range(temperature_c: f32) -> bool {
    (MIN_OPERATING_TEMP_C..=MAX_OPERATING_TEMP_C).contains(&temperature_c)
}

/// Configured capture mode for a device session.
#[derive(Clone, Copy, Debug)]
struct CaptureMode {
    width: u32,
    height: u32,
    fps: u32,
}

/// Intel RealSense depth camera.
pub struct RealSenseCamera {
    mode: Option<CaptureMode>,
    /// Reported sensor temperature. Real hardware would query this from the
    /// SDK; here it is injected at construction so configure-time validation
    /// is exercised.
    temperature_c: f32,
    frame_count: u64,
    last_frame: Vec<u16>,
}

impl RealSenseCamera {
    pub fn new() -> Self {
        Self::with_temperature(25.0)
    }

    /// Construct with an explicit reported sensor temperature.
    pub fn with_temperature(temperature_c: f32) -> Self {
        Self {
            mode: None,
            temperature_c,
            frame_count: 0,
            last_frame: Vec::new(),
        }
    }

    /// Total frames captured in this session.
    pub fn frames_captured(&self) -> u64 {
        self.frame_count
    }

    /// Generate synthetic 16-bit depth data for one frame.
    ///
    /// Mixes position and frame count so successive frames differ, mimicking
    /// a scene with slow depth drift.
    fn generate_depth_frame(&mut self, mode: CaptureMode) -> Vec<u16> {
        let pixel_count = mode.width as usize * mode.height as usize;
        let mut depth = vec![0u16; pixel_count];
        for (i, sample) in depth.iter_mut().enumerate() {
            *sample = ((i as u64 + self.frame_count * 7) % u64::from(u16::MAX)) as u16;
        }
        depth
    }
}

impl Default for RealSenseCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSource for RealSenseCamera {
    fn name(&self) -> &'static str {
        "realsense"
    }

    fn configure(&mut self, width: u32, height: u32, fps: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(anyhow!("resolution must be non-zero, got {width}x{height}"));
        }
        if fps == 0 {
            return Err(anyhow!("fps must be >= 1"));
        }
        if !temperature_in_range(self.temperature_c) {
            return Err(anyhow!(
                "sensor temperature {:.1} C outside operating range {:.0}-{:.0} C",
                self.temperature_c,
                MIN_OPERATING_TEMP_C,
                MAX_OPERATING_TEMP_C
            ));
        }
        self.mode = Some(CaptureMode { width, height, fps });
        self.frame_count = 0;
        log::info!("RealSenseCamera: configured {}x{} @ {} fps", width, height, fps);
        Ok(())
    }

    fn capture_frame(&mut self) -> Result<()> {
        let mode = self
            .mode
            .ok_or_else(|| anyhow!("capture_frame called before configure"))?;
        self.frame_count += 1;
        self.last_frame = self.generate_depth_frame(mode);
        log::trace!("RealSenseCamera: captured frame #{}", self.frame_count);
        Ok(())
    }
}
