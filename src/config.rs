//! depthcamd configuration.
//!
//! Load order: defaults, then an optional JSON config file named by
//! `DEPTHCAM_CONFIG`, then environment overrides, then validation.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_DRIVER: &str = "realsense";
const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 480;
const DEFAULT_FPS: u32 = 30;

#[derive(Debug, Deserialize, Default)]
struct ServiceConfigFile {
    camera: Option<CameraConfigFile>,
    stream_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct CameraConfigFile {
    driver: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    fps: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub camera: CameraSettings,
    /// Fixed streaming duration; `None` means run until a shutdown signal.
    pub stream_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct CameraSettings {
    /// Driver name: "realsense" or "stub".
    pub driver: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl ServiceConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("DEPTHCAM_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: ServiceConfigFile) -> Self {
        let camera = CameraSettings {
            driver: file
                .camera
                .as_ref()
                .and_then(|camera| camera.driver.clone())
                .unwrap_or_else(|| DEFAULT_DRIVER.to_string()),
            width: file
                .camera
                .as_ref()
                .and_then(|camera| camera.width)
                .unwrap_or(DEFAULT_WIDTH),
            height: file
                .camera
                .as_ref()
                .and_then(|camera| camera.height)
                .unwrap_or(DEFAULT_HEIGHT),
            fps: file
                .camera
                .as_ref()
                .and_then(|camera| camera.fps)
                .unwrap_or(DEFAULT_FPS),
        };
        Self {
            camera,
            stream_secs: file.stream_secs,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(driver) = std::env::var("DEPTHCAM_DRIVER") {
            if !driver.trim().is_empty() {
                self.camera.driver = driver;
            }
        }
        if let Ok(width) = std::env::var("DEPTHCAM_WIDTH") {
            self.camera.width = width
                .parse()
                .map_err(|_| anyhow!("DEPTHCAM_WIDTH must be an integer"))?;
        }
        if let Ok(height) = std::env::var("DEPTHCAM_HEIGHT") {
            self.camera.height = height
                .parse()
                .map_err(|_| anyhow!("DEPTHCAM_HEIGHT must be an integer"))?;
        }
        if let Ok(fps) = std::env::var("DEPTHCAM_FPS") {
            self.camera.fps = fps
                .parse()
                .map_err(|_| anyhow!("DEPTHCAM_FPS must be an integer"))?;
        }
        if let Ok(secs) = std::env::var("DEPTHCAM_STREAM_SECS") {
            self.stream_secs = Some(
                secs.parse()
                    .map_err(|_| anyhow!("DEPTHCAM_STREAM_SECS must be an integer number of seconds"))?,
            );
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(anyhow!(
                "resolution must be non-zero, got {}x{}",
                self.camera.width,
                self.camera.height
            ));
        }
        if self.camera.fps == 0 {
            return Err(anyhow!("fps must be >= 1"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<ServiceConfigFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let cfg = serde_json::from_str(&raw)
        .with_context(|| format!("parse config file {}", path.display()))?;
    Ok(cfg)
}
