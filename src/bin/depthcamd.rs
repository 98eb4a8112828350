//! depthcamd - depth camera streaming daemon
//!
//! Configures the selected driver, starts the capture loop, and streams until
//! the requested duration elapses or a shutdown signal arrives.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::mpsc;
use std::time::Duration;

use depthcam::{
    CaptureSource, DepthCameraService, RealSenseCamera, ServiceConfig, StubCamera,
};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Streaming duration in seconds (default: run until Ctrl-C).
    #[arg(long)]
    seconds: Option<u64>,
    /// Driver override: "realsense" or "stub".
    #[arg(long, env = "DEPTHCAM_DRIVER")]
    driver: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut cfg = ServiceConfig::load()?;
    if let Some(driver) = args.driver {
        cfg.camera.driver = driver;
    }
    if args.seconds.is_some() {
        cfg.stream_secs = args.seconds;
    }

    match cfg.camera.driver.as_str() {
        "realsense" => run(RealSenseCamera::new(), &cfg),
        "stub" => run(StubCamera::new(), &cfg),
        other => Err(anyhow!("unknown driver '{}'; expected realsense or stub", other)),
    }
}

fn run<S: CaptureSource + 'static>(camera: S, cfg: &ServiceConfig) -> Result<()> {
    let mut service = DepthCameraService::new(camera);

    service.init(cfg.camera.width, cfg.camera.height, cfg.camera.fps)?;
    if !service.start() {
        return Err(anyhow!("failed to start streaming"));
    }
    log::info!(
        "depthcamd streaming {}x{} @ {} fps ({})",
        cfg.camera.width,
        cfg.camera.height,
        cfg.camera.fps,
        cfg.camera.driver
    );

    match cfg.stream_secs {
        Some(secs) => {
            log::info!("streaming for {} seconds...", secs);
            std::thread::sleep(Duration::from_secs(secs));
        }
        None => {
            let (tx, rx) = mpsc::channel();
            ctrlc::set_handler(move || {
                let _ = tx.send(());
            })
            .expect("error setting Ctrl-C handler");
            log::info!("depthcamd waiting for shutdown signal (Ctrl-C)...");
            let _ = rx.recv();
            log::info!("shutdown signal received, stopping stream...");
        }
    }

    service.stop();
    log::info!("streaming stopped");
    Ok(())
}
