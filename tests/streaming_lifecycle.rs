use std::thread;
use std::time::{Duration, Instant};

use depthcam::{DepthCameraService, StubCamera};

#[test]
fn stop_without_start_is_a_noop() {
    let camera = StubCamera::new();
    let state = camera.state();
    let mut service = DepthCameraService::new(camera);

    service.stop();
    service.stop();

    assert!(!service.is_streaming());
    assert_eq!(state.frames_captured(), 0);
}

#[test]
fn double_start_is_rejected_with_single_worker() {
    let camera = StubCamera::new();
    let state = camera.state();
    let mut service = DepthCameraService::new(camera);

    service.init(640, 480, 30).expect("init");
    assert!(service.start());
    assert!(!service.start());

    thread::sleep(Duration::from_millis(100));
    service.stop();

    // A duplicate capture loop would eventually overlap with the first.
    assert_eq!(state.max_concurrent_captures(), 1);
}

#[test]
fn shutdown_latency_is_bounded() {
    let camera = StubCamera::new();
    let mut service = DepthCameraService::new(camera);

    service.init(640, 480, 30).expect("init");
    assert!(service.start());
    thread::sleep(Duration::from_millis(50));

    let begin = Instant::now();
    service.stop();
    // One capture-plus-sleep period is ~33 ms; allow generous headroom.
    assert!(
        begin.elapsed() < Duration::from_millis(250),
        "stop took {:?}",
        begin.elapsed()
    );
}

#[test]
fn configure_failure_gates_start() {
    let camera = StubCamera::failing_configure();
    let state = camera.state();
    let mut service = DepthCameraService::new(camera);

    assert!(service.init(640, 480, 30).is_err());
    assert!(!service.start());
    assert!(!service.is_streaming());

    thread::sleep(Duration::from_millis(80));
    assert_eq!(state.frames_captured(), 0);
}

#[test]
fn failed_reinit_rearms_the_gate() {
    let camera = StubCamera::new();
    let state = camera.state();
    let mut service = DepthCameraService::new(camera);

    service.init(640, 480, 30).expect("init");
    assert!(service.init(0, 480, 30).is_err());

    assert!(!service.start());
    assert!(!service.is_streaming());
    thread::sleep(Duration::from_millis(80));
    assert_eq!(state.frames_captured(), 0);

    service.init(640, 480, 30).expect("re-init");
    assert!(service.start());
    service.stop();
}

#[test]
fn start_refused_before_init() {
    let camera = StubCamera::new();
    let state = camera.state();
    let mut service = DepthCameraService::new(camera);

    assert!(!service.start());
    assert_eq!(state.frames_captured(), 0);
}

#[test]
fn stream_then_stop_records_frames_and_halts() {
    let camera = StubCamera::new();
    let state = camera.state();
    let mut service = DepthCameraService::new(camera);

    service.init(640, 480, 30).expect("init");
    assert!(service.start());
    assert!(service.is_streaming());

    thread::sleep(Duration::from_millis(150));
    assert!(
        state.frames_captured() >= 2,
        "expected at least 2 frames, got {}",
        state.frames_captured()
    );

    service.stop();
    assert!(!service.is_streaming());

    let frames_at_stop = state.frames_captured();
    thread::sleep(Duration::from_millis(120));
    assert_eq!(
        state.frames_captured(),
        frames_at_stop,
        "frames captured after stop returned"
    );
}

#[test]
fn restart_after_stop_streams_again() {
    let camera = StubCamera::new();
    let state = camera.state();
    let mut service = DepthCameraService::new(camera);

    service.init(320, 240, 30).expect("init");
    assert!(service.start());
    thread::sleep(Duration::from_millis(80));
    service.stop();
    let after_first = state.frames_captured();

    assert!(service.start());
    thread::sleep(Duration::from_millis(80));
    service.stop();

    assert!(state.frames_captured() > after_first);
    assert_eq!(state.max_concurrent_captures(), 1);
}
