use std::sync::Arc;
use std::time::{Duration, Instant};

use tuneye_engine::{
    DetectEvent, DetectionHandle, DetectionInput, DetectorSettings, HttpDetector, InputKind,
    SettingsSnapshot, TestModeDetector,
};

fn wait_for_event(handle: &DetectionHandle, timeout: Duration) -> Option<DetectEvent> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(event) = handle.try_recv() {
            return Some(event);
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    None
}

#[test]
fn test_mode_request_finishes_without_a_service() {
    // The HTTP detector points at a dead port; test mode must never use it.
    let http = Arc::new(HttpDetector::new(DetectorSettings {
        endpoint: "http://127.0.0.1:9/api/process".to_string(),
        ..DetectorSettings::default()
    }));
    let test_mode = Arc::new(TestModeDetector::new(Duration::from_millis(10)));
    let handle = DetectionHandle::with_detectors(http, test_mode);

    handle.detect(DetectionInput {
        kind: InputKind::Text,
        value: "Breaking: ...".to_string(),
        settings: SettingsSnapshot {
            enable_test_mode: true,
            ..SettingsSnapshot::default()
        },
    });

    let event = wait_for_event(&handle, Duration::from_secs(2)).expect("event arrives");
    let DetectEvent::Finished { result } = event;
    let report = result.expect("test mode path succeeds");
    assert_eq!(report.words.len(), 5);
}

#[test]
fn real_request_failure_surfaces_as_finished_error() {
    let http = Arc::new(HttpDetector::new(DetectorSettings {
        endpoint: "http://127.0.0.1:9/api/process".to_string(),
        connect_timeout: Duration::from_millis(100),
        request_timeout: Duration::from_millis(200),
    }));
    let test_mode = Arc::new(TestModeDetector::new(Duration::from_millis(10)));
    let handle = DetectionHandle::with_detectors(http, test_mode);

    handle.detect(DetectionInput {
        kind: InputKind::Text,
        value: "Breaking: ...".to_string(),
        settings: SettingsSnapshot::default(),
    });

    let event = wait_for_event(&handle, Duration::from_secs(5)).expect("event arrives");
    let DetectEvent::Finished { result } = event;
    assert!(result.is_err());
}
