use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tuneye_logging::tuneye_warn;

use crate::detect::{Detector, DetectorSettings, HttpDetector};
use crate::testmode::TestModeDetector;
use crate::{DetectEvent, DetectionInput};

enum EngineCommand {
    Detect { input: DetectionInput },
}

/// Handle to the background detection worker: a dedicated thread owning a
/// tokio runtime. One `DetectEvent::Finished` is emitted per request; the
/// caller's stage machine keeps at most one request outstanding.
#[derive(Clone)]
pub struct DetectionHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<DetectEvent>>>,
}

impl DetectionHandle {
    pub fn new(settings: DetectorSettings) -> Self {
        Self::with_detectors(
            Arc::new(HttpDetector::new(settings)),
            Arc::new(TestModeDetector::default()),
        )
    }

    /// Builds a handle around explicit detectors; `new` wires the default
    /// HTTP and test-mode pair.
    pub fn with_detectors(http: Arc<dyn Detector>, test_mode: Arc<dyn Detector>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    tuneye_warn!("detection runtime failed to start: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let http = http.clone();
                let test_mode = test_mode.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(http.as_ref(), test_mode.as_ref(), command, event_tx).await;
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn detect(&self, input: DetectionInput) {
        let _ = self.cmd_tx.send(EngineCommand::Detect { input });
    }

    pub fn try_recv(&self) -> Option<DetectEvent> {
        self.event_rx
            .lock()
            .ok()
            .and_then(|event_rx| event_rx.try_recv().ok())
    }
}

async fn handle_command(
    http: &dyn Detector,
    test_mode: &dyn Detector,
    command: EngineCommand,
    event_tx: mpsc::Sender<DetectEvent>,
) {
    match command {
        EngineCommand::Detect { input } => {
            // The bypass and the real call share one completion path so the
            // rest of the system cannot tell them apart.
            let detector = if input.settings.enable_test_mode {
                test_mode
            } else {
                http
            };
            let result = detector.detect(&input).await;
            let _ = event_tx.send(DetectEvent::Finished { result });
        }
    }
}
