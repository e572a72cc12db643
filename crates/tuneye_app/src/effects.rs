use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tuneye_core::{Effect, Msg};
use tuneye_engine::{DetectEvent, DetectionHandle, DetectorSettings};
use tuneye_logging::{tuneye_info, tuneye_warn};

use crate::convert;
use crate::store::SettingsStore;

/// Executes the stage machine's effects: detection requests go to the
/// background engine, persistence goes to the settings store. Completions
/// come back to the surface as ordinary messages.
pub struct EffectRunner {
    handle: DetectionHandle,
    store: Arc<dyn SettingsStore>,
}

impl EffectRunner {
    pub fn new(
        msg_tx: mpsc::Sender<Msg>,
        store: Arc<dyn SettingsStore>,
        settings: DetectorSettings,
    ) -> Self {
        let handle = DetectionHandle::new(settings);
        let runner = Self { handle, store };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartDetection { content, settings } => {
                    tuneye_info!(
                        "StartDetection kind={:?} value_len={} test_mode={}",
                        content.kind,
                        content.value.len(),
                        settings.enable_test_mode
                    );
                    self.handle
                        .detect(convert::detection_input(&content, &settings));
                }
                Effect::ClearStoredContent => {
                    self.store.clear_content();
                }
                Effect::PersistSettings(settings) => {
                    self.store.set_settings(settings);
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let handle = self.handle.clone();
        thread::spawn(move || loop {
            if let Some(event) = handle.try_recv() {
                let DetectEvent::Finished { result } = event;
                let msg = match result {
                    Ok(report) => Msg::DetectionSucceeded(convert::report_to_result(report)),
                    Err(err) => {
                        tuneye_warn!("Detection failed: {}", err);
                        Msg::DetectionFailed(err.user_message())
                    }
                };
                if msg_tx.send(msg).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}
