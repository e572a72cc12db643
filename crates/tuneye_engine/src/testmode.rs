use std::time::Duration;

use rand::Rng;
use tuneye_logging::tuneye_info;

use crate::{DetectError, DetectionInput, DetectionReport, Detector, Verdict, WeightedWord};

/// Offline bypass: fabricates a detection result after a fixed simulated
/// delay without touching the network. Callers must not be able to tell it
/// apart from `HttpDetector` on the success path.
#[derive(Debug, Clone)]
pub struct TestModeDetector {
    delay: Duration,
}

impl Default for TestModeDetector {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
        }
    }
}

impl TestModeDetector {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    fn sample_report(&self) -> DetectionReport {
        let verdict = if rand::thread_rng().gen_bool(0.5) {
            Verdict::Fake
        } else {
            Verdict::Real
        };
        DetectionReport {
            verdict,
            words: canned_words(),
        }
    }
}

fn canned_words() -> Vec<WeightedWord> {
    [
        ("hoax", -0.8),
        ("misleading", -0.4),
        ("truth", 0.7),
        ("verified", 0.9),
        ("confirmed", 0.85),
    ]
    .into_iter()
    .map(|(word, weight)| WeightedWord {
        word: word.to_string(),
        weight,
    })
    .collect()
}

#[async_trait::async_trait]
impl Detector for TestModeDetector {
    async fn detect(&self, _input: &DetectionInput) -> Result<DetectionReport, DetectError> {
        tokio::time::sleep(self.delay).await;
        let report = self.sample_report();
        tuneye_info!("test mode verdict: {:?}", report.verdict);
        Ok(report)
    }
}
