use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Image,
}

impl InputKind {
    pub(crate) fn wire_name(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Image => "image",
        }
    }
}

/// Settings snapshot forwarded to the service alongside the content,
/// serialized with the store's key names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    pub enable_extension: bool,
    pub enable_record: bool,
    pub enable_instruction_on_startup: bool,
    pub enable_test_mode: bool,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            enable_extension: true,
            enable_record: false,
            enable_instruction_on_startup: true,
            enable_test_mode: false,
        }
    }
}

/// One detection request as handed to a `Detector`.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionInput {
    pub kind: InputKind,
    pub value: String,
    pub settings: SettingsSnapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Fake News")]
    Fake,
    #[serde(rename = "Real News")]
    Real,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeightedWord {
    pub word: String,
    pub weight: f64,
}

/// Parsed service response: a verdict plus per-word contribution weights.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectionReport {
    pub verdict: Verdict,
    pub words: Vec<WeightedWord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct DetectError {
    pub kind: FailureKind,
    pub message: String,
}

impl DetectError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Single user-facing message for the whole transport/status/body
    /// taxonomy; raw causes stay in the log only.
    pub fn user_message(&self) -> String {
        "Could not reach the detection service. Make sure the backend is running, \
         or enable Test Mode in Settings to try without it."
            .to_string()
    }
}

/// Completion event for one detection request.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectEvent {
    Finished {
        result: Result<DetectionReport, DetectError>,
    },
}
