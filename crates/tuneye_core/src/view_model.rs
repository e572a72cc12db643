use crate::{DetectionResult, Settings, Stage};

/// Action control labels, one per stage plus the disabled override.
pub const LABEL_SELECT: &str = "Enter an Input";
pub const LABEL_PREVIEW: &str = "Start Detection";
pub const LABEL_ANALYZING: &str = "Analyzing...";
pub const LABEL_RESULT: &str = "Return";
pub const LABEL_DISABLED: &str = "Extension Disabled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionControlView {
    pub label: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContentView {
    #[default]
    Empty,
    Text(String),
    Image(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceViewModel {
    pub stage: Stage,
    pub action: ActionControlView,
    pub content: ContentView,
    pub result: Option<DetectionResult>,
    pub error: Option<String>,
    pub dirty: bool,
}

/// The action control is a pure function of `Stage` and the extension
/// toggle; nothing else may set its label or enabled flag.
pub fn action_control(stage: Stage, settings: &Settings) -> ActionControlView {
    if !settings.enable_extension {
        return ActionControlView {
            label: LABEL_DISABLED,
            enabled: false,
        };
    }
    match stage {
        Stage::Select => ActionControlView {
            label: LABEL_SELECT,
            enabled: false,
        },
        Stage::Preview => ActionControlView {
            label: LABEL_PREVIEW,
            enabled: true,
        },
        Stage::Analyzing => ActionControlView {
            label: LABEL_ANALYZING,
            enabled: false,
        },
        Stage::Result => ActionControlView {
            label: LABEL_RESULT,
            enabled: true,
        },
    }
}
