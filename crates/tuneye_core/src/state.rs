use crate::view_model::{action_control, ContentView, SurfaceViewModel};

/// Phase of the capture -> analyze -> result cycle. One per surface
/// instance; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Select,
    Preview,
    Analyzing,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Image,
}

/// User-selected content awaiting detection. `value` is raw text for
/// `Text`, a URL or data URI for `Image`. Exactly one is live at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedContent {
    pub kind: ContentKind,
    pub value: String,
}

impl CapturedContent {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            value: value.into(),
        }
    }

    pub fn image(value: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Image,
            value: value.into(),
        }
    }
}

/// User preferences, mirrored from the persisted settings store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub enable_extension: bool,
    pub enable_record: bool,
    pub enable_instruction_on_startup: bool,
    pub enable_test_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enable_extension: true,
            enable_record: false,
            enable_instruction_on_startup: true,
            enable_test_mode: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Fake,
    Real,
}

/// A token with a signed contribution score in [-1, 1]; negative pushes
/// toward fake, positive toward real.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedWord {
    pub word: String,
    pub weight: f64,
}

/// Classification output of one detection cycle. Consumed once, discarded
/// when the user returns to `Select`.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    pub verdict: Verdict,
    pub words: Vec<WeightedWord>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    stage: Stage,
    content: Option<CapturedContent>,
    settings: Settings,
    result: Option<DetectionResult>,
    error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn content(&self) -> Option<&CapturedContent> {
        self.content.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn view(&self) -> SurfaceViewModel {
        let content = match &self.content {
            Some(CapturedContent {
                kind: ContentKind::Text,
                value,
            }) => ContentView::Text(value.clone()),
            Some(CapturedContent {
                kind: ContentKind::Image,
                value,
            }) => ContentView::Image(value.clone()),
            None => ContentView::Empty,
        };
        SurfaceViewModel {
            stage: self.stage,
            action: action_control(self.stage, &self.settings),
            content,
            result: self.result.clone(),
            error: self.error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.dirty = true;
    }

    pub(crate) fn set_content(&mut self, content: CapturedContent) {
        self.content = Some(content);
        self.dirty = true;
    }

    pub(crate) fn clear_content(&mut self) {
        self.content = None;
        self.result = None;
        self.dirty = true;
    }

    pub(crate) fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.dirty = true;
    }

    pub(crate) fn clear_result(&mut self) {
        self.result = None;
        self.dirty = true;
    }

    pub(crate) fn set_result(&mut self, result: DetectionResult) {
        self.result = Some(result);
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.error = Some(message);
        self.dirty = true;
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }
}
