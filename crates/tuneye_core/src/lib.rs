//! Tun-Eye core: pure stage machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, CapturedContent, ContentKind, DetectionResult, Settings, Stage, Verdict,
    WeightedWord,
};
pub use update::update;
pub use view_model::{
    action_control, ActionControlView, ContentView, SurfaceViewModel, LABEL_ANALYZING,
    LABEL_DISABLED, LABEL_PREVIEW, LABEL_RESULT, LABEL_SELECT,
};
