//! Tun-Eye engine: detection request IO and chart-spec building.
mod chart;
mod detect;
mod engine;
mod testmode;
mod types;
mod wire;

pub use chart::{chart_spec, verdict_banner, ChartBar, ChartSpec, VerdictBanner, ZeroLine};
pub use chart::{AXIS_COLOR, FAKE_COLOR, REAL_COLOR};
pub use detect::{Detector, DetectorSettings, HttpDetector};
pub use engine::DetectionHandle;
pub use testmode::TestModeDetector;
pub use types::{
    DetectError, DetectEvent, DetectionInput, DetectionReport, FailureKind, InputKind,
    SettingsSnapshot, Verdict, WeightedWord,
};
