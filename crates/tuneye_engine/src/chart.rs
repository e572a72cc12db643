use crate::{DetectionReport, Verdict};

/// Bar color for words leaning toward a fake verdict.
pub const FAKE_COLOR: &str = "#F7BF2D";
/// Bar color for words leaning toward a real verdict.
pub const REAL_COLOR: &str = "#035EE6";
/// Color used for the emphasized zero line and axis labels.
pub const AXIS_COLOR: &str = "#2D2D51";

const CHART_TITLE: &str = "Fake            Neutral            Real";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroLine {
    pub color: &'static str,
    pub width: u32,
}

/// Horizontal bar-chart specification handed to whatever actually draws.
/// Deterministic for a given report; the axis is fixed at -1..+1.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub axis_min: f64,
    pub axis_max: f64,
    pub zero_line: ZeroLine,
    pub bars: Vec<ChartBar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerdictBanner {
    pub text: String,
    pub color: &'static str,
}

pub fn chart_spec(report: &DetectionReport) -> ChartSpec {
    let bars = report
        .words
        .iter()
        .map(|word| {
            let value = word.weight.clamp(-1.0, 1.0);
            ChartBar {
                label: word.word.clone(),
                value,
                color: if value < 0.0 { FAKE_COLOR } else { REAL_COLOR },
            }
        })
        .collect();

    ChartSpec {
        title: CHART_TITLE.to_string(),
        axis_min: -1.0,
        axis_max: 1.0,
        zero_line: ZeroLine {
            color: AXIS_COLOR,
            width: 2,
        },
        bars,
    }
}

/// The banner pairs the plain verdict string with its palette color; the
/// color alone carries the fake/real emphasis.
pub fn verdict_banner(verdict: Verdict) -> VerdictBanner {
    match verdict {
        Verdict::Fake => VerdictBanner {
            text: "Fake News".to_string(),
            color: FAKE_COLOR,
        },
        Verdict::Real => VerdictBanner {
            text: "Real News".to_string(),
            color: REAL_COLOR,
        },
    }
}
