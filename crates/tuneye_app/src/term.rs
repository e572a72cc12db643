//! Terminal rendition of the surface bindings: labels, previews and the
//! result chart printed as text. Layout niceties are out of scope; this
//! exists so the whole flow can run headless.

use tuneye_engine::{ChartBar, ChartSpec, VerdictBanner, FAKE_COLOR};

use crate::surface::SurfaceBindings;

const PREVIEW_LIMIT: usize = 200;
const HALF_TRACK: usize = 20;

pub struct TermBindings;

impl TermBindings {
    pub fn new() -> Self {
        Self
    }
}

impl SurfaceBindings for TermBindings {
    fn set_action(&mut self, label: &str, enabled: bool) -> bool {
        let state = if enabled { "enabled" } else { "disabled" };
        println!("[action] {label} ({state})");
        true
    }

    fn show_text(&mut self, value: &str) -> bool {
        println!("[content] text: {}", truncate(value, PREVIEW_LIMIT));
        true
    }

    fn show_image(&mut self, value: &str) -> bool {
        println!("[content] image: {}", truncate(value, PREVIEW_LIMIT));
        true
    }

    fn show_placeholder(&mut self) -> bool {
        println!("[content] (empty) right-click capture or type text, then :detect");
        true
    }

    fn show_error(&mut self, message: &str) -> bool {
        println!("[error] {message}");
        true
    }

    fn show_result(&mut self, banner: &VerdictBanner, chart: &ChartSpec) -> bool {
        println!("== {} ({}) ==", banner.text, banner.color);
        println!("{:>14}  {}", "", chart.title);
        for bar in &chart.bars {
            println!("{}", render_bar(bar));
        }
        true
    }
}

fn truncate(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let head: String = value.chars().take(limit).collect();
    format!("{head}...")
}

/// One chart row: fixed -1..+1 track with the zero line in the middle,
/// bars growing left for fake-leaning weights and right for real-leaning.
fn render_bar(bar: &ChartBar) -> String {
    let cells = ((bar.value.abs() * HALF_TRACK as f64).round() as usize).min(HALF_TRACK);
    let mut left = vec![' '; HALF_TRACK];
    let mut right = vec![' '; HALF_TRACK];
    if bar.value < 0.0 {
        for cell in left.iter_mut().rev().take(cells) {
            *cell = '#';
        }
    } else {
        for cell in right.iter_mut().take(cells) {
            *cell = '#';
        }
    }
    let side = if bar.color == FAKE_COLOR { "fake" } else { "real" };
    format!(
        "{:>12} [{}|{}] {:+.2} ({side})",
        truncate(&bar.label, 12),
        left.iter().collect::<String>(),
        right.iter().collect::<String>(),
        bar.value
    )
}
