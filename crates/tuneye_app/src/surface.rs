//! One shared surface controller for the popup, the in-page panel and the
//! dashboard, parameterized by a small view-binding interface.

use tuneye_core::{update, AppState, ContentView, Effect, Msg, Settings, SurfaceViewModel};
use tuneye_engine::{chart_spec, verdict_banner, ChartSpec, VerdictBanner};
use tuneye_logging::tuneye_warn;

use crate::convert::result_to_report;

/// What a concrete surface must expose. Every method reports whether its
/// target element existed; a missing target is skipped, never fatal.
pub trait SurfaceBindings {
    fn set_action(&mut self, label: &str, enabled: bool) -> bool;
    fn show_text(&mut self, value: &str) -> bool;
    fn show_image(&mut self, value: &str) -> bool;
    fn show_placeholder(&mut self) -> bool;
    fn show_error(&mut self, message: &str) -> bool;
    fn show_result(&mut self, banner: &VerdictBanner, chart: &ChartSpec) -> bool;
}

/// Owns one surface's stage machine and mirrors its view model into the
/// bindings after every dirty update.
pub struct SurfaceController<B: SurfaceBindings> {
    state: AppState,
    bindings: B,
}

impl<B: SurfaceBindings> SurfaceController<B> {
    pub fn new(bindings: B, settings: Settings) -> Self {
        let mut controller = Self {
            state: AppState::with_settings(settings),
            bindings,
        };
        // Paint the initial Select stage so the control starts disabled.
        let view = controller.state.view();
        controller.state.consume_dirty();
        controller.apply(&view);
        controller
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn bindings(&self) -> &B {
        &self.bindings
    }

    /// Applies one message and returns the effects for the runner. The
    /// bindings are only touched when the update marked state dirty.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let repaint = state.consume_dirty();
        let view = state.view();
        self.state = state;
        if repaint {
            self.apply(&view);
        }
        effects
    }

    /// Content display adapter: idempotent projection of the view model.
    /// Re-applying the same view yields the same visible state.
    fn apply(&mut self, view: &SurfaceViewModel) {
        checked(
            "action control",
            self.bindings.set_action(view.action.label, view.action.enabled),
        );

        if let Some(result) = &view.result {
            let report = result_to_report(result);
            checked(
                "result view",
                self.bindings
                    .show_result(&verdict_banner(report.verdict), &chart_spec(&report)),
            );
            return;
        }

        if let Some(error) = &view.error {
            checked("error view", self.bindings.show_error(error));
            return;
        }

        match &view.content {
            ContentView::Text(value) => checked("text control", self.bindings.show_text(value)),
            ContentView::Image(value) => checked("image region", self.bindings.show_image(value)),
            ContentView::Empty => checked("placeholder", self.bindings.show_placeholder()),
        }
    }
}

fn checked(target: &str, present: bool) {
    if !present {
        tuneye_warn!("Missing {}; skipping update", target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuneye_core::{CapturedContent, DetectionResult, Verdict, WeightedWord};

    /// Recording binding: keeps the last of everything it was shown.
    #[derive(Default)]
    struct RecordingBindings {
        action: Option<(String, bool)>,
        shown: Vec<String>,
        last_chart: Option<ChartSpec>,
        last_banner: Option<VerdictBanner>,
        text_present: bool,
    }

    impl RecordingBindings {
        fn with_text_control() -> Self {
            Self {
                text_present: true,
                ..Self::default()
            }
        }
    }

    impl SurfaceBindings for RecordingBindings {
        fn set_action(&mut self, label: &str, enabled: bool) -> bool {
            self.action = Some((label.to_string(), enabled));
            true
        }

        fn show_text(&mut self, value: &str) -> bool {
            if !self.text_present {
                return false;
            }
            self.shown.push(format!("text:{value}"));
            true
        }

        fn show_image(&mut self, value: &str) -> bool {
            self.shown.push(format!("image:{value}"));
            true
        }

        fn show_placeholder(&mut self) -> bool {
            self.shown.push("placeholder".to_string());
            true
        }

        fn show_error(&mut self, message: &str) -> bool {
            self.shown.push(format!("error:{message}"));
            true
        }

        fn show_result(&mut self, banner: &VerdictBanner, chart: &ChartSpec) -> bool {
            self.last_banner = Some(banner.clone());
            self.last_chart = Some(chart.clone());
            self.shown.push("result".to_string());
            true
        }
    }

    fn fake_result() -> DetectionResult {
        DetectionResult {
            verdict: Verdict::Fake,
            words: vec![WeightedWord {
                word: "hoax".to_string(),
                weight: -0.8,
            }],
        }
    }

    #[test]
    fn controller_paints_initial_select_stage() {
        let controller = SurfaceController::new(
            RecordingBindings::with_text_control(),
            Settings::default(),
        );
        let bindings = controller.bindings();

        assert_eq!(
            bindings.action,
            Some(("Enter an Input".to_string(), false))
        );
        assert_eq!(bindings.shown, vec!["placeholder".to_string()]);
    }

    #[test]
    fn text_content_is_mirrored_into_the_text_control() {
        let mut controller = SurfaceController::new(
            RecordingBindings::with_text_control(),
            Settings::default(),
        );
        controller.dispatch(Msg::ContentRestored(CapturedContent::text("claim")));

        let bindings = controller.bindings();
        assert_eq!(bindings.action, Some(("Start Detection".to_string(), true)));
        assert_eq!(bindings.shown.last().unwrap(), "text:claim");
    }

    #[test]
    fn image_content_hides_text_and_shows_image_region() {
        let mut controller = SurfaceController::new(
            RecordingBindings::with_text_control(),
            Settings::default(),
        );
        controller.dispatch(Msg::ImageCaptured("data:image/png;base64,x".to_string()));

        let shown = controller.bindings().shown.last().unwrap().clone();
        assert_eq!(shown, "image:data:image/png;base64,x");
    }

    #[test]
    fn reapplying_the_same_content_is_idempotent() {
        let mut controller = SurfaceController::new(
            RecordingBindings::with_text_control(),
            Settings::default(),
        );
        controller.dispatch(Msg::ContentRestored(CapturedContent::text("claim")));
        let first = controller.bindings().shown.last().unwrap().clone();

        controller.dispatch(Msg::ContentRestored(CapturedContent::text("claim")));
        let second = controller.bindings().shown.last().unwrap().clone();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_target_is_skipped_without_crashing() {
        // No text control present at all, e.g. invoked before injection.
        let mut controller =
            SurfaceController::new(RecordingBindings::default(), Settings::default());
        controller.dispatch(Msg::ContentRestored(CapturedContent::text("claim")));

        // The stage still advanced; only the visible update was skipped.
        assert_eq!(controller.state().stage(), tuneye_core::Stage::Preview);
    }

    #[test]
    fn successful_detection_renders_banner_and_chart() {
        let mut controller = SurfaceController::new(
            RecordingBindings::with_text_control(),
            Settings::default(),
        );
        controller.dispatch(Msg::ContentRestored(CapturedContent::text("Breaking: ...")));
        let effects = controller.dispatch(Msg::ActionActivated);
        assert_eq!(effects.len(), 1);

        controller.dispatch(Msg::DetectionSucceeded(fake_result()));

        let bindings = controller.bindings();
        assert_eq!(bindings.action, Some(("Return".to_string(), true)));
        let banner = bindings.last_banner.as_ref().unwrap();
        assert!(banner.text.contains("Fake News"));
        assert_eq!(banner.color, tuneye_engine::FAKE_COLOR);

        let chart = bindings.last_chart.as_ref().unwrap();
        assert_eq!(chart.bars.len(), 1);
        assert_eq!(chart.bars[0].value, -0.8);
        assert_eq!(chart.bars[0].color, tuneye_engine::FAKE_COLOR);
    }

    #[test]
    fn failed_detection_shows_error_and_keeps_content() {
        let mut controller = SurfaceController::new(
            RecordingBindings::with_text_control(),
            Settings::default(),
        );
        controller.dispatch(Msg::ContentRestored(CapturedContent::text("Breaking: ...")));
        controller.dispatch(Msg::ActionActivated);
        controller.dispatch(Msg::DetectionFailed("service unreachable".to_string()));

        let bindings = controller.bindings();
        assert_eq!(bindings.action, Some(("Start Detection".to_string(), true)));
        assert_eq!(bindings.shown.last().unwrap(), "error:service unreachable");
        assert_eq!(
            controller.state().content(),
            Some(&CapturedContent::text("Breaking: ..."))
        );
    }

    #[test]
    fn new_capture_while_result_is_shown_replaces_the_chart() {
        let mut controller = SurfaceController::new(
            RecordingBindings::with_text_control(),
            Settings::default(),
        );
        controller.dispatch(Msg::ContentRestored(CapturedContent::text("first claim")));
        controller.dispatch(Msg::ActionActivated);
        controller.dispatch(Msg::DetectionSucceeded(fake_result()));
        assert_eq!(controller.bindings().shown.last().unwrap(), "result");

        controller.dispatch(Msg::ContentRestored(CapturedContent::text("second claim")));

        let bindings = controller.bindings();
        assert_eq!(bindings.action, Some(("Start Detection".to_string(), true)));
        assert_eq!(bindings.shown.last().unwrap(), "text:second claim");
    }

    #[test]
    fn returning_from_result_restores_the_placeholder() {
        let mut controller = SurfaceController::new(
            RecordingBindings::with_text_control(),
            Settings::default(),
        );
        controller.dispatch(Msg::ContentRestored(CapturedContent::text("claim")));
        controller.dispatch(Msg::ActionActivated);
        controller.dispatch(Msg::DetectionSucceeded(fake_result()));

        let effects = controller.dispatch(Msg::ActionActivated);
        assert_eq!(effects, vec![Effect::ClearStoredContent]);

        let bindings = controller.bindings();
        assert_eq!(
            bindings.action,
            Some(("Enter an Input".to_string(), false))
        );
        assert_eq!(bindings.shown.last().unwrap(), "placeholder");
    }
}
