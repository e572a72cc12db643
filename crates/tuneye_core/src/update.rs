use crate::{CapturedContent, ContentKind, Effect, Msg, Stage};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: crate::AppState, msg: Msg) -> (crate::AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TextEdited(raw) => {
            // Edits while a request is in flight or a result is shown do not
            // move the stage; the action control settles them.
            let editable = matches!(state.stage(), Stage::Select | Stage::Preview);
            if !editable {
                return (state, Vec::new());
            }

            let has_text = !raw.trim().is_empty();
            let current_kind = state.content().map(|content| content.kind);
            if has_text && current_kind != Some(ContentKind::Image) {
                state.set_content(CapturedContent::text(raw));
                state.clear_error();
                if state.stage() == Stage::Select {
                    state.set_stage(Stage::Preview);
                }
            } else if !has_text && current_kind == Some(ContentKind::Text) {
                state.clear_content();
                state.clear_error();
                state.set_stage(Stage::Select);
            }
            Vec::new()
        }
        Msg::ImageCaptured(value) => {
            apply_content(&mut state, CapturedContent::image(value));
            Vec::new()
        }
        Msg::ContentRestored(content) => {
            apply_content(&mut state, content);
            Vec::new()
        }
        Msg::ContentCleared => {
            state.clear_content();
            state.clear_error();
            state.set_stage(Stage::Select);
            vec![Effect::ClearStoredContent]
        }
        Msg::ActionActivated => {
            // Forced-disabled control; a stray activation is dropped.
            if !state.settings().enable_extension {
                return (state, Vec::new());
            }
            match state.stage() {
                Stage::Preview => {
                    let Some(content) = state.content().cloned() else {
                        return (state, Vec::new());
                    };
                    state.clear_error();
                    state.set_stage(Stage::Analyzing);
                    vec![Effect::StartDetection {
                        content,
                        settings: state.settings().clone(),
                    }]
                }
                Stage::Result => {
                    state.clear_content();
                    state.set_stage(Stage::Select);
                    vec![Effect::ClearStoredContent]
                }
                Stage::Select | Stage::Analyzing => Vec::new(),
            }
        }
        Msg::DetectionSucceeded(result) => {
            if state.stage() == Stage::Analyzing {
                state.set_result(result);
                state.set_stage(Stage::Result);
            }
            Vec::new()
        }
        Msg::DetectionFailed(message) => {
            if state.stage() == Stage::Analyzing {
                state.set_error(message);
                state.set_stage(Stage::Preview);
            }
            Vec::new()
        }
        Msg::SettingsEdited(settings) => {
            state.set_settings(settings.clone());
            vec![Effect::PersistSettings(settings)]
        }
        Msg::SettingsReloaded(settings) => {
            state.set_settings(settings);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Loads captured content into the surface. During `Analyzing` the pending
/// content is replaced but the stage is left to the in-flight request.
fn apply_content(state: &mut crate::AppState, content: CapturedContent) {
    state.set_content(content);
    if state.stage() != Stage::Analyzing {
        // A new capture supersedes the previous cycle's outcome.
        state.clear_result();
        state.clear_error();
        state.set_stage(Stage::Preview);
    }
}
