use std::sync::Once;

use tuneye_core::{
    action_control, update, AppState, Effect, Msg, Settings, Stage, LABEL_DISABLED, LABEL_PREVIEW,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tuneye_logging::initialize_for_tests);
}

fn disabled() -> Settings {
    Settings {
        enable_extension: false,
        ..Settings::default()
    }
}

#[test]
fn disable_override_wins_over_every_stage() {
    init_logging();
    let settings = disabled();
    for stage in [Stage::Select, Stage::Preview, Stage::Analyzing, Stage::Result] {
        let action = action_control(stage, &settings);
        assert_eq!(action.label, LABEL_DISABLED);
        assert!(!action.enabled);
    }
}

#[test]
fn disable_flip_while_preview_rederives_from_stage() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TextEdited("claim".to_string()));
    assert_eq!(state.view().action.label, LABEL_PREVIEW);

    // Flip off: control is forced disabled immediately.
    let (state, effects) = update(state, Msg::SettingsReloaded(disabled()));
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.action.label, LABEL_DISABLED);
    assert!(!view.action.enabled);
    assert_eq!(view.stage, Stage::Preview);

    // Flip back on: derived from the current stage, not blindly enabled.
    let (state, _) = update(state, Msg::SettingsReloaded(Settings::default()));
    let view = state.view();
    assert_eq!(view.action.label, LABEL_PREVIEW);
    assert!(view.action.enabled);
}

#[test]
fn reenabling_during_analyzing_keeps_control_disabled() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TextEdited("claim".to_string()));
    let (state, _) = update(state, Msg::ActionActivated);
    assert_eq!(state.stage(), Stage::Analyzing);

    let (state, _) = update(state, Msg::SettingsReloaded(disabled()));
    let (state, _) = update(state, Msg::SettingsReloaded(Settings::default()));

    // Still analyzing, so the control must stay disabled.
    let view = state.view();
    assert_eq!(view.stage, Stage::Analyzing);
    assert!(!view.action.enabled);
}

#[test]
fn activation_is_dropped_while_extension_disabled() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::TextEdited("claim".to_string()));
    let (state, _) = update(state, Msg::SettingsReloaded(disabled()));

    let (next, effects) = update(state, Msg::ActionActivated);

    assert_eq!(next.stage(), Stage::Preview);
    assert!(effects.is_empty());
}

#[test]
fn user_toggle_persists_settings() {
    init_logging();
    let edited = Settings {
        enable_record: true,
        ..Settings::default()
    };

    let (next, effects) = update(AppState::new(), Msg::SettingsEdited(edited.clone()));

    assert_eq!(next.settings(), &edited);
    assert_eq!(effects, vec![Effect::PersistSettings(edited)]);
}

#[test]
fn store_notification_does_not_persist_again() {
    init_logging();
    let reloaded = Settings {
        enable_test_mode: true,
        ..Settings::default()
    };

    let (next, effects) = update(AppState::new(), Msg::SettingsReloaded(reloaded.clone()));

    assert_eq!(next.settings(), &reloaded);
    assert!(effects.is_empty());
}
