use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tuneye_core::{Msg, Settings, Stage};
use tuneye_engine::DetectorSettings;
use tuneye_logging::{tuneye_info, LogDestination};

use crate::capture::{apply_capture, image_data_uri, CaptureAction, PanelRequest};
use crate::effects::EffectRunner;
use crate::panel::{
    clamp_panel_position, reset_panel_position, save_panel_position, PanelCommand, PanelController,
};
use crate::store::{FileSettingsStore, SettingsStore, StoreChange};
use crate::surface::SurfaceController;
use crate::term::TermBindings;

// Nominal geometry for the demo loop's drag clamping.
const PANEL_SIZE: (u32, u32) = (360, 480);
const VIEWPORT_SIZE: (u32, u32) = (1280, 800);

/// One parsed stdin line.
#[derive(Debug, Clone, PartialEq)]
enum InputCommand {
    Core(Msg),
    Capture(CaptureAction),
    Upload(PathBuf),
    Panel(PanelCommand),
    PanelMove(i32, i32),
    PanelReset,
    Help,
    Quit,
    Unknown(String),
}

pub fn run_app() -> anyhow::Result<()> {
    tuneye_logging::initialize(LogDestination::File);

    let state_dir = std::env::current_dir()?.join(".tuneye");
    let store: Arc<dyn SettingsStore> = Arc::new(FileSettingsStore::open(&state_dir));

    let mut detector_settings = DetectorSettings::default();
    if let Ok(endpoint) = std::env::var("TUNEYE_ENDPOINT") {
        detector_settings.endpoint = endpoint;
    }

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(msg_tx.clone(), store.clone(), detector_settings);
    let mut surface = SurfaceController::new(TermBindings::new(), store.settings());

    if store.settings().enable_instruction_on_startup {
        print_help();
    }
    if let Some((x, y)) = store.panel_position() {
        tuneye_info!("restoring panel position ({x}, {y})");
    }

    // Pending capture from a previous session lands straight in Preview.
    if let Some(content) = store.content() {
        let _ = msg_tx.send(Msg::ContentRestored(content));
    }

    forward_store_changes(store.subscribe(), msg_tx.clone());

    let quit = Arc::new(AtomicBool::new(false));
    spawn_input_thread(msg_tx, store, quit.clone());

    loop {
        match msg_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(msg) => {
                let effects = surface.dispatch(msg);
                runner.enqueue(effects);
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
        // Let an in-flight request settle before quitting; it carries its
        // own transport timeout.
        if quit.load(Ordering::Relaxed) && surface.state().stage() != Stage::Analyzing {
            break;
        }
    }

    Ok(())
}

/// Store notifications may race in-flight transitions; the surface
/// re-derives everything from current stage + settings, so forwarding them
/// as plain messages is enough.
fn forward_store_changes(changes: mpsc::Receiver<StoreChange>, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        while let Ok(change) = changes.recv() {
            let msg = match change {
                StoreChange::Settings(settings) => Msg::SettingsReloaded(settings),
                StoreChange::Content(Some(content)) => Msg::ContentRestored(content),
                // Local clears already went through the stage machine.
                StoreChange::Content(None) | StoreChange::PanelPosition(_) => Msg::NoOp,
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

fn spawn_input_thread(
    msg_tx: mpsc::Sender<Msg>,
    store: Arc<dyn SettingsStore>,
    quit: Arc<AtomicBool>,
) {
    thread::spawn(move || {
        let mut panel = PanelController::new();
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_line(&line, &store.settings()) {
                InputCommand::Core(msg) => {
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
                InputCommand::Capture(action) => {
                    // Store write -> change notification -> surface preview.
                    let PanelRequest::Show = apply_capture(store.as_ref(), action);
                    let ack = panel.handle(PanelCommand::Show);
                    println!("[panel] visible={}", ack.visible);
                }
                InputCommand::Upload(path) => match std::fs::read(&path) {
                    Ok(bytes) => {
                        let uri = image_data_uri(guess_mime(&path), &bytes);
                        let PanelRequest::Show =
                            apply_capture(store.as_ref(), CaptureAction::ImageAt(uri));
                        let ack = panel.handle(PanelCommand::Show);
                        println!("[panel] visible={}", ack.visible);
                    }
                    Err(err) => println!("cannot read {}: {err}", path.display()),
                },
                InputCommand::Panel(command) => {
                    let ack = panel.handle(command);
                    println!("[panel] ok={} visible={}", ack.success, ack.visible);
                }
                InputCommand::PanelMove(x, y) => {
                    // Dragging only makes sense on a visible panel.
                    if panel.is_visible() {
                        let (x, y) = clamp_panel_position(x, y, PANEL_SIZE, VIEWPORT_SIZE);
                        save_panel_position(store.as_ref(), x, y);
                        println!("[panel] moved to ({x}, {y})");
                    } else {
                        println!("[panel] not visible");
                    }
                }
                InputCommand::PanelReset => {
                    reset_panel_position(store.as_ref());
                    println!("[panel] position reset");
                }
                InputCommand::Help => print_help(),
                InputCommand::Quit => break,
                InputCommand::Unknown(command) => {
                    println!("unknown command: {command} (:help lists commands)");
                }
            }
        }
        quit.store(true, Ordering::Relaxed);
        let _ = msg_tx.send(Msg::NoOp);
    });
}

fn parse_line(line: &str, settings: &Settings) -> InputCommand {
    let trimmed = line.trim_end();
    let Some(command) = trimmed.strip_prefix(':') else {
        // Plain lines are text input, mirroring the popup's textarea.
        return InputCommand::Core(Msg::TextEdited(trimmed.to_string()));
    };

    let (name, rest) = match command.split_once(' ') {
        Some((name, rest)) => (name, rest.trim()),
        None => (command, ""),
    };

    match (name, rest) {
        ("detect", _) => InputCommand::Core(Msg::ActionActivated),
        ("clear", _) => InputCommand::Core(Msg::ContentCleared),
        ("image", url) if !url.is_empty() => {
            InputCommand::Core(Msg::ImageCaptured(url.to_string()))
        }
        ("select", text) if !text.is_empty() => {
            InputCommand::Capture(CaptureAction::Selection(text.to_string()))
        }
        ("upload", path) if !path.is_empty() => InputCommand::Upload(PathBuf::from(path)),
        ("extension", flag) => toggle(settings, flag, |settings, on| {
            settings.enable_extension = on;
        }),
        ("record", flag) => toggle(settings, flag, |settings, on| {
            settings.enable_record = on;
        }),
        ("test", flag) => toggle(settings, flag, |settings, on| {
            settings.enable_test_mode = on;
        }),
        ("instructions", flag) => toggle(settings, flag, |settings, on| {
            settings.enable_instruction_on_startup = on;
        }),
        ("panel", "show") => InputCommand::Panel(PanelCommand::Show),
        ("panel", "hide") => InputCommand::Panel(PanelCommand::Hide),
        ("panel", "toggle") => InputCommand::Panel(PanelCommand::Toggle),
        ("panel", "reset") => InputCommand::PanelReset,
        ("panel", rest) if rest.starts_with("move") => parse_panel_move(rest),
        ("help", _) => InputCommand::Help,
        ("quit", _) | ("q", _) => InputCommand::Quit,
        _ => InputCommand::Unknown(trimmed.to_string()),
    }
}

fn parse_panel_move(rest: &str) -> InputCommand {
    let mut parts = rest.split_whitespace();
    let _move = parts.next();
    match (
        parts.next().and_then(|x| x.parse::<i32>().ok()),
        parts.next().and_then(|y| y.parse::<i32>().ok()),
    ) {
        (Some(x), Some(y)) => InputCommand::PanelMove(x, y),
        _ => InputCommand::Unknown(format!(":panel {rest}")),
    }
}

fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn toggle(
    settings: &Settings,
    flag: &str,
    apply: impl FnOnce(&mut Settings, bool),
) -> InputCommand {
    let on = match flag {
        "on" => true,
        "off" => false,
        other => return InputCommand::Unknown(format!(":... {other}")),
    };
    let mut edited = settings.clone();
    apply(&mut edited, on);
    InputCommand::Core(Msg::SettingsEdited(edited))
}

fn print_help() {
    println!("Tun-Eye: check whether a captured post is real or fake news.");
    println!("  <text>              load text content");
    println!("  :select <text>      capture text the context-menu way (via the store)");
    println!("  :image <url>        load an image by URL or data URI");
    println!("  :upload <path>      load a local image file as a data URI");
    println!("  :detect             start detection / return from a result");
    println!("  :clear              drop the loaded content");
    println!("  :extension on|off   master toggle");
    println!("  :record on|off      record scans for improvements");
    println!("  :test on|off        offline test mode (no backend needed)");
    println!("  :instructions on|off  show this help at startup");
    println!("  :panel show|hide|toggle|reset");
    println!("  :panel move <x> <y>");
    println!("  :quit");
}
