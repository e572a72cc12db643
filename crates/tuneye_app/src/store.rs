//! Persisted settings store: the extension-storage counterpart backing all
//! surfaces, with change notifications for listeners.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};

use serde::{Deserialize, Serialize};
use tuneye_core::{CapturedContent, ContentKind, Settings};
use tuneye_logging::{tuneye_error, tuneye_info, tuneye_warn};

const STATE_FILENAME: &str = ".tuneye_state.ron";

/// Notification sent to subscribers after a store mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreChange {
    Settings(Settings),
    Content(Option<CapturedContent>),
    PanelPosition(Option<(i32, i32)>),
}

/// Injected repository interface over the key/value settings storage.
pub trait SettingsStore: Send + Sync {
    fn settings(&self) -> Settings;
    fn set_settings(&self, settings: Settings);
    fn content(&self) -> Option<CapturedContent>;
    fn set_content(&self, content: CapturedContent);
    fn clear_content(&self);
    fn panel_position(&self) -> Option<(i32, i32)>;
    fn set_panel_position(&self, x: i32, y: i32);
    fn clear_panel_position(&self);
    /// Registers a change listener; dropped receivers are pruned lazily.
    fn subscribe(&self) -> mpsc::Receiver<StoreChange>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct StoredState {
    enable_extension: bool,
    enable_record: bool,
    enable_instruction_on_startup: bool,
    enable_test_mode: bool,
    content_type: Option<String>,
    content_value: Option<String>,
    panel_x: Option<i32>,
    panel_y: Option<i32>,
}

impl Default for StoredState {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            enable_extension: settings.enable_extension,
            enable_record: settings.enable_record,
            enable_instruction_on_startup: settings.enable_instruction_on_startup,
            enable_test_mode: settings.enable_test_mode,
            content_type: None,
            content_value: None,
            panel_x: None,
            panel_y: None,
        }
    }
}

impl StoredState {
    fn settings(&self) -> Settings {
        Settings {
            enable_extension: self.enable_extension,
            enable_record: self.enable_record,
            enable_instruction_on_startup: self.enable_instruction_on_startup,
            enable_test_mode: self.enable_test_mode,
        }
    }

    fn apply_settings(&mut self, settings: &Settings) {
        self.enable_extension = settings.enable_extension;
        self.enable_record = settings.enable_record;
        self.enable_instruction_on_startup = settings.enable_instruction_on_startup;
        self.enable_test_mode = settings.enable_test_mode;
    }

    fn content(&self) -> Option<CapturedContent> {
        let value = self.content_value.clone()?;
        match self.content_type.as_deref() {
            Some("text") => Some(CapturedContent::text(value)),
            Some("image") => Some(CapturedContent::image(value)),
            Some(other) => {
                tuneye_warn!("Unknown stored content type {:?}; ignoring", other);
                None
            }
            None => None,
        }
    }

    fn apply_content(&mut self, content: &CapturedContent) {
        self.content_type = Some(
            match content.kind {
                ContentKind::Text => "text",
                ContentKind::Image => "image",
            }
            .to_string(),
        );
        self.content_value = Some(content.value.clone());
    }

    fn clear_content(&mut self) {
        self.content_type = None;
        self.content_value = None;
    }

    fn panel_position(&self) -> Option<(i32, i32)> {
        Some((self.panel_x?, self.panel_y?))
    }
}

struct Inner {
    state: StoredState,
    subscribers: Vec<mpsc::Sender<StoreChange>>,
}

impl Inner {
    fn notify(&mut self, change: StoreChange) {
        self.subscribers
            .retain(|subscriber| subscriber.send(change.clone()).is_ok());
    }
}

/// File-backed store: one ron document, written atomically on every
/// mutation. A missing or unreadable file degrades to defaults.
pub struct FileSettingsStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl FileSettingsStore {
    pub fn open(dir: &Path) -> Self {
        let path = dir.join(STATE_FILENAME);
        let state = load_state(&path);
        Self {
            path,
            inner: Mutex::new(Inner {
                state,
                subscribers: Vec::new(),
            }),
        }
    }

    fn mutate(&self, change: StoreChange, apply: impl FnOnce(&mut StoredState)) {
        let mut inner = self.inner.lock().expect("lock settings store");
        apply(&mut inner.state);
        save_state(&self.path, &inner.state);
        inner.notify(change);
    }
}

impl SettingsStore for FileSettingsStore {
    fn settings(&self) -> Settings {
        self.inner.lock().expect("lock settings store").state.settings()
    }

    fn set_settings(&self, settings: Settings) {
        self.mutate(StoreChange::Settings(settings.clone()), |state| {
            state.apply_settings(&settings)
        });
    }

    fn content(&self) -> Option<CapturedContent> {
        self.inner.lock().expect("lock settings store").state.content()
    }

    fn set_content(&self, content: CapturedContent) {
        self.mutate(StoreChange::Content(Some(content.clone())), |state| {
            state.apply_content(&content)
        });
    }

    fn clear_content(&self) {
        self.mutate(StoreChange::Content(None), StoredState::clear_content);
    }

    fn panel_position(&self) -> Option<(i32, i32)> {
        self.inner
            .lock()
            .expect("lock settings store")
            .state
            .panel_position()
    }

    fn set_panel_position(&self, x: i32, y: i32) {
        self.mutate(StoreChange::PanelPosition(Some((x, y))), |state| {
            state.panel_x = Some(x);
            state.panel_y = Some(y);
        });
    }

    fn clear_panel_position(&self) {
        self.mutate(StoreChange::PanelPosition(None), |state| {
            state.panel_x = None;
            state.panel_y = None;
        });
    }

    fn subscribe(&self) -> mpsc::Receiver<StoreChange> {
        let (tx, rx) = mpsc::channel();
        self.inner
            .lock()
            .expect("lock settings store")
            .subscribers
            .push(tx);
        rx
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySettingsStore {
    inner: Mutex<Inner>,
}

#[cfg(test)]
impl Default for Inner {
    fn default() -> Self {
        Self {
            state: StoredState::default(),
            subscribers: Vec::new(),
        }
    }
}

#[cfg(test)]
impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn mutate(&self, change: StoreChange, apply: impl FnOnce(&mut StoredState)) {
        let mut inner = self.inner.lock().expect("lock settings store");
        apply(&mut inner.state);
        inner.notify(change);
    }
}

#[cfg(test)]
impl SettingsStore for MemorySettingsStore {
    fn settings(&self) -> Settings {
        self.inner.lock().expect("lock settings store").state.settings()
    }

    fn set_settings(&self, settings: Settings) {
        self.mutate(StoreChange::Settings(settings.clone()), |state| {
            state.apply_settings(&settings)
        });
    }

    fn content(&self) -> Option<CapturedContent> {
        self.inner.lock().expect("lock settings store").state.content()
    }

    fn set_content(&self, content: CapturedContent) {
        self.mutate(StoreChange::Content(Some(content.clone())), |state| {
            state.apply_content(&content)
        });
    }

    fn clear_content(&self) {
        self.mutate(StoreChange::Content(None), StoredState::clear_content);
    }

    fn panel_position(&self) -> Option<(i32, i32)> {
        self.inner
            .lock()
            .expect("lock settings store")
            .state
            .panel_position()
    }

    fn set_panel_position(&self, x: i32, y: i32) {
        self.mutate(StoreChange::PanelPosition(Some((x, y))), |state| {
            state.panel_x = Some(x);
            state.panel_y = Some(y);
        });
    }

    fn clear_panel_position(&self) {
        self.mutate(StoreChange::PanelPosition(None), |state| {
            state.panel_x = None;
            state.panel_y = None;
        });
    }

    fn subscribe(&self) -> mpsc::Receiver<StoreChange> {
        let (tx, rx) = mpsc::channel();
        self.inner
            .lock()
            .expect("lock settings store")
            .subscribers
            .push(tx);
        rx
    }
}

fn load_state(path: &Path) -> StoredState {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return StoredState::default();
        }
        Err(err) => {
            tuneye_warn!("Failed to read settings from {:?}: {}", path, err);
            return StoredState::default();
        }
    };

    match ron::from_str(&content) {
        Ok(state) => {
            tuneye_info!("Loaded settings from {:?}", path);
            state
        }
        Err(err) => {
            tuneye_warn!("Failed to parse settings from {:?}: {}", path, err);
            StoredState::default()
        }
    }
}

fn save_state(path: &Path, state: &StoredState) {
    let Some(dir) = path.parent() else {
        tuneye_error!("Settings path {:?} has no parent directory", path);
        return;
    };
    if let Err(err) = fs::create_dir_all(dir) {
        tuneye_error!("Failed to create settings dir {:?}: {}", dir, err);
        return;
    }

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(state, pretty) {
        Ok(text) => text,
        Err(err) => {
            tuneye_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    if let Err(err) = write_atomically(dir, path, &content) {
        tuneye_error!("Failed to write settings to {:?}: {}", path, err);
    }
}

/// Temp file in the same directory, then rename over the target.
fn write_atomically(dir: &Path, target: &Path, content: &str) -> std::io::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}
