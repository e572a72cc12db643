//! Content capture: context-menu and file-upload entry points that stage
//! `{type, value}` in the settings store for whichever surface opens next.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tuneye_core::CapturedContent;
use tuneye_logging::tuneye_info;

use crate::store::SettingsStore;

/// Context-menu style capture action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureAction {
    /// "selection" menu entry: the highlighted text.
    Selection(String),
    /// "image" menu entry: the hovered image's source URL.
    ImageAt(String),
}

/// What the capturing side asks of the panel afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRequest {
    Show,
}

/// Writes the captured content into the store and requests the panel.
/// A new capture overwrites whatever was pending.
pub fn apply_capture(store: &dyn SettingsStore, action: CaptureAction) -> PanelRequest {
    let content = match action {
        CaptureAction::Selection(text) => CapturedContent::text(text),
        CaptureAction::ImageAt(url) => CapturedContent::image(url),
    };
    tuneye_info!("capture: staged {:?} content", content.kind);
    store.set_content(content);
    PanelRequest::Show
}

/// Encodes uploaded image bytes as a data URI, the dashboard's file-picker
/// equivalent of an image URL.
pub fn image_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
