#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User typed into the text control (raw control value).
    TextEdited(String),
    /// An image capture completed with the given URL or data URI.
    ImageCaptured(String),
    /// Stored content was found at init, or the store changed underneath us.
    ContentRestored(crate::CapturedContent),
    /// User explicitly cleared the loaded content.
    ContentCleared,
    /// User activated the action control.
    ActionActivated,
    /// Detection request resolved successfully.
    DetectionSucceeded(crate::DetectionResult),
    /// Detection request failed; payload is the user-visible message.
    DetectionFailed(String),
    /// User changed a toggle on this surface; must be persisted.
    SettingsEdited(crate::Settings),
    /// Settings change notification from the store; already persisted.
    SettingsReloaded(crate::Settings),
    /// Fallback for placeholder wiring.
    NoOp,
}
