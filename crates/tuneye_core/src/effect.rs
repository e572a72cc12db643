#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Issue the single outbound detection request.
    StartDetection {
        content: crate::CapturedContent,
        settings: crate::Settings,
    },
    /// Remove pending `type`/`value` content from the settings store.
    ClearStoredContent,
    /// Write the full settings snapshot to the store.
    PersistSettings(crate::Settings),
}
