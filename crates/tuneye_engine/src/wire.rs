use serde::Serialize;

use crate::{DetectionInput, SettingsSnapshot};

/// Body of `POST /api/process`: the pending content plus the full settings
/// snapshot, flattened to the store's key names.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ProcessRequest<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: &'a str,
    #[serde(flatten)]
    pub settings: SettingsSnapshot,
}

impl<'a> ProcessRequest<'a> {
    pub fn from_input(input: &'a DetectionInput) -> Self {
        Self {
            kind: input.kind.wire_name(),
            value: &input.value,
            settings: input.settings,
        }
    }
}
