//! In-page panel control: host-sent visibility commands and the cosmetic
//! dragged-position bookkeeping.

use tuneye_logging::tuneye_debug;

use crate::store::SettingsStore;

/// Control message from the host/background collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    Toggle,
    Show,
    Hide,
}

/// Acknowledgement returned for every command, idempotent ones included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelAck {
    pub success: bool,
    pub visible: bool,
}

/// Tracks panel visibility for one page. Commands are idempotent:
/// `Show` on a visible panel and `Hide` on a hidden one are acknowledged
/// without further action.
#[derive(Debug, Default)]
pub struct PanelController {
    visible: bool,
}

impl PanelController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn handle(&mut self, command: PanelCommand) -> PanelAck {
        self.visible = match command {
            PanelCommand::Toggle => !self.visible,
            PanelCommand::Show => true,
            PanelCommand::Hide => false,
        };
        tuneye_debug!("panel {:?} -> visible={}", command, self.visible);
        PanelAck {
            success: true,
            visible: self.visible,
        }
    }
}

/// Clamps a dragged panel position so the panel stays inside the viewport.
pub fn clamp_panel_position(
    x: i32,
    y: i32,
    panel: (u32, u32),
    viewport: (u32, u32),
) -> (i32, i32) {
    let max_x = viewport.0.saturating_sub(panel.0) as i32;
    let max_y = viewport.1.saturating_sub(panel.1) as i32;
    (x.clamp(0, max_x), y.clamp(0, max_y))
}

/// Persists the final drag position; purely cosmetic state.
pub fn save_panel_position(store: &dyn SettingsStore, x: i32, y: i32) {
    store.set_panel_position(x, y);
}

/// Settings "reset position" button: forget the stored drag offset.
pub fn reset_panel_position(store: &dyn SettingsStore) {
    store.clear_panel_position();
}
