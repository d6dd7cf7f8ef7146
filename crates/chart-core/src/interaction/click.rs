// File: crates/chart-core/src/interaction/click.rs
// Summary: Click-to-select handler.

use super::{ModifierKey, MouseHandler, PointerEvent, SelectionHost};

/// Selects the item under a click. Without the additive modifier the
/// previous selection is cleared first.
#[derive(Clone, Debug)]
pub struct ClickSelectionHandler {
    required: Option<ModifierKey>,
    additive: ModifierKey,
}

impl ClickSelectionHandler {
    pub fn new() -> Self { Self { required: None, additive: ModifierKey::Shift } }

    /// Only act while `key` is held.
    pub fn requiring(mut self, key: ModifierKey) -> Self {
        self.required = Some(key);
        self
    }

    pub fn with_additive_modifier(mut self, key: ModifierKey) -> Self {
        self.additive = key;
        self
    }
}

impl Default for ClickSelectionHandler {
    fn default() -> Self { Self::new() }
}

impl MouseHandler for ClickSelectionHandler {
    fn id(&self) -> &'static str { "click_selection" }

    fn required_modifier(&self) -> Option<ModifierKey> { self.required }

    fn mouse_clicked(&mut self, host: &mut dyn SelectionHost, event: &PointerEvent) {
        if !self.accepts(&event.modifiers) {
            return;
        }
        let Some(manager) = host.selection_manager() else { return };
        if !event.modifiers.has(self.additive) {
            manager.clear_selection();
        }
        manager.select_point(event.x, event.y);
        host.request_redraw();
    }
}
