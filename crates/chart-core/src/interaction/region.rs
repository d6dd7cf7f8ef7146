// File: crates/chart-core/src/interaction/region.rs
// Summary: Rectangular drag-to-select handler.

use skia_safe as skia;

use super::{ModifierKey, MouseHandler, OverlayStyle, PointerEvent, SelectionHost};
use crate::geometry::{self, Shape};

/// Drag a rectangle inside the data area; items it matches are selected on
/// release.
#[derive(Clone, Debug)]
pub struct RegionSelectionHandler {
    required: Option<ModifierKey>,
    additive: ModifierKey,
    style: OverlayStyle,
    anchor: Option<(f32, f32)>,
    current: Option<skia::Rect>,
}

impl RegionSelectionHandler {
    pub fn new() -> Self {
        Self { required: None, additive: ModifierKey::Shift, style: OverlayStyle::default(), anchor: None, current: None }
    }

    pub fn requiring(mut self, key: ModifierKey) -> Self {
        self.required = Some(key);
        self
    }

    pub fn with_additive_modifier(mut self, key: ModifierKey) -> Self {
        self.additive = key;
        self
    }

    pub fn with_overlay_style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    pub fn is_dragging(&self) -> bool { self.anchor.is_some() }

    /// Rectangle from the anchor to the pointer, clamped to the data area.
    fn region(&self, host: &dyn SelectionHost, event: &PointerEvent) -> Option<skia::Rect> {
        let (ax, ay) = self.anchor?;
        let area = host.data_area()?;
        let (x, y) = geometry::clamp_point(&area, event.x, event.y);
        Some(geometry::rect_from_points(ax, ay, x, y))
    }
}

impl Default for RegionSelectionHandler {
    fn default() -> Self { Self::new() }
}

impl MouseHandler for RegionSelectionHandler {
    fn id(&self) -> &'static str { "region_selection" }

    fn required_modifier(&self) -> Option<ModifierKey> { self.required }

    fn is_live_handler(&self) -> bool { true }

    fn mouse_pressed(&mut self, host: &mut dyn SelectionHost, event: &PointerEvent) {
        let Some(area) = host.data_area() else { return };
        if !geometry::rect_contains_point(&area, event.x, event.y) {
            return;
        }
        if let Some(manager) = host.selection_manager() {
            if !event.modifiers.has(self.additive) {
                manager.clear_selection();
            }
        }
        self.anchor = Some((event.x, event.y));
        self.current = None;
    }

    fn mouse_dragged(&mut self, host: &mut dyn SelectionHost, event: &PointerEvent) {
        if self.anchor.is_none() {
            host.clear_live_handler();
            return;
        }
        self.current = self.region(host, event);
        if let Some(rect) = self.current {
            host.set_overlay(Some(self.style.overlay(Shape::Rect(rect))));
        }
        host.request_redraw();
    }

    fn mouse_released(&mut self, host: &mut dyn SelectionHost, event: &PointerEvent) {
        if self.anchor.is_none() {
            host.clear_live_handler();
            return;
        }
        if let Some(rect) = self.region(host, event) {
            if let Some(manager) = host.selection_manager() {
                manager.select_rect(rect);
            }
        }
        self.anchor = None;
        self.current = None;
        host.set_overlay(None);
        host.request_redraw();
        host.clear_live_handler();
    }
}
