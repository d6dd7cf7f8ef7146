// File: crates/chart-core/src/interaction/circle.rs
// Summary: Circular drag-to-select handler.

use super::{ModifierKey, MouseHandler, OverlayStyle, PointerEvent, SelectionHost};
use crate::geometry::{self, Shape};

/// Radius below which a circle is widened, so a click-release still selects
/// the item directly under the pointer.
pub const MIN_RADIUS: f32 = 1.0;

/// Press sets the centre, dragging grows the radius, release selects.
/// The circle never extends past the data area.
#[derive(Clone, Debug)]
pub struct CircularSelectionHandler {
    required: Option<ModifierKey>,
    additive: ModifierKey,
    style: OverlayStyle,
    center: Option<(f32, f32)>,
    radius: f32,
}

impl CircularSelectionHandler {
    pub fn new() -> Self {
        Self { required: None, additive: ModifierKey::Shift, style: OverlayStyle::default(), center: None, radius: 0.0 }
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

    pub fn is_dragging(&self) -> bool { self.center.is_some() }

    /// Distance from the centre to the clamped pointer, at least
    /// `MIN_RADIUS`, then shrunk until the circle's four extremal points lie
    /// inside the data area.
    fn radius_to(&self, host: &dyn SelectionHost, event: &PointerEvent) -> Option<f32> {
        let (cx, cy) = self.center?;
        let area = geometry::normalized(host.data_area()?);
        let (x, y) = geometry::clamp_point(&area, event.x, event.y);
        let mut r = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt().max(MIN_RADIUS);
        if cx - r < area.left { r = cx - area.left; }
        if cx + r > area.right { r = area.right - cx; }
        if cy - r < area.top { r = cy - area.top; }
        if cy + r > area.bottom { r = area.bottom - cy; }
        Some(r.max(0.0))
    }
}

impl Default for CircularSelectionHandler {
    fn default() -> Self { Self::new() }
}

impl MouseHandler for CircularSelectionHandler {
    fn id(&self) -> &'static str { "circular_selection" }

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
        // Keep the centre far enough from the edges for the minimum radius.
        let inner = geometry::normalized(area).with_inset((MIN_RADIUS, MIN_RADIUS));
        self.center = Some(if inner.is_empty() {
            (event.x, event.y)
        } else {
            geometry::clamp_point(&inner, event.x, event.y)
        });
        self.radius = MIN_RADIUS;
    }

    fn mouse_dragged(&mut self, host: &mut dyn SelectionHost, event: &PointerEvent) {
        let (Some((cx, cy)), Some(r)) = (self.center, self.radius_to(host, event)) else {
            host.clear_live_handler();
            return;
        };
        self.radius = r;
        host.set_overlay(Some(self.style.overlay(Shape::Path(geometry::circle_path(cx, cy, r)))));
        host.request_redraw();
    }

    fn mouse_released(&mut self, host: &mut dyn SelectionHost, event: &PointerEvent) {
        let Some((cx, cy)) = self.center else {
            host.clear_live_handler();
            return;
        };
        let r = self.radius_to(host, event).unwrap_or(self.radius);
        let path = geometry::circle_path(cx, cy, r);
        if let Some(manager) = host.selection_manager() {
            manager.select_path(&path);
        }
        self.center = None;
        self.radius = 0.0;
        host.set_overlay(None);
        host.request_redraw();
        host.clear_live_handler();
    }
}
