// File: crates/chart-core/src/interaction/mod.rs
// Summary: Toolkit-neutral pointer events and the selection gesture handler protocol.

use skia_safe as skia;

use crate::geometry::Shape;
use crate::selection::EntitySelectionManager;

pub mod circle;
pub mod click;
pub mod region;

pub use circle::CircularSelectionHandler;
pub use click::ClickSelectionHandler;
pub use region::RegionSelectionHandler;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    Shift,
    Ctrl,
    Alt,
    Meta,
}

/// Modifier keys held while a pointer event happened.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { shift: false, ctrl: false, alt: false, meta: false };

    pub fn with(mut self, key: ModifierKey) -> Self {
        match key {
            ModifierKey::Shift => self.shift = true,
            ModifierKey::Ctrl => self.ctrl = true,
            ModifierKey::Alt => self.alt = true,
            ModifierKey::Meta => self.meta = true,
        }
        self
    }

    pub fn has(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::Shift => self.shift,
            ModifierKey::Ctrl => self.ctrl,
            ModifierKey::Alt => self.alt,
            ModifierKey::Meta => self.meta,
        }
    }
}

/// Pointer position in device pixels, relative to the chart panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32) -> Self { Self { x, y, modifiers: Modifiers::NONE } }

    pub fn with_modifier(mut self, key: ModifierKey) -> Self {
        self.modifiers = self.modifiers.with(key);
        self
    }
}

/// Live selection region drawn on top of the chart, in device pixels.
#[derive(Clone, Debug)]
pub struct SelectionOverlay {
    pub shape: Shape,
    pub fill: skia::Color,
    pub outline: skia::Color,
}

/// Overlay colours used by the region handlers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub fill: skia::Color,
    pub outline: skia::Color,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            fill: skia::Color::from_argb(48, 64, 160, 255),
            outline: skia::Color::from_argb(200, 64, 160, 255),
        }
    }
}

impl OverlayStyle {
    pub fn overlay(&self, shape: Shape) -> SelectionOverlay {
        SelectionOverlay { shape, fill: self.fill, outline: self.outline }
    }
}

/// What a gesture handler needs from the panel hosting it.
pub trait SelectionHost {
    fn selection_manager(&self) -> Option<&EntitySelectionManager>;

    /// Data area of the last render, in device pixels.
    fn data_area(&self) -> Option<skia::Rect>;

    fn set_overlay(&mut self, overlay: Option<SelectionOverlay>);

    fn request_redraw(&mut self);

    /// Drop the current live handler; the next press picks a new one.
    fn clear_live_handler(&mut self);
}

/// A pointer gesture state machine.
///
/// Live handlers receive press/drag/release once the host makes them live on
/// a press; click handlers receive clicks.
pub trait MouseHandler {
    fn id(&self) -> &'static str;

    /// Modifier that must be held for this handler to act, if any.
    fn required_modifier(&self) -> Option<ModifierKey> { None }

    fn accepts(&self, modifiers: &Modifiers) -> bool {
        self.required_modifier().map_or(true, |key| modifiers.has(key))
    }

    /// Whether the host may make this handler live on a press.
    fn is_live_handler(&self) -> bool { false }

    fn mouse_pressed(&mut self, _host: &mut dyn SelectionHost, _event: &PointerEvent) {}

    fn mouse_dragged(&mut self, _host: &mut dyn SelectionHost, _event: &PointerEvent) {}

    fn mouse_released(&mut self, _host: &mut dyn SelectionHost, _event: &PointerEvent) {}

    fn mouse_clicked(&mut self, _host: &mut dyn SelectionHost, _event: &PointerEvent) {}
}
