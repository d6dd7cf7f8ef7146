// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings).

use skia_safe as skia;

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Screen margins around the data area, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }

    pub const fn hsum(&self) -> u32 { self.left + self.right }

    pub const fn vsum(&self) -> u32 { self.top + self.bottom }

    /// Data area inside a `width` x `height` chart; never narrower than one pixel.
    pub fn data_area(&self, width: i32, height: i32) -> skia::Rect {
        let l = self.left as f32;
        let t = self.top as f32;
        let r = (width as f32 - self.right as f32).max(l + 1.0);
        let b = (height as f32 - self.bottom as f32).max(t + 1.0);
        skia::Rect::from_ltrb(l, t, r, b)
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(72, 24, 24, 56)
    }
}
