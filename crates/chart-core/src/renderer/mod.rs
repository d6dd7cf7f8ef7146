// File: crates/chart-core/src/renderer/mod.rs
// Summary: Per-series style lookup and the item renderer that consults item rendering strategies.

use skia_safe as skia;

use crate::dataset::Dataset;
use crate::geometry::{self, Shape};

pub mod bar;
pub mod irs;
pub mod pie;
pub mod xy;

pub use bar::BarRenderer;
pub use irs::{
    ClassLabelIrs, DefaultLabelIrs, DefaultPaintIrs, DefaultShapeIrs, DefaultStrokeIrs, DefaultVisibilityIrs,
    LabelIrs, PaintIrs, SelectionAwarePaintIrs, ShapeIrs, StrokeIrs, VisibilityIrs,
};
pub use pie::PieRenderer;
pub use xy::XyLineRenderer;

/// One item as seen by the rendering strategies.
#[derive(Clone, Copy)]
pub struct ItemRef<'a> {
    pub dataset: &'a dyn Dataset,
    pub series: usize,
    pub item: usize,
    /// Index into the per-series style tables. Equal to `series`, except for
    /// pie sections which take one slot each.
    pub slot: usize,
}

impl<'a> ItemRef<'a> {
    pub fn new(dataset: &'a dyn Dataset, series: usize, item: usize) -> Self {
        Self { dataset, series, item, slot: series }
    }

    pub fn with_slot(mut self, slot: usize) -> Self {
        self.slot = slot;
        self
    }
}

/// Marker drawn at an item's position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemShape {
    Square { size: f32 },
    Circle { radius: f32 },
    Diamond { size: f32 },
}

impl ItemShape {
    /// Marker area centred on (x, y).
    pub fn at(&self, x: f32, y: f32) -> Shape {
        match *self {
            ItemShape::Square { size } => {
                let h = size * 0.5;
                Shape::Rect(skia::Rect::from_ltrb(x - h, y - h, x + h, y + h))
            }
            ItemShape::Circle { radius } => Shape::Path(geometry::circle_path(x, y, radius)),
            ItemShape::Diamond { size } => {
                let h = size * 0.5;
                let mut p = skia::Path::new();
                p.move_to((x, y - h));
                p.line_to((x + h, y));
                p.line_to((x, y + h));
                p.line_to((x - h, y));
                p.close();
                Shape::Path(p)
            }
        }
    }
}

fn slot<T: Copy>(values: &[Option<T>], i: usize) -> Option<T> { values.get(i).copied().flatten() }

fn set_slot<T>(values: &mut Vec<Option<T>>, i: usize, v: Option<T>) {
    if values.len() <= i {
        values.resize_with(i + 1, || None);
    }
    values[i] = v;
}

/// Per-series visual properties with defaults, the fixed lookup the default
/// strategies forward to.
#[derive(Clone, Debug)]
pub struct SeriesStyles {
    palette: Vec<skia::Color>,
    paint: Vec<Option<skia::Color>>,
    fill_paint: Vec<Option<skia::Color>>,
    outline_paint: Vec<Option<skia::Color>>,
    stroke: Vec<Option<f32>>,
    shape: Vec<Option<ItemShape>>,
    visible: Vec<Option<bool>>,
    labels_visible: Vec<Option<bool>>,
    pub default_outline_paint: skia::Color,
    pub default_stroke: f32,
    pub default_outline_stroke: f32,
    pub default_shape: ItemShape,
    pub default_labels_visible: bool,
}

impl SeriesStyles {
    pub fn new(palette: &[skia::Color]) -> Self {
        let palette = if palette.is_empty() { vec![skia::Color::from_argb(255, 64, 160, 255)] } else { palette.to_vec() };
        Self {
            palette,
            paint: Vec::new(),
            fill_paint: Vec::new(),
            outline_paint: Vec::new(),
            stroke: Vec::new(),
            shape: Vec::new(),
            visible: Vec::new(),
            labels_visible: Vec::new(),
            default_outline_paint: skia::Color::from_argb(255, 40, 40, 45),
            default_stroke: 2.0,
            default_outline_stroke: 1.0,
            default_shape: ItemShape::Square { size: 8.0 },
            default_labels_visible: false,
        }
    }

    pub fn lookup_series_paint(&self, series: usize) -> skia::Color {
        slot(&self.paint, series).unwrap_or(self.palette[series % self.palette.len()])
    }

    pub fn lookup_series_fill_paint(&self, series: usize) -> skia::Color {
        slot(&self.fill_paint, series).unwrap_or_else(|| self.lookup_series_paint(series))
    }

    pub fn lookup_series_outline_paint(&self, series: usize) -> skia::Color {
        slot(&self.outline_paint, series).unwrap_or(self.default_outline_paint)
    }

    pub fn lookup_series_stroke(&self, series: usize) -> f32 { slot(&self.stroke, series).unwrap_or(self.default_stroke) }

    pub fn lookup_series_shape(&self, series: usize) -> ItemShape { slot(&self.shape, series).unwrap_or(self.default_shape) }

    pub fn is_series_visible(&self, series: usize) -> bool { slot(&self.visible, series).unwrap_or(true) }

    pub fn is_series_item_label_visible(&self, series: usize) -> bool {
        slot(&self.labels_visible, series).unwrap_or(self.default_labels_visible)
    }

    pub fn set_series_paint(&mut self, series: usize, paint: Option<skia::Color>) { set_slot(&mut self.paint, series, paint); }

    pub fn set_series_fill_paint(&mut self, series: usize, paint: Option<skia::Color>) {
        set_slot(&mut self.fill_paint, series, paint);
    }

    pub fn set_series_outline_paint(&mut self, series: usize, paint: Option<skia::Color>) {
        set_slot(&mut self.outline_paint, series, paint);
    }

    pub fn set_series_stroke(&mut self, series: usize, width: Option<f32>) { set_slot(&mut self.stroke, series, width); }

    pub fn set_series_shape(&mut self, series: usize, shape: Option<ItemShape>) { set_slot(&mut self.shape, series, shape); }

    pub fn set_series_visible(&mut self, series: usize, visible: Option<bool>) {
        set_slot(&mut self.visible, series, visible);
    }

    pub fn set_series_item_labels_visible(&mut self, series: usize, visible: Option<bool>) {
        set_slot(&mut self.labels_visible, series, visible);
    }
}

/// Series styles plus the strategies consulted for every item.
///
/// Strategies are swapped in, not subclassed: a renderer behaves exactly
/// like a per-series renderer until a non-default strategy is installed.
pub struct ItemRenderer {
    pub styles: SeriesStyles,
    paint: Box<dyn PaintIrs>,
    stroke: Box<dyn StrokeIrs>,
    shape: Box<dyn ShapeIrs>,
    label: Box<dyn LabelIrs>,
    visibility: Box<dyn VisibilityIrs>,
}

impl ItemRenderer {
    pub fn new(palette: &[skia::Color]) -> Self {
        Self {
            styles: SeriesStyles::new(palette),
            paint: Box::new(DefaultPaintIrs),
            stroke: Box::new(DefaultStrokeIrs),
            shape: Box::new(DefaultShapeIrs),
            label: Box::new(DefaultLabelIrs::default()),
            visibility: Box::new(DefaultVisibilityIrs),
        }
    }

    pub fn set_paint_irs(&mut self, irs: Box<dyn PaintIrs>) { self.paint = irs; }

    /// Wrap the installed paint strategy, e.g. in a [`SelectionAwarePaintIrs`].
    pub fn decorate_paint_irs(&mut self, wrap: impl FnOnce(Box<dyn PaintIrs>) -> Box<dyn PaintIrs>) {
        let inner = std::mem::replace(&mut self.paint, Box::new(DefaultPaintIrs));
        self.paint = wrap(inner);
    }

    pub fn set_stroke_irs(&mut self, irs: Box<dyn StrokeIrs>) { self.stroke = irs; }

    pub fn set_shape_irs(&mut self, irs: Box<dyn ShapeIrs>) { self.shape = irs; }

    pub fn set_label_irs(&mut self, irs: Box<dyn LabelIrs>) { self.label = irs; }

    pub fn set_visibility_irs(&mut self, irs: Box<dyn VisibilityIrs>) { self.visibility = irs; }

    pub fn item_paint(&self, item: &ItemRef) -> skia::Color { self.paint.item_paint(&self.styles, item) }

    pub fn item_fill_paint(&self, item: &ItemRef) -> skia::Color { self.paint.item_fill_paint(&self.styles, item) }

    pub fn item_outline_paint(&self, item: &ItemRef) -> skia::Color { self.paint.item_outline_paint(&self.styles, item) }

    pub fn item_stroke(&self, item: &ItemRef) -> f32 { self.stroke.item_stroke(&self.styles, item) }

    pub fn item_outline_stroke(&self, item: &ItemRef) -> f32 { self.stroke.item_outline_stroke(&self.styles, item) }

    pub fn item_shape(&self, item: &ItemRef) -> ItemShape { self.shape.item_shape(&self.styles, item) }

    pub fn is_item_visible(&self, item: &ItemRef) -> bool { self.visibility.is_item_visible(&self.styles, item) }

    pub fn is_item_label_visible(&self, item: &ItemRef) -> bool { self.label.is_item_label_visible(&self.styles, item) }

    pub fn item_label(&self, item: &ItemRef, value: f64) -> Option<String> { self.label.item_label(&self.styles, item, value) }

    /// Fill `shape` then stroke its outline, both with this item's strategies.
    pub(crate) fn fill_and_outline(&self, canvas: &skia::Canvas, shape: &Shape, item: &ItemRef) {
        let mut fill = skia::Paint::default();
        fill.set_anti_alias(true);
        fill.set_style(skia::paint::Style::Fill);
        fill.set_color(self.item_fill_paint(item));
        draw_shape(canvas, shape, &fill);

        let width = self.item_outline_stroke(item);
        if width > 0.0 {
            let mut outline = skia::Paint::default();
            outline.set_anti_alias(true);
            outline.set_style(skia::paint::Style::Stroke);
            outline.set_stroke_width(width);
            outline.set_color(self.item_outline_paint(item));
            draw_shape(canvas, shape, &outline);
        }
    }

    pub(crate) fn draw_label(&self, canvas: &skia::Canvas, text: &str, x: f32, y: f32, color: skia::Color) {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_color(color);
        let mut font = skia::Font::default();
        font.set_size(11.0);
        canvas.draw_str(text, (x, y), &font, &paint);
    }
}

pub fn draw_shape(canvas: &skia::Canvas, shape: &Shape, paint: &skia::Paint) {
    match shape {
        Shape::Rect(r) => {
            canvas.draw_rect(*r, paint);
        }
        Shape::Path(p) => {
            canvas.draw_path(p, paint);
        }
    }
}
