// File: crates/chart-core/src/renderer/irs.rs
// Summary: Item rendering strategies: per-item paint, stroke, shape, label and visibility providers.

use std::rc::Rc;

use skia_safe as skia;

use super::{ItemRef, ItemShape, SeriesStyles};
use crate::dataset::{Dataset, DatasetCursor};
use crate::extension::{DatasetExtensionManager, NO_LABEL};

pub trait PaintIrs {
    fn item_paint(&self, styles: &SeriesStyles, item: &ItemRef) -> skia::Color;
    fn item_fill_paint(&self, styles: &SeriesStyles, item: &ItemRef) -> skia::Color;
    fn item_outline_paint(&self, styles: &SeriesStyles, item: &ItemRef) -> skia::Color;
}

pub trait StrokeIrs {
    fn item_stroke(&self, styles: &SeriesStyles, item: &ItemRef) -> f32;
    fn item_outline_stroke(&self, styles: &SeriesStyles, item: &ItemRef) -> f32;
}

pub trait ShapeIrs {
    fn item_shape(&self, styles: &SeriesStyles, item: &ItemRef) -> ItemShape;
}

pub trait LabelIrs {
    fn is_item_label_visible(&self, styles: &SeriesStyles, item: &ItemRef) -> bool;
    fn item_label(&self, styles: &SeriesStyles, item: &ItemRef, value: f64) -> Option<String>;
}

pub trait VisibilityIrs {
    fn is_item_visible(&self, styles: &SeriesStyles, item: &ItemRef) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPaintIrs;

impl PaintIrs for DefaultPaintIrs {
    fn item_paint(&self, styles: &SeriesStyles, item: &ItemRef) -> skia::Color { styles.lookup_series_paint(item.slot) }

    fn item_fill_paint(&self, styles: &SeriesStyles, item: &ItemRef) -> skia::Color {
        styles.lookup_series_fill_paint(item.slot)
    }

    fn item_outline_paint(&self, styles: &SeriesStyles, item: &ItemRef) -> skia::Color {
        styles.lookup_series_outline_paint(item.slot)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultStrokeIrs;

impl StrokeIrs for DefaultStrokeIrs {
    fn item_stroke(&self, styles: &SeriesStyles, item: &ItemRef) -> f32 { styles.lookup_series_stroke(item.slot) }

    fn item_outline_stroke(&self, styles: &SeriesStyles, _item: &ItemRef) -> f32 { styles.default_outline_stroke }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultShapeIrs;

impl ShapeIrs for DefaultShapeIrs {
    fn item_shape(&self, styles: &SeriesStyles, item: &ItemRef) -> ItemShape { styles.lookup_series_shape(item.slot) }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultVisibilityIrs;

impl VisibilityIrs for DefaultVisibilityIrs {
    fn is_item_visible(&self, styles: &SeriesStyles, item: &ItemRef) -> bool { styles.is_series_visible(item.slot) }
}

/// Labels items with their value, formatted to `precision` decimals.
#[derive(Clone, Copy, Debug)]
pub struct DefaultLabelIrs {
    pub precision: usize,
}

impl Default for DefaultLabelIrs {
    fn default() -> Self { Self { precision: 2 } }
}

impl LabelIrs for DefaultLabelIrs {
    fn is_item_label_visible(&self, styles: &SeriesStyles, item: &ItemRef) -> bool {
        styles.is_series_item_label_visible(item.slot)
    }

    fn item_label(&self, _styles: &SeriesStyles, _item: &ItemRef, value: f64) -> Option<String> {
        Some(format!("{value:.*}", self.precision))
    }
}

/// Whether the item's dataset reports it selected, through its native
/// extension or one registered with `extensions`. Items of datasets without
/// selection support read as unselected.
pub fn is_item_selected(item: &ItemRef, extensions: Option<&DatasetExtensionManager>) -> bool {
    let Some(cursor) = item.dataset.cursor_at(item.series, item.item) else { return false };
    let ext = item
        .dataset
        .selection_extension()
        .or_else(|| extensions.and_then(|m| m.selection_extension(item.dataset)));
    ext.is_some_and(|ext| ext.is_selected(&cursor))
}

/// Paint strategy that substitutes highlight colours for selected items and
/// delegates everything else to the wrapped strategy.
pub struct SelectionAwarePaintIrs {
    inner: Box<dyn PaintIrs>,
    extensions: Option<Rc<DatasetExtensionManager>>,
    item_highlight: Option<skia::Color>,
    fill_highlight: Option<skia::Color>,
    outline_highlight: Option<skia::Color>,
}

impl SelectionAwarePaintIrs {
    pub fn new(inner: Box<dyn PaintIrs>) -> Self {
        Self { inner, extensions: None, item_highlight: None, fill_highlight: None, outline_highlight: None }
    }

    pub fn with_extension_manager(mut self, extensions: Rc<DatasetExtensionManager>) -> Self {
        self.extensions = Some(extensions);
        self
    }

    pub fn with_item_highlight(mut self, color: skia::Color) -> Self {
        self.item_highlight = Some(color);
        self
    }

    pub fn with_fill_highlight(mut self, color: skia::Color) -> Self {
        self.fill_highlight = Some(color);
        self
    }

    pub fn with_outline_highlight(mut self, color: skia::Color) -> Self {
        self.outline_highlight = Some(color);
        self
    }

    fn highlight(&self, channel: Option<skia::Color>, item: &ItemRef) -> Option<skia::Color> {
        channel.filter(|_| is_item_selected(item, self.extensions.as_deref()))
    }
}

impl PaintIrs for SelectionAwarePaintIrs {
    fn item_paint(&self, styles: &SeriesStyles, item: &ItemRef) -> skia::Color {
        self.highlight(self.item_highlight, item).unwrap_or_else(|| self.inner.item_paint(styles, item))
    }

    fn item_fill_paint(&self, styles: &SeriesStyles, item: &ItemRef) -> skia::Color {
        self.highlight(self.fill_highlight, item).unwrap_or_else(|| self.inner.item_fill_paint(styles, item))
    }

    fn item_outline_paint(&self, styles: &SeriesStyles, item: &ItemRef) -> skia::Color {
        self.highlight(self.outline_highlight, item).unwrap_or_else(|| self.inner.item_outline_paint(styles, item))
    }
}

/// Shows a label only on items that carry a class label in the dataset's
/// label extension, rendered as `#<label>`.
#[derive(Default)]
pub struct ClassLabelIrs {
    extensions: Option<Rc<DatasetExtensionManager>>,
}

impl ClassLabelIrs {
    pub fn new(extensions: Option<Rc<DatasetExtensionManager>>) -> Self { Self { extensions } }

    fn class_of(&self, item: &ItemRef) -> i32 {
        let Some(cursor) = item.dataset.cursor_at(item.series, item.item) else { return NO_LABEL };
        label_of(item.dataset, &cursor, self.extensions.as_deref())
    }
}

fn label_of(dataset: &dyn Dataset, cursor: &DatasetCursor, extensions: Option<&DatasetExtensionManager>) -> i32 {
    dataset
        .label_extension()
        .or_else(|| extensions.and_then(|m| m.label_extension(dataset)))
        .map_or(NO_LABEL, |ext| ext.label(cursor))
}

impl LabelIrs for ClassLabelIrs {
    fn is_item_label_visible(&self, _styles: &SeriesStyles, item: &ItemRef) -> bool { self.class_of(item) != NO_LABEL }

    fn item_label(&self, _styles: &SeriesStyles, item: &ItemRef, _value: f64) -> Option<String> {
        let class = self.class_of(item);
        (class != NO_LABEL).then(|| format!("#{class}"))
    }
}
