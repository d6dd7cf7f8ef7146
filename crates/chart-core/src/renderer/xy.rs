// File: crates/chart-core/src/renderer/xy.rs
// Summary: Line-and-marker renderer for XY datasets; records one entity per drawn item.

use skia_safe as skia;

use super::{ItemRef, ItemRenderer};
use crate::axis::Axis;
use crate::dataset::{Dataset, XyDataset};
use crate::entity::{ChartEntity, EntityCollection, EntityKind};
use crate::geometry::rect_contains_point;

pub struct XyLineRenderer {
    pub base: ItemRenderer,
    pub lines_visible: bool,
    pub shapes_visible: bool,
}

impl XyLineRenderer {
    pub fn new(palette: &[skia::Color]) -> Self {
        Self { base: ItemRenderer::new(palette), lines_visible: true, shapes_visible: true }
    }

    /// Draw every visible series of `data` into `area` and record item entities.
    ///
    /// `dataset` is the same object as `data`, viewed through the base trait.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        area: skia::Rect,
        data: &dyn XyDataset,
        dataset: &dyn Dataset,
        x_axis: &Axis,
        y_axis: &Axis,
        entities: &mut EntityCollection,
        draw_labels: bool,
    ) {
        let sx = |x: f64| x_axis.to_px(x, area.left, area.right);
        let sy = |y: f64| y_axis.to_px(y, area.bottom, area.top);

        canvas.save();
        canvas.clip_rect(area, skia::ClipOp::Intersect, true);

        for series in 0..data.series_count() {
            let key = data.series_key(series).unwrap_or_default();
            let points: Vec<(usize, f64, f64)> = (0..data.item_count(series))
                .filter_map(|i| Some((i, data.x(series, i)?, data.y(series, i)?)))
                .filter(|(_, x, y)| x.is_finite() && y.is_finite())
                .collect();

            if self.lines_visible && points.len() >= 2 && self.base.styles.is_series_visible(series) {
                let head = ItemRef::new(dataset, series, points[0].0);
                let mut path = skia::Path::new();
                path.move_to((sx(points[0].1), sy(points[0].2)));
                for &(_, x, y) in points.iter().skip(1) {
                    path.line_to((sx(x), sy(y)));
                }
                let mut stroke = skia::Paint::default();
                stroke.set_anti_alias(true);
                stroke.set_style(skia::paint::Style::Stroke);
                stroke.set_stroke_width(self.base.item_stroke(&head));
                stroke.set_color(self.base.item_paint(&head));
                canvas.draw_path(&path, &stroke);
            }

            for &(i, x, y) in &points {
                let item = ItemRef::new(dataset, series, i);
                if !self.base.is_item_visible(&item) {
                    continue;
                }
                let (px, py) = (sx(x), sy(y));
                let shape = self.base.item_shape(&item).at(px, py);
                if self.shapes_visible {
                    self.base.fill_and_outline(canvas, &shape, &item);
                }
                if draw_labels && self.base.is_item_label_visible(&item) {
                    if let Some(text) = self.base.item_label(&item, y) {
                        self.base.draw_label(canvas, &text, px + 6.0, py - 6.0, self.base.item_paint(&item));
                    }
                }
                // Items outside the data area are clipped away and get no entity.
                if rect_contains_point(&area, px, py) {
                    let kind = EntityKind::XyItem { dataset: dataset.id(), series, item: i };
                    entities.add(ChartEntity::new(shape, kind).with_tooltip(format!("{key}: ({x:.2}, {y:.2})")));
                }
            }
        }

        canvas.restore();
    }
}
