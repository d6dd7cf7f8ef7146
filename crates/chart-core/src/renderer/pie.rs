// File: crates/chart-core/src/renderer/pie.rs
// Summary: Pie renderer; each section is a wedge path and takes its own style slot.

use skia_safe as skia;

use super::{ItemRef, ItemRenderer};
use crate::dataset::{Dataset, PieDataset};
use crate::entity::{ChartEntity, EntityCollection, EntityKind};
use crate::geometry::Shape;

pub struct PieRenderer {
    pub base: ItemRenderer,
    /// Degrees, clockwise from 12 o'clock is -90.
    pub start_angle: f32,
    /// Fraction of the smaller area side used as the pie diameter.
    pub size: f32,
}

impl PieRenderer {
    pub fn new(palette: &[skia::Color]) -> Self {
        let mut base = ItemRenderer::new(palette);
        base.styles.default_outline_stroke = 1.5;
        Self { base, start_angle: -90.0, size: 0.8 }
    }

    /// Wedge path for each section with a positive value, as (index, path).
    pub fn wedges(&self, area: skia::Rect, data: &dyn PieDataset) -> Vec<(usize, skia::Path)> {
        let total: f64 = (0..data.key_count()).filter_map(|i| data.value(i)).filter(|v| *v > 0.0).sum();
        if total <= 0.0 {
            return Vec::new();
        }
        let d = area.width().min(area.height()) * self.size;
        let (cx, cy) = (area.center_x(), area.center_y());
        let oval = skia::Rect::from_xywh(cx - d * 0.5, cy - d * 0.5, d, d);

        let mut start = self.start_angle;
        let mut out = Vec::new();
        for i in 0..data.key_count() {
            let Some(v) = data.value(i).filter(|v| *v > 0.0) else { continue };
            let sweep = (v / total * 360.0) as f32;
            let mut path = skia::Path::new();
            if sweep >= 360.0 - 1e-3 {
                path.add_oval(oval, None);
            } else {
                path.move_to((cx, cy));
                path.arc_to(oval, start, sweep, false);
                path.close();
            }
            out.push((i, path));
            start += sweep;
        }
        out
    }

    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        area: skia::Rect,
        data: &dyn PieDataset,
        dataset: &dyn Dataset,
        entities: &mut EntityCollection,
        draw_labels: bool,
    ) {
        let total: f64 = (0..data.key_count()).filter_map(|i| data.value(i)).filter(|v| *v > 0.0).sum();
        for (i, path) in self.wedges(area, data) {
            let item = ItemRef::new(dataset, 0, i).with_slot(i);
            if !self.base.is_item_visible(&item) {
                continue;
            }
            let Some(key) = data.key(i) else { continue };
            let value = data.value(i).unwrap_or_default();
            let shape = Shape::Path(path);
            self.base.fill_and_outline(canvas, &shape, &item);

            if draw_labels && self.base.is_item_label_visible(&item) {
                if let Some(text) = self.base.item_label(&item, value) {
                    let b = shape.bounds();
                    self.base.draw_label(canvas, &text, b.center_x(), b.center_y(), self.base.item_outline_paint(&item));
                }
            }
            let tooltip = format!("{key} = {value:.2} ({:.1}%)", value / total * 100.0);
            let kind = EntityKind::PieSection { dataset: dataset.id(), key };
            entities.add(ChartEntity::new(shape, kind).with_tooltip(tooltip));
        }
    }
}
