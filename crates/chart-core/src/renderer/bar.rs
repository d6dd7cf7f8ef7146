// File: crates/chart-core/src/renderer/bar.rs
// Summary: Grouped bar renderer for category datasets.

use skia_safe as skia;

use super::{ItemRef, ItemRenderer};
use crate::axis::Axis;
use crate::dataset::{CategoryDataset, Dataset};
use crate::entity::{ChartEntity, EntityCollection, EntityKind};
use crate::geometry::{normalized, Shape};

pub struct BarRenderer {
    pub base: ItemRenderer,
    /// Fraction of each category slot left empty, split on both sides.
    pub category_margin: f32,
    /// Gap between bars of one category, in pixels.
    pub item_gap: f32,
}

impl BarRenderer {
    pub fn new(palette: &[skia::Color]) -> Self {
        Self { base: ItemRenderer::new(palette), category_margin: 0.2, item_gap: 2.0 }
    }

    /// Bar rectangle for (row, column), or `None` if the cell is empty.
    pub fn bar_rect(&self, area: skia::Rect, data: &dyn CategoryDataset, value_axis: &Axis, row: usize, column: usize) -> Option<skia::Rect> {
        let value = data.value(row, column).filter(|v| v.is_finite())?;
        let columns = data.column_count().max(1) as f32;
        let rows = data.row_count().max(1) as f32;
        let slot = area.width() / columns;
        let inner = slot * (1.0 - self.category_margin);
        let bar = ((inner - self.item_gap * (rows - 1.0)) / rows).max(1.0);
        let left = area.left + slot * column as f32 + (slot - inner) * 0.5 + (bar + self.item_gap) * row as f32;
        let base = value_axis.to_px(value_axis.min.max(0.0).min(value_axis.max), area.bottom, area.top);
        let top = value_axis.to_px(value, area.bottom, area.top);
        Some(normalized(skia::Rect::from_ltrb(left, top, left + bar, base)))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        canvas: &skia::Canvas,
        area: skia::Rect,
        data: &dyn CategoryDataset,
        dataset: &dyn Dataset,
        value_axis: &Axis,
        entities: &mut EntityCollection,
        draw_labels: bool,
    ) {
        canvas.save();
        canvas.clip_rect(area, skia::ClipOp::Intersect, true);

        for row in 0..data.row_count() {
            let Some(row_key) = data.row_key(row) else { continue };
            for column in 0..data.column_count() {
                let item = ItemRef::new(dataset, row, column);
                if !self.base.is_item_visible(&item) {
                    continue;
                }
                let (Some(rect), Some(column_key)) =
                    (self.bar_rect(area, data, value_axis, row, column), data.column_key(column))
                else {
                    continue;
                };
                let shape = Shape::Rect(rect);
                self.base.fill_and_outline(canvas, &shape, &item);

                let value = data.value(row, column).unwrap_or_default();
                if draw_labels && self.base.is_item_label_visible(&item) {
                    if let Some(text) = self.base.item_label(&item, value) {
                        self.base.draw_label(canvas, &text, rect.left, rect.top - 4.0, self.base.item_paint(&item));
                    }
                }
                let tooltip = format!("{row_key}, {column_key} = {value:.2}");
                let kind = EntityKind::CategoryItem { dataset: dataset.id(), row_key: row_key.clone(), column_key };
                entities.add(ChartEntity::new(shape, kind).with_tooltip(tooltip));
            }
        }

        canvas.restore();
    }
}
