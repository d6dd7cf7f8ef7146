// File: crates/chart-core/src/entity.rs
// Summary: Rendered hit-test entities and the per-render results they are collected into.

use std::cell::RefCell;
use std::rc::Rc;

use skia_safe as skia;

use crate::dataset::{DatasetCursor, DatasetId};
use crate::geometry::Shape;

/// What a rendered area stands for.
#[derive(Clone, Debug, PartialEq)]
pub enum EntityKind {
    XyItem { dataset: DatasetId, series: usize, item: usize },
    CategoryItem { dataset: DatasetId, row_key: String, column_key: String },
    PieSection { dataset: DatasetId, key: String },
    /// The plot's data area; not a data item.
    PlotArea,
}

impl EntityKind {
    /// Owning dataset for data-item entities.
    pub fn dataset(&self) -> Option<DatasetId> {
        match self {
            Self::XyItem { dataset, .. } | Self::CategoryItem { dataset, .. } | Self::PieSection { dataset, .. } => {
                Some(*dataset)
            }
            Self::PlotArea => None,
        }
    }

    /// Cursor addressing the item within its dataset.
    pub fn cursor(&self) -> Option<DatasetCursor> {
        match self {
            Self::XyItem { series, item, .. } => Some(DatasetCursor::xy(*series, *item)),
            Self::CategoryItem { row_key, column_key, .. } => {
                Some(DatasetCursor::category(row_key.as_str(), column_key.as_str()))
            }
            Self::PieSection { key, .. } => Some(DatasetCursor::pie(key.as_str())),
            Self::PlotArea => None,
        }
    }

    pub fn is_data_item(&self) -> bool { self.dataset().is_some() }
}

#[derive(Clone, Debug)]
pub struct ChartEntity {
    pub area: Shape,
    pub kind: EntityKind,
    pub tooltip: Option<String>,
}

impl ChartEntity {
    pub fn new(area: Shape, kind: EntityKind) -> Self { Self { area, kind, tooltip: None } }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// Entities in drawing order; later entries are on top.
#[derive(Clone, Debug, Default)]
pub struct EntityCollection {
    entities: Vec<ChartEntity>,
}

impl EntityCollection {
    pub fn new() -> Self { Self::default() }

    pub fn add(&mut self, entity: ChartEntity) { self.entities.push(entity); }

    pub fn len(&self) -> usize { self.entities.len() }

    pub fn is_empty(&self) -> bool { self.entities.is_empty() }

    pub fn clear(&mut self) { self.entities.clear(); }

    pub fn iter(&self) -> std::slice::Iter<'_, ChartEntity> { self.entities.iter() }

    /// Topmost entity containing the point.
    pub fn entity_at(&self, x: f32, y: f32) -> Option<&ChartEntity> {
        self.entities.iter().rev().find(|e| e.area.contains(x, y))
    }
}

impl<'a> IntoIterator for &'a EntityCollection {
    type Item = &'a ChartEntity;
    type IntoIter = std::slice::Iter<'a, ChartEntity>;

    fn into_iter(self) -> Self::IntoIter { self.entities.iter() }
}

impl FromIterator<ChartEntity> for EntityCollection {
    fn from_iter<I: IntoIterator<Item = ChartEntity>>(iter: I) -> Self {
        Self { entities: iter.into_iter().collect() }
    }
}

/// Results of one render pass, in logical chart coordinates.
///
/// `scale_x`/`scale_y` map logical coordinates to device pixels; pointer
/// positions must be divided by them before hit testing.
#[derive(Clone, Debug)]
pub struct RenderInfo {
    pub chart_area: skia::Rect,
    pub data_area: skia::Rect,
    pub entities: EntityCollection,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl RenderInfo {
    pub fn new(chart_area: skia::Rect, data_area: skia::Rect) -> Self {
        Self { chart_area, data_area, entities: EntityCollection::new(), scale_x: 1.0, scale_y: 1.0 }
    }

    pub fn is_scaled(&self) -> bool { self.scale_x != 1.0 || self.scale_y != 1.0 }
}

/// Render results shared between the host that draws and the selection manager that reads them.
pub type SharedRenderInfo = Rc<RefCell<Option<RenderInfo>>>;

pub fn shared_render_info() -> SharedRenderInfo { Rc::new(RefCell::new(None)) }
