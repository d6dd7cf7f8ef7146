// File: crates/chart-core/src/selection.rs
// Summary: Entity-based selection manager: maps screen-space gestures onto dataset selection extensions.

use std::rc::Rc;

use skia_safe as skia;

use crate::dataset::Dataset;
use crate::entity::{ChartEntity, EntityKind, RenderInfo, SharedRenderInfo};
use crate::extension::{DatasetExtensionManager, DatasetSelectionExtension};
use crate::geometry::{self, Shape};

/// How an entity area must relate to a selection region to count as hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// The entity must lie entirely inside the region.
    #[default]
    Containment,
    /// Any overlap with positive area counts.
    Intersection,
}

/// Selects data items by testing pointer geometry against the entities of
/// the most recent render.
///
/// Only datasets in the governed list are touched. Their selection state is
/// the dataset's native extension, or one registered with the extension
/// manager.
pub struct EntitySelectionManager {
    render_info: SharedRenderInfo,
    datasets: Vec<Rc<dyn Dataset>>,
    extensions: Option<Rc<DatasetExtensionManager>>,
    mode: SelectionMode,
}

impl EntitySelectionManager {
    pub fn new(render_info: SharedRenderInfo, datasets: Vec<Rc<dyn Dataset>>) -> Self {
        Self { render_info, datasets, extensions: None, mode: SelectionMode::default() }
    }

    pub fn with_extension_manager(mut self, extensions: Rc<DatasetExtensionManager>) -> Self {
        self.extensions = Some(extensions);
        self
    }

    pub fn mode(&self) -> SelectionMode { self.mode }

    pub fn set_mode(&mut self, mode: SelectionMode) { self.mode = mode; }

    pub fn set_intersection_selection(&mut self, intersection: bool) {
        self.mode = if intersection { SelectionMode::Intersection } else { SelectionMode::Containment };
    }

    pub fn datasets(&self) -> &[Rc<dyn Dataset>] { &self.datasets }

    pub fn extension_manager(&self) -> Option<&Rc<DatasetExtensionManager>> { self.extensions.as_ref() }

    /// Selection state for `dataset`: native first, then the extension manager.
    pub fn selection_extension(&self, dataset: &dyn Dataset) -> Option<Rc<dyn DatasetSelectionExtension>> {
        dataset
            .selection_extension()
            .or_else(|| self.extensions.as_ref().and_then(|m| m.selection_extension(dataset)))
    }

    /// Select every item whose area contains the device-space point.
    /// Existing selection is kept; returns the number of entities selected.
    pub fn select_point(&self, x: f32, y: f32) -> usize {
        // Collect first: listeners may re-render while we select.
        let hit: Vec<EntityKind> = {
            let guard = self.render_info.borrow();
            let Some(info) = guard.as_ref() else { return 0 };
            let (x, y) = if info.is_scaled() { (x / info.scale_x, y / info.scale_y) } else { (x, y) };
            info.entities
                .iter()
                .filter(|e| e.kind.is_data_item() && !e.area.is_degenerate() && e.area.contains(x, y))
                .map(|e| e.kind.clone())
                .collect()
        };
        let hits = hit.iter().filter(|kind| self.select_item(kind)).count();
        log::debug!("point selection at ({x:.1}, {y:.1}) selected {hits} item(s)");
        hits
    }

    /// Select every item matching a device-space rectangle under the current mode.
    pub fn select_rect(&self, rect: skia::Rect) -> usize {
        let mode = self.mode;
        self.select_batched(|info| {
            let region = if info.is_scaled() {
                geometry::normalized(geometry::unscale_rect(&rect, info.scale_x, info.scale_y))
            } else {
                geometry::normalized(rect)
            };
            let region_path = geometry::rect_path(&region);
            self.select_matching(info, |area| match area {
                Shape::Rect(r) => match mode {
                    SelectionMode::Containment => geometry::rect_contains_rect(&region, r),
                    SelectionMode::Intersection => geometry::rects_intersect(&region, r),
                },
                Shape::Path(p) => {
                    // Bounds inside the rectangle means the area is inside too.
                    geometry::rect_contains_rect(&region, p.bounds()) || path_matches(&region_path, p, mode)
                }
            })
        })
    }

    /// Select every item matching a device-space closed path under the current mode.
    pub fn select_path(&self, path: &skia::Path) -> usize {
        let mode = self.mode;
        self.select_batched(|info| {
            let region = if info.is_scaled() {
                path.with_transform(&skia::Matrix::scale((1.0 / info.scale_x, 1.0 / info.scale_y)))
            } else {
                path.clone()
            };
            self.select_matching(info, |area| path_matches(&region, &area.to_path(), mode))
        })
    }

    /// Clear the selection of every governed dataset; each extension emits one event.
    pub fn clear_selection(&self) {
        for ds in &self.datasets {
            if let Some(ext) = self.selection_extension(ds.as_ref()) {
                ext.clear_selection();
            }
        }
    }

    /// Mark one entity's item selected. Entities of datasets this manager
    /// does not govern, or without selection support, are ignored.
    pub fn select_entity(&self, entity: &ChartEntity) -> bool { self.select_item(&entity.kind) }

    fn select_item(&self, kind: &EntityKind) -> bool {
        let (Some(id), Some(cursor)) = (kind.dataset(), kind.cursor()) else { return false };
        let Some(ds) = self.datasets.iter().find(|d| d.id() == id) else {
            log::debug!("entity of ungoverned dataset {} ignored", id.get());
            return false;
        };
        match self.selection_extension(ds.as_ref()) {
            Some(ext) => {
                ext.set_selected(&cursor, true);
                true
            }
            None => {
                log::debug!("dataset {} has no selection support", id.get());
                false
            }
        }
    }

    /// Run `select` with every governed extension muted, so each affected
    /// extension emits a single event once the gesture is applied. Extensions
    /// the caller had already muted stay muted.
    fn select_batched(&self, select: impl FnOnce(&RenderInfo) -> usize) -> usize {
        let extensions: Vec<Rc<dyn DatasetSelectionExtension>> = self
            .datasets
            .iter()
            .filter_map(|d| self.selection_extension(d.as_ref()))
            .filter(|ext| ext.is_notify())
            .collect();
        for ext in &extensions {
            ext.set_notify(false);
        }
        let hits = match self.render_info.borrow().as_ref() {
            Some(info) => select(info),
            None => 0,
        };
        for ext in &extensions {
            ext.set_notify(true);
        }
        hits
    }

    fn select_matching(&self, info: &RenderInfo, matches: impl Fn(&Shape) -> bool) -> usize {
        let mut tested = 0;
        let mut hits = 0;
        for entity in info.entities.iter().filter(|e| e.kind.is_data_item()) {
            if entity.area.is_degenerate() {
                continue;
            }
            tested += 1;
            if matches(&entity.area) && self.select_item(&entity.kind) {
                hits += 1;
            }
        }
        log::debug!("region selection ({:?}) tested {tested} entities, selected {hits}", self.mode);
        hits
    }
}

/// Exact area test between a selection region and an entity area.
fn path_matches(region: &skia::Path, area: &skia::Path, mode: SelectionMode) -> bool {
    if !geometry::rects_intersect(region.bounds(), area.bounds()) {
        return false;
    }
    match mode {
        SelectionMode::Containment => area.op(region, skia::PathOp::Difference).is_some_and(|rest| rest.is_empty()),
        SelectionMode::Intersection => area.op(region, skia::PathOp::Intersect).is_some_and(|common| !common.is_empty()),
    }
}
