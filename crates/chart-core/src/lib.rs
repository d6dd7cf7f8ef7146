// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports datasets, selection engine, rendering and interaction APIs.

pub mod axis;
pub mod chart;
pub mod dataset;
pub mod entity;
pub mod error;
pub mod extension;
pub mod geometry;
pub mod grid;
pub mod interaction;
pub mod panel;
pub mod plot;
pub mod renderer;
pub mod selection;
pub mod theme;
pub mod types;

pub use axis::Axis;
pub use chart::{Chart, RenderOptions, RgbaFrame};
pub use dataset::{
    CategoryDataset, Dataset, DatasetChangeEvent, DatasetChangeKind, DatasetChangeListener, DatasetCursor,
    DatasetId, DefaultCategoryDataset, DefaultPieDataset, PieDataset, XyDataset, XySeries, XySeriesCollection,
};
pub use entity::{shared_render_info, ChartEntity, EntityCollection, EntityKind, RenderInfo, SharedRenderInfo};
pub use error::DatasetError;
pub use extension::{
    Capability, DatasetExtension, DatasetExtensionManager, DatasetLabelExtension, DatasetSelectionExtension, ExtensionChangeEvent,
    ExtensionKind, IterableSelection, LabelExtension, ListenerId, SelectionExtension, NO_LABEL,
};
pub use geometry::Shape;
pub use interaction::{
    CircularSelectionHandler, ClickSelectionHandler, ModifierKey, Modifiers, MouseHandler, PointerEvent,
    RegionSelectionHandler, SelectionHost, SelectionOverlay,
};
pub use panel::ChartPanel;
pub use plot::{CategoryPlot, PiePlot, Plot, XyPlot};
pub use renderer::{ItemRef, ItemRenderer, ItemShape, SeriesStyles, SelectionAwarePaintIrs};
pub use selection::{EntitySelectionManager, SelectionMode};
pub use theme::Theme;
