// File: crates/chart-core/src/plot.rs
// Summary: Plots pair one dataset with its renderer and axes.

use std::rc::Rc;

use skia_safe as skia;

use crate::axis::Axis;
use crate::dataset::{CategoryDataset, Dataset, PieDataset, XyDataset};
use crate::entity::EntityCollection;
use crate::renderer::{BarRenderer, ItemRenderer, PieRenderer, XyLineRenderer};
use crate::theme::Theme;

pub struct XyPlot {
    data: Rc<dyn XyDataset>,
    dataset: Rc<dyn Dataset>,
    pub renderer: XyLineRenderer,
    pub x_label: String,
    pub y_label: String,
    /// Fixed ranges; `None` auto-ranges from the data on every draw.
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
}

impl XyPlot {
    pub fn new<D: XyDataset + 'static>(data: Rc<D>, theme: &Theme) -> Self {
        let mut renderer = XyLineRenderer::new(&theme.palette);
        renderer.base.styles.default_outline_paint = theme.item_outline;
        Self {
            data: data.clone(),
            dataset: data,
            renderer,
            x_label: "X".into(),
            y_label: "Y".into(),
            x_range: None,
            y_range: None,
        }
    }

    pub fn with_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn data(&self) -> &Rc<dyn XyDataset> { &self.data }

    pub fn axes(&self) -> (Axis, Axis) {
        let d = self.data.as_ref();
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for s in 0..d.series_count() {
            for i in 0..d.item_count(s) {
                if let (Some(x), Some(y)) = (d.x(s, i), d.y(s, i)) {
                    xs.push(x);
                    ys.push(y);
                }
            }
        }
        let x = match self.x_range {
            Some((lo, hi)) => Axis::new(self.x_label.clone(), lo, hi),
            None => Axis::auto(self.x_label.clone(), min_max(&xs)),
        };
        let y = match self.y_range {
            Some((lo, hi)) => Axis::new(self.y_label.clone(), lo, hi),
            None => Axis::auto(self.y_label.clone(), min_max(&ys)),
        };
        (x, y)
    }
}

pub struct CategoryPlot {
    data: Rc<dyn CategoryDataset>,
    dataset: Rc<dyn Dataset>,
    pub renderer: BarRenderer,
    pub value_label: String,
    pub value_range: Option<(f64, f64)>,
}

impl CategoryPlot {
    pub fn new<D: CategoryDataset + 'static>(data: Rc<D>, theme: &Theme) -> Self {
        let mut renderer = BarRenderer::new(&theme.palette);
        renderer.base.styles.default_outline_paint = theme.item_outline;
        Self { data: data.clone(), dataset: data, renderer, value_label: "Value".into(), value_range: None }
    }

    pub fn data(&self) -> &Rc<dyn CategoryDataset> { &self.data }

    /// Value axis; auto-ranged axes always include zero.
    pub fn value_axis(&self) -> Axis {
        if let Some((lo, hi)) = self.value_range {
            return Axis::new(self.value_label.clone(), lo, hi);
        }
        let d = self.data.as_ref();
        let mut values = vec![0.0];
        for r in 0..d.row_count() {
            values.extend((0..d.column_count()).filter_map(|c| d.value(r, c)));
        }
        Axis::auto(self.value_label.clone(), min_max(&values))
    }
}

pub struct PiePlot {
    data: Rc<dyn PieDataset>,
    dataset: Rc<dyn Dataset>,
    pub renderer: PieRenderer,
}

impl PiePlot {
    pub fn new<D: PieDataset + 'static>(data: Rc<D>, theme: &Theme) -> Self {
        let mut renderer = PieRenderer::new(&theme.palette);
        renderer.base.styles.default_outline_paint = theme.background;
        Self { data: data.clone(), dataset: data, renderer }
    }

    pub fn data(&self) -> &Rc<dyn PieDataset> { &self.data }
}

pub enum Plot {
    Xy(XyPlot),
    Category(CategoryPlot),
    Pie(PiePlot),
}

impl Plot {
    pub fn xy<D: XyDataset + 'static>(data: Rc<D>, theme: &Theme) -> Self { Plot::Xy(XyPlot::new(data, theme)) }

    pub fn category<D: CategoryDataset + 'static>(data: Rc<D>, theme: &Theme) -> Self {
        Plot::Category(CategoryPlot::new(data, theme))
    }

    pub fn pie<D: PieDataset + 'static>(data: Rc<D>, theme: &Theme) -> Self { Plot::Pie(PiePlot::new(data, theme)) }

    /// The plotted dataset.
    pub fn dataset(&self) -> Rc<dyn Dataset> {
        match self {
            Plot::Xy(p) => p.dataset.clone(),
            Plot::Category(p) => p.dataset.clone(),
            Plot::Pie(p) => p.dataset.clone(),
        }
    }

    pub fn renderer(&self) -> &ItemRenderer {
        match self {
            Plot::Xy(p) => &p.renderer.base,
            Plot::Category(p) => &p.renderer.base,
            Plot::Pie(p) => &p.renderer.base,
        }
    }

    /// Item renderer of whichever plot kind this is, for installing strategies.
    pub fn renderer_mut(&mut self) -> &mut ItemRenderer {
        match self {
            Plot::Xy(p) => &mut p.renderer.base,
            Plot::Category(p) => &mut p.renderer.base,
            Plot::Pie(p) => &mut p.renderer.base,
        }
    }

    pub fn has_axes(&self) -> bool { !matches!(self, Plot::Pie(_)) }

    /// (horizontal, vertical) axes, if this plot has any.
    pub fn axes(&self) -> Option<(Axis, Axis)> {
        match self {
            Plot::Xy(p) => Some(p.axes()),
            Plot::Category(p) => {
                let cols = p.data.column_count().max(1) as f64;
                Some((Axis::new("Category", 0.0, cols), p.value_axis()))
            }
            Plot::Pie(_) => None,
        }
    }

    pub fn draw(&self, canvas: &skia::Canvas, area: skia::Rect, entities: &mut EntityCollection, draw_labels: bool) {
        match self {
            Plot::Xy(p) => {
                let (x, y) = p.axes();
                p.renderer.draw(canvas, area, p.data.as_ref(), p.dataset.as_ref(), &x, &y, entities, draw_labels);
            }
            Plot::Category(p) => {
                let axis = p.value_axis();
                p.renderer.draw(canvas, area, p.data.as_ref(), p.dataset.as_ref(), &axis, entities, draw_labels);
            }
            Plot::Pie(p) => p.renderer.draw(canvas, area, p.data.as_ref(), p.dataset.as_ref(), entities, draw_labels),
        }
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().copied().filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
