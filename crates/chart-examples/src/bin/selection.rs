// File: crates/chart-examples/src/bin/selection.rs
// Summary: Renders XY, bar and pie charts with gesture-driven selections highlighted, to PNG.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;
use chart_core::renderer::ClassLabelIrs;
use chart_core::{
    Chart, ChartPanel, ClickSelectionHandler, DatasetCursor, DatasetExtensionManager, DatasetLabelExtension,
    DefaultCategoryDataset, DefaultPieDataset, LabelExtension, ModifierKey, Plot, PointerEvent,
    RegionSelectionHandler, RenderOptions, SelectionAwarePaintIrs, SelectionExtension, Theme, XySeries,
    XySeriesCollection,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().filter_level(log::LevelFilter::Info).init();

    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "target/out".to_string()));
    let theme = Theme::dark();
    let opts = RenderOptions { width: 800, height: 500, theme, ..Default::default() };

    xy_region(&opts, &out_dir)?;
    bar_clicks(&opts, &out_dir)?;
    pie_click(&opts, &out_dir)?;
    Ok(())
}

fn highlighted(mut plot: Plot, theme: &Theme, extensions: Option<Rc<DatasetExtensionManager>>) -> Plot {
    let color = theme.selection;
    plot.renderer_mut().decorate_paint_irs(|inner| {
        let irs = SelectionAwarePaintIrs::new(inner).with_fill_highlight(color);
        Box::new(match extensions {
            Some(m) => irs.with_extension_manager(m),
            None => irs,
        })
    });
    plot
}

fn save(panel: &ChartPanel, out_dir: &Path, name: &str) -> Result<()> {
    let path = out_dir.join(name);
    panel.chart().render_to_png(panel.options(), &path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Two noisy sine series; a rectangle drag selects the middle band.
fn xy_region(opts: &RenderOptions, out_dir: &Path) -> Result<()> {
    let series = (0..2)
        .map(|s| {
            let data = (0..60)
                .map(|i| {
                    let x = i as f64 * 0.2;
                    (x, (x + s as f64).sin() * 3.0 + s as f64)
                })
                .collect();
            XySeries::with_data(format!("Series {}", s + 1), data)
        })
        .collect();
    let ds = Rc::new(XySeriesCollection::from_series(series)?);
    let selection = ds.enable_selection();

    // Class labels on a few items, shown next to their markers.
    let labels = LabelExtension::attach(&ds);
    for i in (0..60).step_by(15) {
        labels.set_label(&DatasetCursor::xy(0, i), (i / 15) as i32);
    }
    let extensions = Rc::new(DatasetExtensionManager::new());
    extensions.register_label(labels);

    let mut plot = highlighted(Plot::xy(ds, &opts.theme), &opts.theme, None);
    plot.renderer_mut().set_label_irs(Box::new(ClassLabelIrs::new(Some(extensions))));
    let chart = Chart::new(plot).with_title("Region selection");

    let mut panel = ChartPanel::new(chart, opts.clone());
    panel.enable_selection(None);
    panel.add_handler(Box::new(RegionSelectionHandler::new()));
    panel.render_to_rgba8()?;

    let area = opts.insets.data_area(opts.width, opts.height);
    let (x0, x1) = (area.left + area.width() * 0.3, area.left + area.width() * 0.7);
    panel.mouse_pressed(&PointerEvent::new(x0, area.top + 10.0));
    panel.mouse_dragged(&PointerEvent::new(x1, area.bottom - 10.0));
    panel.mouse_released(&PointerEvent::new(x1, area.bottom - 10.0));
    log::info!("xy: {} items selected", selection.selected_count());

    save(&panel, out_dir, "selection_xy.png")
}

/// Quarterly bars; a click plus a shift-click select two bars.
fn bar_clicks(opts: &RenderOptions, out_dir: &Path) -> Result<()> {
    let ds = Rc::new(DefaultCategoryDataset::new());
    for (row, base) in [("2024", 4.0), ("2025", 5.5)] {
        for (i, q) in ["Q1", "Q2", "Q3", "Q4"].into_iter().enumerate() {
            ds.set_value(base + i as f64 * 0.75, row, q);
        }
    }
    let ext = SelectionExtension::attach(&ds);
    let extensions = Rc::new(DatasetExtensionManager::new());
    extensions.register_selection(ext.clone());

    let plot = highlighted(Plot::category(ds.clone(), &opts.theme), &opts.theme, Some(extensions.clone()));
    let mut panel = ChartPanel::new(Chart::new(plot).with_title("Click selection"), opts.clone());
    panel.enable_selection(Some(extensions));
    panel.add_handler(Box::new(ClickSelectionHandler::new()));
    let frame = panel.render_to_rgba8()?;

    let centres: Vec<(f32, f32)> = frame
        .info
        .entities
        .iter()
        .filter(|e| e.kind.is_data_item())
        .map(|e| (e.area.bounds().center_x(), e.area.bounds().center_y()))
        .collect();
    if let (Some(a), Some(b)) = (centres.first(), centres.last()) {
        panel.mouse_clicked(&PointerEvent::new(a.0, a.1));
        panel.mouse_clicked(&PointerEvent::new(b.0, b.1).with_modifier(ModifierKey::Shift));
    }
    log::info!("bar: {} items selected", ext.selected_count());

    save(&panel, out_dir, "selection_bar.png")
}

fn pie_click(opts: &RenderOptions, out_dir: &Path) -> Result<()> {
    let ds = Rc::new(DefaultPieDataset::new());
    for (k, v) in [("Rust", 45.0), ("C++", 25.0), ("Go", 18.0), ("Other", 12.0)] {
        ds.set_value(k, v);
    }
    let ext = SelectionExtension::attach(&ds);
    let extensions = Rc::new(DatasetExtensionManager::new());
    extensions.register_selection(ext.clone());

    let plot = highlighted(Plot::pie(ds.clone(), &opts.theme), &opts.theme, Some(extensions.clone()));
    let mut panel = ChartPanel::new(Chart::new(plot).with_title("Pie selection"), opts.clone());
    panel.enable_selection(Some(extensions));
    panel.add_handler(Box::new(ClickSelectionHandler::new()));
    panel.render_to_rgba8()?;

    let area = opts.insets.data_area(opts.width, opts.height);
    panel.mouse_clicked(&PointerEvent::new(area.center_x() + 40.0, area.center_y() - 20.0));
    log::info!("pie: {} sections selected", ext.selected_count());

    save(&panel, out_dir, "selection_pie.png")
}
