// File: crates/chart-core/tests/panel_gestures.rs
// Purpose: Click, rectangle and circle gestures routed through a chart panel.

use std::rc::Rc;

use chart_core::*;

// Data area is (72, 24)-(376, 244); item i sits at (72 + 76x, 244 - 55y).
const ITEM0: (f32, f32) = (148.0, 189.0);
const ITEM1: (f32, f32) = (224.0, 134.0);
const ITEM2: (f32, f32) = (300.0, 79.0);

fn panel(scale: f32) -> (ChartPanel, Rc<SelectionExtension>) {
    let ds = Rc::new(
        XySeriesCollection::from_series(vec![XySeries::with_data("S0", vec![(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])])
            .expect("series"),
    );
    let ext = ds.enable_selection();
    let mut plot = XyPlot::new(ds, &Theme::dark());
    plot.x_range = Some((0.0, 4.0));
    plot.y_range = Some((0.0, 4.0));
    let opts = RenderOptions { width: 400, height: 300, draw_labels: false, ..Default::default() };

    let mut panel = ChartPanel::new(Chart::new(Plot::Xy(plot)), opts).with_scale(scale);
    panel.enable_selection(None);
    panel.add_handler(Box::new(RegionSelectionHandler::new()));
    panel.add_handler(Box::new(CircularSelectionHandler::new().requiring(ModifierKey::Ctrl)));
    panel.add_handler(Box::new(ClickSelectionHandler::new()));
    panel.render_to_rgba8().expect("render");
    (panel, ext)
}

fn selected(ext: &SelectionExtension) -> Vec<usize> {
    ext.selection_iter(true)
        .filter_map(|c| match c {
            DatasetCursor::IndexPair { item, .. } => Some(item),
            _ => None,
        })
        .collect()
}

fn at((x, y): (f32, f32)) -> PointerEvent { PointerEvent::new(x, y) }

#[test]
fn click_replaces_and_shift_click_extends() {
    let (mut panel, ext) = panel(1.0);
    panel.take_redraw_request();

    panel.mouse_clicked(&at(ITEM0));
    assert_eq!(selected(&ext), vec![0]);
    assert!(panel.take_redraw_request());

    panel.mouse_clicked(&at(ITEM2));
    assert_eq!(selected(&ext), vec![2]);

    panel.mouse_clicked(&at(ITEM0).with_modifier(ModifierKey::Shift));
    assert_eq!(selected(&ext), vec![0, 2]);

    // A plain click on empty space clears.
    panel.mouse_clicked(&PointerEvent::new(200.0, 220.0));
    assert!(selected(&ext).is_empty());
}

#[test]
fn rectangle_drag_selects_on_release() {
    let (mut panel, ext) = panel(1.0);
    panel.mouse_pressed(&PointerEvent::new(100.0, 100.0));
    assert_eq!(panel.live_handler(), Some("region_selection"));

    panel.mouse_dragged(&PointerEvent::new(250.0, 200.0));
    assert!(matches!(panel.overlay().map(|o| &o.shape), Some(Shape::Rect(_))));
    assert!(selected(&ext).is_empty());

    panel.mouse_released(&PointerEvent::new(250.0, 200.0));
    assert_eq!(selected(&ext), vec![0, 1]);
    assert!(panel.overlay().is_none());
    assert_eq!(panel.live_handler(), None);
}

#[test]
fn rectangle_is_clamped_to_the_data_area() {
    let (mut panel, _ext) = panel(1.0);
    panel.mouse_pressed(&PointerEvent::new(300.0, 200.0));
    panel.mouse_dragged(&PointerEvent::new(1000.0, 1000.0));
    let bounds = panel.overlay().expect("overlay").shape.bounds();
    assert!(bounds.right <= 376.0 && bounds.bottom <= 244.0);
}

#[test]
fn release_without_accepted_press_only_drops_live_handler() {
    let (mut panel, ext) = panel(1.0);
    ext.set_selected(&DatasetCursor::xy(0, 1), true);

    // Outside the data area: the handler goes live but keeps no anchor.
    panel.mouse_pressed(&PointerEvent::new(10.0, 10.0));
    assert_eq!(panel.live_handler(), Some("region_selection"));
    panel.mouse_released(&PointerEvent::new(20.0, 20.0));
    assert_eq!(panel.live_handler(), None);
    assert_eq!(selected(&ext), vec![1]);
    assert!(panel.overlay().is_none());

    // No live handler at all.
    panel.mouse_released(&PointerEvent::new(20.0, 20.0));
    assert_eq!(selected(&ext), vec![1]);
}

#[test]
fn ctrl_press_picks_the_circle_handler() {
    let (mut panel, ext) = panel(1.0);
    panel.mouse_clicked(&at(ITEM0));

    let ctrl = |x: f32, y: f32| PointerEvent::new(x, y).with_modifier(ModifierKey::Ctrl);
    panel.mouse_pressed(&ctrl(ITEM1.0, ITEM1.1));
    assert_eq!(panel.live_handler(), Some("circular_selection"));
    // Press without the additive modifier starts a fresh selection.
    assert!(selected(&ext).is_empty());

    panel.mouse_dragged(&ctrl(ITEM1.0 + 30.0, ITEM1.1));
    assert!(matches!(panel.overlay().map(|o| &o.shape), Some(Shape::Path(_))));
    panel.mouse_released(&ctrl(ITEM1.0 + 30.0, ITEM1.1));
    assert_eq!(selected(&ext), vec![1]);
    assert_eq!(panel.live_handler(), None);
}

#[test]
fn circle_shrinks_to_stay_inside_the_data_area() {
    let (mut panel, _ext) = panel(1.0);
    let ctrl = |x: f32, y: f32| PointerEvent::new(x, y).with_modifier(ModifierKey::Ctrl);
    panel.mouse_pressed(&ctrl(100.0, 134.0));
    panel.mouse_dragged(&ctrl(200.0, 134.0));
    let bounds = panel.overlay().expect("overlay").shape.bounds();
    assert!(bounds.left >= 71.5, "left edge {}", bounds.left);
    assert!((bounds.width() - 56.0).abs() < 0.5);
}

#[test]
fn circle_pressed_at_the_edge_stays_inside_the_data_area() {
    let (mut panel, _ext) = panel(1.0);
    let ctrl = |x: f32, y: f32| PointerEvent::new(x, y).with_modifier(ModifierKey::Ctrl);
    panel.mouse_pressed(&ctrl(72.5, 134.0));
    panel.mouse_dragged(&ctrl(72.6, 134.0));
    let bounds = panel.overlay().expect("overlay").shape.bounds();
    assert!(bounds.left >= 72.0 - 1e-3, "left edge {}", bounds.left);
    assert!(bounds.width() > 0.0);
}

#[test]
fn device_scale_maps_pointer_to_chart_space() {
    let (mut panel, ext) = panel(2.0);
    assert_eq!(panel.device_size(), (800, 600));
    panel.mouse_clicked(&PointerEvent::new(ITEM1.0 * 2.0, ITEM1.1 * 2.0));
    assert_eq!(selected(&ext), vec![1]);

    panel.mouse_pressed(&PointerEvent::new(200.0, 200.0));
    panel.mouse_released(&PointerEvent::new(500.0, 400.0));
    assert_eq!(selected(&ext), vec![0, 1]);
}

#[test]
fn tooltips_come_from_the_topmost_entity() {
    let (panel, _ext) = panel(1.0);
    assert_eq!(panel.tooltip_at(ITEM0.0, ITEM0.1).as_deref(), Some("S0: (1.00, 1.00)"));
    assert_eq!(panel.tooltip_at(200.0, 220.0), None);
}

#[test]
fn programmatic_selection_requests_redraw() {
    let (panel, ext) = panel(1.0);
    panel.take_redraw_request();
    assert!(!panel.take_redraw_request());
    ext.set_selected(&DatasetCursor::xy(0, 2), true);
    assert!(panel.take_redraw_request());
}

#[test]
fn removed_handler_no_longer_receives_events() {
    let (mut panel, ext) = panel(1.0);
    assert!(panel.remove_handler("click_selection"));
    assert!(!panel.remove_handler("click_selection"));
    assert_eq!(panel.handler_ids(), vec!["region_selection", "circular_selection"]);
    panel.mouse_clicked(&at(ITEM0));
    assert!(selected(&ext).is_empty());
}

#[test]
fn replacing_the_chart_prunes_the_old_extension() {
    let extensions = Rc::new(DatasetExtensionManager::new());
    let bar_chart = |v: f64| {
        let ds = Rc::new(DefaultCategoryDataset::new());
        ds.set_value(v, "R", "C");
        extensions.register_selection(SelectionExtension::attach(&ds));
        Chart::new(Plot::category(ds, &Theme::dark()))
    };
    let mut panel = ChartPanel::new(bar_chart(1.0), RenderOptions::default());
    panel.enable_selection(Some(extensions.clone()));
    assert_eq!(extensions.len(), 1);

    panel.set_chart(bar_chart(2.0));
    assert_eq!(extensions.len(), 1);
    assert!(extensions.supports(panel.chart().dataset().as_ref(), Capability::Selection));
}
