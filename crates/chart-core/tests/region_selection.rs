// File: crates/chart-core/tests/region_selection.rs
// Purpose: Point, rectangle and path selection against hand-built render results.

use std::rc::Rc;

use chart_core::geometry::{circle_path, rect_path};
use chart_core::*;
use skia_safe as skia;

/// 3 series x 5 items; item (s, i) covers x in [10+20i, 20+20i], y in [10+20s, 20+20s].
struct Grid {
    ds: Rc<XySeriesCollection>,
    ext: Rc<SelectionExtension>,
    info: SharedRenderInfo,
}

fn grid() -> Grid {
    let series = (0..3)
        .map(|s| XySeries::with_data(format!("S{s}"), (0..5).map(|i| (i as f64, s as f64)).collect()))
        .collect();
    let ds = Rc::new(XySeriesCollection::from_series(series).expect("series"));
    let ext = ds.enable_selection();

    let mut ri = RenderInfo::new(skia::Rect::from_wh(200.0, 100.0), skia::Rect::from_ltrb(5.0, 5.0, 195.0, 95.0));
    ri.entities.add(ChartEntity::new(Shape::Rect(ri.data_area), EntityKind::PlotArea));
    for s in 0..3 {
        for i in 0..5 {
            let r = skia::Rect::from_xywh(10.0 + 20.0 * i as f32, 10.0 + 20.0 * s as f32, 10.0, 10.0);
            ri.entities.add(ChartEntity::new(Shape::Rect(r), EntityKind::XyItem { dataset: ds.id(), series: s, item: i }));
        }
    }
    let info = shared_render_info();
    *info.borrow_mut() = Some(ri);
    Grid { ds, ext, info }
}

fn manager(g: &Grid) -> EntitySelectionManager {
    EntitySelectionManager::new(g.info.clone(), vec![g.ds.clone() as Rc<dyn Dataset>])
}

fn selected(g: &Grid) -> Vec<(usize, usize)> {
    g.ext
        .selection_iter(true)
        .map(|c| match c {
            DatasetCursor::IndexPair { series, item } => (series, item),
            other => panic!("unexpected cursor {other}"),
        })
        .collect()
}

#[test]
fn rect_selects_fully_contained_items() {
    let g = grid();
    let m = manager(&g);
    let hits = m.select_rect(skia::Rect::from_ltrb(0.0, 0.0, 65.0, 45.0));
    assert_eq!(hits, 6);
    assert_eq!(selected(&g), vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
}

#[test]
fn containment_and_intersection_differ_on_partial_overlap() {
    let g = grid();
    let mut m = manager(&g);
    let partial = skia::Rect::from_ltrb(15.0, 15.0, 35.0, 35.0);
    assert_eq!(m.select_rect(partial), 0);
    assert!(selected(&g).is_empty());

    m.set_intersection_selection(true);
    assert_eq!(m.mode(), SelectionMode::Intersection);
    assert_eq!(m.select_rect(partial), 4);
    assert_eq!(selected(&g), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
}

#[test]
fn inverted_rect_is_normalized() {
    let g = grid();
    let m = manager(&g);
    assert_eq!(m.select_rect(skia::Rect::from_ltrb(45.0, 25.0, 25.0, 0.0)), 1);
    assert_eq!(selected(&g), vec![(0, 1)]);
}

#[test]
fn region_gesture_emits_one_event() {
    let g = grid();
    let m = manager(&g);
    let events = Rc::new(std::cell::Cell::new(0));
    let e = events.clone();
    g.ext.add_change_listener(Rc::new(move |_: &ExtensionChangeEvent| e.set(e.get() + 1)));
    m.select_rect(skia::Rect::from_ltrb(0.0, 0.0, 200.0, 100.0));
    assert_eq!(selected(&g).len(), 15);
    assert_eq!(events.get(), 1);
    assert!(g.ext.is_notify());
}

#[test]
fn point_selection_hits_item_under_pointer() {
    let g = grid();
    let m = manager(&g);
    assert_eq!(m.select_point(55.0, 35.0), 1);
    assert_eq!(selected(&g), vec![(1, 2)]);
    // Between items only the plot area is hit, which is not a data item.
    assert_eq!(m.select_point(25.0, 25.0), 0);
    // Point selection is additive.
    m.select_point(15.0, 15.0);
    assert_eq!(selected(&g), vec![(0, 0), (1, 2)]);
}

#[test]
fn clear_selection_resets_every_governed_dataset() {
    let g = grid();
    let m = manager(&g);
    m.select_rect(skia::Rect::from_ltrb(0.0, 0.0, 200.0, 100.0));
    m.clear_selection();
    assert!(selected(&g).is_empty());
}

#[test]
fn device_scale_is_undone_before_hit_testing() {
    let g = grid();
    if let Some(info) = g.info.borrow_mut().as_mut() {
        info.scale_x = 2.0;
        info.scale_y = 2.0;
    }
    let m = manager(&g);
    assert_eq!(m.select_point(110.0, 70.0), 1);
    assert_eq!(selected(&g), vec![(1, 2)]);

    m.clear_selection();
    assert_eq!(m.select_rect(skia::Rect::from_ltrb(0.0, 0.0, 130.0, 90.0)), 6);

    m.clear_selection();
    assert_eq!(m.select_path(&rect_path(&skia::Rect::from_ltrb(0.0, 0.0, 50.0, 50.0))), 1);
    assert_eq!(selected(&g), vec![(0, 0)]);
}

#[test]
fn entities_of_ungoverned_datasets_are_ignored() {
    let g = grid();
    let other = grid();
    // `other` renders into `g`'s render results but is not governed.
    let m = EntitySelectionManager::new(g.info.clone(), vec![g.ds.clone() as Rc<dyn Dataset>]);
    if let Some(info) = g.info.borrow_mut().as_mut() {
        let r = skia::Rect::from_xywh(150.0, 70.0, 10.0, 10.0);
        info.entities.add(ChartEntity::new(Shape::Rect(r), EntityKind::XyItem { dataset: other.ds.id(), series: 0, item: 0 }));
    }
    assert_eq!(m.select_point(155.0, 75.0), 0);
    assert!(selected(&other).is_empty());
}

#[test]
fn without_render_results_nothing_is_selected() {
    let g = grid();
    *g.info.borrow_mut() = None;
    let m = manager(&g);
    assert_eq!(m.select_point(15.0, 15.0), 0);
    assert_eq!(m.select_rect(skia::Rect::from_ltrb(0.0, 0.0, 200.0, 100.0)), 0);
}

#[test]
fn circular_path_selects_contained_items() {
    let g = grid();
    let m = manager(&g);
    // Circle around item (1, 2) centred at (55, 35); its 10x10 square fits, neighbours do not.
    assert_eq!(m.select_path(&circle_path(55.0, 35.0, 9.0)), 1);
    assert_eq!(selected(&g), vec![(1, 2)]);
}

#[test]
fn path_entities_use_exact_area_tests() {
    let ds = Rc::new(
        XySeriesCollection::from_series(vec![XySeries::with_data("S", vec![(0.0, 0.0), (1.0, 0.0)])]).expect("series"),
    );
    let ext = ds.enable_selection();
    let mut ri = RenderInfo::new(skia::Rect::from_wh(100.0, 100.0), skia::Rect::from_wh(100.0, 100.0));
    for (i, cx) in [20.0f32, 60.0].into_iter().enumerate() {
        ri.entities.add(ChartEntity::new(
            Shape::Path(circle_path(cx, 50.0, 10.0)),
            EntityKind::XyItem { dataset: ds.id(), series: 0, item: i },
        ));
    }
    let info = shared_render_info();
    *info.borrow_mut() = Some(ri);
    let mut m = EntitySelectionManager::new(info, vec![ds.clone() as Rc<dyn Dataset>]);

    // The rectangle clips the second circle's bounding box corner only.
    let rect = skia::Rect::from_ltrb(0.0, 0.0, 52.0, 42.0);
    assert_eq!(m.select_rect(rect), 0);
    m.set_mode(SelectionMode::Intersection);
    assert_eq!(m.select_rect(rect), 1);
    assert!(ext.is_selected(&DatasetCursor::xy(0, 0)));
    assert!(!ext.is_selected(&DatasetCursor::xy(0, 1)));

    m.set_mode(SelectionMode::Containment);
    ext.clear_selection();
    assert_eq!(m.select_rect(skia::Rect::from_ltrb(5.0, 35.0, 35.0, 65.0)), 1);
    assert!(ext.is_selected(&DatasetCursor::xy(0, 0)));
}

#[test]
fn rect_selects_exactly_the_enclosed_pair() {
    let g = grid();
    if let Some(info) = g.info.borrow_mut().as_mut() {
        let moved: EntityCollection = info
            .entities
            .iter()
            .cloned()
            .map(|mut e| {
                match e.kind {
                    EntityKind::XyItem { series: 0, item: 2, .. } => {
                        e.area = Shape::Rect(skia::Rect::from_xywh(150.0, 60.0, 10.0, 10.0))
                    }
                    EntityKind::XyItem { series: 1, item: 4, .. } => {
                        e.area = Shape::Rect(skia::Rect::from_xywh(170.0, 75.0, 10.0, 10.0))
                    }
                    _ => {}
                }
                e
            })
            .collect();
        info.entities = moved;
    }
    let m = manager(&g);
    assert_eq!(m.select_rect(skia::Rect::from_ltrb(140.0, 50.0, 190.0, 95.0)), 2);
    for s in 0..3 {
        for i in 0..5 {
            let expected = (s, i) == (0, 2) || (s, i) == (1, 4);
            assert_eq!(g.ext.is_selected(&DatasetCursor::xy(s, i)), expected, "item ({s}, {i})");
        }
    }
}

#[test]
fn zero_area_entities_are_never_selected_by_regions() {
    let ds = Rc::new(DefaultCategoryDataset::new());
    ds.set_value(0.0, "R", "A");
    ds.set_value(3.0, "R", "B");
    let ext = SelectionExtension::attach(&ds);
    let extensions = Rc::new(DatasetExtensionManager::new());
    extensions.register_selection(ext.clone());

    let mut ri = RenderInfo::new(skia::Rect::from_wh(400.0, 300.0), skia::Rect::from_wh(400.0, 300.0));
    // A zero-value bar and a zero-size marker.
    let flat_bar = skia::Rect::from_ltrb(300.0, 250.0, 320.0, 250.0);
    ri.entities.add(ChartEntity::new(
        Shape::Rect(flat_bar),
        EntityKind::CategoryItem { dataset: ds.id(), row_key: "R".into(), column_key: "A".into() },
    ));
    let mut dot = skia::Path::new();
    dot.move_to((100.0, 100.0));
    dot.line_to((100.0, 100.0));
    dot.close();
    ri.entities.add(ChartEntity::new(
        Shape::Path(dot),
        EntityKind::CategoryItem { dataset: ds.id(), row_key: "R".into(), column_key: "B".into() },
    ));
    let info = shared_render_info();
    *info.borrow_mut() = Some(ri);
    let mut m = EntitySelectionManager::new(info, vec![ds.clone() as Rc<dyn Dataset>]).with_extension_manager(extensions);

    assert_eq!(m.select_path(&circle_path(50.0, 50.0, 10.0)), 0);
    assert_eq!(m.select_rect(skia::Rect::from_ltrb(0.0, 0.0, 60.0, 60.0)), 0);
    assert_eq!(m.select_rect(skia::Rect::from_ltrb(0.0, 0.0, 400.0, 300.0)), 0);
    m.set_mode(SelectionMode::Intersection);
    assert_eq!(m.select_path(&circle_path(200.0, 150.0, 190.0)), 0);
    assert_eq!(ext.selected_count(), 0);
}

#[test]
fn region_gesture_leaves_caller_muted_extensions_muted() {
    let g = grid();
    let m = manager(&g);
    let events = Rc::new(std::cell::Cell::new(0));
    let e = events.clone();
    g.ext.add_change_listener(Rc::new(move |_: &ExtensionChangeEvent| e.set(e.get() + 1)));

    g.ext.set_notify(false);
    assert_eq!(m.select_rect(skia::Rect::from_ltrb(0.0, 0.0, 65.0, 45.0)), 6);
    assert!(!g.ext.is_notify());
    assert_eq!(events.get(), 0);

    g.ext.set_notify(true);
    assert_eq!(events.get(), 1);
}
