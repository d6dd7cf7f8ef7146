// File: crates/chart-core/tests/structural_change.rs
// Purpose: Extension state across dataset value and structure changes.

use std::cell::Cell;
use std::rc::Rc;

use chart_core::*;

fn collection() -> Rc<XySeriesCollection> {
    Rc::new(
        XySeriesCollection::from_series(vec![
            XySeries::with_data("A", vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]),
            XySeries::with_data("B", vec![(0.0, 3.0), (1.0, 2.0)]),
        ])
        .expect("unique keys"),
    )
}

fn events(ext: &dyn DatasetSelectionExtension) -> Rc<Cell<usize>> {
    let n = Rc::new(Cell::new(0));
    let c = n.clone();
    ext.add_change_listener(Rc::new(move |_: &ExtensionChangeEvent| c.set(c.get() + 1)));
    n
}

#[test]
fn value_update_keeps_selection() {
    let ds = collection();
    let ext = SelectionExtension::attach(&ds);
    ext.set_selected(&DatasetCursor::xy(0, 2), true);
    let n = events(ext.as_ref());

    ds.update_y(0, 2, 10.0).expect("in range");
    assert!(ext.is_selected(&DatasetCursor::xy(0, 2)));
    assert_eq!(n.get(), 0);
}

#[test]
fn adding_an_item_resets_selection_and_notifies() {
    let ds = collection();
    let ext = SelectionExtension::attach(&ds);
    ext.set_selected(&DatasetCursor::xy(1, 1), true);
    let n = events(ext.as_ref());

    ds.add_item(1, 2.0, 5.0).expect("series exists");
    assert_eq!(n.get(), 1);
    assert_eq!(ext.selected_count(), 0);
    // The table follows the new shape.
    ext.set_selected(&DatasetCursor::xy(1, 2), true);
    assert!(ext.is_selected(&DatasetCursor::xy(1, 2)));
}

#[test]
fn removing_a_series_shrinks_the_table() {
    let ds = collection();
    let ext = SelectionExtension::attach(&ds);
    ext.set_selected(&DatasetCursor::xy(1, 0), true);
    ds.remove_series(0).expect("exists");
    assert_eq!(ext.selected_count(), 0);
    assert_eq!(ext.iter().count(), 2);
    assert!(!ext.is_selected(&DatasetCursor::xy(1, 0)));
}

#[test]
fn muted_extension_reports_structural_reset_on_unmute() {
    let ds = collection();
    let ext = SelectionExtension::attach(&ds);
    let n = events(ext.as_ref());
    ext.set_notify(false);
    ds.remove_item(0, 0).expect("exists");
    assert_eq!(n.get(), 0);
    ext.set_notify(true);
    assert_eq!(n.get(), 1);
}

#[test]
fn labels_reset_on_structure_change() {
    let ds = collection();
    let labels = LabelExtension::attach(&ds);
    labels.set_label(&DatasetCursor::xy(0, 0), 2);
    ds.add_series(XySeries::with_data("C", vec![(0.0, 0.0)])).expect("new key");
    assert_eq!(labels.label(&DatasetCursor::xy(0, 0)), NO_LABEL);
    assert_eq!(labels.count(NO_LABEL), 6);
}

#[test]
fn new_category_key_is_a_structure_change() {
    let ds = Rc::new(DefaultCategoryDataset::new());
    ds.set_value(1.0, "R", "C1");
    let ext = SelectionExtension::attach(&ds);
    ext.set_selected(&DatasetCursor::category("R", "C1"), true);

    ds.set_value(5.0, "R", "C1");
    assert!(ext.is_selected(&DatasetCursor::category("R", "C1")));

    ds.set_value(2.0, "R", "C2");
    assert!(!ext.is_selected(&DatasetCursor::category("R", "C1")));
    assert_eq!(ext.iter().count(), 2);
}

#[test]
fn extension_outliving_its_dataset_reads_unselected() {
    let ds = collection();
    let ext = SelectionExtension::attach(&ds);
    ext.set_selected(&DatasetCursor::xy(0, 0), true);
    drop(ds);
    assert!(!ext.is_selected(&DatasetCursor::xy(0, 0)));
    assert_eq!(ext.iter().count(), 0);
}

#[test]
fn duplicate_series_key_is_rejected() {
    let ds = collection();
    let err = ds.add_series(XySeries::new("A")).unwrap_err();
    assert_eq!(err, DatasetError::DuplicateSeriesKey("A".into()));
    assert!(matches!(ds.update_y(5, 0, 1.0), Err(DatasetError::UnknownSeries(5))));
}
