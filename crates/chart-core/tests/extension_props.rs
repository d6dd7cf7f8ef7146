// File: crates/chart-core/tests/extension_props.rs
// Purpose: Selection and label extension state, notification coalescing and listener handling.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use chart_core::*;
use proptest::prelude::*;

fn xy(series: usize, items: usize) -> Rc<XySeriesCollection> {
    let data = (0..series)
        .map(|s| XySeries::with_data(format!("S{s}"), (0..items).map(|i| (i as f64, (s * 10 + i) as f64)).collect()))
        .collect();
    Rc::new(XySeriesCollection::from_series(data).expect("unique keys"))
}

fn count_events(ext: &dyn DatasetSelectionExtension) -> Rc<Cell<usize>> {
    let n = Rc::new(Cell::new(0));
    let c = n.clone();
    ext.add_change_listener(Rc::new(move |_: &ExtensionChangeEvent| c.set(c.get() + 1)));
    n
}

#[test]
fn fresh_extension_has_nothing_selected() {
    let ds = xy(2, 3);
    let ext = SelectionExtension::attach(&ds);
    assert_eq!(ext.selected_count(), 0);
    let it = ext.as_iterable().expect("iterable");
    let all: Vec<_> = it.iter().collect();
    assert_eq!(all.len(), 6);
    assert_eq!(all[0], DatasetCursor::xy(0, 0));
    assert_eq!(all[5], DatasetCursor::xy(1, 2));
    assert_eq!(it.selection_iter(true).count(), 0);
    assert_eq!(it.selection_iter(false).count(), 6);
}

#[test]
fn redundant_set_fires_once() {
    let ds = xy(1, 3);
    let ext = SelectionExtension::attach(&ds);
    let events = count_events(ext.as_ref());

    ext.set_selected(&DatasetCursor::xy(0, 1), true);
    ext.set_selected(&DatasetCursor::xy(0, 1), true);
    assert!(ext.is_selected(&DatasetCursor::xy(0, 1)));
    assert!(!ext.is_selected(&DatasetCursor::xy(0, 0)));
    assert_eq!(events.get(), 1);

    ext.set_selected(&DatasetCursor::xy(0, 1), false);
    assert_eq!(events.get(), 2);
}

#[test]
fn clear_always_notifies() {
    let ds = xy(1, 2);
    let ext = SelectionExtension::attach(&ds);
    let events = count_events(ext.as_ref());
    ext.clear_selection();
    assert_eq!(events.get(), 1);
}

#[test]
fn muted_changes_coalesce_into_one_event() {
    let ds = xy(2, 4);
    let ext = SelectionExtension::attach(&ds);
    let events = count_events(ext.as_ref());

    ext.set_notify(false);
    assert!(!ext.is_notify());
    for i in 0..4 {
        ext.set_selected(&DatasetCursor::xy(1, i), true);
    }
    assert_eq!(events.get(), 0);
    ext.set_notify(true);
    assert_eq!(events.get(), 1);
    assert_eq!(ext.selected_count(), 4);

    // Unmuting with nothing changed stays silent.
    ext.set_notify(false);
    ext.set_notify(true);
    assert_eq!(events.get(), 1);
}

#[test]
fn event_names_dataset_and_kind() {
    let ds = xy(1, 1);
    let ext = SelectionExtension::attach(&ds);
    let seen = Rc::new(Cell::new(None));
    let s = seen.clone();
    ext.add_change_listener(Rc::new(move |e: &ExtensionChangeEvent| s.set(Some(*e))));
    ext.set_selected(&DatasetCursor::xy(0, 0), true);
    let event = seen.get().expect("event");
    assert_eq!(event.dataset, ds.id());
    assert_eq!(event.kind, ExtensionKind::Selection);
}

#[test]
fn removed_listener_is_not_called() {
    let ds = xy(1, 2);
    let ext = SelectionExtension::attach(&ds);
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    let id = ext.add_change_listener(Rc::new(move |_: &ExtensionChangeEvent| h.set(h.get() + 1)));
    assert!(ext.remove_change_listener(id));
    assert!(!ext.remove_change_listener(id));
    ext.set_selected(&DatasetCursor::xy(0, 0), true);
    assert_eq!(hits.get(), 0);
}

#[test]
fn foreign_and_stale_cursors_are_ignored() {
    let ds = xy(1, 2);
    let ext = SelectionExtension::attach(&ds);
    let events = count_events(ext.as_ref());
    ext.set_selected(&DatasetCursor::pie("A"), true);
    ext.set_selected(&DatasetCursor::xy(0, 9), true);
    ext.set_selected(&DatasetCursor::xy(4, 0), true);
    assert_eq!(events.get(), 0);
    assert!(!ext.is_selected(&DatasetCursor::pie("A")));
    assert!(!ext.is_selected(&DatasetCursor::xy(0, 9)));
}

#[test]
fn labels_default_to_no_label() {
    let ds = xy(2, 2);
    let labels = LabelExtension::attach(&ds);
    assert_eq!(labels.label(&DatasetCursor::xy(1, 1)), NO_LABEL);
    labels.set_label(&DatasetCursor::xy(1, 1), 3);
    labels.set_label(&DatasetCursor::xy(0, 0), 3);
    assert_eq!(labels.label(&DatasetCursor::xy(1, 1)), 3);
    assert_eq!(labels.count(3), 2);
    labels.clear_labels();
    assert_eq!(labels.count(NO_LABEL), 4);
}

#[test]
fn category_and_pie_cursors_resolve_by_key() {
    let cat = Rc::new(DefaultCategoryDataset::new());
    cat.set_value(1.0, "R1", "C1");
    cat.set_value(2.0, "R2", "C2");
    let ext = SelectionExtension::attach(&cat);
    ext.set_selected(&DatasetCursor::category("R2", "C1"), true);
    assert!(ext.is_selected(&DatasetCursor::category("R2", "C1")));
    assert!(!ext.is_selected(&DatasetCursor::xy(1, 0)));

    let pie = Rc::new(DefaultPieDataset::new());
    pie.set_value("A", 1.0);
    pie.set_value("B", 2.0);
    let ext = SelectionExtension::attach(&pie);
    ext.set_selected(&DatasetCursor::pie("B"), true);
    let it = ext.as_iterable().expect("iterable");
    assert_eq!(it.selection_iter(true).collect::<Vec<_>>(), vec![DatasetCursor::pie("B")]);
}

#[derive(Clone, Debug)]
enum Op {
    Set(usize, usize, bool),
    Clear,
    Mute(bool),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0..3usize, 0..5usize, any::<bool>()).prop_map(|(s, i, b)| Op::Set(s, i, b)),
        1 => Just(Op::Clear),
        2 => any::<bool>().prop_map(Op::Mute),
    ]
}

proptest! {
    #[test]
    fn selection_matches_model(ops in prop::collection::vec(op(), 0..40)) {
        let ds = xy(3, 5);
        let ext = SelectionExtension::attach(&ds);
        let events = count_events(ext.as_ref());
        let mut model: HashSet<(usize, usize)> = HashSet::new();
        let mut muted = false;
        let mut dirty = false;
        let mut expected = 0usize;

        for op in ops {
            match op {
                Op::Set(s, i, b) => {
                    let changed = if b { model.insert((s, i)) } else { model.remove(&(s, i)) };
                    ext.set_selected(&DatasetCursor::xy(s, i), b);
                    if changed {
                        if muted { dirty = true } else { expected += 1 }
                    }
                }
                Op::Clear => {
                    model.clear();
                    ext.clear_selection();
                    if muted { dirty = true } else { expected += 1 }
                }
                Op::Mute(m) => {
                    ext.set_notify(!m);
                    if muted && !m && dirty {
                        expected += 1;
                    }
                    if m && !muted {
                        dirty = false;
                    }
                    muted = m;
                }
            }
        }

        prop_assert_eq!(ext.selected_count(), model.len());
        for (s, i) in &model {
            prop_assert!(ext.is_selected(&DatasetCursor::xy(*s, *i)));
        }
        prop_assert_eq!(events.get(), expected);
    }
}
