// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! Tests for tree edits, destruction and tree queries.

use mortar_core::app::{AncestorOrder, Ui, UiOptions};
use mortar_core::core::{Message, MessageKind, Signal, WidgetId, WidgetKind};
use mortar_core::kurbo::{Point, Rect};
use mortar_testing::{Recording, TestHarness, assert_debug_panics, record_messages};

fn widgets(ui: &mut Ui, count: usize) -> Vec<WidgetId> {
    (0..count)
        .map(|_| ui.create_widget(WidgetKind::WIDGET))
        .collect()
}

#[test]
fn attach_notifies_child_then_parent() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let child = ui.create_widget(WidgetKind::WIDGET);
    let recording = Recording::default();
    record_messages(&mut ui, parent, &recording);
    record_messages(&mut ui, child, &recording);

    ui.attach(parent, child, None);
    assert_eq!(
        recording.drain_signals(),
        vec![(child, Signal::NewParent), (parent, Signal::AddChild)]
    );

    ui.detach(parent, child);
    assert_eq!(
        recording.drain_signals(),
        vec![(child, Signal::NewParent), (parent, Signal::RemoveChild)]
    );
    assert_eq!(ui.parent(child), None);
    assert!(ui.children(parent).is_empty());
}

#[test]
fn attach_moves_widget_from_old_parent() {
    let mut ui = Ui::new(UiOptions::default());
    let ids = widgets(&mut ui, 3);
    let (first, second, child) = (ids[0], ids[1], ids[2]);
    ui.attach(first, child, None);
    ui.attach(second, child, None);

    assert!(ui.children(first).is_empty());
    assert_eq!(ui.children(second), &[child]);
    assert_eq!(ui.parent(child), Some(second));
}

#[test]
fn add_children_keeps_order() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let children = widgets(&mut ui, 4);
    ui.add_children(parent, children.iter().copied());
    assert_eq!(ui.children(parent), children.as_slice());
}

#[test]
fn replace_keeps_position() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let children = widgets(&mut ui, 3);
    ui.add_children(parent, children.iter().copied());
    let new = ui.create_widget(WidgetKind::WIDGET);

    ui.replace(parent, children[1], new);
    assert_eq!(ui.children(parent), &[children[0], new, children[2]]);
    assert_eq!(ui.parent(children[1]), None);
    assert_eq!(ui.parent(new), Some(parent));
}

#[test]
fn replace_missing_child_is_noop() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let child = ui.create_widget(WidgetKind::WIDGET);
    let stranger = ui.create_widget(WidgetKind::WIDGET);
    let new = ui.create_widget(WidgetKind::WIDGET);
    ui.attach(parent, child, None);
    let recording = Recording::default();
    record_messages(&mut ui, parent, &recording);
    record_messages(&mut ui, new, &recording);

    ui.replace(parent, stranger, new);
    assert_eq!(ui.children(parent), &[child]);
    assert_eq!(ui.parent(new), None);
    assert!(recording.is_empty());
}

#[test]
fn attach_creating_cycle_panics() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let child = ui.create_widget(WidgetKind::WIDGET);
    ui.attach(parent, child, None);

    assert_debug_panics!(ui.attach(child, parent, None), "cycle");
    assert_debug_panics!(ui.attach(parent, parent, None), "cycle");
}

#[test]
fn detach_of_non_child_panics() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let other = ui.create_widget(WidgetKind::WIDGET);
    assert_debug_panics!(ui.detach(parent, other), "not its child");
}

/// Check that every parent link matches exactly one child entry, and that
/// walking up from any widget terminates.
fn assert_tree_integrity(ui: &Ui, ids: &[WidgetId]) {
    for id in ids {
        if let Some(parent) = ui.parent(*id) {
            let count = ui.children(parent).iter().filter(|c| *c == id).count();
            assert_eq!(count, 1, "{id} appears {count} times in its parent {parent}");
        }
        for child in ui.children(*id) {
            assert_eq!(ui.parent(*child), Some(*id), "{child} doesn't point back to {id}");
        }
        let chain = ui.ancestors(*id, AncestorOrder::NodeToRoot);
        assert!(chain.len() <= ids.len(), "cycle above {id}");
    }
}

#[test]
fn tree_integrity_under_random_edits() {
    let mut ui = Ui::new(UiOptions::default());
    let ids = widgets(&mut ui, 8);

    // Small LCG, so the sequence is the same on every run.
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = |bound: usize| {
        seed = seed
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        ((seed >> 33) % bound as u64) as usize
    };

    for _ in 0..500 {
        let a = ids[next(ids.len())];
        let b = ids[next(ids.len())];
        let c = ids[next(ids.len())];
        match next(3) {
            0 => {
                if !ui.ancestors(a, AncestorOrder::NodeToRoot).contains(&b) {
                    let before = ui.children(a).first().copied();
                    ui.attach(a, b, before);
                }
            }
            1 => {
                if ui.parent(b) == Some(a) {
                    ui.detach(a, b);
                }
            }
            _ => {
                if !ui.ancestors(a, AncestorOrder::NodeToRoot).contains(&c) {
                    ui.replace(a, b, c);
                }
            }
        }
        assert_tree_integrity(&ui, &ids);
    }
}

#[test]
fn destroy_frees_everything_in_subtree() {
    let mut harness = TestHarness::create();
    let manager = harness.manager();
    let baseline = harness.ui().widget_count();

    let root = harness.add_child(manager, WidgetKind::WIDGET, Rect::new(0., 0., 100., 100.));
    let focused = harness.add_child(root, WidgetKind::WIDGET, Rect::new(0., 0., 50., 50.));
    let hovered = harness.add_child(root, WidgetKind::WIDGET, Rect::new(50., 0., 100., 50.));
    let captor = harness.add_child(hovered, WidgetKind::WIDGET, Rect::new(50., 0., 60., 10.));

    let ui = harness.ui_mut();
    ui.set_focus_rest(focused, true);
    ui.set_focus(Some(focused));
    ui.set_hover(Some(hovered));
    ui.capture_pointer(captor);
    ui.enqueue(focused, Message::Open);
    ui.add_message_filter(MessageKind::Close, captor);
    ui.destroy_deferred(hovered);
    assert_eq!(ui.widget_count(), baseline + 4);

    ui.destroy(root);

    assert_eq!(ui.widget_count(), baseline);
    for id in [root, focused, hovered, captor] {
        assert!(!ui.has_widget(id));
    }
    assert_eq!(ui.focus(), None);
    assert_eq!(ui.hover(), None);
    assert_eq!(ui.capture(), None);
    assert_eq!(ui.pending_count(), 0);
    assert!(ui.children(manager).is_empty());

    // The deferred destruction was dropped with the widget.
    ui.dispatch_pending();
    assert_eq!(ui.widget_count(), baseline);
}

#[test]
fn destroy_notifies_handlers_first() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let child = ui.create_widget(WidgetKind::WIDGET);
    ui.attach(parent, child, None);
    let recording = Recording::default();
    record_messages(&mut ui, parent, &recording);
    record_messages(&mut ui, child, &recording);

    ui.destroy(parent);
    let records = recording.drain();
    assert_eq!(records[0].widget, parent);
    assert!(matches!(records[0].message, Message::Destroy));
    assert!(
        records
            .iter()
            .any(|r| r.widget == child && matches!(r.message, Message::Destroy))
    );
}

#[test]
fn operations_on_destroyed_widget_panic() {
    let mut ui = Ui::new(UiOptions::default());
    let id = ui.create_widget(WidgetKind::WIDGET);
    ui.destroy(id);

    assert_debug_panics!(ui.destroy(id), "non-existent widget");
    assert_debug_panics!(ui.send(id, &mut Message::Open), "non-existent widget");
}

#[test]
fn shutdown_destroys_all_roots() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let child = ui.create_widget(WidgetKind::WIDGET);
    ui.attach(parent, child, None);
    let _loose = ui.create_widget(WidgetKind::WIDGET);

    ui.shutdown();
    assert_eq!(ui.widget_count(), 0);
}

#[test]
fn window_and_manager_lookup() {
    let mut ui = Ui::new(UiOptions::default());
    let manager = ui.default_manager();
    let window = ui.create_widget(WidgetKind::WINDOW);
    let inner = ui.create_widget(WidgetKind::WIDGET);
    ui.attach(manager, window, None);
    ui.attach(window, inner, None);

    assert_eq!(ui.window_of(inner), Some(window));
    assert_eq!(ui.window_of(window), Some(window));
    assert_eq!(ui.manager_of(inner), manager);

    let loose = ui.create_widget(WidgetKind::WIDGET);
    assert_eq!(ui.window_of(loose), None);
    // Falls back to the default manager.
    assert_eq!(ui.manager_of(loose), manager);
    assert_eq!(ui.ancestor_of_kind(loose, WidgetKind::VIEW), None);
}

#[test]
fn pick_first_child_wins() {
    let mut harness = TestHarness::create();
    let root = harness.add_widget(WidgetKind::WIDGET, Rect::new(0., 0., 100., 100.));
    let first = harness.add_child(root, WidgetKind::WIDGET, Rect::new(0., 0., 60., 60.));
    let second = harness.add_child(root, WidgetKind::WIDGET, Rect::new(40., 40., 100., 100.));
    let ui = harness.ui_mut();

    assert_eq!(ui.pick(root, Point::new(50., 50.)), Some(first));
    assert_eq!(ui.pick(root, Point::new(80., 80.)), Some(second));
    assert_eq!(ui.pick(root, Point::new(80., 10.)), Some(root));
    assert_eq!(ui.pick(root, Point::new(100., 50.)), None);

    ui.hide(first);
    assert_eq!(ui.pick(root, Point::new(50., 50.)), Some(second));
}

#[test]
fn zero_sized_widget_is_never_picked() {
    let mut harness = TestHarness::create();
    let root = harness.add_widget(WidgetKind::WIDGET, Rect::new(0., 0., 100., 100.));
    let _empty = harness.add_child(root, WidgetKind::WIDGET, Rect::new(10., 10., 10., 10.));
    assert_eq!(harness.ui().pick(root, Point::new(10., 10.)), Some(root));
}

#[test]
fn find_name_prefers_direct_children() {
    let mut ui = Ui::new(UiOptions::default());
    let root = ui.create_widget(WidgetKind::WIDGET);
    let branch = ui.create_widget(WidgetKind::WIDGET);
    let deep = ui.create_widget(WidgetKind::WIDGET);
    let shallow = ui.create_widget(WidgetKind::WIDGET);
    ui.attach(root, branch, None);
    ui.attach(branch, deep, None);
    ui.attach(root, shallow, None);
    ui.set_name(deep, Some("ok"));
    ui.set_name(shallow, Some("ok"));

    assert_eq!(ui.find_name(root, "ok"), Some(shallow));
    assert_eq!(ui.find_name(branch, "ok"), Some(deep));
    assert_eq!(ui.find_name(root, "cancel"), None);
    assert_eq!(ui.find_name(deep, "ok"), None);
}

#[test]
fn user_kinds_are_distinct() {
    let mut ui = Ui::new(UiOptions::default());
    let first = ui.register_widget_kind();
    let second = ui.register_widget_kind();
    assert_ne!(first, second);
    assert!(first.is_user_kind());
    assert!(second.0 > first.0);
    assert!(!WidgetKind::WINDOW.is_user_kind());
}
