// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! Tests for handler chains, default handling, signals and the message queue.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use assert_matches::assert_matches;
use mortar_core::app::{Ui, UiOptions};
use mortar_core::core::{
    CursorIcon, Handled, Handler, KeyMessage, Message, MessageKind, PointerMessage, Signal,
    WidgetId, WidgetKind,
};
use mortar_core::keyboard_types::{Code, Key, Modifiers};
use mortar_core::kurbo::{Rect, Size, Vec2};
use mortar_core::region::Region;
use mortar_testing::{
    PlatformCall, Recording, TestHarness, assert_debug_panics, record_messages,
};

const BUTTON: WidgetKind = WidgetKind(0x1000);
const TOOLTIP: WidgetKind = WidgetKind(0x1001);

fn consume(kind: MessageKind) -> impl Fn(&mut Ui, WidgetId, &mut Message) -> Handled {
    move |_, _, message| (message.kind() == kind).into()
}

fn key_down() -> KeyMessage {
    KeyMessage::new(Code::Enter, Key::Enter, Modifiers::empty())
}

#[test]
fn first_consumer_stops_the_chain() {
    let mut ui = Ui::new(UiOptions::default());
    let id = ui.create_widget(WidgetKind::WIDGET);
    let recording = Recording::default();
    record_messages(&mut ui, id, &recording);
    ui.add_handler(id, Handler::new(BUTTON, consume(MessageKind::Open)));

    assert!(ui.send(id, &mut Message::Open).is_handled());
    // The recorder is behind the consumer.
    assert!(recording.is_empty());

    assert!(!ui.send(id, &mut Message::Close).is_handled());
    assert_eq!(recording.drain_kinds(), vec![MessageKind::Close]);
}

#[test]
fn send_after_defers_to_older_handlers() {
    let mut ui = Ui::new(UiOptions::default());
    let id = ui.create_widget(WidgetKind::WIDGET);
    ui.set_min_size(id, Size::new(30., 10.));

    // A handler that lets the default handler answer, then doubles the answer.
    ui.add_handler(
        id,
        Handler::new(BUTTON, |ui, id, message| {
            if !matches!(message, Message::SizeRequest { .. }) {
                return Handled::No;
            }
            ui.send_after(id, message, BUTTON);
            if let Message::SizeRequest { size } = message {
                *size = *size * 2.;
            }
            Handled::Yes
        }),
    );

    let mut message = Message::SizeRequest {
        size: Size::ZERO,
    };
    ui.send(id, &mut message);
    assert_matches!(message, Message::SizeRequest { size } if size.width == 60. && size.height == 20.);

    assert!(!ui.send_after(id, &mut Message::Open, TOOLTIP).is_handled());
}

#[test]
fn handler_lookup_and_data() {
    let mut ui = Ui::new(UiOptions::default());
    let id = ui.create_widget(WidgetKind::WIDGET);
    ui.add_handler(id, Handler::new(BUTTON, |_, _, _| Handled::No).with_data(42_u32));
    ui.add_handler(id, Handler::new(TOOLTIP, |_, _, _| Handled::No));

    assert_eq!(ui.handler_count(id), 3);
    assert_eq!(ui.lookup_handler(id, BUTTON).map(Handler::kind), Some(BUTTON));
    assert_eq!(ui.handler_data::<u32>(id, BUTTON).as_deref(), Some(&42));
    assert!(ui.handler_data::<String>(id, BUTTON).is_none());
    assert!(ui.lookup_handler_data(id, TOOLTIP).is_none());
    assert!(ui.lookup_handler(id, WidgetKind(0x2000)).is_none());

    let removed = ui.remove_handler(id, BUTTON);
    assert_eq!(removed.map(|h| h.kind()), Some(BUTTON));
    assert_eq!(ui.handler_count(id), 2);
}

#[test]
fn chain_is_snapshotted_during_dispatch() {
    let mut ui = Ui::new(UiOptions::default());
    let id = ui.create_widget(WidgetKind::WIDGET);
    let late_calls = Rc::new(Cell::new(0));

    let counter = late_calls.clone();
    ui.add_handler(
        id,
        Handler::new(BUTTON, move |ui, id, _| {
            let counter = counter.clone();
            ui.add_handler(
                id,
                Handler::new(TOOLTIP, move |_, _, _| {
                    counter.set(counter.get() + 1);
                    Handled::No
                }),
            );
            Handled::No
        }),
    );

    ui.send(id, &mut Message::Open);
    assert_eq!(late_calls.get(), 0);
    ui.send(id, &mut Message::Open);
    assert_eq!(late_calls.get(), 1);
}

#[test]
fn destroying_own_widget_stops_the_chain() {
    let mut ui = Ui::new(UiOptions::default());
    let id = ui.create_widget(WidgetKind::WIDGET);
    let older_calls = Rc::new(Cell::new(0));

    let counter = older_calls.clone();
    ui.add_handler(
        id,
        Handler::new(TOOLTIP, move |_, _, _| {
            counter.set(counter.get() + 1);
            Handled::No
        }),
    );
    ui.add_handler(
        id,
        Handler::new(BUTTON, |ui, id, message| {
            if matches!(message, Message::Close) {
                ui.destroy(id);
            }
            Handled::No
        }),
    );

    assert!(!ui.send(id, &mut Message::Close).is_handled());
    assert!(!ui.has_widget(id));
    assert_eq!(older_calls.get(), 0);
}

// --- MARK: DEFAULT HANDLING

#[test]
fn open_is_rebroadcast_to_children() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WINDOW);
    let first = ui.create_widget(WidgetKind::WIDGET);
    let second = ui.create_widget(WidgetKind::WIDGET);
    ui.add_children(parent, [first, second]);
    let recording = Recording::default();
    record_messages(&mut ui, first, &recording);
    record_messages(&mut ui, second, &recording);

    assert!(!ui.send(parent, &mut Message::Open).is_handled());
    let widgets: Vec<_> = recording.drain().iter().map(|r| r.widget).collect();
    assert_eq!(widgets, vec![first, second]);

    ui.add_handler(second, Handler::new(BUTTON, consume(MessageKind::Open)));
    assert!(ui.send(parent, &mut Message::Open).is_handled());
}

#[test]
fn destroy_message_is_not_rebroadcast() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let child = ui.create_widget(WidgetKind::WIDGET);
    ui.attach(parent, child, None);
    let recording = Recording::default();
    record_messages(&mut ui, child, &recording);

    ui.send(parent, &mut Message::Destroy);
    assert!(recording.is_empty());
}

#[test]
fn keys_bubble_to_parent() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let child = ui.create_widget(WidgetKind::WIDGET);
    ui.attach(parent, child, None);
    let recording = Recording::default();
    record_messages(&mut ui, parent, &recording);

    assert!(!ui.send(child, &mut Message::KeyDown(key_down())).is_handled());
    assert_eq!(recording.drain_kinds(), vec![MessageKind::KeyDown]);

    ui.add_handler(parent, Handler::new(BUTTON, consume(MessageKind::KeyDown)));
    assert!(ui.send(child, &mut Message::KeyDown(key_down())).is_handled());

    let mut local = key_down();
    local.propagate_to_parent = false;
    assert!(!ui.send(child, &mut Message::KeyDown(local)).is_handled());
}

#[test]
fn keys_can_propagate_to_children() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let first = ui.create_widget(WidgetKind::WIDGET);
    let second = ui.create_widget(WidgetKind::WIDGET);
    ui.add_children(parent, [first, second]);
    let recording = Recording::default();
    record_messages(&mut ui, first, &recording);
    record_messages(&mut ui, second, &recording);

    let mut message = key_down();
    message.propagate_to_children = true;
    message.propagate_to_parent = false;
    assert!(!ui.send(parent, &mut Message::KeyUp(message)).is_handled());

    let records = recording.drain();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].widget, first);
    assert_eq!(records[1].widget, second);
}

#[test]
fn pointer_messages_bubble_to_root() {
    let mut ui = Ui::new(UiOptions::default());
    let parent = ui.create_widget(WidgetKind::WIDGET);
    let child = ui.create_widget(WidgetKind::WIDGET);
    ui.attach(parent, child, None);
    let recording = Recording::default();
    record_messages(&mut ui, parent, &recording);

    let pointer = PointerMessage::at((5., 5.));
    assert!(!ui.send(child, &mut Message::PointerDown(pointer)).is_handled());
    assert!(!ui.send(child, &mut Message::DoubleClick(pointer)).is_handled());
    assert_eq!(
        recording.drain_kinds(),
        vec![MessageKind::PointerDown, MessageKind::DoubleClick]
    );
}

#[test]
fn cursor_query_falls_back_to_default_cursor() {
    let mut harness = TestHarness::create();
    let parent = harness.add_widget(WidgetKind::WIDGET, Rect::new(0., 0., 10., 10.));
    let child = harness.add_child(parent, WidgetKind::WIDGET, Rect::new(0., 0., 10., 10.));
    harness.platform().take();

    let handled = harness
        .ui_mut()
        .send(child, &mut Message::CursorQuery(PointerMessage::at((1., 1.))));
    assert!(handled.is_handled());
    assert_eq!(
        harness.platform().take(),
        vec![PlatformCall::SetCursor(CursorIcon::Default)]
    );
}

#[test]
fn size_assign_and_request_defaults() {
    let mut ui = Ui::new(UiOptions::default());
    let id = ui.create_widget(WidgetKind::WIDGET);
    ui.set_min_size(id, Size::new(4., 2.));

    let mut request = Message::SizeRequest {
        size: Size::ZERO,
    };
    assert!(ui.send(id, &mut request).is_handled());
    assert_matches!(request, Message::SizeRequest { size } if size.width == 4. && size.height == 2.);

    let rect = Rect::new(1., 2., 3., 4.);
    assert!(ui.send(id, &mut Message::SizeAssign { rect }).is_handled());
    assert_eq!(ui.rect(id), rect);
}

// --- MARK: SIGNALS

#[test]
fn unhandled_signal_goes_to_window() {
    let mut ui = Ui::new(UiOptions::default());
    let window = ui.create_widget(WidgetKind::WINDOW);
    let child = ui.create_widget(WidgetKind::WIDGET);
    ui.attach(window, child, None);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    ui.add_handler(
        window,
        Handler::new(BUTTON, move |_, id, message| {
            if let Message::Signal { signal, source } = message {
                log.borrow_mut().push((id, *signal, *source));
                return Handled::Yes;
            }
            Handled::No
        }),
    );

    assert!(ui.emit(child, Signal::Select).is_handled());
    assert_eq!(*seen.borrow(), vec![(window, Signal::Select, child)]);

    // Handled by the child itself: the window isn't asked.
    seen.borrow_mut().clear();
    ui.add_handler(child, Handler::new(BUTTON, consume(MessageKind::Signal)));
    assert!(ui.emit(child, Signal::Select).is_handled());
    assert!(seen.borrow().is_empty());
}

#[test]
fn window_signal_has_no_fallback() {
    let mut ui = Ui::new(UiOptions::default());
    let outer = ui.create_widget(WidgetKind::WINDOW);
    let inner = ui.create_widget(WidgetKind::WINDOW);
    ui.attach(outer, inner, None);
    let recording = Recording::default();
    record_messages(&mut ui, outer, &recording);

    assert!(!ui.emit(inner, Signal::Custom(7)).is_handled());
    assert!(recording.is_empty());
}

#[test]
fn suppressed_signals_run_no_handler() {
    let mut ui = Ui::new(UiOptions::default());
    let window = ui.create_widget(WidgetKind::WINDOW);
    let child = ui.create_widget(WidgetKind::WIDGET);
    ui.attach(window, child, None);
    let recording = Recording::default();
    record_messages(&mut ui, window, &recording);
    record_messages(&mut ui, child, &recording);

    ui.suppress_signals(child);
    assert!(ui.signals_suppressed(child));
    for signal in [Signal::Show, Signal::SetText, Signal::Custom(1)] {
        assert!(!ui.emit(child, signal).is_handled());
    }
    ui.select(child);
    assert!(recording.is_empty());
    assert!(ui.is_selected(child));

    ui.resume_signals(child);
    ui.emit(child, Signal::Show);
    assert_eq!(
        recording.drain_signals(),
        vec![(child, Signal::Show), (window, Signal::Show)]
    );
}

#[test]
fn resume_without_suppress_panics() {
    let mut ui = Ui::new(UiOptions::default());
    let id = ui.create_widget(WidgetKind::WIDGET);
    assert_debug_panics!(ui.resume_signals(id), "without matching suppress_signals");
}

// --- MARK: QUEUE

#[test]
fn queue_delivers_in_order() {
    let mut ui = Ui::new(UiOptions::default());
    let first = ui.create_widget(WidgetKind::WIDGET);
    let second = ui.create_widget(WidgetKind::WIDGET);
    let recording = Recording::default();
    record_messages(&mut ui, first, &recording);
    record_messages(&mut ui, second, &recording);

    ui.enqueue(second, Message::Open);
    ui.enqueue(first, Message::Close);
    ui.enqueue(second, Message::WindowMoved);
    assert_eq!(ui.pending_count(), 3);
    assert!(recording.is_empty());

    ui.dispatch_pending();
    let delivered: Vec<_> = recording
        .drain()
        .into_iter()
        .map(|r| (r.widget, r.message.kind()))
        .collect();
    assert_eq!(
        delivered,
        vec![
            (second, MessageKind::Open),
            (first, MessageKind::Close),
            (second, MessageKind::WindowMoved),
        ]
    );
    assert_eq!(ui.pending_count(), 0);
}

#[test]
fn messages_queued_while_dispatching_are_delivered() {
    let mut ui = Ui::new(UiOptions::default());
    let id = ui.create_widget(WidgetKind::WIDGET);
    let recording = Recording::default();
    record_messages(&mut ui, id, &recording);
    ui.add_handler(
        id,
        Handler::new(BUTTON, |ui, id, message| {
            if matches!(message, Message::Open) {
                ui.enqueue(id, Message::Close);
            }
            Handled::No
        }),
    );

    ui.enqueue(id, Message::Open);
    ui.dispatch_pending();
    assert_eq!(
        recording.drain_kinds(),
        vec![MessageKind::Open, MessageKind::Close]
    );
}

#[test]
fn filters_see_messages_first() {
    let mut ui = Ui::new(UiOptions::default());
    let target = ui.create_widget(WidgetKind::WIDGET);
    let filter = ui.create_widget(WidgetKind::WIDGET);
    let target_log = Recording::default();
    let filter_log = Recording::default();
    ui.add_handler(filter, Handler::new(BUTTON, consume(MessageKind::Close)));
    record_messages(&mut ui, target, &target_log);
    record_messages(&mut ui, filter, &filter_log);

    ui.add_message_filter(MessageKind::Open, filter);
    ui.add_message_filter(MessageKind::Close, filter);
    ui.enqueue(target, Message::Open);
    ui.enqueue(target, Message::Close);
    ui.enqueue(target, Message::WindowMoved);
    ui.dispatch_pending();

    assert_eq!(
        filter_log.drain_kinds(),
        vec![MessageKind::Open, MessageKind::Close]
    );
    // Close was consumed by the filter.
    assert_eq!(
        target_log.drain_kinds(),
        vec![MessageKind::Open, MessageKind::WindowMoved]
    );

    ui.remove_message_filter(MessageKind::Open, filter);
    ui.enqueue(target, Message::Open);
    ui.dispatch_pending();
    assert!(filter_log.is_empty());
    assert_eq!(target_log.drain_kinds(), vec![MessageKind::Open]);
}

#[test]
fn deferred_destruction_runs_after_queue() {
    let mut ui = Ui::new(UiOptions::default());
    let manager = ui.default_manager();
    let id = ui.create_widget(WidgetKind::WIDGET);
    let manager_log = Recording::default();
    record_messages(&mut ui, manager, &manager_log);
    ui.add_handler(
        id,
        Handler::new(BUTTON, |ui, id, message| {
            if matches!(message, Message::Close) {
                ui.destroy_deferred(id);
                // Destroying twice in a row only frees once.
                ui.destroy_deferred(id);
            }
            Handled::Yes
        }),
    );

    ui.enqueue(id, Message::Close);
    ui.enqueue(id, Message::Open);
    ui.dispatch_pending();

    assert!(!ui.has_widget(id));
    let records = manager_log.drain();
    assert_eq!(records.len(), 1);
    assert_matches!(records[0].message, Message::DeferredFree { target } if target == id);
}

#[test]
fn messages_to_destroyed_widgets_are_dropped() {
    let mut ui = Ui::new(UiOptions::default());
    let id = ui.create_widget(WidgetKind::WIDGET);
    ui.enqueue(id, Message::Open);
    ui.enqueue(ui.default_manager(), Message::Open);
    ui.destroy(id);

    assert_eq!(ui.pending_count(), 1);
    assert_eq!(ui.pending_messages().next().map(|(target, _)| target), Some(ui.default_manager()));
    ui.dispatch_pending();
}

#[test]
fn move_region_is_bracketed_by_pointer_hiding() {
    let mut harness = TestHarness::create();
    let id = harness.add_widget(WidgetKind::WIDGET, Rect::new(0., 0., 20., 20.));
    harness.platform().take();
    let region = Region::from_rect(Rect::new(0., 0., 20., 20.));
    harness
        .ui_mut()
        .scroll(id, &region, Vec2::new(0., 4.));

    let calls = harness.platform().take();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], PlatformCall::HidePointer);
    assert_matches!(calls[1], PlatformCall::MoveRegion { .. });
    assert_eq!(calls[2], PlatformCall::ShowPointer);
}
