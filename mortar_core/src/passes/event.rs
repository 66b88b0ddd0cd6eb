// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! Handler chain dispatch, signals, the message queue and input routing.

use cursor_icon::CursorIcon;
use smallvec::SmallVec;
use tracing::trace;

use crate::app::{Envelope, Ui};
use crate::core::{
    Handled, Handler, Message, MessageKind, Signal, WidgetFlags, WidgetId, WidgetKind,
};
use crate::debug_panic;
use crate::passes::enter_span_if;

// --- MARK: SEND
impl Ui {
    /// Offer `message` to the widget's handler chain.
    ///
    /// Handlers run from the most recently added to the oldest, stopping at the
    /// first that returns [`Handled::Yes`]. The chain is snapshotted first:
    /// handlers added or removed while the message is being handled don't affect
    /// this delivery. If the widget is destroyed by one of its handlers, the
    /// remaining handlers are skipped.
    pub fn send(&mut self, id: WidgetId, message: &mut Message) -> Handled {
        self.send_from(id, message, None)
    }

    /// Like [`send`](Self::send), but skips every handler up to and including
    /// the first one of `kind`.
    ///
    /// A handler uses this to run the handlers behind it, typically to defer to
    /// the default behavior after doing its own work. If the chain has no handler
    /// of `kind`, nothing runs.
    pub fn send_after(&mut self, id: WidgetId, message: &mut Message, kind: WidgetKind) -> Handled {
        self.send_from(id, message, Some(kind))
    }

    fn send_from(
        &mut self,
        id: WidgetId,
        message: &mut Message,
        after: Option<WidgetKind>,
    ) -> Handled {
        let Some(node) = self.arena.try_get(id) else {
            debug_panic!(
                "Cannot send {} to non-existent widget {id}.",
                message.short_name()
            );
            return Handled::No;
        };
        let handlers: SmallVec<[Handler; 4]> = match after {
            None => node.handlers.iter().cloned().collect(),
            Some(kind) => {
                let Some(index) = node.handlers.iter().position(|handler| handler.kind == kind)
                else {
                    return Handled::No;
                };
                node.handlers[index + 1..].iter().cloned().collect()
            }
        };

        let _span = enter_span_if(self.trace.dispatch, &node.state);
        if self.trace.dispatch {
            trace!(
                message = message.short_name(),
                handlers = handlers.len(),
                "Dispatching message"
            );
        }

        for handler in handlers {
            if !self.arena.has(id) {
                break;
            }
            if handler.call(self, id, message).is_handled() {
                if self.trace.dispatch {
                    trace!(handler = %handler.kind, "Message handled");
                }
                return Handled::Yes;
            }
        }
        Handled::No
    }

    /// Offer `message` to each child of `id`, in order.
    ///
    /// Every child sees the message. Returns whether any of them handled it.
    pub fn broadcast_to_children(&mut self, id: WidgetId, message: &mut Message) -> Handled {
        let mut handled = Handled::No;
        for child in self.arena.children_of(id).to_vec() {
            if self.arena.has(child) {
                handled |= self.send(child, message);
            }
        }
        handled
    }
}

// --- MARK: SIGNALS
impl Ui {
    /// Notify the widget of `signal`.
    ///
    /// Does nothing while the widget's signals are suppressed. Otherwise sends
    /// [`Message::Signal`] to the widget, and if it isn't handled and the widget
    /// isn't a window itself, to the widget's window.
    pub fn emit(&mut self, id: WidgetId, signal: Signal) -> Handled {
        let Some(node) = self.arena.try_get(id) else {
            debug_panic!("Cannot emit {signal:?} from non-existent widget {id}.");
            return Handled::No;
        };
        if node.state.signal_suppression > 0 {
            return Handled::No;
        }
        let is_window = node.state.kind == WidgetKind::WINDOW;

        let mut message = Message::Signal { signal, source: id };
        let mut handled = self.send(id, &mut message);
        if !handled.is_handled() && !is_window && self.arena.has(id) {
            if let Some(window) = self.window_of(id) {
                handled = self.send(window, &mut message);
            }
        }
        handled
    }

    /// Stop delivering signals from this widget until [`resume_signals`](Self::resume_signals).
    ///
    /// Calls nest: signals resume after as many resumes as suppressions.
    #[track_caller]
    pub fn suppress_signals(&mut self, id: WidgetId) {
        self.arena.state_mut(id).signal_suppression += 1;
    }

    /// Undo one [`suppress_signals`](Self::suppress_signals).
    #[track_caller]
    pub fn resume_signals(&mut self, id: WidgetId) {
        let state = self.arena.state_mut(id);
        if state.signal_suppression == 0 {
            debug_panic!("resume_signals called on {id} without matching suppress_signals.");
            return;
        }
        state.signal_suppression -= 1;
    }

    /// `true` if the widget's signals are suppressed.
    #[track_caller]
    pub fn signals_suppressed(&self, id: WidgetId) -> bool {
        self.arena.state(id).signal_suppression > 0
    }
}

// --- MARK: DEFAULT HANDLER

/// The handler at the end of every widget's chain.
pub(crate) fn default_handler(ui: &mut Ui, id: WidgetId, message: &mut Message) -> Handled {
    match message {
        Message::Open | Message::Close | Message::WindowMoved => {
            ui.broadcast_to_children(id, message)
        }
        Message::PaintRect { rect, .. } => {
            let rect = *rect;
            match ui.arena.state(id).draw_method.clone() {
                Some(draw) => {
                    draw(ui, id, rect);
                    Handled::Yes
                }
                None => Handled::No,
            }
        }
        Message::SizeRequest { size } => {
            *size = ui.arena.state(id).min_size;
            Handled::Yes
        }
        Message::SizeAssign { rect } => {
            let state = ui.arena.state_mut(id);
            let old_origin = state.rect.origin();
            state.rect = *rect;
            let content = state.content_rect();
            // Windows keep their own geometry and follow the manager's origin.
            let offset = (state.kind == WidgetKind::MANAGER).then(|| rect.origin() - old_origin);
            for child in ui.arena.children_of(id).to_vec() {
                if !ui.arena.has(child) {
                    continue;
                }
                let child_rect = match offset {
                    Some(offset) => ui.arena.state(child).rect + offset,
                    None => content,
                };
                ui.set_rect(child, child_rect);
            }
            Handled::Yes
        }
        Message::PaintRegion { region } => {
            if !ui.arena.state(id).flags.contains(WidgetFlags::HIDDEN) {
                ui.invalidate_region(id, region);
            }
            Handled::Yes
        }
        Message::DirtyChildren => {
            for child in ui.arena.children_of(id).to_vec() {
                if ui.arena.has(child) {
                    ui.invalidate(child);
                }
            }
            Handled::Yes
        }
        Message::KeyDown(key) | Message::KeyUp(key) => {
            let to_children = key.propagate_to_children;
            let to_parent = key.propagate_to_parent;
            if to_children {
                ui.broadcast_to_children(id, message);
            }
            match ui.arena.try_get(id).and_then(|node| node.parent) {
                Some(parent) if to_parent => ui.send(parent, message),
                _ => Handled::No,
            }
        }
        Message::PointerDown(_)
        | Message::PointerUp(_)
        | Message::DoubleClick(_)
        | Message::PointerMove(_)
        | Message::Wheel(_) => match ui.arena.parent_of(id) {
            Some(parent) => ui.send(parent, message),
            None => Handled::No,
        },
        Message::CursorQuery(_) => match ui.arena.parent_of(id) {
            Some(parent) => ui.send(parent, message),
            None => {
                ui.platform.set_cursor(CursorIcon::Default);
                Handled::Yes
            }
        },
        _ => Handled::No,
    }
}

// --- MARK: QUEUE
impl Ui {
    /// Queue `message` for delivery to `target` by [`dispatch_pending`](Self::dispatch_pending).
    pub fn enqueue(&mut self, target: WidgetId, message: Message) {
        if !self.arena.has(target) {
            debug_panic!(
                "Cannot queue {} for non-existent widget {target}.",
                message.short_name()
            );
            return;
        }
        self.queue.push(target, message);
    }

    /// The queued messages, oldest first.
    pub fn pending_messages(&self) -> impl Iterator<Item = (WidgetId, &Message)> + '_ {
        self.queue
            .messages
            .iter()
            .map(|envelope| (envelope.target, &envelope.message))
    }

    /// Number of queued messages.
    pub fn pending_count(&self) -> usize {
        self.queue.messages.len()
    }

    /// Deliver every queued message, then destroy the widgets queued with
    /// [`destroy_deferred`](Self::destroy_deferred).
    ///
    /// Messages queued while dispatching are delivered in the same call. Each
    /// message is first offered to the filters registered for its kind, in
    /// registration order; a message handled by a filter is not delivered.
    pub fn dispatch_pending(&mut self) {
        loop {
            while let Some(Envelope {
                target,
                mut message,
            }) = self.queue.pop()
            {
                if !self.arena.has(target) {
                    continue;
                }
                if self.run_filters(&mut message) {
                    continue;
                }
                if self.arena.has(target) {
                    self.send(target, &mut message);
                }
            }

            if self.pending_destruction.is_empty() {
                break;
            }
            for id in std::mem::take(&mut self.pending_destruction) {
                if !self.arena.has(id) {
                    continue;
                }
                let manager = self.default_manager;
                if self.arena.has(manager) {
                    self.send(manager, &mut Message::DeferredFree { target: id });
                }
                if self.arena.has(id) {
                    self.destroy(id);
                }
            }
        }
    }

    fn run_filters(&mut self, message: &mut Message) -> bool {
        for filter in self.queue.filters_for(message.kind()) {
            if self.arena.has(filter) && self.send(filter, message).is_handled() {
                if self.trace.dispatch {
                    trace!(
                        filter = filter.trace(),
                        message = message.short_name(),
                        "Message filtered"
                    );
                }
                return true;
            }
        }
        false
    }

    /// Offer every queued message of `kind` to `filter` before its destination.
    ///
    /// The filter is removed when the widget is destroyed.
    pub fn add_message_filter(&mut self, kind: MessageKind, filter: WidgetId) {
        if !self.arena.has(filter) {
            debug_panic!("Cannot add non-existent widget {filter} as a message filter.");
            return;
        }
        self.queue.filters.push((kind, filter));
    }

    /// Undo [`add_message_filter`](Self::add_message_filter).
    pub fn remove_message_filter(&mut self, kind: MessageKind, filter: WidgetId) {
        self.queue
            .filters
            .retain(|(filter_kind, id)| !(*filter_kind == kind && *id == filter));
    }
}

// --- MARK: INPUT ROUTING
impl Ui {
    /// Deliver a pointer message coming from the platform.
    ///
    /// Pointer releases go to the widget holding capture. Moves and cursor
    /// queries go to it only under a hard capture. Everything else, and all
    /// messages when nothing holds capture, go to the widget under the pointer.
    /// Moves outside of a hard capture also update the hovered widget, and are
    /// followed by a cursor query to the same target.
    pub fn route_pointer(&mut self, mut message: Message) -> Handled {
        let Some(position) = message.position() else {
            debug_panic!(
                "route_pointer needs a pointer message, got {}.",
                message.short_name()
            );
            return Handled::No;
        };
        let kind = message.kind();
        let under_pointer = self.pick(self.default_manager, position);
        let capture = self.input.capture;
        let hard = capture.is_some_and(|id| {
            self.arena
                .state(id)
                .flags
                .contains(WidgetFlags::HARD_CAPTURE)
        });

        let target = match kind {
            MessageKind::PointerUp => capture.or(under_pointer),
            MessageKind::PointerMove | MessageKind::CursorQuery if hard => capture,
            _ => under_pointer,
        };
        if kind == MessageKind::PointerMove && !hard {
            self.set_hover(under_pointer);
        }

        let Some(target) = target else {
            return Handled::No;
        };
        if !self.arena.has(target) {
            return Handled::No;
        }
        let handled = self.send(target, &mut message);

        if let Message::PointerMove(pointer) = message {
            if self.arena.has(target) {
                self.send(target, &mut Message::CursorQuery(pointer));
            }
        }
        handled
    }

    /// Deliver a key message to the focused widget, or to the default manager
    /// if nothing has focus.
    pub fn route_key(&mut self, mut message: Message) -> Handled {
        if !matches!(message.kind(), MessageKind::KeyDown | MessageKind::KeyUp) {
            debug_panic!("route_key needs a key message, got {}.", message.short_name());
            return Handled::No;
        }
        let target = self.input.focus.unwrap_or(self.default_manager);
        if !self.arena.has(target) {
            return Handled::No;
        }
        self.send(target, &mut message)
    }
}
