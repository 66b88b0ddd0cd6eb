// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use mortar_core::app::Ui;
use mortar_core::core::{Handled, Handler, Message, MessageKind, Signal, WidgetId, WidgetKind};

/// The kind of the handler installed by [`record_messages`].
pub const RECORDER: WidgetKind = WidgetKind(u32::MAX);

/// A log of the messages received by one or more widgets.
///
/// Clones share the same log, so a test keeps one and hands another to
/// [`record_messages`].
#[derive(Debug, Clone, Default)]
pub struct Recording(Rc<RefCell<VecDeque<Record>>>);

/// One message, as seen by the recorder when it was delivered.
#[derive(Debug, Clone)]
pub struct Record {
    /// The widget the message was delivered to.
    pub widget: WidgetId,
    /// The message, before any older handler of the chain saw it.
    pub message: Message,
}

impl Recording {
    /// True if no messages have been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// The number of messages in the recording.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Clear recorded messages.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Returns the oldest record, if one exists.
    ///
    /// This consumes the record.
    pub fn next(&self) -> Option<Record> {
        self.0.borrow_mut().pop_front()
    }

    /// Returns all records, oldest first, and empties the recording.
    pub fn drain(&self) -> Vec<Record> {
        self.0.borrow_mut().drain(..).collect()
    }

    /// Returns the kinds of all records, and empties the recording.
    pub fn drain_kinds(&self) -> Vec<MessageKind> {
        self.drain()
            .into_iter()
            .map(|record| record.message.kind())
            .collect()
    }

    /// Returns the signals received, with the widget that received each, and
    /// empties the recording.
    pub fn drain_signals(&self) -> Vec<(WidgetId, Signal)> {
        self.drain()
            .into_iter()
            .filter_map(|record| match record.message {
                Message::Signal { signal, .. } => Some((record.widget, signal)),
                _ => None,
            })
            .collect()
    }

    fn push(&self, record: Record) {
        self.0.borrow_mut().push_back(record);
    }
}

/// Put a handler in front of the widget's chain that records every message
/// and lets it through.
pub fn record_messages(ui: &mut Ui, id: WidgetId, recording: &Recording) {
    let recording = recording.clone();
    ui.add_handler(
        id,
        Handler::new(RECORDER, move |_ui, widget, message| {
            recording.push(Record {
                widget,
                message: message.clone(),
            });
            Handled::No
        }),
    );
}
