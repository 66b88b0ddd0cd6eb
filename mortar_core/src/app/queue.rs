// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use std::collections::VecDeque;

use crate::core::{Message, MessageKind, WidgetId};

/// A queued message and its destination.
#[derive(Debug)]
pub(crate) struct Envelope {
    pub(crate) target: WidgetId,
    pub(crate) message: Message,
}

/// Messages waiting for [`Ui::dispatch_pending`](crate::app::Ui::dispatch_pending),
/// and the filters that see them first.
#[derive(Debug, Default)]
pub(crate) struct MessageQueue {
    pub(crate) messages: VecDeque<Envelope>,
    /// In registration order.
    pub(crate) filters: Vec<(MessageKind, WidgetId)>,
}

impl MessageQueue {
    pub(crate) fn push(&mut self, target: WidgetId, message: Message) {
        self.messages.push_back(Envelope { target, message });
    }

    pub(crate) fn pop(&mut self) -> Option<Envelope> {
        self.messages.pop_front()
    }

    pub(crate) fn filters_for(&self, kind: MessageKind) -> Vec<WidgetId> {
        self.filters
            .iter()
            .filter(|(filter_kind, _)| *filter_kind == kind)
            .map(|(_, id)| *id)
            .collect()
    }

    /// Drop every queued message and filter referencing `id`.
    pub(crate) fn forget_widget(&mut self, id: WidgetId) {
        self.messages.retain(|envelope| {
            envelope.target != id
                && !matches!(envelope.message, Message::DeferredFree { target } if target == id)
        });
        self.filters.retain(|(_, filter)| *filter != id);
    }
}
