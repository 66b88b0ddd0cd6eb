// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::app::Ui;
use crate::core::{Handled, Message, WidgetId, WidgetKind};

/// The callback type of a [`Handler`].
///
/// It receives the whole [`Ui`], so it may freely send further messages, edit
/// the tree, or destroy widgets, including the one it is attached to.
pub type HandlerFn = dyn Fn(&mut Ui, WidgetId, &mut Message) -> Handled;

/// A behavior plugin attached to a widget.
///
/// Each widget owns an ordered chain of handlers. A message is offered to them
/// from the most recently added to the oldest, until one returns [`Handled::Yes`].
/// The oldest handler of every widget is the built-in default handler, with kind
/// [`WidgetKind::WIDGET`].
///
/// The kind tags which control installed the handler. It is used by
/// [`Ui::lookup_handler`] and [`Ui::send_after`], and has no other meaning.
///
/// [`Ui::lookup_handler`]: crate::app::Ui::lookup_handler
/// [`Ui::send_after`]: crate::app::Ui::send_after
#[derive(Clone)]
pub struct Handler {
    pub(crate) kind: WidgetKind,
    pub(crate) callback: Rc<HandlerFn>,
    pub(crate) data: Option<Rc<dyn Any>>,
}

impl Handler {
    /// Create a handler of the given kind, without data.
    pub fn new(
        kind: WidgetKind,
        callback: impl Fn(&mut Ui, WidgetId, &mut Message) -> Handled + 'static,
    ) -> Self {
        Self {
            kind,
            callback: Rc::new(callback),
            data: None,
        }
    }

    /// Builder-style method to attach opaque data to the handler.
    ///
    /// The data can be retrieved with [`Ui::handler_data`](crate::app::Ui::handler_data).
    pub fn with_data(mut self, data: impl Any) -> Self {
        self.data = Some(Rc::new(data));
        self
    }

    /// The kind tag of this handler.
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// The data attached with [`with_data`](Self::with_data).
    pub fn data(&self) -> Option<&Rc<dyn Any>> {
        self.data.as_ref()
    }

    pub(crate) fn call(&self, ui: &mut Ui, id: WidgetId, message: &mut Message) -> Handled {
        (self.callback)(ui, id, message)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("kind", &self.kind)
            .field("has_data", &self.data.is_some())
            .finish_non_exhaustive()
    }
}
