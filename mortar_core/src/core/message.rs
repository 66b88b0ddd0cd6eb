// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use std::any::Any;
use std::rc::Rc;

use keyboard_types::{Code, Key, Modifiers};
use kurbo::{Point, Rect, Size, Vec2};
use mortar_region::Region;

use crate::core::{PointerButtons, WidgetId};

/// One event delivered to a widget.
///
/// Messages are handed to [`Ui::send`](crate::app::Ui::send) by mutable
/// reference, so handlers can answer queries in place (see
/// [`SizeRequest`](Self::SizeRequest)).
#[derive(Clone, Debug)]
pub enum Message {
    // --- MARK: LIFECYCLE
    /// The widget is about to be destroyed.
    Destroy,
    /// Sent to a manager when a widget queued with
    /// [`Ui::destroy_deferred`](crate::app::Ui::destroy_deferred) is freed.
    DeferredFree {
        /// The widget being freed.
        target: WidgetId,
    },
    /// The window containing the widget was opened.
    Open,
    /// The window containing the widget was closed.
    Close,
    /// The window containing the widget was moved.
    WindowMoved,

    // --- MARK: GEOMETRY
    /// Asks the widget for its preferred size, written back into `size`.
    SizeRequest {
        /// The answer. Starts at zero.
        size: Size,
    },
    /// Assigns a rectangle to the widget.
    SizeAssign {
        /// The new bounding rectangle.
        rect: Rect,
    },

    // --- MARK: PAINT
    /// Draw one rectangle of the widget.
    PaintRect {
        /// The area to draw, in the same coordinates as the widget's rectangle.
        rect: Rect,
        /// How many rectangles of the same batch follow this one. Zero on the last.
        remaining: usize,
    },
    /// Schedule a repaint of the part of the widget that intersects `region`.
    PaintRegion {
        /// The area to repaint.
        region: Region,
    },
    /// Schedule a full repaint of every child.
    DirtyChildren,

    // --- MARK: INPUT
    /// A key was pressed.
    KeyDown(KeyMessage),
    /// A key was released.
    KeyUp(KeyMessage),
    /// A pointer button was pressed.
    PointerDown(PointerMessage),
    /// A pointer button was released.
    PointerUp(PointerMessage),
    /// A pointer button was pressed twice in quick succession.
    DoubleClick(PointerMessage),
    /// The pointer moved.
    PointerMove(PointerMessage),
    /// The wheel was turned.
    Wheel(WheelMessage),
    /// Asks which cursor to show at the pointer position.
    CursorQuery(PointerMessage),

    // --- MARK: FOCUS
    /// The widget gained keyboard focus.
    FocusEnter,
    /// The widget lost keyboard focus.
    FocusLeave,
    /// The pointer entered the widget.
    PointerEnter,
    /// The pointer left the widget.
    PointerLeave,

    // --- MARK: SIGNALS
    /// A semantic notification, see [`Ui::emit`](crate::app::Ui::emit).
    Signal {
        /// What happened.
        signal: Signal,
        /// The widget the signal is about.
        source: WidgetId,
    },
    /// A message defined by a control built on top of Mortar.
    Custom {
        /// Identifies the message for the handlers that understand it.
        id: u32,
        /// Opaque payload.
        payload: Rc<dyn Any>,
    },
}

/// The payload-less discriminant of a [`Message`].
///
/// Used to select messages without matching on their content, for instance in
/// [`Ui::add_message_filter`](crate::app::Ui::add_message_filter).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[expect(missing_docs, reason = "Each variant mirrors the Message variant of the same name")]
pub enum MessageKind {
    Destroy,
    DeferredFree,
    Open,
    Close,
    WindowMoved,
    SizeRequest,
    SizeAssign,
    PaintRect,
    PaintRegion,
    DirtyChildren,
    KeyDown,
    KeyUp,
    PointerDown,
    PointerUp,
    DoubleClick,
    PointerMove,
    Wheel,
    CursorQuery,
    FocusEnter,
    FocusLeave,
    PointerEnter,
    PointerLeave,
    Signal,
    Custom,
}

impl Message {
    /// The discriminant of this message.
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::Destroy => MessageKind::Destroy,
            Self::DeferredFree { .. } => MessageKind::DeferredFree,
            Self::Open => MessageKind::Open,
            Self::Close => MessageKind::Close,
            Self::WindowMoved => MessageKind::WindowMoved,
            Self::SizeRequest { .. } => MessageKind::SizeRequest,
            Self::SizeAssign { .. } => MessageKind::SizeAssign,
            Self::PaintRect { .. } => MessageKind::PaintRect,
            Self::PaintRegion { .. } => MessageKind::PaintRegion,
            Self::DirtyChildren => MessageKind::DirtyChildren,
            Self::KeyDown(_) => MessageKind::KeyDown,
            Self::KeyUp(_) => MessageKind::KeyUp,
            Self::PointerDown(_) => MessageKind::PointerDown,
            Self::PointerUp(_) => MessageKind::PointerUp,
            Self::DoubleClick(_) => MessageKind::DoubleClick,
            Self::PointerMove(_) => MessageKind::PointerMove,
            Self::Wheel(_) => MessageKind::Wheel,
            Self::CursorQuery(_) => MessageKind::CursorQuery,
            Self::FocusEnter => MessageKind::FocusEnter,
            Self::FocusLeave => MessageKind::FocusLeave,
            Self::PointerEnter => MessageKind::PointerEnter,
            Self::PointerLeave => MessageKind::PointerLeave,
            Self::Signal { .. } => MessageKind::Signal,
            Self::Custom { .. } => MessageKind::Custom,
        }
    }

    /// A short name for logs.
    pub fn short_name(&self) -> &'static str {
        match self.kind() {
            MessageKind::Destroy => "Destroy",
            MessageKind::DeferredFree => "DeferredFree",
            MessageKind::Open => "Open",
            MessageKind::Close => "Close",
            MessageKind::WindowMoved => "WindowMoved",
            MessageKind::SizeRequest => "SizeRequest",
            MessageKind::SizeAssign => "SizeAssign",
            MessageKind::PaintRect => "PaintRect",
            MessageKind::PaintRegion => "PaintRegion",
            MessageKind::DirtyChildren => "DirtyChildren",
            MessageKind::KeyDown => "KeyDown",
            MessageKind::KeyUp => "KeyUp",
            MessageKind::PointerDown => "PointerDown",
            MessageKind::PointerUp => "PointerUp",
            MessageKind::DoubleClick => "DoubleClick",
            MessageKind::PointerMove => "PointerMove",
            MessageKind::Wheel => "Wheel",
            MessageKind::CursorQuery => "CursorQuery",
            MessageKind::FocusEnter => "FocusEnter",
            MessageKind::FocusLeave => "FocusLeave",
            MessageKind::PointerEnter => "PointerEnter",
            MessageKind::PointerLeave => "PointerLeave",
            MessageKind::Signal => "Signal",
            MessageKind::Custom => "Custom",
        }
    }

    /// The pointer position, for pointer and wheel messages.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown(pointer)
            | Self::PointerUp(pointer)
            | Self::DoubleClick(pointer)
            | Self::PointerMove(pointer)
            | Self::CursorQuery(pointer) => Some(pointer.position),
            Self::Wheel(wheel) => Some(wheel.position),
            _ => None,
        }
    }
}

/// A semantic notification about a widget.
///
/// Signals are emitted with [`Ui::emit`](crate::app::Ui::emit). If the widget
/// doesn't handle one, it is offered to the widget's window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// The widget was shown.
    Show,
    /// The widget was hidden.
    Hide,
    /// The widget was enabled.
    Enable,
    /// The widget was disabled.
    Disable,
    /// The widget was selected.
    Select,
    /// The widget was deselected.
    Deselect,
    /// The widget's text changed.
    SetText,
    /// The widget's font changed.
    SetFont,
    /// The theme initialized the widget.
    InitTheme,
    /// A child was added to the widget.
    AddChild,
    /// A child was removed from the widget.
    RemoveChild,
    /// The widget was attached to or detached from a parent.
    NewParent,
    /// A signal defined by a control built on top of Mortar.
    Custom(u32),
}

/// Payload of [`Message::KeyDown`] and [`Message::KeyUp`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMessage {
    /// The physical key.
    pub code: Code,
    /// The logical key.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Whether the default handling offers the message to every child.
    pub propagate_to_children: bool,
    /// Whether the default handling forwards the message to the parent.
    pub propagate_to_parent: bool,
}

impl KeyMessage {
    /// A key message that bubbles up to the parent but not down to children.
    pub fn new(code: Code, key: Key, modifiers: Modifiers) -> Self {
        Self {
            code,
            key,
            modifiers,
            propagate_to_children: false,
            propagate_to_parent: true,
        }
    }
}

/// Payload of the pointer button and motion messages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerMessage {
    /// The pointer position, in screen coordinates.
    pub position: Point,
    /// Buttons held.
    pub buttons: PointerButtons,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl PointerMessage {
    /// A pointer message at `position` with no button or modifier held.
    pub fn at(position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            buttons: PointerButtons::empty(),
            modifiers: Modifiers::empty(),
        }
    }
}

/// Payload of [`Message::Wheel`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelMessage {
    /// The pointer position, in screen coordinates.
    pub position: Point,
    /// Scroll amount.
    pub delta: Vec2,
    /// Modifiers held.
    pub modifiers: Modifiers,
}
