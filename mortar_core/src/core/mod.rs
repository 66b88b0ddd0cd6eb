// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! Basic types and traits Mortar is built on.

mod flags;
mod handler;
mod message;
mod widget_arena;
mod widget_id;
mod widget_state;

pub use cursor_icon::CursorIcon;

pub use crate::util::Handled;
pub use flags::{Align, DrawableFlags, PointerButtons, WidgetFlags};
pub use handler::{Handler, HandlerFn};
pub use message::{KeyMessage, Message, MessageKind, PointerMessage, Signal, WheelMessage};
pub use widget_id::{WidgetId, WidgetKind};
pub use widget_state::{DrawFn, Font, WidgetState};

pub(crate) use widget_arena::{WidgetArena, WidgetNode};
pub(crate) use widget_state::DATA_SLOTS;
