// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! Mortar Core is the foundation of the Mortar widget toolkit.
//!
//! It keeps a retained tree of widgets, routes messages to them through a
//! per-widget chain of [handlers](core::Handler), and tracks which parts of the
//! screen must be repainted after any change.
//!
//! Concrete controls (buttons, windows, text boxes) are not types in this crate.
//! They are built by giving a widget a [kind](core::WidgetKind) and attaching
//! handlers that react to the messages they care about.
//!
//! All state lives in a [`Ui`](app::Ui) context object, created once with
//! [`UiOptions`](app::UiOptions):
//!
//! ```
//! use mortar_core::app::{Ui, UiOptions};
//! use mortar_core::core::{Handled, Handler, Message, Signal, WidgetKind};
//! use mortar_core::kurbo::Rect;
//!
//! let mut ui = Ui::new(UiOptions::default());
//! let parent = ui.create_widget(WidgetKind::WIDGET);
//! let child = ui.create_widget(WidgetKind::WIDGET);
//!
//! ui.add_handler(
//!     child,
//!     Handler::new(WidgetKind::WIDGET, |_ui, _id, message| match message {
//!         Message::Signal { signal: Signal::Show, .. } => Handled::Yes,
//!         _ => Handled::No,
//!     }),
//! );
//!
//! ui.attach(parent, child, None);
//! ui.set_rect(parent, Rect::new(0., 0., 100., 50.));
//! assert_eq!(ui.state(child).rect(), Rect::new(0., 0., 100., 50.));
//! ```
//!
//! ## Damage tracking
//!
//! Changes that affect how a widget looks mark parts of it "dirty" rather than
//! drawing immediately. [`Ui::flush`](app::Ui::flush) turns dirty regions into
//! [`Message::PaintRect`](core::Message::PaintRect) messages on the queue, and
//! [`Ui::dispatch_pending`](app::Ui::dispatch_pending) delivers them.
//!
//! ## Logging
//!
//! Mortar logs through [`tracing`]. See [`app::try_init_tracing`] for a default
//! subscriber, and [`app::TraceConfig`] for the `MORTAR_TRACE` environment
//! variable which enables per-message and per-widget spans.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(
    test,
    expect(
        unused_crate_dependencies,
        reason = "False-positive with dev-dependencies only used in integration tests"
    )
)]

pub use cursor_icon;
pub use keyboard_types;
pub use kurbo;
pub use mortar_region as region;
pub use peniko;

#[macro_use]
pub mod util;

pub mod app;
pub mod core;

mod passes;
