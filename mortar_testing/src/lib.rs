// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! Headless runner for testing [Mortar](mortar_core) widget trees.
//!
//! The primary type from this crate is [`TestHarness`], which owns a
//! [`Ui`](mortar_core::app::Ui) wired to a [`RecordingPlatform`] and a
//! [`TestTheme`]. Neither draws anything: they record what the core asked of
//! them, so tests can check cursor changes, pixel moves and draw calls.
//!
//! The harness can:
//!
//! - Build widgets with a rectangle in one call.
//! - Simulate pointer and keyboard input through the core's input routing.
//! - Flush damage and collect the paint batches it produced.
//!
//! To watch the messages a widget receives, attach a recorder with
//! [`record_messages`] and read the [`Recording`].
//!
//! ```
//! use mortar_core::core::{Message, WidgetKind};
//! use mortar_core::kurbo::Rect;
//! use mortar_testing::{Recording, TestHarness, record_messages};
//!
//! let mut harness = TestHarness::create();
//! let button = harness.add_widget(WidgetKind::WIDGET, Rect::new(0., 0., 40., 20.));
//! let recording = Recording::default();
//! record_messages(harness.ui_mut(), button, &recording);
//!
//! harness.ui_mut().send(button, &mut Message::Open);
//! assert_eq!(recording.len(), 1);
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET

mod assert_debug_panics;
mod harness;
mod recorder;
mod recording_platform;
mod test_theme;

pub use assert_debug_panics::assert_debug_panics_inner;
pub use harness::{PaintRecord, TestHarness, TestHarnessParams};
pub use recorder::{RECORDER, Record, Recording, record_messages};
pub use recording_platform::{PlatformCall, PlatformLog, RecordingPlatform};
pub use test_theme::{DrawLog, TestTheme};
