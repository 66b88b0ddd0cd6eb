// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

/// Checks that the given expression panics in debug builds. No-op in release builds.
///
/// Mortar reports contract violations, such as sending a message to a widget
/// that was already destroyed, with `debug_panic!`. This macro checks for them.
/// The optional second argument must be a substring of the panic message.
///
/// ```
/// use mortar_core::app::{Ui, UiOptions};
/// use mortar_core::core::WidgetKind;
/// use mortar_testing::assert_debug_panics;
///
/// let mut ui = Ui::new(UiOptions::default());
/// let id = ui.create_widget(WidgetKind::WIDGET);
/// ui.destroy(id);
/// assert_debug_panics!(ui.destroy(id), "non-existent widget");
/// ```
#[macro_export]
macro_rules! assert_debug_panics {
    ($expr:expr) => {
        $crate::assert_debug_panics_inner(
            || {
                $expr;
            },
            "",
        )
    };

    ($expr:expr, $needle:expr) => {
        $crate::assert_debug_panics_inner(
            || {
                $expr;
            },
            &($needle).to_string(),
        )
    };
}

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

#[track_caller]
#[doc(hidden)]
pub fn assert_debug_panics_inner(callback: impl FnOnce(), needle: &str) {
    if cfg!(not(debug_assertions)) {
        return;
    }

    // Only the panic matters here, not whatever state the callback left behind.
    let Err(payload) = catch_unwind(AssertUnwindSafe(callback)) else {
        panic!("expression did not panic in a debug build");
    };
    let message = panic_message(payload.as_ref());

    assert!(
        message.contains(needle),
        "panic message {message:?} does not contain {needle:?}"
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        panic!("panic payload is neither a &str nor a String");
    }
}
