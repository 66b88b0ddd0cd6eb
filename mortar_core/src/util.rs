// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! Miscellaneous utility types and macros.

/// Panic in debug and `tracing::error` in release mode.
///
/// This macro is in some way a combination of `panic` and `debug_assert`,
/// but it will log the provided message instead of ignoring it in release builds.
///
/// It's useful when a backtrace would aid debugging but a crash can be avoided in release.
#[macro_export]
macro_rules! debug_panic {
    ($msg:expr$(,)?) => {
        if cfg!(debug_assertions) {
            panic!($msg);
        } else {
            tracing::error!($msg);
        }
    };
    ($fmt:expr, $($arg:tt)+) => {
        if cfg!(debug_assertions) {
            panic!($fmt, $($arg)*);
        } else {
            tracing::error!($fmt, $($arg)*);
        }
    };
}

pub use crate::debug_panic;

/// An enum for specifying whether a message was handled.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Handled {
    /// The message was handled, and shouldn't be offered to other handlers.
    Yes,
    /// The message has not been handled yet.
    No,
}

impl Handled {
    /// Has the message been handled yet?
    pub fn is_handled(self) -> bool {
        self == Self::Yes
    }
}

impl From<bool> for Handled {
    /// Returns `Handled::Yes` if `handled` is true, and `Handled::No` otherwise.
    fn from(handled: bool) -> Self {
        if handled { Self::Yes } else { Self::No }
    }
}

impl From<Handled> for bool {
    fn from(handled: Handled) -> Self {
        handled.is_handled()
    }
}

impl std::ops::BitOr for Handled {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from(self.is_handled() || rhs.is_handled())
    }
}

impl std::ops::BitOrAssign for Handled {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}
