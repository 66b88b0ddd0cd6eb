// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::field::DisplayValue;

/// A unique identifier for a single widget.
///
/// Ids are assigned when a widget is created and are never reused for the
/// lifetime of the process, so a stale id never aliases a newer widget.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) NonZeroU64);

impl WidgetId {
    /// Allocates a new, unique `WidgetId`.
    pub(crate) fn next() -> Self {
        static WIDGET_ID_COUNTER: AtomicU64 = AtomicU64::new(1);
        let id = WIDGET_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        match NonZeroU64::new(id) {
            Some(id) => Self(id),
            // panic safety: the counter starts at 1 and would need 2^64 widgets to wrap
            None => unreachable!(),
        }
    }

    /// A serialized representation of the `WidgetId` for debugging purposes.
    pub fn trace(self) -> DisplayValue<Self> {
        tracing::field::display(self)
    }

    /// Returns the integer value of the `WidgetId`.
    pub fn to_raw(self) -> u64 {
        self.0.into()
    }
}

impl From<WidgetId> for u64 {
    fn from(id: WidgetId) -> Self {
        id.0.into()
    }
}

impl Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The category of a widget.
///
/// The kind is used for semantic lookups such as "the window this widget is in"
/// and to pick the theme's draw routine. Handlers are tagged with a kind too,
/// usually the kind of the widget they implement.
///
/// Kinds for new controls are allocated with
/// [`Ui::register_widget_kind`](crate::app::Ui::register_widget_kind), which never
/// returns one of the built-in values.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WidgetKind(pub u32);

impl WidgetKind {
    /// A plain widget. The default handler installed on every widget has this kind.
    pub const WIDGET: Self = Self(0);
    /// A top-level manager, owning windows and the message queue they share.
    pub const MANAGER: Self = Self(1);
    /// A top-level window. Windows stack inside their manager.
    pub const WINDOW: Self = Self(2);
    /// A scrollable container.
    pub const VIEW: Self = Self(3);
    /// The visible area of a [`VIEW`](Self::VIEW), parent of the scrolled content.
    pub const VIEW_VIEWPORT: Self = Self(4);

    /// The first value handed out for user-registered kinds.
    pub const FIRST_USER_KIND: u32 = 0x1000;

    /// `true` for kinds allocated at runtime rather than built in.
    pub fn is_user_kind(self) -> bool {
        self.0 >= Self::FIRST_USER_KIND
    }

    /// A short name for logs.
    pub fn short_name(self) -> &'static str {
        match self {
            Self::WIDGET => "Widget",
            Self::MANAGER => "Manager",
            Self::WINDOW => "Window",
            Self::VIEW => "View",
            Self::VIEW_VIEWPORT => "ViewViewport",
            _ => "UserKind",
        }
    }
}

impl Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_user_kind() {
            write!(f, "UserKind({})", self.0)
        } else {
            f.write_str(self.short_name())
        }
    }
}
