// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use bitflags::bitflags;

bitflags! {
    /// Independent boolean state bits of a widget.
    ///
    /// `HIDDEN` and `DISABLED` are the widget's own bits. Whether a widget is
    /// *effectively* hidden or disabled also depends on its ancestors, see
    /// [`Ui::is_hidden`](crate::app::Ui::is_hidden).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WidgetFlags: u32 {
        /// The widget and its subtree are not shown.
        const HIDDEN = 1 << 0;
        /// The widget and its subtree don't accept input.
        const DISABLED = 1 << 1;
        /// The widget is selected (pressed, checked, highlighted).
        const SELECTED = 1 << 2;
        /// The widget floats over its parent and may draw over the parent's border.
        const DECORATIVE = 1 << 3;
        /// The widget is a candidate for default focus.
        const MAGNETIC = 1 << 4;
        /// Layout hint: the widget wants any extra space.
        const EXPANSIVE = 1 << 5;
        /// The widget can receive keyboard focus.
        const FOCUS_REST = 1 << 6;
        /// The widget has keyboard focus.
        const HAS_FOCUS = 1 << 7;
        /// The pointer is over the widget.
        const HAS_POINTER = 1 << 8;
        /// The widget holds pointer capture.
        const HAS_CAPTURE = 1 << 9;
        /// The capture also redirects pointer moves and cursor queries.
        const HARD_CAPTURE = 1 << 10;
        /// The theme has initialized the widget.
        const INITIALIZED = 1 << 11;
    }
}

bitflags! {
    /// Alignment of a widget's content inside its rectangle.
    ///
    /// No horizontal bit means left, no vertical bit means top.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Align: u32 {
        /// Align to the left edge.
        const LEFT = 1 << 0;
        /// Center horizontally.
        const CENTER = 1 << 1;
        /// Align to the right edge.
        const RIGHT = 1 << 2;
        /// Align to the top edge.
        const TOP = 1 << 3;
        /// Center vertically.
        const MIDDLE = 1 << 4;
        /// Align to the bottom edge.
        const BOTTOM = 1 << 5;
    }
}

bitflags! {
    /// Options for [`Ui::drawable_region`](crate::app::Ui::drawable_region).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DrawableFlags: u8 {
        /// Remove the parts covered by windows stacked above the widget's window.
        const CUT_TOP_WINDOWS = 1 << 0;
        /// Keep the area covered by the widget's children.
        const USE_CHILD_AREA = 1 << 1;
    }
}

bitflags! {
    /// Pointer buttons held during a pointer message.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Usually the left mouse button.
        const PRIMARY = 1 << 0;
        /// Usually the right mouse button.
        const SECONDARY = 1 << 1;
        /// Usually the middle mouse button.
        const AUXILIARY = 1 << 2;
    }
}
