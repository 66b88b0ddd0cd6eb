// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use cursor_icon::CursorIcon;
use kurbo::Vec2;
use mortar_region::Region;

/// The backend owning the screen surface and the pointer device.
///
/// Mortar calls into the platform to move already-drawn pixels when scrolling,
/// to change the cursor shape, and to grab pointer input at the OS level while
/// a widget holds a hard capture. Feeding input into the [`Ui`](crate::app::Ui)
/// is the platform's business and not part of this trait.
pub trait Platform {
    /// Show the pointer again after [`hide_pointer`](Self::hide_pointer).
    fn show_pointer(&mut self) {}

    /// Hide the pointer while pixels under it are moved.
    fn hide_pointer(&mut self) {}

    /// Change the pointer cursor shape.
    fn set_cursor(&mut self, cursor: CursorIcon);

    /// Start receiving pointer input even outside the surface.
    fn capture_input(&mut self) {}

    /// Undo [`capture_input`](Self::capture_input).
    fn release_input(&mut self) {}

    /// Copy the pixels in `region` by `delta`, on screen.
    fn move_region(&mut self, region: &Region, delta: Vec2);
}

/// A platform without a screen.
///
/// It only remembers the state Mortar asked for, which is enough for tests and
/// for running the widget tree without a display.
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    /// The last cursor set.
    pub cursor: CursorIcon,
    /// Whether input is captured at the platform level.
    pub input_captured: bool,
    /// Balance of hide and show calls.
    pub pointer_hidden: u32,
}

impl Platform for HeadlessPlatform {
    fn show_pointer(&mut self) {
        self.pointer_hidden = self.pointer_hidden.saturating_sub(1);
    }

    fn hide_pointer(&mut self) {
        self.pointer_hidden += 1;
    }

    fn set_cursor(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }

    fn capture_input(&mut self) {
        self.input_captured = true;
    }

    fn release_input(&mut self) {
        self.input_captured = false;
    }

    fn move_region(&mut self, region: &Region, delta: Vec2) {
        tracing::trace!(rects = region.len(), ?delta, "Headless move_region");
    }
}
