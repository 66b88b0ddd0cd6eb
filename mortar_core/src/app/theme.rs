// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use kurbo::Size;
use mortar_region::Region;

use crate::app::Ui;
use crate::core::{DrawFn, Font, WidgetId, WidgetKind};

/// The collaborator turning widgets into pixels.
///
/// Every method has a default, so a theme only overrides what it supports.
pub trait Theme {
    /// The draw routine for widgets whose draw kind is `draw_kind`.
    ///
    /// Bound to a widget by [`Ui::init_theme`] unless it already has one.
    fn draw_method(&self, draw_kind: WidgetKind) -> Option<DrawFn> {
        let _ = draw_kind;
        None
    }

    /// The shape of a window, if it isn't its bounding rectangle.
    ///
    /// Only consulted for widgets of kind [`WidgetKind::WINDOW`].
    fn window_mask(&self, ui: &Ui, window: WidgetId) -> Option<Region> {
        let _ = (ui, window);
        None
    }

    /// The font new widgets start with.
    fn default_font(&self) -> Option<Font> {
        None
    }

    /// Theme-specific setup of a widget, run by [`Ui::init_theme`].
    ///
    /// Typical themes set borders, spacing and minimum size here.
    fn init_widget(&self, ui: &mut Ui, id: WidgetId) {
        let _ = (ui, id);
    }

    /// The size of `text` drawn with `font`.
    fn measure_text(&self, font: Option<&Font>, text: &str) -> Size {
        let _ = (font, text);
        Size::ZERO
    }
}

/// A theme that draws nothing and measures every text as empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyTheme;

impl Theme for EmptyTheme {}
