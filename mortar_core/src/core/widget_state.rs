// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use kurbo::{Insets, Rect, Size};
use mortar_region::Region;
use peniko::Color;
use tracing::{Span, trace_span};

use crate::app::Ui;
use crate::core::{Align, WidgetFlags, WidgetId, WidgetKind};

/// Number of opaque theme and user data slots on each widget.
pub(crate) const DATA_SLOTS: usize = 4;

/// A routine drawing one rectangle of a widget.
///
/// Bound per widget by the theme (see [`Theme::draw_method`](crate::app::Theme::draw_method))
/// or explicitly with [`Ui::set_draw_method`](crate::app::Ui::set_draw_method).
pub type DrawFn = Rc<dyn Fn(&mut Ui, WidgetId, Rect)>;

/// A font reference, as handed out by the theme.
///
/// Mortar never renders text itself; the font is only passed back to
/// [`Theme::measure_text`](crate::app::Theme::measure_text).
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Font family name.
    pub family: Rc<str>,
    /// Font size in pixels.
    pub size: f64,
}

impl Font {
    /// Create a font reference.
    pub fn new(family: impl Into<Rc<str>>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// Generic state for all widgets in the hierarchy.
///
/// This struct holds everything the core knows about a widget apart from its
/// position in the tree and its handler chain. It's read through
/// [`Ui::state`](crate::app::Ui::state) and changed through the setters of
/// [`Ui`](crate::app::Ui), which take care of invalidating and emitting signals.
pub struct WidgetState {
    pub(crate) id: WidgetId,
    pub(crate) kind: WidgetKind,
    /// The kind used to look up the theme's draw routine.
    pub(crate) draw_kind: WidgetKind,
    pub(crate) name: Option<String>,

    // --- MARK: GEOMETRY
    /// The bounding rectangle, in screen coordinates.
    pub(crate) rect: Rect,
    pub(crate) min_size: Size,
    pub(crate) max_size: Size,
    /// Border widths. The content rectangle is the bounding rectangle minus these.
    pub(crate) border: Insets,
    pub(crate) child_spacing: f64,

    // --- MARK: TEXT
    /// `None` means "no text", which is distinct from an empty string.
    pub(crate) text: Option<String>,
    pub(crate) align: Align,
    pub(crate) font: Option<Font>,
    pub(crate) bg_color: Option<Color>,

    pub(crate) flags: WidgetFlags,

    /// Pixels waiting to be repainted.
    ///
    /// Always a subset of the drawable region at the time it was last computed.
    pub(crate) dirty: Region,
    /// Signals are dropped while this is nonzero.
    pub(crate) signal_suppression: u32,

    pub(crate) draw_method: Option<DrawFn>,
    pub(crate) theme_data: [Option<Rc<dyn Any>>; DATA_SLOTS],
    pub(crate) user_data: [Option<Rc<dyn Any>>; DATA_SLOTS],

    pub(crate) trace_span: Span,
}

impl WidgetState {
    pub(crate) fn new(id: WidgetId, kind: WidgetKind, font: Option<Font>) -> Self {
        Self {
            id,
            kind,
            draw_kind: kind,
            name: None,
            rect: Rect::ZERO,
            min_size: Size::ZERO,
            max_size: Size::new(f64::INFINITY, f64::INFINITY),
            border: Insets::ZERO,
            child_spacing: 0.,
            text: None,
            align: Align::empty(),
            font,
            bg_color: None,
            flags: WidgetFlags::empty(),
            dirty: Region::new(),
            signal_suppression: 0,
            draw_method: None,
            theme_data: [const { None }; DATA_SLOTS],
            user_data: [const { None }; DATA_SLOTS],
            trace_span: trace_span!("Widget", kind = %kind, id = id.trace()),
        }
    }

    /// The widget's id.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The widget's kind.
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// The kind used to pick the theme's draw routine. Defaults to [`kind`](Self::kind).
    pub fn draw_kind(&self) -> WidgetKind {
        self.draw_kind
    }

    /// The widget's name, used by [`Ui::find_name`](crate::app::Ui::find_name).
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The bounding rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The bounding rectangle shrunk by the border insets.
    ///
    /// This is the rectangle children are clipped to.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.rect.x0 + self.border.x0,
            self.rect.y0 + self.border.y0,
            self.rect.x1 - self.border.x1,
            self.rect.y1 - self.border.y1,
        )
    }

    /// The smallest size the widget accepts.
    pub fn min_size(&self) -> Size {
        self.min_size
    }

    /// The largest size the widget accepts.
    pub fn max_size(&self) -> Size {
        self.max_size
    }

    /// The border insets.
    pub fn border(&self) -> Insets {
        self.border
    }

    /// Spacing hint between children, or between an icon and its text.
    pub fn child_spacing(&self) -> f64 {
        self.child_spacing
    }

    /// The widget's text, `None` if it has none.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The content alignment.
    pub fn align(&self) -> Align {
        self.align
    }

    /// The widget's font, `None` if neither the widget nor the theme set one.
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// The background color, `None` for the theme's default.
    pub fn bg_color(&self) -> Option<Color> {
        self.bg_color
    }

    /// The widget's own flag bits, without inheritance from ancestors.
    pub fn flags(&self) -> WidgetFlags {
        self.flags
    }

    /// The region waiting to be repainted.
    pub fn dirty_region(&self) -> &Region {
        &self.dirty
    }

    /// `true` if a draw routine is bound.
    pub fn has_draw_method(&self) -> bool {
        self.draw_method.is_some()
    }

    /// The value of theme data slot `slot`.
    ///
    /// # Panics
    ///
    /// If `slot` is out of range.
    pub fn theme_data(&self, slot: usize) -> Option<&Rc<dyn Any>> {
        self.theme_data[slot].as_ref()
    }

    /// The value of user data slot `slot`.
    ///
    /// # Panics
    ///
    /// If `slot` is out of range.
    pub fn user_data(&self, slot: usize) -> Option<&Rc<dyn Any>> {
        self.user_data[slot].as_ref()
    }
}

impl fmt::Debug for WidgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetState")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("rect", &self.rect)
            .field("text", &self.text)
            .field("flags", &self.flags)
            .field("dirty", &self.dirty)
            .field("signal_suppression", &self.signal_suppression)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_rect_applies_border() {
        let mut state = WidgetState::new(WidgetId::next(), WidgetKind::WIDGET, None);
        state.rect = Rect::new(10., 10., 110., 60.);
        state.border = Insets::new(1., 2., 3., 4.);
        assert_eq!(state.content_rect(), Rect::new(11., 12., 107., 56.));
    }

    #[test]
    fn fresh_widget_defaults() {
        let state = WidgetState::new(WidgetId::next(), WidgetKind::WINDOW, None);
        assert_eq!(state.draw_kind(), WidgetKind::WINDOW);
        assert!(state.text().is_none());
        assert!(state.flags().is_empty());
        assert!(state.dirty_region().is_empty());
        assert_eq!(state.max_size().width, f64::INFINITY);
    }
}
