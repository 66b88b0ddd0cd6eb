// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! Geometry, text and theme properties.
//!
//! Layout itself is delegated to widgets: a parent asks children for their
//! preferred size with [`Ui::request_size`] and assigns their rectangles with
//! [`Ui::set_rect`].

use keyboard_types::Code;
use kurbo::{Insets, Point, Rect, Size};

use crate::app::{TextIconLayout, Ui};
use crate::core::{Align, Font, Message, Signal, WidgetFlags, WidgetId};

// --- MARK: GEOMETRY
impl Ui {
    /// The preferred size of the widget, clamped to its minimum and maximum sizes.
    #[track_caller]
    pub fn request_size(&mut self, id: WidgetId) -> Size {
        let mut message = Message::SizeRequest { size: Size::ZERO };
        self.send(id, &mut message);
        let size = match message {
            Message::SizeRequest { size } => size,
            _ => Size::ZERO,
        };
        let state = self.arena.state(id);
        Size::new(
            size.width.min(state.max_size.width).max(state.min_size.width),
            size.height.min(state.max_size.height).max(state.min_size.height),
        )
    }

    /// Assign a rectangle to the widget, by sending it [`Message::SizeAssign`].
    ///
    /// The default handling stores the rectangle and assigns the content
    /// rectangle to every child. Nothing is repainted.
    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) {
        self.send(id, &mut Message::SizeAssign { rect });
    }

    /// Assign the widget's current rectangle again, then repaint it.
    #[track_caller]
    pub fn relayout(&mut self, id: WidgetId) {
        let rect = self.arena.state(id).rect;
        self.set_rect(id, rect);
        self.invalidate(id);
    }

    /// The bounding rectangle of the widget.
    #[track_caller]
    pub fn rect(&self, id: WidgetId) -> Rect {
        self.arena.state(id).rect
    }

    /// The rectangle available to the children: the bounding rectangle shrunk
    /// by the border.
    #[track_caller]
    pub fn content_rect(&self, id: WidgetId) -> Rect {
        self.arena.state(id).content_rect()
    }

    /// Set the border insets, then repaint the widget.
    #[track_caller]
    pub fn set_border(&mut self, id: WidgetId, border: Insets) {
        self.arena.state_mut(id).border = border;
        self.invalidate(id);
    }

    /// Remove the border and the child spacing, then repaint the widget.
    #[track_caller]
    pub fn set_no_borders(&mut self, id: WidgetId) {
        let state = self.arena.state_mut(id);
        state.border = Insets::ZERO;
        state.child_spacing = 0.;
        self.invalidate(id);
    }

    /// Set the space layouts put between children, then repaint the widget.
    #[track_caller]
    pub fn set_child_spacing(&mut self, id: WidgetId, spacing: f64) {
        self.arena.state_mut(id).child_spacing = spacing;
        self.invalidate(id);
    }
}

// --- MARK: TEXT
impl Ui {
    /// Set the text, emit [`Signal::SetText`], then repaint the widget.
    ///
    /// `None` removes the text, which is different from an empty text.
    #[track_caller]
    pub fn set_text(&mut self, id: WidgetId, text: Option<&str>) {
        self.set_text_quiet(id, text);
        self.emit(id, Signal::SetText);
        self.invalidate(id);
    }

    /// Set the text without any signal or repaint.
    #[track_caller]
    pub fn set_text_quiet(&mut self, id: WidgetId, text: Option<&str>) {
        self.arena.state_mut(id).text = text.map(str::to_string);
    }

    /// The text of the widget.
    #[track_caller]
    pub fn text(&self, id: WidgetId) -> Option<&str> {
        self.arena.state(id).text.as_deref()
    }

    /// `false` if the widget has no text. An empty text is still a text.
    #[track_caller]
    pub fn has_text(&self, id: WidgetId) -> bool {
        self.arena.state(id).text.is_some()
    }

    /// The text parsed as an integer, ignoring surrounding whitespace.
    #[track_caller]
    pub fn text_as_int(&self, id: WidgetId) -> Option<i64> {
        self.text(id)?.trim().parse().ok()
    }

    /// The text parsed as a number, ignoring surrounding whitespace.
    #[track_caller]
    pub fn text_as_f64(&self, id: WidgetId) -> Option<f64> {
        self.text(id)?.trim().parse().ok()
    }

    /// Set the font, emit [`Signal::SetFont`], then repaint the widget.
    #[track_caller]
    pub fn set_font(&mut self, id: WidgetId, font: Option<Font>) {
        self.arena.state_mut(id).font = font;
        self.emit(id, Signal::SetFont);
        self.invalidate(id);
    }

    /// The font of the widget.
    #[track_caller]
    pub fn font(&self, id: WidgetId) -> Option<&Font> {
        self.arena.state(id).font.as_ref()
    }

    /// Set how the content is placed inside the widget.
    ///
    /// Neither emits a signal nor repaints.
    #[track_caller]
    pub fn set_align(&mut self, id: WidgetId, align: Align) {
        self.arena.state_mut(id).align = align;
    }

    /// `true` if the text marks `code` as the widget's mnemonic.
    ///
    /// A mnemonic is written `&` followed by a letter or digit, matched without
    /// regard to case. `&&` stands for a literal ampersand.
    #[track_caller]
    pub fn has_mnemonic(&self, id: WidgetId, code: Code) -> bool {
        let Some(key) = mnemonic_char(code) else {
            return false;
        };
        let Some(text) = self.text(id) else {
            return false;
        };
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c != '&' {
                continue;
            }
            match chars.next() {
                Some('&') | None => {}
                Some(next) => {
                    if next.to_ascii_lowercase() == key {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Place the text and an icon of `icon_size` inside the widget.
    ///
    /// `icon_align` says where the icon goes relative to the text: left, right
    /// or centered horizontally, and top, bottom or middle vertically. A
    /// centered icon is stacked above or below the text, unless it's also in
    /// the middle, where it's drawn over the text. The box holding both is
    /// placed with the widget's alignment inside its border.
    #[track_caller]
    pub fn text_icon_layout(&self, id: WidgetId, icon_align: Align, icon_size: Size) -> TextIconLayout {
        let state = self.arena.state(id);
        let text_size = match &state.text {
            Some(text) => self.theme.measure_text(state.font.as_ref(), text),
            None => Size::ZERO,
        };
        let has_text = state.text.is_some();
        let spacing = if has_text { state.child_spacing } else { 0. };

        let box_size = if icon_align.contains(Align::CENTER) {
            if icon_align.contains(Align::MIDDLE) {
                Size::new(
                    icon_size.width.max(text_size.width),
                    icon_size.height.max(text_size.height),
                )
            } else {
                Size::new(
                    icon_size.width.max(text_size.width),
                    icon_size.height + spacing + text_size.height,
                )
            }
        } else {
            Size::new(
                icon_size.width + spacing + text_size.width,
                icon_size.height.max(text_size.height),
            )
        };

        let rect = state.rect;
        let border = state.border;
        let align = state.align;
        let box_x = if align.contains(Align::RIGHT) {
            rect.x1 - box_size.width - border.x1
        } else if align.contains(Align::CENTER) {
            (rect.x0 + rect.x1) / 2. - box_size.width / 2.
        } else {
            rect.x0 + border.x0
        };
        let box_y = if align.contains(Align::BOTTOM) {
            rect.y1 - box_size.height - border.y1
        } else if align.contains(Align::MIDDLE) {
            (rect.y0 + rect.y1) / 2. - box_size.height / 2.
        } else {
            rect.y0 + border.y0
        };
        let bounds = Rect::from_origin_size((box_x, box_y), box_size);

        if !has_text {
            return TextIconLayout {
                bounds,
                text: Rect::ZERO,
                icon: Rect::from_origin_size((box_x, box_y), icon_size),
            };
        }

        let (text_x, icon_x) = if icon_align.contains(Align::RIGHT) {
            (box_x, box_x + box_size.width - icon_size.width)
        } else if icon_align.contains(Align::CENTER) {
            (
                box_x + box_size.width / 2. - text_size.width / 2.,
                box_x + box_size.width / 2. - icon_size.width / 2.,
            )
        } else {
            (box_x + box_size.width - text_size.width, box_x)
        };
        let (text_y, icon_y) = if icon_align.contains(Align::BOTTOM) {
            (box_y, box_y + box_size.height - icon_size.height)
        } else if icon_align.contains(Align::MIDDLE) {
            (
                box_y + box_size.height / 2. - text_size.height / 2.,
                box_y + box_size.height / 2. - icon_size.height / 2.,
            )
        } else {
            (box_y + box_size.height - text_size.height, box_y)
        };

        TextIconLayout {
            bounds,
            text: Rect::from_origin_size(Point::new(text_x, text_y), text_size),
            icon: Rect::from_origin_size(Point::new(icon_x, icon_y), icon_size),
        }
    }
}

/// The lowercase character typed by a letter or digit key.
fn mnemonic_char(code: Code) -> Option<char> {
    let name = code.to_string();
    let rest = name
        .strip_prefix("Key")
        .or_else(|| name.strip_prefix("Digit"))?;
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

// --- MARK: THEME
impl Ui {
    /// Apply the theme to the widget.
    ///
    /// Binds the theme's draw routine for the widget's draw kind unless a draw
    /// routine is already bound, runs the theme's widget setup, marks the
    /// widget initialized and emits [`Signal::InitTheme`].
    #[track_caller]
    pub fn init_theme(&mut self, id: WidgetId) {
        let theme = self.theme.clone();
        let state = self.arena.state_mut(id);
        if state.draw_method.is_none() {
            state.draw_method = theme.draw_method(state.draw_kind);
        }
        theme.init_widget(self, id);
        if let Some(node) = self.arena.try_get_mut(id) {
            node.state.flags.insert(WidgetFlags::INITIALIZED);
            self.emit(id, Signal::InitTheme);
        }
    }
}
