// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Rect, Size};
use mortar_core::app::{Theme, Ui};
use mortar_core::core::{DrawFn, Font, WidgetId, WidgetKind};
use mortar_region::Region;

/// The draw calls made through a [`TestTheme`]'s draw routines.
#[derive(Debug, Clone, Default)]
pub struct DrawLog(Rc<RefCell<Vec<(WidgetId, Rect)>>>);

impl DrawLog {
    /// All draw calls so far, oldest first.
    pub fn calls(&self) -> Vec<(WidgetId, Rect)> {
        self.0.borrow().clone()
    }

    /// The rectangles drawn for one widget, oldest first.
    pub fn for_widget(&self, id: WidgetId) -> Vec<Rect> {
        self.0
            .borrow()
            .iter()
            .filter(|(widget, _)| *widget == id)
            .map(|(_, rect)| *rect)
            .collect()
    }

    /// Empty the log.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, id: WidgetId, rect: Rect) {
        self.0.borrow_mut().push((id, rect));
    }
}

/// A theme for tests.
///
/// - Every draw kind gets a draw routine that logs to a [`DrawLog`].
/// - Window masks can be set per window with [`set_window_mask`](Self::set_window_mask).
/// - Text is measured as if the font were monospace, with
///   [`CHAR_WIDTH`](Self::CHAR_WIDTH) by [`LINE_HEIGHT`](Self::LINE_HEIGHT) cells.
/// - Initializing a widget with text sets its minimum size to fit the text.
#[derive(Debug)]
pub struct TestTheme {
    draws: DrawLog,
    window_masks: RefCell<Vec<(WidgetId, Region)>>,
    font: Font,
}

impl TestTheme {
    /// Width of one character.
    pub const CHAR_WIDTH: f64 = 8.;
    /// Height of one line of text.
    pub const LINE_HEIGHT: f64 = 16.;

    /// Create a theme whose draw routines log to `draws`.
    pub fn new(draws: &DrawLog) -> Self {
        Self {
            draws: draws.clone(),
            window_masks: RefCell::new(Vec::new()),
            font: Font::new("Test Mono", Self::LINE_HEIGHT),
        }
    }

    /// Give `window` a shape other than its rectangle, or restore it with `None`.
    pub fn set_window_mask(&self, window: WidgetId, mask: Option<Region>) {
        let mut masks = self.window_masks.borrow_mut();
        masks.retain(|(id, _)| *id != window);
        if let Some(mask) = mask {
            masks.push((window, mask));
        }
    }
}

impl Theme for TestTheme {
    fn draw_method(&self, _draw_kind: WidgetKind) -> Option<DrawFn> {
        let draws = self.draws.clone();
        Some(Rc::new(move |_ui: &mut Ui, id: WidgetId, rect: Rect| {
            draws.push(id, rect);
        }))
    }

    fn window_mask(&self, _ui: &Ui, window: WidgetId) -> Option<Region> {
        self.window_masks
            .borrow()
            .iter()
            .find(|(id, _)| *id == window)
            .map(|(_, mask)| mask.clone())
    }

    fn default_font(&self) -> Option<Font> {
        Some(self.font.clone())
    }

    fn init_widget(&self, ui: &mut Ui, id: WidgetId) {
        let Some(text) = ui.text(id) else {
            return;
        };
        let text_size = self.measure_text(ui.font(id), text);
        let border = ui.state(id).border();
        let size = Size::new(
            text_size.width + border.x0 + border.x1,
            text_size.height + border.y0 + border.y1,
        );
        ui.set_min_size(id, size);
    }

    fn measure_text(&self, _font: Option<&Font>, text: &str) -> Size {
        let chars = text.chars().count() as f64;
        Size::new(chars * Self::CHAR_WIDTH, Self::LINE_HEIGHT)
    }
}
