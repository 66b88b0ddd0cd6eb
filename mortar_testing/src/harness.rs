// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use std::rc::Rc;

use keyboard_types::{Code, Key, Modifiers};
use kurbo::{Point, Rect, Size};
use mortar_core::app::{TraceConfig, Ui, UiOptions, try_init_test_tracing};
use mortar_core::core::{
    Handled, KeyMessage, Message, PointerButtons, PointerMessage, WidgetId, WidgetKind,
};
use mortar_region::Region;
use tracing::debug;

use crate::{DrawLog, PlatformLog, RecordingPlatform, TestTheme};

/// A [`Ui`] running without a screen, for tests.
///
/// The `Ui` uses a [`RecordingPlatform`] and a [`TestTheme`], whose logs are
/// available from the harness.
///
/// Input helpers go through [`Ui::route_pointer`] and [`Ui::route_key`], then
/// deliver any queued messages, the way a platform event loop would.
pub struct TestHarness {
    ui: Ui,
    platform: PlatformLog,
    draws: DrawLog,
    theme: Rc<TestTheme>,
    pointer: Point,
    buttons: PointerButtons,
}

/// Parameters for creating a [`TestHarness`].
#[derive(Debug, Clone, Copy)]
pub struct TestHarnessParams {
    /// Size of the default manager.
    pub screen_size: Size,
    /// Trace configuration of the `Ui`.
    pub trace: TraceConfig,
}

impl TestHarnessParams {
    /// Default screen size for tests.
    pub const DEFAULT_SIZE: Size = Size::new(400., 400.);
}

impl Default for TestHarnessParams {
    fn default() -> Self {
        Self {
            screen_size: Self::DEFAULT_SIZE,
            trace: TraceConfig::from_env(),
        }
    }
}

/// A [`Message::PaintRect`] queued by [`TestHarness::paint`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintRecord {
    /// The widget to paint.
    pub widget: WidgetId,
    /// The rectangle to paint.
    pub rect: Rect,
    /// Rectangles left in the widget's batch.
    pub remaining: usize,
}

impl TestHarness {
    /// Builds a harness with the default parameters.
    pub fn create() -> Self {
        Self::create_with(TestHarnessParams::default())
    }

    /// Builds a harness with the given screen size.
    pub fn create_with_size(screen_size: Size) -> Self {
        Self::create_with(TestHarnessParams {
            screen_size,
            ..Default::default()
        })
    }

    /// Builds a harness with the given parameters.
    pub fn create_with(params: TestHarnessParams) -> Self {
        // If there is no default tracing subscriber, we set our own. If one has
        // already been set, we get an error which we swallow.
        let _ = try_init_test_tracing();

        let platform = PlatformLog::default();
        let draws = DrawLog::default();
        let theme = Rc::new(TestTheme::new(&draws));
        let ui = Ui::new(UiOptions {
            platform: Box::new(RecordingPlatform::new(&platform)),
            theme: theme.clone(),
            screen_size: params.screen_size,
            trace: params.trace,
        });

        Self {
            ui,
            platform,
            draws,
            theme,
            pointer: Point::ORIGIN,
            buttons: PointerButtons::empty(),
        }
    }

    // --- MARK: ACCESSORS

    /// The `Ui` under test.
    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    /// The `Ui` under test.
    pub fn ui_mut(&mut self) -> &mut Ui {
        &mut self.ui
    }

    /// The calls made to the platform.
    pub fn platform(&self) -> &PlatformLog {
        &self.platform
    }

    /// The draw calls made through the theme.
    pub fn draws(&self) -> &DrawLog {
        &self.draws
    }

    /// The theme of the `Ui`.
    pub fn theme(&self) -> &TestTheme {
        &self.theme
    }

    /// The default manager of the `Ui`.
    pub fn manager(&self) -> WidgetId {
        self.ui.default_manager()
    }

    // --- MARK: BUILD TREES

    /// Create an unattached widget and assign it `rect`.
    pub fn add_widget(&mut self, kind: WidgetKind, rect: Rect) -> WidgetId {
        let id = self.ui.create_widget(kind);
        self.ui.set_rect(id, rect);
        id
    }

    /// Create a widget, append it to `parent` and assign it `rect`.
    ///
    /// The rectangle is assigned after attaching, so it isn't overwritten by
    /// the parent's layout.
    pub fn add_child(&mut self, parent: WidgetId, kind: WidgetKind, rect: Rect) -> WidgetId {
        let id = self.ui.create_widget(kind);
        self.ui.attach(parent, id, None);
        self.ui.set_rect(id, rect);
        id
    }

    /// Create a window as the bottommost window of the default manager.
    pub fn add_window(&mut self, rect: Rect) -> WidgetId {
        let manager = self.manager();
        self.add_child(manager, WidgetKind::WINDOW, rect)
    }

    // --- MARK: DAMAGE

    /// Flush the damage of the subtree, and return the paint messages it queued.
    ///
    /// The messages are then delivered, so widgets with a draw routine log to
    /// [`draws`](Self::draws).
    pub fn paint(&mut self, root: WidgetId) -> Vec<PaintRecord> {
        let queued = self.ui.pending_count();
        self.ui.flush(root);
        let records = self
            .ui
            .pending_messages()
            .skip(queued)
            .filter_map(|(widget, message)| match message {
                Message::PaintRect { rect, remaining } => Some(PaintRecord {
                    widget,
                    rect: *rect,
                    remaining: *remaining,
                }),
                _ => None,
            })
            .collect();
        self.ui.dispatch_pending();
        records
    }

    /// The union of the dirty regions of every widget of the subtree.
    pub fn dirty_region(&self, root: WidgetId) -> Region {
        let mut region = self.ui.state(root).dirty_region().clone();
        for child in self.ui.children(root) {
            region.union(&self.dirty_region(*child));
        }
        region
    }

    // --- MARK: INPUT

    /// Move the pointer to `position`.
    pub fn pointer_move(&mut self, position: impl Into<Point>) -> Handled {
        self.pointer = position.into();
        debug!("Harness pointer moved to {:?}", self.pointer);
        let message = Message::PointerMove(self.pointer_message());
        self.route_pointer(message)
    }

    /// Press the primary button where the pointer is.
    pub fn pointer_down(&mut self) -> Handled {
        self.buttons.insert(PointerButtons::PRIMARY);
        let message = Message::PointerDown(self.pointer_message());
        self.route_pointer(message)
    }

    /// Release the primary button where the pointer is.
    pub fn pointer_up(&mut self) -> Handled {
        self.buttons.remove(PointerButtons::PRIMARY);
        let message = Message::PointerUp(self.pointer_message());
        self.route_pointer(message)
    }

    /// Move to the center of the widget, then press and release.
    #[track_caller]
    pub fn click_on(&mut self, id: WidgetId) {
        let center = self.ui.state(id).rect().center();
        self.pointer_move(center);
        self.pointer_down();
        self.pointer_up();
    }

    /// Press and release a key.
    pub fn key_press(&mut self, code: Code, key: Key) -> Handled {
        let message = KeyMessage::new(code, key.clone(), Modifiers::empty());
        let handled = self.route_key(Message::KeyDown(message));
        self.route_key(Message::KeyUp(KeyMessage::new(code, key, Modifiers::empty())));
        handled
    }

    fn pointer_message(&self) -> PointerMessage {
        PointerMessage {
            position: self.pointer,
            buttons: self.buttons,
            modifiers: Modifiers::empty(),
        }
    }

    fn route_pointer(&mut self, message: Message) -> Handled {
        let handled = self.ui.route_pointer(message);
        self.ui.dispatch_pending();
        handled
    }

    fn route_key(&mut self, message: Message) -> Handled {
        let handled = self.ui.route_key(message);
        self.ui.dispatch_pending();
        handled
    }
}

impl std::fmt::Debug for TestHarness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestHarness")
            .field("ui", &self.ui)
            .field("pointer", &self.pointer)
            .field("buttons", &self.buttons)
            .finish_non_exhaustive()
    }
}
