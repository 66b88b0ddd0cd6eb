// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use kurbo::{Point, Rect, Size};
use peniko::Color;
use tracing::debug;

use crate::app::{EmptyTheme, HeadlessPlatform, MessageQueue, Platform, Theme, TraceConfig};
use crate::core::{
    DATA_SLOTS, DrawFn, Handler, WidgetArena, WidgetId, WidgetKind, WidgetState,
};
use crate::debug_panic;

/// Options for creating a [`Ui`].
pub struct UiOptions {
    /// The backend owning the screen and the pointer.
    pub platform: Box<dyn Platform>,
    /// The theme drawing widgets.
    pub theme: Rc<dyn Theme>,
    /// Size of the screen, which is the rectangle of the default manager.
    pub screen_size: Size,
    /// Which high-volume traces to emit.
    pub trace: TraceConfig,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            platform: Box::new(HeadlessPlatform::default()),
            theme: Rc::new(EmptyTheme),
            screen_size: Size::new(800., 600.),
            trace: TraceConfig::from_env(),
        }
    }
}

impl fmt::Debug for UiOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiOptions")
            .field("screen_size", &self.screen_size)
            .field("trace", &self.trace)
            .finish_non_exhaustive()
    }
}

/// Order of the list returned by [`Ui::ancestors`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AncestorOrder {
    /// The widget first, the root last.
    NodeToRoot,
    /// The root first, the widget last.
    RootToNode,
}

/// Where the parts of a text-and-icon control go, see [`Ui::text_icon_layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextIconLayout {
    /// The box containing both the text and the icon.
    pub bounds: Rect,
    /// The text rectangle. Zero-sized if the widget has no text.
    pub text: Rect,
    /// The icon rectangle.
    pub icon: Rect,
}

/// Who currently receives focus, hover and capture.
#[derive(Debug, Default)]
pub(crate) struct InputState {
    pub(crate) focus: Option<WidgetId>,
    pub(crate) hover: Option<WidgetId>,
    pub(crate) capture: Option<WidgetId>,
}

/// The context object owning every widget.
///
/// A `Ui` holds the widget tree, the message queue, the input state (focus,
/// hover and pointer capture) and the platform and theme collaborators. All
/// operations on widgets are methods of `Ui` taking a [`WidgetId`].
///
/// A `Ui` is created with a default manager: a [`WidgetKind::MANAGER`] widget
/// covering the screen. Windows attached to it are stacked topmost first, and
/// [`manager_of`](Self::manager_of) falls back to it for widgets outside of any
/// other manager.
///
/// Operating on a widget id that was never created or was already destroyed is
/// a programming error. Most methods panic in that case, with the name of the
/// operation; dispatch and tree edits use [`debug_panic!`] instead and do
/// nothing in release builds.
pub struct Ui {
    pub(crate) arena: WidgetArena,
    pub(crate) platform: Box<dyn Platform>,
    pub(crate) theme: Rc<dyn Theme>,
    pub(crate) input: InputState,
    pub(crate) queue: MessageQueue,
    /// Drained at the end of [`dispatch_pending`](Self::dispatch_pending).
    pub(crate) pending_destruction: Vec<WidgetId>,
    pub(crate) default_manager: WidgetId,
    pub(crate) next_user_kind: u32,
    pub(crate) trace: TraceConfig,
}

impl Ui {
    /// Create a `Ui` and its default manager.
    pub fn new(options: UiOptions) -> Self {
        let UiOptions {
            platform,
            theme,
            screen_size,
            trace,
        } = options;
        let mut ui = Self {
            arena: WidgetArena::default(),
            platform,
            theme,
            input: InputState::default(),
            queue: MessageQueue::default(),
            pending_destruction: Vec::new(),
            default_manager: WidgetId::next(),
            next_user_kind: WidgetKind::FIRST_USER_KIND,
            trace,
        };
        let manager = ui.default_manager;
        ui.insert_widget(manager, WidgetKind::MANAGER);
        ui.arena.state_mut(manager).rect = Rect::from_origin_size(Point::ORIGIN, screen_size);
        debug!(manager = manager.trace(), "Created Ui");
        ui
    }

    /// The manager created with this `Ui`.
    pub fn default_manager(&self) -> WidgetId {
        self.default_manager
    }

    /// Resize the default manager, and repaint everything inside it.
    ///
    /// The manager receives a [`Message::SizeAssign`](crate::core::Message::SizeAssign)
    /// like any other widget.
    pub fn set_screen_size(&mut self, size: Size) {
        let manager = self.default_manager;
        self.set_rect(manager, Rect::from_origin_size(Point::ORIGIN, size));
        self.invalidate(manager);
    }

    /// Allocate a widget kind distinct from every built-in kind and every
    /// kind allocated before.
    pub fn register_widget_kind(&mut self) -> WidgetKind {
        let kind = WidgetKind(self.next_user_kind);
        self.next_user_kind += 1;
        kind
    }

    /// The state of a widget.
    ///
    /// # Panics
    ///
    /// If the widget doesn't exist.
    #[track_caller]
    pub fn state(&self, id: WidgetId) -> &WidgetState {
        self.arena.state(id)
    }

    /// The state of a widget, or `None` if it doesn't exist.
    pub fn try_state(&self, id: WidgetId) -> Option<&WidgetState> {
        self.arena.try_get(id).map(|node| &node.state)
    }

    /// `true` if the widget exists.
    pub fn has_widget(&self, id: WidgetId) -> bool {
        self.arena.has(id)
    }

    /// Number of live widgets, including the default manager.
    pub fn widget_count(&self) -> usize {
        self.arena.len()
    }

    /// The current theme.
    pub fn theme(&self) -> &Rc<dyn Theme> {
        &self.theme
    }

    /// Replace the theme used by [`init_theme`](Self::init_theme) and for window masks.
    ///
    /// Already initialized widgets keep their draw routines.
    pub fn set_theme(&mut self, theme: Rc<dyn Theme>) {
        self.theme = theme;
    }

    /// The platform backend.
    pub fn platform(&self) -> &dyn Platform {
        &*self.platform
    }

    /// The platform backend.
    pub fn platform_mut(&mut self) -> &mut dyn Platform {
        &mut *self.platform
    }

    /// The trace configuration this `Ui` was created with.
    pub fn trace_config(&self) -> TraceConfig {
        self.trace
    }

    // --- MARK: HANDLERS

    /// Add `handler` in front of the widget's handler chain.
    ///
    /// It will see messages before every handler added earlier.
    #[track_caller]
    pub fn add_handler(&mut self, id: WidgetId, handler: Handler) {
        self.arena.get_mut(id).handlers.insert(0, handler);
    }

    /// Remove the first handler of `kind` from the chain, and return it.
    #[track_caller]
    pub fn remove_handler(&mut self, id: WidgetId, kind: WidgetKind) -> Option<Handler> {
        let handlers = &mut self.arena.get_mut(id).handlers;
        let index = handlers.iter().position(|handler| handler.kind == kind)?;
        Some(handlers.remove(index))
    }

    /// The first handler of `kind` in the chain.
    #[track_caller]
    pub fn lookup_handler(&self, id: WidgetId, kind: WidgetKind) -> Option<&Handler> {
        self.arena
            .get(id)
            .handlers
            .iter()
            .find(|handler| handler.kind == kind)
    }

    /// The data of the first handler of `kind` in the chain.
    ///
    /// Returns `None` if there is no such handler, or if it has no data.
    #[track_caller]
    pub fn lookup_handler_data(&self, id: WidgetId, kind: WidgetKind) -> Option<Rc<dyn Any>> {
        self.lookup_handler(id, kind)?.data.clone()
    }

    /// Like [`lookup_handler_data`](Self::lookup_handler_data), downcast to `T`.
    #[track_caller]
    pub fn handler_data<T: Any>(&self, id: WidgetId, kind: WidgetKind) -> Option<Rc<T>> {
        self.lookup_handler_data(id, kind)?.downcast::<T>().ok()
    }

    /// Number of handlers in the chain, including the default handler.
    #[track_caller]
    pub fn handler_count(&self, id: WidgetId) -> usize {
        self.arena.get(id).handlers.len()
    }

    // --- MARK: PROPERTIES

    /// Set the name used by [`find_name`](Self::find_name).
    #[track_caller]
    pub fn set_name(&mut self, id: WidgetId, name: Option<&str>) {
        self.arena.state_mut(id).name = name.map(str::to_string);
    }

    /// Set the smallest size accepted by [`request_size`](Self::request_size).
    #[track_caller]
    pub fn set_min_size(&mut self, id: WidgetId, size: Size) {
        self.arena.state_mut(id).min_size = size;
    }

    /// Set the largest size accepted by [`request_size`](Self::request_size).
    #[track_caller]
    pub fn set_max_size(&mut self, id: WidgetId, size: Size) {
        self.arena.state_mut(id).max_size = size;
    }

    /// Set the background color. `None` restores the theme's default.
    #[track_caller]
    pub fn set_bg_color(&mut self, id: WidgetId, color: Option<Color>) {
        self.arena.state_mut(id).bg_color = color;
    }

    /// Set the kind used to pick the theme's draw routine.
    #[track_caller]
    pub fn set_draw_kind(&mut self, id: WidgetId, kind: WidgetKind) {
        self.arena.state_mut(id).draw_kind = kind;
    }

    /// Bind a draw routine, overriding the theme's.
    #[track_caller]
    pub fn set_draw_method(&mut self, id: WidgetId, draw: Option<DrawFn>) {
        self.arena.state_mut(id).draw_method = draw;
    }

    /// Store opaque theme data in slot `slot`.
    #[track_caller]
    pub fn set_theme_data(&mut self, id: WidgetId, slot: usize, data: Option<Rc<dyn Any>>) {
        if slot >= DATA_SLOTS {
            debug_panic!("Theme data slot {slot} out of range for widget {id}.");
            return;
        }
        self.arena.state_mut(id).theme_data[slot] = data;
    }

    /// Store opaque user data in slot `slot`.
    #[track_caller]
    pub fn set_user_data(&mut self, id: WidgetId, slot: usize, data: Option<Rc<dyn Any>>) {
        if slot >= DATA_SLOTS {
            debug_panic!("User data slot {slot} out of range for widget {id}.");
            return;
        }
        self.arena.state_mut(id).user_data[slot] = data;
    }
}

impl fmt::Debug for Ui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ui")
            .field("widgets", &self.arena.len())
            .field("default_manager", &self.default_manager)
            .field("input", &self.input)
            .field("queue", &self.queue)
            .field("pending_destruction", &self.pending_destruction)
            .field("trace", &self.trace)
            .finish_non_exhaustive()
    }
}
