// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! State flags, pointer capture, focus and hover.

use tracing::debug;

use crate::app::Ui;
use crate::core::{Message, Signal, WidgetFlags, WidgetId};
use crate::debug_panic;

// --- MARK: VISIBILITY
impl Ui {
    /// Clear the hidden flag, repaint the widget and emit [`Signal::Show`].
    ///
    /// Does nothing if the widget isn't hidden.
    #[track_caller]
    pub fn show(&mut self, id: WidgetId) {
        let state = self.arena.state_mut(id);
        if !state.flags.contains(WidgetFlags::HIDDEN) {
            return;
        }
        state.flags.remove(WidgetFlags::HIDDEN);
        self.invalidate(id);
        self.emit(id, Signal::Show);
    }

    /// Set the hidden flag and emit [`Signal::Hide`].
    ///
    /// The widget and its descendants lose focus, hover and capture, and
    /// their pending damage is dropped. The area it covered isn't repainted:
    /// that's up to whoever hides it.
    /// Does nothing if the widget is already hidden.
    #[track_caller]
    pub fn hide(&mut self, id: WidgetId) {
        if self.arena.state(id).flags.contains(WidgetFlags::HIDDEN) {
            return;
        }
        self.free_widget(id);
        self.clear_damage(id);
        self.arena.state_mut(id).flags.insert(WidgetFlags::HIDDEN);
        self.emit(id, Signal::Hide);
    }

    /// `true` if the widget or one of its ancestors is hidden.
    #[track_caller]
    pub fn is_hidden(&self, id: WidgetId) -> bool {
        self.any_ancestor_has(id, WidgetFlags::HIDDEN)
    }

    /// `true` if neither the widget nor any of its ancestors is hidden.
    #[track_caller]
    pub fn is_visible(&self, id: WidgetId) -> bool {
        !self.is_hidden(id)
    }

    #[track_caller]
    fn any_ancestor_has(&self, id: WidgetId, flag: WidgetFlags) -> bool {
        let mut current = Some(id);
        while let Some(widget) = current {
            let node = self.arena.get(widget);
            if node.state.flags.contains(flag) {
                return true;
            }
            current = node.parent;
        }
        false
    }
}

// --- MARK: ENABLEMENT
impl Ui {
    /// Clear the disabled flag, repaint the widget and emit [`Signal::Enable`].
    #[track_caller]
    pub fn enable(&mut self, id: WidgetId) {
        let state = self.arena.state_mut(id);
        if !state.flags.contains(WidgetFlags::DISABLED) {
            return;
        }
        state.flags.remove(WidgetFlags::DISABLED);
        self.invalidate(id);
        self.emit(id, Signal::Enable);
    }

    /// Set the disabled flag, repaint the widget and emit [`Signal::Disable`].
    ///
    /// The widget and its descendants lose focus, hover and capture.
    #[track_caller]
    pub fn disable(&mut self, id: WidgetId) {
        if self.arena.state(id).flags.contains(WidgetFlags::DISABLED) {
            return;
        }
        self.free_widget(id);
        self.arena.state_mut(id).flags.insert(WidgetFlags::DISABLED);
        self.invalidate(id);
        self.emit(id, Signal::Disable);
    }

    /// Call [`enable`](Self::enable) or [`disable`](Self::disable).
    #[track_caller]
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        if enabled {
            self.enable(id);
        } else {
            self.disable(id);
        }
    }

    /// `true` if the widget or one of its ancestors is disabled.
    #[track_caller]
    pub fn is_disabled(&self, id: WidgetId) -> bool {
        self.any_ancestor_has(id, WidgetFlags::DISABLED)
    }

    /// `true` if neither the widget nor any of its ancestors is disabled.
    #[track_caller]
    pub fn is_enabled(&self, id: WidgetId) -> bool {
        !self.is_disabled(id)
    }
}

// --- MARK: SELECTION
impl Ui {
    /// Set the selected flag, repaint the widget and emit [`Signal::Select`].
    #[track_caller]
    pub fn select(&mut self, id: WidgetId) {
        let state = self.arena.state_mut(id);
        if state.flags.contains(WidgetFlags::SELECTED) {
            return;
        }
        state.flags.insert(WidgetFlags::SELECTED);
        self.invalidate(id);
        self.emit(id, Signal::Select);
    }

    /// Clear the selected flag, repaint the widget and emit [`Signal::Deselect`].
    #[track_caller]
    pub fn deselect(&mut self, id: WidgetId) {
        let state = self.arena.state_mut(id);
        if !state.flags.contains(WidgetFlags::SELECTED) {
            return;
        }
        state.flags.remove(WidgetFlags::SELECTED);
        self.invalidate(id);
        self.emit(id, Signal::Deselect);
    }

    /// Call [`select`](Self::select) or [`deselect`](Self::deselect).
    #[track_caller]
    pub fn set_selected(&mut self, id: WidgetId, selected: bool) {
        if selected {
            self.select(id);
        } else {
            self.deselect(id);
        }
    }

    /// `true` if the widget itself is selected. Not inherited.
    #[track_caller]
    pub fn is_selected(&self, id: WidgetId) -> bool {
        self.arena.state(id).flags.contains(WidgetFlags::SELECTED)
    }
}

// --- MARK: BEHAVIOR FLAGS
impl Ui {
    #[track_caller]
    fn set_flag(&mut self, id: WidgetId, flag: WidgetFlags, value: bool) {
        self.arena.state_mut(id).flags.set(flag, value);
    }

    #[track_caller]
    fn has_flag(&self, id: WidgetId, flag: WidgetFlags) -> bool {
        self.arena.state(id).flags.contains(flag)
    }

    /// Mark the widget as a candidate for default focus.
    #[track_caller]
    pub fn set_magnetic(&mut self, id: WidgetId, magnetic: bool) {
        self.set_flag(id, WidgetFlags::MAGNETIC, magnetic);
    }

    /// See [`set_magnetic`](Self::set_magnetic).
    #[track_caller]
    pub fn is_magnetic(&self, id: WidgetId) -> bool {
        self.has_flag(id, WidgetFlags::MAGNETIC)
    }

    /// Ask layouts to give the widget any extra space.
    #[track_caller]
    pub fn set_expansive(&mut self, id: WidgetId, expansive: bool) {
        self.set_flag(id, WidgetFlags::EXPANSIVE, expansive);
    }

    /// See [`set_expansive`](Self::set_expansive).
    #[track_caller]
    pub fn is_expansive(&self, id: WidgetId) -> bool {
        self.has_flag(id, WidgetFlags::EXPANSIVE)
    }

    /// Let the widget draw over its parent's border.
    ///
    /// A decorative widget is clipped to its parent's full rectangle rather
    /// than to the content rectangle of its ancestors.
    #[track_caller]
    pub fn set_decorative(&mut self, id: WidgetId, decorative: bool) {
        self.set_flag(id, WidgetFlags::DECORATIVE, decorative);
    }

    /// See [`set_decorative`](Self::set_decorative).
    #[track_caller]
    pub fn is_decorative(&self, id: WidgetId) -> bool {
        self.has_flag(id, WidgetFlags::DECORATIVE)
    }

    /// Allow the widget to receive keyboard focus.
    #[track_caller]
    pub fn set_focus_rest(&mut self, id: WidgetId, focus_rest: bool) {
        self.set_flag(id, WidgetFlags::FOCUS_REST, focus_rest);
    }

    /// See [`set_focus_rest`](Self::set_focus_rest).
    #[track_caller]
    pub fn is_focus_rest(&self, id: WidgetId) -> bool {
        self.has_flag(id, WidgetFlags::FOCUS_REST)
    }

    /// `true` if the widget has keyboard focus.
    #[track_caller]
    pub fn has_focus(&self, id: WidgetId) -> bool {
        self.has_flag(id, WidgetFlags::HAS_FOCUS)
    }

    /// `true` if the pointer is over the widget.
    #[track_caller]
    pub fn has_pointer(&self, id: WidgetId) -> bool {
        self.has_flag(id, WidgetFlags::HAS_POINTER)
    }

    /// `true` if the widget holds pointer capture.
    #[track_caller]
    pub fn has_capture(&self, id: WidgetId) -> bool {
        self.has_flag(id, WidgetFlags::HAS_CAPTURE)
    }
}

// --- MARK: CAPTURE
impl Ui {
    /// Make the widget the receiver of the next pointer releases.
    ///
    /// Pointer moves and cursor queries still go to the widget under the
    /// pointer. Does nothing if any widget already holds capture.
    #[track_caller]
    pub fn capture_pointer(&mut self, id: WidgetId) {
        if self.input.capture.is_some() {
            return;
        }
        self.set_capture(id);
        self.arena
            .state_mut(id)
            .flags
            .remove(WidgetFlags::HARD_CAPTURE);
    }

    /// Like [`capture_pointer`](Self::capture_pointer), but pointer moves and
    /// cursor queries go to the widget too, and input is captured at the
    /// platform level.
    #[track_caller]
    pub fn hard_capture_pointer(&mut self, id: WidgetId) {
        if self.input.capture.is_some() {
            return;
        }
        self.set_capture(id);
        self.platform.capture_input();
        self.arena
            .state_mut(id)
            .flags
            .insert(WidgetFlags::HARD_CAPTURE);
    }

    #[track_caller]
    fn set_capture(&mut self, id: WidgetId) {
        self.arena.state_mut(id).flags.insert(WidgetFlags::HAS_CAPTURE);
        self.input.capture = Some(id);
        debug!(id = id.trace(), "Pointer captured");
    }

    /// Release the capture held by the widget.
    ///
    /// Does nothing if the widget doesn't hold capture.
    #[track_caller]
    pub fn release_pointer(&mut self, id: WidgetId) {
        if self.input.capture != Some(id) {
            return;
        }
        self.input.capture = None;
        let flags = &mut self.arena.state_mut(id).flags;
        let hard = flags.contains(WidgetFlags::HARD_CAPTURE);
        flags.remove(WidgetFlags::HAS_CAPTURE | WidgetFlags::HARD_CAPTURE);
        if hard {
            self.platform.release_input();
        }
        debug!(id = id.trace(), hard, "Pointer released");
    }

    /// The widget holding pointer capture.
    pub fn capture(&self) -> Option<WidgetId> {
        self.input.capture
    }
}

// --- MARK: FOCUS AND HOVER
impl Ui {
    /// Give keyboard focus to a widget, or to nobody.
    ///
    /// Only visible, enabled widgets marked with
    /// [`set_focus_rest`](Self::set_focus_rest) can get focus; for other
    /// widgets this does nothing. The previous focus receives
    /// [`Message::FocusLeave`], then the new one [`Message::FocusEnter`].
    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        if let Some(id) = id {
            if !self.arena.has(id) {
                debug_panic!("Cannot focus non-existent widget {id}.");
                return;
            }
            if !self.has_flag(id, WidgetFlags::FOCUS_REST) || self.is_hidden(id) || self.is_disabled(id) {
                return;
            }
        }
        let old = self.input.focus;
        if old == id {
            return;
        }
        self.input.focus = id;

        if let Some(old) = old.filter(|old| self.arena.has(*old)) {
            self.arena
                .state_mut(old)
                .flags
                .remove(WidgetFlags::HAS_FOCUS);
            self.send(old, &mut Message::FocusLeave);
        }
        if let Some(new) = id.filter(|new| self.arena.has(*new)) {
            self.arena.state_mut(new).flags.insert(WidgetFlags::HAS_FOCUS);
            self.send(new, &mut Message::FocusEnter);
        }
    }

    /// The widget with keyboard focus.
    pub fn focus(&self) -> Option<WidgetId> {
        self.input.focus
    }

    /// Record which widget is under the pointer.
    ///
    /// The previous one receives [`Message::PointerLeave`], then the new one
    /// [`Message::PointerEnter`]. Usually driven by [`route_pointer`](Self::route_pointer).
    pub fn set_hover(&mut self, id: Option<WidgetId>) {
        if let Some(id) = id {
            if !self.arena.has(id) {
                debug_panic!("Cannot hover non-existent widget {id}.");
                return;
            }
        }
        let old = self.input.hover;
        if old == id {
            return;
        }
        self.input.hover = id;

        if let Some(old) = old.filter(|old| self.arena.has(*old)) {
            self.arena
                .state_mut(old)
                .flags
                .remove(WidgetFlags::HAS_POINTER);
            self.send(old, &mut Message::PointerLeave);
        }
        if let Some(new) = id.filter(|new| self.arena.has(*new)) {
            self.arena
                .state_mut(new)
                .flags
                .insert(WidgetFlags::HAS_POINTER);
            self.send(new, &mut Message::PointerEnter);
        }
    }

    /// The widget under the pointer.
    pub fn hover(&self) -> Option<WidgetId> {
        self.input.hover
    }

    /// Take focus, hover and capture away from the widget and its descendants.
    ///
    /// No focus or pointer messages are sent.
    pub fn free_widget(&mut self, id: WidgetId) {
        if let Some(focus) = self.input.focus {
            if self.is_ancestor_or_self(id, focus) {
                self.input.focus = None;
                if let Some(node) = self.arena.try_get_mut(focus) {
                    node.state.flags.remove(WidgetFlags::HAS_FOCUS);
                }
            }
        }
        if let Some(hover) = self.input.hover {
            if self.is_ancestor_or_self(id, hover) {
                self.input.hover = None;
                if let Some(node) = self.arena.try_get_mut(hover) {
                    node.state.flags.remove(WidgetFlags::HAS_POINTER);
                }
            }
        }
        if let Some(capture) = self.input.capture {
            if self.is_ancestor_or_self(id, capture) {
                self.release_pointer(capture);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{Ui, UiOptions};
    use crate::core::{WidgetFlags, WidgetKind};

    #[test]
    fn hidden_is_inherited() {
        let mut ui = Ui::new(UiOptions::default());
        let parent = ui.create_widget(WidgetKind::WIDGET);
        let child = ui.create_widget(WidgetKind::WIDGET);
        ui.attach(parent, child, None);

        ui.hide(parent);
        assert!(ui.is_hidden(child));
        assert!(!ui.state(child).flags().contains(WidgetFlags::HIDDEN));

        ui.show(parent);
        assert!(ui.is_visible(child));
    }

    #[test]
    fn hiding_drops_focus_of_descendants() {
        let mut ui = Ui::new(UiOptions::default());
        let parent = ui.create_widget(WidgetKind::WIDGET);
        let child = ui.create_widget(WidgetKind::WIDGET);
        ui.attach(parent, child, None);
        ui.set_focus_rest(child, true);

        ui.set_focus(Some(child));
        assert_eq!(ui.focus(), Some(child));
        assert!(ui.has_focus(child));

        ui.hide(parent);
        assert_eq!(ui.focus(), None);
        assert!(!ui.has_focus(child));
    }

    #[test]
    fn focus_requires_focus_rest() {
        let mut ui = Ui::new(UiOptions::default());
        let id = ui.create_widget(WidgetKind::WIDGET);
        ui.set_focus(Some(id));
        assert_eq!(ui.focus(), None);

        ui.set_focus_rest(id, true);
        ui.disable(id);
        ui.set_focus(Some(id));
        assert_eq!(ui.focus(), None);

        ui.enable(id);
        ui.set_focus(Some(id));
        assert_eq!(ui.focus(), Some(id));
    }
}
