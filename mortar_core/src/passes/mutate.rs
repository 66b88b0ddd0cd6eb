// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! Widget lifecycle and tree structure.

use kurbo::Point;
use tracing::{debug, trace};

use crate::app::{AncestorOrder, InputState, Ui};
use crate::core::{Handler, Message, Signal, WidgetFlags, WidgetId, WidgetKind, WidgetState};
use crate::debug_panic;
use crate::passes::event::default_handler;

// --- MARK: LIFECYCLE
impl Ui {
    /// Create a widget of the given kind.
    ///
    /// The widget starts unattached, with no children, default flags and a
    /// handler chain holding only the default handler.
    pub fn create_widget(&mut self, kind: WidgetKind) -> WidgetId {
        let id = WidgetId::next();
        self.insert_widget(id, kind);
        debug!(id = id.trace(), %kind, "Created widget");
        id
    }

    pub(crate) fn insert_widget(&mut self, id: WidgetId, kind: WidgetKind) {
        let font = self.theme.default_font();
        self.arena.insert(WidgetState::new(id, kind, font));
        self.arena
            .get_mut(id)
            .handlers
            .push(Handler::new(WidgetKind::WIDGET, default_handler));
    }

    /// Destroy a widget and its whole subtree.
    ///
    /// The widget's handler chain first receives [`Message::Destroy`]. Then the
    /// widget loses focus, hover and capture, its queued messages and message
    /// filters are dropped, it is detached from its parent, and its children are
    /// destroyed in order.
    pub fn destroy(&mut self, id: WidgetId) {
        if !self.arena.has(id) {
            debug_panic!("Cannot destroy non-existent widget {id}.");
            return;
        }
        debug!(id = id.trace(), "Destroying widget");

        self.send(id, &mut Message::Destroy);
        // A handler may have destroyed it already.
        if !self.arena.has(id) {
            return;
        }

        self.free_widget(id);
        self.queue.forget_widget(id);
        self.pending_destruction.retain(|pending| *pending != id);

        if let Some(parent) = self.arena.parent_of(id) {
            self.detach(parent, id);
        }

        let children = self.arena.children_of(id).to_vec();
        for child in children {
            if self.arena.has(child) {
                self.destroy(child);
            }
        }

        self.arena.remove(id);
    }

    /// Destroy the widget at the end of the next [`dispatch_pending`](Self::dispatch_pending).
    ///
    /// Useful from a handler of the widget itself. Before destruction, the
    /// default manager receives [`Message::DeferredFree`].
    pub fn destroy_deferred(&mut self, id: WidgetId) {
        if !self.arena.has(id) {
            debug_panic!("Cannot destroy non-existent widget {id}.");
            return;
        }
        if !self.pending_destruction.contains(&id) {
            self.pending_destruction.push(id);
        }
    }

    /// Destroy every remaining widget, including the default manager.
    ///
    /// The `Ui` can't be used after this, apart from being dropped.
    pub fn shutdown(&mut self) {
        debug!(widgets = self.arena.len(), "Shutting down Ui");
        self.pending_destruction.clear();
        let mut roots = self.arena.roots();
        // Tear down user roots before the default manager.
        roots.sort_by_key(|id| (*id == self.default_manager, *id));
        for root in roots {
            if self.arena.has(root) {
                self.destroy(root);
            }
        }
        self.queue.messages.clear();
        self.input = InputState::default();
    }
}

// --- MARK: TREE EDITS
impl Ui {
    /// Insert `child` into `parent`'s children, before `before` or at the end.
    ///
    /// If `before` isn't a child of `parent`, `child` is appended. If `child`
    /// already has a parent, it is detached from it first. The child then receives
    /// [`Signal::NewParent`] and the parent [`Signal::AddChild`].
    pub fn attach(&mut self, parent: WidgetId, child: WidgetId, before: Option<WidgetId>) {
        if !self.arena.has(parent) || !self.arena.has(child) {
            debug_panic!("Cannot attach {child} to {parent}: widget does not exist.");
            return;
        }
        if self.is_ancestor_or_self(child, parent) {
            debug_panic!("Cannot attach {child} to {parent}: it would create a cycle.");
            return;
        }
        if let Some(old_parent) = self.arena.parent_of(child) {
            self.detach(old_parent, child);
        }

        let children = &mut self.arena.get_mut(parent).children;
        let index = before
            .and_then(|before| children.iter().position(|id| *id == before))
            .unwrap_or(children.len());
        children.insert(index, child);
        self.arena.get_mut(child).parent = Some(parent);
        debug!(parent = parent.trace(), child = child.trace(), index, "Attached widget");
        self.trace_children(parent);

        self.emit(child, Signal::NewParent);
        if self.arena.has(parent) {
            self.emit(parent, Signal::AddChild);
        }
    }

    /// Append each of `children` to `parent`, in order.
    pub fn add_children(&mut self, parent: WidgetId, children: impl IntoIterator<Item = WidgetId>) {
        for child in children {
            self.attach(parent, child, None);
        }
    }

    /// Remove `child` from `parent`'s children.
    ///
    /// The child becomes a root. It receives [`Signal::NewParent`] and the parent
    /// [`Signal::RemoveChild`].
    pub fn detach(&mut self, parent: WidgetId, child: WidgetId) {
        if !self.arena.has(parent) || !self.arena.has(child) {
            debug_panic!("Cannot detach {child} from {parent}: widget does not exist.");
            return;
        }
        if self.arena.parent_of(child) != Some(parent) {
            debug_panic!("Cannot detach {child} from {parent}: not its child.");
            return;
        }

        self.arena.get_mut(parent).children.retain(|id| *id != child);
        self.arena.get_mut(child).parent = None;
        debug!(parent = parent.trace(), child = child.trace(), "Detached widget");
        self.trace_children(parent);

        self.emit(child, Signal::NewParent);
        if self.arena.has(parent) {
            self.emit(parent, Signal::RemoveChild);
        }
    }

    /// Put `new` at the position of `old` in `parent`'s children.
    ///
    /// Does nothing if `old` isn't a child of `parent`. Otherwise `old` is
    /// detached (and becomes a root), `new` is detached from its own parent if it
    /// has one, then inserted, with the same notifications as [`attach`](Self::attach).
    pub fn replace(&mut self, parent: WidgetId, old: WidgetId, new: WidgetId) {
        if !self.arena.has(parent) || !self.arena.has(old) || !self.arena.has(new) {
            debug_panic!("Cannot replace {old} by {new} in {parent}: widget does not exist.");
            return;
        }
        if old == new || self.arena.parent_of(old) != Some(parent) {
            return;
        }
        if self.is_ancestor_or_self(new, parent) {
            debug_panic!("Cannot replace {old} by {new} in {parent}: it would create a cycle.");
            return;
        }

        if let Some(new_parent) = self.arena.parent_of(new) {
            self.detach(new_parent, new);
        }
        let Some(index) = self
            .arena
            .try_get(parent)
            .and_then(|node| node.children.iter().position(|id| *id == old))
        else {
            return;
        };
        self.detach(parent, old);

        if !self.arena.has(parent) || !self.arena.has(new) {
            return;
        }
        let children = &mut self.arena.get_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, new);
        self.arena.get_mut(new).parent = Some(parent);
        debug!(parent = parent.trace(), old = old.trace(), new = new.trace(), "Replaced widget");
        self.trace_children(parent);

        self.emit(new, Signal::NewParent);
        if self.arena.has(parent) {
            self.emit(parent, Signal::AddChild);
        }
    }

    fn trace_children(&self, parent: WidgetId) {
        if self.trace.tree {
            if let Some(node) = self.arena.try_get(parent) {
                trace!(parent = parent.trace(), children = ?node.children, "Children after edit");
            }
        }
    }
}

// --- MARK: QUERIES
impl Ui {
    /// The parent of a widget, `None` for roots.
    #[track_caller]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.arena.parent_of(id)
    }

    /// The children of a widget, in paint and hit-test order.
    #[track_caller]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.arena.children_of(id)
    }

    /// `true` if `child` is a direct child of `parent`.
    #[track_caller]
    pub fn has_child(&self, parent: WidgetId, child: WidgetId) -> bool {
        self.arena.children_of(parent).contains(&child)
    }

    /// The widget and all its ancestors.
    #[track_caller]
    pub fn ancestors(&self, id: WidgetId, order: AncestorOrder) -> Vec<WidgetId> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(widget) = current {
            chain.push(widget);
            current = self.arena.parent_of(widget);
        }
        if order == AncestorOrder::RootToNode {
            chain.reverse();
        }
        chain
    }

    /// The nearest widget of `kind`, starting with `id` itself and walking up.
    #[track_caller]
    pub fn ancestor_of_kind(&self, id: WidgetId, kind: WidgetKind) -> Option<WidgetId> {
        let mut current = Some(id);
        while let Some(widget) = current {
            let node = self.arena.get(widget);
            if node.state.kind == kind {
                return Some(widget);
            }
            current = node.parent;
        }
        None
    }

    /// The window containing the widget, or the widget itself if it is a window.
    #[track_caller]
    pub fn window_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.ancestor_of_kind(id, WidgetKind::WINDOW)
    }

    /// The manager containing the widget, falling back to the default manager.
    #[track_caller]
    pub fn manager_of(&self, id: WidgetId) -> WidgetId {
        self.ancestor_of_kind(id, WidgetKind::MANAGER)
            .unwrap_or(self.default_manager)
    }

    /// The view scrolling the widget, if the widget is the content of a view.
    ///
    /// That is the case when its parent is a [`WidgetKind::VIEW_VIEWPORT`]
    /// whose parent is a [`WidgetKind::VIEW`].
    #[track_caller]
    pub fn enclosing_view(&self, id: WidgetId) -> Option<WidgetId> {
        let viewport = self.arena.parent_of(id)?;
        if self.arena.state(viewport).kind != WidgetKind::VIEW_VIEWPORT {
            return None;
        }
        let view = self.arena.parent_of(viewport)?;
        (self.arena.state(view).kind == WidgetKind::VIEW).then_some(view)
    }

    /// The deepest visible widget under `point`, searching from `root`.
    ///
    /// Children are probed in order and the first child containing the point
    /// wins, even if a later sibling also contains it.
    #[track_caller]
    pub fn pick(&self, root: WidgetId, point: Point) -> Option<WidgetId> {
        let node = self.arena.get(root);
        if node.state.flags.contains(WidgetFlags::HIDDEN) || !node.state.rect.contains(point) {
            return None;
        }
        for child in &node.children {
            if let Some(picked) = self.pick(*child, point) {
                return Some(picked);
            }
        }
        Some(root)
    }

    /// A descendant of `root` with the given name.
    ///
    /// Direct children are checked first, then each child's subtree in order.
    #[track_caller]
    pub fn find_name(&self, root: WidgetId, name: &str) -> Option<WidgetId> {
        let children = self.arena.children_of(root);
        children
            .iter()
            .copied()
            .find(|child| self.arena.state(*child).name.as_deref() == Some(name))
            .or_else(|| {
                children
                    .iter()
                    .find_map(|child| self.find_name(*child, name))
            })
    }

    /// `true` if `ancestor` is `id` or one of its ancestors.
    pub(crate) fn is_ancestor_or_self(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(widget) = current {
            if widget == ancestor {
                return true;
            }
            current = self.arena.try_get(widget).and_then(|node| node.parent);
        }
        false
    }
}
