// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! The damage engine.
//!
//! Each widget accumulates a dirty region: the part of its drawable area that
//! must be repainted. Invalidation adds to it, [`Ui::flush`] turns it into
//! queued [`Message::PaintRect`]s, and [`Ui::scroll`] moves pixels on screen
//! and only marks the newly exposed area.

use kurbo::{Rect, Vec2};
use mortar_region::{Overlap, Region};
use smallvec::SmallVec;
use tracing::trace;

use crate::app::Ui;
use crate::core::{DrawableFlags, Message, WidgetFlags, WidgetId, WidgetKind};
use crate::debug_panic;

// --- MARK: REGIONS
impl Ui {
    /// The shape of a widget.
    ///
    /// That's the theme's window mask for windows that have one, and the
    /// bounding rectangle otherwise.
    #[track_caller]
    pub fn shape_region(&self, id: WidgetId) -> Region {
        let state = self.arena.state(id);
        if state.kind == WidgetKind::WINDOW {
            let theme = self.theme.clone();
            if let Some(mask) = theme.window_mask(self, id) {
                return mask;
            }
        }
        Region::from_rect(state.rect)
    }

    /// The area of the widget that can be drawn without overwriting anything
    /// else.
    ///
    /// Starting from the widget's shape:
    /// 1. With [`DrawableFlags::CUT_TOP_WINDOWS`], remove the windows stacked
    ///    above the widget's window, in its manager and in every enclosing one.
    /// 2. Without [`DrawableFlags::USE_CHILD_AREA`], remove the area covered by
    ///    visible children. Children are clipped to the content rectangle, or to
    ///    the full rectangle for decorative children.
    /// 3. Clip to the content rectangle of every ancestor. A decorative widget
    ///    is only clipped to its parent's full rectangle.
    /// 4. Clip to every enclosing manager, using the scrolled viewport when the
    ///    manager is the content of a view.
    ///
    /// Hidden widgets, and widgets with a hidden ancestor, have nothing to draw.
    #[track_caller]
    pub fn drawable_region(&self, id: WidgetId, flags: DrawableFlags) -> Region {
        if self.is_hidden(id) {
            return Region::new();
        }
        let mut region = self.shape_region(id);

        if flags.contains(DrawableFlags::CUT_TOP_WINDOWS) {
            self.cut_top_windows(id, &mut region);
        }

        let node = self.arena.get(id);
        let state = &node.state;

        if !flags.contains(DrawableFlags::USE_CHILD_AREA) {
            let content = state.content_rect();
            for child in &node.children {
                let child_state = self.arena.state(*child);
                if child_state.flags.contains(WidgetFlags::HIDDEN) {
                    continue;
                }
                let mut covered = self.shape_region(*child);
                if child_state.flags.contains(WidgetFlags::DECORATIVE) {
                    covered.intersect_rect(state.rect);
                } else {
                    covered.intersect_rect(content);
                }
                region.subtract(&covered);
            }
        }

        if state.flags.contains(WidgetFlags::DECORATIVE) {
            if let Some(parent) = node.parent {
                region.intersect_rect(self.arena.state(parent).rect);
            }
        } else {
            let mut parent = node.parent;
            while let Some(ancestor) = parent {
                let ancestor = self.arena.get(ancestor);
                region.intersect_rect(ancestor.state.content_rect());
                parent = ancestor.parent;
            }
        }

        let mut visited: SmallVec<[WidgetId; 4]> = SmallVec::new();
        let mut window = self.window_of(id);
        while let Some(current) = window {
            let manager = self.manager_of(current);
            if visited.contains(&manager) {
                break;
            }
            visited.push(manager);
            let clip = match self.enclosing_view(manager) {
                Some(view) => self.viewport_rect(view),
                None => None,
            };
            region.intersect_rect(clip.unwrap_or_else(|| self.arena.state(manager).content_rect()));
            window = self.window_of(manager);
        }

        if self.trace.damage {
            trace!(
                id = id.trace(),
                ?flags,
                rects = region.len(),
                bounds = ?region.bounds(),
                "Computed drawable region"
            );
        }
        region
    }

    fn cut_top_windows(&self, id: WidgetId, region: &mut Region) {
        let mut visited: SmallVec<[WidgetId; 4]> = SmallVec::new();
        let mut window = self.window_of(id);
        while let Some(current) = window {
            let manager = self.manager_of(current);
            if visited.contains(&manager) {
                break;
            }
            visited.push(manager);
            let windows = self.arena.children_of(manager);
            if windows.contains(&current) {
                // The first child of a manager is the topmost window.
                for above in windows.iter().take_while(|above| **above != current) {
                    if !self.arena.state(*above).flags.contains(WidgetFlags::HIDDEN) {
                        region.subtract(&self.shape_region(*above));
                    }
                }
            }
            window = self.window_of(manager);
        }
    }

    /// The visible area of a view's content: the content rectangle of its
    /// [`WidgetKind::VIEW_VIEWPORT`] child.
    #[track_caller]
    pub fn viewport_rect(&self, view: WidgetId) -> Option<Rect> {
        self.arena
            .children_of(view)
            .iter()
            .map(|child| self.arena.state(*child))
            .find(|state| state.kind == WidgetKind::VIEW_VIEWPORT)
            .map(|state| state.content_rect())
    }
}

// --- MARK: INVALIDATION
impl Ui {
    /// Mark the whole drawable area of every visible widget of the subtree as
    /// dirty, replacing any pending damage.
    pub fn invalidate(&mut self, id: WidgetId) {
        if !self.arena.has(id) {
            debug_panic!("Cannot invalidate non-existent widget {id}.");
            return;
        }
        if self.is_hidden(id) {
            return;
        }
        self.invalidate_subtree(id);
    }

    fn invalidate_subtree(&mut self, id: WidgetId) {
        if self.arena.state(id).flags.contains(WidgetFlags::HIDDEN) {
            return;
        }
        let region = self.drawable_region(id, DrawableFlags::CUT_TOP_WINDOWS);
        if self.trace.damage {
            trace!(id = id.trace(), rects = region.len(), "Invalidated widget");
        }
        self.arena.state_mut(id).dirty = region;
        for child in self.arena.children_of(id).to_vec() {
            self.invalidate_subtree(child);
        }
    }

    /// Like [`invalidate_region`](Self::invalidate_region) with a single rectangle.
    pub fn invalidate_rect(&mut self, id: WidgetId, rect: Rect) {
        self.invalidate_region(id, &Region::from_rect(rect));
    }

    /// Mark the part of `region` that the subtree can draw as dirty.
    ///
    /// Each visible widget whose rectangle touches `region` adds the part of
    /// `region` inside its drawable area to its dirty region. Its children are
    /// only offered what remains of `region` outside of the widget's dirty area.
    pub fn invalidate_region(&mut self, id: WidgetId, region: &Region) {
        if !self.arena.has(id) {
            debug_panic!("Cannot invalidate non-existent widget {id}.");
            return;
        }
        if self.is_hidden(id) {
            return;
        }
        self.invalidate_region_subtree(id, region);
    }

    fn invalidate_region_subtree(&mut self, id: WidgetId, region: &Region) {
        let state = self.arena.state(id);
        if state.flags.contains(WidgetFlags::HIDDEN) || region.rect_in(state.rect) == Overlap::Out {
            return;
        }
        let drawable = self.drawable_region(id, DrawableFlags::CUT_TOP_WINDOWS);

        let state = self.arena.state_mut(id);
        let mut dirty = state.dirty.clone();
        dirty.union(region);
        dirty.intersect(&drawable);
        let mut remaining = region.clone();
        remaining.subtract(&dirty);
        state.dirty = dirty;

        if self.trace.damage {
            trace!(
                id = id.trace(),
                dirty = self.arena.state(id).dirty.len(),
                remaining = remaining.len(),
                "Invalidated region"
            );
        }
        if remaining.is_empty() {
            return;
        }
        for child in self.arena.children_of(id).to_vec() {
            self.invalidate_region_subtree(child, &remaining);
        }
    }

    /// Ask a visible widget to repaint `region`.
    ///
    /// Sends [`Message::PaintRegion`], whose default handling is
    /// [`invalidate_region`](Self::invalidate_region).
    pub fn redraw_region(&mut self, id: WidgetId, region: &Region) {
        if !self.arena.has(id) {
            debug_panic!("Cannot redraw non-existent widget {id}.");
            return;
        }
        if self.is_visible(id) {
            self.send(id, &mut Message::PaintRegion {
                region: region.clone(),
            });
        }
    }
}

// --- MARK: FLUSH
impl Ui {
    /// Queue the paint messages for the pending damage of the subtree.
    ///
    /// For each widget with a dirty region, parents before children, the dirty
    /// region is clipped to the current drawable area and every rectangle of it
    /// is queued as a [`Message::PaintRect`]. The dirty region is then cleared.
    ///
    /// Damage pending on hidden widgets is dropped without painting.
    pub fn flush(&mut self, id: WidgetId) {
        if !self.arena.has(id) {
            debug_panic!("Cannot flush non-existent widget {id}.");
            return;
        }
        if self.is_hidden(id) {
            self.clear_damage(id);
            return;
        }
        self.flush_subtree(id);
    }

    fn flush_subtree(&mut self, id: WidgetId) {
        if self.arena.state(id).flags.contains(WidgetFlags::HIDDEN) {
            self.clear_damage(id);
            return;
        }
        if !self.arena.state(id).dirty.is_empty() {
            let drawable = self.drawable_region(id, DrawableFlags::CUT_TOP_WINDOWS);
            let mut dirty = std::mem::take(&mut self.arena.state_mut(id).dirty);
            dirty.intersect(&drawable);

            let count = dirty.len();
            if self.trace.damage && count > 0 {
                trace!(id = id.trace(), rects = count, "Flushing damage");
            }
            for (index, rect) in dirty.iter().enumerate() {
                self.queue.push(id, Message::PaintRect {
                    rect,
                    remaining: count - 1 - index,
                });
            }
        }
        for child in self.arena.children_of(id).to_vec() {
            self.flush_subtree(child);
        }
    }

    /// Drop the pending damage of the whole subtree.
    pub(crate) fn clear_damage(&mut self, id: WidgetId) {
        self.arena.state_mut(id).dirty = Region::new();
        for child in self.arena.children_of(id).to_vec() {
            self.clear_damage(child);
        }
    }

    /// Scroll the pixels of `region` by `delta`.
    ///
    /// The part of `region` that is still inside `region` after the move is
    /// moved on screen by the platform. The rest of `region` is marked dirty,
    /// then the damage is flushed and the queued messages dispatched.
    pub fn scroll(&mut self, id: WidgetId, region: &Region, delta: Vec2) {
        if !self.arena.has(id) {
            debug_panic!("Cannot scroll non-existent widget {id}.");
            return;
        }
        if delta == Vec2::ZERO {
            return;
        }

        let mut movable = region.clone();
        movable.translate(delta);
        movable.intersect(region);
        movable.translate(-delta);

        self.platform.hide_pointer();
        self.platform.move_region(&movable, delta);
        self.platform.show_pointer();

        movable.translate(delta);
        let state = self.arena.state_mut(id);
        state.dirty.union(region);
        state.dirty.subtract(&movable);
        if self.trace.damage {
            trace!(
                id = id.trace(),
                ?delta,
                moved = movable.len(),
                exposed = self.arena.state(id).dirty.len(),
                "Scrolled region"
            );
        }

        self.flush(id);
        self.dispatch_pending();
    }
}
