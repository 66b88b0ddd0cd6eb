// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;

use crate::rect_ops;

/// How a rectangle relates to a [`Region`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlap {
    /// The rectangle shares no pixel with the region.
    Out,
    /// Every pixel of the rectangle is in the region.
    In,
    /// Some, but not all, pixels of the rectangle are in the region.
    Part,
}

/// A set of pixels, stored as pairwise disjoint rectangles.
///
/// All operations keep the rectangles disjoint and merge rectangles sharing a full
/// edge, so the stored list stays short for the shapes a widget tree produces.
/// Rectangles are kept sorted top-to-bottom, then left-to-right.
///
/// Equality compares the covered pixels, not the stored rectangles.
#[derive(Clone, Debug, Default)]
pub struct Region {
    rects: SmallVec<[Rect; 4]>,
}

impl Region {
    /// Create an empty region.
    pub fn new() -> Self {
        Self {
            rects: SmallVec::new(),
        }
    }

    /// Create a region covering `rect`.
    ///
    /// Zero-area rectangles give an empty region.
    pub fn from_rect(rect: Rect) -> Self {
        let mut region = Self::new();
        region.reset(rect);
        region
    }

    /// Create the union of `rects`.
    pub fn from_rects(rects: impl IntoIterator<Item = Rect>) -> Self {
        let mut region = Self::new();
        for rect in rects {
            region.union_rect(rect);
        }
        region
    }

    /// Replace the content of this region with `rect`.
    pub fn reset(&mut self, rect: Rect) {
        self.rects.clear();
        if !rect_ops::is_empty(rect) {
            self.rects.push(rect);
        }
    }

    /// Remove every pixel from this region.
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// `true` if the region covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Number of rectangles making up the region.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// The rectangles making up the region.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Iterate over the rectangles making up the region.
    pub fn iter(&self) -> impl Iterator<Item = Rect> + '_ {
        self.rects.iter().copied()
    }

    /// The smallest rectangle containing the whole region.
    ///
    /// Returns [`Rect::ZERO`] for an empty region.
    pub fn bounds(&self) -> Rect {
        let mut rects = self.iter();
        let Some(first) = rects.next() else {
            return Rect::ZERO;
        };
        rects.fold(first, |acc, rect| acc.union(rect))
    }

    /// Total number of pixels covered.
    pub fn area(&self) -> f64 {
        self.rects.iter().map(|rect| rect.area()).sum()
    }

    /// Add every pixel of `other` to this region.
    pub fn union(&mut self, other: &Self) {
        for rect in other.iter() {
            self.add_disjoint_pieces(rect);
        }
        self.normalize();
    }

    /// Add every pixel of `rect` to this region.
    pub fn union_rect(&mut self, rect: Rect) {
        if rect_ops::is_empty(rect) {
            return;
        }
        self.add_disjoint_pieces(rect);
        self.normalize();
    }

    /// Keep only the pixels that are also in `other`.
    pub fn intersect(&mut self, other: &Self) {
        let mut result = SmallVec::<[Rect; 4]>::new();
        for a in self.iter() {
            for b in other.iter() {
                if rect_ops::overlaps(a, b) {
                    result.push(a.intersect(b));
                }
            }
        }
        self.rects = result;
        self.normalize();
    }

    /// Keep only the pixels that are also in `rect`.
    pub fn intersect_rect(&mut self, rect: Rect) {
        self.rects.retain(|r| rect_ops::overlaps(*r, rect));
        for r in &mut self.rects {
            *r = r.intersect(rect);
        }
        self.normalize();
    }

    /// Remove every pixel of `other` from this region.
    pub fn subtract(&mut self, other: &Self) {
        for rect in other.iter() {
            self.remove_rect(rect);
        }
        self.normalize();
    }

    /// Remove every pixel of `rect` from this region.
    pub fn subtract_rect(&mut self, rect: Rect) {
        self.remove_rect(rect);
        self.normalize();
    }

    /// Move the region by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        for rect in &mut self.rects {
            *rect = *rect + delta;
        }
    }

    /// `true` if `point` is inside the region.
    pub fn contains_point(&self, point: Point) -> bool {
        self.rects.iter().any(|rect| rect.contains(point))
    }

    /// Classify how `rect` relates to this region.
    pub fn rect_in(&self, rect: Rect) -> Overlap {
        if rect_ops::is_empty(rect) || !self.iter().any(|r| rect_ops::overlaps(r, rect)) {
            return Overlap::Out;
        }
        let mut rest = Self::from_rect(rect);
        rest.subtract(self);
        if rest.is_empty() {
            Overlap::In
        } else {
            Overlap::Part
        }
    }

    /// `true` if every pixel of `other` is in this region.
    pub fn contains_region(&self, other: &Self) -> bool {
        let mut rest = other.clone();
        rest.subtract(self);
        rest.is_empty()
    }

    fn add_disjoint_pieces(&mut self, rect: Rect) {
        let mut pieces: SmallVec<[Rect; 4]> = SmallVec::new();
        pieces.push(rect);
        for existing in self.iter() {
            pieces = pieces
                .into_iter()
                .flat_map(|piece| rect_ops::subtract(piece, existing))
                .collect();
            if pieces.is_empty() {
                return;
            }
        }
        self.rects.extend(pieces);
    }

    fn remove_rect(&mut self, rect: Rect) {
        if rect_ops::is_empty(rect) {
            return;
        }
        self.rects = self
            .rects
            .drain(..)
            .flat_map(|existing| rect_ops::subtract(existing, rect))
            .collect();
    }

    fn normalize(&mut self) {
        self.rects.retain(|rect| !rect_ops::is_empty(*rect));
        'merge: loop {
            for i in 0..self.rects.len() {
                for j in (i + 1)..self.rects.len() {
                    if let Some(merged) = rect_ops::merge_adjacent(self.rects[i], self.rects[j]) {
                        self.rects[i] = merged;
                        self.rects.swap_remove(j);
                        continue 'merge;
                    }
                }
            }
            break;
        }
        self.rects
            .sort_by(|a, b| a.y0.total_cmp(&b.y0).then(a.x0.total_cmp(&b.x0)));
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.contains_region(other) && other.contains_region(self)
    }
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl<'a> IntoIterator for &'a Region {
    type Item = &'a Rect;
    type IntoIter = std::slice::Iter<'a, Rect>;

    fn into_iter(self) -> Self::IntoIter {
        self.rects.iter()
    }
}
