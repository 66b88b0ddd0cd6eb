// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! Rectangle helpers shared by the region algebra.

use kurbo::Rect;
use smallvec::SmallVec;

/// `true` if `rect` covers no pixel.
///
/// Inverted and NaN rectangles count as empty.
pub(crate) fn is_empty(rect: Rect) -> bool {
    !(rect.x0 < rect.x1 && rect.y0 < rect.y1)
}

/// `true` if the two half-open rectangles share at least one pixel.
pub(crate) fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// `true` if `outer` covers every pixel of `inner`.
pub(crate) fn covers(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && outer.x1 >= inner.x1 && outer.y1 >= inner.y1
}

/// The pieces of `a` not covered by `b`.
///
/// Produces at most four disjoint rectangles: full-width bands above and below `b`,
/// then the left and right slivers within `b`'s vertical span.
pub(crate) fn subtract(a: Rect, b: Rect) -> SmallVec<[Rect; 4]> {
    let mut pieces = SmallVec::new();
    if !overlaps(a, b) {
        pieces.push(a);
        return pieces;
    }
    if covers(b, a) {
        return pieces;
    }

    if a.y0 < b.y0 {
        pieces.push(Rect::new(a.x0, a.y0, a.x1, b.y0));
    }
    if b.y1 < a.y1 {
        pieces.push(Rect::new(a.x0, b.y1, a.x1, a.y1));
    }
    let band_y0 = a.y0.max(b.y0);
    let band_y1 = a.y1.min(b.y1);
    if a.x0 < b.x0 {
        pieces.push(Rect::new(a.x0, band_y0, b.x0, band_y1));
    }
    if b.x1 < a.x1 {
        pieces.push(Rect::new(b.x1, band_y0, a.x1, band_y1));
    }
    pieces
}

/// Merges two rectangles if they share a full edge.
pub(crate) fn merge_adjacent(a: Rect, b: Rect) -> Option<Rect> {
    let same_rows = a.y0 == b.y0 && a.y1 == b.y1;
    let same_columns = a.x0 == b.x0 && a.x1 == b.x1;
    if same_rows && (a.x1 == b.x0 || b.x1 == a.x0) {
        return Some(a.union(b));
    }
    if same_columns && (a.y1 == b.y0 || b.y1 == a.y0) {
        return Some(a.union(b));
    }
    None
}
