// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! This crate implements the region sets used by Mortar's damage tracking.
//!
//! A [`Region`] is a set of pixels described by pairwise disjoint, axis-aligned
//! rectangles. It supports the usual boolean algebra (union, intersection,
//! subtraction) as well as translation and point/rectangle containment tests.
//!
//! Rectangles are [`kurbo::Rect`]s and are treated as half-open: a rectangle
//! contains its top-left edge but not its bottom-right edge. Rectangles with zero
//! or negative area are never stored.
//!
//! ```
//! use kurbo::Rect;
//! use mortar_region::Region;
//!
//! let mut region = Region::from_rect(Rect::new(0., 0., 100., 50.));
//! region.subtract_rect(Rect::new(10., 10., 90., 40.));
//!
//! assert_eq!(region.area(), 100. * 50. - 80. * 30.);
//! assert!(!region.contains_point((50., 20.).into()));
//! ```

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET

mod rect_ops;
mod region;

pub use region::{Overlap, Region};
