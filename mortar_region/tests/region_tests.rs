// Copyright 2025 the Mortar Authors
// SPDX-License-Identifier: Apache-2.0

//! Tests for the [`Region`] algebra.

use kurbo::{Point, Rect, Vec2};
use mortar_region::{Overlap, Region};

fn assert_disjoint(region: &Region) {
    let rects = region.rects();
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            let overlap = a.intersect(*b);
            assert!(
                overlap.width() <= 0. || overlap.height() <= 0.,
                "{a:?} and {b:?} overlap in {region:?}"
            );
        }
    }
}

#[test]
fn empty_rect_gives_empty_region() {
    assert!(Region::from_rect(Rect::new(5., 5., 5., 20.)).is_empty());
    assert!(Region::from_rect(Rect::ZERO).is_empty());
    assert_eq!(Region::new().bounds(), Rect::ZERO);
}

#[test]
fn union_of_overlapping_rects() {
    let mut region = Region::from_rect(Rect::new(0., 0., 10., 10.));
    region.union_rect(Rect::new(5., 5., 15., 15.));

    // >-- two 10x10 squares sharing a 5x5 corner

    assert_disjoint(&region);
    assert_eq!(region.area(), 100. + 100. - 25.);
    assert_eq!(region.bounds(), Rect::new(0., 0., 15., 15.));
    assert!(region.contains_point(Point::new(12., 12.)));
    assert!(!region.contains_point(Point::new(12., 2.)));
}

#[test]
fn adjacent_rects_are_merged() {
    let region = Region::from_rects([
        Rect::new(0., 0., 10., 10.),
        Rect::new(10., 0., 20., 10.),
        Rect::new(0., 10., 20., 20.),
    ]);
    assert_eq!(region.rects(), &[Rect::new(0., 0., 20., 20.)]);
}

#[test]
fn subtract_hole() {
    let mut region = Region::from_rect(Rect::new(0., 0., 100., 50.));
    region.subtract_rect(Rect::new(10., 10., 90., 40.));

    assert_disjoint(&region);
    assert_eq!(region.area(), 5000. - 2400.);
    assert!(region.contains_point(Point::new(5., 25.)));
    assert!(region.contains_point(Point::new(95., 25.)));
    assert!(!region.contains_point(Point::new(50., 25.)));
}

#[test]
fn intersect_keeps_common_pixels() {
    let mut a = Region::from_rects([Rect::new(0., 0., 10., 10.), Rect::new(20., 0., 30., 10.)]);
    let b = Region::from_rect(Rect::new(5., 5., 25., 15.));
    a.intersect(&b);

    assert_eq!(
        a,
        Region::from_rects([Rect::new(5., 5., 10., 10.), Rect::new(20., 5., 25., 10.)])
    );
}

#[test]
fn intersect_with_disjoint_is_empty() {
    let mut region = Region::from_rect(Rect::new(0., 0., 10., 10.));
    region.intersect_rect(Rect::new(10., 0., 20., 10.));
    assert!(region.is_empty());
}

#[test]
fn translate_moves_every_rect() {
    let mut region = Region::from_rects([Rect::new(0., 0., 10., 10.), Rect::new(20., 0., 30., 5.)]);
    region.translate(Vec2::new(5., -2.));
    assert_eq!(
        region,
        Region::from_rects([Rect::new(5., -2., 15., 8.), Rect::new(25., -2., 35., 3.)])
    );
}

#[test]
fn rect_in_classification() {
    let mut region = Region::from_rect(Rect::new(0., 0., 100., 100.));
    region.subtract_rect(Rect::new(40., 40., 60., 60.));

    assert_eq!(region.rect_in(Rect::new(0., 0., 10., 10.)), Overlap::In);
    assert_eq!(region.rect_in(Rect::new(35., 35., 45., 45.)), Overlap::Part);
    assert_eq!(region.rect_in(Rect::new(45., 45., 55., 55.)), Overlap::Out);
    assert_eq!(region.rect_in(Rect::new(200., 0., 210., 10.)), Overlap::Out);
    assert_eq!(region.rect_in(Rect::ZERO), Overlap::Out);
}

#[test]
fn equality_ignores_decomposition() {
    let horizontal = Region::from_rects([Rect::new(0., 0., 10., 5.), Rect::new(0., 5., 5., 10.)]);
    let vertical = Region::from_rects([Rect::new(0., 0., 5., 10.), Rect::new(5., 0., 10., 5.)]);
    assert_eq!(horizontal, vertical);
    assert_ne!(horizontal, Region::from_rect(Rect::new(0., 0., 10., 10.)));
}

#[test]
fn subtract_everything() {
    let mut region = Region::from_rects([Rect::new(0., 0., 10., 10.), Rect::new(30., 30., 40., 40.)]);
    region.subtract(&Region::from_rect(Rect::new(-5., -5., 50., 50.)));
    assert!(region.is_empty());
    assert_eq!(region.len(), 0);
}
