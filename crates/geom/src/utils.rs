//! Small orientation and ordering predicates shared by the sweep-line algorithms.
//!
//! All predicates assume a coordinate system where y points up.

use crate::scalar::Scalar;
use crate::{Box2D, Point, Vector};

#[inline]
pub fn min_max<S: Scalar>(a: S, b: S) -> (S, S) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// The left-hand normal of a vector (rotated by a quarter turn counter-clockwise).
#[inline]
pub fn ortho<S: Scalar>(v: Vector<S>) -> Vector<S> {
    Vector::new(-v.y, v.x)
}

/// Sweep order used by the partitioner: `a` is below `b` if it has a lower y, or
/// the same y and a larger x.
#[inline]
pub fn is_below<S: Scalar>(a: Point<S>, b: Point<S>) -> bool {
    a.y < b.y || (a.y == b.y && a.x > b.x)
}

/// True if going along `v1` then `v2` turns left.
#[inline]
pub fn is_convex<S: Scalar>(v1: Vector<S>, v2: Vector<S>) -> bool {
    v1.cross(v2) > S::ZERO
}

/// True if the polyline `a -> b -> c` turns left at `b`.
#[inline]
pub fn is_convex_corner<S: Scalar>(a: Point<S>, b: Point<S>, c: Point<S>) -> bool {
    is_convex(b - a, c - b)
}

/// True if the three directions are in counter-clockwise order around the origin.
///
/// Zero crosses count as counter-clockwise, so `v2` lying on `v1` or `v3` passes.
pub fn vectors_are_ccw<S: Scalar>(v1: Vector<S>, v2: Vector<S>, v3: Vector<S>) -> bool {
    let mut negative = 0;
    if v1.cross(v2) < S::ZERO {
        negative += 1;
    }
    if v2.cross(v3) < S::ZERO {
        negative += 1;
    }
    if v3.cross(v1) < S::ZERO {
        negative += 1;
    }

    negative < 2
}

/// Accumulates `Σ (x_i − x_{i−1})(y_i + y_{i−1})` over a closed loop, including
/// the segment from the last point back to the first.
///
/// The result is minus twice the signed area: negative for counter-clockwise loops.
pub fn signed_area_accumulator<S: Scalar>(points: &[Point<S>]) -> S {
    let mut acc = S::ZERO;
    if points.len() < 2 {
        return acc;
    }

    let mut prev = points[points.len() - 1];
    for &p in points {
        acc += (p.x - prev.x) * (p.y + prev.y);
        prev = p;
    }

    acc
}

/// Like `Box2D::intersects`, but boxes that only touch, or that are degenerate, overlap.
#[inline]
pub fn boxes_overlap<S: Scalar>(a: &Box2D<S>, b: &Box2D<S>) -> bool {
    !(a.max.x < b.min.x || b.max.x < a.min.x || a.max.y < b.min.y || b.max.y < a.min.y)
}

#[cfg(test)]
use crate::{point, vector};

#[test]
fn below_ties() {
    assert!(is_below(point(0.0f32, 0.0), point(0.0, 1.0)));
    assert!(!is_below(point(0.0f32, 1.0), point(0.0, 0.0)));
    // Same height: the one on the right is below.
    assert!(is_below(point(1.0f32, 0.0), point(0.0, 0.0)));
    assert!(!is_below(point(0.0f32, 0.0), point(1.0, 0.0)));
    assert!(!is_below(point(1.0f32, 1.0), point(1.0, 1.0)));
}

#[test]
fn convexity() {
    assert!(is_convex(vector(1.0f32, 0.0), vector(0.0, 1.0)));
    assert!(!is_convex(vector(1.0f32, 0.0), vector(0.0, -1.0)));
    assert!(!is_convex(vector(1.0f32, 0.0), vector(2.0, 0.0)));
    assert!(is_convex_corner(point(0.0f32, 0.0), point(1.0, 0.0), point(1.0, 1.0)));
}

#[test]
fn ccw_vectors() {
    let right = vector(1.0f32, 0.0);
    let up = vector(0.0f32, 1.0);
    let left = vector(-1.0f32, 0.0);
    let down = vector(0.0f32, -1.0);

    assert!(vectors_are_ccw(right, up, left));
    assert!(vectors_are_ccw(up, left, down));
    assert!(!vectors_are_ccw(left, up, right));
    // Reflex sector going counter-clockwise from right to down.
    assert!(vectors_are_ccw(right, up, down));
    assert!(vectors_are_ccw(right, vector(-1.0, -0.5), down));
    assert!(!vectors_are_ccw(right, vector(1.0, -1.0), down));
}

#[test]
fn area_sign() {
    let ccw = [
        point(0.0f32, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ];
    assert_eq!(signed_area_accumulator(&ccw), -2.0);

    let mut cw = ccw;
    cw.reverse();
    assert_eq!(signed_area_accumulator(&cw), 2.0);

    assert_eq!(signed_area_accumulator::<f32>(&[]), 0.0);
}

#[test]
fn touching_boxes_overlap() {
    let a = Box2D {
        min: point(0.0f32, 0.0),
        max: point(1.0, 1.0),
    };
    let b = Box2D {
        min: point(1.0f32, 0.0),
        max: point(2.0, 0.0),
    };
    let c = Box2D {
        min: point(1.5f32, 1.5),
        max: point(2.0, 2.0),
    };
    assert!(boxes_overlap(&a, &b));
    assert!(boxes_overlap(&b, &a));
    assert!(!boxes_overlap(&a, &c));
}
