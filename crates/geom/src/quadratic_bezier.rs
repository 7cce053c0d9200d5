use crate::flatten::Flattened;
use crate::scalar::Scalar;
use crate::segment::{BoundingBox, Segment};
use crate::{LineSegment, Point, Vector};

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> QuadraticBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * S::TWO * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let one_t = S::ONE - t;
        (self.ctrl - self.from) * S::TWO * one_t + (self.to - self.ctrl) * S::TWO * t
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        QuadraticBezierSegment {
            from: self.to,
            ctrl: self.ctrl,
            to: self.from,
        }
    }

    /// The line segment between the curve's end points.
    pub fn baseline(&self) -> LineSegment<S> {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Returns a flattening iterator.
    ///
    /// The end point of the curve is yielded last, the start point is not yielded.
    pub fn flattened(&self) -> Flattened<Self> {
        Flattened::new(self)
    }
}

impl<S: Scalar> Segment for QuadraticBezierSegment<S> {
    impl_segment!(S);
}

impl<S: Scalar> BoundingBox for QuadraticBezierSegment<S> {
    type Scalar = S;
    fn fast_bounding_range_x(&self) -> (S, S) {
        let min_x = self.from.x.min(self.ctrl.x).min(self.to.x);
        let max_x = self.from.x.max(self.ctrl.x).max(self.to.x);

        (min_x, max_x)
    }

    fn fast_bounding_range_y(&self) -> (S, S) {
        let min_y = self.from.y.min(self.ctrl.y).min(self.to.y);
        let max_y = self.from.y.max(self.ctrl.y).max(self.to.y);

        (min_y, max_y)
    }
}

#[cfg(test)]
use crate::point;
#[cfg(test)]
use std::vec::Vec;

#[test]
fn flattening_ends_on_the_curve_end() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(5.0, 10.0),
        to: point(10.0, 0.0),
    };

    let points: Vec<_> = curve.flattened().collect();
    assert!(points.len() >= 8);
    assert_eq!(*points.last().unwrap(), curve.to);
    assert!(!points.contains(&curve.from));

    // Samples are on the curve and never go back to the start.
    let bb = curve.fast_bounding_box();
    for p in &points {
        assert!(p.y >= 0.0 && p.y <= 5.0 + 1e-4);
        assert!(bb.min.x <= p.x && p.x <= bb.max.x);
    }
    for w in points.windows(2) {
        assert!(w[0].x < w[1].x);
    }
}

#[test]
fn flattening_a_straight_curve() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(1.0, 0.0),
        to: point(2.0, 0.0),
    };

    let points: Vec<_> = curve.flattened().collect();
    assert_eq!(points.len(), 32);
    assert_eq!(points[31], point(2.0, 0.0));
}

#[test]
fn flattening_a_point() {
    let p = point(3.0f32, 4.0);
    let curve = QuadraticBezierSegment {
        from: p,
        ctrl: p,
        to: p,
    };

    let points: Vec<_> = curve.flattened().collect();
    assert_eq!(*points.last().unwrap(), p);
    assert!(points.iter().all(|q| *q == p));
}

#[test]
fn derivative() {
    let curve = QuadraticBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl: point(1.0, 1.0),
        to: point(2.0, 0.0),
    };
    assert_eq!(curve.derivative(0.0), Vector::new(2.0, 2.0));
    assert_eq!(curve.derivative(1.0), Vector::new(2.0, -2.0));
    assert_eq!(curve.sample(0.5), point(1.0, 0.5));
}
