use crate::flatten::Flattened;
use crate::scalar::Scalar;
use crate::segment::{BoundingBox, Segment};
use crate::{LineSegment, Point, Vector};

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment<S> {
    pub from: Point<S>,
    pub ctrl1: Point<S>,
    pub ctrl2: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> CubicBezierSegment<S> {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: S) -> Point<S> {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * S::THREE * one_t2 * t
            + self.ctrl2.to_vector() * S::THREE * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: S) -> Vector<S> {
        let one_t = S::ONE - t;
        let one_t2 = one_t * one_t;
        let t2 = t * t;

        (self.ctrl1 - self.from) * S::THREE * one_t2
            + (self.ctrl2 - self.ctrl1) * S::THREE * S::TWO * one_t * t
            + (self.to - self.ctrl2) * S::THREE * t2
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
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
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

impl<S: Scalar> Segment for CubicBezierSegment<S> {
    impl_segment!(S);
}

impl<S: Scalar> BoundingBox for CubicBezierSegment<S> {
    type Scalar = S;
    fn fast_bounding_range_x(&self) -> (S, S) {
        let min_x = self.from.x.min(self.ctrl1.x).min(self.ctrl2.x).min(self.to.x);
        let max_x = self.from.x.max(self.ctrl1.x).max(self.ctrl2.x).max(self.to.x);

        (min_x, max_x)
    }

    fn fast_bounding_range_y(&self) -> (S, S) {
        let min_y = self.from.y.min(self.ctrl1.y).min(self.ctrl2.y).min(self.to.y);
        let max_y = self.from.y.max(self.ctrl1.y).max(self.ctrl2.y).max(self.to.y);

        (min_y, max_y)
    }
}

#[cfg(test)]
use crate::point;
#[cfg(test)]
use std::vec::Vec;

#[test]
fn flattening_ends_on_the_curve_end() {
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(0.0, 10.0),
        ctrl2: point(10.0, 10.0),
        to: point(10.0, 0.0),
    };

    let points: Vec<_> = curve.flattened().collect();
    assert!(points.len() >= 8);
    assert_eq!(*points.last().unwrap(), curve.to);

    let bb = curve.fast_bounding_box();
    for p in &points {
        assert!(bb.min.x <= p.x && p.x <= bb.max.x);
        assert!(bb.min.y <= p.y && p.y <= bb.max.y);
    }
}

#[test]
fn flattening_a_loop() {
    // Closed loop with a sharp turn around t = 0.5.
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(10.0, 10.0),
        ctrl2: point(-10.0, 10.0),
        to: point(0.0, 0.0),
    };

    let points: Vec<_> = curve.flattened().collect();
    assert!(points.len() >= 32);
    assert_eq!(*points.last().unwrap(), point(0.0, 0.0));
}

#[test]
fn sample_and_derivative_end_points() {
    let curve = CubicBezierSegment {
        from: point(0.0f32, 0.0),
        ctrl1: point(1.0, 0.0),
        ctrl2: point(2.0, 1.0),
        to: point(2.0, 2.0),
    };

    assert_eq!(curve.sample(0.0), curve.from);
    assert_eq!(curve.sample(1.0), curve.to);
    assert_eq!(curve.derivative(0.0), Vector::new(3.0, 0.0));
    assert_eq!(curve.derivative(1.0), Vector::new(0.0, 3.0));
    assert_eq!(curve.flip().flip(), curve);
}
