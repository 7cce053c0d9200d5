use crate::scalar::Scalar;
use crate::segment::{BoundingBox, Segment};
use crate::utils::min_max;
use crate::{point, Box2D, Point, Vector};

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

impl<S: Scalar> LineSegment<S> {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    /// Sample the x coordinate of the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn x(&self, t: S) -> S {
        self.from.x * (S::ONE - t) + self.to.x * t
    }

    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    #[inline]
    pub fn derivative(&self, _t: S) -> Vector<S> {
        self.to_vector()
    }

    pub fn solve_t_for_y(&self, y: S) -> S {
        let dy = self.to.y - self.from.y;
        if dy == S::ZERO {
            return S::ZERO;
        }

        (y - self.from.y) / dy
    }

    /// Projects a horizontal line at `y` onto the segment's supporting line.
    ///
    /// Horizontal segments return the x coordinate of their start.
    pub fn solve_x_for_y(&self, y: S) -> S {
        self.x(self.solve_t_for_y(y))
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    /// Return the smallest rectangle containing this segment.
    #[inline]
    pub fn bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = min_max(self.from.x, self.to.x);
        let (min_y, max_y) = min_max(self.from.y, self.to.y);

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> S {
        self.to_vector().length()
    }

    #[inline]
    pub fn square_length(&self) -> S {
        self.to_vector().square_length()
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.from.y == self.to.y
    }

    /// Computes the crossing point of two segments, accepting crossings slightly
    /// beyond the end points.
    ///
    /// The tolerance is a thousandth of the sum of both lengths, so touching
    /// segments (sharing an end point, or a T junction) do intersect. Parallel,
    /// nearly parallel and zero-length segments never intersect.
    pub fn inclusive_intersection(&self, other: &Self) -> Option<Point<S>> {
        let v1 = self.to_vector();
        let v2 = other.to_vector();
        let len1 = v1.length();
        let len2 = v2.length();
        if len1 == S::ZERO || len2 == S::ZERO {
            return None;
        }

        let denom = v1.cross(v2);
        if denom.abs() <= S::EPSILON * len1 * len2 {
            return None;
        }

        let d = other.from - self.from;
        let t = d.cross(v2) / denom;
        let u = d.cross(v1) / denom;

        let epsilon = (len1 + len2) / S::value(1000.0);
        let t_epsilon = epsilon / len1;
        let u_epsilon = epsilon / len2;
        if t < -t_epsilon || t > S::ONE + t_epsilon || u < -u_epsilon || u > S::ONE + u_epsilon {
            return None;
        }

        Some(self.from + v1 * t)
    }

    pub fn to_f32(&self) -> LineSegment<f32> {
        LineSegment {
            from: self.from.to_f32(),
            to: self.to.to_f32(),
        }
    }
}

impl<S: Scalar> Segment for LineSegment<S> {
    impl_segment!(S);
}

impl<S: Scalar> BoundingBox for LineSegment<S> {
    type Scalar = S;
    fn fast_bounding_range_x(&self) -> (S, S) {
        min_max(self.from.x, self.to.x)
    }
    fn fast_bounding_range_y(&self) -> (S, S) {
        min_max(self.from.y, self.to.y)
    }
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point<f32>, b: Point<f32>, epsilon: f32) -> bool {
    (a - b).length() < epsilon
}

#[test]
fn intersection_crossing() {
    let l1 = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(2.0, 2.0),
    };
    let l2 = LineSegment {
        from: point(0.0f32, 2.0),
        to: point(2.0, 0.0),
    };

    let p = l1.inclusive_intersection(&l2).unwrap();
    assert!(fuzzy_eq_point(p, point(1.0, 1.0), 1e-5));
    let p = l2.inclusive_intersection(&l1).unwrap();
    assert!(fuzzy_eq_point(p, point(1.0, 1.0), 1e-5));
}

#[test]
fn intersection_touching() {
    let l1 = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(10.0, 0.0),
    };
    let l2 = LineSegment {
        from: point(10.0f32, 0.0),
        to: point(10.0, 10.0),
    };
    let t_junction = LineSegment {
        from: point(5.0f32, 0.0),
        to: point(5.0, -3.0),
    };

    assert!(fuzzy_eq_point(l1.inclusive_intersection(&l2).unwrap(), point(10.0, 0.0), 1e-4));
    assert!(fuzzy_eq_point(l1.inclusive_intersection(&t_junction).unwrap(), point(5.0, 0.0), 1e-4));
}

#[test]
fn intersection_disjoint() {
    let l1 = LineSegment {
        from: point(0.0f32, 0.0),
        to: point(1.0, 0.0),
    };
    let far = LineSegment {
        from: point(5.0f32, -1.0),
        to: point(5.0, 1.0),
    };
    let parallel = LineSegment {
        from: point(0.0f32, 1.0),
        to: point(1.0, 1.0),
    };
    let degenerate = LineSegment {
        from: point(0.5f32, 0.0),
        to: point(0.5, 0.0),
    };

    assert_eq!(l1.inclusive_intersection(&far), None);
    assert_eq!(l1.inclusive_intersection(&parallel), None);
    assert_eq!(l1.inclusive_intersection(&l1), None);
    assert_eq!(l1.inclusive_intersection(&degenerate), None);
}

#[test]
fn solve_x_for_y() {
    let l = LineSegment {
        from: point(0.0f32, 2.0),
        to: point(2.0, 0.0),
    };
    assert!((l.solve_x_for_y(1.0) - 1.0).abs() < 1e-6);

    let vertical = LineSegment {
        from: point(3.0f32, 0.0),
        to: point(3.0, 5.0),
    };
    assert_eq!(vertical.solve_x_for_y(4.0), 3.0);

    let horizontal = LineSegment {
        from: point(1.0f32, 0.0),
        to: point(3.0, 0.0),
    };
    assert!(horizontal.is_horizontal());
    assert_eq!(horizontal.solve_x_for_y(0.0), 1.0);
}

#[test]
fn bounding_box() {
    let l = LineSegment {
        from: point(3.0f32, -1.0),
        to: point(-2.0, 4.0),
    };
    let bb = l.bounding_box();
    assert_eq!(bb.min, point(-2.0, -1.0));
    assert_eq!(bb.max, point(3.0, 4.0));
    assert_eq!(l.fast_bounding_box(), bb);
}
