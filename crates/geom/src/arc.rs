//! Circular arcs.

use crate::scalar::Scalar;
use crate::segment::BoundingBox;
use crate::{Angle, Point, Rotation, Vector};

/// A circular arc going around `center`, starting at `from` and ending at `to`.
///
/// The sweep angle is a magnitude: counter-clockwise arcs rotate positively
/// (with y pointing up), the others negatively. `to` is expected to be on the
/// circle but is not required to be; flattening always lands exactly on it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Arc<S> {
    pub center: Point<S>,
    pub from: Point<S>,
    pub to: Point<S>,
    pub sweep_angle: Angle<S>,
    pub ccw: bool,
}

/// Number of flattening steps for a half turn.
const STEPS_PER_HALF_TURN: f32 = 32.0;
/// Non-empty arcs are always split into at least this many steps.
const MIN_STEPS: u32 = 5;

impl<S: Scalar> Arc<S> {
    #[inline]
    pub fn from(&self) -> Point<S> {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point<S> {
        self.to
    }

    pub fn radius(&self) -> S {
        (self.from - self.center).length()
    }

    /// The sweep angle brought back to `[0, 2π)`.
    pub fn normalized_sweep(&self) -> S {
        self.sweep_angle.positive().radians
    }

    /// Number of line segments the flattened arc is made of.
    pub fn step_count(&self) -> u32 {
        let angle = self.normalized_sweep();
        if angle <= S::ZERO {
            return 0;
        }

        let steps = (angle / S::PI() * S::value(STEPS_PER_HALF_TURN))
            .round()
            .to_u32()
            .unwrap_or(0);

        steps.max(MIN_STEPS)
    }

    /// Returns a flattening iterator.
    ///
    /// The end point is yielded last, the start point is not yielded. Zero-length
    /// arcs only yield their end point.
    pub fn flattened(&self) -> ArcFlattened<S> {
        ArcFlattened::new(self)
    }
}

impl<S: Scalar> BoundingBox for Arc<S> {
    type Scalar = S;

    // The whole circle.
    fn fast_bounding_range_x(&self) -> (S, S) {
        let r = self.radius();
        (
            (self.center.x - r).min(self.to.x),
            (self.center.x + r).max(self.to.x),
        )
    }

    fn fast_bounding_range_y(&self) -> (S, S) {
        let r = self.radius();
        (
            (self.center.y - r).min(self.to.y),
            (self.center.y + r).max(self.to.y),
        )
    }
}

/// A flattening iterator for circular arcs, using a constant angular step.
pub struct ArcFlattened<S> {
    center: Point<S>,
    radius: Vector<S>,
    rotation: Rotation<S>,
    remaining: u32,
    to: Point<S>,
    done: bool,
}

impl<S: Scalar> ArcFlattened<S> {
    fn new(arc: &Arc<S>) -> Self {
        let steps = arc.step_count();
        let mut step = if steps > 0 {
            arc.normalized_sweep() / S::value(steps as f32)
        } else {
            S::ZERO
        };
        if !arc.ccw {
            step = -step;
        }

        ArcFlattened {
            center: arc.center,
            radius: arc.from - arc.center,
            rotation: Rotation::new(Angle::radians(step)),
            remaining: steps.saturating_sub(1),
            to: arc.to,
            done: false,
        }
    }
}

impl<S: Scalar> Iterator for ArcFlattened<S> {
    type Item = Point<S>;

    fn next(&mut self) -> Option<Point<S>> {
        if self.remaining > 0 {
            self.remaining -= 1;
            self.radius = self.rotation.transform_vector(self.radius);
            return Some(self.center + self.radius);
        }

        if self.done {
            return None;
        }

        self.done = true;
        Some(self.to)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.remaining as usize + if self.done { 0 } else { 1 };
        (count, Some(count))
    }
}

#[cfg(test)]
use crate::point;
#[cfg(test)]
use std::vec::Vec;

#[test]
fn half_turn() {
    let arc = Arc {
        center: point(0.0f32, 0.0),
        from: point(1.0, 0.0),
        to: point(-1.0, 0.0),
        sweep_angle: Angle::pi(),
        ccw: true,
    };

    assert_eq!(arc.step_count(), 32);
    let points: Vec<_> = arc.flattened().collect();
    assert_eq!(points.len(), 32);
    assert_eq!(points[31], point(-1.0, 0.0));
    for p in &points {
        assert!(((*p - arc.center).length() - 1.0).abs() < 1e-4);
        // Counter-clockwise from (1, 0) goes through the upper half.
        assert!(p.y >= -1e-5);
    }
    assert!((points[15] - point(0.0, 1.0)).length() < 1e-4);
}

#[test]
fn clockwise_quarter() {
    let arc = Arc {
        center: point(0.0f32, 0.0),
        from: point(0.0, 2.0),
        to: point(2.0, 0.0),
        sweep_angle: Angle::frac_pi_2(),
        ccw: false,
    };

    assert_eq!(arc.step_count(), 16);
    let points: Vec<_> = arc.flattened().collect();
    assert_eq!(points.len(), 16);
    for p in &points {
        assert!(p.x > 0.0 && p.y >= -1e-5);
    }
    assert_eq!(*points.last().unwrap(), arc.to);
}

#[test]
fn small_and_empty_arcs() {
    let tiny = Arc {
        center: point(0.0f32, 0.0),
        from: point(1.0, 0.0),
        to: point(0.999, 0.01),
        sweep_angle: Angle::radians(0.01),
        ccw: true,
    };
    assert_eq!(tiny.step_count(), 5);
    assert_eq!(tiny.flattened().count(), 5);

    let empty = Arc {
        sweep_angle: Angle::radians(0.0),
        ..tiny
    };
    assert_eq!(empty.step_count(), 0);
    let points: Vec<_> = empty.flattened().collect();
    assert_eq!(points, std::vec![tiny.to]);
}

#[test]
fn negative_sweep_is_normalized() {
    let arc = Arc {
        center: point(0.0f32, 0.0),
        from: point(1.0, 0.0),
        to: point(0.0, -1.0),
        sweep_angle: Angle::radians(-core::f32::consts::FRAC_PI_2),
        ccw: true,
    };

    // -π/2 is the same direction as 3π/2.
    assert!((arc.normalized_sweep() - 3.0 * core::f32::consts::FRAC_PI_2).abs() < 1e-5);
    assert_eq!(arc.step_count(), 48);
}
