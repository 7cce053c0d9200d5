//! Path segments.
//!
//! A glyph only stores where it goes. It starts at the end of the previous glyph of
//! its sub-path, which is why flattening a glyph requires its start position.

use crate::geom::arc::ArcFlattened;
use crate::geom::{Arc, CubicBezierSegment, Flattened, QuadraticBezierSegment};
use crate::math::{Angle, Point};

/// One segment of a sub-path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Glyph {
    Line {
        to: Point,
    },
    /// A circular arc around `center`, sweeping `angle` counter-clockwise if `ccw`
    /// is set and clockwise otherwise.
    Arc {
        center: Point,
        to: Point,
        angle: Angle,
        ccw: bool,
    },
    Quadratic {
        ctrl: Point,
        to: Point,
    },
    Cubic {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
}

impl Glyph {
    /// The end position of the glyph.
    #[inline]
    pub fn to(&self) -> Point {
        match *self {
            Glyph::Line { to }
            | Glyph::Arc { to, .. }
            | Glyph::Quadratic { to, .. }
            | Glyph::Cubic { to, .. } => to,
        }
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        match self {
            Glyph::Line { .. } => true,
            _ => false,
        }
    }

    /// Approximates the glyph with a polyline, starting at `from`.
    ///
    /// `from` is not part of the sequence, `self.to()` always terminates it.
    pub fn flattened(&self, from: Point) -> FlattenedGlyph {
        match *self {
            Glyph::Line { to } => FlattenedGlyph::Line(Some(to)),
            Glyph::Arc {
                center,
                to,
                angle,
                ccw,
            } => FlattenedGlyph::Arc(
                Arc {
                    center,
                    from,
                    to,
                    sweep_angle: angle,
                    ccw,
                }
                .flattened(),
            ),
            Glyph::Quadratic { ctrl, to } => FlattenedGlyph::Quadratic(
                QuadraticBezierSegment { from, ctrl, to }.flattened(),
            ),
            Glyph::Cubic { ctrl1, ctrl2, to } => FlattenedGlyph::Cubic(
                CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                }
                .flattened(),
            ),
        }
    }

    /// Calls `callback` with every point needed to bound the glyph.
    pub(crate) fn for_each_bounding_point(&self, from: Point, callback: &mut dyn FnMut(Point)) {
        match *self {
            Glyph::Line { to } => callback(to),
            Glyph::Arc { center, to, .. } => {
                let r = (from - center).length();
                callback(Point::new(center.x - r, center.y - r));
                callback(Point::new(center.x + r, center.y + r));
                callback(to);
            }
            Glyph::Quadratic { ctrl, to } => {
                callback(ctrl);
                callback(to);
            }
            Glyph::Cubic { ctrl1, ctrl2, to } => {
                callback(ctrl1);
                callback(ctrl2);
                callback(to);
            }
        }
    }
}

/// An iterator over the flattened points of a glyph.
pub enum FlattenedGlyph {
    Line(Option<Point>),
    Arc(ArcFlattened<f32>),
    Quadratic(Flattened<QuadraticBezierSegment<f32>>),
    Cubic(Flattened<CubicBezierSegment<f32>>),
}

impl Iterator for FlattenedGlyph {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        match self {
            FlattenedGlyph::Line(to) => to.take(),
            FlattenedGlyph::Arc(iter) => iter.next(),
            FlattenedGlyph::Quadratic(iter) => iter.next(),
            FlattenedGlyph::Cubic(iter) => iter.next(),
        }
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn every_glyph_ends_on_its_end_point() {
    let from = point(1.0, 0.0);
    let glyphs = [
        Glyph::Line { to: point(2.0, 2.0) },
        Glyph::Arc {
            center: point(0.0, 0.0),
            to: point(0.0, 1.0),
            angle: Angle::frac_pi_2(),
            ccw: true,
        },
        Glyph::Quadratic {
            ctrl: point(3.0, 3.0),
            to: point(5.0, 0.0),
        },
        Glyph::Cubic {
            ctrl1: point(1.0, 5.0),
            ctrl2: point(5.0, 5.0),
            to: point(5.0, 0.0),
        },
    ];

    for glyph in &glyphs {
        let points: Vec<Point> = glyph.flattened(from).collect();
        assert_eq!(points.last(), Some(&glyph.to()), "{:?}", glyph);
        if glyph.is_line() {
            assert_eq!(points.len(), 1);
        } else {
            assert!(points.len() > 1);
        }
    }
}
