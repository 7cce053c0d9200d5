//! Path building utilities.
//!
//! The builder follows the usual vector graphics conventions:
//!
//! - `move_to` starts a new sub-path,
//! - `line_to`, `arc_to` and the bézier methods extend the current sub-path,
//! - `close` marks the current sub-path closed.
//!
//! It is permissive: drawing commands without a sub-path start one, and drawing
//! after `close` reopens the sub-path with an explicit line back to its start.
//!
//! ## Examples
//!
//! ```
//! use pathmesh_path::{PathBuilder, math::{point, vector}};
//!
//! let mut builder = PathBuilder::new();
//!
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(1.0, 0.0));
//! builder.quadratic_bezier_to(point(2.0, 0.0), point(2.0, 1.0));
//!
//! builder.move_to(point(10.0, 0.0));
//! builder.cubic_bezier_to(point(12.0, 2.0), point(11.0, 2.0), point(5.0, 0.0));
//! builder.relative_line_to(vector(0.0, -5.0));
//! builder.close();
//!
//! let path = builder.build();
//! assert_eq!(path.sub_paths().len(), 2);
//! ```
//!

use crate::glyph::Glyph;
use crate::math::{Angle, Point, Vector};
use crate::path::Path;
use crate::sub_path::SubPath;

/// Accumulates drawing commands into sub-paths.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    sub_paths: Vec<SubPath>,
}

impl PathBuilder {
    pub fn new() -> Self {
        PathBuilder {
            sub_paths: Vec::new(),
        }
    }

    pub fn with_capacity(sub_paths: usize) -> Self {
        PathBuilder {
            sub_paths: Vec::with_capacity(sub_paths),
        }
    }

    /// Starts a new sub-path at `to`.
    pub fn move_to(&mut self, to: Point) {
        self.sub_paths.push(SubPath::new(to));
    }

    /// Starts a new sub-path relatively to the previous one.
    ///
    /// The offset applies to the start of the previous sub-path if it is closed,
    /// and to its last point otherwise. Without a previous sub-path the offset is
    /// relative to the origin.
    pub fn relative_move_to(&mut self, to: Vector) {
        let base = match self.sub_paths.last() {
            Some(sub_path) if sub_path.is_closed() => sub_path.first_point(),
            Some(sub_path) => sub_path.last_point(),
            None => None,
        }
        .unwrap_or_else(Point::origin);

        self.move_to(base + to);
    }

    pub fn line_to(&mut self, to: Point) {
        self.push(Glyph::Line { to });
    }

    /// Adds a line relatively to the current position.
    pub fn relative_line_to(&mut self, to: Vector) {
        let sub_path = self.current_sub_path();
        sub_path.reopen();
        let base = sub_path.last_point().unwrap_or_else(Point::origin);
        sub_path.push(Glyph::Line { to: base + to });
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.push(Glyph::Quadratic { ctrl, to });
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.push(Glyph::Cubic { ctrl1, ctrl2, to });
    }

    /// Adds a circular arc around `center`, from the current position to `to`.
    ///
    /// The sweep angle is normalized in `[0, 2π)` at flattening time, `ccw` selects
    /// the rotation direction.
    pub fn arc_to(&mut self, center: Point, to: Point, angle: Angle, ccw: bool) {
        self.push(Glyph::Arc {
            center,
            to,
            angle,
            ccw,
        });
    }

    /// Closes the current sub-path. Does nothing if there is none.
    pub fn close(&mut self) {
        if let Some(sub_path) = self.sub_paths.last_mut() {
            sub_path.close();
        }
    }

    /// Discards all sub-paths.
    pub fn clear(&mut self) {
        self.sub_paths.clear();
    }

    #[inline]
    pub fn sub_paths(&self) -> &[SubPath] {
        &self.sub_paths
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sub_paths.is_empty()
    }

    /// The end of the last glyph, if any.
    pub fn current_position(&self) -> Option<Point> {
        self.sub_paths.last().and_then(SubPath::last_point)
    }

    /// Builds a path object, consuming the builder.
    pub fn build(self) -> Path {
        Path::from(self.sub_paths)
    }

    /// Builds a path object out of a copy of the current sub-paths.
    pub fn snapshot(&self) -> Path {
        Path::from(self.sub_paths.clone())
    }

    /// A curve or arc can't be the first glyph of a sub-path, so one drawn without a
    /// current position starts from the origin.
    fn push(&mut self, glyph: Glyph) {
        let sub_path = self.current_sub_path();
        if sub_path.is_empty() && !glyph.is_line() {
            sub_path.push(Glyph::Line {
                to: Point::origin(),
            });
        }
        sub_path.push(glyph);
    }

    fn current_sub_path(&mut self) -> &mut SubPath {
        if self.sub_paths.is_empty() {
            self.sub_paths.push(SubPath::default());
        }

        let last = self.sub_paths.len() - 1;
        &mut self.sub_paths[last]
    }
}

#[cfg(test)]
use crate::math::{point, vector};

#[test]
fn line_to_without_move_to() {
    let mut builder = PathBuilder::new();
    builder.line_to(point(1.0, 2.0));
    builder.line_to(point(3.0, 2.0));

    assert_eq!(builder.sub_paths().len(), 1);
    let sub_path = &builder.sub_paths()[0];
    assert_eq!(sub_path.first_point(), Some(point(1.0, 2.0)));
    let points: Vec<Point> = sub_path.flattened().collect();
    assert_eq!(points, vec![point(1.0, 2.0), point(3.0, 2.0)]);
}

#[test]
fn relative_commands() {
    let mut builder = PathBuilder::new();
    builder.relative_move_to(vector(1.0, 1.0));
    builder.relative_line_to(vector(2.0, 0.0));
    builder.relative_line_to(vector(0.0, 2.0));
    assert_eq!(builder.current_position(), Some(point(3.0, 3.0)));

    // Open sub-path: relative to its last point.
    builder.relative_move_to(vector(1.0, 0.0));
    assert_eq!(builder.current_position(), Some(point(4.0, 3.0)));
    builder.line_to(point(5.0, 5.0));
    builder.close();

    // Closed sub-path: relative to its first point.
    builder.relative_move_to(vector(0.0, -1.0));
    assert_eq!(builder.current_position(), Some(point(4.0, 2.0)));
    assert_eq!(builder.sub_paths().len(), 3);
}

#[test]
fn relative_line_after_close() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(4.0, 0.0));
    builder.close();
    builder.relative_line_to(vector(0.0, 1.0));

    let sub_path = &builder.sub_paths()[0];
    assert!(!sub_path.is_closed());
    assert_eq!(sub_path.last_point(), Some(point(0.0, 1.0)));
    assert_eq!(sub_path.glyphs().len(), 4);
}

#[test]
fn close_and_clear() {
    let mut builder = PathBuilder::new();
    // Nothing to close.
    builder.close();
    assert!(builder.is_empty());

    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.line_to(point(1.0, 1.0));
    builder.close();
    builder.close();
    assert!(builder.sub_paths()[0].is_closed());
    assert_eq!(builder.sub_paths()[0].glyphs().len(), 3);

    let snapshot = builder.snapshot();
    builder.clear();
    assert!(builder.is_empty());
    assert_eq!(snapshot.sub_paths().len(), 1);
}

#[test]
fn curve_without_current_position() {
    let mut builder = PathBuilder::new();
    builder.cubic_bezier_to(point(0.0, 1.0), point(1.0, 1.0), point(1.0, 0.0));

    let sub_path = &builder.sub_paths()[0];
    assert_eq!(sub_path.glyphs().len(), 2);
    assert_eq!(sub_path.first_point(), Some(point(0.0, 0.0)));
    let points: Vec<Point> = sub_path.flattened().collect();
    assert_eq!(points[0], point(0.0, 0.0));
    assert_eq!(*points.last().unwrap(), point(1.0, 0.0));

    // Same after clear, with an arc.
    builder.clear();
    builder.arc_to(point(1.0, 0.0), point(1.0, 1.0), Angle::degrees(90.0), true);
    assert_eq!(builder.sub_paths()[0].first_point(), Some(point(0.0, 0.0)));
}
