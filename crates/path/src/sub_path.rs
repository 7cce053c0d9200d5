//! Sub-paths: runs of connected glyphs.

use crate::glyph::{FlattenedGlyph, Glyph};
use crate::math::{Box2D, Point};

use std::slice;

/// A connected sequence of glyphs, optionally closed.
///
/// The first glyph sets the start position and must be a `Glyph::Line`. A closed
/// sub-path implicitly goes back to its start after the last glyph.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SubPath {
    glyphs: Vec<Glyph>,
    closed: bool,
}

impl SubPath {
    /// Creates an open sub-path starting at `start`.
    pub fn new(start: Point) -> Self {
        SubPath {
            glyphs: vec![Glyph::Line { to: start }],
            closed: false,
        }
    }

    /// Creates a sub-path from raw glyphs.
    ///
    /// Nothing is checked here, but flattening panics if the first glyph is not a line.
    pub fn from_glyphs(glyphs: Vec<Glyph>, closed: bool) -> Self {
        SubPath { glyphs, closed }
    }

    #[inline]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The start position (the end of the first glyph).
    pub fn first_point(&self) -> Option<Point> {
        self.glyphs.first().map(Glyph::to)
    }

    /// The end of the last glyph.
    pub fn last_point(&self) -> Option<Point> {
        self.glyphs.last().map(Glyph::to)
    }

    /// Appends a glyph, reopening the sub-path first if it is closed.
    pub fn push(&mut self, glyph: Glyph) {
        self.reopen();
        self.glyphs.push(glyph);
    }

    /// Marks the sub-path as closed.
    #[inline]
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Opens a closed sub-path so that it can be extended.
    ///
    /// The implicit closing segment becomes an explicit line back to the start.
    pub fn reopen(&mut self) {
        if !self.closed {
            return;
        }

        if let Some(&first) = self.glyphs.first() {
            self.glyphs.push(first);
        }
        self.closed = false;
    }

    /// Iterates over the flattened sub-path: the start position followed by the
    /// points of each glyph. The closing segment is not represented.
    ///
    /// # Panics
    ///
    /// If the first glyph is not a line.
    pub fn flattened(&self) -> FlattenedSubPath<'_> {
        if let Some(first) = self.glyphs.first() {
            assert!(
                first.is_line(),
                "The first glyph of a sub-path must be a line, got {:?}",
                first
            );
        }

        FlattenedSubPath {
            glyphs: self.glyphs.iter(),
            current: FlattenedGlyph::Line(None),
            position: Point::origin(),
            glyph_index: 0,
        }
    }

    /// A conservative bounding box of the sub-path, using curve control points.
    pub fn fast_bounding_box(&self) -> Option<Box2D> {
        let start = self.first_point()?;
        let mut bounds = Box2D {
            min: start,
            max: start,
        };
        let mut from = start;
        for glyph in &self.glyphs[1..] {
            glyph.for_each_bounding_point(from, &mut |p| {
                bounds.min = bounds.min.min(p);
                bounds.max = bounds.max.max(p);
            });
            from = glyph.to();
        }

        Some(bounds)
    }
}

/// A flattening iterator over a sub-path, see `SubPath::flattened`.
pub struct FlattenedSubPath<'l> {
    glyphs: slice::Iter<'l, Glyph>,
    current: FlattenedGlyph,
    position: Point,
    glyph_index: usize,
}

impl<'l> FlattenedSubPath<'l> {
    /// Yields the points along with the index of the glyph they belong to.
    pub fn with_glyph_index(self) -> WithGlyphIndex<'l> {
        WithGlyphIndex { inner: self }
    }

    fn next_with_index(&mut self) -> Option<(usize, Point)> {
        loop {
            if let Some(p) = self.current.next() {
                return Some((self.glyph_index - 1, p));
            }

            let glyph = self.glyphs.next()?;
            self.current = glyph.flattened(self.position);
            self.position = glyph.to();
            self.glyph_index += 1;
        }
    }
}

impl<'l> Iterator for FlattenedSubPath<'l> {
    type Item = Point;

    #[inline]
    fn next(&mut self) -> Option<Point> {
        self.next_with_index().map(|(_, p)| p)
    }
}

/// See `FlattenedSubPath::with_glyph_index`.
pub struct WithGlyphIndex<'l> {
    inner: FlattenedSubPath<'l>,
}

impl<'l> Iterator for WithGlyphIndex<'l> {
    type Item = (usize, Point);

    #[inline]
    fn next(&mut self) -> Option<(usize, Point)> {
        self.inner.next_with_index()
    }
}

#[cfg(test)]
use crate::math::{point, Angle};

#[test]
fn reopen_adds_the_start_point() {
    let mut sub_path = SubPath::new(point(0.0, 0.0));
    sub_path.push(Glyph::Line { to: point(1.0, 0.0) });
    sub_path.close();
    assert!(sub_path.is_closed());

    sub_path.push(Glyph::Line { to: point(1.0, 1.0) });
    assert!(!sub_path.is_closed());
    assert_eq!(
        sub_path.glyphs(),
        &[
            Glyph::Line { to: point(0.0, 0.0) },
            Glyph::Line { to: point(1.0, 0.0) },
            Glyph::Line { to: point(0.0, 0.0) },
            Glyph::Line { to: point(1.0, 1.0) },
        ]
    );

    // Reopening an open sub-path does nothing.
    sub_path.reopen();
    assert_eq!(sub_path.glyphs().len(), 4);
}

#[test]
fn flattened_sub_path() {
    let mut sub_path = SubPath::new(point(1.0, 0.0));
    sub_path.push(Glyph::Line { to: point(2.0, 0.0) });
    sub_path.push(Glyph::Arc {
        center: point(1.0, 0.0),
        to: point(0.0, 0.0),
        angle: Angle::pi(),
        ccw: true,
    });

    let points: Vec<(usize, Point)> = sub_path.flattened().with_glyph_index().collect();
    assert_eq!(points[0], (0, point(1.0, 0.0)));
    assert_eq!(points[1], (1, point(2.0, 0.0)));
    assert_eq!(points.len(), 2 + 32);
    assert_eq!(*points.last().unwrap(), (2, point(0.0, 0.0)));
    assert!(points[2..].iter().all(|&(glyph, _)| glyph == 2));
}

#[test]
#[should_panic]
fn flattening_requires_a_leading_line() {
    let sub_path = SubPath::from_glyphs(
        vec![Glyph::Quadratic {
            ctrl: point(1.0, 1.0),
            to: point(2.0, 0.0),
        }],
        false,
    );

    let _ = sub_path.flattened().count();
}

#[test]
fn bounding_box() {
    let mut sub_path = SubPath::new(point(0.0, 0.0));
    sub_path.push(Glyph::Cubic {
        ctrl1: point(-1.0, 3.0),
        ctrl2: point(4.0, 3.0),
        to: point(3.0, 0.0),
    });
    let bb = sub_path.fast_bounding_box().unwrap();
    assert_eq!(bb.min, point(-1.0, 0.0));
    assert_eq!(bb.max, point(4.0, 3.0));

    assert_eq!(SubPath::default().fast_bounding_box(), None);
}
