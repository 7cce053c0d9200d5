//! The immutable path data structure.

use crate::builder::PathBuilder;
use crate::math::Box2D;
use crate::sub_path::SubPath;

use std::fmt;
use std::iter::FromIterator;

/// A simple path data structure: a list of sub-paths.
///
/// Obtained from a `PathBuilder`. The fill and stroke tessellators work on the
/// sub-path slice (see `sub_paths`) so they can be fed from a builder directly.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Path {
    sub_paths: Box<[SubPath]>,
}

impl Path {
    /// Creates a [PathBuilder](struct.PathBuilder.html) to build a path.
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    /// Creates an empty path.
    pub fn new() -> Path {
        Path {
            sub_paths: Box::new([]),
        }
    }

    #[inline]
    pub fn sub_paths(&self) -> &[SubPath] {
        &self.sub_paths
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sub_paths.is_empty()
    }

    /// A conservative bounding box of all sub-paths.
    pub fn fast_bounding_box(&self) -> Option<Box2D> {
        self.sub_paths
            .iter()
            .filter_map(SubPath::fast_bounding_box)
            .fold(None, |acc: Option<Box2D>, bb| match acc {
                Some(acc) => Some(acc.union(&bb)),
                None => Some(bb),
            })
    }
}

impl From<Vec<SubPath>> for Path {
    fn from(sub_paths: Vec<SubPath>) -> Self {
        Path {
            sub_paths: sub_paths.into_boxed_slice(),
        }
    }
}

impl FromIterator<SubPath> for Path {
    fn from_iter<T: IntoIterator<Item = SubPath>>(iter: T) -> Path {
        Path::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = &'l SubPath;
    type IntoIter = std::slice::Iter<'l, SubPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.sub_paths.iter()
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "\"")?;
        for sub_path in self.sub_paths.iter() {
            for (i, glyph) in sub_path.glyphs().iter().enumerate() {
                let cmd = if i == 0 { "M" } else { "" };
                match glyph {
                    crate::Glyph::Line { to } => {
                        let cmd = if i == 0 { cmd } else { "L" };
                        write!(formatter, "{} {} {} ", cmd, to.x, to.y)?;
                    }
                    crate::Glyph::Arc {
                        center,
                        to,
                        angle,
                        ccw,
                    } => {
                        let cmd = if *ccw { "A" } else { "An" };
                        write!(
                            formatter,
                            "{} {} {} {} {} {} ",
                            cmd, center.x, center.y, to.x, to.y, angle.radians
                        )?;
                    }
                    crate::Glyph::Quadratic { ctrl, to } => {
                        write!(formatter, "Q {} {} {} {} ", ctrl.x, ctrl.y, to.x, to.y)?;
                    }
                    crate::Glyph::Cubic { ctrl1, ctrl2, to } => {
                        write!(
                            formatter,
                            "C {} {} {} {} {} {} ",
                            ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y
                        )?;
                    }
                }
            }
            if sub_path.is_closed() {
                write!(formatter, "Z ")?;
            }
        }
        write!(formatter, "\"")
    }
}

#[test]
fn debug_output() {
    use crate::math::point;

    let mut builder = Path::builder();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(1.0, 0.0));
    builder.quadratic_bezier_to(point(2.0, 0.0), point(2.0, 1.0));
    builder.close();
    let path = builder.build();

    assert_eq!(format!("{:?}", path), "\"M 0 0 L 1 0 Q 2 0 2 1 Z \"");
}

#[test]
fn bounding_box_of_several_sub_paths() {
    use crate::math::point;

    let mut builder = Path::builder();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(1.0, 1.0));
    builder.move_to(point(5.0, -2.0));
    builder.line_to(point(4.0, 0.0));
    let path = builder.build();

    let bb = path.fast_bounding_box().unwrap();
    assert_eq!(bb.min, point(0.0, -2.0));
    assert_eq!(bb.max, point(5.0, 1.0));
    assert_eq!(Path::new().fast_bounding_box(), None);
}
