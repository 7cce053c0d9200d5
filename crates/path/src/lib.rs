#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Data structures to build paths (vector graphics) and flatten them.
//!
//! A path is a list of sub-paths. Each sub-path is a run of [glyphs](glyph/index.html):
//! lines, circular arcs, quadratic and cubic bézier curves, each one starting where the
//! previous one ends. The first glyph of a sub-path is always a line which sets the
//! start position.
//!
//! This crate is reexported in [pathmesh](https://docs.rs/pathmesh/).
//!
//! # Examples
//!
//! ```
//! # extern crate pathmesh_path;
//! # fn main() {
//! use pathmesh_path::PathBuilder;
//! use pathmesh_path::math::{point, vector};
//!
//! let mut builder = PathBuilder::new();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(1.0, 2.0));
//! builder.quadratic_bezier_to(point(2.0, 2.0), point(2.0, 0.0));
//! builder.relative_line_to(vector(-1.0, -1.0));
//! builder.close();
//!
//! // Generate the actual path object.
//! let path = builder.build();
//!
//! for sub_path in path.sub_paths() {
//!     for p in sub_path.flattened() {
//!         println!("{:?}", p);
//!     }
//! }
//! # }
//! ```
//!

pub use pathmesh_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
pub mod glyph;
pub mod path;
pub mod sub_path;

#[doc(inline)]
pub use crate::builder::PathBuilder;
#[doc(inline)]
pub use crate::glyph::Glyph;
#[doc(inline)]
pub use crate::path::Path;
#[doc(inline)]
pub use crate::sub_path::SubPath;

pub mod math {
    //! f32 version of the pathmesh_geom types used everywhere. Most other pathmesh crates
    //! reexport them.

    use crate::geom::euclid;

    /// Alias for ```euclid::default::Point2D<f32>```.
    pub type Point = euclid::default::Point2D<f32>;

    /// Alias for ```euclid::default::Vector2D<f32>```.
    pub type Vector = euclid::default::Vector2D<f32>;

    /// Alias for ```euclid::default::Box2D<f32>```
    pub type Box2D = euclid::default::Box2D<f32>;

    /// Alias for ```euclid::default::Rotation2D<f32>```
    pub type Rotation = euclid::default::Rotation2D<f32>;

    /// An angle in radians (f32).
    pub type Angle = euclid::Angle<f32>;

    /// Shorthand for `Vector::new(x, y)`.
    #[inline]
    pub fn vector(x: f32, y: f32) -> Vector {
        Vector::new(x, y)
    }

    /// Shorthand for `Point::new(x, y)`.
    #[inline]
    pub fn point(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }
}

/// Line cap as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinecapProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineCap {
    /// The stroke for each sub-path does not extend beyond its two endpoints.
    /// A zero length sub-path will therefore not have any stroke.
    Butt,
    /// At the end of each sub-path, the shape representing the stroke will be
    /// extended by a rectangle with the same width as the stroke width and
    /// whose length is half of the stroke width.
    Square,
    /// At each end of each sub-path, the shape representing the stroke will be extended
    /// by a half circle with a radius equal to half of the stroke width.
    Round,
}

/// Line join as defined by the SVG specification.
///
/// See: <https://svgwg.org/specs/strokes/#StrokeLinejoinProperty>
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LineJoin {
    /// A sharp corner is to be used to join path segments, unless the turn is
    /// sharper than the miter cutoff angle.
    Miter,
    /// A round corner is to be used to join path segments.
    Round,
    /// A beveled corner is to be used to join path segments.
    /// The bevel shape is a triangle that fills the area between the two stroked
    /// segments.
    Bevel,
}
