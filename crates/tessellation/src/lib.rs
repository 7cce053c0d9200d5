#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]

//! Tessellation of 2D fill and stroke operations.
//!
//! This crate is reexported in [pathmesh](https://docs.rs/pathmesh/).
//!
//! ## Overview
//!
//! The most interesting types and traits of this crate are:
//!
//! * [FillTessellator](struct.FillTessellator.html) - Triangulates the interior of a set of
//!   closed loops.
//! * [StrokeTessellator](struct.StrokeTessellator.html) - Builds the outline of a path with
//!   caps and joins and triangulates it.
//! * [ShapeGenerator](struct.ShapeGenerator.html) - An editing session owning a path builder
//!   and both tessellators.
//! * [`GeometryBuilder`](geometry_builder/trait.GeometryBuilder.html) - (See the documentation of the
//!   [geometry_builder module](geometry_builder/index.html)) which the above are built on. This trait
//!   provides an interface for types that help with building and assembling the vertices and triangles that
//!   form the tessellation, usually in the form of arbitrary vertex and index buffers.
//!
//! ## The fill pipeline
//!
//! Each sub-path is flattened into a loop of points. The loops are linked into a
//! [half-edge network](half_edge/index.html) which is split into y-monotone polygons
//! by a sweep line going from top to bottom (y pointing up). Each
//! [monotone polygon](monotone/index.html) is then triangulated with a stack of
//! pending vertices. For a simple polygon with `n` vertices this always produces `n - 2`
//! triangles, and no vertex is added to the input points.
//!
//! ## The stroke pipeline
//!
//! Each flattened sub-path is walked segment by segment. Both sides of the stroke are
//! offset by half of the line width, joins are added on the outer side of turns and
//! the inner side is trimmed where it crosses itself. Both sides are then stitched
//! together into a triangle strip.
//!
//! ## Examples
//!
//! ```
//! # extern crate pathmesh_tessellation as tess;
//! # use tess::path::PathBuilder;
//! # use tess::math::*;
//! # use tess::geometry_builder::{VertexBuffers, simple_builder};
//! # use tess::*;
//! # fn main() {
//! let mut builder = PathBuilder::new();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(1.0, 0.0));
//! builder.line_to(point(1.0, 1.0));
//! builder.line_to(point(0.0, 1.0));
//! builder.close();
//! let path = builder.build();
//!
//! let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
//! let mut tessellator = FillTessellator::new();
//! tessellator.tessellate_path(
//!     &path,
//!     &FillOptions::default(),
//!     &mut simple_builder(&mut buffers),
//! ).unwrap();
//!
//! assert_eq!(buffers.vertices.len(), 4);
//! assert_eq!(buffers.indices.len(), 6);
//! # }
//! ```

pub use pathmesh_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

macro_rules! tess_log {
    ($obj:ident, $fmt:expr) => (
        if $obj.log {
            log::debug!($fmt);
        }
    );
    ($obj:ident, $fmt:expr, $($arg:tt)*) => (
        if $obj.log {
            log::debug!($fmt, $($arg)*);
        }
    );
}

pub mod debugger;
mod error;
mod fill;
pub mod geometry_builder;
pub mod half_edge;
mod half_outline;
pub mod monotone;
mod shape_generator;
mod stroke;

#[cfg(test)]
mod fill_tests;

pub use crate::path::math;

pub use crate::path::geom;

#[doc(inline)]
pub use crate::fill::*;

#[doc(inline)]
pub use crate::stroke::*;

#[doc(inline)]
pub use crate::shape_generator::ShapeGenerator;

#[doc(inline)]
pub use crate::geometry_builder::{
    BuffersBuilder, FillGeometryBuilder, FillVertexConstructor, GeometryBuilder,
    GeometryBuilderError, StrokeGeometryBuilder, StrokeVertexConstructor, VertexBuffers,
};

#[doc(inline)]
pub use crate::error::*;

pub use crate::path::{LineCap, LineJoin};

use core::f32::consts::PI;
use core::ops::{Add, Sub};

/// The side of a stroke, relative to the direction of the path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn is_left(self) -> bool {
        self == Side::Left
    }

    pub fn is_right(self) -> bool {
        self == Side::Right
    }

    /// `1.0` on the left, `-1.0` on the right: the factor applied to the left-hand normal
    /// of the path to reach this side.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    /// The value of the side vertex attribute: `0.0` on the left, `1.0` on the right.
    #[inline]
    pub fn attribute(self) -> f32 {
        match self {
            Side::Left => 0.0,
            Side::Right => 1.0,
        }
    }
}

/// Parameters for the stroke tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct StrokeOptions {
    /// What cap to use at the start of each open sub-path.
    ///
    /// Default value: `LineCap::Butt`.
    pub start_cap: LineCap,

    /// What cap to use at the end of each open sub-path.
    ///
    /// Default value: `LineCap::Butt`.
    pub end_cap: LineCap,

    /// See the SVG specification.
    ///
    /// Default value: `LineJoin::Miter`.
    pub line_join: LineJoin,

    /// Line width
    ///
    /// Default value: `StrokeOptions::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// The sharpest turn, in radians, that still gets a miter point.
    ///
    /// Sharper turns fall back to a bevel. Must be in `[0, π]`.
    /// Default value: `StrokeOptions::DEFAULT_MITER_CUTOFF` (120 degrees).
    pub miter_cutoff: f32,
}

impl StrokeOptions {
    pub const DEFAULT_LINE_CAP: LineCap = LineCap::Butt;
    pub const DEFAULT_LINE_JOIN: LineJoin = LineJoin::Miter;
    pub const DEFAULT_LINE_WIDTH: f32 = 1.0;
    pub const DEFAULT_MITER_CUTOFF: f32 = PI * 2.0 / 3.0;

    pub const DEFAULT: Self = StrokeOptions {
        start_cap: Self::DEFAULT_LINE_CAP,
        end_cap: Self::DEFAULT_LINE_CAP,
        line_join: Self::DEFAULT_LINE_JOIN,
        line_width: Self::DEFAULT_LINE_WIDTH,
        miter_cutoff: Self::DEFAULT_MITER_CUTOFF,
    };

    #[inline]
    pub fn line_width(width: f32) -> Self {
        Self::DEFAULT.with_line_width(width)
    }

    #[inline]
    pub const fn with_line_cap(mut self, cap: LineCap) -> Self {
        self.start_cap = cap;
        self.end_cap = cap;
        self
    }

    #[inline]
    pub const fn with_start_cap(mut self, cap: LineCap) -> Self {
        self.start_cap = cap;
        self
    }

    #[inline]
    pub const fn with_end_cap(mut self, cap: LineCap) -> Self {
        self.end_cap = cap;
        self
    }

    #[inline]
    pub const fn with_line_join(mut self, join: LineJoin) -> Self {
        self.line_join = join;
        self
    }

    #[inline]
    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub fn with_miter_cutoff(mut self, radians: f32) -> Self {
        assert!((0.0..=PI).contains(&radians));
        self.miter_cutoff = radians;
        self
    }

    #[inline]
    pub fn with_miter_cutoff_degrees(self, degrees: f32) -> Self {
        self.with_miter_cutoff(degrees.to_radians())
    }

    /// Half of the line width, the distance between the path and each side of the stroke.
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.line_width * 0.5
    }
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How the fill tessellator decides the orientation of its input loops.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum InputWinding {
    /// Sum the signed area of all loops and follow the sign.
    Detect,
    /// The outer loops are counter-clockwise (y up), holes are clockwise.
    CounterClockwise,
    /// The outer loops are clockwise (y up), holes are counter-clockwise.
    Clockwise,
}

/// Parameters for the fill tessellator.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct FillOptions {
    /// Default value: `InputWinding::Detect`.
    pub input_winding: InputWinding,
}

impl FillOptions {
    pub const DEFAULT_INPUT_WINDING: InputWinding = InputWinding::Detect;

    pub const DEFAULT: Self = FillOptions {
        input_winding: Self::DEFAULT_INPUT_WINDING,
    };

    #[inline]
    pub const fn with_input_winding(mut self, winding: InputWinding) -> Self {
        self.input_winding = winding;
        self
    }
}

impl Default for FillOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

type Index = u32;

/// A virtual vertex offset in a geometry.
///
/// The `VertexId`s are only valid between `GeometryBuilder::begin_geometry` and
/// `GeometryBuilder::end_geometry`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexId(pub Index);

impl VertexId {
    pub const INVALID: VertexId = VertexId(u32::MAX);

    pub fn offset(self) -> Index {
        self.0
    }

    pub fn to_usize(self) -> usize {
        self.0 as usize
    }

    pub fn from_usize(v: usize) -> Self {
        VertexId(v as Index)
    }
}

impl Add<u32> for VertexId {
    type Output = Self;
    fn add(self, rhs: u32) -> Self {
        VertexId(self.0 + rhs)
    }
}

impl Sub<u32> for VertexId {
    type Output = Self;
    fn sub(self, rhs: u32) -> Self {
        VertexId(self.0 - rhs)
    }
}

impl From<u16> for VertexId {
    fn from(v: u16) -> Self {
        VertexId(v as Index)
    }
}

impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        VertexId(v)
    }
}

impl From<VertexId> for u16 {
    fn from(v: VertexId) -> Self {
        v.0 as u16
    }
}

impl From<VertexId> for u32 {
    fn from(v: VertexId) -> Self {
        v.0
    }
}

impl From<VertexId> for usize {
    fn from(v: VertexId) -> Self {
        v.0 as usize
    }
}

#[test]
fn test_default_miter_cutoff() {
    let stroke_options = StrokeOptions::default();

    assert!((stroke_options.miter_cutoff - 120.0f32.to_radians()).abs() < 1e-6);
}

#[test]
fn test_with_miter_cutoff_degrees() {
    let stroke_options = StrokeOptions::default().with_miter_cutoff_degrees(90.0);

    assert!((stroke_options.miter_cutoff - PI * 0.5).abs() < 1e-6);
}

#[test]
#[should_panic]
fn test_with_invalid_miter_cutoff() {
    let _ = StrokeOptions::default().with_miter_cutoff(-1.0);
}

#[test]
fn test_side_values() {
    assert_eq!(Side::Left.sign(), 1.0);
    assert_eq!(Side::Right.sign(), -1.0);
    assert_eq!(Side::Left.attribute(), 0.0);
    assert_eq!(Side::Right.attribute(), 1.0);
    assert_eq!(Side::Left.opposite(), Side::Right);
}
