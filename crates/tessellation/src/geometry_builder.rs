//! Tools to help with generating vertex and index buffers.
//!
//! ## Overview
//!
//! The tessellators do not write vertices and indices directly. They talk to a mesh sink
//! through the following traits:
//!
//! * [`GeometryBuilder`](trait.GeometryBuilder.html) receives the triangles and brackets each
//!   build with `begin_geometry` and `end_geometry` (or `abort_geometry`).
//! * [`FillGeometryBuilder`](trait.FillGeometryBuilder.html) receives the vertices of the fill
//!   tessellator, which only carry a position.
//! * [`StrokeGeometryBuilder`](trait.StrokeGeometryBuilder.html) receives the vertices of the
//!   stroke tessellator: position, unit tangent, normalized arc length and side.
//!
//! A build either completes or is aborted before anything reaches the sink: the
//! tessellators compute the whole mesh first and only then emit it, calling
//! `abort_geometry` if the sink itself fails half way.
//!
//! It is very common to push vertices and indices into a pair of vectors, so this module
//! also provides:
//!
//! * [`VertexBuffers`](struct.VertexBuffers.html), a pair of vectors of vertices and indices.
//! * [`BuffersBuilder`](struct.BuffersBuilder.html), which writes into a `VertexBuffers` and
//!   delegates the creation of each output vertex to a vertex constructor: the
//!   [`FillVertexConstructor`](trait.FillVertexConstructor.html) and
//!   [`StrokeVertexConstructor`](trait.StrokeVertexConstructor.html) traits decide the
//!   attribute layout of the output vertices.
//!
//! ## Examples
//!
//! ### Generating custom vertices
//!
//! ```
//! extern crate pathmesh_tessellation as tess;
//! use tess::{StrokeVertexConstructor, VertexBuffers, BuffersBuilder, StrokeOptions};
//! use tess::{StrokeTessellator, StrokeVertex};
//! use tess::path::PathBuilder;
//! use tess::math::point;
//!
//! // Our custom vertex.
//! #[derive(Copy, Clone, Debug)]
//! pub struct MyVertex {
//!   position: [f32; 2],
//!   trip: f32,
//! }
//!
//! struct WithTrip;
//!
//! impl StrokeVertexConstructor<MyVertex> for WithTrip {
//!     fn new_vertex(&mut self, vertex: StrokeVertex) -> MyVertex {
//!         MyVertex {
//!             position: vertex.position().to_array(),
//!             trip: vertex.trip(),
//!         }
//!     }
//! }
//!
//! fn main() {
//!     let mut builder = PathBuilder::new();
//!     builder.move_to(point(0.0, 0.0));
//!     builder.line_to(point(10.0, 0.0));
//!     let path = builder.build();
//!
//!     let mut output: VertexBuffers<MyVertex, u16> = VertexBuffers::new();
//!     let mut tessellator = StrokeTessellator::new();
//!     tessellator.tessellate_path(
//!         &path,
//!         &StrokeOptions::line_width(2.0),
//!         &mut BuffersBuilder::new(&mut output, WithTrip),
//!     ).unwrap();
//!
//!     assert_eq!(output.vertices.len(), 4);
//!     assert_eq!(output.indices.len(), 6);
//! }
//! ```
//!
//! ### Generating a completely custom output
//!
//! ```
//! extern crate pathmesh_tessellation as tess;
//! use tess::{FillTessellator, GeometryBuilder, FillGeometryBuilder, FillOptions};
//! use tess::{GeometryBuilderError, FillVertex, VertexId};
//! use tess::path::PathBuilder;
//! use tess::math::point;
//!
//! // A geometry builder that only counts what it receives.
//! pub struct Counter {
//!     vertices: u32,
//!     triangles: u32,
//! }
//!
//! impl GeometryBuilder for Counter {
//!     fn begin_geometry(&mut self) {
//!         self.vertices = 0;
//!         self.triangles = 0;
//!     }
//!
//!     fn add_triangle(&mut self, _a: VertexId, _b: VertexId, _c: VertexId) {
//!         self.triangles += 1;
//!     }
//! }
//!
//! impl FillGeometryBuilder for Counter {
//!     fn add_fill_vertex(&mut self, _vertex: FillVertex) -> Result<VertexId, GeometryBuilderError> {
//!         self.vertices += 1;
//!         Ok(VertexId(self.vertices - 1))
//!     }
//! }
//!
//! fn main() {
//!     let mut builder = PathBuilder::new();
//!     builder.move_to(point(0.0, 0.0));
//!     builder.line_to(point(10.0, 0.0));
//!     builder.line_to(point(5.0, 5.0));
//!     builder.close();
//!
//!     let mut output = Counter { vertices: 0, triangles: 0 };
//!     FillTessellator::new().tessellate_path(
//!         &builder.build(),
//!         &FillOptions::default(),
//!         &mut output,
//!     ).unwrap();
//!
//!     assert_eq!(output.triangles, 1);
//! }
//! ```
//!

pub use crate::error::GeometryBuilderError;
use crate::math::Point;
use crate::{FillVertex, Index, StrokeVertex, VertexId};

use core::ops::Add;

/// An interface separating tessellators and other geometry generation algorithms from the
/// actual vertex construction.
///
/// Depending on which tessellator a geometry builder interfaces with, it also has to
/// implement one or both of the following traits:
///  - [`FillGeometryBuilder`](trait.FillGeometryBuilder.html)
///  - [`StrokeGeometryBuilder`](trait.StrokeGeometryBuilder.html)
pub trait GeometryBuilder {
    /// Called at the beginning of a generation.
    ///
    /// end_geometry must be called before begin_geometry is called again.
    fn begin_geometry(&mut self) {}

    /// Called at the end of a generation.
    fn end_geometry(&mut self) {}

    /// Insert a triangle made of vertices that were added after the last call to begin_geometry.
    ///
    /// This method can only be called between begin_geometry and end_geometry.
    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId);

    /// Called instead of end_geometry if an error occurred while producing the geometry.
    ///
    /// The implementation is expected to discard the geometry that was generated since the last
    /// time begin_geometry was called, and to remain in a usable state.
    fn abort_geometry(&mut self) {}
}

/// A Geometry builder to interface with the [`FillTessellator`](../struct.FillTessellator.html).
pub trait FillGeometryBuilder: GeometryBuilder {
    /// Inserts a vertex and returns an id that is only valid between begin_geometry and
    /// end_geometry.
    fn add_fill_vertex(&mut self, vertex: FillVertex) -> Result<VertexId, GeometryBuilderError>;
}

/// A Geometry builder to interface with the [`StrokeTessellator`](../struct.StrokeTessellator.html).
pub trait StrokeGeometryBuilder: GeometryBuilder {
    /// Inserts a vertex and returns an id that is only valid between begin_geometry and
    /// end_geometry.
    fn add_stroke_vertex(&mut self, vertex: StrokeVertex)
        -> Result<VertexId, GeometryBuilderError>;
}

/// Structure that holds the vertex and index data.
///
/// Usually written into though temporary `BuffersBuilder` objects.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexBuffers<OutputVertex, OutputIndex> {
    pub vertices: Vec<OutputVertex>,
    pub indices: Vec<OutputIndex>,
}

impl<OutputVertex, OutputIndex> VertexBuffers<OutputVertex, OutputIndex> {
    pub fn new() -> Self {
        VertexBuffers::with_capacity(512, 1024)
    }

    pub fn with_capacity(num_vertices: usize, num_indices: usize) -> Self {
        VertexBuffers {
            vertices: Vec::with_capacity(num_vertices),
            indices: Vec::with_capacity(num_indices),
        }
    }

    /// Empty the buffers without freeing memory, for reuse without reallocation.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// The number of triangles, assuming the indices form a triangle list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A temporary view on a `VertexBuffers` object which facilitate the population of vertex and
/// index data.
///
/// Vertex ids handed to the tessellators are absolute offsets in the vertex buffer, so
/// geometry can be appended to buffers that already contain some. The optional vertex
/// offset is added to every index written, for buffers that end up concatenated after
/// other vertex data.
pub struct BuffersBuilder<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor> {
    buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>,
    first_vertex: Index,
    first_index: Index,
    vertex_offset: Index,
    vertex_constructor: Ctor,
}

impl<'l, OutputVertex: 'l, OutputIndex: 'l, Ctor>
    BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
{
    pub fn new(buffers: &'l mut VertexBuffers<OutputVertex, OutputIndex>, ctor: Ctor) -> Self {
        let first_vertex = buffers.vertices.len() as Index;
        let first_index = buffers.indices.len() as Index;
        BuffersBuilder {
            buffers,
            first_vertex,
            first_index,
            vertex_offset: 0,
            vertex_constructor: ctor,
        }
    }

    pub fn with_vertex_offset(mut self, offset: Index) -> Self {
        self.vertex_offset = offset;

        self
    }

    pub fn buffers<'a, 'b: 'a>(&'b self) -> &'a VertexBuffers<OutputVertex, OutputIndex> {
        self.buffers
    }
}

/// A trait specifying how to create vertex values.
pub trait FillVertexConstructor<OutputVertex> {
    fn new_vertex(&mut self, vertex: FillVertex) -> OutputVertex;
}

/// A trait specifying how to create vertex values.
pub trait StrokeVertexConstructor<OutputVertex> {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> OutputVertex;
}

/// A simple vertex constructor that just takes the position.
pub struct Positions;

impl FillVertexConstructor<Point> for Positions {
    fn new_vertex(&mut self, vertex: FillVertex) -> Point {
        vertex.position()
    }
}

impl StrokeVertexConstructor<Point> for Positions {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> Point {
        vertex.position()
    }
}

/// Packs every stroke attribute in a flat array:
/// `[x, y, tangent_x, tangent_y, trip, side]`.
pub struct StrokeAttributes;

impl StrokeAttributes {
    pub const POSITION: usize = 0;
    pub const TANGENT: usize = 2;
    pub const TRIP: usize = 4;
    pub const SIDE: usize = 5;
    pub const COUNT: usize = 6;
}

impl StrokeVertexConstructor<[f32; 6]> for StrokeAttributes {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> [f32; 6] {
        let p = vertex.position();
        let t = vertex.tangent();
        [p.x, p.y, t.x, t.y, vertex.trip(), vertex.side().attribute()]
    }
}

impl<F, OutputVertex> FillVertexConstructor<OutputVertex> for F
where
    F: Fn(FillVertex) -> OutputVertex,
{
    fn new_vertex(&mut self, vertex: FillVertex) -> OutputVertex {
        self(vertex)
    }
}

impl<F, OutputVertex> StrokeVertexConstructor<OutputVertex> for F
where
    F: Fn(StrokeVertex) -> OutputVertex,
{
    fn new_vertex(&mut self, vertex: StrokeVertex) -> OutputVertex {
        self(vertex)
    }
}

/// A `BuffersBuilder` that takes the actual vertex type as input.
pub type SimpleBuffersBuilder<'l> = BuffersBuilder<'l, Point, u16, Positions>;

/// Creates a `SimpleBuffersBuilder`.
pub fn simple_builder(buffers: &mut VertexBuffers<Point, u16>) -> SimpleBuffersBuilder<'_> {
    BuffersBuilder::new(buffers, Positions)
}

impl<'l, OutputVertex, OutputIndex, Ctor> BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: MaxIndex,
{
    fn push_vertex(&mut self, vertex: OutputVertex) -> Result<VertexId, GeometryBuilderError> {
        let len = self.buffers.vertices.len() + self.vertex_offset as usize;
        if len >= OutputIndex::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.buffers.vertices.push(vertex);
        Ok(VertexId((self.buffers.vertices.len() - 1) as Index))
    }
}

impl<'l, OutputVertex, OutputIndex, Ctor> GeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
{
    fn begin_geometry(&mut self) {
        self.first_vertex = self.buffers.vertices.len() as Index;
        self.first_index = self.buffers.indices.len() as Index;
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
        debug_assert!(a != VertexId::INVALID);
        debug_assert!(b != VertexId::INVALID);
        debug_assert!(c != VertexId::INVALID);
        self.buffers.indices.push((a + self.vertex_offset).into());
        self.buffers.indices.push((b + self.vertex_offset).into());
        self.buffers.indices.push((c + self.vertex_offset).into());
    }

    fn abort_geometry(&mut self) {
        self.buffers.vertices.truncate(self.first_vertex as usize);
        self.buffers.indices.truncate(self.first_index as usize);
    }
}

impl<'l, OutputVertex, OutputIndex, Ctor> FillGeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
    Ctor: FillVertexConstructor<OutputVertex>,
{
    fn add_fill_vertex(&mut self, vertex: FillVertex) -> Result<VertexId, GeometryBuilderError> {
        let v = self.vertex_constructor.new_vertex(vertex);
        self.push_vertex(v)
    }
}

impl<'l, OutputVertex, OutputIndex, Ctor> StrokeGeometryBuilder
    for BuffersBuilder<'l, OutputVertex, OutputIndex, Ctor>
where
    OutputVertex: 'l,
    OutputIndex: Add + From<VertexId> + MaxIndex,
    Ctor: StrokeVertexConstructor<OutputVertex>,
{
    fn add_stroke_vertex(&mut self, v: StrokeVertex) -> Result<VertexId, GeometryBuilderError> {
        let v = self.vertex_constructor.new_vertex(v);
        self.push_vertex(v)
    }
}

/// A geometry builder that does not output any geometry.
///
/// Mostly useful for testing and counting.
pub struct NoOutput {
    next_vertex: u32,
    triangles: u32,
}

impl NoOutput {
    pub fn new() -> Self {
        NoOutput {
            next_vertex: 0,
            triangles: 0,
        }
    }

    /// Vertices received since the last `begin_geometry`.
    pub fn vertex_count(&self) -> u32 {
        self.next_vertex
    }

    /// Triangles received since the last `begin_geometry`.
    pub fn triangle_count(&self) -> u32 {
        self.triangles
    }

    fn next_id(&mut self) -> Result<VertexId, GeometryBuilderError> {
        if self.next_vertex == u32::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.next_vertex += 1;
        Ok(VertexId(self.next_vertex - 1))
    }
}

impl Default for NoOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryBuilder for NoOutput {
    fn begin_geometry(&mut self) {
        self.next_vertex = 0;
        self.triangles = 0;
    }

    fn add_triangle(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        debug_assert!(a != b);
        debug_assert!(a != c);
        debug_assert!(b != c);
        self.triangles += 1;
    }

    fn abort_geometry(&mut self) {
        self.begin_geometry();
    }
}

impl FillGeometryBuilder for NoOutput {
    fn add_fill_vertex(&mut self, _vertex: FillVertex) -> Result<VertexId, GeometryBuilderError> {
        self.next_id()
    }
}

impl StrokeGeometryBuilder for NoOutput {
    fn add_stroke_vertex(&mut self, _: StrokeVertex) -> Result<VertexId, GeometryBuilderError> {
        self.next_id()
    }
}

/// Provides the maximum value of an index.
///
/// This should be the maximum value representable by the index type up
/// to u32::MAX because the tessellators can't internally represent more
/// than u32::MAX indices.
pub trait MaxIndex {
    const MAX: usize;
}

impl MaxIndex for u8 {
    const MAX: usize = u8::MAX as usize;
}
impl MaxIndex for u16 {
    const MAX: usize = u16::MAX as usize;
}
impl MaxIndex for u32 {
    const MAX: usize = u32::MAX as usize;
}
impl MaxIndex for usize {
    const MAX: usize = u32::MAX as usize;
}

impl From<VertexId> for u8 {
    fn from(v: VertexId) -> Self {
        v.0 as u8
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn abort_discards_the_current_geometry() {
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    buffers.vertices.push(point(-1.0, -1.0));

    let mut builder = simple_builder(&mut buffers);
    builder.begin_geometry();
    let a = builder.add_fill_vertex(FillVertex::new(point(0.0, 0.0))).unwrap();
    let b = builder.add_fill_vertex(FillVertex::new(point(1.0, 0.0))).unwrap();
    let c = builder.add_fill_vertex(FillVertex::new(point(1.0, 1.0))).unwrap();
    assert_eq!((a, b, c), (VertexId(1), VertexId(2), VertexId(3)));
    builder.add_triangle(a, b, c);
    builder.abort_geometry();

    assert_eq!(buffers.vertices, vec![point(-1.0, -1.0)]);
    assert!(buffers.indices.is_empty());
}

#[test]
fn vertex_offset_applies_to_indices() {
    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    {
        let mut builder = BuffersBuilder::new(&mut buffers, Positions).with_vertex_offset(10);
        builder.begin_geometry();
        let a = builder.add_fill_vertex(FillVertex::new(point(0.0, 0.0))).unwrap();
        let b = builder.add_fill_vertex(FillVertex::new(point(1.0, 0.0))).unwrap();
        let c = builder.add_fill_vertex(FillVertex::new(point(1.0, 1.0))).unwrap();
        builder.add_triangle(a, b, c);
        builder.end_geometry();
    }

    assert_eq!(buffers.indices, vec![10, 11, 12]);
    assert_eq!(buffers.triangle_count(), 1);
}

#[test]
fn index_type_overflow() {
    let mut buffers: VertexBuffers<Point, u8> = VertexBuffers::new();
    let mut builder = BuffersBuilder::new(&mut buffers, Positions);
    builder.begin_geometry();
    for i in 0..255 {
        assert!(builder
            .add_fill_vertex(FillVertex::new(point(i as f32, 0.0)))
            .is_ok());
    }

    assert_eq!(
        builder.add_fill_vertex(FillVertex::new(point(0.0, 1.0))),
        Err(GeometryBuilderError::TooManyVertices)
    );
}
