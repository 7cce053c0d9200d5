#![deny(bare_trait_objects)]

//! 2D paths to triangle meshes.
//!
//! pathmesh builds paths out of lines, circular arcs and bézier curves, flattens
//! them and turns them into triangles, either by filling their interior or by
//! stroking them with caps and joins.
//!
//! This crate is a facade over:
//!
//! * [pathmesh_geom](https://docs.rs/pathmesh_geom/): segments, curve flattening and
//!   orientation predicates,
//! * [pathmesh_path](https://docs.rs/pathmesh_path/): the path builder,
//! * [pathmesh_tessellation](https://docs.rs/pathmesh_tessellation/): the fill and
//!   stroke tessellators.
//!
//! ## Examples
//!
//! ```
//! extern crate pathmesh;
//! use pathmesh::math::{point, Point};
//! use pathmesh::path::PathBuilder;
//! use pathmesh::tessellation::geometry_builder::{simple_builder, VertexBuffers};
//! use pathmesh::tessellation::{FillOptions, FillTessellator, StrokeOptions, StrokeTessellator};
//!
//! fn main() {
//!     let mut builder = PathBuilder::new();
//!     builder.move_to(point(0.0, 0.0));
//!     builder.line_to(point(1.0, 0.0));
//!     builder.quadratic_bezier_to(point(2.0, 0.0), point(2.0, 1.0));
//!     builder.cubic_bezier_to(point(1.0, 1.0), point(0.0, 1.0), point(0.0, 0.0));
//!     builder.close();
//!     let path = builder.build();
//!
//!     let mut geometry: VertexBuffers<Point, u16> = VertexBuffers::new();
//!
//!     FillTessellator::new().tessellate_path(
//!         &path,
//!         &FillOptions::default(),
//!         &mut simple_builder(&mut geometry),
//!     ).unwrap();
//!
//!     StrokeTessellator::new().tessellate_path(
//!         &path,
//!         &StrokeOptions::line_width(0.1),
//!         &mut simple_builder(&mut geometry),
//!     ).unwrap();
//!
//!     println!("{} vertices, {} triangles", geometry.vertices.len(), geometry.triangle_count());
//! }
//! ```

pub extern crate pathmesh_tessellation;

pub use pathmesh_tessellation as tessellation;
pub use crate::tessellation::geom;
pub use crate::tessellation::math;
pub use crate::tessellation::path;
