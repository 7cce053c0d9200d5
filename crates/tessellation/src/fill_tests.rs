use crate::geometry_builder::*;
use crate::math::*;
use crate::path::{Path, PathBuilder};
use crate::{
    FillOptions, FillTessellator, FillVertex, InputWinding, TessellationError,
    UnsupportedParameter, VertexId,
};

use core::f32::consts::PI;

fn tessellate(path: &Path, log: bool) -> Result<VertexBuffers<Point, u16>, TessellationError> {
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    {
        let mut vertex_builder = simple_builder(&mut buffers);
        let mut tess = FillTessellator::new();
        tess.set_logging(log);
        tess.tessellate_path(path, &FillOptions::default(), &mut vertex_builder)?;
    }
    Ok(buffers)
}

fn polygon(points: &[Point]) -> Path {
    let mut builder = PathBuilder::new();
    builder.move_to(points[0]);
    for &p in &points[1..] {
        builder.line_to(p);
    }
    builder.close();
    builder.build()
}

fn total_area(buffers: &VertexBuffers<Point, u16>) -> f32 {
    let mut area = 0.0;
    for tri in buffers.indices.chunks(3) {
        let a = buffers.vertices[tri[0] as usize];
        let b = buffers.vertices[tri[1] as usize];
        let c = buffers.vertices[tri[2] as usize];
        area += (b - a).cross(c - a) * 0.5;
    }
    area
}

fn check_triangles(buffers: &VertexBuffers<Point, u16>) {
    assert_eq!(buffers.indices.len() % 3, 0);
    for tri in buffers.indices.chunks(3) {
        for &idx in tri {
            assert!((idx as usize) < buffers.vertices.len());
        }
        assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);

        let a = buffers.vertices[tri[0] as usize];
        let b = buffers.vertices[tri[1] as usize];
        let c = buffers.vertices[tri[2] as usize];
        assert!((b - a).cross(c - a) >= 0.0, "clockwise triangle {:?}", tri);
    }
}

#[test]
fn unit_square() {
    let path = polygon(&[
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ]);
    let buffers = tessellate(&path, false).unwrap();

    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 6);
    check_triangles(&buffers);
    assert_eq!(total_area(&buffers), 1.0);
}

#[test]
fn clockwise_square() {
    let path = polygon(&[
        point(0.0, 0.0),
        point(0.0, 1.0),
        point(1.0, 1.0),
        point(1.0, 0.0),
    ]);
    let buffers = tessellate(&path, false).unwrap();

    assert_eq!(buffers.indices.len(), 6);
    check_triangles(&buffers);
    assert_eq!(total_area(&buffers), 1.0);
}

#[test]
fn split_and_merge_vertices() {
    let path = polygon(&[
        point(0.0, 0.0),
        point(2.0, 1.0),
        point(4.0, 0.0),
        point(4.0, 4.0),
        point(2.0, 3.0),
        point(0.0, 4.0),
    ]);
    let buffers = tessellate(&path, false).unwrap();

    assert_eq!(buffers.vertices.len(), 6);
    assert_eq!(buffers.triangle_count(), 4);
    check_triangles(&buffers);
    assert_eq!(total_area(&buffers), 12.0);
}

#[test]
fn square_with_a_hole() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.line_to(point(10.0, 10.0));
    builder.line_to(point(0.0, 10.0));
    builder.close();
    builder.move_to(point(3.0, 3.0));
    builder.line_to(point(3.0, 7.0));
    builder.line_to(point(7.0, 7.0));
    builder.line_to(point(7.0, 3.0));
    builder.close();

    let buffers = tessellate(&builder.build(), false).unwrap();
    assert_eq!(buffers.triangle_count(), 8);
    check_triangles(&buffers);
    assert_eq!(total_area(&buffers), 84.0);
}

#[test]
fn simple_polygons_have_n_minus_2_triangles() {
    let shapes: Vec<Vec<Point>> = vec![
        // Comb with teeth pointing down, pointing up.
        vec![
            point(0.0, 0.0),
            point(1.0, 2.0),
            point(2.0, 0.0),
            point(3.0, 2.0),
            point(4.0, 0.0),
            point(4.0, 4.0),
            point(0.0, 4.0),
        ],
        vec![
            point(0.0, 0.0),
            point(4.0, 0.0),
            point(4.0, 4.0),
            point(3.0, 2.0),
            point(2.0, 4.0),
            point(1.0, 2.0),
            point(0.0, 4.0),
        ],
        // L shape.
        vec![
            point(0.0, 0.0),
            point(3.0, 0.0),
            point(3.0, 1.0),
            point(1.0, 1.0),
            point(1.0, 3.0),
            point(0.0, 3.0),
        ],
        // Triangle.
        vec![point(0.0, 0.0), point(1.0, 0.0), point(0.0, 1.0)],
    ];

    for points in &shapes {
        let buffers = tessellate(&polygon(points), false).unwrap();
        assert_eq!(buffers.vertices.len(), points.len());
        assert_eq!(buffers.triangle_count(), points.len() - 2, "{:?}", points);
        check_triangles(&buffers);
    }
}

#[test]
fn convex_polygon() {
    let n = 24;
    let points: Vec<Point> = (0..n)
        .map(|i| {
            let angle = i as f32 * 2.0 * PI / n as f32;
            point(angle.cos() * 10.0, angle.sin() * 10.0)
        })
        .collect();
    let buffers = tessellate(&polygon(&points), false).unwrap();

    assert_eq!(buffers.triangle_count(), n - 2);
    check_triangles(&buffers);
}

#[test]
fn curves() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(10.0, 0.0));
    builder.quadratic_bezier_to(point(15.0, 5.0), point(10.0, 10.0));
    builder.cubic_bezier_to(point(7.0, 13.0), point(3.0, 13.0), point(0.0, 10.0));
    builder.close();
    let path = builder.build();

    let buffers = tessellate(&path, true).unwrap();
    let flattened = path.sub_paths()[0].flattened().count();
    assert_eq!(buffers.vertices.len(), flattened);
    assert_eq!(buffers.triangle_count(), flattened - 2);
    check_triangles(&buffers);
}

#[test]
fn duplicated_points() {
    let path = polygon(&[
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
        point(0.0, 0.0),
    ]);
    let buffers = tessellate(&path, false).unwrap();

    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.triangle_count(), 2);
}

#[test]
fn empty_and_degenerate_paths() {
    let buffers = tessellate(&Path::new(), false).unwrap();
    assert!(buffers.vertices.is_empty());
    assert!(buffers.indices.is_empty());

    // A move_to alone, then a line.
    let mut builder = PathBuilder::new();
    builder.move_to(point(1.0, 1.0));
    builder.move_to(point(2.0, 2.0));
    builder.line_to(point(3.0, 3.0));
    let buffers = tessellate(&builder.build(), false).unwrap();
    assert!(buffers.vertices.is_empty());
    assert!(buffers.indices.is_empty());
}

#[test]
fn nan_position() {
    let path = polygon(&[
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(f32::NAN, 1.0),
        point(0.0, 1.0),
    ]);
    let mut output = NoOutput::new();
    let result = FillTessellator::new().tessellate_path(&path, &FillOptions::default(), &mut output);

    assert_eq!(
        result,
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::PositionIsNaN
        ))
    );
    assert_eq!(output.vertex_count(), 0);
}

#[test]
fn forced_winding() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ];
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    let options = FillOptions::default().with_input_winding(InputWinding::CounterClockwise);
    FillTessellator::new()
        .tessellate_polygon(&[&points[..]], &options, &mut simple_builder(&mut buffers))
        .unwrap();
    assert_eq!(buffers.triangle_count(), 2);
    check_triangles(&buffers);
}

#[test]
fn sink_out_of_vertex_ids() {
    struct Builder {
        max_vertices: u32,
        aborted: bool,
    }
    impl GeometryBuilder for Builder {
        fn add_triangle(&mut self, _a: VertexId, _b: VertexId, _c: VertexId) {}
        fn abort_geometry(&mut self) {
            self.aborted = true;
        }
    }

    impl FillGeometryBuilder for Builder {
        fn add_fill_vertex(&mut self, _: FillVertex) -> Result<VertexId, GeometryBuilderError> {
            if self.max_vertices == 0 {
                return Err(GeometryBuilderError::TooManyVertices);
            }
            self.max_vertices -= 1;
            Ok(VertexId(self.max_vertices))
        }
    }

    let path = polygon(&[
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ]);
    let mut output = Builder {
        max_vertices: 3,
        aborted: false,
    };
    let result = FillTessellator::new().tessellate_path(&path, &FillOptions::default(), &mut output);

    assert_eq!(
        result,
        Err(TessellationError::GeometryBuilder(
            GeometryBuilderError::TooManyVertices
        ))
    );
    assert!(output.aborted);
}

#[test]
fn abort_keeps_previous_geometry() {
    let square = polygon(&[
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ]);
    let mut buffers: VertexBuffers<Point, u8> = VertexBuffers::new();
    let mut tess = FillTessellator::new();
    tess.tessellate_path(&square, &FillOptions::default(), &mut BuffersBuilder::new(&mut buffers, Positions))
        .unwrap();
    assert_eq!(buffers.vertices.len(), 4);

    // Too many vertices for u8 indices.
    let points: Vec<Point> = (0..300)
        .map(|i| {
            let angle = i as f32 * 2.0 * PI / 300.0;
            point(angle.cos() * 100.0, angle.sin() * 100.0)
        })
        .collect();
    let result = tess.tessellate_path(
        &polygon(&points),
        &FillOptions::default(),
        &mut BuffersBuilder::new(&mut buffers, Positions),
    );
    assert!(result.is_err());
    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 6);
}

#[test]
fn curve_without_move_to() {
    let mut builder = PathBuilder::new();
    builder.quadratic_bezier_to(point(5.0, 10.0), point(10.0, 0.0));
    builder.close();
    let path = builder.build();

    let buffers = tessellate(&path, false).unwrap();
    let flattened = path.sub_paths()[0].flattened().count();
    assert_eq!(buffers.vertices[0], point(0.0, 0.0));
    assert_eq!(buffers.triangle_count(), flattened - 2);
    check_triangles(&buffers);
}
