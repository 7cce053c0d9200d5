use crate::geometry_builder::{simple_builder, BuffersBuilder, VertexBuffers};
use crate::math::{Angle, Point, Vector};
use crate::path::{PathBuilder, SubPath};
use crate::{
    FillGeometryBuilder, FillOptions, FillTessellator, StrokeGeometryBuilder, StrokeOptions,
    StrokeTessellator, StrokeVertex, TessellationError, TessellationResult,
};

/// A drawing session: a path being built along with the tessellators to fill or
/// stroke it.
///
/// The `fill_*` and `stroke_*` methods tessellate the current path. The plain
/// versions then clear the path so that the next shape starts from scratch, while
/// the `_preserve` versions keep it, for example to stroke a shape that was just
/// filled.
///
/// # Examples
///
/// ```
/// # extern crate pathmesh_tessellation as tess;
/// # use tess::math::point;
/// # use tess::{ShapeGenerator, StrokeOptions};
/// # fn main() {
/// let mut shapes = ShapeGenerator::new();
/// shapes.move_to(point(0.0, 0.0));
/// shapes.line_to(point(1.0, 0.0));
/// shapes.line_to(point(1.0, 1.0));
/// shapes.line_to(point(0.0, 1.0));
/// shapes.close_path();
///
/// let fill = shapes.fill_simple_preserve().unwrap();
/// let stroke = shapes.stroke_complicated(&StrokeOptions::line_width(0.1)).unwrap();
///
/// assert_eq!(fill.indices.len(), 6);
/// assert!(!stroke.indices.is_empty());
/// assert!(shapes.sub_paths().is_empty());
/// # }
/// ```
#[derive(Default)]
pub struct ShapeGenerator {
    builder: PathBuilder,
    fill_options: FillOptions,
    fill: FillTessellator,
    stroke: StrokeTessellator,
}

impl ShapeGenerator {
    pub fn new() -> Self {
        ShapeGenerator {
            builder: PathBuilder::new(),
            fill_options: FillOptions::default(),
            fill: FillTessellator::new(),
            stroke: StrokeTessellator::new(),
        }
    }

    /// The options used by the `fill_*` methods.
    pub fn set_fill_options(&mut self, options: FillOptions) {
        self.fill_options = options;
    }

    /// Forwards to both tessellators.
    pub fn set_logging(&mut self, is_enabled: bool) {
        self.fill.set_logging(is_enabled);
        self.stroke.set_logging(is_enabled);
    }

    pub fn fill_tessellator(&mut self) -> &mut FillTessellator {
        &mut self.fill
    }

    pub fn stroke_tessellator(&mut self) -> &mut StrokeTessellator {
        &mut self.stroke
    }

    #[inline]
    pub fn sub_paths(&self) -> &[SubPath] {
        self.builder.sub_paths()
    }

    pub fn current_position(&self) -> Option<Point> {
        self.builder.current_position()
    }

    pub fn move_to(&mut self, to: Point) {
        self.builder.move_to(to);
    }

    pub fn relative_move_to(&mut self, to: Vector) {
        self.builder.relative_move_to(to);
    }

    pub fn line_to(&mut self, to: Point) {
        self.builder.line_to(to);
    }

    pub fn relative_line_to(&mut self, to: Vector) {
        self.builder.relative_line_to(to);
    }

    pub fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.builder.quadratic_bezier_to(ctrl, to);
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.builder.cubic_bezier_to(ctrl1, ctrl2, to);
    }

    pub fn arc_to(&mut self, center: Point, to: Point, angle: Angle, ccw: bool) {
        self.builder.arc_to(center, to, angle, ccw);
    }

    pub fn close_path(&mut self) {
        self.builder.close();
    }

    /// Discards the current path.
    pub fn clear(&mut self) {
        self.builder.clear();
    }

    /// Fills the current path, then clears it.
    pub fn fill_simple(&mut self) -> Result<VertexBuffers<Point, u16>, TessellationError> {
        let result = self.fill_simple_preserve();
        self.clear();
        result
    }

    /// Fills the current path and keeps it.
    pub fn fill_simple_preserve(&mut self) -> Result<VertexBuffers<Point, u16>, TessellationError> {
        let mut buffers = VertexBuffers::new();
        self.fill_simple_preserve_with(&mut simple_builder(&mut buffers))?;
        Ok(buffers)
    }

    pub fn fill_simple_with(&mut self, output: &mut dyn FillGeometryBuilder) -> TessellationResult {
        let result = self.fill_simple_preserve_with(output);
        self.clear();
        result
    }

    pub fn fill_simple_preserve_with(
        &mut self,
        output: &mut dyn FillGeometryBuilder,
    ) -> TessellationResult {
        self.fill
            .tessellate_sub_paths(self.builder.sub_paths(), &self.fill_options, output)
    }

    /// Strokes the current path, then clears it.
    pub fn stroke_complicated(
        &mut self,
        options: &StrokeOptions,
    ) -> Result<VertexBuffers<StrokeVertex, u16>, TessellationError> {
        let result = self.stroke_complicated_preserve(options);
        self.clear();
        result
    }

    /// Strokes the current path and keeps it.
    pub fn stroke_complicated_preserve(
        &mut self,
        options: &StrokeOptions,
    ) -> Result<VertexBuffers<StrokeVertex, u16>, TessellationError> {
        let mut buffers = VertexBuffers::new();
        self.stroke_complicated_preserve_with(
            options,
            &mut BuffersBuilder::new(&mut buffers, |vertex: StrokeVertex| vertex),
        )?;
        Ok(buffers)
    }

    pub fn stroke_complicated_with(
        &mut self,
        options: &StrokeOptions,
        output: &mut dyn StrokeGeometryBuilder,
    ) -> TessellationResult {
        let result = self.stroke_complicated_preserve_with(options, output);
        self.clear();
        result
    }

    pub fn stroke_complicated_preserve_with(
        &mut self,
        options: &StrokeOptions,
        output: &mut dyn StrokeGeometryBuilder,
    ) -> TessellationResult {
        self.stroke
            .tessellate_sub_paths(self.builder.sub_paths(), options, output)
    }
}

#[cfg(test)]
use crate::geometry_builder::NoOutput;
#[cfg(test)]
use crate::math::point;
#[cfg(test)]
use crate::{LineJoin, UnsupportedParameter};

#[cfg(test)]
fn draw_arrow(shapes: &mut ShapeGenerator) {
    shapes.move_to(point(0.0, 0.0));
    shapes.line_to(point(2.0, 1.0));
    shapes.line_to(point(4.0, 0.0));
    shapes.line_to(point(4.0, 4.0));
    shapes.line_to(point(2.0, 3.0));
    shapes.line_to(point(0.0, 4.0));
    shapes.close_path();
}

#[test]
fn fill_clears_the_path() {
    let mut shapes = ShapeGenerator::new();
    shapes.move_to(point(0.0, 0.0));
    shapes.line_to(point(1.0, 0.0));
    shapes.line_to(point(1.0, 1.0));
    shapes.line_to(point(0.0, 1.0));
    shapes.close_path();

    let buffers = shapes.fill_simple().unwrap();
    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 6);
    assert!(shapes.sub_paths().is_empty());

    // Nothing left to fill.
    let buffers = shapes.fill_simple().unwrap();
    assert!(buffers.indices.is_empty());
}

#[test]
fn preserve_then_rebuild() {
    let mut shapes = ShapeGenerator::new();
    draw_arrow(&mut shapes);
    let preserved_fill = shapes.fill_simple_preserve().unwrap();
    let preserved_stroke = shapes
        .stroke_complicated_preserve(&StrokeOptions::line_width(0.5))
        .unwrap();
    assert_eq!(shapes.sub_paths().len(), 1);

    shapes.clear();
    draw_arrow(&mut shapes);
    let fill = shapes.fill_simple().unwrap();

    draw_arrow(&mut shapes);
    let stroke = shapes
        .stroke_complicated(&StrokeOptions::line_width(0.5))
        .unwrap();

    assert_eq!(fill.vertices, preserved_fill.vertices);
    assert_eq!(fill.indices, preserved_fill.indices);
    assert_eq!(stroke.vertices, preserved_stroke.vertices);
    assert_eq!(stroke.indices, preserved_stroke.indices);
    assert_eq!(fill.triangle_count(), 4);
}

#[test]
fn errors_clear_the_path_too() {
    let mut shapes = ShapeGenerator::new();
    shapes.move_to(point(0.0, 0.0));
    shapes.line_to(point(10.0, 0.0));

    let mut output = NoOutput::new();
    assert_eq!(
        shapes.stroke_complicated_preserve_with(&StrokeOptions::line_width(-1.0), &mut output),
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::NegativeLineWidth
        ))
    );
    assert_eq!(shapes.sub_paths().len(), 1);

    assert!(shapes
        .stroke_complicated_with(&StrokeOptions::line_width(-1.0), &mut output)
        .is_err());
    assert!(shapes.sub_paths().is_empty());
}

#[test]
fn fill_and_stroke_into_custom_sinks() {
    let mut shapes = ShapeGenerator::new();
    shapes.move_to(point(0.0, 0.0));
    shapes.line_to(point(10.0, 0.0));
    shapes.line_to(point(10.0, 10.0));
    shapes.close_path();

    let mut counter = NoOutput::new();
    shapes.fill_simple_preserve_with(&mut counter).unwrap();
    assert_eq!(counter.vertex_count(), 3);
    assert_eq!(counter.triangle_count(), 1);

    let mut counter = NoOutput::new();
    let options = StrokeOptions::line_width(1.0).with_line_join(LineJoin::Bevel);
    shapes.stroke_complicated_with(&options, &mut counter).unwrap();
    assert!(counter.triangle_count() > 0);
    assert!(shapes.sub_paths().is_empty());
}
