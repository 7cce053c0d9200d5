use crate::debugger::{Debugger2D, BLUE, GREEN, PARTITION, RED, SWEEP, TRIANGULATION};
use crate::geom::utils::signed_area_accumulator;
use crate::half_edge::{EdgeId, HalfEdgeNetwork, INVALID};
use crate::math::Point;
use crate::monotone::{partition_monotone, triangulate_monotone_polygons};
use crate::path::{Path, SubPath};
use crate::{
    FillGeometryBuilder, FillOptions, InputWinding, InternalError, TessellationError,
    TessellationResult, UnsupportedParameter,
};

/// A Context object that can tessellate fill operations for complex paths.
///
/// ## Overview
///
/// Every sub-path is flattened into a loop of points, closed or not. The loops are
/// linked into a half-edge network, which is split into y-monotone polygons by
/// adding diagonals between existing points. The monotone polygons are then
/// triangulated. No vertex is added: the output has exactly one vertex per distinct
/// flattened point.
///
/// Outer loops and holes must wind in opposite directions. By default the overall
/// orientation is detected from the sum of the signed areas of the loops, see
/// `FillOptions::input_winding`.
///
/// Self-intersecting loops and loops crossing each other are not supported. They
/// usually produce `InternalError`s or overlapping triangles.
///
/// ## Examples
///
/// ```
/// # extern crate pathmesh_tessellation as tess;
/// # use tess::path::PathBuilder;
/// # use tess::math::{point, Point};
/// # use tess::geometry_builder::{simple_builder, VertexBuffers};
/// # use tess::{FillTessellator, FillOptions};
/// # fn main() {
/// let mut builder = PathBuilder::new();
/// // An outer square.
/// builder.move_to(point(0.0, 0.0));
/// builder.line_to(point(10.0, 0.0));
/// builder.line_to(point(10.0, 10.0));
/// builder.line_to(point(0.0, 10.0));
/// builder.close();
/// // A hole, winding the other way.
/// builder.move_to(point(3.0, 3.0));
/// builder.line_to(point(3.0, 7.0));
/// builder.line_to(point(7.0, 7.0));
/// builder.line_to(point(7.0, 3.0));
/// builder.close();
/// let path = builder.build();
///
/// let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
/// let mut tessellator = FillTessellator::new();
/// tessellator.tessellate_path(
///     &path,
///     &FillOptions::default(),
///     &mut simple_builder(&mut buffers),
/// ).unwrap();
///
/// assert_eq!(buffers.vertices.len(), 8);
/// assert_eq!(buffers.triangle_count(), 8);
/// # }
/// ```
pub struct FillTessellator {
    points: Vec<Point>,
    loop_starts: Vec<usize>,
    log: bool,
    debugger: Option<Box<dyn Debugger2D>>,
}

impl Default for FillTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl FillTessellator {
    /// Constructor.
    pub fn new() -> Self {
        #[cfg(all(debug_assertions, feature = "std"))]
        let log = std::env::var("PATHMESH_FORCE_LOGGING").is_ok();
        #[cfg(not(all(debug_assertions, feature = "std")))]
        let log = false;

        FillTessellator {
            points: Vec::new(),
            loop_starts: Vec::new(),
            log,
            debugger: None,
        }
    }

    /// Compute the tessellation of a path.
    pub fn tessellate_path(
        &mut self,
        path: &Path,
        options: &FillOptions,
        output: &mut dyn FillGeometryBuilder,
    ) -> TessellationResult {
        self.tessellate_sub_paths(path.sub_paths(), options, output)
    }

    /// Compute the tessellation of a list of sub-paths, for example the ones of a
    /// `PathBuilder` that is still being edited.
    ///
    /// Open sub-paths are implicitly closed.
    pub fn tessellate_sub_paths(
        &mut self,
        sub_paths: &[SubPath],
        options: &FillOptions,
        output: &mut dyn FillGeometryBuilder,
    ) -> TessellationResult {
        self.reset();
        for sub_path in sub_paths {
            self.add_loop(sub_path.flattened());
        }

        self.tessellate_impl(options, output)
    }

    /// Compute the tessellation of a polygon given as a list of loops.
    pub fn tessellate_polygon(
        &mut self,
        loops: &[&[Point]],
        options: &FillOptions,
        output: &mut dyn FillGeometryBuilder,
    ) -> TessellationResult {
        self.reset();
        for points in loops {
            self.add_loop(points.iter().cloned());
        }

        self.tessellate_impl(options, output)
    }

    /// Enable/disable some verbose logging during the tessellation, for
    /// debugging purposes.
    pub fn set_logging(&mut self, is_enabled: bool) {
        #[cfg(all(debug_assertions, feature = "std"))]
        let forced = std::env::var("PATHMESH_FORCE_LOGGING").is_ok();

        #[cfg(not(all(debug_assertions, feature = "std")))]
        let forced = false;

        self.log = is_enabled || forced;
    }

    /// Reports the sweep, the partition and the triangulation to `debugger`.
    pub fn install_debugger(&mut self, debugger: Box<dyn Debugger2D>) {
        self.debugger = Some(debugger);
    }

    pub fn remove_debugger(&mut self) -> Option<Box<dyn Debugger2D>> {
        self.debugger.take()
    }

    fn reset(&mut self) {
        self.points.clear();
        self.loop_starts.clear();
    }

    /// Appends a loop, without consecutive duplicates nor a closing point equal to
    /// the first one. Loops of less than three points have no area and are dropped.
    fn add_loop(&mut self, points: impl Iterator<Item = Point>) {
        let start = self.points.len();
        for p in points {
            if self.points.len() > start && self.points.last() == Some(&p) {
                continue;
            }
            self.points.push(p);
        }

        while self.points.len() > start + 1 && self.points.last() == Some(&self.points[start]) {
            self.points.pop();
        }

        if self.points.len() - start < 3 {
            tess_log!(self, "skip a loop of {} points", self.points.len() - start);
            self.points.truncate(start);
            return;
        }

        self.loop_starts.push(start);
    }

    fn is_ccw(&self, options: &FillOptions) -> bool {
        match options.input_winding {
            InputWinding::CounterClockwise => true,
            InputWinding::Clockwise => false,
            InputWinding::Detect => {
                let mut acc = 0.0;
                for (idx, &start) in self.loop_starts.iter().enumerate() {
                    let end = self
                        .loop_starts
                        .get(idx + 1)
                        .cloned()
                        .unwrap_or_else(|| self.points.len());
                    acc += signed_area_accumulator(&self.points[start..end]);
                }
                acc <= 0.0
            }
        }
    }

    fn tessellate_impl(
        &mut self,
        options: &FillOptions,
        output: &mut dyn FillGeometryBuilder,
    ) -> TessellationResult {
        if self.points.iter().any(|p| p.x.is_nan() || p.y.is_nan()) {
            return Err(TessellationError::UnsupportedParameter(
                UnsupportedParameter::PositionIsNaN,
            ));
        }

        output.begin_geometry();

        match self.tessellator_loop(options, output) {
            Ok(()) => {
                output.end_geometry();
                Ok(())
            }
            Err(e) => {
                tess_log!(self, "Tessellation failed with error: {}.", e);
                if let Some(dbg) = &self.debugger {
                    dbg.error(PARTITION | TRIANGULATION);
                }
                output.abort_geometry();

                Err(e)
            }
        }
    }

    fn tessellator_loop(
        &self,
        options: &FillOptions,
        output: &mut dyn FillGeometryBuilder,
    ) -> TessellationResult {
        if self.points.is_empty() {
            return Ok(());
        }

        if self.points.len() * 3 >= INVALID as usize {
            return Err(InternalError::TooManyPoints.into());
        }

        let is_ccw = self.is_ccw(options);
        tess_log!(
            self,
            "fill {} points in {} loops, ccw: {}",
            self.points.len(),
            self.loop_starts.len(),
            is_ccw
        );

        let triangles = triangulate_loops(&self.points, &self.loop_starts, is_ccw, |network| {
            self.report_partition(network)
        })?;

        tess_log!(self, "{} triangles", triangles.len());

        let mut ids = Vec::with_capacity(self.points.len());
        for &position in &self.points {
            ids.push(output.add_fill_vertex(FillVertex::new(position))?);
        }

        for tri in &triangles {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            if let Some(dbg) = &self.debugger {
                dbg.edge(&self.points[a], &self.points[b], GREEN, TRIANGULATION);
                dbg.edge(&self.points[b], &self.points[c], GREEN, TRIANGULATION);
                dbg.edge(&self.points[c], &self.points[a], GREEN, TRIANGULATION);
            }
            output.add_triangle(ids[a], ids[b], ids[c]);
        }

        Ok(())
    }

    fn report_partition(&self, network: &HalfEdgeNetwork) {
        let dbg = match &self.debugger {
            Some(dbg) => dbg,
            None => return,
        };

        dbg.new_frame(SWEEP | PARTITION);
        for &p in network.points() {
            dbg.point(&p, BLUE, SWEEP);
        }

        let num_boundary_edges = network.points().len();
        let mut edge = num_boundary_edges;
        while edge + 1 < network.num_edges() {
            let from = network.position(edge as EdgeId);
            let to = network.position((edge + 1) as EdgeId);
            tess_log!(self, "diagonal {:?} -> {:?}", from, to);
            dbg.edge(&from, &to, RED, PARTITION);
            edge += 2;
        }
    }
}

/// Runs the fill pipeline on a set of loops.
///
/// `on_partition` is called with the partitioned network before the triangulation.
/// Returns triangles of point indices.
pub(crate) fn triangulate_loops(
    points: &[Point],
    loop_starts: &[usize],
    is_ccw: bool,
    mut on_partition: impl FnMut(&HalfEdgeNetwork),
) -> Result<Vec<[EdgeId; 3]>, TessellationError> {
    let mut network = HalfEdgeNetwork::new(points);
    network.build_half_edges(loop_starts, is_ccw);

    let partitioned = partition_monotone(&network)?;
    on_partition(&partitioned);

    Ok(triangulate_monotone_polygons(&partitioned)?)
}

/// Extra vertex information from the `FillTessellator`, accessible when building vertices.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FillVertex {
    position: Point,
}

impl FillVertex {
    pub(crate) fn new(position: Point) -> Self {
        FillVertex { position }
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }
}
