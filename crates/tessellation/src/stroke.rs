use crate::debugger::{Debugger2D, BLUE, GREEN, RED, STROKE};
use crate::fill::triangulate_loops;
use crate::geom::utils::{ortho, signed_area_accumulator};
use crate::half_edge::INVALID;
use crate::half_outline::{rotate, HalfOutline, JointId, STROKE_ROUNDNESS, TAIL_FIND_LIMIT};
use crate::math::{Point, Vector};
use crate::path::{Path, SubPath};
use crate::{
    InternalError, LineCap, LineJoin, Side, StrokeGeometryBuilder, StrokeOptions,
    TessellationResult, UnsupportedParameter,
};

use core::f32::consts::PI;

/// Turns with a smaller sine than this are stroked as straight lines.
const TURN_SINE_THRESHOLD: f32 = 0.05;

/// A Context object that can tessellate stroke operations for complex paths.
///
/// ## Overview
///
/// Each flattened sub-path is walked segment by segment while building two half
/// outlines, one on each side of the path at half of the line width. On the outer
/// side of a turn, the join is inserted. On the inner side, the new offset segment
/// is trimmed where it crosses the recent outline so that sharp inner corners do
/// not fold over. Open sub-paths get a cap at both ends, closed sub-paths have their
/// seam merged.
///
/// Both sides share increasing joint ids, one per skeleton point. The strip of
/// triangles between the two sides is built by advancing on the side with the
/// smallest joint id. If both sides can not be walked together, the area between
/// them is filled with the fill pipeline instead.
///
/// Self-overlapping strokes produce overlapping triangles.
///
/// # Examples
///
/// ```
/// # extern crate pathmesh_tessellation as tess;
/// # use tess::path::PathBuilder;
/// # use tess::math::*;
/// # use tess::geometry_builder::{VertexBuffers, simple_builder};
/// # use tess::*;
/// # fn main() {
/// // Create a simple path.
/// let mut builder = PathBuilder::new();
/// builder.move_to(point(0.0, 0.0));
/// builder.line_to(point(1.0, 2.0));
/// builder.line_to(point(2.0, 0.0));
/// builder.line_to(point(1.0, 1.0));
/// builder.close();
/// let path = builder.build();
///
/// // Create the destination vertex and index buffers.
/// let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
///
/// {
///     // Create the destination vertex and index buffers.
///     let mut vertex_builder = simple_builder(&mut buffers);
///
///     // Create the tessellator.
///     let mut tessellator = StrokeTessellator::new();
///
///     // Compute the tessellation.
///     tessellator.tessellate_path(
///         &path,
///         &StrokeOptions::default(),
///         &mut vertex_builder
///     ).unwrap();
/// }
///
/// println!("The generated vertices are: {:?}.", &buffers.vertices[..]);
/// println!("The generated indices are: {:?}.", &buffers.indices[..]);
///
/// # }
/// ```
pub struct StrokeTessellator {
    points: Vec<(usize, Point)>,
    log: bool,
    debugger: Option<Box<dyn Debugger2D>>,
}

impl Default for StrokeTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeTessellator {
    pub fn new() -> Self {
        #[cfg(all(debug_assertions, feature = "std"))]
        let log = std::env::var("PATHMESH_FORCE_LOGGING").is_ok();
        #[cfg(not(all(debug_assertions, feature = "std")))]
        let log = false;

        StrokeTessellator {
            points: Vec::new(),
            log,
            debugger: None,
        }
    }

    /// Compute the tessellation of a path.
    pub fn tessellate_path(
        &mut self,
        path: &Path,
        options: &StrokeOptions,
        output: &mut dyn StrokeGeometryBuilder,
    ) -> TessellationResult {
        self.tessellate_sub_paths(path.sub_paths(), options, output)
    }

    /// Compute the tessellation of a list of sub-paths, for example the ones of a
    /// `PathBuilder` that is still being edited.
    pub fn tessellate_sub_paths(
        &mut self,
        sub_paths: &[SubPath],
        options: &StrokeOptions,
        output: &mut dyn StrokeGeometryBuilder,
    ) -> TessellationResult {
        if options.line_width.is_nan() {
            return Err(UnsupportedParameter::LineWidthIsNaN.into());
        }

        if options.line_width < 0.0 {
            return Err(UnsupportedParameter::NegativeLineWidth.into());
        }

        for sub_path in sub_paths {
            if sub_path
                .flattened()
                .any(|p| p.x.is_nan() || p.y.is_nan())
            {
                return Err(UnsupportedParameter::PositionIsNaN.into());
            }
        }

        output.begin_geometry();

        match self.tessellate_impl(sub_paths, options, output) {
            Ok(()) => {
                output.end_geometry();
                Ok(())
            }
            Err(e) => {
                tess_log!(self, "Stroke tessellation failed with error: {}.", e);
                if let Some(dbg) = &self.debugger {
                    dbg.error(STROKE);
                }
                output.abort_geometry();

                Err(e)
            }
        }
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

    /// Reports the outlines and the fallbacks to `debugger`.
    pub fn install_debugger(&mut self, debugger: Box<dyn Debugger2D>) {
        self.debugger = Some(debugger);
    }

    pub fn remove_debugger(&mut self) -> Option<Box<dyn Debugger2D>> {
        self.debugger.take()
    }

    fn tessellate_impl(
        &mut self,
        sub_paths: &[SubPath],
        options: &StrokeOptions,
        output: &mut dyn StrokeGeometryBuilder,
    ) -> TessellationResult {
        if options.line_width == 0.0 {
            tess_log!(self, "zero line width, nothing to stroke");
            return Ok(());
        }

        let mut stroker = LineStroker::new(options);
        let mut mesh = StrokeMesh::default();

        for sub_path in sub_paths {
            self.points.clear();
            self.points.extend(sub_path.flattened().with_glyph_index());

            stroker.clear();
            if !stroker.stroke_sub_path(&self.points, sub_path.is_closed()) {
                tess_log!(self, "skip a sub-path of {} points", self.points.len());
                continue;
            }

            tess_log!(
                self,
                "stroke {} points, outline: {} left, {} right",
                self.points.len(),
                stroker.left.len(),
                stroker.right.len()
            );
            self.report_outlines(&stroker);

            self.build_strip(&stroker, sub_path.is_closed(), &mut mesh)?;
        }

        let mut ids = Vec::with_capacity(mesh.vertices.len());
        for vertex in &mesh.vertices {
            ids.push(output.add_stroke_vertex(*vertex)?);
        }

        for tri in &mesh.triangles {
            output.add_triangle(
                ids[tri[0] as usize],
                ids[tri[1] as usize],
                ids[tri[2] as usize],
            );
        }

        Ok(())
    }

    /// Appends the vertices of both sides of the stroker to `mesh`, along with the
    /// triangles between them.
    fn build_strip(
        &self,
        stroker: &LineStroker,
        is_closed: bool,
        mesh: &mut StrokeMesh,
    ) -> TessellationResult {
        let base = mesh.vertices.len() as u32;
        let num_left = stroker.left.len() as u32;
        side_vertices(&stroker.left, is_closed, &mut mesh.vertices);
        side_vertices(&stroker.right, is_closed, &mut mesh.vertices);

        match walk_sides(&stroker.left.joint_ids, &stroker.right.joint_ids) {
            Ok(triangles) => {
                mesh.triangles
                    .extend(triangles.iter().map(|t| [t[0] + base, t[1] + base, t[2] + base]));
            }
            Err(e) => {
                log::warn!("{}, filling the stroke outline instead", e);
                if let Some(dbg) = &self.debugger {
                    dbg.string(format!("{}", e), STROKE);
                }

                let num_right = stroker.right.len() as u32;
                let left = (0..num_left).map(|i| (base + i, stroker.left.outline[i as usize]));
                let right = (0..num_right)
                    .rev()
                    .map(|j| (base + num_left + j, stroker.right.outline[j as usize]));

                let mut boundary = Boundary::default();
                if is_closed {
                    boundary.add_loop(left);
                    boundary.add_loop(right);
                } else {
                    boundary.add_loop(left.chain(right));
                }

                boundary.triangulate(&mut mesh.triangles)?;
            }
        }

        Ok(())
    }

    fn report_outlines(&self, stroker: &LineStroker) {
        let dbg = match &self.debugger {
            Some(dbg) => dbg,
            None => return,
        };

        dbg.new_frame(STROKE);
        for (outline, color) in &[(&stroker.left, GREEN), (&stroker.right, BLUE)] {
            for p in &outline.outline {
                dbg.point(p, *color, STROKE);
            }
            for segment in outline.outline.windows(2) {
                dbg.edge(&segment[0], &segment[1], RED, STROKE);
            }
        }
    }
}

/// Extra vertex information from the `StrokeTessellator`, accessible when building vertices.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StrokeVertex {
    position: Point,
    tangent: Vector,
    trip: f32,
    side: Side,
}

impl StrokeVertex {
    /// The vertex position.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// The unit direction of the outline at this vertex, or zero if the outline has
    /// no length around it.
    #[inline]
    pub fn tangent(&self) -> Vector {
        self.tangent
    }

    /// How far along its side of the outline the vertex is, from `0.0` at the start
    /// to `1.0` at the end.
    #[inline]
    pub fn trip(&self) -> f32 {
        self.trip
    }

    /// Whether the vertex is on the left or the right side of the path.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }
}

#[derive(Default)]
struct StrokeMesh {
    vertices: Vec<StrokeVertex>,
    triangles: Vec<[u32; 3]>,
}

fn side_vertices(outline: &HalfOutline, is_closed: bool, output: &mut Vec<StrokeVertex>) {
    let lengths = outline.accumulated_lengths();
    let total = lengths.last().cloned().unwrap_or(0.0);

    for (i, &position) in outline.outline.iter().enumerate() {
        let tangent = if outline.len() > 1 {
            let t = outline.tangent(i, is_closed);
            if t.square_length() > 0.0 {
                t.normalize()
            } else {
                t
            }
        } else {
            Vector::zero()
        };

        output.push(StrokeVertex {
            position,
            tangent,
            trip: if total > 0.0 { lengths[i] / total } else { 0.0 },
            side: outline.side,
        });
    }
}

fn is_sorted(ids: &[JointId]) -> bool {
    ids.windows(2).all(|w| w[0] <= w[1])
}

/// Whether the walk should move forward on the side of `ids` before the other side.
fn should_advance(ids: &[JointId], peer_ids: &[JointId], i: usize, j: usize) -> bool {
    if i + 1 == ids.len() {
        return false;
    }

    if j + 1 == peer_ids.len() {
        return true;
    }

    if ids[i] != peer_ids[j] {
        return ids[i] < peer_ids[j];
    }

    ids[i + 1] <= peer_ids[j + 1]
}

/// Builds a strip of triangles between both sides of a stroke.
///
/// Indices below `left.len()` refer to the left side, the others to the right side
/// offset by `left.len()`.
fn walk_sides(left: &[JointId], right: &[JointId]) -> Result<Vec<[u32; 3]>, InternalError> {
    if left.is_empty() || right.is_empty() || !is_sorted(left) || !is_sorted(right) {
        return Err(InternalError::StrokeWalkStalled);
    }

    let l = |i: usize| i as u32;
    let r = |j: usize| (left.len() + j) as u32;

    let mut triangles = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i + 1 < left.len() || j + 1 < right.len() {
        let advance_left = should_advance(left, right, i, j);
        let advance_right = should_advance(right, left, j, i);

        if advance_left {
            triangles.push([l(i), r(j), l(i + 1)]);
            i += 1;
            if advance_right {
                triangles.push([r(j), r(j + 1), l(i)]);
                j += 1;
            }
        } else if advance_right {
            triangles.push([l(i), r(j), r(j + 1)]);
            j += 1;
        } else {
            return Err(InternalError::StrokeWalkStalled);
        }
    }

    Ok(triangles)
}

/// The loops of a stroke outline, for the fill pipeline.
#[derive(Default)]
struct Boundary {
    points: Vec<Point>,
    vertices: Vec<u32>,
    loop_starts: Vec<usize>,
}

impl Boundary {
    fn add_loop(&mut self, points: impl Iterator<Item = (u32, Point)>) {
        let start = self.points.len();
        for (vertex, p) in points {
            if self.points.len() > start && self.points.last() == Some(&p) {
                continue;
            }
            self.points.push(p);
            self.vertices.push(vertex);
        }

        while self.points.len() > start + 1 && self.points.last() == Some(&self.points[start]) {
            self.points.pop();
            self.vertices.pop();
        }

        if self.points.len() - start < 3 {
            self.points.truncate(start);
            self.vertices.truncate(start);
            return;
        }

        self.loop_starts.push(start);
    }

    fn triangulate(&self, output: &mut Vec<[u32; 3]>) -> TessellationResult {
        if self.loop_starts.is_empty() {
            return Ok(());
        }

        if self.points.len() * 3 >= INVALID as usize {
            return Err(InternalError::TooManyPoints.into());
        }

        let mut area = 0.0;
        for (idx, &start) in self.loop_starts.iter().enumerate() {
            let end = self
                .loop_starts
                .get(idx + 1)
                .cloned()
                .unwrap_or_else(|| self.points.len());
            area += signed_area_accumulator(&self.points[start..end]);
        }

        let triangles = triangulate_loops(&self.points, &self.loop_starts, area <= 0.0, |_| {})?;
        output.extend(triangles.iter().map(|tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        }));

        Ok(())
    }
}

/// Builds both half outlines of a single sub-path.
struct LineStroker {
    left: HalfOutline,
    right: HalfOutline,
    half_width: f32,
    miter_cutoff_cosine: f32,
    start_cap: LineCap,
    end_cap: LineCap,
    join: LineJoin,
}

impl LineStroker {
    fn new(options: &StrokeOptions) -> Self {
        LineStroker {
            left: HalfOutline::new(Side::Left),
            right: HalfOutline::new(Side::Right),
            half_width: options.half_width(),
            miter_cutoff_cosine: options.miter_cutoff.cos(),
            start_cap: options.start_cap,
            end_cap: options.end_cap,
            join: options.line_join,
        }
    }

    fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }

    /// The id of the most recent joint on either side.
    fn last_joint_id(&self) -> JointId {
        self.left
            .last_id()
            .unwrap_or(0)
            .max(self.right.last_id().unwrap_or(0))
    }

    /// Returns `(inner, outer)` for a turn with the given sine.
    fn sides_of_turn(&mut self, turn_sine: f32) -> (&mut HalfOutline, &mut HalfOutline) {
        if turn_sine > 0.0 {
            (&mut self.left, &mut self.right)
        } else {
            (&mut self.right, &mut self.left)
        }
    }

    /// Strokes flattened points tagged with their glyph index.
    ///
    /// Returns false if the points do not span any length.
    fn stroke_sub_path(&mut self, points: &[(usize, Point)], is_closed: bool) -> bool {
        let (start_glyph, start) = match points.first() {
            Some(&first) => first,
            None => return false,
        };

        let v_begin = match points.iter().map(|&(_, p)| p).find(|&p| p != start) {
            Some(p) => (p - start).normalize(),
            None => return false,
        };

        if is_closed {
            self.close_stroke_begin(start, v_begin);
        } else {
            self.cap_begin(start, v_begin);
        }

        let mut v_prev = v_begin;
        let mut p1 = start;
        let mut glyph = start_glyph;
        let mut use_join = false;
        for &(glyph_index, p2) in &points[1..] {
            if glyph_index != glyph {
                glyph = glyph_index;
                use_join = true;
            }

            if p1 == p2 {
                continue;
            }

            v_prev = self.extend_stroke(v_prev, p1, p2, use_join);
            use_join = false;
            p1 = p2;
        }

        let last = p1;
        if is_closed {
            if last != start {
                self.extend_stroke(v_prev, last, start, true);
                self.close_stroke_end(last, start, v_begin);
            } else {
                let before = start - v_prev * (self.half_width * 4.0);
                self.close_stroke_end(before, start, v_begin);
            }
        } else {
            self.cap_end(last, v_prev);
        }

        true
    }

    fn cap_begin(&mut self, skeleton: Point, dir: Vector) {
        let r = ortho(dir) * self.half_width;
        let r_pre = -dir * self.half_width;

        match self.start_cap {
            LineCap::Butt => {}
            LineCap::Round => {
                let step = PI / (STROKE_ROUNDNESS / 2) as f32;
                let mut left = r_pre;
                let mut right = r_pre;
                for _ in 1..STROKE_ROUNDNESS / 4 {
                    left = rotate(left, -step);
                    right = rotate(right, step);
                    self.left.add(skeleton + left, 0);
                    self.right.add(skeleton + right, 0);
                }
            }
            LineCap::Square => {
                self.left.add(skeleton + r + r_pre, 0);
                self.right.add(skeleton - r + r_pre, 0);
            }
        }

        self.left.add(skeleton + r, 0);
        self.right.add(skeleton - r, 0);
        self.left.sunken = false;
        self.right.sunken = false;
    }

    fn close_stroke_begin(&mut self, skeleton: Point, dir: Vector) {
        let r = ortho(dir) * self.half_width;
        self.left.add(skeleton + r, 0);
        self.right.add(skeleton - r, 0);
    }

    /// Adds the segment `p1 -> p2`, coming from the direction `v_prev`.
    ///
    /// Joins are only inserted if `use_join` is set. Returns the direction of the
    /// segment.
    fn extend_stroke(&mut self, v_prev: Vector, p1: Point, p2: Point, use_join: bool) -> Vector {
        let v_curr = (p2 - p1).normalize();
        let ortho_prev = ortho(v_prev);
        let ortho_curr = ortho(v_curr);
        let r_prev = ortho_prev * self.half_width;
        let r_curr = ortho_curr * self.half_width;

        let id1 = self.last_joint_id();
        let id2 = id1 + 1;

        let turn_sine = v_prev.cross(v_curr);
        if turn_sine.abs() > TURN_SINE_THRESHOLD || v_prev.dot(v_curr) < 0.0 {
            let half_width = self.half_width;
            let miter_cutoff_cosine = self.miter_cutoff_cosine;
            let join = self.join;
            let (inner, outer) = self.sides_of_turn(turn_sine);

            outer.salvage(p1, r_prev, id1);
            if use_join {
                match join {
                    LineJoin::Miter => outer.add_miter_point(
                        p1,
                        id1,
                        ortho_prev,
                        ortho_curr,
                        half_width,
                        miter_cutoff_cosine,
                    ),
                    LineJoin::Round => {
                        outer.add_round_points(p1, id1, ortho_prev, ortho_curr, half_width)
                    }
                    LineJoin::Bevel => {}
                }
            }
            let side = outer.sign();
            outer.add(p1 + r_curr * side, id1);
            outer.add(p2 + r_curr * side, id2);

            inner.process_inner(outer, p1, id1, p2, ortho_curr, half_width);
        } else {
            self.left.add(p2 + r_curr, id2);
            self.right.add(p2 - r_curr, id2);
        }

        v_curr
    }

    fn cap_end(&mut self, skeleton: Point, dir: Vector) {
        let id = self.last_joint_id() + 1;
        let r = ortho(dir) * self.half_width;

        self.left.salvage(skeleton, r, id);
        self.right.salvage(skeleton, r, id);

        match self.end_cap {
            LineCap::Butt => {}
            LineCap::Round => {
                let step = PI / (STROKE_ROUNDNESS / 2) as f32;
                let mut left = r;
                let mut right = -r;
                for _ in 1..STROKE_ROUNDNESS / 4 {
                    left = rotate(left, -step);
                    right = rotate(right, step);
                    self.left.add(skeleton + left, id);
                    self.right.add(skeleton + right, id);
                }
            }
            LineCap::Square => {
                let r_post = dir * self.half_width;
                self.left.add(skeleton + r + r_post, id);
                self.right.add(skeleton - r + r_post, id);
            }
        }
    }

    /// Joins the last segment `last -> first` of a closed sub-path with its first
    /// segment, going along `v_begin`.
    fn close_stroke_end(&mut self, last: Point, first: Point, v_begin: Vector) {
        let v_curr = (first - last).normalize();
        let ortho_curr = ortho(v_curr);
        let ortho_begin = ortho(v_begin);
        let r_curr = ortho_curr * self.half_width;
        let r_begin = ortho_begin * self.half_width;
        let end_id = self.last_joint_id();

        let turn_sine = v_curr.cross(v_begin);
        if turn_sine == 0.0 {
            return;
        }

        let half_width = self.half_width;
        let miter_cutoff_cosine = self.miter_cutoff_cosine;
        let join = self.join;
        let (inner, outer) = self.sides_of_turn(turn_sine);

        outer.salvage(first, r_curr, end_id);
        match join {
            LineJoin::Miter => outer.add_miter_point(
                first,
                end_id,
                ortho_curr,
                ortho_begin,
                half_width,
                miter_cutoff_cosine,
            ),
            LineJoin::Round => {
                outer.add_round_points(first, end_id, ortho_curr, ortho_begin, half_width)
            }
            LineJoin::Bevel => {}
        }
        outer.add(first + r_begin * outer.sign(), end_id);

        let side = inner.sign();
        let p1 = last + r_curr * side;
        let p2 = first + r_curr * side;
        match inner.find_cross_from_head(p1, p2, TAIL_FIND_LIMIT) {
            Some((i, cross)) if i + 2 < inner.len() => {
                inner.remove_head(i);
                let len = inner.len();
                inner.set_point(0, cross);
                inner.set_point(len - 1, cross);
            }
            _ => {
                inner.add(first + r_begin * side, end_id);
            }
        }
    }
}

#[cfg(test)]
use crate::geometry_builder::*;
#[cfg(test)]
use crate::math::{point, vector};
#[cfg(test)]
use crate::path::PathBuilder;
#[cfg(test)]
use crate::TessellationError;

#[cfg(test)]
fn stroke(path: &Path, options: &StrokeOptions) -> VertexBuffers<StrokeVertex, u16> {
    let mut buffers: VertexBuffers<StrokeVertex, u16> = VertexBuffers::new();
    StrokeTessellator::new()
        .tessellate_path(
            path,
            options,
            &mut BuffersBuilder::new(&mut buffers, |v: StrokeVertex| v),
        )
        .unwrap();

    check_mesh(&buffers);
    buffers
}

#[cfg(test)]
fn check_mesh(buffers: &VertexBuffers<StrokeVertex, u16>) {
    assert_eq!(buffers.indices.len() % 3, 0);
    for tri in buffers.indices.chunks(3) {
        for &idx in tri {
            assert!((idx as usize) < buffers.vertices.len());
        }
        assert!(tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2]);
    }

    for v in &buffers.vertices {
        assert!(!v.position().x.is_nan() && !v.position().y.is_nan());
        assert!(!v.tangent().x.is_nan() && !v.tangent().y.is_nan());
        assert!(v.trip() >= 0.0 && v.trip() <= 1.0);
    }
}

#[cfg(test)]
fn polyline(points: &[Point], closed: bool) -> Path {
    let mut builder = PathBuilder::new();
    builder.move_to(points[0]);
    for &p in &points[1..] {
        builder.line_to(p);
    }
    if closed {
        builder.close();
    }
    builder.build()
}

#[cfg(test)]
fn distance_to_polyline(p: Point, points: &[Point]) -> f32 {
    let mut result = f32::MAX;
    for segment in points.windows(2) {
        let v = segment[1] - segment[0];
        let t = ((p - segment[0]).dot(v) / v.square_length()).max(0.0).min(1.0);
        result = result.min((p - (segment[0] + v * t)).length());
    }
    result
}

#[test]
fn butt_line() {
    let path = polyline(&[point(0.0, 0.0), point(10.0, 0.0)], false);
    let buffers = stroke(&path, &StrokeOptions::line_width(2.0));

    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 6);

    for v in &buffers.vertices {
        assert_eq!(v.position().y.abs(), 1.0);
        assert_eq!(v.tangent(), vector(1.0, 0.0));
        let expected_side = if v.position().y > 0.0 { Side::Left } else { Side::Right };
        assert_eq!(v.side(), expected_side);
        let expected_trip = if v.position().x == 0.0 { 0.0 } else { 1.0 };
        assert_eq!(v.trip(), expected_trip);
    }

    // The strip covers the rectangle.
    let mut area = 0.0;
    for tri in buffers.indices.chunks(3) {
        let a = buffers.vertices[tri[0] as usize].position();
        let b = buffers.vertices[tri[1] as usize].position();
        let c = buffers.vertices[tri[2] as usize].position();
        let tri_area = (b - a).cross(c - a) * 0.5;
        assert!(tri_area > 0.0);
        area += tri_area;
    }
    assert_eq!(area, 20.0);
}

#[test]
fn sharp_turn_miter_cutoff() {
    let turn = 170.0f32.to_radians();
    let p1 = point(10.0, 0.0);
    let p2 = p1 + vector(turn.cos(), turn.sin()) * 10.0;
    let skeleton = [point(0.0, 0.0), p1, p2];
    let path = polyline(&skeleton, false);

    let options = StrokeOptions::line_width(2.0).with_line_join(LineJoin::Miter);
    let buffers = stroke(&path, &options);
    for v in &buffers.vertices {
        assert!(distance_to_polyline(v.position(), &skeleton) < 1.01);
    }

    let buffers = stroke(&path, &options.with_miter_cutoff_degrees(175.0));
    let spike = buffers
        .vertices
        .iter()
        .map(|v| (v.position() - p1).length())
        .fold(0.0, f32::max);
    assert!(spike > 5.0);
}

#[test]
fn joins_on_a_right_angle() {
    let skeleton = [point(0.0, 0.0), point(10.0, 0.0), point(10.0, 10.0)];
    let path = polyline(&skeleton, false);

    let bevel = stroke(
        &path,
        &StrokeOptions::line_width(2.0).with_line_join(LineJoin::Bevel),
    );
    let miter = stroke(
        &path,
        &StrokeOptions::line_width(2.0).with_line_join(LineJoin::Miter),
    );
    let round = stroke(
        &path,
        &StrokeOptions::line_width(2.0).with_line_join(LineJoin::Round),
    );

    assert_eq!(miter.vertices.len(), bevel.vertices.len() + 1);
    assert!(round.vertices.len() > miter.vertices.len());

    // The miter tip is on the outer corner.
    assert!(miter
        .vertices
        .iter()
        .any(|v| (v.position() - point(11.0, -1.0)).length() < 1e-4));

    // The inner side is trimmed at the inner corner.
    assert!(bevel
        .vertices
        .iter()
        .any(|v| (v.position() - point(9.0, 1.0)).length() < 1e-4));

    for v in &round.vertices {
        assert!(distance_to_polyline(v.position(), &skeleton) < 1.0 + 1e-4);
    }
}

#[test]
fn caps() {
    let path = polyline(&[point(0.0, 0.0), point(10.0, 0.0)], false);

    let square = stroke(
        &path,
        &StrokeOptions::line_width(2.0).with_line_cap(LineCap::Square),
    );
    assert_eq!(square.vertices.len(), 8);
    let min_x = square.vertices.iter().map(|v| v.position().x).fold(f32::MAX, f32::min);
    let max_x = square.vertices.iter().map(|v| v.position().x).fold(f32::MIN, f32::max);
    assert_eq!(min_x, -1.0);
    assert_eq!(max_x, 11.0);

    let round = stroke(
        &path,
        &StrokeOptions::line_width(2.0)
            .with_start_cap(LineCap::Round)
            .with_end_cap(LineCap::Butt),
    );
    // 15 points per side on the start cap.
    assert_eq!(round.vertices.len(), 4 + 30);
    for v in &round.vertices {
        if v.position().x < 0.0 {
            assert!((v.position().to_vector().length() - 1.0).abs() < 1e-4);
        }
    }
}

#[test]
fn closed_square() {
    let path = polyline(
        &[
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
        ],
        true,
    );
    let buffers = stroke(
        &path,
        &StrokeOptions::line_width(2.0).with_line_join(LineJoin::Miter),
    );
    assert!(!buffers.indices.is_empty());

    // Every vertex is within the miter distance from the square outline.
    let outline = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
        point(0.0, 0.0),
    ];
    for v in &buffers.vertices {
        assert!(distance_to_polyline(v.position(), &outline) <= 2.0f32.sqrt() + 1e-4);
    }

    // The outer corners have miter tips.
    for corner in &[point(-1.0, -1.0), point(11.0, -1.0), point(11.0, 11.0), point(-1.0, 11.0)] {
        assert!(buffers
            .vertices
            .iter()
            .any(|v| (v.position() - *corner).length() < 1e-4));
    }

    // Explicitly going back to the start gives the same outline.
    let explicit = polyline(
        &[
            point(0.0, 0.0),
            point(10.0, 0.0),
            point(10.0, 10.0),
            point(0.0, 10.0),
            point(0.0, 0.0),
        ],
        true,
    );
    let explicit = stroke(
        &explicit,
        &StrokeOptions::line_width(2.0).with_line_join(LineJoin::Miter),
    );
    assert_eq!(explicit.vertices.len(), buffers.vertices.len());
}

#[test]
fn curves_and_duplicates() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(0.0, 0.0));
    builder.line_to(point(5.0, 0.0));
    builder.quadratic_bezier_to(point(10.0, 0.0), point(10.0, 5.0));
    builder.cubic_bezier_to(point(10.0, 10.0), point(5.0, 10.0), point(0.0, 5.0));
    let path = builder.build();

    let buffers = stroke(&path, &StrokeOptions::line_width(1.0).with_line_join(LineJoin::Round));
    assert!(buffers.triangle_count() > 0);
}

#[test]
fn single_curve_open_path() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.quadratic_bezier_to(point(5.0, 5.0), point(10.0, 0.0));
    let with_move = builder.build();

    // Without a current position the curve starts at the origin.
    let mut builder = PathBuilder::new();
    builder.quadratic_bezier_to(point(5.0, 5.0), point(10.0, 0.0));
    let without_move = builder.build();

    let options = StrokeOptions::line_width(2.0).with_line_cap(LineCap::Round);
    for path in [&with_move, &without_move].iter().copied() {
        let buffers = stroke(path, &options);
        assert!(buffers.triangle_count() > 0);

        let skeleton: Vec<Point> = path.sub_paths()[0].flattened().collect();
        assert!(skeleton.len() > 2);
        for v in &buffers.vertices {
            let d = distance_to_polyline(v.position(), &skeleton);
            assert!(d < 1.1, "{:?} is {} away from the curve", v.position(), d);
        }
        assert!(buffers.vertices.iter().any(|v| v.trip() == 0.0));
        assert!(buffers.vertices.iter().any(|v| v.trip() == 1.0));
    }

    let a = stroke(&without_move, &options);
    let b = stroke(&with_move, &options);
    assert_eq!(a.vertices, b.vertices);
    assert_eq!(a.indices, b.indices);
}

#[test]
fn degenerate_sub_paths() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(1.0, 1.0));
    builder.move_to(point(2.0, 2.0));
    builder.line_to(point(2.0, 2.0));
    let buffers = stroke(&builder.build(), &StrokeOptions::default());
    assert!(buffers.vertices.is_empty());

    let path = polyline(&[point(0.0, 0.0), point(10.0, 0.0)], false);
    let buffers = stroke(&path, &StrokeOptions::line_width(0.0));
    assert!(buffers.vertices.is_empty());
}

#[test]
fn invalid_parameters() {
    let path = polyline(&[point(0.0, 0.0), point(10.0, 0.0)], false);
    let mut tess = StrokeTessellator::new();
    let mut output = NoOutput::new();

    assert_eq!(
        tess.tessellate_path(&path, &StrokeOptions::line_width(f32::NAN), &mut output),
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::LineWidthIsNaN
        ))
    );
    assert_eq!(
        tess.tessellate_path(&path, &StrokeOptions::line_width(-1.0), &mut output),
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::NegativeLineWidth
        ))
    );

    let path = polyline(&[point(0.0, 0.0), point(f32::NAN, 0.0)], false);
    assert_eq!(
        tess.tessellate_path(&path, &StrokeOptions::default(), &mut output),
        Err(TessellationError::UnsupportedParameter(
            UnsupportedParameter::PositionIsNaN
        ))
    );
    assert_eq!(output.vertex_count(), 0);
}

#[test]
fn walk_sides_follows_joint_ids() {
    assert_eq!(
        walk_sides(&[0, 1], &[0, 1]),
        Ok(vec![[0, 2, 1], [2, 3, 1]])
    );

    // The left side has two points for the joint 1, the right side only one.
    let triangles = walk_sides(&[0, 1, 1, 2], &[0, 1, 2]).unwrap();
    assert_eq!(triangles.len(), 5);

    assert_eq!(
        walk_sides(&[0, 2, 1], &[0, 1, 2]),
        Err(InternalError::StrokeWalkStalled)
    );
}

#[test]
fn fallback_fills_the_outline() {
    let mut left = HalfOutline::new(Side::Left);
    let mut right = HalfOutline::new(Side::Right);
    left.add(point(0.0, 1.0), 0);
    left.add(point(5.0, 2.0), 2);
    left.add(point(10.0, 1.0), 1);
    right.add(point(0.0, -1.0), 0);
    right.add(point(10.0, -1.0), 1);

    let mut stroker = LineStroker::new(&StrokeOptions::line_width(2.0));
    stroker.left = left;
    stroker.right = right;

    let tess = StrokeTessellator::new();
    let mut mesh = StrokeMesh::default();
    tess.build_strip(&stroker, false, &mut mesh).unwrap();

    assert_eq!(mesh.vertices.len(), 5);
    assert_eq!(mesh.triangles.len(), 3);

    let mut area = 0.0;
    for tri in &mesh.triangles {
        let a = mesh.vertices[tri[0] as usize].position();
        let b = mesh.vertices[tri[1] as usize].position();
        let c = mesh.vertices[tri[2] as usize].position();
        area += (b - a).cross(c - a) * 0.5;
    }
    assert!((area - 25.0).abs() < 1e-4);
}

#[test]
fn stroke_abort_on_sink_error() {
    let path = polyline(&[point(0.0, 0.0), point(10.0, 0.0)], false);
    let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
    StrokeTessellator::new()
        .tessellate_path(&path, &StrokeOptions::default(), &mut simple_builder(&mut buffers))
        .unwrap();
    assert_eq!(buffers.vertices.len(), 4);

    let mut small: VertexBuffers<Point, u8> = VertexBuffers::new();
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    for i in 1..200 {
        let x = i as f32;
        builder.line_to(point(x, if i % 2 == 0 { 0.0 } else { 1.0 }));
    }
    let result = StrokeTessellator::new().tessellate_path(
        &builder.build(),
        &StrokeOptions::default(),
        &mut BuffersBuilder::new(&mut small, Positions),
    );
    assert!(result.is_err());
    assert!(small.vertices.is_empty());
    assert!(small.indices.is_empty());
}

#[test]
fn outlines_are_reported() {
    use crate::debugger::debugger_channel;

    let (sender, receiver) = debugger_channel();
    let mut tess = StrokeTessellator::new();
    tess.install_debugger(Box::new(sender));

    let path = polyline(&[point(0.0, 0.0), point(10.0, 0.0)], false);
    tess.tessellate_path(&path, &StrokeOptions::line_width(2.0), &mut NoOutput::new())
        .unwrap();

    let trace = receiver.collect_with_filter(STROKE);
    assert_eq!(trace.points().count(), 4);
    assert_eq!(trace.edges().count(), 2);
    assert!(!trace.has_errors());

    assert!(tess.remove_debugger().is_some());
}
