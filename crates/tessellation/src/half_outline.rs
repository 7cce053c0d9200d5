//! One side of a stroke outline.
//!
//! A half outline is the polyline running parallel to the stroked path on one of
//! its sides, at half of the line width. Each outline point carries the joint id of
//! the skeleton point it was generated for, so that both sides can later be walked
//! in lockstep.

use crate::geom::utils::boxes_overlap;
use crate::geom::LineSegment;
use crate::math::{Angle, Box2D, Point, Rotation, Vector};
use crate::Side;

use core::f32::consts::PI;

/// Identifies a skeleton point of the stroked path. Both sides of the stroke share
/// the same ids, in increasing order along the path.
pub(crate) type JointId = u32;

/// How many outline segments are searched backwards for a crossing.
pub(crate) const TAIL_FIND_LIMIT: usize = 32;

/// Round caps use `STROKE_ROUNDNESS / 4 - 1` points, round joins up to
/// `STROKE_ROUNDNESS / 2` steps per half turn.
pub(crate) const STROKE_ROUNDNESS: u32 = 64;

const MIN_ROUND_JOIN_STEPS: u32 = 5;

#[derive(Clone, Debug)]
pub(crate) struct HalfOutline {
    pub outline: Vec<Point>,
    /// The bounding box of each segment of the outline.
    pub outline_bounds: Vec<Box2D>,
    pub joint_ids: Vec<JointId>,
    pub side: Side,
    /// Set when the inner side of a turn could not be resolved. The next point
    /// added on the outer side of a turn starts with the pending offset point.
    pub sunken: bool,
}

fn segment_bounds(a: Point, b: Point) -> Box2D {
    LineSegment { from: a, to: b }.bounding_box()
}

pub(crate) fn rotate(v: Vector, radians: f32) -> Vector {
    Rotation::new(Angle::radians(radians)).transform_vector(v)
}

impl HalfOutline {
    pub fn new(side: Side) -> Self {
        HalfOutline {
            outline: Vec::new(),
            outline_bounds: Vec::new(),
            joint_ids: Vec::new(),
            side,
            sunken: false,
        }
    }

    pub fn clear(&mut self) {
        self.outline.clear();
        self.outline_bounds.clear();
        self.joint_ids.clear();
        self.sunken = false;
    }

    #[inline]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.outline.len(), self.joint_ids.len());
        self.outline.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.outline.is_empty()
    }

    #[inline]
    pub fn last_id(&self) -> Option<JointId> {
        self.joint_ids.last().cloned()
    }

    /// `1.0` on the left, `-1.0` on the right.
    #[inline]
    pub fn sign(&self) -> f32 {
        self.side.sign()
    }

    pub fn add(&mut self, vertex: Point, id: JointId) {
        if let Some(&last) = self.outline.last() {
            self.outline_bounds.push(segment_bounds(last, vertex));
        }
        self.outline.push(vertex);
        self.joint_ids.push(id);
    }

    /// Keeps the first `size` points.
    pub fn resize(&mut self, size: usize) {
        debug_assert!(size > 0);
        self.outline.truncate(size);
        self.joint_ids.truncate(size);
        self.outline_bounds.truncate(size - 1);
    }

    /// Removes the first `count` points.
    pub fn remove_head(&mut self, count: usize) {
        self.outline.drain(..count);
        self.joint_ids.drain(..count);
        self.outline_bounds.drain(..count);
    }

    /// Moves a point, updating the bounds of the segments around it.
    pub fn set_point(&mut self, idx: usize, position: Point) {
        self.outline[idx] = position;
        if idx > 0 {
            self.outline_bounds[idx - 1] = segment_bounds(self.outline[idx - 1], position);
        }
        if idx + 1 < self.outline.len() {
            self.outline_bounds[idx] = segment_bounds(position, self.outline[idx + 1]);
        }
    }

    /// If the outline is sunken, adds the offset point of the previous segment at
    /// the skeleton point `p1` and clears the flag.
    pub fn salvage(&mut self, p1: Point, r_prev: Vector, id: JointId) {
        if self.sunken {
            let vertex = p1 + r_prev * self.sign();
            self.sunken = false;
            self.add(vertex, id);
        }
    }

    /// Adds the tip of a miter join, unless the turn is sharper than the cutoff.
    pub fn add_miter_point(
        &mut self,
        skeleton: Point,
        id: JointId,
        ortho_prev: Vector,
        ortho_curr: Vector,
        half_width: f32,
        miter_cutoff_cosine: f32,
    ) {
        let turn_cosine = ortho_prev.dot(ortho_curr);
        if turn_cosine <= miter_cutoff_cosine {
            return;
        }

        let ortho_mid = (ortho_prev + ortho_curr).normalize();
        let half_cosine = ortho_mid.dot(ortho_prev);
        let r_mid = ortho_mid * (half_width * self.sign() / half_cosine);

        self.add(skeleton + r_mid, id);
    }

    /// Adds the intermediate points of a round join, rotating the previous offset
    /// towards the current one.
    pub fn add_round_points(
        &mut self,
        skeleton: Point,
        id: JointId,
        ortho_prev: Vector,
        ortho_curr: Vector,
        half_width: f32,
    ) {
        let turn_angle = ortho_prev.dot(ortho_curr).max(-1.0).min(1.0).acos();
        let num_steps = ((turn_angle / PI * (STROKE_ROUNDNESS / 2) as f32) as u32)
            .max(MIN_ROUND_JOIN_STEPS);
        let step = -self.sign() * turn_angle / num_steps as f32;

        let mut r = ortho_prev * (self.sign() * half_width);
        for _ in 1..num_steps {
            r = rotate(r, step);
            self.add(skeleton + r, id);
        }
    }

    /// Searches the last segments of the outline, from the most recent one, for a
    /// crossing with the segment `p1 -> p2`.
    ///
    /// Returns the index of the first point of the crossed segment, and the crossing.
    pub fn find_cross_from_tail(
        &self,
        p1: Point,
        p2: Point,
        step_limit: usize,
    ) -> Option<(usize, Point)> {
        if self.outline.len() < 2 {
            return None;
        }

        let segment = LineSegment { from: p1, to: p2 };
        let bounds = segment.bounding_box();
        let len = self.outline.len();
        for i in (0..len - 1).rev() {
            if len - i > step_limit {
                break;
            }

            if let Some(cross) = self.cross_segment(&segment, &bounds, i) {
                return Some((i, cross));
            }
        }

        None
    }

    /// Like `find_cross_from_tail`, searching the first segments of the outline.
    pub fn find_cross_from_head(
        &self,
        p1: Point,
        p2: Point,
        step_limit: usize,
    ) -> Option<(usize, Point)> {
        let segment = LineSegment { from: p1, to: p2 };
        let bounds = segment.bounding_box();
        let num_segments = self.outline.len().saturating_sub(1);
        for i in 0..num_segments.min(step_limit) {
            if let Some(cross) = self.cross_segment(&segment, &bounds, i) {
                return Some((i, cross));
            }
        }

        None
    }

    fn cross_segment(&self, segment: &LineSegment<f32>, bounds: &Box2D, i: usize) -> Option<Point> {
        if !boxes_overlap(bounds, &self.outline_bounds[i]) {
            return None;
        }

        segment.inclusive_intersection(&LineSegment {
            from: self.outline[i],
            to: self.outline[i + 1],
        })
    }

    /// Adds the inner side of a turn going from `skeleton1` to `skeleton2`.
    ///
    /// The offset segment is trimmed where it crosses the recent outline of this
    /// side, or else of the outer side, or else the segment joining the start of
    /// both sides. If nothing is crossed, the outline becomes sunken.
    pub fn process_inner(
        &mut self,
        outer: &HalfOutline,
        skeleton1: Point,
        id1: JointId,
        skeleton2: Point,
        ortho_curr: Vector,
        half_width: f32,
    ) {
        let id2 = id1 + 1;
        let r_curr = ortho_curr * (self.sign() * half_width);
        let p1 = skeleton1 + r_curr;
        let p2 = skeleton2 + r_curr;

        if let Some((i, cross)) = self.find_cross_from_tail(p1, p2, TAIL_FIND_LIMIT) {
            self.resize(i + 1);
            self.add(cross, id1);
            self.add(p2, id2);
            self.sunken = false;
            return;
        }

        if let Some((_, cross)) = outer.find_cross_from_tail(p1, p2, TAIL_FIND_LIMIT) {
            self.add(cross, id1);
            self.add(p2, id2);
            self.sunken = false;
            return;
        }

        if let (Some(&first), Some(&outer_first)) = (self.outline.first(), outer.outline.first()) {
            let between = LineSegment {
                from: first,
                to: outer_first,
            };
            if let Some(cross) = between.inclusive_intersection(&LineSegment { from: p1, to: p2 }) {
                self.add(cross, id1);
                self.add(p2, id2);
                self.sunken = false;
                return;
            }
        }

        self.sunken = true;
    }

    /// The direction of the outline at a point, not normalized.
    ///
    /// On closed outlines, both ends use the direction across the seam.
    pub fn tangent(&self, i: usize, is_closed: bool) -> Vector {
        let len = self.outline.len();
        debug_assert!(len > 1);
        if i == 0 || i == len - 1 {
            if is_closed {
                self.outline[1] - self.outline[len - 2]
            } else if i == 0 {
                self.outline[1] - self.outline[0]
            } else {
                self.outline[i] - self.outline[i - 1]
            }
        } else {
            self.outline[i + 1] - self.outline[i - 1]
        }
    }

    /// The length of the outline from its start to each of its points.
    pub fn accumulated_lengths(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.outline.len());
        let mut length = 0.0;
        for (i, p) in self.outline.iter().enumerate() {
            if i > 0 {
                length += (*p - self.outline[i - 1]).length();
            }
            result.push(length);
        }

        result
    }
}

#[cfg(test)]
use crate::math::{point, vector};

#[cfg(test)]
fn check_bounds(outline: &HalfOutline) {
    assert_eq!(outline.outline_bounds.len() + 1, outline.outline.len());
    for (i, bounds) in outline.outline_bounds.iter().enumerate() {
        assert_eq!(*bounds, segment_bounds(outline.outline[i], outline.outline[i + 1]));
    }
}

#[test]
fn add_and_resize() {
    let mut outline = HalfOutline::new(Side::Left);
    assert!(outline.is_empty());
    assert_eq!(outline.last_id(), None);

    outline.add(point(0.0, 0.0), 0);
    outline.add(point(1.0, 2.0), 1);
    outline.add(point(3.0, 1.0), 2);
    outline.add(point(4.0, 4.0), 3);
    check_bounds(&outline);
    assert_eq!(outline.last_id(), Some(3));

    outline.resize(2);
    check_bounds(&outline);
    assert_eq!(outline.outline, vec![point(0.0, 0.0), point(1.0, 2.0)]);

    outline.add(point(5.0, 5.0), 4);
    outline.remove_head(1);
    check_bounds(&outline);
    assert_eq!(outline.joint_ids, vec![1, 4]);

    outline.set_point(0, point(-1.0, -1.0));
    check_bounds(&outline);
}

#[test]
fn salvage_only_when_sunken() {
    let mut outline = HalfOutline::new(Side::Right);
    outline.salvage(point(1.0, 1.0), vector(0.0, 1.0), 3);
    assert!(outline.is_empty());

    outline.sunken = true;
    outline.salvage(point(1.0, 1.0), vector(0.0, 1.0), 3);
    assert!(!outline.sunken);
    assert_eq!(outline.outline, vec![point(1.0, 0.0)]);
    assert_eq!(outline.joint_ids, vec![3]);
}

#[test]
fn miter_point() {
    // Left turn of 90 degrees at the origin, the outer side is on the right.
    let ortho_prev = vector(0.0, 1.0);
    let ortho_curr = vector(-1.0, 0.0);

    let mut outline = HalfOutline::new(Side::Right);
    outline.add_miter_point(point(0.0, 0.0), 1, ortho_prev, ortho_curr, 1.0, -0.5);
    assert_eq!(outline.len(), 1);
    assert!((outline.outline[0] - point(1.0, -1.0)).length() < 1e-5);

    // Beyond the cutoff.
    let mut outline = HalfOutline::new(Side::Right);
    outline.add_miter_point(point(0.0, 0.0), 1, ortho_prev, ortho_curr, 1.0, 0.5);
    assert!(outline.is_empty());
}

#[test]
fn round_points() {
    let ortho_prev = vector(0.0, 1.0);
    let ortho_curr = vector(-1.0, 0.0);
    let center = point(5.0, 5.0);

    let mut outline = HalfOutline::new(Side::Right);
    outline.add_round_points(center, 1, ortho_prev, ortho_curr, 2.0);

    // A quarter turn takes 16 steps.
    assert_eq!(outline.len(), 15);
    for p in &outline.outline {
        assert!(((*p - center).length() - 2.0).abs() < 1e-4);
        // Between the two offsets, on the outer side of the turn.
        assert!(p.x > center.x && p.y < center.y);
    }

    // A small turn still takes five steps.
    let mut outline = HalfOutline::new(Side::Left);
    let ortho_curr = rotate(ortho_prev, -0.1);
    outline.add_round_points(center, 1, ortho_prev, ortho_curr, 2.0);
    assert_eq!(outline.len(), 4);
}

#[test]
fn cross_from_tail_and_head() {
    let mut outline = HalfOutline::new(Side::Left);
    outline.add(point(0.0, 0.0), 0);
    outline.add(point(10.0, 0.0), 1);
    outline.add(point(10.0, 10.0), 2);

    let (i, cross) = outline
        .find_cross_from_tail(point(5.0, 5.0), point(15.0, 5.0), TAIL_FIND_LIMIT)
        .unwrap();
    assert_eq!(i, 1);
    assert!((cross - point(10.0, 5.0)).length() < 1e-5);

    let (i, cross) = outline
        .find_cross_from_head(point(5.0, -5.0), point(5.0, 5.0), TAIL_FIND_LIMIT)
        .unwrap();
    assert_eq!(i, 0);
    assert!((cross - point(5.0, 0.0)).length() < 1e-5);

    // Out of the search window.
    assert!(outline
        .find_cross_from_tail(point(5.0, -5.0), point(5.0, 5.0), 2)
        .is_none());
    assert!(outline
        .find_cross_from_head(point(5.0, 5.0), point(15.0, 5.0), 1)
        .is_none());
    assert!(outline
        .find_cross_from_tail(point(20.0, 20.0), point(30.0, 20.0), TAIL_FIND_LIMIT)
        .is_none());
}

#[test]
fn inner_side_is_trimmed() {
    // A skeleton going right then turning up by 90 degrees at (10, 0), with a half
    // width of 1. The left side is inside of the turn.
    let mut left = HalfOutline::new(Side::Left);
    let mut right = HalfOutline::new(Side::Right);
    left.add(point(0.0, 1.0), 0);
    left.add(point(10.0, 1.0), 1);
    right.add(point(0.0, -1.0), 0);
    right.add(point(10.0, -1.0), 1);
    right.add(point(11.0, -1.0), 1);
    right.add(point(11.0, 0.0), 1);
    right.add(point(11.0, 10.0), 2);

    left.process_inner(&right, point(10.0, 0.0), 1, point(10.0, 10.0), vector(-1.0, 0.0), 1.0);

    assert!(!left.sunken);
    assert_eq!(left.len(), 3);
    assert!((left.outline[1] - point(9.0, 1.0)).length() < 1e-5);
    assert_eq!(left.outline[2], point(9.0, 10.0));
    assert_eq!(left.joint_ids, vec![0, 1, 2]);
    check_bounds(&left);
}

#[test]
fn unresolved_inner_side_sinks() {
    let mut left = HalfOutline::new(Side::Left);
    let mut right = HalfOutline::new(Side::Right);
    left.add(point(0.0, 1.0), 0);
    left.add(point(1.0, 1.0), 1);
    right.add(point(0.0, -1.0), 0);
    right.add(point(1.0, -1.0), 1);

    left.process_inner(&right, point(50.0, 0.0), 1, point(50.0, 10.0), vector(-1.0, 0.0), 1.0);
    assert!(left.sunken);
    assert_eq!(left.len(), 2);
}

#[test]
fn tangents_and_lengths() {
    let mut outline = HalfOutline::new(Side::Left);
    outline.add(point(0.0, 0.0), 0);
    outline.add(point(3.0, 0.0), 1);
    outline.add(point(3.0, 4.0), 2);
    outline.add(point(0.0, 0.0), 3);

    assert_eq!(outline.tangent(0, false), vector(3.0, 0.0));
    assert_eq!(outline.tangent(1, false), vector(3.0, 4.0));
    assert_eq!(outline.tangent(2, false), vector(-3.0, 0.0));
    assert_eq!(outline.tangent(3, false), vector(-3.0, -4.0));
    // Across the seam.
    assert_eq!(outline.tangent(0, true), vector(0.0, -4.0));
    assert_eq!(outline.tangent(3, true), vector(0.0, -4.0));

    assert_eq!(outline.accumulated_lengths(), vec![0.0, 3.0, 7.0, 12.0]);
}
