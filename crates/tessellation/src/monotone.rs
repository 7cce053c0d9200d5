//! Decomposition of a half-edge network into y-monotone polygons, and their
//! triangulation.
//!
//! The partition follows the classic sweep from the top of the network to its bottom:
//! each split and merge vertex gets a diagonal towards the helper of the edge on
//! its left, after which every face of the network is y-monotone. Each face is
//! then triangulated independently with a stack of vertices waiting for a
//! diagonal.

use crate::geom::utils::is_convex_corner;
use crate::half_edge::{EdgeId, HalfEdgeNetwork, VertexRole, INVALID};
use crate::math::Point;
use crate::InternalError;

/// The edges the sweep line currently crosses, with the interior of the shape on
/// their right, and the helper of each of them.
///
/// The helper of an edge is the lowest vertex seen so far between that edge and
/// the next edge on its right.
pub struct HelperEdges {
    edges: Vec<EdgeId>,
    helpers: Vec<EdgeId>,
}

impl HelperEdges {
    pub fn new(num_edges: usize) -> Self {
        HelperEdges {
            edges: Vec::with_capacity(16),
            helpers: vec![INVALID; num_edges],
        }
    }

    /// Adds an edge to the sweep status, with itself as helper.
    pub fn insert(&mut self, edge: EdgeId) {
        self.edges.push(edge);
        self.helpers[edge as usize] = edge;
    }

    pub fn remove(&mut self, edge: EdgeId) {
        if let Some(idx) = self.edges.iter().position(|&e| e == edge) {
            self.edges.swap_remove(idx);
        }
    }

    #[inline]
    pub fn helper(&self, edge: EdgeId) -> EdgeId {
        self.helpers[edge as usize]
    }

    #[inline]
    pub fn set_helper(&mut self, edge: EdgeId, helper: EdgeId) {
        self.helpers[edge as usize] = helper;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Finds the closest edge on the left of `position`, at its height.
    ///
    /// Only the edges spanning the height of `position` are considered, and horizontal
    /// ones are skipped. If nothing is on the left, the closest edge on the right is
    /// returned.
    pub fn find_nearest_left_edge(
        &self,
        network: &HalfEdgeNetwork,
        position: Point,
    ) -> Option<EdgeId> {
        let mut nearest_left = None;
        let mut left_distance = f32::MAX;
        let mut nearest_right = None;
        let mut right_distance = f32::MAX;

        for &edge in &self.edges {
            let p1 = network.position(edge);
            let p2 = network.position(network.edge(edge).next);
            if p1.y < position.y || p2.y > position.y {
                continue;
            }

            let dy = p2.y - p1.y;
            if dy == 0.0 {
                continue;
            }

            let x = p1.x + (position.y - p1.y) * (p2.x - p1.x) / dy;
            let distance = position.x - x;
            if distance > 0.0 {
                if distance < left_distance {
                    left_distance = distance;
                    nearest_left = Some(edge);
                }
            } else if -distance < right_distance {
                right_distance = -distance;
                nearest_right = Some(edge);
            }
        }

        nearest_left.or(nearest_right)
    }
}

/// Adds the diagonals that make every face of `network` y-monotone.
///
/// The sweep reads the boundary from `network` and writes the diagonals into a
/// copy of it, which is returned. The diagonals are the edges appended after those
/// of `network`.
pub fn partition_monotone<'l>(
    network: &HalfEdgeNetwork<'l>,
) -> Result<HalfEdgeNetwork<'l>, InternalError> {
    let roles = network.edge_roles();
    let order = network.sweep_order(&roles);
    let mut result = network.clone();
    let mut status = HelperEdges::new(network.num_edges());

    let helper_of =
        |status: &HelperEdges, edge: EdgeId| -> Result<EdgeId, InternalError> {
            match status.helper(edge) {
                INVALID => Err(InternalError::MissingHelperEdge),
                helper => Ok(helper),
            }
        };

    for &edge in &order {
        let prev = network.edge(edge).prev;
        let position = network.position(edge);

        match roles[edge as usize] {
            VertexRole::Start => {
                status.insert(edge);
            }
            VertexRole::End => {
                let helper = helper_of(&status, prev)?;
                if roles[helper as usize] == VertexRole::Merge {
                    connect_diagonal(&mut result, edge, helper);
                }
                status.remove(prev);
            }
            VertexRole::RegularLeft => {
                let helper = helper_of(&status, prev)?;
                if roles[helper as usize] == VertexRole::Merge {
                    connect_diagonal(&mut result, edge, helper);
                }
                status.remove(prev);
                status.insert(edge);
            }
            VertexRole::RegularRight => {
                let left = status
                    .find_nearest_left_edge(network, position)
                    .ok_or(InternalError::MissingHelperEdge)?;
                let helper = helper_of(&status, left)?;
                if roles[helper as usize] == VertexRole::Merge {
                    connect_diagonal(&mut result, edge, helper);
                }
                status.set_helper(left, edge);
            }
            VertexRole::Split => {
                let left = status
                    .find_nearest_left_edge(network, position)
                    .ok_or(InternalError::MissingHelperEdge)?;
                let helper = helper_of(&status, left)?;
                connect_diagonal(&mut result, edge, helper);
                status.set_helper(left, edge);
                status.insert(edge);
            }
            VertexRole::Merge => {
                let helper = helper_of(&status, prev)?;
                if roles[helper as usize] == VertexRole::Merge {
                    connect_diagonal(&mut result, edge, helper);
                }
                status.remove(prev);

                let left = status
                    .find_nearest_left_edge(network, position)
                    .ok_or(InternalError::MissingHelperEdge)?;
                let helper = helper_of(&status, left)?;
                if roles[helper as usize] == VertexRole::Merge {
                    connect_diagonal(&mut result, edge, helper);
                }
                status.set_helper(left, edge);
            }
        }
    }

    Ok(result)
}

/// Connects the vertices of two edges, picking at each end the outgoing edge that
/// faces the other end.
fn connect_diagonal(network: &mut HalfEdgeNetwork, from: EdgeId, to: EdgeId) {
    let e1 = network.edge_facing(from, to);
    let e2 = network.edge_facing(to, from);
    network.connect(e1, e2);
}

/// Which chain of a monotone polygon a vertex belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Chain {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Copy, Clone, Debug)]
struct MonotoneVertex {
    pos: Point,
    id: EdgeId,
    chain: Chain,
}

/// Triangulates y-monotone polygons, one vertex at a time from top to bottom.
///
/// `begin` takes the topmost vertex, `vertex` the following ones and `end` the
/// bottommost one. The triangles are counter-clockwise and refer to the ids passed
/// with the vertices.
pub struct MonotoneTriangulator {
    stack: Vec<MonotoneVertex>,
    triangles: Vec<[EdgeId; 3]>,
}

impl MonotoneTriangulator {
    pub fn new() -> Self {
        MonotoneTriangulator {
            stack: Vec::with_capacity(16),
            triangles: Vec::new(),
        }
    }

    pub fn begin(&mut self, pos: Point, id: EdgeId) {
        let first = MonotoneVertex {
            pos,
            id,
            chain: Chain::Top,
        };
        self.stack.clear();
        self.stack.push(first);
    }

    /// Adds a vertex of the left chain (`is_left`) or of the right chain.
    pub fn vertex(&mut self, pos: Point, id: EdgeId, is_left: bool) {
        let chain = if is_left { Chain::Left } else { Chain::Right };
        self.monotone_vertex(MonotoneVertex { pos, id, chain });
    }

    pub fn end(&mut self, pos: Point, id: EdgeId) {
        let current = MonotoneVertex {
            pos,
            id,
            chain: Chain::Bottom,
        };
        for i in 1..self.stack.len() {
            let (a, b) = (self.stack[i], self.stack[i - 1]);
            self.push_triangle(current, a, b);
        }
        self.stack.clear();
    }

    fn monotone_vertex(&mut self, current: MonotoneVertex) {
        debug_assert!(!self.stack.is_empty());

        if self.stack.len() < 2 {
            self.stack.push(current);
            return;
        }

        let top = self.stack[self.stack.len() - 1];
        if top.chain != current.chain {
            // Everything on the stack is visible from the current vertex.
            for i in 1..self.stack.len() {
                let (a, b) = (self.stack[i], self.stack[i - 1]);
                self.push_triangle(current, a, b);
            }
            self.stack.clear();
            self.stack.push(top);
        } else {
            let mut popped = match self.stack.pop() {
                Some(v) => v,
                None => return,
            };
            while let Some(&next) = self.stack.last() {
                let inside = match current.chain {
                    Chain::Left => is_convex_corner(next.pos, popped.pos, current.pos),
                    _ => is_convex_corner(current.pos, popped.pos, next.pos),
                };
                if !inside {
                    break;
                }
                self.push_triangle(current, next, popped);
                popped = next;
                self.stack.pop();
            }
            self.stack.push(popped);
        }

        self.stack.push(current);
    }

    fn push_triangle(&mut self, a: MonotoneVertex, b: MonotoneVertex, c: MonotoneVertex) {
        debug_assert!(a.id != b.id && b.id != c.id && a.id != c.id);
        if (b.pos - a.pos).cross(c.pos - a.pos) < 0.0 {
            self.triangles.push([a.id, c.id, b.id]);
        } else {
            self.triangles.push([a.id, b.id, c.id]);
        }
    }

    /// The triangles produced since the last call to `take_triangles`.
    pub fn triangles(&self) -> &[[EdgeId; 3]] {
        &self.triangles
    }

    pub fn take_triangles(&mut self) -> Vec<[EdgeId; 3]> {
        core::mem::replace(&mut self.triangles, Vec::new())
    }
}

impl Default for MonotoneTriangulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Triangulates every face of a partitioned network.
///
/// The triangles refer to point indices. Fails with `NonMonotonePolygon` if a face
/// is not y-monotone.
pub fn triangulate_monotone_polygons(
    network: &HalfEdgeNetwork,
) -> Result<Vec<[EdgeId; 3]>, InternalError> {
    let roles = network.edge_roles();
    let order = network.sweep_order(&roles);
    let (polygon_ids, num_polygons) = network.mark_polygons();

    let mut sizes = vec![0usize; num_polygons as usize];
    for &id in &polygon_ids {
        sizes[id as usize] += 1;
    }

    // Split the sweep order per polygon, keeping its order.
    let mut per_polygon: Vec<Vec<EdgeId>> = sizes.iter().map(|&n| Vec::with_capacity(n)).collect();
    for &edge in &order {
        per_polygon[polygon_ids[edge as usize] as usize].push(edge);
    }

    let mut triangulator = MonotoneTriangulator::new();
    for edges in &per_polygon {
        if edges.len() < 3 {
            continue;
        }

        let last = edges.len() - 1;
        for (i, &edge) in edges.iter().enumerate() {
            let role = roles[edge as usize];
            let pos = network.position(edge);
            let vertex = network.edge(edge).vertex;
            match role {
                VertexRole::Split | VertexRole::Merge => {
                    return Err(InternalError::NonMonotonePolygon);
                }
                VertexRole::Start if i != 0 => {
                    return Err(InternalError::NonMonotonePolygon);
                }
                VertexRole::End if i != last => {
                    return Err(InternalError::NonMonotonePolygon);
                }
                _ => {}
            }

            if i == 0 {
                triangulator.begin(pos, vertex);
            } else if i == last {
                triangulator.end(pos, vertex);
            } else {
                triangulator.vertex(pos, vertex, role == VertexRole::RegularLeft);
            }
        }
    }

    Ok(triangulator.take_triangles())
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn area(points: &[Point], tri: &[EdgeId; 3]) -> f32 {
    let a = points[tri[0] as usize];
    let b = points[tri[1] as usize];
    let c = points[tri[2] as usize];
    (b - a).cross(c - a) * 0.5
}

#[cfg(test)]
fn fill(points: &[Point], loop_starts: &[usize]) -> Vec<[EdgeId; 3]> {
    let mut network = HalfEdgeNetwork::new(points);
    network.build_half_edges(loop_starts, true);
    let partitioned = partition_monotone(&network).unwrap();
    triangulate_monotone_polygons(&partitioned).unwrap()
}

#[test]
fn stack_triangulation() {
    let points = [
        point(0.0, 5.0),
        point(-1.0, 4.0),
        point(1.0, 3.0),
        point(-1.5, 2.0),
        point(-1.0, 1.0),
        point(0.0, 0.0),
    ];
    let mut tess = MonotoneTriangulator::new();
    tess.begin(points[0], 0);
    tess.vertex(points[1], 1, true);
    tess.vertex(points[2], 2, false);
    tess.vertex(points[3], 3, true);
    tess.vertex(points[4], 4, true);
    tess.end(points[5], 5);

    assert_eq!(tess.triangles().len(), 4);
    for tri in tess.triangles() {
        assert!(area(&points, tri) > 0.0);
    }
}

#[test]
fn reflex_chain() {
    // Vertices of the right chain wait on the stack until they become visible.
    let points = [
        point(0.0, 6.0),
        point(1.0, 5.0),
        point(0.5, 4.0),
        point(0.5, 3.0),
        point(1.0, 2.0),
        point(0.0, 0.0),
    ];
    let mut tess = MonotoneTriangulator::new();
    tess.begin(points[0], 0);
    for i in 1..5 {
        tess.vertex(points[i], i as EdgeId, false);
    }
    tess.end(points[5], 5);

    assert_eq!(tess.triangles().len(), 4);
    for tri in tess.triangles() {
        assert!(area(&points, tri) > 0.0);
    }
}

#[test]
fn partition_arrow() {
    let points = [
        point(0.0, 0.0),
        point(2.0, 1.0),
        point(4.0, 0.0),
        point(4.0, 4.0),
        point(2.0, 3.0),
        point(0.0, 4.0),
    ];
    let mut network = HalfEdgeNetwork::new(&points);
    network.build_half_edges(&[0], true);
    let partitioned = partition_monotone(&network).unwrap();

    assert_eq!(partitioned.num_edges(), 8);
    let diagonal = partitioned.edge(6);
    let peer = partitioned.edge(diagonal.peer);
    let mut ends = [diagonal.vertex, peer.vertex];
    ends.sort();
    assert_eq!(ends, [1, 4]);
    assert_eq!(partitioned.mark_polygons().1, 2);

    let triangles = triangulate_monotone_polygons(&partitioned).unwrap();
    assert_eq!(triangles.len(), 4);
    let total: f32 = triangles.iter().map(|t| area(&points, t)).sum();
    assert_eq!(total, 12.0);
}

#[test]
fn square_with_hole() {
    let points = [
        point(0.0, 0.0),
        point(10.0, 0.0),
        point(10.0, 10.0),
        point(0.0, 10.0),
        // The hole winds the other way.
        point(3.0, 3.0),
        point(3.0, 7.0),
        point(7.0, 7.0),
        point(7.0, 3.0),
    ];
    let triangles = fill(&points, &[0, 4]);

    assert_eq!(triangles.len(), 8);
    let total: f32 = triangles.iter().map(|t| area(&points, t)).sum();
    assert_eq!(total, 84.0);
    for tri in &triangles {
        assert!(area(&points, tri) > 0.0);
    }
}

#[test]
fn zigzag() {
    // A comb with three teeth pointing down.
    let points = [
        point(0.0, 0.0),
        point(1.0, 2.0),
        point(2.0, 0.0),
        point(3.0, 2.0),
        point(4.0, 0.0),
        point(5.0, 2.0),
        point(6.0, 0.0),
        point(6.0, 4.0),
        point(0.0, 4.0),
    ];
    let triangles = fill(&points, &[0]);

    assert_eq!(triangles.len(), points.len() - 2);
    let total: f32 = triangles.iter().map(|t| area(&points, t)).sum();
    assert_eq!(total, 18.0);
}

#[test]
fn nearest_left_edge() {
    let points = [
        point(0.0, 0.0),
        point(4.0, 0.0),
        point(4.0, 4.0),
        point(0.0, 4.0),
    ];
    let mut network = HalfEdgeNetwork::new(&points);
    network.build_half_edges(&[0], true);

    let mut status = HelperEdges::new(network.num_edges());
    assert!(status.is_empty());
    // 3 -> 0 goes down on the left, 1 -> 2 goes up on the right and is never a
    // candidate.
    status.insert(3);
    status.insert(1);
    assert_eq!(status.len(), 2);
    assert_eq!(status.find_nearest_left_edge(&network, point(2.0, 2.0)), Some(3));
    // Nothing on the left: the nearest edge on the right.
    assert_eq!(status.find_nearest_left_edge(&network, point(-1.0, 2.0)), Some(3));
    // Out of the vertical span.
    assert_eq!(status.find_nearest_left_edge(&network, point(2.0, 5.0)), None);

    status.set_helper(3, 2);
    assert_eq!(status.helper(3), 2);
    status.remove(3);
    assert_eq!(status.find_nearest_left_edge(&network, point(2.0, 2.0)), None);
}
