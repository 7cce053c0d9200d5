//! A planar half-edge network over a shared point slice.
//!
//! Every point of the input loops is the origin of exactly one boundary half-edge,
//! so edge `i` starts at point `i` right after `build_half_edges`. Diagonals
//! inserted with `connect` are appended after the boundary edges, two at a time,
//! and are each other's peer. Edges are never removed.
//!
//! Faces are the cycles of `next` links. A face has its interior on the left of
//! its edges (y pointing up), so every face winds counter-clockwise.

use crate::geom::utils::{is_below, is_convex, vectors_are_ccw};
use crate::math::{Point, Vector};

use core::cmp::Ordering;

/// Index of an edge or of a point in the network.
pub type EdgeId = u16;

/// Marks a missing link.
pub const INVALID: EdgeId = EdgeId::MAX;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HalfEdge {
    /// The point this edge starts from.
    pub vertex: EdgeId,
    pub prev: EdgeId,
    pub next: EdgeId,
    /// The opposite half-edge, `INVALID` on the boundary of the input.
    pub peer: EdgeId,
}

/// How the sweep line sees the vertex an edge starts from.
///
/// The declaration order is the tie-break of `HalfEdgeNetwork::sweep_order`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VertexRole {
    /// Both neighbours below, convex corner.
    Start,
    /// Both neighbours above, convex corner.
    End,
    /// Both neighbours below, reflex corner.
    Split,
    /// Both neighbours above, reflex corner.
    Merge,
    /// On a chain going down, with the interior to its right.
    RegularLeft,
    /// On a chain going up, with the interior to its left.
    RegularRight,
}

#[derive(Clone, Debug)]
pub struct HalfEdgeNetwork<'l> {
    points: &'l [Point],
    edges: Vec<HalfEdge>,
}

impl<'l> HalfEdgeNetwork<'l> {
    /// Creates a network without edges.
    ///
    /// # Panics
    ///
    /// If there are too many points to be indexed with an `EdgeId`.
    pub fn new(points: &'l [Point]) -> Self {
        assert!(
            points.len() < INVALID as usize,
            "Too many points for a half-edge network: {}",
            points.len()
        );

        HalfEdgeNetwork {
            points,
            edges: Vec::with_capacity(points.len() * 3 / 2),
        }
    }

    #[inline]
    pub fn points(&self) -> &'l [Point] {
        self.points
    }

    #[inline]
    pub fn edges(&self) -> &[HalfEdge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &HalfEdge {
        &self.edges[id as usize]
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// The position of the vertex `edge` starts from.
    #[inline]
    pub fn position(&self, edge: EdgeId) -> Point {
        self.points[self.edge(edge).vertex as usize]
    }

    /// Builds one boundary edge per point and links each loop.
    ///
    /// `loop_starts` holds the index of the first point of each loop. A loop ends
    /// where the next one starts, the last loop ends at the last point. Loops are
    /// linked in point order if `is_ccw` is set, and in reverse order otherwise.
    pub fn build_half_edges(&mut self, loop_starts: &[usize], is_ccw: bool) {
        self.edges.clear();
        let n = self.points.len();
        for i in 0..n {
            self.edges.push(HalfEdge {
                vertex: i as EdgeId,
                prev: INVALID,
                next: INVALID,
                peer: INVALID,
            });
        }

        for (idx, &start) in loop_starts.iter().enumerate() {
            let end = loop_starts.get(idx + 1).cloned().unwrap_or(n);
            if end <= start {
                continue;
            }

            for i in start..end {
                let next = if i + 1 == end { start } else { i + 1 };
                let prev = if i == start { end - 1 } else { i - 1 };
                let edge = &mut self.edges[i];
                if is_ccw {
                    edge.next = next as EdgeId;
                    edge.prev = prev as EdgeId;
                } else {
                    edge.next = prev as EdgeId;
                    edge.prev = next as EdgeId;
                }
            }
        }
    }

    /// Inserts a diagonal between the vertices of `e1` and `e2`.
    ///
    /// `e1` and `e2` must belong to the same face. The face is split in two: the
    /// new edge starting at `e1`'s vertex is followed by `e2`, and the one starting
    /// at `e2`'s vertex is followed by `e1`. Returns both new edges in that order.
    ///
    /// # Panics
    ///
    /// If the network runs out of edge indices.
    pub fn connect(&mut self, e1: EdgeId, e2: EdgeId) -> (EdgeId, EdgeId) {
        assert!(
            self.edges.len() + 2 < INVALID as usize,
            "Too many edges in the half-edge network"
        );

        let i12 = self.edges.len() as EdgeId;
        let i21 = i12 + 1;

        let e1p = self.edge(e1).prev;
        let e2p = self.edge(e2).prev;
        let v1 = self.edge(e1).vertex;
        let v2 = self.edge(e2).vertex;

        self.edges[e1 as usize].prev = i21;
        self.edges[e2 as usize].prev = i12;
        self.edges[e1p as usize].next = i12;
        self.edges[e2p as usize].next = i21;

        self.edges.push(HalfEdge {
            vertex: v1,
            prev: e1p,
            next: e2,
            peer: i21,
        });
        self.edges.push(HalfEdge {
            vertex: v2,
            prev: e2p,
            next: e1,
            peer: i12,
        });

        (i12, i21)
    }

    /// Follows `next` links until the vertex position changes.
    ///
    /// Returns `edge` itself if every vertex of the face is at the same position.
    pub fn next_edge_diff_vertex(&self, edge: EdgeId) -> EdgeId {
        let pos = self.position(edge);
        let mut it = self.edge(edge).next;
        while it != edge && it != INVALID {
            if self.position(it) != pos {
                return it;
            }
            it = self.edge(it).next;
        }

        edge
    }

    /// Follows `prev` links until the vertex position changes.
    pub fn prev_edge_diff_vertex(&self, edge: EdgeId) -> EdgeId {
        let pos = self.position(edge);
        let mut it = self.edge(edge).prev;
        while it != edge && it != INVALID {
            if self.position(it) != pos {
                return it;
            }
            it = self.edge(it).prev;
        }

        edge
    }

    /// True if `direction` points into the face corner of `edge`, between its outgoing
    /// side and its incoming side.
    fn is_facing(&self, edge: EdgeId, direction: Vector) -> bool {
        let base = self.position(edge);
        let d_next = self.position(self.next_edge_diff_vertex(edge)) - base;
        let d_prev = self.position(self.prev_edge_diff_vertex(edge)) - base;

        vectors_are_ccw(d_next, direction, d_prev)
    }

    /// Among the half-edges leaving the vertex of `edge`, finds the one whose face
    /// corner contains the direction towards the vertex of `reference`.
    ///
    /// If both vertices are at the same position, the direction goes towards the
    /// middle of the neighbours of `reference`. Returns `edge` when no better candidate
    /// is found.
    pub fn edge_facing(&self, edge: EdgeId, reference: EdgeId) -> EdgeId {
        let base = self.position(edge);
        let mut target = self.position(reference);
        if target == base {
            let n = self.position(self.next_edge_diff_vertex(reference));
            let p = self.position(self.prev_edge_diff_vertex(reference));
            target = n.lerp(p, 0.5);
        }
        let direction = target - base;

        if self.is_facing(edge, direction) {
            return edge;
        }

        // Turn around the vertex one way.
        let mut it = edge;
        loop {
            let prev = self.edge(it).prev;
            let peer = self.edge(prev).peer;
            if peer == INVALID || peer == edge {
                break;
            }
            it = peer;
            if self.is_facing(it, direction) {
                return it;
            }
        }

        // Then the other way, in case the first one hit the boundary.
        let mut it = edge;
        loop {
            let peer = self.edge(it).peer;
            if peer == INVALID {
                break;
            }
            let next = self.edge(peer).next;
            if next == edge {
                break;
            }
            it = next;
            if self.is_facing(it, direction) {
                return it;
            }
        }

        edge
    }

    /// Classifies the vertex of each edge, indexed by edge.
    pub fn edge_roles(&self) -> Vec<VertexRole> {
        (0..self.edges.len())
            .map(|e| self.edge_role(e as EdgeId))
            .collect()
    }

    pub fn edge_role(&self, edge: EdgeId) -> VertexRole {
        let curr = self.position(edge);
        let prev = self.position(self.prev_edge_diff_vertex(edge));
        let next = self.position(self.next_edge_diff_vertex(edge));

        let prev_below = is_below(prev, curr);
        let next_below = is_below(next, curr);
        let convex = is_convex(curr - prev, next - curr);

        match (prev_below, next_below) {
            (true, true) if convex => VertexRole::Start,
            (true, true) => VertexRole::Split,
            (false, false) if convex => VertexRole::End,
            (false, false) => VertexRole::Merge,
            (false, true) => VertexRole::RegularLeft,
            (true, false) => VertexRole::RegularRight,
        }
    }

    /// The edges sorted from top to bottom: decreasing y, then increasing x, then role.
    ///
    /// The sort is stable so coincident vertices with the same role keep their order.
    pub fn sweep_order(&self, roles: &[VertexRole]) -> Vec<EdgeId> {
        debug_assert_eq!(roles.len(), self.edges.len());
        let mut order: Vec<EdgeId> = (0..self.edges.len() as EdgeId).collect();
        order.sort_by(|&a, &b| {
            let pa = self.position(a);
            let pb = self.position(b);
            pb.y
                .partial_cmp(&pa.y)
                .unwrap_or(Ordering::Equal)
                .then(pa.x.partial_cmp(&pb.x).unwrap_or(Ordering::Equal))
                .then(roles[a as usize].cmp(&roles[b as usize]))
        });

        order
    }

    /// Assigns a polygon id to every edge by walking each face once.
    ///
    /// Returns the id of each edge and the number of polygons.
    pub fn mark_polygons(&self) -> (Vec<EdgeId>, EdgeId) {
        let mut ids = vec![INVALID; self.edges.len()];
        let mut count: EdgeId = 0;
        for start in 0..self.edges.len() {
            if ids[start] != INVALID {
                continue;
            }

            let mut it = start as EdgeId;
            loop {
                ids[it as usize] = count;
                it = self.edge(it).next;
                if it == INVALID || ids[it as usize] != INVALID {
                    break;
                }
            }
            count += 1;
        }

        (ids, count)
    }

    /// The edges of the face containing `edge`, starting with `edge`.
    pub fn face(&self, edge: EdgeId) -> FaceIter<'_, 'l> {
        FaceIter {
            network: self,
            first: edge,
            current: edge,
            done: false,
        }
    }
}

/// Iterates over the edges of a face, see `HalfEdgeNetwork::face`.
pub struct FaceIter<'a, 'l> {
    network: &'a HalfEdgeNetwork<'l>,
    first: EdgeId,
    current: EdgeId,
    done: bool,
}

impl<'a, 'l> Iterator for FaceIter<'a, 'l> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        if self.done || self.current == INVALID {
            return None;
        }

        let edge = self.current;
        self.current = self.network.edge(edge).next;
        if self.current == self.first {
            self.done = true;
        }

        Some(edge)
    }
}

#[cfg(test)]
use crate::math::point;

#[cfg(test)]
fn arrow() -> Vec<Point> {
    vec![
        point(0.0, 0.0),
        point(2.0, 1.0),
        point(4.0, 0.0),
        point(4.0, 4.0),
        point(2.0, 3.0),
        point(0.0, 4.0),
    ]
}

#[cfg(test)]
fn check_links(network: &HalfEdgeNetwork) {
    for (i, edge) in network.edges().iter().enumerate() {
        assert_eq!(network.edge(edge.next).prev as usize, i);
        assert_eq!(network.edge(edge.prev).next as usize, i);
        if edge.peer != INVALID {
            assert_eq!(network.edge(edge.peer).peer as usize, i);
        }
    }
}

#[test]
fn build_loops() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(5.0, 5.0),
        point(6.0, 5.0),
        point(6.0, 6.0),
    ];
    let mut network = HalfEdgeNetwork::new(&points);
    network.build_half_edges(&[0, 3], true);

    assert_eq!(network.num_edges(), 6);
    check_links(&network);
    assert_eq!(network.edge(2).next, 0);
    assert_eq!(network.edge(3).prev, 5);
    assert_eq!(network.face(4).collect::<Vec<_>>(), vec![4, 5, 3]);

    network.build_half_edges(&[0, 3], false);
    check_links(&network);
    assert_eq!(network.edge(0).next, 2);
    assert_eq!(network.face(3).collect::<Vec<_>>(), vec![3, 5, 4]);
    assert!(network.edges().iter().all(|e| e.peer == INVALID));
}

#[test]
fn connect_splits_a_face() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ];
    let mut network = HalfEdgeNetwork::new(&points);
    network.build_half_edges(&[0], true);

    let (a, b) = network.connect(0, 2);
    assert_eq!((a, b), (4, 5));
    assert_eq!(network.num_edges(), 6);
    check_links(&network);

    assert_eq!(network.face(a).collect::<Vec<_>>(), vec![4, 2, 3]);
    assert_eq!(network.face(b).collect::<Vec<_>>(), vec![5, 0, 1]);

    let (ids, count) = network.mark_polygons();
    assert_eq!(count, 2);
    assert_eq!(ids[0], ids[1]);
    assert_eq!(ids[2], ids[3]);
    assert_ne!(ids[0], ids[2]);
}

#[test]
fn skip_coincident_vertices() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 0.0),
        point(0.0, 1.0),
    ];
    let mut network = HalfEdgeNetwork::new(&points);
    network.build_half_edges(&[0], true);

    assert_eq!(network.next_edge_diff_vertex(1), 3);
    assert_eq!(network.prev_edge_diff_vertex(2), 0);
    assert_eq!(network.next_edge_diff_vertex(0), 1);
}

#[test]
fn arrow_roles_and_sweep() {
    let points = arrow();
    let mut network = HalfEdgeNetwork::new(&points);
    network.build_half_edges(&[0], true);

    let roles = network.edge_roles();
    assert_eq!(
        roles,
        vec![
            VertexRole::End,
            VertexRole::Split,
            VertexRole::End,
            VertexRole::Start,
            VertexRole::Merge,
            VertexRole::Start,
        ]
    );

    assert_eq!(network.sweep_order(&roles), vec![5, 3, 4, 1, 0, 2]);
}

#[test]
fn square_roles() {
    let points = [
        point(0.0, 0.0),
        point(1.0, 0.0),
        point(1.0, 1.0),
        point(0.0, 1.0),
    ];
    let mut network = HalfEdgeNetwork::new(&points);
    network.build_half_edges(&[0], true);

    assert_eq!(
        network.edge_roles(),
        vec![
            VertexRole::RegularLeft,
            VertexRole::End,
            VertexRole::RegularRight,
            VertexRole::Start,
        ]
    );
}

#[test]
fn facing_edge_after_a_diagonal() {
    let points = [
        point(0.0, 0.0),
        point(2.0, 0.0),
        point(2.0, 2.0),
        point(1.0, 3.0),
        point(0.0, 2.0),
    ];
    let mut network = HalfEdgeNetwork::new(&points);
    network.build_half_edges(&[0], true);

    // Split the pentagon with 0 -> 2, then look for the edge leaving 0 towards 3.
    let (a, _) = network.connect(0, 2);
    check_links(&network);

    // Edge 0 leaves towards 1, its face is the triangle (0, 1, 2) which does not
    // contain the direction to vertex 3.
    assert_eq!(network.edge_facing(0, 3), a);
    assert_eq!(network.edge_facing(a, 1), 0);
    assert_eq!(network.edge_facing(3, 0), 3);
}
