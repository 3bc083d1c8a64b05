//! The output of a sweep: Voronoi vertices, and the edges between them.

use kurbo::Vec2;

use crate::geom::Point;

typed_vec!(
    /// Identifies an input site.
    SiteIdx,
    /// A vector indexed by sites.
    SiteVec,
    "s"
);

typed_vec!(
    /// Identifies a Voronoi vertex.
    VertexIdx,
    /// A vector indexed by vertices.
    VertexVec,
    "v"
);

typed_vec!(
    /// Identifies a Voronoi edge.
    EdgeIdx,
    /// A vector indexed by edges.
    EdgeVec,
    "e"
);

/// One end of an edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub enum EdgeEnd {
    /// The edge ends at a Voronoi vertex.
    Vertex(VertexIdx),
    /// The edge goes off to infinity in this direction.
    ///
    /// While the sweep is running, this is also the state of an end that is
    /// still being traced by a breakpoint.
    Infinite(Vec2),
}

impl EdgeEnd {
    /// The vertex at this end, if there is one.
    pub fn vertex(&self) -> Option<VertexIdx> {
        match self {
            EdgeEnd::Vertex(v) => Some(*v),
            EdgeEnd::Infinite(_) => None,
        }
    }
}

/// A Voronoi edge: part of the bisector between two sites.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Edge {
    sites: [SiteIdx; 2],
    anchor: Point,
    ends: [EdgeEnd; 2],
}

impl Edge {
    /// The two sites whose cells this edge separates.
    pub fn sites(&self) -> [SiteIdx; 2] {
        self.sites
    }

    /// A point on the edge.
    ///
    /// This is where the edge was first discovered: a vertex, or the point on
    /// the beachline where a site's arc first appeared.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The first end.
    pub fn start(&self) -> EdgeEnd {
        self.ends[0]
    }

    /// The second end.
    pub fn end(&self) -> EdgeEnd {
        self.ends[1]
    }

    /// Both ends.
    pub fn ends(&self) -> [EdgeEnd; 2] {
        self.ends
    }

    /// Does this edge end at a vertex on both sides?
    pub fn is_bounded(&self) -> bool {
        self.ends.iter().all(|e| e.vertex().is_some())
    }

    /// Does this edge separate the cell of `site` from some other cell?
    pub fn touches(&self, site: SiteIdx) -> bool {
        self.sites.contains(&site)
    }
}

/// Names one end of an edge that's still growing.
///
/// The breakpoint between two adjacent arcs drags one of these along as the
/// sweep line descends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct HalfEdge {
    /// The edge.
    pub edge: EdgeIdx,
    /// Which end: 0 for [`Edge::start`], 1 for [`Edge::end`].
    pub end: usize,
}

/// Counts of the events that a sweep processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SweepStats {
    /// One per site.
    pub site_events: usize,
    /// Circle events that produced a vertex.
    pub circle_events: usize,
    /// Circle events that were invalidated before they came up.
    pub stale_events: usize,
}

/// A Voronoi diagram, as computed by a [`Sweeper`](crate::Sweeper).
///
/// Edges that extend to infinity are reported as rays; nothing is clipped.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Diagram {
    sites: SiteVec<Point>,
    vertices: VertexVec<Point>,
    edges: EdgeVec<Edge>,
    stats: SweepStats,
}

impl Diagram {
    pub(crate) fn new(sites: SiteVec<Point>) -> Self {
        Self {
            sites,
            vertices: VertexVec::default(),
            edges: EdgeVec::default(),
            stats: SweepStats::default(),
        }
    }

    /// The input sites.
    pub fn sites(&self) -> &SiteVec<Point> {
        &self.sites
    }

    /// The position of a site.
    pub fn site(&self, idx: SiteIdx) -> Point {
        self.sites[idx]
    }

    /// All the Voronoi vertices.
    pub fn vertices(&self) -> &VertexVec<Point> {
        &self.vertices
    }

    /// The position of a vertex.
    pub fn vertex(&self, idx: VertexIdx) -> Point {
        self.vertices[idx]
    }

    /// All the edges.
    pub fn edges(&self) -> &EdgeVec<Edge> {
        &self.edges
    }

    /// An edge.
    pub fn edge(&self, idx: EdgeIdx) -> &Edge {
        &self.edges[idx]
    }

    /// Event counts from the sweep that built this diagram.
    pub fn stats(&self) -> SweepStats {
        self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut SweepStats {
        &mut self.stats
    }

    pub(crate) fn push_vertex(&mut self, p: Point) -> VertexIdx {
        self.vertices.push(p)
    }

    pub(crate) fn push_edge(
        &mut self,
        sites: [SiteIdx; 2],
        anchor: Point,
        ends: [EdgeEnd; 2],
    ) -> EdgeIdx {
        self.edges.push(Edge {
            sites,
            anchor,
            ends,
        })
    }

    /// Closes a growing end of an edge at a vertex.
    pub(crate) fn close(&mut self, half: HalfEdge, vertex: VertexIdx) {
        let end = &mut self.edges[half.edge].ends[half.end];
        debug_assert!(
            matches!(end, EdgeEnd::Infinite(_)),
            "closing {half:?} twice"
        );
        *end = EdgeEnd::Vertex(vertex);
    }

    /// The endpoints of an edge that has a vertex on both ends.
    pub fn segment(&self, idx: EdgeIdx) -> Option<(Point, Point)> {
        let edge = &self.edges[idx];
        let start = edge.start().vertex()?;
        let end = edge.end().vertex()?;
        Some((self.vertices[start], self.vertices[end]))
    }

    /// The vertex and outgoing direction of an edge with exactly one vertex.
    pub fn ray(&self, idx: EdgeIdx) -> Option<(Point, Vec2)> {
        match self.edges[idx].ends {
            [EdgeEnd::Vertex(v), EdgeEnd::Infinite(dir)]
            | [EdgeEnd::Infinite(dir), EdgeEnd::Vertex(v)] => Some((self.vertices[v], dir)),
            _ => None,
        }
    }

    // Some point in the relative interior of an edge.
    fn interior_point(&self, idx: EdgeIdx) -> Point {
        if let Some((p, q)) = self.segment(idx) {
            p.midpoint(&q)
        } else if let Some((p, dir)) = self.ray(idx) {
            p + dir
        } else {
            self.edges[idx].anchor
        }
    }

    /// The edges bounding the cell of `site`, in counter-clockwise order around it.
    ///
    /// Unbounded cells start with whichever edge comes first in angle, so
    /// their two rays aren't necessarily at the ends of the list.
    pub fn cell_of(&self, site: SiteIdx) -> Vec<EdgeIdx> {
        let center = self.sites[site];
        let mut edges: Vec<(f64, EdgeIdx)> = self
            .edges
            .iter()
            .filter(|(_, e)| e.touches(site))
            .map(|(idx, _)| {
                let p = self.interior_point(idx);
                ((p.y - center.y).atan2(p.x - center.x), idx)
            })
            .collect();
        edges.sort_by(|a, b| a.0.total_cmp(&b.0));
        edges.into_iter().map(|(_, idx)| idx).collect()
    }
}
