//! The beachline: the sequence of parabolic arcs just above the sweep line.
//!
//! Arcs are stored in a [`Tree`], whose thread gives each arc O(1) access to
//! its neighbors. Arcs don't have a fixed sort key (the breakpoints move as
//! the sweep line descends) so the tree is only ever searched by
//! [`Beachline::arc_above`], which recomputes breakpoints on the way down.

use crate::diagram::{EdgeIdx, HalfEdge, SiteIdx};
use crate::event::EventId;
use crate::geom::{breakpoint, evaluate, Point};
use crate::tree::{NodeIdx, Tree};
use crate::{Error, Result};

/// One arc of the beachline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Arc {
    /// The site whose parabola this arc is part of.
    pub site: SiteIdx,
    /// The site's position.
    pub focus: Point,
    /// The edge end traced by the breakpoint with the previous arc.
    pub left_edge: Option<HalfEdge>,
    /// The edge end traced by the breakpoint with the next arc.
    pub right_edge: Option<HalfEdge>,
    /// The pending circle event that would remove this arc.
    pub event: Option<EventId>,
}

impl Arc {
    /// A fresh arc, with no edges or events attached.
    pub fn new(site: SiteIdx, focus: Point) -> Self {
        Arc {
            site,
            focus,
            left_edge: None,
            right_edge: None,
            event: None,
        }
    }
}

/// The beachline.
#[derive(Clone, Debug)]
pub struct Beachline {
    tree: Tree<Arc>,
}

impl Beachline {
    /// A beachline with a single arc.
    pub fn new(site: SiteIdx, focus: Point) -> Self {
        let mut tree = Tree::new();
        tree.insert_root(Arc::new(site, focus));
        Beachline { tree }
    }

    /// The underlying tree, for inspecting its shape.
    pub fn tree(&self) -> &Tree<Arc> {
        &self.tree
    }

    /// The number of arcs.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Are there no arcs? (This never happens once a sweep has started.)
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The leftmost arc.
    pub fn first(&self) -> Option<NodeIdx> {
        self.tree.first()
    }

    /// The rightmost arc.
    pub fn last(&self) -> Option<NodeIdx> {
        self.tree.last()
    }

    /// The arc to the left of `arc`.
    pub fn prev(&self, arc: NodeIdx) -> Option<NodeIdx> {
        self.tree.prev(arc)
    }

    /// The arc to the right of `arc`.
    pub fn next(&self, arc: NodeIdx) -> Option<NodeIdx> {
        self.tree.next(arc)
    }

    /// The arc at a node, or `None` if it has been removed.
    pub fn get(&self, arc: NodeIdx) -> Option<&Arc> {
        self.tree.get(arc)
    }

    /// The arc at a node, mutably.
    pub fn get_mut(&mut self, arc: NodeIdx) -> Option<&mut Arc> {
        self.tree.get_mut(arc)
    }

    /// Iterates over the arcs from left to right.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIdx, &Arc)> + '_ {
        self.tree.iter()
    }

    /// Inserts a new arc just right of `existing`.
    pub fn insert_after(&mut self, existing: NodeIdx, arc: Arc) -> NodeIdx {
        self.tree.insert_after(existing, arc)
    }

    /// Inserts a new arc just left of `existing`.
    pub fn insert_before(&mut self, existing: NodeIdx, arc: Arc) -> NodeIdx {
        self.tree.insert_before(existing, arc)
    }

    /// Removes an arc.
    pub fn remove(&mut self, arc: NodeIdx) -> Arc {
        self.tree.remove(arc)
    }

    /// Splits `arc` in two around a new arc for `site`, returning the left,
    /// middle and right arcs.
    ///
    /// The left part stays in `arc`'s node. The new breakpoints between the
    /// three arcs trace the two ends of `edge`: the left one drags its start
    /// and the right one its end. Whatever circle event `arc` had is cleared
    /// here; the caller is responsible for invalidating it in the queue.
    pub fn split(
        &mut self,
        arc: NodeIdx,
        site: SiteIdx,
        focus: Point,
        edge: EdgeIdx,
    ) -> (NodeIdx, NodeIdx, NodeIdx) {
        let start = HalfEdge { edge, end: 0 };
        let end = HalfEdge { edge, end: 1 };

        let left = &mut self.tree[arc];
        left.event = None;
        let right = Arc {
            left_edge: Some(end),
            ..left.clone()
        };
        left.right_edge = Some(start);

        let middle = Arc {
            left_edge: Some(start),
            right_edge: Some(end),
            ..Arc::new(site, focus)
        };

        let right = self.tree.insert_after(arc, right);
        let middle = self.tree.insert_before(right, middle);
        (arc, middle, right)
    }

    /// Finds the arc directly above `x` when the sweep line is at `directrix`.
    ///
    /// If `x` is exactly at a breakpoint, this returns the arc on the right.
    pub fn arc_above(&self, x: f64, directrix: f64) -> Result<NodeIdx> {
        let mut cur = self
            .tree
            .root()
            .ok_or(Error::InvariantViolation("searched an empty beachline"))?;

        loop {
            let focus = self.tree[cur].focus;
            if let Some(prev) = self.tree.prev(cur) {
                if x < breakpoint(self.tree[prev].focus, focus, directrix)? {
                    cur = self
                        .tree
                        .left(cur)
                        .ok_or(Error::InvariantViolation("breakpoints out of order"))?;
                    continue;
                }
            }
            if let Some(next) = self.tree.next(cur) {
                if x >= breakpoint(focus, self.tree[next].focus, directrix)? {
                    cur = self
                        .tree
                        .right(cur)
                        .ok_or(Error::InvariantViolation("breakpoints out of order"))?;
                    continue;
                }
            }
            return Ok(cur);
        }
    }

    /// The sites of the arcs, from left to right.
    ///
    /// A site can appear more than once, but never twice in a row.
    pub fn arcs(&self) -> Vec<SiteIdx> {
        self.tree.iter().map(|(_, arc)| arc.site).collect()
    }

    /// The positions of the breakpoints, from left to right.
    ///
    /// A breakpoint between two arcs whose foci are both on the sweep line is
    /// at infinite height.
    pub fn breakpoints(&self, directrix: f64) -> Result<Vec<Point>> {
        let mut ret = Vec::with_capacity(self.len().saturating_sub(1));
        for (idx, left) in self.tree.iter() {
            let Some(next) = self.tree.next(idx) else {
                break;
            };
            let right = &self.tree[next];
            let x = breakpoint(left.focus, right.focus, directrix)?;
            // Evaluate on whichever arc isn't a vertical ray.
            let y = if left.focus.y > directrix {
                evaluate(left.focus, x, directrix)
            } else if right.focus.y > directrix {
                evaluate(right.focus, x, directrix)
            } else {
                f64::INFINITY
            };
            ret.push(Point::new(x, y));
        }
        Ok(ret)
    }

    /// The height of the beachline above `x`.
    pub fn envelope_y(&self, x: f64, directrix: f64) -> Result<f64> {
        let focus = self.tree[self.arc_above(x, directrix)?].focus;
        if focus.y == directrix {
            return Ok(if x == focus.x { focus.y } else { f64::INFINITY });
        }
        Ok(evaluate(focus, x, directrix))
    }

    /// Checks the invariants of the beachline, panicking if any of them fail.
    ///
    /// On top of the tree's own invariants, every pair of neighboring arcs
    /// must agree on the edge end traced by their breakpoint, and they must
    /// belong to different sites.
    pub fn check_invariants(&self) {
        self.tree.check_invariants();

        if let Some(first) = self.tree.first() {
            assert_eq!(self.tree[first].left_edge, None);
        }
        if let Some(last) = self.tree.last() {
            assert_eq!(self.tree[last].right_edge, None);
        }
        for (idx, left) in self.tree.iter() {
            let Some(next) = self.tree.next(idx) else {
                break;
            };
            let right = &self.tree[next];
            assert!(left.right_edge.is_some(), "untraced breakpoint at {idx:?}");
            assert_eq!(left.right_edge, right.left_edge, "mismatched half-edges");
            assert_ne!(left.site, right.site, "adjacent arcs of one site");
        }
    }
}

impl std::ops::Index<NodeIdx> for Beachline {
    type Output = Arc;

    fn index(&self, index: NodeIdx) -> &Arc {
        &self.tree[index]
    }
}

impl std::ops::IndexMut<NodeIdx> for Beachline {
    fn index_mut(&mut self, index: NodeIdx) -> &mut Arc {
        &mut self.tree[index]
    }
}
