//! Fortune's algorithm.
//!
//! A [`Sweeper`] moves a horizontal line down the plane, stopping at each
//! event. Every site is an event: it punches a new arc into the beachline.
//! Three consecutive arcs whose breakpoints converge produce a circle event
//! further down, where the middle arc gets squeezed out and a Voronoi vertex
//! appears.
//!
//! The sweep can be driven one event at a time with [`Sweeper::step`], which
//! is handy for watching the beachline evolve, or all at once with
//! [`Sweeper::run`].

use kurbo::Vec2;

use crate::beachline::{Arc, Beachline};
use crate::diagram::{Diagram, EdgeEnd, HalfEdge, SiteIdx, SiteVec, SweepStats, VertexIdx};
use crate::event::{Event, EventId, EventQueue, CIRCLE_EVENT_SLOP};
use crate::geom::{bisector_direction, circumcircle, evaluate, orientation, Circle, Point};
use crate::tree::NodeIdx;
use crate::{Error, Result};

/// What happened during a single [`Sweeper::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A site was added to the beachline.
    Site(SiteIdx),
    /// An arc disappeared, leaving behind this vertex.
    Circle(VertexIdx),
    /// A circle event turned out to be obsolete, and nothing happened.
    Stale,
}

/// The state of a sweep in progress.
#[derive(Clone, Debug)]
pub struct Sweeper {
    queue: EventQueue,
    beachline: Option<Beachline>,
    diagram: Diagram,
    sweep_y: f64,
}

impl Sweeper {
    /// Prepares to sweep over a set of sites.
    ///
    /// Fails if any coordinate is NaN or infinite, or if two sites coincide.
    pub fn new<P: Into<Point>>(sites: impl IntoIterator<Item = P>) -> Result<Self> {
        let sites: SiteVec<Point> = sites.into_iter().map(Into::into).collect();

        for (site, point) in sites.iter() {
            if !point.is_finite() {
                return Err(Error::NonFinite {
                    site,
                    point: *point,
                });
            }
        }

        let mut sorted: Vec<SiteIdx> = sites.indices().collect();
        sorted.sort_by(|a, b| sites[*a].cmp(&sites[*b]).then(a.cmp(b)));
        for pair in sorted.windows(2) {
            if sites[pair[0]] == sites[pair[1]] {
                return Err(Error::DuplicateSite {
                    first: pair[0],
                    second: pair[1],
                    point: sites[pair[0]],
                });
            }
        }

        let mut queue = EventQueue::new();
        queue.extend(sites.iter().map(|(idx, p)| (idx, *p)));
        tracing::debug!(sites = sites.len(), "starting sweep");

        Ok(Sweeper {
            queue,
            beachline: None,
            diagram: Diagram::new(sites),
            sweep_y: f64::INFINITY,
        })
    }

    /// The current position of the sweep line.
    ///
    /// This is infinite until the first event has been processed.
    pub fn sweep_y(&self) -> f64 {
        self.sweep_y
    }

    /// The beachline, or `None` if we haven't reached the first site yet.
    pub fn beachline(&self) -> Option<&Beachline> {
        self.beachline.as_ref()
    }

    /// The part of the diagram that has been built so far.
    ///
    /// Edges that are still growing are reported as infinite.
    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Counts of the events processed so far.
    pub fn stats(&self) -> SweepStats {
        self.diagram.stats()
    }

    /// Have all events been processed?
    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    /// Processes the next event, returning `None` if there are none left.
    pub fn step(&mut self) -> Result<Option<StepOutcome>> {
        let Some(event) = self.queue.pop() else {
            return Ok(None);
        };
        self.sweep_y = self.sweep_y.min(event.y());

        let outcome = match event {
            Event::Site { site, point } => {
                tracing::trace!(?site, ?point, "site event");
                self.handle_site(site, point)?;
                self.diagram.stats_mut().site_events += 1;
                StepOutcome::Site(site)
            }
            Event::Circle {
                id, valid: false, ..
            } => {
                tracing::trace!(?id, "discarding stale circle event");
                self.diagram.stats_mut().stale_events += 1;
                StepOutcome::Stale
            }
            Event::Circle {
                id,
                arc,
                circle,
                valid: true,
            } => {
                tracing::trace!(?id, ?arc, center = ?circle.center, "circle event");
                let vertex = self.handle_circle(id, arc, circle)?;
                self.diagram.stats_mut().circle_events += 1;
                StepOutcome::Circle(vertex)
            }
        };

        #[cfg(feature = "slow-asserts")]
        if let Some(beachline) = &self.beachline {
            beachline.check_invariants();
        }

        Ok(Some(outcome))
    }

    /// Processes all remaining events and returns the finished diagram.
    pub fn run(mut self) -> Result<Diagram> {
        while self.step()?.is_some() {}
        tracing::debug!(
            vertices = self.diagram.vertices().len(),
            edges = self.diagram.edges().len(),
            stats = ?self.diagram.stats(),
            "sweep finished"
        );
        Ok(self.diagram)
    }

    fn handle_site(&mut self, site: SiteIdx, point: Point) -> Result<()> {
        let Some(beach) = &mut self.beachline else {
            self.beachline = Some(Beachline::new(site, point));
            return Ok(());
        };

        let last = beach
            .last()
            .ok_or(Error::InvariantViolation("empty beachline"))?;

        // Sites sharing the topmost y arrive from left to right. Their arcs
        // are vertical rays, so each one just goes at the right end, and the
        // edge between two of them is vertical and infinite upwards.
        if beach[last].focus.y == point.y {
            let left = beach[last].focus;
            let edge = self.diagram.push_edge(
                [beach[last].site, site],
                left.midpoint(&point),
                [
                    EdgeEnd::Infinite(Vec2::new(0.0, 1.0)),
                    EdgeEnd::Infinite(bisector_direction(left, point)),
                ],
            );
            let half = HalfEdge { edge, end: 1 };
            beach[last].right_edge = Some(half);
            beach.insert_after(
                last,
                Arc {
                    left_edge: Some(half),
                    ..Arc::new(site, point)
                },
            );
            return Ok(());
        }

        let arc = beach.arc_above(point.x, point.y)?;
        if let Some(ev) = beach[arc].event {
            self.queue.invalidate(ev);
        }

        let above = beach[arc].focus;
        let anchor = Point::new(point.x, evaluate(above, point.x, point.y));
        let edge = self.diagram.push_edge(
            [beach[arc].site, site],
            anchor,
            [
                EdgeEnd::Infinite(bisector_direction(above, point)),
                EdgeEnd::Infinite(bisector_direction(point, above)),
            ],
        );
        let (left, _, right) = beach.split(arc, site, point, edge);

        self.check_circle(left)?;
        self.check_circle(right)?;
        Ok(())
    }

    fn handle_circle(&mut self, id: EventId, arc: NodeIdx, circle: Circle) -> Result<VertexIdx> {
        let beach = self
            .beachline
            .as_mut()
            .ok_or(Error::InvariantViolation("circle event before any site"))?;
        let removed = match beach.get(arc) {
            Some(removed) if removed.event == Some(id) => removed.clone(),
            _ => return Err(Error::InvariantViolation("circle event for a vanished arc")),
        };
        let (Some(left), Some(right), Some(left_half), Some(right_half)) = (
            beach.prev(arc),
            beach.next(arc),
            removed.left_edge,
            removed.right_edge,
        ) else {
            return Err(Error::InvariantViolation("circle event for an outermost arc"));
        };

        let vertex = self.diagram.push_vertex(circle.center);
        self.diagram.close(left_half, vertex);
        self.diagram.close(right_half, vertex);

        for neighbor in [left, right] {
            if let Some(ev) = beach[neighbor].event.take() {
                self.queue.invalidate(ev);
            }
        }
        beach.remove(arc);

        let (l, r) = (&beach[left], &beach[right]);
        let edge = self.diagram.push_edge(
            [l.site, r.site],
            circle.center,
            [
                EdgeEnd::Vertex(vertex),
                EdgeEnd::Infinite(bisector_direction(l.focus, r.focus)),
            ],
        );
        let half = HalfEdge { edge, end: 1 };
        beach[left].right_edge = Some(half);
        beach[right].left_edge = Some(half);

        self.check_circle(left)?;
        self.check_circle(right)?;
        Ok(vertex)
    }

    // Schedules a circle event for `arc` if it's going to be squeezed out
    // between its neighbors.
    fn check_circle(&mut self, arc: NodeIdx) -> Result<()> {
        let beach = self
            .beachline
            .as_mut()
            .ok_or(Error::InvariantViolation("empty beachline"))?;
        let (Some(prev), Some(next)) = (beach.prev(arc), beach.next(arc)) else {
            return Ok(());
        };
        let (a, b, c) = (&beach[prev], &beach[arc], &beach[next]);
        if a.site == c.site {
            return Ok(());
        }
        // Collinear foci (and left turns) have diverging breakpoints.
        if orientation(a.focus, b.focus, c.focus) >= 0.0 {
            return Ok(());
        }
        let Some(circle) = circumcircle(a.focus, b.focus, c.focus) else {
            return Ok(());
        };
        let slop = CIRCLE_EVENT_SLOP * self.sweep_y.abs().max(1.0);
        if circle.bottom() > self.sweep_y + slop {
            return Ok(());
        }

        let id = self.queue.push_circle(arc, circle);
        tracing::trace!(?id, ?arc, y = circle.bottom(), "scheduled circle event");
        debug_assert!(b.event.is_none());
        beach[arc].event = Some(id);
        Ok(())
    }
}
