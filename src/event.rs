//! The queue of site and circle events that drives the sweep.
//!
//! The sweep line moves downwards, so events come out highest first. Circle
//! events are never removed from the heap once queued: when one stops being
//! relevant we mark it invalid, and it comes back out as a stale event.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::diagram::SiteIdx;
use crate::geom::{Circle, Point};
use crate::num::CheapOrderedFloat;
use crate::tree::NodeIdx;

/// Relative tolerance for deciding that a circle's bottom isn't above the sweep line.
///
/// A circle through the site that was just inserted touches the sweep line
/// exactly, but rounding can put its computed bottom a hair above it. Such a
/// circle still produces an event; one that's clearly above the sweep line
/// was already passed and doesn't.
pub const CIRCLE_EVENT_SLOP: f64 = 1e-9;

/// Identifies a scheduled circle event, so that it can be invalidated later.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct EventId(usize);

impl std::fmt::Debug for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ev_{}", self.0)
    }
}

/// An event, as popped from the queue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// The sweep line reached a site.
    Site {
        /// The site's index.
        site: SiteIdx,
        /// The site's position.
        point: Point,
    },
    /// The sweep line reached the bottom of a circle through three consecutive sites.
    Circle {
        /// The id that was handed out when this event was scheduled.
        id: EventId,
        /// The beachline node of the arc that disappears.
        arc: NodeIdx,
        /// The circle; its center is a Voronoi vertex.
        circle: Circle,
        /// False if the event was invalidated while it was queued.
        valid: bool,
    },
}

impl Event {
    /// The position of the sweep line when this event happens.
    pub fn y(&self) -> f64 {
        match self {
            Event::Site { point, .. } => point.y,
            Event::Circle { circle, .. } => circle.bottom(),
        }
    }

    /// Was this event invalidated before it was popped?
    pub fn is_stale(&self) -> bool {
        matches!(self, Event::Circle { valid: false, .. })
    }
}

// The heap is a max-heap, so "greater" means "sooner". Sooner events are
// higher, then further left; at the same point a circle event comes first,
// and after that the earlier push.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Priority {
    y: CheapOrderedFloat,
    x: Reverse<CheapOrderedFloat>,
    is_circle: bool,
    seq: Reverse<u64>,
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Site(SiteIdx, Point),
    Circle(EventId),
}

#[derive(Clone, Copy, Debug)]
struct Queued {
    priority: Priority,
    kind: Kind,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority.cmp(&other.priority)
    }
}

#[derive(Clone, Copy, Debug)]
struct CircleSlot {
    arc: NodeIdx,
    circle: Circle,
    valid: bool,
}

/// A priority queue of events, with lazy removal of circle events.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Queued>,
    circles: Vec<CircleSlot>,
    seq: u64,
    live: usize,
}

impl EventQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    fn priority(&mut self, y: f64, x: f64, is_circle: bool) -> Priority {
        self.seq += 1;
        Priority {
            y: y.into(),
            x: Reverse(x.into()),
            is_circle,
            seq: Reverse(self.seq),
        }
    }

    /// Schedules a site event.
    pub fn push_site(&mut self, site: SiteIdx, point: Point) {
        let priority = self.priority(point.y, point.x, false);
        self.heap.push(Queued {
            priority,
            kind: Kind::Site(site, point),
        });
        self.live += 1;
    }

    /// Schedules a circle event at the bottom of `circle`, which will remove `arc`.
    pub fn push_circle(&mut self, arc: NodeIdx, circle: Circle) -> EventId {
        let id = EventId(self.circles.len());
        self.circles.push(CircleSlot {
            arc,
            circle,
            valid: true,
        });
        let priority = self.priority(circle.bottom(), circle.center.x, true);
        self.heap.push(Queued {
            priority,
            kind: Kind::Circle(id),
        });
        self.live += 1;
        id
    }

    /// Marks a circle event as no longer relevant.
    ///
    /// It stays queued, and pops out as a stale event. Invalidating an event
    /// that's already invalid, or was already popped, does nothing.
    pub fn invalidate(&mut self, id: EventId) {
        if let Some(slot) = self.circles.get_mut(id.0) {
            if slot.valid {
                slot.valid = false;
                self.live -= 1;
            }
        }
    }

    /// Is this circle event still pending and valid?
    pub fn is_valid(&self, id: EventId) -> bool {
        self.circles.get(id.0).is_some_and(|slot| slot.valid)
    }

    /// Removes and returns the next event.
    pub fn pop(&mut self) -> Option<Event> {
        let queued = self.heap.pop()?;
        Some(match queued.kind {
            Kind::Site(site, point) => {
                self.live -= 1;
                Event::Site { site, point }
            }
            Kind::Circle(id) => {
                let slot = &mut self.circles[id.0];
                let event = Event::Circle {
                    id,
                    arc: slot.arc,
                    circle: slot.circle,
                    valid: slot.valid,
                };
                if slot.valid {
                    // A popped event can't be invalidated any more.
                    slot.valid = false;
                    self.live -= 1;
                }
                event
            }
        })
    }

    /// The height of the next event, stale or not.
    pub fn peek_y(&self) -> Option<f64> {
        self.heap.peek().map(|q| q.priority.y.into_inner())
    }

    /// The number of queued events, including invalidated ones.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The number of queued events that are still valid.
    pub fn live_len(&self) -> usize {
        self.live
    }
}

impl Extend<(SiteIdx, Point)> for EventQueue {
    fn extend<I: IntoIterator<Item = (SiteIdx, Point)>>(&mut self, iter: I) {
        for (site, point) in iter {
            self.push_site(site, point);
        }
    }
}
