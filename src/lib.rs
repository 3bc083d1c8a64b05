#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

use arrayvec::ArrayVec;

#[macro_use]
mod typed_vec;

#[cfg(any(test, feature = "arbitrary"))]
pub mod arbitrary;
pub mod beachline;
pub mod diagram;
pub mod event;
pub mod geom;
mod num;
pub mod sweep;
pub mod tree;

#[cfg(feature = "generators")]
pub mod generators;

pub use diagram::{Diagram, Edge, EdgeEnd, EdgeIdx, SiteIdx, SweepStats, VertexIdx};
pub use geom::Point;
pub use sweep::{StepOutcome, Sweeper};

/// Everything that can go wrong while computing a diagram.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A geometric predicate was asked about a configuration it can't answer.
    #[error("degenerate geometry ({reason}) at {points:?}")]
    InvalidGeometry {
        /// What was wrong.
        reason: &'static str,
        /// The points involved.
        points: ArrayVec<Point, 3>,
    },
    /// Two input sites are at the same position.
    #[error("sites {first:?} and {second:?} coincide at {point:?}")]
    DuplicateSite {
        /// The earlier of the two sites.
        first: SiteIdx,
        /// The later of the two sites.
        second: SiteIdx,
        /// Where they are.
        point: Point,
    },
    /// An input site has a NaN or infinite coordinate.
    #[error("site {site:?} has a non-finite coordinate {point:?}")]
    NonFinite {
        /// The offending site.
        site: SiteIdx,
        /// Its coordinates.
        point: Point,
    },
    /// The sweep found its own state inconsistent.
    ///
    /// This is a bug (or the result of numerical trouble), and the sweep can't
    /// continue.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(&'static str),
}

impl Error {
    pub(crate) fn geometry(reason: &'static str, points: &[Point]) -> Self {
        Error::InvalidGeometry {
            reason,
            points: points.iter().copied().take(3).collect(),
        }
    }
}

/// A `Result` whose error defaults to our [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Computes the Voronoi diagram of a set of sites.
///
/// Sites are numbered in the order they're given, and the diagram refers to
/// them by those numbers. This is shorthand for [`Sweeper::new`] followed by
/// [`Sweeper::run`].
///
/// ```
/// let diagram = fortune_sweep::voronoi([(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]).unwrap();
/// assert_eq!(diagram.vertices().len(), 1);
/// assert_eq!(diagram.edges().len(), 3);
/// ```
pub fn voronoi<P: Into<Point>>(sites: impl IntoIterator<Item = P>) -> Result<Diagram> {
    Sweeper::new(sites)?.run()
}
