//! Geometric primitives: points, parabolic arcs and circles.
//!
//! The sweep line is horizontal and moves from large `y` to small `y`, so
//! every arc's directrix lies at or below its focus. An arc is described only
//! by its focus; the directrix is supplied per query.

use kurbo::Vec2;

use crate::{Error, Result};

/// A two-dimensional point.
///
/// Points are sorted by `y` and then by `x`.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical coordinate. The sweep line starts at the largest `y` and moves down.
    pub y: f64,
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use crate::num::CheapOrderedFloat as F;
        (F::from(self.y), F::from(self.x)).cmp(&(F::from(other.y), F::from(other.x)))
    }
}

impl PartialOrd for Point {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Point {}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Are both coordinates finite?
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// The Euclidean distance between two points.
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The midpoint of the segment between `self` and `other`.
    pub fn midpoint(&self, other: &Self) -> Self {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Converts to a `kurbo` point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl std::ops::Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A circle, as found through three sites.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Circle {
    /// The center, which becomes a Voronoi vertex.
    pub center: Point,
    /// The common distance from the center to the three sites.
    pub radius: f64,
}

impl Circle {
    /// The height at which a descending sweep line touches the circle for the last time.
    pub fn bottom(&self) -> f64 {
        self.center.y - self.radius
    }
}

/// Coefficients `(a, b, c)` of the parabola `y = a x² + b x + c` with the given focus and directrix.
///
/// Fails if the directrix passes through the focus, in which case the arc is a
/// vertical ray, or if it lies above the focus.
pub fn coefficients(focus: Point, directrix: f64) -> Result<(f64, f64, f64)> {
    if focus.y <= directrix {
        return Err(Error::geometry(
            "directrix does not lie below the focus",
            &[focus],
        ));
    }
    let a = 1.0 / (2.0 * (focus.y - directrix));
    let b = -2.0 * a * focus.x;
    let c = a * (focus.x * focus.x + focus.y * focus.y - directrix * directrix);
    Ok((a, b, c))
}

/// The height of the arc with the given focus above `x`.
///
/// The result is infinite if the directrix passes through the focus (unless
/// `x` is exactly below the focus), because the arc is then a vertical ray.
pub fn evaluate(focus: Point, x: f64, directrix: f64) -> f64 {
    let dx = x - focus.x;
    dx * dx / (2.0 * (focus.y - directrix)) + (focus.y + directrix) / 2.0
}

/// The `x` coordinate where the arc of `left` meets the arc of `right`, with `left` on the left.
///
/// Two arcs with distinct foci at different heights meet twice. The wider arc
/// (the one with the higher focus) is the lower one outside the two
/// intersections, so if `left` is higher we want the smaller root and
/// otherwise the larger one.
///
/// A focus that lies on the directrix belongs to a site that the sweep line
/// has only just reached; its arc is a vertical ray below the site, and so the
/// breakpoint is directly below it.
pub fn breakpoint(left: Point, right: Point, directrix: f64) -> Result<f64> {
    if left == right {
        tracing::warn!(?left, "asked for the breakpoint of an arc with itself");
        return Err(Error::geometry(
            "breakpoint of an arc with itself",
            &[left, right],
        ));
    }
    if left.y < directrix || right.y < directrix {
        return Err(Error::geometry("directrix above a focus", &[left, right]));
    }

    match (left.y == directrix, right.y == directrix) {
        (true, true) => return Ok((left.x + right.x) / 2.0),
        (true, false) => return Ok(left.x),
        (false, true) => return Ok(right.x),
        (false, false) => {}
    }

    let (a0, b0, c0) = coefficients(left, directrix)?;
    let (a1, b1, c1) = coefficients(right, directrix)?;
    let (a, b, c) = (a0 - a1, b0 - b1, c0 - c1);

    if a == 0.0 {
        if b == 0.0 {
            return Err(Error::geometry("coincident arcs", &[left, right]));
        }
        return Ok(-c / b);
    }

    ordered_root(a, b, c, left.y > right.y)
}

// One root of `a x² + b x + c`: the smaller if `lower`, otherwise the larger.
//
// Two distinct parabolas opening upwards with a common directrix always meet,
// so a negative discriminant means the arithmetic has gone wrong upstream.
fn ordered_root(a: f64, b: f64, c: f64, lower: bool) -> Result<f64> {
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        tracing::warn!(a, b, c, disc, "breakpoint quadratic has no real roots");
        return Err(Error::InvariantViolation("arcs do not meet"));
    }
    if disc == 0.0 {
        return Ok(-b / (2.0 * a));
    }

    // Avoid cancellation between -b and the square root.
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    let r0 = q / a;
    let r1 = c / q;
    let (lo, hi) = if r0 <= r1 { (r0, r1) } else { (r1, r0) };
    Ok(if lower { lo } else { hi })
}

/// The cross product `(b - a) × (c - b)`.
///
/// Negative for a right (clockwise) turn, which is exactly when the breakpoints
/// between three consecutive arcs `a`, `b`, `c` run towards each other.
pub fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - b)
}

/// The circle through three points, or `None` if they are collinear.
pub fn circumcircle(a: Point, b: Point, c: Point) -> Option<Circle> {
    let (bx, by) = (b.x - a.x, b.y - a.y);
    let (cx, cy) = (c.x - a.x, c.y - a.y);
    let d = 2.0 * (bx * cy - by * cx);
    if d == 0.0 {
        return None;
    }
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;
    let center = Point::new(a.x + ux, a.y + uy);
    if !center.is_finite() {
        return None;
    }
    Some(Circle {
        center,
        radius: ux.hypot(uy),
    })
}

/// The direction in which the breakpoint between the arcs of `left` and `right` travels.
///
/// This is `right - left` turned a quarter clockwise, so `left` stays on the
/// right-hand side of the path (facing downwards, that's to the west).
pub fn bisector_direction(left: Point, right: Point) -> Vec2 {
    Vec2::new(right.y - left.y, left.x - right.x)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::num::{approx_eq, tests::Reasonable};
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    impl Reasonable for Point {
        type Strategy = BoxedStrategy<Point>;

        fn reasonable() -> Self::Strategy {
            (f64::reasonable(), f64::reasonable())
                .prop_map(|(x, y)| Point::new(x, y))
                .boxed()
        }
    }

    #[test]
    fn coefficients_match_evaluate() {
        let focus = Point::new(1.0, 3.0);
        let (a, b, c) = coefficients(focus, -1.0).unwrap();
        for x in [-2.0, 0.0, 0.5, 4.0] {
            assert!(approx_eq(a * x * x + b * x + c, evaluate(focus, x, -1.0), 1e-12));
        }
        assert_eq!(evaluate(focus, 1.0, -1.0), 1.0);
    }

    #[test]
    fn kurbo_conversions() {
        let p = Point::new(1.5, -2.0);
        assert_eq!(Point::from(p.to_kurbo()), p);
        assert_eq!((p - Point::new(1.0, 1.0)), Vec2::new(0.5, -3.0));
        assert_eq!(p + Vec2::new(0.5, 2.0), Point::new(2.0, 0.0));
    }

    #[test]
    fn degenerate_coefficients() {
        let focus = Point::new(1.0, 3.0);
        assert_matches!(
            coefficients(focus, 3.0),
            Err(Error::InvalidGeometry { .. })
        );
        assert_matches!(
            coefficients(focus, 4.0),
            Err(Error::InvalidGeometry { .. })
        );
    }

    #[test]
    fn breakpoint_same_height() {
        let p = Point::new(0.0, 0.0);
        let q = Point::new(4.0, 0.0);
        assert_eq!(breakpoint(p, q, -1.0).unwrap(), 2.0);
        assert_eq!(breakpoint(q, p, -1.0).unwrap(), 2.0);
    }

    #[test]
    fn breakpoint_picks_the_ordered_root() {
        // These arcs meet at about -1.055
        // and 3.555 when the sweep line is at -1.
        let p = Point::new(0.0, 4.0);
        let q = Point::new(1.0, 0.0);

        let pq = breakpoint(p, q, -1.0).unwrap();
        let qp = breakpoint(q, p, -1.0).unwrap();
        assert!(approx_eq(pq, (10.0 - 340.0f64.sqrt()) / 8.0, 1e-12));
        assert!(approx_eq(qp, (10.0 + 340.0f64.sqrt()) / 8.0, 1e-12));

        // Just left of the (p, q) breakpoint, p's arc is the lower one.
        assert!(evaluate(p, pq - 0.1, -1.0) < evaluate(q, pq - 0.1, -1.0));
        assert!(evaluate(p, pq + 0.1, -1.0) > evaluate(q, pq + 0.1, -1.0));
        // And just right of the (q, p) breakpoint, p is lower again.
        assert!(evaluate(q, qp - 0.1, -1.0) < evaluate(p, qp - 0.1, -1.0));
        assert!(evaluate(q, qp + 0.1, -1.0) > evaluate(p, qp + 0.1, -1.0));
    }

    #[test]
    fn breakpoint_on_the_sweep_line() {
        let top = Point::new(0.0, 4.0);
        let new = Point::new(1.5, 0.0);
        assert_eq!(breakpoint(top, new, 0.0).unwrap(), 1.5);
        assert_eq!(breakpoint(new, top, 0.0).unwrap(), 1.5);

        let other = Point::new(3.5, 0.0);
        assert_eq!(breakpoint(new, other, 0.0).unwrap(), 2.5);
    }

    #[test]
    fn breakpoint_with_itself() {
        let p = Point::new(1.0, 1.0);
        assert_matches!(
            breakpoint(p, p, 0.0),
            Err(Error::InvalidGeometry { points, .. }) if points.as_slice() == &[p, p][..]
        );
    }

    #[test]
    fn roots() {
        // (x - 1)(x - 3)
        assert_eq!(ordered_root(1.0, -4.0, 3.0, true).unwrap(), 1.0);
        assert_eq!(ordered_root(1.0, -4.0, 3.0, false).unwrap(), 3.0);
        // (x - 2)²
        assert_eq!(ordered_root(1.0, -4.0, 4.0, true).unwrap(), 2.0);
        // x² + 1 has no real roots, which arcs that share a directrix can't do.
        assert_matches!(
            ordered_root(1.0, 0.0, 1.0, true),
            Err(Error::InvariantViolation("arcs do not meet"))
        );
    }

    #[test]
    fn circle() {
        let c = circumcircle(
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 4.0),
        )
        .unwrap();
        assert!(approx_eq(c.center.x, 2.0, 1e-12));
        assert!(approx_eq(c.center.y, 2.0, 1e-12));
        assert!(approx_eq(c.radius, 8.0f64.sqrt(), 1e-12));
        assert!(approx_eq(c.bottom(), 2.0 - 8.0f64.sqrt(), 1e-12));

        assert!(circumcircle(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0)
        )
        .is_none());
    }

    #[test]
    fn converging_turn() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 4.0);
        let c = Point::new(4.0, 0.0);
        assert!(orientation(a, b, c) < 0.0);
        assert!(orientation(c, b, a) > 0.0);
        assert_eq!(
            orientation(a, Point::new(1.0, 0.0), Point::new(2.0, 0.0)),
            0.0
        );
    }

    #[test]
    fn direction_of_travel() {
        let p = Point::new(0.0, 4.0);
        let q = Point::new(1.0, 0.0);
        let dir = bisector_direction(p, q);
        let before = breakpoint(p, q, -1.0).unwrap();
        let after = breakpoint(p, q, -2.0).unwrap();
        assert!((after - before) * dir.x > 0.0);
    }

    proptest! {
        #[test]
        fn breakpoint_is_on_both_arcs(
            p in Point::reasonable(),
            q in Point::reasonable(),
            depth in 1.0..100.0f64,
        ) {
            prop_assume!(p.distance(&q) > 1e-3);
            let directrix = p.y.min(q.y) - depth;
            let x = breakpoint(p, q, directrix).unwrap();
            prop_assert!(x.is_finite());
            let yp = evaluate(p, x, directrix);
            let yq = evaluate(q, x, directrix);
            prop_assert!(approx_eq(yp, yq, 1e-6), "{yp} vs {yq}");
        }

        #[test]
        fn circumcircle_is_equidistant(
            a in Point::reasonable(),
            b in Point::reasonable(),
            c in Point::reasonable(),
        ) {
            prop_assume!(orientation(a, b, c).abs() > 1e3);
            let circle = circumcircle(a, b, c).unwrap();
            for p in [a, b, c] {
                prop_assert!(approx_eq(circle.center.distance(&p), circle.radius, 1e-6));
            }
        }
    }
}
