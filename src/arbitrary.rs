//! Utilities for fuzz and/or property testing using `arbitrary`.

use arbitrary::Unstructured;

use crate::geom::Point;

/// Generate an arbitrary float in some range.
pub fn float_in_range(
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let num: u32 = u.arbitrary()?;
    let t = num as f64 / u32::MAX as f64;
    Ok((1.0 - t) * start + t * end)
}

fn float(u: &mut Unstructured<'_>) -> Result<f64, arbitrary::Error> {
    float_in_range(-1e3, 1e3, u)
}

/// Generate a float in some range, but give it a chance to be close to another float.
fn another_float_in_range(
    orig: f64,
    start: f64,
    end: f64,
    u: &mut Unstructured<'_>,
) -> Result<f64, arbitrary::Error> {
    let close: bool = u.arbitrary()?;
    if close {
        let ulps: i32 = u.int_in_range(-32..=32)?;
        let scale = 1.0f64 + ulps as f64 * f64::EPSILON;
        Ok((orig * scale).clamp(start, end))
    } else {
        float_in_range(start, end, u)
    }
}

/// Generate an arbitrary point with coordinates in `[-1000, 1000]`.
pub fn point(u: &mut Unstructured<'_>) -> Result<Point, arbitrary::Error> {
    Ok(Point::new(float(u)?, float(u)?))
}

/// Generate a set of distinct sites.
///
/// The sites are biased towards the configurations that the sweep treats
/// specially: several sites on one horizontal line, sites directly above one
/// another, and sites very close together.
pub fn sites(u: &mut Unstructured<'_>) -> Result<Vec<Point>, arbitrary::Error> {
    let len = u.int_in_range(0..=64)?;
    let mut ret: Vec<Point> = Vec::with_capacity(len);
    for _ in 0..len {
        let kind: u8 = if ret.is_empty() {
            0
        } else {
            u.int_in_range(0..=3)?
        };
        let p = match kind {
            1 => {
                let other = *u.choose(&ret)?;
                Point::new(float(u)?, other.y)
            }
            2 => {
                let other = *u.choose(&ret)?;
                Point::new(other.x, float(u)?)
            }
            3 => {
                let other = *u.choose(&ret)?;
                Point::new(
                    another_float_in_range(other.x, -1e3, 1e3, u)?,
                    another_float_in_range(other.y, -1e3, 1e3, u)?,
                )
            }
            _ => point(u)?,
        };
        ret.push(p);
    }
    ret.sort();
    ret.dedup();
    Ok(ret)
}

/// Property tests driven by `arbitrary`, shared between unit tests and fuzz targets.
pub mod arbtests {
    use arbitrary::{Arbitrary, Unstructured};

    use super::{float_in_range, point, sites};
    use crate::geom::{breakpoint, evaluate};
    use crate::num::approx_eq;
    use crate::tree::{NodeIdx, Tree};
    use crate::{Error, Sweeper};

    #[derive(Arbitrary, Debug)]
    enum Op {
        InsertBefore { idx: usize, val: i32 },
        InsertAfter { idx: usize, val: i32 },
        Remove { idx: usize },
    }

    /// Mutates a [`Tree`] and a `Vec` in lockstep, and checks that they agree.
    pub fn tree_mutation(u: &mut Unstructured<'_>) -> arbitrary::Result<()> {
        let len = u.arbitrary_len::<Op>()?;
        let mut tree = Tree::new();
        let mut model: Vec<(NodeIdx, i32)> = Vec::new();

        for _ in 0..len {
            let op: Op = u.arbitrary()?;
            match op {
                Op::InsertBefore { val, .. } | Op::InsertAfter { val, .. } if model.is_empty() => {
                    model.push((tree.insert_root(val), val));
                }
                Op::InsertBefore { idx, val } => {
                    let idx = idx % model.len();
                    let node = tree.insert_before(model[idx].0, val);
                    model.insert(idx, (node, val));
                }
                Op::InsertAfter { idx, val } => {
                    let idx = idx % model.len();
                    let node = tree.insert_after(model[idx].0, val);
                    model.insert(idx + 1, (node, val));
                }
                Op::Remove { idx } => {
                    if !model.is_empty() {
                        let (node, val) = model.remove(idx % model.len());
                        assert_eq!(tree.remove(node), val);
                    }
                }
            }
            tree.check_invariants();

            assert_eq!(tree.len(), model.len());
            assert!(tree.iter().map(|(n, v)| (n, *v)).eq(model.iter().copied()));
        }
        Ok(())
    }

    /// Checks that the breakpoint of two arcs is on both of them.
    pub fn breakpoint_on_both_arcs(u: &mut Unstructured<'_>) -> arbitrary::Result<()> {
        let left = point(u)?;
        let right = point(u)?;
        if left.distance(&right) < 1e-3 {
            return Ok(());
        }
        let directrix = left.y.min(right.y) - float_in_range(1e-2, 1e3, u)?;

        let x = breakpoint(left, right, directrix).unwrap();
        let y0 = evaluate(left, x, directrix);
        let y1 = evaluate(right, x, directrix);
        assert!(approx_eq(y0, y1, 1e-6), "{y0} vs {y1}");
        Ok(())
    }

    /// Runs a whole sweep, checking the beachline after every event.
    pub fn sweep(u: &mut Unstructured<'_>) -> arbitrary::Result<()> {
        let sites = sites(u)?;
        let n = sites.len();
        let mut sweeper = Sweeper::new(sites).unwrap();

        loop {
            match sweeper.step() {
                Ok(Some(_)) => {}
                Ok(None) => break,
                // Nearly-coincident sites can push the arithmetic too far.
                Err(Error::InvalidGeometry { .. } | Error::InvariantViolation(_)) => return Ok(()),
                Err(e) => panic!("unexpected error {e}"),
            }
            if let Some(beach) = sweeper.beachline() {
                beach.check_invariants();
            }
        }

        let stats = sweeper.stats();
        let diagram = sweeper.run().unwrap();
        assert_eq!(stats.site_events, n);
        assert_eq!(stats.circle_events, diagram.vertices().len());
        // Every site after the first starts one edge, and so does every vertex.
        assert_eq!(
            diagram.edges().len(),
            n.saturating_sub(1) + diagram.vertices().len()
        );
        for (_, edge) in diagram.edges().iter() {
            let [s, t] = edge.sites();
            assert_ne!(s, t);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::arbtests;

    #[test]
    fn tree_mutation() {
        arbtest::arbtest(arbtests::tree_mutation);
    }

    #[test]
    fn breakpoint_on_both_arcs() {
        arbtest::arbtest(arbtests::breakpoint_on_both_arcs);
    }

    #[test]
    fn sweep() {
        arbtest::arbtest(arbtests::sweep);
    }
}
