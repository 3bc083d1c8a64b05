use assert_matches::assert_matches;
use fortune_sweep::{voronoi, Diagram, EdgeEnd, Error, Point, SiteIdx, StepOutcome, Sweeper};
use proptest::prelude::*;

// Checks the defining property of the diagram: every vertex is equally far
// from the sites of each edge that ends there, and no site is any closer.
fn check_vertices(diagram: &Diagram) {
    let scale = diagram
        .sites()
        .values()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(1.0, f64::max);
    let tol = 1e-7 * scale;

    for (_, edge) in diagram.edges().iter() {
        let [s, t] = edge.sites();
        let (s, t) = (diagram.site(s), diagram.site(t));
        for end in edge.ends() {
            let EdgeEnd::Vertex(v) = end else {
                continue;
            };
            let v = diagram.vertex(v);
            let r = v.distance(&s);
            assert!((r - v.distance(&t)).abs() <= tol, "{v:?} isn't on the bisector");
            for p in diagram.sites().values() {
                assert!(v.distance(p) >= r - tol, "{p:?} is inside the circle at {v:?}");
            }
        }
    }
}

fn check_counts(diagram: &Diagram) {
    let n = diagram.sites().len();
    let stats = diagram.stats();
    assert_eq!(stats.site_events, n);
    assert_eq!(stats.circle_events, diagram.vertices().len());
    if n >= 3 {
        assert!(diagram.vertices().len() <= 2 * n - 5);
        assert!(diagram.edges().len() <= 3 * n - 6);
    }
}

#[test]
fn right_triangle() {
    let diagram = voronoi([(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]).unwrap();
    assert_eq!(diagram.vertices().len(), 1);
    assert_eq!(diagram.edges().len(), 3);
    let v = diagram.vertices().values().next().unwrap();
    assert!(v.distance(&Point::new(2.0, 2.0)) < 1e-12);
    check_vertices(&diagram);
    check_counts(&diagram);

    // Every cell has two edges, and the vertex is on both.
    for site in diagram.sites().indices() {
        let cell = diagram.cell_of(site);
        assert_eq!(cell.len(), 2);
        for e in cell {
            assert!(diagram.edge(e).touches(site));
        }
    }
}

#[test]
fn square() {
    // Four cocircular sites: the sweep finds the center twice.
    let diagram = voronoi([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]).unwrap();
    assert!(!diagram.vertices().is_empty());
    for v in diagram.vertices().values() {
        assert!(v.distance(&Point::new(0.5, 0.5)) < 1e-9);
    }
    check_vertices(&diagram);
    check_counts(&diagram);
}

#[test]
fn collinear_sites() {
    let diagram = voronoi((0..6).map(|i| (i as f64, 2.0 * i as f64))).unwrap();
    assert!(diagram.vertices().is_empty());
    assert_eq!(diagram.edges().len(), 5);
    for (idx, edge) in diagram.edges().iter() {
        assert!(!edge.is_bounded());
        assert_eq!(diagram.ray(idx), None);
        assert_eq!(diagram.segment(idx), None);
        // All the bisectors are parallel.
        let EdgeEnd::Infinite(dir) = edge.start() else {
            panic!("bounded end");
        };
        assert_eq!(dir.x * 2.0 + dir.y * 4.0, 0.0);
    }
}

#[test]
fn horizontal_sites() {
    let diagram = voronoi([(3.0, 1.0), (1.0, 1.0), (2.0, 1.0), (0.0, 1.0)]).unwrap();
    assert!(diagram.vertices().is_empty());
    assert_eq!(diagram.edges().len(), 3);
    let mut xs: Vec<f64> = diagram
        .edges()
        .values()
        .map(|e| e.anchor().x)
        .collect();
    xs.sort_by(f64::total_cmp);
    assert_eq!(xs, vec![0.5, 1.5, 2.5]);
}

#[test]
fn bounded_edges() {
    // A hexagon around a center site: the center's cell is bounded.
    let mut sites = vec![(0.0, 0.0)];
    for k in 0..6 {
        let theta = std::f64::consts::TAU * (k as f64 + 0.1) / 6.0;
        sites.push((2.0 * theta.cos(), 2.0 * theta.sin()));
    }
    let diagram = voronoi(sites).unwrap();
    check_vertices(&diagram);
    check_counts(&diagram);

    let cell = diagram.cell_of(SiteIdx(0));
    assert_eq!(cell.len(), 6);
    for &e in &cell {
        let (p, q) = diagram.segment(e).unwrap();
        // Each segment is on the bisector between the center and a neighbor,
        // at distance 1 from the center.
        assert!((p.midpoint(&q).distance(&Point::new(0.0, 0.0)) - 1.0).abs() < 1e-9);
    }

    // Counter-clockwise order around the center.
    let angles: Vec<f64> = cell
        .iter()
        .map(|&e| {
            let (p, q) = diagram.segment(e).unwrap();
            let m = p.midpoint(&q);
            m.y.atan2(m.x)
        })
        .collect();
    assert!(angles.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn stepping_matches_running() {
    let sites = [(0.3, 5.0), (2.0, 1.0), (-1.0, 0.5), (4.0, 3.0), (1.5, -2.0), (-3.0, 2.0)];
    let mut sweeper = Sweeper::new(sites).unwrap();
    let mut outcomes = Vec::new();
    let mut last_y = f64::INFINITY;
    while let Some(outcome) = sweeper.step().unwrap() {
        assert!(sweeper.sweep_y() <= last_y);
        last_y = sweeper.sweep_y();
        sweeper.beachline().unwrap().check_invariants();
        outcomes.push(outcome);
    }
    let stepped = sweeper.run().unwrap();

    assert_eq!(
        outcomes
            .iter()
            .filter(|o| matches!(o, StepOutcome::Site(_)))
            .count(),
        6
    );
    assert_eq!(outcomes.first(), Some(&StepOutcome::Site(SiteIdx(0))));

    let run = voronoi(sites).unwrap();
    assert_eq!(run, stepped);
    check_vertices(&run);
    check_counts(&run);
}

#[test]
fn bad_input() {
    assert_matches!(
        voronoi([(0.0, 0.0), (f64::NAN, 1.0)]),
        Err(Error::NonFinite { site: SiteIdx(1), .. })
    );
    assert_matches!(
        voronoi([(0.0, 0.0), (1.0, 1.0), (0.0, -0.0)]),
        Err(Error::DuplicateSite { .. })
    );
}

fn sites(max: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-1e3..1e3, -1e3..1e3), 0..max)
}

proptest! {
    #[test]
    fn random_sites(sites in sites(40)) {
        let mut points: Vec<Point> = sites.into_iter().map(Point::from).collect();
        points.sort();
        points.dedup();

        let diagram = voronoi(points.iter().copied()).unwrap();
        check_vertices(&diagram);
        check_counts(&diagram);
        prop_assert_eq!(
            diagram.edges().len(),
            points.len().saturating_sub(1) + diagram.vertices().len()
        );

        let again = voronoi(points).unwrap();
        prop_assert_eq!(diagram.vertices(), again.vertices());
    }

    #[test]
    fn integer_sites(sites in prop::collection::vec((-20i32..20, -20i32..20), 0..40)) {
        // Small integer coordinates make for lots of shared rows, columns and
        // cocircular quadruples.
        let mut points: Vec<Point> = sites
            .into_iter()
            .map(|(x, y)| Point::new(x.into(), y.into()))
            .collect();
        points.sort();
        points.dedup();

        let n = points.len();
        let diagram = voronoi(points).unwrap();
        check_vertices(&diagram);
        prop_assert_eq!(diagram.stats().circle_events, diagram.vertices().len());
        prop_assert_eq!(diagram.edges().len(), n.saturating_sub(1) + diagram.vertices().len());
    }
}
