//! Fuzzes the router on many random campus graphs: A* with an admissible
//! heuristic must agree with Dijkstra on reachability and cost, and every
//! returned path must follow existing traversals. All preference combinations
//! are tested.
use campus_router::graph::adjacency::AdjacencyMap;
use campus_router::solver::{astar::AstarSolver, dijkstra::DijkstraSolver, PathSolver};
use campus_router::*;
use rand::prelude::*;

fn random_attributes(rng: &mut StdRng) -> EdgeAttributes {
    EdgeAttributes {
        surface: if rng.gen_bool(0.3) {
            Some("dirt".to_owned())
        } else {
            None
        },
        lit: rng.gen_bool(0.4),
        stairs: rng.gen_bool(0.2),
        shortcut: rng.gen_bool(0.2),
        ..Default::default()
    }
}

/// Nodes scattered over roughly a square kilometre near the equator, with
/// sparse random edges so that some pairs end up disconnected.
fn random_graph(n: usize, rng: &mut StdRng) -> PreparedGraph {
    let nodes = (0..n)
        .map(|i| {
            Node::new(
                &format!("n{i}"),
                &format!("Node {i}"),
                rng.gen_range(0.0..0.01),
                rng.gen_range(0.0..0.01),
                NodeKind::Waypoint,
            )
        })
        .collect::<Vec<_>>();
    let edges = (0..n + n / 2)
        .map(|i| {
            let from = rng.gen_range(0..n);
            let to = rng.gen_range(0..n);
            let mut edge = Edge::new(&format!("e{i}"), &format!("n{from}"), &format!("n{to}"))
                .with_attributes(random_attributes(rng));
            if rng.gen_bool(0.15) {
                edge = edge.directed();
            }
            edge
        })
        .collect::<Vec<_>>();
    PreparedGraph::new(nodes, edges)
}

fn all_preferences() -> Vec<Preferences> {
    let mut all = Vec::new();
    for mask in 0..8u8 {
        all.push(Preferences {
            avoid_dirt: mask & 1 != 0,
            prefer_lit: mask & 2 != 0,
            avoid_stairs: mask & 4 != 0,
            ..Default::default()
        });
    }
    all
}

#[test]
fn fuzz_astar_matches_dijkstra() {
    const N: usize = 25;
    const N_GRAPHS: usize = 300;
    let mut rng = StdRng::seed_from_u64(0);
    let astar = AstarSolver::admissible();
    let preferences = all_preferences();

    for _ in 0..N_GRAPHS {
        let graph = random_graph(N, &mut rng);
        let prefs = &preferences[rng.gen_range(0..preferences.len())];
        let adjacency = AdjacencyMap::build(&graph, prefs);
        let start = rng.gen_range(0..N);
        let goal = rng.gen_range(0..N);

        let astar_result = astar.find_path(&graph, &adjacency, start, goal);
        let dijkstra_result = DijkstraSolver.find_path(&graph, &adjacency, start, goal);
        assert_eq!(astar_result.is_some(), dijkstra_result.is_some());

        if let (Some((path, cost)), Some((_, best))) = (astar_result, dijkstra_result) {
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
            let followed = astar.path_cost(&path, &adjacency);
            assert!(followed.is_some(), "path {path:?} leaves the adjacency");
            assert!(followed.unwrap().is_finite());
            if best > 0.01 {
                let delta = (cost - best).abs() / best;
                assert!(delta < 1e-9, "A* cost {cost} vs Dijkstra {best}");
            }
        }
    }
}

#[test]
fn fuzz_route_invariants() {
    const N: usize = 20;
    const N_GRAPHS: usize = 200;
    let mut rng = StdRng::seed_from_u64(7);
    let router = Router::default();

    for _ in 0..N_GRAPHS {
        let graph = random_graph(N, &mut rng);
        let start = LatLng::new(rng.gen_range(-0.002..0.012), rng.gen_range(-0.002..0.012));
        let goal = LatLng::new(rng.gen_range(-0.002..0.012), rng.gen_range(-0.002..0.012));
        let prefs = Preferences {
            speed_meters_per_min: rng.gen_range(10.0..300.0),
            ..Default::default()
        };
        match router.route(start, goal, &graph, &prefs) {
            Ok(route) => {
                assert!(route.duration_minutes >= 1);
                assert_eq!(route.waypoint_count, route.path.len());
                assert_eq!(route.instructions.len(), route.path.len() - 1);
                let again = router.route(start, goal, &graph, &prefs).unwrap();
                assert_eq!(route, again);
            }
            Err(RouteError::GraphNotApplicable { distance_m, limit_m, .. }) => {
                assert!(distance_m > limit_m);
            }
            Err(RouteError::NoPathFound { .. }) => {}
            Err(other) => panic!("unexpected error {other:?}"),
        }
    }
}
