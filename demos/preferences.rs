use campus_router::graph::adjacency::AdjacencyMap;
use campus_router::solver::{astar::AstarSolver, PathSolver};
use campus_router::{Edge, EdgeAttributes, Node, NodeKind, PreparedGraph, Preferences};

// Between the library and the hostel there is a short staircase and a longer
// ramp. Once stairs are avoided the doubled staircase costs more than the ramp.
//
//   library ==stairs== hostel
//      \                 /
//       ---- ramp_top ---
fn main() {
    let graph = PreparedGraph::new(
        vec![
            Node::new("library", "Library", 6.1259, 8.1457, NodeKind::Building),
            Node::new("ramp_top", "Ramp", 6.1263, 8.1462, NodeKind::Path),
            Node::new("hostel", "Hostel C", 6.1259, 8.1467, NodeKind::Hostel),
        ],
        vec![
            Edge::new("stairs", "library", "hostel").with_attributes(EdgeAttributes {
                stairs: true,
                ..Default::default()
            }),
            Edge::new("ramp_up", "library", "ramp_top"),
            Edge::new("ramp_down", "ramp_top", "hostel"),
        ],
    );
    let solver = AstarSolver::new();

    for avoid_stairs in [false, true] {
        let prefs = Preferences {
            avoid_stairs,
            ..Default::default()
        };
        let adjacency = AdjacencyMap::build(&graph, &prefs);
        if let Some(path) = solver.find_id_path(&graph, &adjacency, "library", "hostel") {
            println!("avoid_stairs = {avoid_stairs}: {}", path.join(" -> "));
        }
    }
}
