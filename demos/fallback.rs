use campus_router::strategy::{RoutePlanner, RouteRequest, StrategyOutcome};
use campus_router::{Edge, LatLng, Node, NodeKind, PreparedGraph, Preferences, RouterConfig};

// The campus graph does not reach the town centre, so the planner falls back to
// a direct estimate and reports each attempt.
fn main() {
    let graph = PreparedGraph::new(
        vec![
            Node::new("front_gate", "Front Gate", 6.1378266, 8.1459486, NodeKind::Entrance),
            Node::new("back_gate", "Back Gate", 6.132435, 8.140433, NodeKind::Entrance),
        ],
        vec![Edge::new("main_road", "front_gate", "back_gate")],
    );
    let preferences = Preferences::default();
    let planner = RoutePlanner::campus_default(RouterConfig::default());
    let request = RouteRequest {
        start: LatLng::new(6.1378, 8.1459),
        goal: LatLng::new(6.2100, 8.0800),
        graph: Some(&graph),
        preferences: &preferences,
    };

    let report = planner.plan(&request);
    for (method, outcome) in &report.attempts {
        match outcome {
            StrategyOutcome::Ok(route) => println!("{method}: {} m", route.distance_meters),
            StrategyOutcome::Unavailable(e) => println!("{method}: unavailable ({e})"),
            StrategyOutcome::Failed(e) => println!("{method}: failed ({e})"),
        }
    }
    if let Some((method, route)) = report.route() {
        println!("Using {method}, about {} min", route.duration_minutes);
    }
}
