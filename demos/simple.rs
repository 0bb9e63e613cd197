use campus_router::{compute_route, GraphSnapshot, LatLng, PreparedGraph, Preferences};

// A small slice of a campus graph as the graph store would serve it. A route
// is requested from just outside the front gate to a point next to A Block.
const CAMPUS: &str = r#"{
    "version": "1.0.0",
    "nodes": [
        { "id": "front_gate", "name": "Front Gate", "lat": 6.1378266, "lng": 8.1459486, "type": "entrance" },
        { "id": "security_office", "name": "Security Officer Building", "lat": 6.137497, "lng": 8.145524, "type": "building" },
        { "id": "funai_park_bus", "name": "Funai Park (Bus)", "lat": 6.137149, "lng": 8.145532, "type": "transport" },
        { "id": "walkway_north", "name": "North Walkway", "lat": 6.1346, "lng": 8.1436, "type": "waypoint" },
        { "id": "a_block", "name": "A Block", "lat": 6.133601, "lng": 8.143317, "type": "building" },
        { "id": "c_block", "name": "C Block", "lat": 6.133221, "lng": 8.142492, "type": "building" }
    ],
    "edges": [
        { "id": "e1", "from": "front_gate", "to": "security_office" },
        { "id": "e2", "from": "security_office", "to": "funai_park_bus" },
        { "id": "e3", "from": "security_office", "to": "walkway_north" },
        { "id": "e4", "from": "walkway_north", "to": "a_block" },
        { "id": "e5", "from": "a_block", "to": "c_block" },
        { "id": "s1", "from": "front_gate", "to": "a_block", "attributes": { "shortcut": true, "surface": "dirt" } }
    ]
}"#;

fn main() {
    let snapshot = GraphSnapshot::from_json_str(CAMPUS).expect("demo graph is valid JSON");

    println!("Destinations:");
    for node in PreparedGraph::from_snapshot(&snapshot).destinations() {
        println!("  {} ({:?})", node.label(), node.kind);
    }

    let start = LatLng::new(6.13790, 8.14600);
    let goal = LatLng::new(6.13355, 8.14330);
    match compute_route(start, goal, &snapshot, &Preferences::default()) {
        Ok(route) => {
            println!(
                "\n{} m, about {} min:",
                route.distance_meters, route.duration_minutes
            );
            for line in &route.instructions {
                println!("  {line}");
            }
        }
        Err(e) => println!("No route: {e}"),
    }
}
