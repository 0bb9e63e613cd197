//! # campus_router
//!
//! Walking routes across a campus path graph. Coordinates are snapped to the
//! nearest graph node, an [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! search runs over edge costs scaled by the walker's preferences (dirt
//! surfaces, lighting, stairs, informal shortcuts), and the node path is
//! rendered into distance, duration and step instructions.
//!
//! The graph is always passed in by the caller; nothing is cached or persisted
//! between calls. Connected components are computed alongside the adjacency to
//! avoid flood-filling behaviour if no path exists.
pub mod astar;
pub mod config;
pub mod error;
pub mod geo;
pub mod graph;
pub mod preferences;
pub mod route;
pub mod snap;
pub mod solver;
pub mod strategy;

pub use crate::config::RouterConfig;
pub use crate::error::{Endpoint, RouteError};
pub use crate::geo::LatLng;
pub use crate::graph::{Edge, EdgeAttributes, GraphSnapshot, Node, NodeKind, PreparedGraph};
pub use crate::preferences::Preferences;
pub use crate::route::{PointRole, RouteDescriptor, RoutePoint};

use crate::graph::adjacency::AdjacencyMap;
use crate::route::assemble;
use crate::snap::snap_endpoints;
use crate::solver::astar::AstarSolver;
use crate::solver::PathSolver;
use log::{debug, info};

/// Inline capacity for per-node traversal lists; campus junctions rarely have
/// more branches than this.
pub const N_SMALLVEC_SIZE: usize = 8;

/// Computes walking routes under a fixed [RouterConfig]. Holds no graph state,
/// so one router can serve any number of graphs and threads.
#[derive(Clone, Debug, Default)]
pub struct Router {
    pub config: RouterConfig,
}

impl Router {
    pub fn new(config: RouterConfig) -> Router {
        Router { config }
    }

    /// Routes from `start` to `goal` over a snapshot straight from the graph
    /// store.
    pub fn compute_route(
        &self,
        start: LatLng,
        goal: LatLng,
        snapshot: &GraphSnapshot,
        preferences: &Preferences,
    ) -> Result<RouteDescriptor, RouteError> {
        let graph = PreparedGraph::from_snapshot(snapshot);
        self.route(start, goal, &graph, preferences)
    }

    /// Routes over an already indexed graph.
    pub fn route(
        &self,
        start: LatLng,
        goal: LatLng,
        graph: &PreparedGraph,
        preferences: &Preferences,
    ) -> Result<RouteDescriptor, RouteError> {
        if graph.is_empty() {
            return Err(RouteError::GraphUnavailable);
        }
        let config = self.config.clamped();
        let preferences = preferences.clamped();
        let (start_snap, goal_snap) =
            snap_endpoints(start, goal, graph, config.max_snap_distance_m)?;

        let adjacency = AdjacencyMap::build(graph, &preferences);
        let solver = AstarSolver::with_heuristic_factor(config.heuristic_factor);
        let Some((path, cost)) =
            solver.find_path(graph, &adjacency, start_snap.node, goal_snap.node)
        else {
            let id_of = |ix| graph.node(ix).map(|n| n.id.clone()).unwrap_or_default();
            let (from, to) = (id_of(start_snap.node), id_of(goal_snap.node));
            info!("No campus path from {from} to {to}");
            return Err(RouteError::NoPathFound { from, to });
        };
        debug!(
            "Found campus path of {} nodes with weighted cost {:.1}",
            path.len(),
            cost
        );
        Ok(assemble(&path, graph, preferences.speed_meters_per_min))
    }
}

/// Routes with the default configuration (500 m maximum snap distance).
pub fn compute_route(
    start: LatLng,
    goal: LatLng,
    snapshot: &GraphSnapshot,
    preferences: &Preferences,
) -> Result<RouteDescriptor, RouteError> {
    Router::default().compute_route(start, goal, snapshot, preferences)
}
