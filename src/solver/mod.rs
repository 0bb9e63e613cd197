use crate::astar::SearchContext;
use crate::graph::adjacency::AdjacencyMap;
use crate::graph::{NodeIx, PreparedGraph};
use log::info;

pub mod astar;
pub mod dijkstra;

/// A shortest-path strategy over a weighted [AdjacencyMap]. Implementors only
/// choose the heuristic; the search itself is shared.
pub trait PathSolver {
    /// Estimated remaining cost from `node` to `goal`.
    fn heuristic(&self, graph: &PreparedGraph, node: NodeIx, goal: NodeIx) -> f64;

    /// Finds the cheapest node sequence from `start` to `goal` and its cost.
    fn find_path(
        &self,
        graph: &PreparedGraph,
        adjacency: &AdjacencyMap,
        start: NodeIx,
        goal: NodeIx,
    ) -> Option<(Vec<NodeIx>, f64)> {
        // Check if start and goal are on the same connected component.
        if adjacency.unreachable(start, goal) {
            info!("{start} and {goal} are on different components, skipping search");
            return None;
        }
        let mut ct = SearchContext::new();
        ct.astar(
            &start,
            |&node| adjacency.successors(node),
            |&node| self.heuristic(graph, node, goal),
            |&node| node == goal,
        )
    }

    /// As [find_path](Self::find_path), addressed by node id.
    fn find_id_path(
        &self,
        graph: &PreparedGraph,
        adjacency: &AdjacencyMap,
        start_id: &str,
        goal_id: &str,
    ) -> Option<Vec<String>> {
        let start = graph.index_of(start_id)?;
        let goal = graph.index_of(goal_id)?;
        self.find_path(graph, adjacency, start, goal)
            .map(|(path, _cost)| graph.ids(&path))
    }

    /// Cost of following `path` through the cheapest traversal between each
    /// consecutive pair, or `None` if some pair is not joined.
    fn path_cost(&self, path: &[NodeIx], adjacency: &AdjacencyMap) -> Option<f64> {
        path.windows(2)
            .map(|pair| adjacency.cost_between(pair[0], pair[1]))
            .sum()
    }
}
