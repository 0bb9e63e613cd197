use crate::geo::distance;
use crate::graph::adjacency::MIN_WEIGHT_MULTIPLIER;
use crate::graph::{NodeIx, PreparedGraph};
use crate::solver::PathSolver;

#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f64,
}

impl Default for AstarSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: 1.0,
        }
    }

    pub fn with_heuristic_factor(heuristic_factor: f64) -> AstarSolver {
        AstarSolver { heuristic_factor }
    }

    /// A solver whose heuristic never overestimates, whatever the preferences,
    /// provided edges are weighted by their geographic length.
    pub fn admissible() -> AstarSolver {
        AstarSolver::with_heuristic_factor(MIN_WEIGHT_MULTIPLIER)
    }
}

impl PathSolver for AstarSolver {
    /// Straight-line distance to the goal times a heuristic factor.
    fn heuristic(&self, graph: &PreparedGraph, node: NodeIx, goal: NodeIx) -> f64 {
        match (graph.node(node), graph.node(goal)) {
            (Some(a), Some(b)) => distance(a.position(), b.position()) * self.heuristic_factor,
            _ => 0.0,
        }
    }
}
