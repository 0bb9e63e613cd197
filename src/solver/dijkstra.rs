use crate::graph::{NodeIx, PreparedGraph};
use crate::solver::PathSolver;

/// Uninformed search. Always optimal, used as the reference for A*.
#[derive(Clone, Debug)]
pub struct DijkstraSolver;

impl PathSolver for DijkstraSolver {
    fn heuristic(&self, _: &PreparedGraph, _: NodeIx, _: NodeIx) -> f64 {
        0.0
    }
}
