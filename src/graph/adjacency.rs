use super::{Edge, EdgeAttributes, Node, NodeIx, PreparedGraph};
use crate::geo::distance;
use crate::preferences::Preferences;
use crate::N_SMALLVEC_SIZE;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

pub const DIRT_MULTIPLIER: f64 = 1.3;
pub const LIT_MULTIPLIER: f64 = 0.9;
pub const STAIRS_MULTIPLIER: f64 = 2.0;
pub const SHORTCUT_MULTIPLIER: f64 = 0.95;
/// The cheapest any edge can become relative to its base cost.
pub const MIN_WEIGHT_MULTIPLIER: f64 = LIT_MULTIPLIER * SHORTCUT_MULTIPLIER;

/// Combined cost multiplier for an edge's attributes under `preferences`.
pub fn weight_multiplier(attributes: &EdgeAttributes, preferences: &Preferences) -> f64 {
    let mut m = 1.0;
    if preferences.avoid_dirt && attributes.surface.as_deref() == Some("dirt") {
        m *= DIRT_MULTIPLIER;
    }
    if preferences.prefer_lit && attributes.lit {
        m *= LIT_MULTIPLIER;
    }
    if preferences.avoid_stairs && attributes.stairs {
        m *= STAIRS_MULTIPLIER;
    }
    // Shortcuts get a mild discount regardless of preferences
    if attributes.shortcut {
        m *= SHORTCUT_MULTIPLIER;
    }
    m
}

/// Cost of walking `edge` from `from` to `to`. An explicit weight replaces the
/// haversine length of the endpoints.
pub fn edge_cost(edge: &Edge, from: &Node, to: &Node, preferences: &Preferences) -> f64 {
    let base = edge
        .weight_meters
        .unwrap_or_else(|| distance(from.position(), to.position()));
    base * weight_multiplier(&edge.attributes, preferences)
}

/// One directed way out of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Traversal {
    pub to: NodeIx,
    pub cost: f64,
    /// Position of the originating edge in the snapshot.
    pub edge: usize,
}

/// Directed, preference-weighted adjacency of a [PreparedGraph]. Traversals
/// out of a node keep the order of the edges in the snapshot. Weakly connected
/// components are tracked so hopeless queries can be rejected without a search.
#[derive(Clone, Debug)]
pub struct AdjacencyMap {
    traversals: Vec<SmallVec<[Traversal; N_SMALLVEC_SIZE]>>,
    components: UnionFind<usize>,
    dropped_edges: usize,
}

impl AdjacencyMap {
    /// Builds the adjacency. Edges naming a node that is not in the graph, or
    /// carrying a negative or non-finite weight, are skipped.
    pub fn build(graph: &PreparedGraph, preferences: &Preferences) -> AdjacencyMap {
        let n = graph.len();
        let mut traversals = vec![SmallVec::new(); n];
        let mut components = UnionFind::new(n);
        let mut dropped_edges = 0;

        for (edge_ix, edge) in graph.edges().iter().enumerate() {
            let endpoints = graph
                .index_of(&edge.from)
                .zip(graph.index_of(&edge.to))
                .and_then(|(a, b)| Some(((a, graph.node(a)?), (b, graph.node(b)?))));
            let Some(((from_ix, from), (to_ix, to))) = endpoints else {
                debug!(
                    "Skipping edge {} ({} -> {}): endpoint not in graph",
                    edge.id, edge.from, edge.to
                );
                dropped_edges += 1;
                continue;
            };
            if let Some(w) = edge.weight_meters {
                if !(w.is_finite() && w >= 0.0) {
                    debug!("Skipping edge {}: invalid weight {}", edge.id, w);
                    dropped_edges += 1;
                    continue;
                }
            }

            traversals[from_ix].push(Traversal {
                to: to_ix,
                cost: edge_cost(edge, from, to, preferences),
                edge: edge_ix,
            });
            if edge.bidirectional {
                traversals[to_ix].push(Traversal {
                    to: from_ix,
                    cost: edge_cost(edge, to, from, preferences),
                    edge: edge_ix,
                });
            }
            components.union(from_ix, to_ix);
        }
        if dropped_edges > 0 {
            debug!("Dropped {dropped_edges} malformed edges while building adjacency");
        }
        AdjacencyMap {
            traversals,
            components,
            dropped_edges,
        }
    }

    pub fn traversals(&self, node: NodeIx) -> &[Traversal] {
        self.traversals.get(node).map(|t| t.as_slice()).unwrap_or(&[])
    }

    /// Neighbours of `node` paired with the cost of reaching them.
    pub fn successors(&self, node: NodeIx) -> impl Iterator<Item = (NodeIx, f64)> + '_ {
        self.traversals(node).iter().map(|t| (t.to, t.cost))
    }

    /// The cheapest traversal from `from` directly to `to`, if any.
    pub fn cost_between(&self, from: NodeIx, to: NodeIx) -> Option<f64> {
        self.traversals(from)
            .iter()
            .filter(|t| t.to == to)
            .map(|t| t.cost)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Total number of directed traversals.
    pub fn len(&self) -> usize {
        self.traversals.iter().map(|t| t.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    /// Checks whether start and goal share a weakly connected component. A
    /// directed graph may still have no path between nodes that do.
    pub fn reachable(&self, start: NodeIx, goal: NodeIx) -> bool {
        start < self.traversals.len()
            && goal < self.traversals.len()
            && self.components.equiv(start, goal)
    }

    pub fn unreachable(&self, start: NodeIx, goal: NodeIx) -> bool {
        !self.reachable(start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;

    fn line_graph(edges: Vec<Edge>) -> PreparedGraph {
        PreparedGraph::new(
            vec![
                Node::new("n1", "N1", 0.0, 0.0, NodeKind::Waypoint),
                Node::new("n2", "N2", 0.0, 0.001, NodeKind::Waypoint),
                Node::new("n3", "N3", 0.0, 0.002, NodeKind::Waypoint),
            ],
            edges,
        )
    }

    #[test]
    fn multipliers_compose() {
        let attributes = EdgeAttributes {
            surface: Some("dirt".to_owned()),
            lit: true,
            stairs: true,
            shortcut: true,
            ..Default::default()
        };
        let none = Preferences::default();
        assert!((weight_multiplier(&attributes, &none) - 0.95).abs() < 1e-12);
        let all = Preferences {
            avoid_dirt: true,
            prefer_lit: true,
            avoid_stairs: true,
            ..Default::default()
        };
        let expected = 1.3 * 0.9 * 2.0 * 0.95;
        assert!((weight_multiplier(&attributes, &all) - expected).abs() < 1e-12);
        let paved = EdgeAttributes {
            surface: Some("paved".to_owned()),
            ..Default::default()
        };
        assert_eq!(weight_multiplier(&paved, &all), 1.0);
    }

    #[test]
    fn stairs_double_cost() {
        let graph = line_graph(vec![]);
        let a = graph.get("n1").unwrap();
        let b = graph.get("n2").unwrap();
        let edge = Edge::new("s", "n1", "n2").with_attributes(EdgeAttributes {
            stairs: true,
            ..Default::default()
        });
        let plain = edge_cost(&edge, a, b, &Preferences::default());
        let avoiding = edge_cost(
            &edge,
            a,
            b,
            &Preferences {
                avoid_stairs: true,
                ..Default::default()
            },
        );
        assert!((avoiding - 2.0 * plain).abs() < 1e-9);
    }

    #[test]
    fn explicit_weight_overrides_distance() {
        let graph = line_graph(vec![]);
        let a = graph.get("n1").unwrap();
        let b = graph.get("n3").unwrap();
        let edge = Edge::new("w", "n1", "n3").with_weight(42.0);
        assert_eq!(edge_cost(&edge, a, b, &Preferences::default()), 42.0);
    }

    #[test]
    fn directions() {
        let graph = line_graph(vec![
            Edge::new("e1", "n1", "n2"),
            Edge::new("e2", "n2", "n3").directed(),
        ]);
        let adjacency = AdjacencyMap::build(&graph, &Preferences::default());
        assert_eq!(adjacency.len(), 3);
        assert!(adjacency.cost_between(0, 1).is_some());
        assert!(adjacency.cost_between(1, 0).is_some());
        assert!(adjacency.cost_between(1, 2).is_some());
        assert!(adjacency.cost_between(2, 1).is_none());
        let forward = adjacency.cost_between(0, 1).unwrap();
        let backward = adjacency.cost_between(1, 0).unwrap();
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn malformed_edges_are_dropped() {
        let graph = line_graph(vec![
            Edge::new("dangling", "n1", "nowhere"),
            Edge::new("ghost", "ghost_a", "ghost_b"),
            Edge::new("negative", "n1", "n2").with_weight(-5.0),
            Edge::new("nan", "n1", "n2").with_weight(f64::NAN),
            Edge::new("ok", "n2", "n3"),
        ]);
        let adjacency = AdjacencyMap::build(&graph, &Preferences::default());
        assert_eq!(adjacency.dropped_edges(), 4);
        assert_eq!(adjacency.len(), 2);
        assert!(adjacency.traversals(0).is_empty());
        assert_eq!(adjacency.traversals(1)[0].edge, 4);
        assert!(adjacency.unreachable(0, 2));
        assert!(adjacency.reachable(1, 2));
        assert!(adjacency.unreachable(1, 99));
    }

    #[test]
    fn parallel_edges_keep_cheapest() {
        let graph = line_graph(vec![
            Edge::new("long", "n1", "n2").with_weight(150.0),
            Edge::new("short", "n1", "n2").with_weight(100.0),
        ]);
        let adjacency = AdjacencyMap::build(&graph, &Preferences::default());
        assert_eq!(adjacency.cost_between(0, 1), Some(100.0));
        let order: Vec<usize> = adjacency.traversals(0).iter().map(|t| t.edge).collect();
        assert_eq!(order, vec![0, 1]);
    }
}
