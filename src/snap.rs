//! Snapping of free coordinates onto the nearest graph node.
use crate::error::{Endpoint, RouteError};
use crate::geo::{distance, LatLng};
use crate::graph::{NodeIx, PreparedGraph};
use log::debug;

/// A coordinate resolved to a graph node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snap {
    pub node: NodeIx,
    pub distance_m: f64,
}

/// The node closest to `point`, scanning every node. Ties go to the node that
/// comes first in the graph. `None` only for an empty graph.
pub fn nearest(point: LatLng, graph: &PreparedGraph) -> Option<Snap> {
    let mut best: Option<Snap> = None;
    for (node, n) in graph.nodes().enumerate() {
        let d = distance(point, n.position());
        match best {
            Some(b) if !(d < b.distance_m) => {}
            _ => {
                best = Some(Snap {
                    node,
                    distance_m: d,
                })
            }
        }
    }
    best
}

/// Like [nearest], but refuses a snap farther than `max_distance_m`: the graph
/// does not cover that location.
pub fn snap_or_fail(
    point: LatLng,
    graph: &PreparedGraph,
    max_distance_m: f64,
    endpoint: Endpoint,
) -> Result<Snap, RouteError> {
    let snap = nearest(point, graph).ok_or(RouteError::GraphUnavailable)?;
    // NaN fails this check as well
    if !(snap.distance_m <= max_distance_m) {
        debug!(
            "Nearest node to {endpoint} ({}, {}) is {:.0} m away, limit {:.0} m",
            point.lat, point.lng, snap.distance_m, max_distance_m
        );
        return Err(RouteError::GraphNotApplicable {
            endpoint,
            distance_m: snap.distance_m,
            limit_m: max_distance_m,
        });
    }
    Ok(snap)
}

/// Snaps both ends of a request; either one failing fails the pair.
pub fn snap_endpoints(
    start: LatLng,
    goal: LatLng,
    graph: &PreparedGraph,
    max_distance_m: f64,
) -> Result<(Snap, Snap), RouteError> {
    let start = snap_or_fail(start, graph, max_distance_m, Endpoint::Start)?;
    let goal = snap_or_fail(goal, graph, max_distance_m, Endpoint::Goal)?;
    Ok((start, goal))
}
