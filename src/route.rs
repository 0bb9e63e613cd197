//! Turning a node path into the summary shown to the walker.
use crate::geo::{distance, LatLng};
use crate::graph::{NodeIx, PreparedGraph};
use crate::preferences::clamp_speed;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointRole {
    Start,
    Waypoint,
    Destination,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    pub role: PointRole,
}

impl RoutePoint {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub path: Vec<RoutePoint>,
    pub waypoint_count: usize,
    pub distance_meters: u64,
    pub duration_minutes: u64,
    pub instructions: Vec<String>,
}

impl RouteDescriptor {
    /// Builds a descriptor from named stops in walking order. The first stop
    /// is the start, the last the destination.
    pub fn from_stops<I, S>(stops: I, speed_meters_per_min: f64) -> RouteDescriptor
    where
        I: IntoIterator<Item = (LatLng, S)>,
        S: Into<String>,
    {
        let stops: Vec<(LatLng, String)> = stops
            .into_iter()
            .map(|(position, name)| (position, name.into()))
            .collect();
        let last = stops.len().saturating_sub(1);
        let path: Vec<RoutePoint> = stops
            .into_iter()
            .enumerate()
            .map(|(i, (position, name))| RoutePoint {
                lat: position.lat,
                lng: position.lng,
                name,
                role: match i {
                    0 => PointRole::Start,
                    i if i == last => PointRole::Destination,
                    _ => PointRole::Waypoint,
                },
            })
            .collect();

        let total: f64 = path
            .iter()
            .tuple_windows()
            .map(|(a, b)| distance(a.position(), b.position()))
            .sum();
        let distance_meters = total.round() as u64;
        let speed = clamp_speed(speed_meters_per_min);
        let duration_minutes = ((distance_meters as f64 / speed).round() as u64).max(1);
        let instructions = instructions(&path);

        RouteDescriptor {
            waypoint_count: path.len(),
            path,
            distance_meters,
            duration_minutes,
            instructions,
        }
    }
}

/// One line per traversed edge.
fn instructions(path: &[RoutePoint]) -> Vec<String> {
    let last = path.len().saturating_sub(1);
    path.iter()
        .enumerate()
        .skip(1)
        .map(|(step, point)| {
            if step == last {
                format!("{step}. Arrive at {}", point.name)
            } else {
                format!("{step}. Walk towards {}", point.name)
            }
        })
        .collect()
}

/// Renders a node path found on `graph`. Indices that are not in the graph
/// are skipped.
pub fn assemble(
    path: &[NodeIx],
    graph: &PreparedGraph,
    speed_meters_per_min: f64,
) -> RouteDescriptor {
    let stops = path
        .iter()
        .filter_map(|&ix| graph.node(ix))
        .map(|node| (node.position(), node.label()));
    RouteDescriptor::from_stops(stops, speed_meters_per_min)
}
