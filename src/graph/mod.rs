//! The campus graph as delivered by the graph store, and an indexed form of it
//! that the router works on.
use crate::astar::FxIndexMap;
use crate::error::RouteError;
use crate::geo::LatLng;
use indexmap::map::Entry::{Occupied, Vacant};
use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::io::Read;
use std::str::FromStr;

pub mod adjacency;

/// Dense index of a node inside a [PreparedGraph].
pub type NodeIx = usize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Building,
    Hostel,
    Entrance,
    Transport,
    Religious,
    Cultural,
    Recreation,
    Commercial,
    Venue,
    Medical,
    #[default]
    Waypoint,
    Intersection,
    Walkable,
    Path,
    Restricted,
    /// A kind this crate does not know, kept verbatim.
    Other(String),
}

impl FromStr for NodeKind {
    type Err = Infallible;

    /// Unknown kinds map to [NodeKind::Other] rather than failing the snapshot.
    fn from_str(s: &str) -> Result<NodeKind, Infallible> {
        Ok(match s.trim().to_lowercase().as_str() {
            "building" => NodeKind::Building,
            "hostel" => NodeKind::Hostel,
            "entrance" => NodeKind::Entrance,
            "transport" => NodeKind::Transport,
            "religious" => NodeKind::Religious,
            "cultural" => NodeKind::Cultural,
            "recreation" => NodeKind::Recreation,
            "commercial" => NodeKind::Commercial,
            "venue" => NodeKind::Venue,
            "medical" => NodeKind::Medical,
            "waypoint" => NodeKind::Waypoint,
            "intersection" => NodeKind::Intersection,
            "walkable" => NodeKind::Walkable,
            "path" => NodeKind::Path,
            "restricted" => NodeKind::Restricted,
            _ => NodeKind::Other(s.to_owned()),
        })
    }
}

impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<NodeKind, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Building => "building",
            NodeKind::Hostel => "hostel",
            NodeKind::Entrance => "entrance",
            NodeKind::Transport => "transport",
            NodeKind::Religious => "religious",
            NodeKind::Cultural => "cultural",
            NodeKind::Recreation => "recreation",
            NodeKind::Commercial => "commercial",
            NodeKind::Venue => "venue",
            NodeKind::Medical => "medical",
            NodeKind::Waypoint => "waypoint",
            NodeKind::Intersection => "intersection",
            NodeKind::Walkable => "walkable",
            NodeKind::Path => "path",
            NodeKind::Restricted => "restricted",
            NodeKind::Other(raw) => raw,
        }
    }

    /// Junctions and path vertices exist for routing only and are not offered
    /// as destinations.
    pub fn is_point_of_interest(&self) -> bool {
        !matches!(
            self,
            NodeKind::Waypoint | NodeKind::Intersection | NodeKind::Walkable | NodeKind::Path
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(alias = "nodeId")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: NodeKind,
}

impl Node {
    pub fn new(id: &str, name: &str, lat: f64, lng: f64, kind: NodeKind) -> Node {
        Node {
            id: id.to_owned(),
            name: name.to_owned(),
            lat,
            lng,
            kind,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    /// The display name, falling back to the id for unnamed junctions.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Walkability attributes of an edge. Keys the router does not cost are kept
/// in `extra`. The graph store does not type these fields, so a value of the
/// wrong type reads as unset instead of failing the snapshot: `lit` only
/// counts when it is `true`, `stairs` and `shortcut` when they are truthy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeAttributes {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "string_or_none"
    )]
    pub surface: Option<String>,
    #[serde(deserialize_with = "strictly_true")]
    pub lit: bool,
    #[serde(deserialize_with = "truthy")]
    pub stairs: bool,
    #[serde(deserialize_with = "truthy")]
    pub shortcut: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    #[serde(alias = "edgeId", default)]
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default = "default_bidirectional")]
    pub bidirectional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_meters: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: EdgeAttributes,
}

fn default_bidirectional() -> bool {
    true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn strictly_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

impl Edge {
    /// A bidirectional edge weighted by the haversine distance of its endpoints.
    pub fn new(id: &str, from: &str, to: &str) -> Edge {
        Edge {
            id: id.to_owned(),
            from: from.to_owned(),
            to: to.to_owned(),
            bidirectional: true,
            weight_meters: None,
            attributes: EdgeAttributes::default(),
        }
    }

    pub fn directed(mut self) -> Edge {
        self.bidirectional = false;
        self
    }

    pub fn with_weight(mut self, weight_meters: f64) -> Edge {
        self.weight_meters = Some(weight_meters);
        self
    }

    pub fn with_attributes(mut self, attributes: EdgeAttributes) -> Edge {
        self.attributes = attributes;
        self
    }
}

/// Nodes and edges exactly as the graph store hands them over.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> GraphSnapshot {
        GraphSnapshot {
            version: None,
            nodes,
            edges,
        }
    }

    pub fn from_json_str(json: &str) -> Result<GraphSnapshot, RouteError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<GraphSnapshot, RouteError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// A snapshot with nodes indexed by id. Nodes with invalid coordinates and
/// repeated ids are left out; edges are kept verbatim and validated when the
/// adjacency is built.
#[derive(Clone, Debug, Default)]
pub struct PreparedGraph {
    nodes: FxIndexMap<String, Node>,
    edges: Vec<Edge>,
}

impl PreparedGraph {
    pub fn from_snapshot(snapshot: &GraphSnapshot) -> PreparedGraph {
        PreparedGraph::new(snapshot.nodes.iter().cloned(), snapshot.edges.clone())
    }

    pub fn new<I>(nodes: I, edges: Vec<Edge>) -> PreparedGraph
    where
        I: IntoIterator<Item = Node>,
    {
        let mut indexed: FxIndexMap<String, Node> = FxIndexMap::default();
        for node in nodes {
            if !node.position().is_valid() {
                warn!(
                    "Dropping node {} with invalid coordinates ({}, {})",
                    node.id, node.lat, node.lng
                );
                continue;
            }
            match indexed.entry(node.id.clone()) {
                Vacant(e) => {
                    e.insert(node);
                }
                Occupied(e) => {
                    warn!("Dropping duplicate node id {}", e.key());
                }
            }
        }
        info!(
            "Prepared campus graph with {} nodes and {} edges",
            indexed.len(),
            edges.len()
        );
        PreparedGraph {
            nodes: indexed,
            edges,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, ix: NodeIx) -> Option<&Node> {
        self.nodes.get_index(ix).map(|(_, node)| node)
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIx> {
        self.nodes.get_index_of(id)
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Nodes in snapshot order, which is also index order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Maps a path of indices back to node ids.
    pub fn ids(&self, path: &[NodeIx]) -> Vec<String> {
        path.iter()
            .filter_map(|&ix| self.node(ix))
            .map(|node| node.id.clone())
            .collect()
    }

    /// The destination catalog: every point of interest, sorted by name.
    pub fn destinations(&self) -> Vec<&Node> {
        let mut destinations: Vec<&Node> = self
            .nodes()
            .filter(|node| node.kind.is_point_of_interest())
            .collect();
        destinations.sort_by(|a, b| a.label().cmp(b.label()));
        destinations
    }

    /// Case-insensitive lookup by display name. Returns the first match in
    /// snapshot order.
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        let needle = name.trim().to_lowercase();
        self.nodes().find(|node| node.label().to_lowercase() == needle)
    }
}

impl From<GraphSnapshot> for PreparedGraph {
    fn from(snapshot: GraphSnapshot) -> PreparedGraph {
        PreparedGraph::new(snapshot.nodes, snapshot.edges)
    }
}
