use core::fmt;
use thiserror::Error;

/// Which end of a route request a failure refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "destination"),
        }
    }
}

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("campus graph is not available")]
    GraphUnavailable,
    #[error(
        "campus graph does not cover the {endpoint}: nearest node is {distance_m:.0} m away (limit {limit_m:.0} m)"
    )]
    GraphNotApplicable {
        endpoint: Endpoint,
        distance_m: f64,
        limit_m: f64,
    },
    #[error("no campus path found from {from} to {to}")]
    NoPathFound { from: String, to: String },
    #[error("invalid graph snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl RouteError {
    /// The graph cannot serve this request at all, as opposed to having been
    /// searched without success.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            RouteError::GraphUnavailable
                | RouteError::GraphNotApplicable { .. }
                | RouteError::Snapshot(_)
        )
    }
}
