//! Ordered fallback between routing strategies.
//!
//! Each [RouteStrategy] reports a typed [StrategyOutcome] instead of hiding
//! its failure. A [RoutePlanner] walks its strategies in order and records
//! every attempt; the [FallbackPolicy] decides whether a search failure is
//! final or lets the next strategy try.
use crate::error::RouteError;
use crate::geo::LatLng;
use crate::graph::PreparedGraph;
use crate::preferences::Preferences;
use crate::route::RouteDescriptor;
use crate::{Router, RouterConfig};
use log::{info, warn};

/// Everything a strategy may use to answer one request.
#[derive(Clone, Copy, Debug)]
pub struct RouteRequest<'a> {
    pub start: LatLng,
    pub goal: LatLng,
    /// `None` when the graph store could not be reached.
    pub graph: Option<&'a PreparedGraph>,
    pub preferences: &'a Preferences,
}

#[derive(Debug)]
pub enum StrategyOutcome {
    Ok(RouteDescriptor),
    /// The strategy cannot serve this request (no data, outside coverage).
    Unavailable(RouteError),
    /// The strategy ran and found nothing.
    Failed(RouteError),
}

impl StrategyOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, StrategyOutcome::Ok(_))
    }

    fn from_result(result: Result<RouteDescriptor, RouteError>) -> StrategyOutcome {
        match result {
            Ok(route) => StrategyOutcome::Ok(route),
            Err(e) if e.is_unavailable() => StrategyOutcome::Unavailable(e),
            Err(e) => StrategyOutcome::Failed(e),
        }
    }
}

pub trait RouteStrategy {
    /// Short label reported alongside the route, e.g. `"Campus A*"`.
    fn name(&self) -> &str;

    fn attempt(&self, request: &RouteRequest) -> StrategyOutcome;
}

/// Routes over the campus graph.
#[derive(Clone, Debug, Default)]
pub struct CampusGraphStrategy {
    router: Router,
}

impl CampusGraphStrategy {
    pub fn new(config: RouterConfig) -> CampusGraphStrategy {
        CampusGraphStrategy {
            router: Router::new(config),
        }
    }
}

impl RouteStrategy for CampusGraphStrategy {
    fn name(&self) -> &str {
        "Campus A*"
    }

    fn attempt(&self, request: &RouteRequest) -> StrategyOutcome {
        let Some(graph) = request.graph else {
            return StrategyOutcome::Unavailable(RouteError::GraphUnavailable);
        };
        StrategyOutcome::from_result(self.router.route(
            request.start,
            request.goal,
            graph,
            request.preferences,
        ))
    }
}

/// Last resort: a direct line from start to goal. Always succeeds.
#[derive(Clone, Debug, Default)]
pub struct StraightLineStrategy;

impl RouteStrategy for StraightLineStrategy {
    fn name(&self) -> &str {
        "Direct estimate"
    }

    fn attempt(&self, request: &RouteRequest) -> StrategyOutcome {
        StrategyOutcome::Ok(RouteDescriptor::from_stops(
            [
                (request.start, "Start Location"),
                (request.goal, "Destination"),
            ],
            request.preferences.speed_meters_per_min,
        ))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Fall through only when a strategy is unavailable; a search that ran
    /// and failed ends the plan.
    #[default]
    OnUnavailable,
    /// Fall through on any unsuccessful outcome.
    OnAnyFailure,
}

/// The outcome of every strategy that was tried, in order.
#[derive(Debug, Default)]
pub struct PlanReport {
    pub attempts: Vec<(String, StrategyOutcome)>,
}

impl PlanReport {
    /// The successful route and the name of the strategy that produced it.
    pub fn route(&self) -> Option<(&str, &RouteDescriptor)> {
        self.attempts.iter().find_map(|(name, outcome)| match outcome {
            StrategyOutcome::Ok(route) => Some((name.as_str(), route)),
            _ => None,
        })
    }

    /// The error of the last unsuccessful attempt.
    pub fn last_error(&self) -> Option<&RouteError> {
        self.attempts.iter().rev().find_map(|(_, outcome)| match outcome {
            StrategyOutcome::Unavailable(e) | StrategyOutcome::Failed(e) => Some(e),
            StrategyOutcome::Ok(_) => None,
        })
    }
}

#[derive(Default)]
pub struct RoutePlanner {
    strategies: Vec<Box<dyn RouteStrategy + Send + Sync>>,
    pub policy: FallbackPolicy,
}

impl RoutePlanner {
    pub fn new(policy: FallbackPolicy) -> RoutePlanner {
        RoutePlanner {
            strategies: Vec::new(),
            policy,
        }
    }

    /// Campus graph first, straight line as the last resort.
    pub fn campus_default(config: RouterConfig) -> RoutePlanner {
        RoutePlanner::new(FallbackPolicy::OnAnyFailure)
            .with_strategy(CampusGraphStrategy::new(config))
            .with_strategy(StraightLineStrategy)
    }

    pub fn with_strategy<S>(mut self, strategy: S) -> RoutePlanner
    where
        S: RouteStrategy + Send + Sync + 'static,
    {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn plan(&self, request: &RouteRequest) -> PlanReport {
        let mut report = PlanReport::default();
        for strategy in &self.strategies {
            let outcome = strategy.attempt(request);
            let stop = match &outcome {
                StrategyOutcome::Ok(_) => {
                    info!("Route found by {}", strategy.name());
                    true
                }
                StrategyOutcome::Unavailable(e) => {
                    info!("{} unavailable: {e}", strategy.name());
                    false
                }
                StrategyOutcome::Failed(e) => {
                    warn!("{} failed: {e}", strategy.name());
                    self.policy == FallbackPolicy::OnUnavailable
                }
            };
            report.attempts.push((strategy.name().to_owned(), outcome));
            if stop {
                break;
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node, NodeKind};

    fn disconnected() -> PreparedGraph {
        PreparedGraph::new(
            vec![
                Node::new("a", "A", 0.0, 0.0, NodeKind::Building),
                Node::new("b", "B", 0.0, 0.002, NodeKind::Building),
            ],
            vec![],
        )
    }

    fn connected() -> PreparedGraph {
        PreparedGraph::new(
            vec![
                Node::new("a", "A", 0.0, 0.0, NodeKind::Building),
                Node::new("b", "B", 0.0, 0.002, NodeKind::Building),
            ],
            vec![Edge::new("ab", "a", "b")],
        )
    }

    fn request<'a>(
        graph: Option<&'a PreparedGraph>,
        prefs: &'a Preferences,
    ) -> RouteRequest<'a> {
        RouteRequest {
            start: LatLng::new(0.0, 0.0),
            goal: LatLng::new(0.0, 0.002),
            graph,
            preferences: prefs,
        }
    }

    #[test]
    fn campus_route_wins_when_available() {
        let prefs = Preferences::default();
        let graph = connected();
        let planner = RoutePlanner::campus_default(RouterConfig::default());
        let report = planner.plan(&request(Some(&graph), &prefs));
        assert_eq!(report.attempts.len(), 1);
        let (method, route) = report.route().unwrap();
        assert_eq!(method, "Campus A*");
        assert_eq!(route.path[1].name, "B");
    }

    #[test]
    fn missing_graph_falls_through() {
        let prefs = Preferences::default();
        let planner = RoutePlanner::campus_default(RouterConfig::default());
        let report = planner.plan(&request(None, &prefs));
        assert_eq!(report.attempts.len(), 2);
        assert!(matches!(
            report.attempts[0].1,
            StrategyOutcome::Unavailable(RouteError::GraphUnavailable)
        ));
        let (method, route) = report.route().unwrap();
        assert_eq!(method, "Direct estimate");
        assert_eq!(route.distance_meters, 222);
        assert_eq!(route.instructions, vec!["1. Arrive at Destination"]);
    }

    #[test]
    fn policy_decides_on_search_failure() {
        let prefs = Preferences::default();
        let graph = disconnected();

        let strict = RoutePlanner::new(FallbackPolicy::OnUnavailable)
            .with_strategy(CampusGraphStrategy::default())
            .with_strategy(StraightLineStrategy);
        let report = strict.plan(&request(Some(&graph), &prefs));
        assert_eq!(report.attempts.len(), 1);
        assert!(report.route().is_none());
        assert!(matches!(
            report.last_error(),
            Some(RouteError::NoPathFound { .. })
        ));

        let lenient = RoutePlanner::campus_default(RouterConfig::default());
        let report = lenient.plan(&request(Some(&graph), &prefs));
        assert_eq!(report.attempts.len(), 2);
        assert!(report.route().is_some());
    }

    #[test]
    fn empty_planner_reports_nothing() {
        let prefs = Preferences::default();
        let planner = RoutePlanner::default();
        assert!(planner.is_empty());
        let report = planner.plan(&request(None, &prefs));
        assert!(report.route().is_none());
        assert!(report.last_error().is_none());
    }
}
