use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SNAP_DISTANCE_M: f64 = 500.0;

/// Router-wide settings, independent of the user making the request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouterConfig {
    /// Start and goal must each lie within this many meters of a graph node.
    pub max_snap_distance_m: f64,
    /// Scales the straight-line heuristic. `1.0` reproduces plain haversine
    /// guidance; values at or below [MIN_WEIGHT_MULTIPLIER](crate::graph::adjacency::MIN_WEIGHT_MULTIPLIER)
    /// keep it admissible under every preference combination as long as no
    /// edge carries an explicit weight shorter than its endpoints' distance.
    pub heuristic_factor: f64,
}

impl Default for RouterConfig {
    fn default() -> RouterConfig {
        RouterConfig {
            max_snap_distance_m: DEFAULT_MAX_SNAP_DISTANCE_M,
            heuristic_factor: 1.0,
        }
    }
}

impl RouterConfig {
    /// Returns a copy that is safe to route with. A NaN or negative snap limit
    /// and a non-finite or negative heuristic factor fall back to the defaults.
    /// An infinite snap limit is kept and disables the coverage check.
    pub fn clamped(&self) -> RouterConfig {
        let defaults = RouterConfig::default();
        RouterConfig {
            max_snap_distance_m: if self.max_snap_distance_m >= 0.0 {
                self.max_snap_distance_m
            } else {
                defaults.max_snap_distance_m
            },
            heuristic_factor: if self.heuristic_factor.is_finite() && self.heuristic_factor >= 0.0
            {
                self.heuristic_factor
            } else {
                defaults.heuristic_factor
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        let config: RouterConfig =
            serde_json::from_str(r#"{ "maxSnapDistanceM": -5.0, "heuristicFactor": -1.0 }"#)
                .unwrap();
        assert_eq!(config.clamped(), RouterConfig::default());

        let nan = RouterConfig {
            max_snap_distance_m: f64::NAN,
            heuristic_factor: f64::NAN,
        };
        assert_eq!(nan.clamped(), RouterConfig::default());

        let custom = RouterConfig {
            max_snap_distance_m: f64::INFINITY,
            heuristic_factor: 0.5,
        };
        assert_eq!(custom.clamped(), custom);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: RouterConfig = serde_json::from_str(r#"{ "heuristicFactor": 0.8 }"#).unwrap();
        assert_eq!(config.max_snap_distance_m, DEFAULT_MAX_SNAP_DISTANCE_M);
        assert_eq!(config.heuristic_factor, 0.8);
    }
}
