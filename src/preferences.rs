use serde::{Deserialize, Serialize};

pub const DEFAULT_SPEED_M_PER_MIN: f64 = 80.0;
pub const MIN_SPEED_M_PER_MIN: f64 = 50.0;
pub const MAX_SPEED_M_PER_MIN: f64 = 150.0;

/// Per-user routing preferences. These only scale edge costs; no preference
/// ever makes an edge untraversable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub avoid_dirt: bool,
    pub prefer_lit: bool,
    pub avoid_stairs: bool,
    pub speed_meters_per_min: f64,
}

impl Default for Preferences {
    fn default() -> Preferences {
        Preferences {
            avoid_dirt: false,
            prefer_lit: false,
            avoid_stairs: false,
            speed_meters_per_min: DEFAULT_SPEED_M_PER_MIN,
        }
    }
}

impl Preferences {
    /// Returns a copy with the walking speed brought into the supported range.
    pub fn clamped(&self) -> Preferences {
        Preferences {
            speed_meters_per_min: clamp_speed(self.speed_meters_per_min),
            ..self.clone()
        }
    }
}

/// Clamps a walking speed to `[MIN_SPEED_M_PER_MIN, MAX_SPEED_M_PER_MIN]`.
/// Non-finite input falls back to the default speed.
pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_finite() {
        speed.clamp(MIN_SPEED_M_PER_MIN, MAX_SPEED_M_PER_MIN)
    } else {
        DEFAULT_SPEED_M_PER_MIN
    }
}
