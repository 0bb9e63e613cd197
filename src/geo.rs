//! Great-circle geometry on the WGS84 sphere approximation.
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by every distance in the crate.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic coordinate in decimal degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> LatLng {
        LatLng { lat, lng }
    }

    /// True when both components are finite and inside the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn distance_to(&self, other: &LatLng) -> f64 {
        distance(*self, *other)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> LatLng {
        LatLng { lat, lng }
    }
}

/// Haversine distance in meters. Symmetric and valid for any pair of points,
/// including antipodes.
pub fn distance(a: LatLng, b: LatLng) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let sin_d_lat = (d_lat / 2.0).sin();
    let sin_d_lng = (d_lng / 2.0).sin();
    let h = sin_d_lat * sin_d_lat
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * sin_d_lng * sin_d_lng;
    // Rounding can push h a hair outside [0, 1] for antipodal points
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}
