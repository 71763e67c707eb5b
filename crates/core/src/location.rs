//! Geographic locations and great-circle distance

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS-84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Planar point used by the geometry code: x = longitude, y = latitude.
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Haversine distance to `other` in kilometres.
    ///
    /// This is the single distance function used for threat-zone checks, so
    /// both directions of the isolation rule agree.
    pub fn distance_km(&self, other: &Location) -> f64 {
        Haversine::distance(self.to_point(), other.to_point()) / 1000.0
    }
}

impl From<Point<f64>> for Location {
    fn from(p: Point<f64>) -> Self {
        Self::new(p.y(), p.x())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}
