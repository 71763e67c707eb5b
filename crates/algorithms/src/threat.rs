//! Threat zones around earthquakes
//!
//! The felt radius of a quake grows exponentially with magnitude:
//!
//! ```text
//! radius_km = base_miles * growth^(2 * magnitude - 5) * km_per_mile
//! ```
//!
//! A location is threatened when its great-circle distance to the epicentre
//! is at most that radius.

use quakemap_core::{Error, Location, Result};

use crate::marker::HazardMarker;

/// Parameters of the threat-radius curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatParams {
    /// Radius in miles of a magnitude 2.5 quake (default: 20.0)
    pub base_miles: f64,
    /// Growth factor per half magnitude step (default: 1.8)
    pub growth: f64,
    /// Mile to kilometre factor (default: 1.6)
    pub km_per_mile: f64,
}

impl Default for ThreatParams {
    fn default() -> Self {
        Self {
            base_miles: 20.0,
            growth: 1.8,
            km_per_mile: 1.6,
        }
    }
}

impl ThreatParams {
    /// Threat radius in km for a quake of the given magnitude.
    pub fn influence_radius_km(&self, magnitude: f64) -> f64 {
        self.base_miles * self.growth.powf(2.0 * magnitude - 5.0) * self.km_per_mile
    }

    /// Reject curves that do not grow with magnitude.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_miles.is_finite() && self.base_miles > 0.0) {
            return Err(Error::InvalidParameter {
                name: "base_miles",
                value: self.base_miles.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if !(self.growth.is_finite() && self.growth > 1.0) {
            return Err(Error::InvalidParameter {
                name: "growth",
                value: self.growth.to_string(),
                reason: "must be greater than 1".to_string(),
            });
        }
        if !(self.km_per_mile.is_finite() && self.km_per_mile > 0.0) {
            return Err(Error::InvalidParameter {
                name: "km_per_mile",
                value: self.km_per_mile.to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Threat radius in km with the default curve.
pub fn influence_radius_km(magnitude: f64) -> f64 {
    ThreatParams::default().influence_radius_km(magnitude)
}

/// True if `loc` lies inside the threat circle of `hazard`.
pub fn within_influence(hazard: &HazardMarker, loc: &Location) -> bool {
    hazard.location().distance_km(loc) <= hazard.threat_radius_km()
}
