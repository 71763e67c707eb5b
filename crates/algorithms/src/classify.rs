//! Quake classification by depth, magnitude and age

use serde::{Deserialize, Serialize};

/// Hypocentre depth class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepthClass {
    Shallow,
    Intermediate,
    Deep,
}

impl DepthClass {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Shallow => "Shallow",
            Self::Intermediate => "Intermediate",
            Self::Deep => "Deep",
        }
    }
}

/// Depth class boundaries in km
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthThresholds {
    /// Depth at which a quake stops being shallow (default: 70 km)
    pub intermediate: f64,
    /// Depth at which a quake becomes deep (default: 300 km)
    pub deep: f64,
}

impl Default for DepthThresholds {
    fn default() -> Self {
        Self {
            intermediate: 70.0,
            deep: 300.0,
        }
    }
}

impl DepthThresholds {
    pub fn classify(&self, depth_km: f64) -> DepthClass {
        if depth_km < self.intermediate {
            DepthClass::Shallow
        } else if depth_km < self.deep {
            DepthClass::Intermediate
        } else {
            DepthClass::Deep
        }
    }
}

/// Magnitude class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MagnitudeClass {
    Light,
    Moderate,
    Strong,
}

/// Magnitude class boundaries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnitudeThresholds {
    /// Lowest moderate magnitude (default: 4.0)
    pub moderate: f64,
    /// Lowest strong magnitude (default: 5.0)
    pub strong: f64,
}

impl Default for MagnitudeThresholds {
    fn default() -> Self {
        Self {
            moderate: 4.0,
            strong: 5.0,
        }
    }
}

impl MagnitudeThresholds {
    pub fn classify(&self, magnitude: f64) -> MagnitudeClass {
        if magnitude < self.moderate {
            MagnitudeClass::Light
        } else if magnitude < self.strong {
            MagnitudeClass::Moderate
        } else {
            MagnitudeClass::Strong
        }
    }
}

/// Feed age buckets that count as recent.
pub const RECENT_AGES: [&str; 2] = ["Past Hour", "Past Day"];

/// True for quakes whose `age` attribute is one of [`RECENT_AGES`].
pub fn is_recent(age: Option<&str>) -> bool {
    age.is_some_and(|a| RECENT_AGES.contains(&a))
}
