//! Interactive markers wrapping earthquake and city features
//!
//! Markers carry the view state the selection controller mutates. Drawing is
//! left to the host; `ViewState::hidden` tells it what to skip.

use std::fmt;

use quakemap_core::{Feature, Location, Result};

use crate::classify::{is_recent, DepthClass, DepthThresholds, MagnitudeClass, MagnitudeThresholds};
use crate::threat::ThreatParams;

/// Per-marker view flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub hovered: bool,
    pub pinned: bool,
    pub hidden: bool,
}

/// Identity of a marker: its collection and its index in that collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerId {
    Hazard(usize),
    Place(usize),
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerId::Hazard(i) => write!(f, "hazard#{}", i),
            MarkerId::Place(i) => write!(f, "place#{}", i),
        }
    }
}

/// Where a quake happened, decided once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HazardSetting {
    OnLand { country: String },
    OffLand,
}

/// Parameters used when building hazard markers
#[derive(Debug, Clone, Default)]
pub struct MarkerParams {
    pub threat: ThreatParams,
    pub depth: DepthThresholds,
    pub magnitude: MagnitudeThresholds,
}

/// Screen radius per unit of magnitude.
pub const RADIUS_PER_MAGNITUDE: f64 = 1.75;

/// Half-size of the triangle drawn for a city.
pub const PLACE_MARKER_SIZE: f64 = 5.0;

/// An earthquake marker.
#[derive(Debug, Clone)]
pub struct HazardMarker {
    feature: Feature,
    magnitude: f64,
    depth: f64,
    threat_radius_km: f64,
    depth_class: DepthClass,
    magnitude_class: MagnitudeClass,
    setting: HazardSetting,
    pub view: ViewState,
}

impl HazardMarker {
    /// Build a marker from an attributed feature.
    ///
    /// `magnitude` and `depth` are required; a missing or non-numeric value
    /// fails with `Error::MalformedFeature` naming the attribute.
    pub fn new(feature: Feature, params: &MarkerParams) -> Result<Self> {
        let magnitude = feature.number("magnitude")?;
        let depth = feature.number("depth")?;
        let setting = match &feature.country {
            Some(country) => HazardSetting::OnLand {
                country: country.clone(),
            },
            None => HazardSetting::OffLand,
        };
        Ok(Self {
            threat_radius_km: params.threat.influence_radius_km(magnitude),
            depth_class: params.depth.classify(depth),
            magnitude_class: params.magnitude.classify(magnitude),
            magnitude,
            depth,
            setting,
            feature,
            view: ViewState::default(),
        })
    }

    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    pub fn location(&self) -> Location {
        self.feature.location
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Drawn radius, linear in magnitude.
    pub fn visual_radius(&self) -> f64 {
        RADIUS_PER_MAGNITUDE * self.magnitude
    }

    pub fn threat_radius_km(&self) -> f64 {
        self.threat_radius_km
    }

    pub fn setting(&self) -> &HazardSetting {
        &self.setting
    }

    pub fn is_on_land(&self) -> bool {
        matches!(self.setting, HazardSetting::OnLand { .. })
    }

    pub fn country(&self) -> Option<&str> {
        match &self.setting {
            HazardSetting::OnLand { country } => Some(country),
            HazardSetting::OffLand => None,
        }
    }

    pub fn depth_class(&self) -> DepthClass {
        self.depth_class
    }

    pub fn magnitude_class(&self) -> MagnitudeClass {
        self.magnitude_class
    }

    /// Quake happened in the past hour or day.
    pub fn is_recent(&self) -> bool {
        is_recent(self.feature.text("age"))
    }

    /// Tooltip text shown while hovered.
    pub fn title(&self) -> String {
        format!(
            "{}, Magnitude: {}, Depth: {} Km.",
            self.feature.text("title").unwrap_or("Earthquake"),
            self.magnitude,
            self.depth
        )
    }
}

/// A city marker.
#[derive(Debug, Clone)]
pub struct PlaceMarker {
    feature: Feature,
    name: String,
    population: Option<f64>,
    pub view: ViewState,
}

impl PlaceMarker {
    /// Build a city marker. `name` is required; `population` (millions) is
    /// optional but must be numeric when present.
    pub fn new(feature: Feature) -> Result<Self> {
        let name = feature
            .text("name")
            .map(str::to_string)
            .ok_or_else(|| quakemap_core::Error::malformed("name"))?;
        let population = match feature.get_property("population") {
            Some(_) => Some(feature.number("population")?),
            None => None,
        };
        Ok(Self {
            feature,
            name,
            population,
            view: ViewState::default(),
        })
    }

    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    pub fn location(&self) -> Location {
        self.feature.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Country from the city data, or from attribution when the data has none.
    pub fn country(&self) -> Option<&str> {
        self.feature
            .text("country")
            .or(self.feature.country.as_deref())
    }

    pub fn population(&self) -> Option<f64> {
        self.population
    }

    /// Tooltip text shown while hovered.
    pub fn title(&self) -> String {
        let population = self
            .population
            .map(|p| p.to_string())
            .unwrap_or_else(|| "?".to_string());
        format!(
            "City: {}, Country: {}, Population: {} Mill.",
            self.name,
            self.country().unwrap_or("Unknown"),
            population
        )
    }
}

/// Borrowed view of either kind of marker, handed to hit testers.
#[derive(Debug, Clone, Copy)]
pub enum MarkerRef<'a> {
    Hazard(&'a HazardMarker),
    Place(&'a PlaceMarker),
}

impl MarkerRef<'_> {
    pub fn location(&self) -> Location {
        match self {
            MarkerRef::Hazard(h) => h.location(),
            MarkerRef::Place(p) => p.location(),
        }
    }

    pub fn view(&self) -> ViewState {
        match self {
            MarkerRef::Hazard(h) => h.view,
            MarkerRef::Place(p) => p.view,
        }
    }

    /// Drawn radius in screen pixels.
    pub fn screen_radius(&self) -> f64 {
        match self {
            MarkerRef::Hazard(h) => h.visual_radius(),
            MarkerRef::Place(_) => PLACE_MARKER_SIZE,
        }
    }

    pub fn title(&self) -> String {
        match self {
            MarkerRef::Hazard(h) => h.title(),
            MarkerRef::Place(p) => p.title(),
        }
    }
}

/// Build hazard markers from attributed features, stopping at the first
/// malformed one.
pub fn build_hazard_markers(features: Vec<Feature>, params: &MarkerParams) -> Result<Vec<HazardMarker>> {
    features
        .into_iter()
        .map(|f| HazardMarker::new(f, params))
        .collect()
}

/// Build city markers, stopping at the first malformed one.
pub fn build_place_markers(features: Vec<Feature>) -> Result<Vec<PlaceMarker>> {
    features.into_iter().map(PlaceMarker::new).collect()
}
