//! # quakemap Algorithms
//!
//! Geospatial attribution and interaction state for the quake map.
//!
//! ## Modules
//!
//! - **geometry**: point-in-polygon for simple and multi-part regions
//! - **attribution**: tag point features with the country containing them
//! - **threat**: magnitude-driven threat radius and containment
//! - **marker**: quake and city markers with view state
//! - **selection**: hover / click-to-isolate state machine
//! - **classify**, **summary**, **thematic**: quake classes, per-country
//!   counts and choropleth shading

pub mod attribution;
pub mod classify;
pub mod geometry;
pub mod marker;
mod maybe_rayon;
pub mod selection;
pub mod summary;
pub mod thematic;
pub mod threat;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::attribution::{attribute_countries, locate_country, AttributionParams, AttributionReport};
    pub use crate::classify::{DepthClass, DepthThresholds, MagnitudeClass, MagnitudeThresholds};
    pub use crate::geometry::{contains, BoundingBox};
    pub use crate::marker::{
        build_hazard_markers, build_place_markers, HazardMarker, HazardSetting, MarkerId, MarkerParams,
        MarkerRef, PlaceMarker, ViewState,
    };
    pub use crate::selection::{HitTest, MarkerLayers, PointerEvent, ProjectedHitTest, SelectionController};
    pub use crate::summary::{summarize_quakes, QuakeSummary};
    pub use crate::thematic::{shade_regions, Rgb, ShadeParams};
    pub use crate::threat::{influence_radius_km, within_influence, ThreatParams};
    pub use quakemap_core::prelude::*;
}
