//! GeoJSON reading for point features and country regions
//!
//! Uses the `geojson` crate for parsing and its `geo-types` conversion for
//! polygon geometry.

use std::fs;
use std::path::Path;

use geo_types::{Geometry, MultiPolygon};
use geojson::{feature::Id, GeoJson};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::location::Location;
use crate::vector::{AttributeValue, Feature, Region};

/// Read point features (earthquakes, cities) from a GeoJSON file.
pub fn read_point_features<P: AsRef<Path>>(path: P) -> Result<Vec<Feature>> {
    let text = fs::read_to_string(path.as_ref())?;
    let features = read_point_features_from_str(&text)?;
    debug!("Read {} point features from {}", features.len(), path.as_ref().display());
    Ok(features)
}

/// Same as [`read_point_features`] but parses an in-memory document.
///
/// Non-point features are skipped with a warning. For USGS feeds the depth
/// is carried as the third coordinate and the magnitude as `mag`; both are
/// copied to the `depth` / `magnitude` attributes when those are absent.
pub fn read_point_features_from_str(text: &str) -> Result<Vec<Feature>> {
    let mut out = Vec::new();
    for gj_feature in feature_list(text.parse::<GeoJson>()?)? {
        let Some(geometry) = gj_feature.geometry.as_ref() else {
            warn!("Skipping feature without geometry");
            continue;
        };
        let geojson::Value::Point(position) = &geometry.value else {
            warn!("Skipping non-point feature");
            continue;
        };
        if position.len() < 2 {
            return Err(Error::UnsupportedGeometry(format!(
                "point with {} coordinates",
                position.len()
            )));
        }

        let mut feature = Feature::new(Location::new(position[1], position[0]));
        feature.id = gj_feature.id.as_ref().map(id_to_string);
        if let Some(props) = &gj_feature.properties {
            for (key, value) in props {
                feature.set_property(key.clone(), AttributeValue::from(value));
            }
        }
        if feature.get_property("depth").is_none() {
            if let Some(depth) = position.get(2) {
                feature.set_property("depth", *depth);
            }
        }
        if feature.get_property("magnitude").is_none() {
            if let Some(mag) = feature.get_property("mag").cloned() {
                feature.set_property("magnitude", mag);
            }
        }
        out.push(feature);
    }
    Ok(out)
}

/// Read country regions from a GeoJSON file.
pub fn read_regions<P: AsRef<Path>>(path: P) -> Result<Vec<Region>> {
    let text = fs::read_to_string(path.as_ref())?;
    let regions = read_regions_from_str(&text)?;
    debug!("Read {} regions from {}", regions.len(), path.as_ref().display());
    Ok(regions)
}

/// Same as [`read_regions`] but parses an in-memory document.
///
/// The region name comes from the `name` property (falling back to the
/// feature id). Features that are not polygons or multi-polygons are skipped.
pub fn read_regions_from_str(text: &str) -> Result<Vec<Region>> {
    let mut out = Vec::new();
    for gj_feature in feature_list(text.parse::<GeoJson>()?)? {
        let id = gj_feature.id.as_ref().map(id_to_string);
        let name = gj_feature
            .properties
            .as_ref()
            .and_then(|p| p.get("name"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .or_else(|| id.clone());
        let Some(name) = name else {
            warn!("Skipping region without a name");
            continue;
        };
        let Some(geometry) = gj_feature.geometry else {
            warn!("Skipping region '{}' without geometry", name);
            continue;
        };

        let geom: Geometry<f64> = geometry.value.try_into()?;
        let parts: MultiPolygon<f64> = match geom {
            Geometry::Polygon(p) => p.into(),
            Geometry::MultiPolygon(m) => m,
            _ => {
                warn!("Skipping region '{}': not a polygon", name);
                continue;
            }
        };

        let mut region = Region::new(name, parts);
        region.id = id;
        out.push(region);
    }
    Ok(out)
}

fn feature_list(doc: GeoJson) -> Result<Vec<geojson::Feature>> {
    match doc {
        GeoJson::FeatureCollection(fc) => Ok(fc.features),
        GeoJson::Feature(f) => Ok(vec![f]),
        GeoJson::Geometry(_) => Err(Error::UnsupportedGeometry(
            "bare geometry, expected a Feature or FeatureCollection".into(),
        )),
    }
}

fn id_to_string(id: &Id) -> String {
    match id {
        Id::String(s) => s.clone(),
        Id::Number(n) => n.to_string(),
    }
}
