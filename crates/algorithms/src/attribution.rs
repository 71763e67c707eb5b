//! Country attribution
//!
//! Tags each point feature with the name of the first region that contains
//! it. Features outside every region keep `country = None` and are treated
//! as ocean points from then on.

use quakemap_core::{Feature, Location, Region};
use tracing::{debug, info};

use crate::geometry::{contains, IndexedRegion};
use crate::maybe_rayon::*;

/// Parameters for country attribution
#[derive(Debug, Clone)]
pub struct AttributionParams {
    /// Reject regions whose bounding box misses the point before running the
    /// full ring test. Does not change results.
    pub bbox_prefilter: bool,
}

impl Default for AttributionParams {
    fn default() -> Self {
        Self { bbox_prefilter: true }
    }
}

/// Counts produced by one attribution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttributionReport {
    pub on_land: usize,
    pub off_land: usize,
}

impl AttributionReport {
    pub fn total(&self) -> usize {
        self.on_land + self.off_land
    }
}

/// Name of the first region (in slice order) containing `loc`.
pub fn locate_country<'r>(loc: &Location, regions: &'r [Region]) -> Option<&'r str> {
    regions
        .iter()
        .find(|r| contains(r, loc))
        .map(|r| r.name.as_str())
}

/// Assign `country` on every feature.
///
/// The country is recomputed from geometry on every call, so repeated passes
/// over the same data give the same tags. Regions are scanned in order and
/// the first hit wins, also when features are processed in parallel.
pub fn attribute_countries(
    features: &mut [Feature],
    regions: &[Region],
    params: &AttributionParams,
) -> AttributionReport {
    let index: Vec<IndexedRegion<'_>> = regions.iter().map(IndexedRegion::new).collect();
    let prefilter = params.bbox_prefilter;
    let total = features.len();

    let on_land = features
        .into_par_iter()
        .map(|feature| {
            let hit = if prefilter {
                index
                    .iter()
                    .find(|r| r.contains(&feature.location))
                    .map(|r| r.region.name.as_str())
            } else {
                locate_country(&feature.location, regions)
            };
            feature.country = hit.map(str::to_string);
            hit.is_some()
        })
        .filter(|&on_land| on_land)
        .count();

    let report = AttributionReport {
        on_land,
        off_land: total - on_land,
    };
    debug!(regions = regions.len(), prefilter, "Attribution pass finished");
    info!(
        "Attributed {} features: {} on land, {} ocean",
        report.total(),
        report.on_land,
        report.off_land
    );
    report
}
