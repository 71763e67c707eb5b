//! Quake counts per country

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::marker::HazardMarker;

/// Label used for quakes outside every country.
pub const OCEAN_LABEL: &str = "OCEAN QUAKES";

/// Number of quakes per country plus the ocean count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuakeSummary {
    /// Country name -> quake count, sorted by name
    pub by_country: BTreeMap<String, usize>,
    pub ocean: usize,
}

impl QuakeSummary {
    pub fn total(&self) -> usize {
        self.by_country.values().sum::<usize>() + self.ocean
    }

    /// Countries ordered by descending count, ties by name.
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut rows: Vec<(&str, usize)> = self
            .by_country
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }
}

impl fmt::Display for QuakeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, count) in &self.by_country {
            writeln!(f, "{}: {}", name, count)?;
        }
        write!(f, "{}: {}", OCEAN_LABEL, self.ocean)
    }
}

/// Count quakes by the country they were attributed to.
pub fn summarize_quakes(hazards: &[HazardMarker]) -> QuakeSummary {
    let mut summary = QuakeSummary::default();
    for hazard in hazards {
        match hazard.country() {
            Some(country) => *summary.by_country.entry(country.to_string()).or_default() += 1,
            None => summary.ocean += 1,
        }
    }
    summary
}
