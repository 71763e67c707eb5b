//! Choropleth shading of regions by a per-country indicator
//!
//! The indicator is mapped linearly from `[value_min, value_max]` onto a
//! level in `[level_min, level_max]`, and the level to the colour
//! `(255 - level, 100, level)`: low values red, high values blue. Regions
//! without data are grey.

use std::collections::HashMap;

use quakemap_core::{Error, Region, Result};
use serde::Serialize;
use tracing::debug;

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fill for regions with no indicator value.
    pub const NO_DATA: Self = Self::new(150, 150, 150);
}

/// Parameters for choropleth shading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeParams {
    pub value_min: f64,
    pub value_max: f64,
    pub level_min: f64,
    pub level_max: f64,
}

impl Default for ShadeParams {
    /// Life expectancy in years.
    fn default() -> Self {
        Self {
            value_min: 40.0,
            value_max: 90.0,
            level_min: 10.0,
            level_max: 255.0,
        }
    }
}

impl ShadeParams {
    /// The value range must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if !(self.value_max > self.value_min) {
            return Err(Error::InvalidParameter {
                name: "value_max",
                value: self.value_max.to_string(),
                reason: format!("must be greater than value_min ({})", self.value_min),
            });
        }
        Ok(())
    }

    /// Colour for one indicator value. Values outside the range saturate.
    pub fn color_for(&self, value: f64) -> Rgb {
        let span = self.value_max - self.value_min;
        let t = if span == 0.0 {
            0.0
        } else {
            (value - self.value_min) / span
        };
        let level = (self.level_min + t * (self.level_max - self.level_min)).clamp(0.0, 255.0) as u8;
        Rgb::new(255 - level, 100, level)
    }
}

/// Shade each region by the indicator value keyed by its id (or its name
/// when the region has no id). Output order follows `regions`.
pub fn shade_regions(
    regions: &[Region],
    values: &HashMap<String, f64>,
    params: &ShadeParams,
) -> Vec<(String, Rgb)> {
    let mut missing = 0usize;
    let shaded = regions
        .iter()
        .map(|region| {
            let key = region.id.as_deref().unwrap_or(&region.name);
            let color = match values.get(key) {
                Some(&v) => params.color_for(v),
                None => {
                    missing += 1;
                    Rgb::NO_DATA
                }
            };
            (region.name.clone(), color)
        })
        .collect();
    debug!("Shaded {} regions, {} without data", regions.len(), missing);
    shaded
}
