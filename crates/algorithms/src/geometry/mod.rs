//! Geometry containment
//!
//! - Point-in-polygon for simple and multi-part regions
//! - Bounding boxes used to skip regions cheaply

mod bbox;
mod containment;

pub use bbox::BoundingBox;
pub use containment::{contains, polygon_contains, ring_contains, IndexedRegion};
