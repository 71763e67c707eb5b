//! # quakemap Core
//!
//! Core types, errors and I/O for the quakemap library.
//!
//! This crate provides:
//! - `Location`: WGS-84 position with great-circle distance
//! - `Feature`: a geocoded point with attributes and a derived country
//! - `Region`: a named (multi-)polygon boundary
//! - Loaders for GeoJSON feature collections and indicator CSV tables

pub mod error;
pub mod io;
pub mod location;
pub mod vector;

pub use error::{Error, Result};
pub use location::Location;
pub use vector::{AttributeValue, Feature, Region};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::location::Location;
    pub use crate::vector::{AttributeValue, Feature, Region};
}
