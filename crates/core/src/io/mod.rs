//! I/O operations for reading map data

mod geojson_io;
mod indicator;

pub use geojson_io::{
    read_point_features, read_point_features_from_str, read_regions, read_regions_from_str,
};
pub use indicator::{parse_indicator_csv, read_indicator_csv};
