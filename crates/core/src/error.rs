//! Error types for quakemap

use thiserror::Error;

/// Main error type for quakemap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A feature lacks a required attribute, or the attribute is not numeric.
    #[error("Malformed feature: missing or non-numeric attribute '{key}'")]
    MalformedFeature { key: String },

    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Error {
    pub fn malformed(key: impl Into<String>) -> Self {
        Error::MalformedFeature { key: key.into() }
    }
}

/// Result type alias for quakemap operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_carries_key() {
        let err = Error::malformed("magnitude");
        match &err {
            Error::MalformedFeature { key } => assert_eq!(key, "magnitude"),
            other => panic!("unexpected variant: {:?}", other),
        }
        assert!(err.to_string().contains("'magnitude'"));
    }
}
