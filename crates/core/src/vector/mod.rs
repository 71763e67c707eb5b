//! Vector data structures: point features and named regions

use geo_types::{MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::location::Location;

/// Attribute value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    /// Numeric view of the value. Strings are parsed, since feed data often
    /// carries numbers as text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(v) => Some(*v as f64),
            AttributeValue::Float(v) => Some(*v),
            AttributeValue::String(s) => s.trim().parse().ok(),
            AttributeValue::Null | AttributeValue::Bool(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&serde_json::Value> for AttributeValue {
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => AttributeValue::Null,
            Value::Bool(b) => AttributeValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => AttributeValue::Int(i),
                None => AttributeValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => AttributeValue::String(s.clone()),
            other => AttributeValue::String(other.to_string()),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::String(v.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::String(v)
    }
}

/// A geocoded data point with attributes.
///
/// `country` is derived: it is filled in by country attribution and is `None`
/// for points that fall in no region (the ocean).
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub location: Location,
    pub properties: HashMap<String, AttributeValue>,
    pub country: Option<String>,
    pub id: Option<String>,
}

impl Feature {
    /// Create a feature with no attributes
    pub fn new(location: Location) -> Self {
        Self {
            location,
            properties: HashMap::new(),
            country: None,
            id: None,
        }
    }

    /// Builder-style attribute setter
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Set an attribute
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Get an attribute
    pub fn get_property(&self, key: &str) -> Option<&AttributeValue> {
        self.properties.get(key)
    }

    /// Required numeric attribute.
    ///
    /// Fails with [`Error::MalformedFeature`] naming `key` if the attribute is
    /// absent or cannot be read as a number.
    pub fn number(&self, key: &str) -> Result<f64> {
        self.get_property(key)
            .and_then(AttributeValue::as_f64)
            .filter(|v| v.is_finite())
            .ok_or_else(|| Error::malformed(key))
    }

    /// Optional text attribute
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get_property(key).and_then(AttributeValue::as_str)
    }

    /// True once attribution has placed this feature inside a region.
    pub fn is_on_land(&self) -> bool {
        self.country.is_some()
    }
}

/// A named boundary, e.g. a country.
///
/// Single-polygon countries are stored as a one-part multi-polygon so that
/// containment has one code path.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub name: String,
    /// Short identifier such as an ISO-3 code, when the source provides one.
    pub id: Option<String>,
    pub geometry: MultiPolygon<f64>,
}

impl Region {
    pub fn new(name: impl Into<String>, geometry: MultiPolygon<f64>) -> Self {
        Self {
            name: name.into(),
            id: None,
            geometry,
        }
    }

    pub fn from_polygon(name: impl Into<String>, polygon: Polygon<f64>) -> Self {
        Self::new(name, MultiPolygon::new(vec![polygon]))
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn parts(&self) -> &[Polygon<f64>] {
        &self.geometry.0
    }
}
