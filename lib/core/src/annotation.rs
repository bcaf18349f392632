//! Per-field mapping annotations
//!
//! An annotation is an explicit directive attached to a field that takes
//! precedence over whatever the mapping engine would infer from the field's
//! native type. Annotations come in a closed set of kinds, each carrying its
//! own attribute set.

use crate::field_type::FieldType;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldAnnotation {
    Property(PropertyAnnotation),
    GeoPoint(GeoPointAnnotation),
}

impl FieldAnnotation {
    /// A property annotation forcing the given field type
    pub fn property(field_type: FieldType) -> Self {
        FieldAnnotation::Property(PropertyAnnotation::new().with_type(field_type))
    }

    /// Exclude the field from the mapping
    pub fn opt_out() -> Self {
        FieldAnnotation::Property(PropertyAnnotation::new().opted_out())
    }

    pub fn geo_point() -> Self {
        FieldAnnotation::GeoPoint(GeoPointAnnotation::default())
    }

    /// Explicit field type, [`FieldType::None`] when the annotation defers to inference
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldAnnotation::Property(p) => p.field_type,
            FieldAnnotation::GeoPoint(_) => FieldType::GeoPoint,
        }
    }

    pub fn is_opt_out(&self) -> bool {
        match self {
            FieldAnnotation::Property(p) => p.opt_out,
            FieldAnnotation::GeoPoint(g) => g.opt_out,
        }
    }

    /// Output name overriding the naming strategy
    pub fn name(&self) -> Option<&str> {
        match self {
            FieldAnnotation::Property(p) => p.name.as_deref(),
            FieldAnnotation::GeoPoint(g) => g.name.as_deref(),
        }
    }
}

impl From<PropertyAnnotation> for FieldAnnotation {
    fn from(p: PropertyAnnotation) -> Self {
        FieldAnnotation::Property(p)
    }
}

impl From<GeoPointAnnotation> for FieldAnnotation {
    fn from(g: GeoPointAnnotation) -> Self {
        FieldAnnotation::GeoPoint(g)
    }
}

/// How a string field is indexed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    Analyzed,
    NotAnalyzed,
    No,
}

impl IndexMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexMode::Analyzed => "analyzed",
            IndexMode::NotAnalyzed => "not_analyzed",
            IndexMode::No => "no",
        }
    }
}

/// General purpose annotation for any field
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PropertyAnnotation {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub opt_out: bool,
    pub name: Option<String>,
    pub index: Option<IndexMode>,
    pub analyzer: Option<String>,
    pub index_analyzer: Option<String>,
    pub search_analyzer: Option<String>,
    pub format: Option<String>,
    pub store: Option<bool>,
    pub boost: Option<f64>,
    pub null_value: Option<String>,
    pub include_in_all: Option<bool>,
    /// Free-form attributes written after the known ones, in order
    pub extra: Vec<(String, Value)>,
}

impl PropertyAnnotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn opted_out(mut self) -> Self {
        self.opt_out = true;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn index(mut self, mode: IndexMode) -> Self {
        self.index = Some(mode);
        self
    }

    pub fn not_analyzed(self) -> Self {
        self.index(IndexMode::NotAnalyzed)
    }

    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn store(mut self, store: bool) -> Self {
        self.store = Some(store);
        self
    }

    pub fn boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }
}

/// Annotation for geo points, always mapped as `geo_point`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeoPointAnnotation {
    pub opt_out: bool,
    pub name: Option<String>,
    pub lat_lon: Option<bool>,
    pub geohash: Option<bool>,
    pub geohash_precision: Option<u32>,
    pub extra: Vec<(String, Value)>,
}

impl GeoPointAnnotation {
    pub fn lat_lon(mut self, enabled: bool) -> Self {
        self.lat_lon = Some(enabled);
        self
    }

    pub fn geohash_precision(mut self, precision: u32) -> Self {
        self.geohash = Some(true);
        self.geohash_precision = Some(precision);
        self
    }
}
