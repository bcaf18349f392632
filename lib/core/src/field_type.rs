//! Canonical field types
//!
//! The closed set of storage types a mapping can declare for a field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Field type tag written as the `"type"` of a mapping property
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Integer,
    Long,
    Float,
    Double,
    Date,
    Boolean,
    /// Structured sub-document, properties expanded inline
    Object,
    /// Structured sub-document indexed as independent hidden documents
    Nested,
    GeoPoint,
    Ip,
    Binary,
    Attachment,
    Completion,
    /// No usable type. Fields resolving to this are left out of the mapping.
    #[default]
    None,
}

impl FieldType {
    /// Name used in the mapping document, `None` for [`FieldType::None`]
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            FieldType::String => Some("string"),
            FieldType::Integer => Some("integer"),
            FieldType::Long => Some("long"),
            FieldType::Float => Some("float"),
            FieldType::Double => Some("double"),
            FieldType::Date => Some("date"),
            FieldType::Boolean => Some("boolean"),
            FieldType::Object => Some("object"),
            FieldType::Nested => Some("nested"),
            FieldType::GeoPoint => Some("geo_point"),
            FieldType::Ip => Some("ip"),
            FieldType::Binary => Some("binary"),
            FieldType::Attachment => Some("attachment"),
            FieldType::Completion => Some("completion"),
            FieldType::None => None,
        }
    }

    /// Whether a field of this type carries its own `properties`
    pub fn is_composite(&self) -> bool {
        matches!(self, FieldType::Object | FieldType::Nested)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, FieldType::None)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("none"))
    }
}
