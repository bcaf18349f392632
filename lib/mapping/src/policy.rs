//! Annotation overrides
//!
//! An annotation's explicit field type always beats the inferred one, even
//! when it does not fit the native type. Inference is only consulted when the
//! annotation is absent or leaves the type as [`FieldType::None`].

use crate::infer;
use nestmap_core::{FieldAnnotation, FieldType, GeoPointAnnotation, NativeType, PropertyAnnotation};
use serde_json::Value;
use tracing::warn;

/// Schema attributes written next to a property's `type`, in output order
pub type Attributes = Vec<(String, Value)>;

pub fn is_opted_out(annotation: Option<&FieldAnnotation>) -> bool {
    annotation.map_or(false, FieldAnnotation::is_opt_out)
}

/// Effective field type of a field
pub fn resolve(annotation: Option<&FieldAnnotation>, native: &NativeType) -> FieldType {
    match annotation.map(FieldAnnotation::field_type) {
        Some(explicit) if !explicit.is_none() => explicit,
        _ => infer::infer(native),
    }
}

/// Keys the writer owns; free-form attributes never override them
pub const RESERVED_KEYS: [&str; 2] = ["type", "properties"];

/// Attributes carried by an annotation, excluding `type`.
/// Only attributes that are set are emitted.
pub fn annotation_attributes(annotation: &FieldAnnotation) -> Attributes {
    match annotation {
        FieldAnnotation::Property(p) => property_attributes(p),
        FieldAnnotation::GeoPoint(g) => geo_point_attributes(g),
    }
}

fn property_attributes(p: &PropertyAnnotation) -> Attributes {
    let mut attrs = Attributes::new();
    push(&mut attrs, "index", p.index.map(|mode| mode.as_str()));
    push(&mut attrs, "analyzer", p.analyzer.as_deref());
    push(&mut attrs, "index_analyzer", p.index_analyzer.as_deref());
    push(&mut attrs, "search_analyzer", p.search_analyzer.as_deref());
    push(&mut attrs, "format", p.format.as_deref());
    push(&mut attrs, "store", p.store);
    push(&mut attrs, "boost", p.boost);
    push(&mut attrs, "null_value", p.null_value.as_deref());
    push(&mut attrs, "include_in_all", p.include_in_all);
    extend_extra(&mut attrs, &p.extra);
    attrs
}

fn geo_point_attributes(g: &GeoPointAnnotation) -> Attributes {
    let mut attrs = Attributes::new();
    push(&mut attrs, "lat_lon", g.lat_lon);
    push(&mut attrs, "geohash", g.geohash);
    push(&mut attrs, "geohash_precision", g.geohash_precision);
    extend_extra(&mut attrs, &g.extra);
    attrs
}

fn extend_extra(attrs: &mut Attributes, extra: &[(String, Value)]) {
    for (key, value) in extra {
        if RESERVED_KEYS.contains(&key.as_str()) {
            warn!("Ignoring reserved attribute `{}` on annotation", key);
            continue;
        }
        attrs.push((key.clone(), value.clone()));
    }
}

fn push<V: Into<Value>>(attrs: &mut Attributes, key: &str, value: Option<V>) {
    if let Some(value) = value {
        attrs.push((key.to_string(), value.into()));
    }
}
