//! Type mapping writer
//!
//! Walks a type's fields in declaration order and builds the mapping tree.
//! Per field: opted-out fields are skipped, the effective type is resolved
//! (annotation first, inference second), unmappable fields are dropped, and
//! `object`/`nested` fields recurse into their element type under the
//! recursion budget.

use crate::guard::VisitCounts;
use ahash::AHashSet;
use crate::infer;
use crate::policy;
use crate::tree::{PropertyNode, TypeMapping};
use nestmap_core::{
    Describe, Error, FieldAnnotation, FieldDescriptor, NameStrategy, NativeType, Result,
    TypeDescriptor, TypeRegistry,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Settings for one mapping run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingSettings {
    /// How many times a type may be re-entered along one path before its
    /// properties are left empty. 0 stops at the first re-entry.
    #[serde(default)]
    pub max_recursion: u32,

    /// Field name convention, overridden by an annotation's explicit name
    #[serde(default = "default_field_names")]
    pub field_names: NameStrategy,

    /// Mapping name convention used when no name is given
    #[serde(default = "default_type_names")]
    pub type_names: NameStrategy,
}

fn default_field_names() -> NameStrategy {
    NameStrategy::CamelCase
}

fn default_type_names() -> NameStrategy {
    NameStrategy::Lowercase
}

impl Default for MappingSettings {
    fn default() -> Self {
        Self {
            max_recursion: 0,
            field_names: default_field_names(),
            type_names: default_type_names(),
        }
    }
}

impl MappingSettings {
    pub fn with_max_recursion(mut self, max_recursion: u32) -> Self {
        self.max_recursion = max_recursion;
        self
    }

    pub fn with_field_names(mut self, strategy: NameStrategy) -> Self {
        self.field_names = strategy;
        self
    }

    pub fn with_type_names(mut self, strategy: NameStrategy) -> Self {
        self.type_names = strategy;
        self
    }
}

/// Builds mappings for types held in a [`TypeRegistry`]
pub struct TypeMappingWriter<'a> {
    registry: &'a TypeRegistry,
    settings: MappingSettings,
}

impl<'a> TypeMappingWriter<'a> {
    pub fn new(registry: &'a TypeRegistry, settings: MappingSettings) -> Self {
        Self { registry, settings }
    }

    pub fn settings(&self) -> &MappingSettings {
        &self.settings
    }

    /// Mapping name inferred for a type
    pub fn mapping_name(&self, type_name: &str) -> String {
        self.settings.type_names.apply(type_name)
    }

    /// Build the mapping of a registered type.
    ///
    /// `mapping_name` defaults to the type naming strategy applied to the type
    /// name. Fails only when the root type is missing or unnamed; unmappable
    /// fields and recursion cut-offs never fail.
    pub fn build_mapping(&self, type_name: &str, mapping_name: Option<&str>) -> Result<TypeMapping> {
        let descriptor = self.root_descriptor(type_name)?;
        let name = match mapping_name {
            Some(name) => name.to_string(),
            None => self.mapping_name(descriptor.name.as_str()),
        };
        if name.trim().is_empty() {
            return Err(Error::InvalidArgument(format!(
                "empty mapping name for type `{}`",
                descriptor.name
            )));
        }

        debug!(
            "Building mapping '{}' for {} (max recursion {})",
            name, descriptor.name, self.settings.max_recursion
        );
        let properties = self.write_properties(descriptor, &VisitCounts::seeded(&descriptor.name));
        Ok(TypeMapping::new(name, properties))
    }

    /// Build the mapping of a type that describes itself.
    /// The type must already be registered, see [`TypeRegistry::register`].
    pub fn build_mapping_for<T: Describe>(&self, mapping_name: Option<&str>) -> Result<TypeMapping> {
        self.build_mapping(T::type_name().as_str(), mapping_name)
    }

    /// Build the mapping of a root given as a native type. Wrappers are
    /// unwrapped; anything but a structured type is rejected.
    pub fn build_mapping_from_native(
        &self,
        native: &NativeType,
        mapping_name: Option<&str>,
    ) -> Result<TypeMapping> {
        match infer::element_type(native).as_struct() {
            Some(name) => self.build_mapping(name.as_str(), mapping_name),
            None => Err(Error::InvalidArgument(format!(
                "cannot map non-structured type {:?}",
                native
            ))),
        }
    }

    /// Only the properties of a type's mapping, as embedded in a parent
    pub fn map_properties(&self, type_name: &str) -> Result<Vec<PropertyNode>> {
        let descriptor = self.root_descriptor(type_name)?;
        Ok(self.write_properties(descriptor, &VisitCounts::seeded(&descriptor.name)))
    }

    fn root_descriptor(&self, type_name: &str) -> Result<&'a TypeDescriptor> {
        if type_name.trim().is_empty() {
            return Err(Error::InvalidArgument("type name must not be empty".to_string()));
        }
        self.registry.get(type_name).ok_or_else(|| {
            Error::InvalidArgument(format!("no type descriptor registered for `{}`", type_name))
        })
    }

    /// Output names are unique per level; the first field to claim a name keeps it
    fn write_properties(&self, descriptor: &TypeDescriptor, counts: &VisitCounts) -> Vec<PropertyNode> {
        let mut seen = AHashSet::new();
        let mut properties = Vec::with_capacity(descriptor.fields.len());
        for field in &descriptor.fields {
            let Some(node) = self.write_property(field, counts) else {
                continue;
            };
            if !seen.insert(node.name.clone()) {
                warn!(
                    "Dropping field {}.{}: output name '{}' is already taken",
                    descriptor.name, field.name, node.name
                );
                continue;
            }
            properties.push(node);
        }
        properties
    }

    fn write_property(&self, field: &FieldDescriptor, counts: &VisitCounts) -> Option<PropertyNode> {
        let annotation = field.annotation.as_ref();
        if policy::is_opted_out(annotation) {
            trace!("Skipping opted-out field {}", field.name);
            return None;
        }

        let field_type = policy::resolve(annotation, &field.native_type);
        if field_type.is_none() {
            trace!("Skipping field {}: no field type for {:?}", field.name, field.native_type);
            return None;
        }

        let name = annotation
            .and_then(FieldAnnotation::name)
            .map(str::to_string)
            .unwrap_or_else(|| self.settings.field_names.apply(&field.name));

        let mut node = PropertyNode::leaf(name, field_type);
        if let Some(annotation) = annotation {
            node.attributes = policy::annotation_attributes(annotation);
        }
        if field_type.is_composite() {
            node.properties = Some(self.write_nested(&field.native_type, counts));
        }
        Some(node)
    }

    fn write_nested(&self, native: &NativeType, counts: &VisitCounts) -> Vec<PropertyNode> {
        let Some(type_name) = infer::element_type(native).as_struct() else {
            trace!("No structured element type in {:?}, leaving properties empty", native);
            return Vec::new();
        };

        let forked = counts.enter(type_name);
        if !forked.should_expand(type_name, self.settings.max_recursion) {
            debug!(
                "Recursion budget reached for {} (seen {:?}), leaving properties empty",
                type_name,
                forked.get(type_name)
            );
            return Vec::new();
        }

        match self.registry.get(type_name.as_str()) {
            Some(descriptor) => self.write_properties(descriptor, &forked),
            None => {
                warn!("Type {} is not registered, leaving properties empty", type_name);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestmap_core::{FieldType, PropertyAnnotation, TypeName};
    use serde_json::json;

    fn registry(types: Vec<TypeDescriptor>) -> TypeRegistry {
        TypeRegistry::from(types)
    }

    fn person() -> TypeDescriptor {
        TypeDescriptor::new("Person")
            .field(FieldDescriptor::of::<String>("name"))
            .field(FieldDescriptor::of::<i32>("age"))
    }

    fn node() -> TypeDescriptor {
        TypeDescriptor::new("Node")
            .field(FieldDescriptor::of::<i32>("value"))
            .field(FieldDescriptor::new("next", NativeType::structured("Node")))
    }

    #[test]
    fn test_flat_type() {
        let registry = registry(vec![person()]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default());
        let mapping = writer.build_mapping("Person", None).unwrap();

        assert_eq!(
            mapping.to_json(),
            json!({
                "person": {
                    "properties": {
                        "name": { "type": "string" },
                        "age": { "type": "integer" }
                    }
                }
            })
        );
    }

    #[test]
    fn test_self_reference_cut_at_budget() {
        let registry = registry(vec![node()]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default().with_max_recursion(1));
        let mapping = writer.build_mapping("Node", None).unwrap();

        assert_eq!(
            mapping.properties_json(),
            json!({
                "value": { "type": "integer" },
                "next": {
                    "type": "object",
                    "properties": {
                        "value": { "type": "integer" },
                        "next": { "type": "object", "properties": {} }
                    }
                }
            })
        );
    }

    #[test]
    fn test_zero_budget_stops_at_first_reentry() {
        let registry = registry(vec![node()]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default());
        let mapping = writer.build_mapping("Node", None).unwrap();
        assert!(mapping.get("next").unwrap().is_empty_container());
    }

    #[test]
    fn test_siblings_do_not_share_counts() {
        let tree = TypeDescriptor::new("Tree")
            .field(FieldDescriptor::new("left", NativeType::structured("Tree")))
            .field(FieldDescriptor::new("right", NativeType::structured("Tree")));
        let registry = registry(vec![tree]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default().with_max_recursion(1));
        let mapping = writer.build_mapping("Tree", None).unwrap();

        let left = mapping.get("left").unwrap();
        let right = mapping.get("right").unwrap();
        assert_eq!(left, right);
        assert!(mapping.get("right.left").unwrap().is_empty_container());
        assert!(mapping.get("right.right").unwrap().is_empty_container());
    }

    #[test]
    fn test_opt_out_and_unmappable_dropped_in_order() {
        let descriptor = TypeDescriptor::new("Row")
            .field(FieldDescriptor::of::<String>("a"))
            .field(FieldDescriptor::of::<i32>("secret").annotated(FieldAnnotation::opt_out()))
            .field(FieldDescriptor::of::<u16>("port"))
            .field(FieldDescriptor::of::<bool>("b"));
        let registry = registry(vec![descriptor]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default());
        let mapping = writer.build_mapping("Row", None).unwrap();
        assert_eq!(mapping.field_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_annotation_name_and_attributes() {
        let descriptor = TypeDescriptor::new("Doc").field(
            FieldDescriptor::of::<String>("Code").annotated(
                PropertyAnnotation::new()
                    .named("doc_code")
                    .not_analyzed()
                    .store(true),
            ),
        );
        let registry = registry(vec![descriptor]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default());
        let mapping = writer.build_mapping("Doc", Some("docs")).unwrap();

        assert_eq!(
            mapping.to_json(),
            json!({
                "docs": {
                    "properties": {
                        "doc_code": { "type": "string", "index": "not_analyzed", "store": true }
                    }
                }
            })
        );
    }

    #[test]
    fn test_nested_annotation_recurses() {
        let order = TypeDescriptor::new("Order").field(
            FieldDescriptor::new("lines", NativeType::generic("Vec", vec![NativeType::structured("Line")]))
                .annotated(FieldAnnotation::property(FieldType::Nested)),
        );
        let line = TypeDescriptor::new("Line").field(FieldDescriptor::of::<f64>("price"));
        let registry = registry(vec![order, line]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default());
        let mapping = writer.build_mapping("Order", None).unwrap();

        let lines = mapping.get("lines").unwrap();
        assert_eq!(lines.field_type, FieldType::Nested);
        assert_eq!(mapping.get("lines.price").unwrap().field_type, FieldType::Double);
    }

    #[test]
    fn test_unregistered_nested_type_is_empty() {
        let descriptor = TypeDescriptor::new("Holder")
            .field(FieldDescriptor::new("ghost", NativeType::structured("Ghost")))
            .field(FieldDescriptor::new("blob", NativeType::Dynamic));
        let registry = registry(vec![descriptor]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default());
        let mapping = writer.build_mapping("Holder", None).unwrap();

        assert!(mapping.get("ghost").unwrap().is_empty_container());
        assert!(mapping.get("blob").unwrap().is_empty_container());
    }

    #[test]
    fn test_invalid_roots() {
        let registry = registry(vec![person()]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default());

        assert!(matches!(writer.build_mapping("", None), Err(Error::InvalidArgument(_))));
        assert!(matches!(writer.build_mapping("Nobody", None), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            writer.build_mapping_from_native(&NativeType::Int32, None),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            writer.build_mapping("Person", Some("  ")),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_root_from_wrapped_native() {
        let registry = registry(vec![person()]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default());
        let native = NativeType::optional(NativeType::structured(TypeName::from("Person")));
        let mapping = writer.build_mapping_from_native(&native, None).unwrap();
        assert_eq!(mapping.name, "person");
    }

    #[test]
    fn test_type_without_fields_is_still_a_container() {
        let registry = registry(vec![TypeDescriptor::new("Empty")]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default());
        let mapping = writer.build_mapping("Empty", None).unwrap();
        assert_eq!(mapping.to_json(), json!({ "empty": { "properties": {} } }));
    }

    #[test]
    fn test_colliding_output_names_keep_first() {
        let descriptor = TypeDescriptor::new("Clash")
            .field(FieldDescriptor::of::<String>("Name"))
            .field(FieldDescriptor::of::<i32>("name"))
            .field(FieldDescriptor::of::<bool>("active"))
            .field(FieldDescriptor::of::<i64>("other").annotated(PropertyAnnotation::new().named("active")));
        let registry = registry(vec![descriptor]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default());
        let mapping = writer.build_mapping("Clash", None).unwrap();

        assert_eq!(mapping.field_names(), vec!["name", "active"]);
        assert_eq!(
            mapping.properties_json(),
            json!({
                "name": { "type": "string" },
                "active": { "type": "boolean" }
            })
        );
    }

    #[test]
    fn test_annotation_extra_does_not_replace_type() {
        let descriptor = TypeDescriptor::new("Birth").field(
            FieldDescriptor::of::<String>("born").annotated(
                PropertyAnnotation::new()
                    .with_type(FieldType::Date)
                    .attribute("type", "keyword")
                    .format("yyyy-MM-dd"),
            ),
        );
        let registry = registry(vec![descriptor]);
        let writer = TypeMappingWriter::new(&registry, MappingSettings::default());
        let mapping = writer.build_mapping("Birth", None).unwrap();

        assert_eq!(mapping.get("born").unwrap().field_type, FieldType::Date);
        assert_eq!(
            mapping.properties_json(),
            json!({ "born": { "type": "date", "format": "yyyy-MM-dd" } })
        );
    }

    #[test]
    fn test_settings_from_json_defaults() {
        let settings: MappingSettings = serde_json::from_value(json!({ "max_recursion": 2 })).unwrap();
        assert_eq!(settings, MappingSettings::default().with_max_recursion(2));
    }
}
