//! # nestmap Mapping
//!
//! Derives Elasticsearch-style type mappings from type descriptors.
//!
//! ## Overview
//!
//! For every field of a type, in declaration order:
//! 1. Fields annotated as opted out are skipped
//! 2. The field type is resolved: an explicit annotation type wins, otherwise
//!    it is inferred from the native type ([`infer`])
//! 3. Fields with no usable type are dropped
//! 4. `object` and `nested` fields recurse into their element type, guarded by
//!    per-path visit counts ([`VisitCounts`]) so cyclic type graphs terminate
//!
//! ## Example
//!
//! ```rust
//! use nestmap_core::{FieldDescriptor, NativeType, TypeDescriptor, TypeRegistry};
//! use nestmap_mapping::{MappingSettings, TypeMappingWriter};
//!
//! let registry = TypeRegistry::from(vec![
//!     TypeDescriptor::new("Node")
//!         .field(FieldDescriptor::of::<i32>("value"))
//!         .field(FieldDescriptor::new("next", NativeType::structured("Node"))),
//! ]);
//!
//! let writer = TypeMappingWriter::new(&registry, MappingSettings::default().with_max_recursion(1));
//! let mapping = writer.build_mapping("Node", None).unwrap();
//! assert!(mapping.get("next.next").unwrap().is_empty_container());
//! ```
//!
//! ## Output
//!
//! ```text
//! { "node": { "properties": {
//!     "value": { "type": "integer" },
//!     "next":  { "type": "object", "properties": {
//!         "value": { "type": "integer" },
//!         "next":  { "type": "object", "properties": {} } } } } } }
//! ```

pub mod guard;
pub mod infer;
pub mod policy;
pub mod tree;
pub mod writer;

pub use guard::VisitCounts;
pub use policy::Attributes;
pub use tree::{ObjectKind, ObjectMapping, PropertyNode, TypeMapping};
pub use writer::{MappingSettings, TypeMappingWriter};

use nestmap_core::{Describe, Result, TypeRegistry};

/// Build the mapping of `T` with a fresh registry holding `T` and its dependencies
pub fn mapping_for<T: Describe>(settings: MappingSettings) -> Result<TypeMapping> {
    let mut registry = TypeRegistry::new();
    let name = registry.register::<T>();
    TypeMappingWriter::new(&registry, settings).build_mapping(name.as_str(), None)
}
