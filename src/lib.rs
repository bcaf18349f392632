//! # nestmap
//!
//! Derive Elasticsearch-style type mappings from structured types.
//!
//! nestmap walks a type's fields, infers each field's storage type from its
//! native type, lets per-field annotations override the inferred type, and
//! expands nested structured fields into sub-mappings. Self-referential and
//! mutually-referential types are bounded by a recursion budget instead of
//! looping forever.
//!
//! ## Quick Start
//!
//! ### As a Library
//!
//! ```rust
//! use nestmap::prelude::*;
//!
//! struct Person;
//!
//! impl Describe for Person {
//!     fn type_name() -> TypeName {
//!         TypeName::from("Person")
//!     }
//!
//!     fn fields() -> Vec<FieldDescriptor> {
//!         vec![
//!             FieldDescriptor::of::<String>("name"),
//!             FieldDescriptor::of::<i32>("age"),
//!             FieldDescriptor::of::<String>("born")
//!                 .annotated(FieldAnnotation::property(FieldType::Date)),
//!         ]
//!     }
//! }
//!
//! let mapping = mapping_for::<Person>(MappingSettings::default()).unwrap();
//! assert_eq!(mapping.name, "person");
//! assert_eq!(mapping.get("born").unwrap().field_type, FieldType::Date);
//! ```
//!
//! ### As a CLI
//!
//! ```bash
//! nestmap --types types.json --type Person --max-recursion 1
//! ```
//!
//! ## Crate Structure
//!
//! - [`nestmap-core`](https://docs.rs/nestmap-core) - Data model (field types, native types, annotations, registry)
//! - [`nestmap-mapping`](https://docs.rs/nestmap-mapping) - Mapping engine (inference, overrides, recursion guard, writer)
//! - [`nestmap-client`](https://docs.rs/nestmap-client) - Document store seam and in-memory store

// Re-export core types
pub use nestmap_core::{
    Describe, Error, FieldAnnotation, FieldDescriptor, FieldType, GeoPointAnnotation, IndexMode,
    NameStrategy, NativeType, NativeTyped, PropertyAnnotation, Result, TypeDescriptor, TypeName,
    TypeRegistry,
};

// Re-export mapping engine
pub use nestmap_mapping::{
    mapping_for, MappingSettings, ObjectKind, ObjectMapping, PropertyNode, TypeMapping,
    TypeMappingWriter, VisitCounts,
};

// Re-export client
pub use nestmap_client::{
    CountFilter, Document, DocumentStore, DocumentStoreExt, InMemoryStore, MultiGetHit,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        mapping_for, Describe, DocumentStore, DocumentStoreExt, FieldAnnotation, FieldDescriptor,
        FieldType, MappingSettings, NameStrategy, NativeType, NativeTyped, PropertyAnnotation,
        TypeDescriptor, TypeMapping, TypeMappingWriter, TypeName, TypeRegistry,
    };
}

/// Building blocks of the mapping engine
pub mod engine {
    pub use nestmap_mapping::infer::{element_type, infer};
    pub use nestmap_mapping::policy::{annotation_attributes, is_opted_out, resolve};
}
