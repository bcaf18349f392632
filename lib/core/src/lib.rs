//! # nestmap Core
//!
//! Data model shared by the nestmap crates.
//!
//! - [`FieldType`] - Canonical storage type of a mapped field
//! - [`NativeType`] - Declared type shape of a field (scalars, wrappers, struct references)
//! - [`FieldAnnotation`] - Explicit per-field overrides
//! - [`TypeDescriptor`] / [`FieldDescriptor`] - Reflection of a structured type
//! - [`TypeRegistry`] - Name-keyed table resolving struct references, cycles included
//! - [`NameStrategy`] - Field and mapping naming conventions
//!
//! ## Example
//!
//! ```rust
//! use nestmap_core::{FieldAnnotation, FieldDescriptor, FieldType, NativeType, TypeDescriptor, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry.insert(
//!     TypeDescriptor::new("Node")
//!         .field(FieldDescriptor::of::<i32>("value"))
//!         .field(FieldDescriptor::new("next", NativeType::structured("Node")))
//!         .field(FieldDescriptor::of::<String>("created").annotated(FieldAnnotation::property(FieldType::Date))),
//! );
//! assert!(registry.contains("Node"));
//! ```

pub mod annotation;
pub mod descriptor;
pub mod error;
pub mod field_type;
pub mod naming;
pub mod native;

pub use annotation::{FieldAnnotation, GeoPointAnnotation, IndexMode, PropertyAnnotation};
pub use descriptor::{Describe, FieldDescriptor, TypeDescriptor, TypeName, TypeRegistry};
pub use error::{Error, Result};
pub use field_type::FieldType;
pub use naming::NameStrategy;
pub use native::{NativeType, NativeTyped};
