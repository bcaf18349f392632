//! Structural type descriptions
//!
//! A [`TypeDescriptor`] is the read-only reflection of a structured type: its
//! name and its fields in declaration order. Descriptors refer to each other by
//! [`TypeName`] through a [`TypeRegistry`], which is how self-referential and
//! mutually-referential types are represented without cyclic ownership.

use crate::annotation::FieldAnnotation;
use crate::error::{Error, Result};
use crate::native::{NativeType, NativeTyped};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::path::Path;

/// Identity of a structured type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for TypeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A single field of a structured type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub native_type: NativeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<FieldAnnotation>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, native_type: NativeType) -> Self {
        Self {
            name: name.into(),
            native_type,
            annotation: None,
        }
    }

    /// Field whose native type comes from a Rust type
    pub fn of<T: NativeTyped + ?Sized>(name: impl Into<String>) -> Self {
        Self::new(name, T::native_type())
    }

    pub fn annotated(mut self, annotation: impl Into<FieldAnnotation>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeDescriptor {
    pub name: TypeName,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn of<T: Describe>() -> Self {
        Self {
            name: T::type_name(),
            fields: T::fields(),
        }
    }
}

/// Compile-time description of a structured type.
///
/// `register_dependencies` registers every structured type reachable from the
/// fields. [`TypeRegistry::register`] inserts the type itself first, so
/// implementations may register types that point back at `Self`.
pub trait Describe {
    fn type_name() -> TypeName;

    fn fields() -> Vec<FieldDescriptor>;

    fn register_dependencies(_registry: &mut TypeRegistry) {}
}

/// Table of structured types, keyed by name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<TypeDescriptor>", into = "Vec<TypeDescriptor>")]
pub struct TypeRegistry {
    types: AHashMap<TypeName, TypeDescriptor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a JSON array of type descriptors
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Insert or replace a descriptor
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        self.types.insert(descriptor.name.clone(), descriptor)
    }

    /// Register `T` and, transitively, the types it depends on.
    /// Already registered types are left untouched.
    pub fn register<T: Describe>(&mut self) -> TypeName {
        let name = T::type_name();
        if !self.types.contains_key(&name) {
            self.types.insert(name.clone(), TypeDescriptor::of::<T>());
            T::register_dependencies(self);
        }
        name
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Like [`get`](Self::get), failing with [`Error::UnknownType`]
    pub fn resolve(&self, name: &str) -> Result<&TypeDescriptor> {
        self.get(name)
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Type names in a deterministic order (sorted)
    pub fn sorted_names(&self) -> Vec<&TypeName> {
        let mut names: Vec<_> = self.types.keys().collect();
        names.sort();
        names
    }
}

impl From<Vec<TypeDescriptor>> for TypeRegistry {
    fn from(descriptors: Vec<TypeDescriptor>) -> Self {
        let mut registry = TypeRegistry::new();
        for descriptor in descriptors {
            registry.insert(descriptor);
        }
        registry
    }
}

impl From<TypeRegistry> for Vec<TypeDescriptor> {
    fn from(registry: TypeRegistry) -> Self {
        let mut descriptors: Vec<_> = registry.types.into_values().collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }
}
