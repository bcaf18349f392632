//! Mapping output tree
//!
//! The writer produces a [`TypeMapping`]: a named root holding an ordered list
//! of [`PropertyNode`]s. Serialization keeps declaration order.

use crate::policy::Attributes;
use nestmap_core::{FieldType, Result};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One mapped field
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    /// Output name
    pub name: String,
    pub field_type: FieldType,
    /// Attributes written after `type`
    pub attributes: Attributes,
    /// Nested properties, present for `object` and `nested` fields.
    /// Empty when expansion was cut by the recursion budget.
    pub properties: Option<Vec<PropertyNode>>,
}

impl PropertyNode {
    pub fn leaf(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            attributes: Attributes::new(),
            properties: None,
        }
    }

    /// Attribute value by key
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Child property by output name
    pub fn child(&self, name: &str) -> Option<&PropertyNode> {
        self.properties
            .as_deref()
            .and_then(|children| children.iter().find(|c| c.name == name))
    }

    /// Whether this composite field was truncated (or its type has no fields)
    pub fn is_empty_container(&self) -> bool {
        matches!(&self.properties, Some(children) if children.is_empty())
    }

    /// Number of property levels at and below this node
    pub fn depth(&self) -> usize {
        1 + self
            .properties
            .as_deref()
            .map(max_depth)
            .unwrap_or(0)
    }

    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert("type".to_string(), Value::from(self.field_type.to_string()));
        for (key, value) in &self.attributes {
            body.insert(key.clone(), value.clone());
        }
        if let Some(children) = &self.properties {
            body.insert("properties".to_string(), properties_value(children));
        }
        Value::Object(body)
    }
}

/// A complete mapping for one type
#[derive(Debug, Clone, PartialEq)]
pub struct TypeMapping {
    pub name: String,
    pub properties: Vec<PropertyNode>,
}

impl TypeMapping {
    pub fn new(name: impl Into<String>, properties: Vec<PropertyNode>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// Look up a property by dotted path, e.g. `"address.city"`
    pub fn get(&self, path: &str) -> Option<&PropertyNode> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut node = self.properties.iter().find(|p| p.name == first)?;
        for segment in segments {
            node = node.child(segment)?;
        }
        Some(node)
    }

    /// Top-level output names in order
    pub fn field_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    /// Deepest property nesting, 0 for a mapping without fields
    pub fn depth(&self) -> usize {
        max_depth(&self.properties)
    }

    /// `{ "<name>": { "properties": { ... } } }`
    pub fn to_json(&self) -> Value {
        let mut inner = Map::new();
        inner.insert("properties".to_string(), self.properties_json());
        let mut outer = Map::new();
        outer.insert(self.name.clone(), Value::Object(inner));
        Value::Object(outer)
    }

    /// The inner `properties` object only
    pub fn properties_json(&self) -> Value {
        properties_value(&self.properties)
    }

    pub fn to_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }

    /// Re-shape as a root, object or nested object mapping
    pub fn to_object_mapping(&self, kind: ObjectKind) -> ObjectMapping {
        ObjectMapping {
            kind,
            properties: self.properties.clone(),
        }
    }
}

impl Serialize for TypeMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl Serialize for PropertyNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// How a mapped type is embedded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Top-level mapping of an index type
    Root,
    /// Inline sub-document
    Object,
    /// Sub-document indexed as separate hidden documents
    Nested,
}

/// A mapping without its name, typed by how it is embedded
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMapping {
    pub kind: ObjectKind,
    pub properties: Vec<PropertyNode>,
}

impl ObjectMapping {
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        match self.kind {
            ObjectKind::Root => {}
            ObjectKind::Object => {
                body.insert("type".to_string(), Value::from("object"));
            }
            ObjectKind::Nested => {
                body.insert("type".to_string(), Value::from("nested"));
            }
        }
        body.insert("properties".to_string(), properties_value(&self.properties));
        Value::Object(body)
    }
}

impl Serialize for ObjectMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn properties_value(nodes: &[PropertyNode]) -> Value {
    let map: Map<String, Value> = nodes
        .iter()
        .map(|node| (node.name.clone(), node.to_json()))
        .collect();
    Value::Object(map)
}

fn max_depth(nodes: &[PropertyNode]) -> usize {
    nodes.iter().map(PropertyNode::depth).max().unwrap_or(0)
}
