use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored document addressed by (index, type, id)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub index: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub id: String,
    pub source: Value,
}

impl Document {
    pub fn new(
        index: impl Into<String>,
        doc_type: impl Into<String>,
        id: impl Into<String>,
        source: Value,
    ) -> Self {
        Self {
            index: index.into(),
            doc_type: doc_type.into(),
            id: id.into(),
            source,
        }
    }
}

/// One entry of a multi-get response, in request order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MultiGetHit {
    pub index: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    pub id: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

impl MultiGetHit {
    pub fn found(document: Document) -> Self {
        Self {
            index: document.index,
            doc_type: Some(document.doc_type),
            id: document.id,
            found: true,
            source: Some(document.source),
        }
    }

    pub fn missing(index: impl Into<String>, doc_type: Option<&str>, id: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            doc_type: doc_type.map(str::to_string),
            id: id.into(),
            found: false,
            source: None,
        }
    }
}

/// Term filter for counts: the value at `field` (dotted path) equals `value`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountFilter {
    pub field: String,
    pub value: Value,
}

impl CountFilter {
    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, source: &Value) -> bool {
        self.field
            .split('.')
            .try_fold(source, |current, segment| current.get(segment))
            .map(|found| found == &self.value)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_term_filter_dotted_path() {
        let source = json!({ "address": { "city": "Paris" }, "age": 42 });
        assert!(CountFilter::term("address.city", "Paris").matches(&source));
        assert!(CountFilter::term("age", 42).matches(&source));
        assert!(!CountFilter::term("address.zip", "75001").matches(&source));
        assert!(!CountFilter::term("age", "42").matches(&source));
    }

    #[test]
    fn test_hit_constructors() {
        let hit = MultiGetHit::found(Document::new("people", "person", "1", json!({})));
        assert!(hit.found);
        assert_eq!(hit.doc_type.as_deref(), Some("person"));

        let miss = MultiGetHit::missing("people", None, "2");
        assert!(!miss.found);
        assert!(miss.source.is_none());
    }
}
