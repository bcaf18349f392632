use crate::document::{CountFilter, Document, MultiGetHit};
use crate::error::{Error, Result};
use crate::store::DocumentStore;
use ahash::AHashMap;
use nestmap_mapping::TypeMapping;
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct IndexState {
    open: bool,
    /// keyed by (type, id)
    documents: AHashMap<(String, String), Document>,
    mappings: AHashMap<String, Value>,
}

impl IndexState {
    fn new() -> Self {
        Self {
            open: true,
            ..Default::default()
        }
    }

    fn find(&self, doc_type: Option<&str>, id: &str) -> Option<&Document> {
        match doc_type {
            Some(doc_type) => self.documents.get(&(doc_type.to_string(), id.to_string())),
            None => self
                .documents
                .values()
                .filter(|doc| doc.id == id)
                .min_by(|a, b| a.doc_type.cmp(&b.doc_type)),
        }
    }
}

/// Document store held in memory
pub struct InMemoryStore {
    default_index: String,
    indices: Arc<RwLock<AHashMap<String, IndexState>>>,
}

impl InMemoryStore {
    pub fn new(default_index: impl Into<String>) -> Self {
        Self {
            default_index: default_index.into(),
            indices: Arc::new(RwLock::new(AHashMap::new())),
        }
    }

    pub fn default_index(&self) -> &str {
        &self.default_index
    }

    pub fn create_index(&self, index: &str) -> Result<()> {
        let mut indices = self.indices.write();
        if indices.contains_key(index) {
            return Err(Error::IndexExists(index.to_string()));
        }
        indices.insert(index.to_string(), IndexState::new());
        debug!("Created index {}", index);
        Ok(())
    }

    /// Insert or replace a document, creating its index if needed
    pub fn index(&self, document: Document) -> Result<()> {
        if document.id.is_empty() {
            return Err(Error::InvalidDocument("document id must not be empty".to_string()));
        }
        let mut indices = self.indices.write();
        let state = indices
            .entry(document.index.clone())
            .or_insert_with(IndexState::new);
        if !state.open {
            return Err(Error::IndexClosed(document.index));
        }
        state
            .documents
            .insert((document.doc_type.clone(), document.id.clone()), document);
        Ok(())
    }

    /// Mapping declared for a type, as `{ "<type>": { "properties": ... } }`
    pub fn mapping(&self, index: &str, doc_type: &str) -> Option<Value> {
        self.indices
            .read()
            .get(index)
            .and_then(|state| state.mappings.get(doc_type).cloned())
    }

    pub fn is_open(&self, index: &str) -> Option<bool> {
        self.indices.read().get(index).map(|state| state.open)
    }

    fn resolve_index<'a>(&'a self, index: Option<&'a str>) -> &'a str {
        index.unwrap_or(&self.default_index)
    }

    fn set_open(&self, index: &str, open: bool) -> Result<()> {
        let mut indices = self.indices.write();
        let state = indices
            .get_mut(index)
            .ok_or_else(|| Error::IndexNotFound(index.to_string()))?;
        state.open = open;
        debug!("Index {} is now {}", index, if open { "open" } else { "closed" });
        Ok(())
    }
}

fn readable<'a>(
    indices: &'a AHashMap<String, IndexState>,
    index: &str,
) -> Result<&'a IndexState> {
    let state = indices
        .get(index)
        .ok_or_else(|| Error::IndexNotFound(index.to_string()))?;
    if !state.open {
        return Err(Error::IndexClosed(index.to_string()));
    }
    Ok(state)
}

impl DocumentStore for InMemoryStore {
    fn get(&self, index: Option<&str>, doc_type: Option<&str>, id: &str) -> Result<Option<Document>> {
        let index = self.resolve_index(index);
        let indices = self.indices.read();
        let state = readable(&indices, index)?;
        Ok(state.find(doc_type, id).cloned())
    }

    fn multi_get(&self, index: Option<&str>, doc_type: Option<&str>, ids: &[&str]) -> Result<Vec<MultiGetHit>> {
        let index = self.resolve_index(index);
        let indices = self.indices.read();
        let state = readable(&indices, index)?;
        Ok(ids
            .iter()
            .map(|id| match state.find(doc_type, id) {
                Some(doc) => MultiGetHit::found(doc.clone()),
                None => MultiGetHit::missing(index, doc_type, *id),
            })
            .collect())
    }

    fn count(&self, index: Option<&str>, doc_type: Option<&str>, filter: Option<&CountFilter>) -> Result<usize> {
        let indices = self.indices.read();
        let states: Vec<&IndexState> = match index {
            Some(index) => vec![readable(&indices, index)?],
            None => indices.values().filter(|state| state.open).collect(),
        };

        Ok(states
            .iter()
            .flat_map(|state| state.documents.values())
            .filter(|doc| doc_type.map_or(true, |t| doc.doc_type == t))
            .filter(|doc| filter.map_or(true, |f| f.matches(&doc.source)))
            .count())
    }

    fn open_index(&self, index: &str) -> Result<()> {
        self.set_open(index, true)
    }

    fn close_index(&self, index: &str) -> Result<()> {
        self.set_open(index, false)
    }

    fn put_mapping(&self, index: &str, mapping: &TypeMapping) -> Result<()> {
        let mut indices = self.indices.write();
        let state = indices
            .entry(index.to_string())
            .or_insert_with(IndexState::new);
        if !state.open {
            return Err(Error::IndexClosed(index.to_string()));
        }
        state.mappings.insert(mapping.name.clone(), mapping.to_json());
        debug!("Put mapping {} on index {}", mapping.name, index);
        Ok(())
    }
}
