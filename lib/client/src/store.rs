//! Document store seam
//!
//! [`DocumentStore`] is the narrow set of operations the mapping engine's
//! callers need from a document store. [`DocumentStoreExt`] layers the
//! convenience forms on top of any implementation.

use crate::document::{CountFilter, Document, MultiGetHit};
use crate::error::Result;
use nestmap_core::{Describe, NameStrategy};
use nestmap_mapping::{mapping_for, MappingSettings, TypeMapping};
use serde_json::Value;

/// Operations keyed by (index, type, id).
///
/// For `get` and `multi_get`, `index: None` addresses the store's default
/// index and `doc_type: None` matches any type. For `count`, `None` means all
/// indices and all types.
pub trait DocumentStore {
    fn get(&self, index: Option<&str>, doc_type: Option<&str>, id: &str) -> Result<Option<Document>>;

    /// One hit per requested id, in request order
    fn multi_get(&self, index: Option<&str>, doc_type: Option<&str>, ids: &[&str]) -> Result<Vec<MultiGetHit>>;

    fn count(&self, index: Option<&str>, doc_type: Option<&str>, filter: Option<&CountFilter>) -> Result<usize>;

    fn open_index(&self, index: &str) -> Result<()>;

    fn close_index(&self, index: &str) -> Result<()>;

    /// Declare a type mapping on an index
    fn put_mapping(&self, index: &str, mapping: &TypeMapping) -> Result<()>;
}

/// Index name inferred for a type: the pluralized, lower-cased type name
pub fn index_name_for<T: Describe>() -> String {
    NameStrategy::Pluralize.apply(T::type_name().as_str())
}

pub trait DocumentStoreExt: DocumentStore {
    /// Source of a single document
    fn source(&self, index: Option<&str>, doc_type: Option<&str>, id: &str) -> Result<Option<Value>> {
        Ok(self.get(index, doc_type, id)?.map(|doc| doc.source))
    }

    /// Sources of the documents that were found, in request order
    fn source_many(&self, index: Option<&str>, doc_type: Option<&str>, ids: &[&str]) -> Result<Vec<Value>> {
        Ok(self
            .multi_get(index, doc_type, ids)?
            .into_iter()
            .filter_map(|hit| hit.source)
            .collect())
    }

    /// Source of a single document with an integer id
    fn source_by_number(&self, index: Option<&str>, doc_type: Option<&str>, id: i64) -> Result<Option<Value>> {
        self.source(index, doc_type, &id.to_string())
    }

    /// Multi-get with integer ids
    fn get_many(&self, index: Option<&str>, doc_type: Option<&str>, ids: &[i64]) -> Result<Vec<MultiGetHit>> {
        let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        let refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        self.multi_get(index, doc_type, &refs)
    }

    /// Count over all indices and types
    fn count_all(&self) -> Result<usize> {
        self.count(None, None, None)
    }

    fn open_index_for<T: Describe>(&self) -> Result<()> {
        self.open_index(&index_name_for::<T>())
    }

    fn close_index_for<T: Describe>(&self) -> Result<()> {
        self.close_index(&index_name_for::<T>())
    }

    /// Derive `T`'s mapping and declare it on `index`
    fn put_mapping_for<T: Describe>(&self, index: &str, settings: MappingSettings) -> Result<TypeMapping> {
        let mapping = mapping_for::<T>(settings)?;
        self.put_mapping(index, &mapping)?;
        Ok(mapping)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}
