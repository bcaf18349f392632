//! # nestmap Client
//!
//! The document-store side of nestmap: a [`DocumentStore`] trait keyed by
//! (index, type, id), convenience helpers in [`DocumentStoreExt`], and an
//! [`InMemoryStore`] implementation. Wire transport is left to
//! implementors of the trait.

pub mod document;
pub mod error;
pub mod memory;
pub mod store;

pub use document::{CountFilter, Document, MultiGetHit};
pub use error::{Error, Result};
pub use memory::InMemoryStore;
pub use store::{index_name_for, DocumentStore, DocumentStoreExt};
