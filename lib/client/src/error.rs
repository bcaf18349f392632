use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    #[error("Index already exists: {0}")]
    IndexExists(String),

    #[error("Index is closed: {0}")]
    IndexClosed(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Mapping error: {0}")]
    Mapping(#[from] nestmap_core::Error),
}
