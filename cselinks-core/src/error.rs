use cselinks_scanner::ScanError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    MissingDocument(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
