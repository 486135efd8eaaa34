use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error at {path:?}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("XML parse error in {path:?}: {message}")]
    XmlError { path: PathBuf, message: String },

    #[error("Not a directory: {0:?}")]
    NotADirectory(PathBuf),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
