use crate::error::{Result, ScanError};
use roxmltree::{Document, ParsingOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A structured-authoring document read from disk, not yet parsed.
///
/// The source text is kept so callers can parse it on demand;
/// `roxmltree` documents borrow from their input.
#[derive(Debug, Clone)]
pub struct CourseDocument {
    pub name: String,
    pub path: PathBuf,
    pub source: String,
}

impl CourseDocument {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: PathBuf::from(&name),
            name,
            source: source.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| ScanError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse the document. SA exports may carry a DOCTYPE, so DTDs are allowed.
    pub fn parse(&self) -> Result<Document<'_>> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        Document::parse_with_options(&self.source, options).map_err(|e| ScanError::XmlError {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// File stem, used as a fallback label when a document has no title.
    pub fn stem(&self) -> &str {
        file_stem(&self.name)
    }
}

/// `name` without its `.xml` extension.
pub fn file_stem(name: &str) -> &str {
    name.strip_suffix(".xml").unwrap_or(name)
}

/// Load every `*.xml` file in `dir`, sorted by file name.
pub fn load_documents(dir: &Path) -> Result<Vec<CourseDocument>> {
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let entries = fs::read_dir(dir).map_err(|e| ScanError::IoError {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ScanError::IoError {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if is_xml_file(&path) {
            paths.push(path);
        } else {
            debug!("Skipping non-XML entry {}", path.display());
        }
    }
    paths.sort();

    let documents = paths
        .iter()
        .map(|p| CourseDocument::read(p))
        .collect::<Result<Vec<_>>>()?;

    info!("Loaded {} documents from {}", documents.len(), dir.display());
    Ok(documents)
}

fn is_xml_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("xml"))
            .unwrap_or(false)
}
