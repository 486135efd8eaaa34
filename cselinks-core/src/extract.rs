use crate::annotations::{Annotation, CSE_LABEL, annotations_to_xml, build_annotations};
use crate::domains::{DomainRecord, aggregate_domains};
use crate::error::{CoreError, Result};
use crate::outline::{OutlineNode, build_outline, outline_to_xml};
use crate::promotions::{Promotion, build_promotions, promotions_to_xml};
use crate::xml::save_xml;
use cselinks_scanner::result::PageLinks;
use cselinks_scanner::{CourseDocument, CoursePage, LinkIndex, load_documents};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Week 0 is an orientation week without the standard teaching layout.
pub const WEEK_ZERO_PAGE: &str = "t151Week0.xml";
/// Week 10 is a review week; its course title roots the outline.
pub const WEEK_TEN_PAGE: &str = "t151Week10.xml";

pub const DEFAULT_DATA_DIR: &str = "data/";
pub const DEFAULT_OUT_DIR: &str = "tmp/";

pub const ANNOTATIONS_FILE: &str = "annotations.xml";
pub const OUTLINE_FILE: &str = "course.mm";
pub const PROMOTIONS_FILE: &str = "promotions.xml";

/// Options for configuring an extraction run
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub data_dir: PathBuf,
    pub cse_label: String,
    /// Page whose course title becomes the outline root.
    pub outline_root: String,
    /// Pages left out of the outline and promotions.
    pub excluded_pages: Vec<String>,
}

impl ExtractOptions {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_pages.iter().any(|p| p == name)
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cse_label: CSE_LABEL.to_string(),
            outline_root: WEEK_TEN_PAGE.to_string(),
            excluded_pages: vec![WEEK_ZERO_PAGE.to_string(), WEEK_TEN_PAGE.to_string()],
        }
    }
}

/// Callback for reporting extraction progress
pub type ExtractProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Everything a run derives from the course documents.
#[derive(Debug, Clone)]
pub struct ExtractOutput {
    pub pages: Vec<PageLinks>,
    pub links: LinkIndex,
    pub annotations: Vec<Annotation>,
    pub domains: Vec<DomainRecord>,
    pub outline: OutlineNode,
    pub promotions: Vec<Promotion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractSummary {
    pub documents: usize,
    pub unique_links: usize,
    pub total_anchors: usize,
    pub annotations: usize,
    pub domains: usize,
    pub outline_nodes: usize,
    pub promotions: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub annotations: PathBuf,
    pub outline: PathBuf,
    pub promotions: PathBuf,
}

impl ExtractOutput {
    pub fn summary(&self) -> ExtractSummary {
        ExtractSummary {
            documents: self.pages.len(),
            unique_links: self.links.len(),
            total_anchors: self.links.total_occurrences(),
            annotations: self.annotations.len(),
            domains: self.domains.len(),
            outline_nodes: self.outline.node_count(),
            promotions: self.promotions.len(),
        }
    }

    /// Serialize the three artifacts into `out_dir`.
    pub fn write_artifacts(&self, out_dir: &Path) -> Result<ArtifactPaths> {
        let paths = ArtifactPaths {
            annotations: out_dir.join(ANNOTATIONS_FILE),
            outline: out_dir.join(OUTLINE_FILE),
            promotions: out_dir.join(PROMOTIONS_FILE),
        };

        save_xml(&annotations_to_xml(&self.annotations), &paths.annotations)?;
        save_xml(&outline_to_xml(&self.outline), &paths.outline)?;
        save_xml(&promotions_to_xml(&self.promotions), &paths.promotions)?;

        Ok(paths)
    }
}

/// Scan `documents` for links and course structure.
///
/// Each document is parsed once; a parse failure aborts the whole scan.
pub fn scan_documents(
    documents: &[CourseDocument],
    progress_callback: Option<&ExtractProgressCallback>,
) -> Result<(LinkIndex, Vec<PageLinks>, Vec<CoursePage>)> {
    let mut links = LinkIndex::new();
    let mut page_links = Vec::with_capacity(documents.len());
    let mut pages = Vec::with_capacity(documents.len());

    for (idx, document) in documents.iter().enumerate() {
        if let Some(callback) = progress_callback {
            callback(format!(
                "Scanning document {}/{}: {}",
                idx + 1,
                documents.len(),
                document.name
            ));
        }

        let parsed = document.parse()?;
        let root = parsed.root_element();

        let (next, found) = links.collect_from(&document.name, root);
        links = next;
        page_links.push(found);
        pages.push(CoursePage::from_root(&document.name, root));
    }

    Ok((links, page_links, pages))
}

/// Build all artifacts from already loaded documents.
pub fn extract_documents(
    options: &ExtractOptions,
    documents: &[CourseDocument],
    progress_callback: Option<&ExtractProgressCallback>,
) -> Result<ExtractOutput> {
    let (links, page_links, pages) = scan_documents(documents, progress_callback)?;
    info!("Collected {} unique links", links.len());

    let annotations = build_annotations(&links, &options.cse_label);
    let domains = aggregate_domains(&links);
    info!(
        "{} annotations across {} domains",
        annotations.len(),
        domains.len()
    );

    let root_page = pages
        .iter()
        .find(|p| p.name == options.outline_root)
        .ok_or_else(|| CoreError::MissingDocument(options.outline_root.clone()))?;
    let excluded: Vec<&str> = options.excluded_pages.iter().map(String::as_str).collect();
    let outline = build_outline(
        root_page,
        &pages,
        &excluded,
        chrono::Utc::now().timestamp(),
    );

    let promotions: Vec<Promotion> = pages
        .iter()
        .filter(|p| !options.is_excluded(&p.name))
        .flat_map(build_promotions)
        .collect();
    info!("Generated {} promotions", promotions.len());

    Ok(ExtractOutput {
        pages: page_links,
        links,
        annotations,
        domains,
        outline,
        promotions,
    })
}

/// Load every document in `options.data_dir` and build all artifacts.
pub fn execute_extract(
    options: &ExtractOptions,
    progress_callback: Option<ExtractProgressCallback>,
) -> Result<ExtractOutput> {
    let documents = load_documents(&options.data_dir)?;
    extract_documents(options, &documents, progress_callback.as_ref())
}
