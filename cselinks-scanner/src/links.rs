use crate::document::CourseDocument;
use crate::error::Result;
use crate::matcher;
use crate::result::{LinkRecord, PageLinks};
use crate::text::flatten;
use roxmltree::Node;
use std::collections::HashMap;
use tracing::debug;
use url::{ParseError, Url};

/// Accumulates unique links across a set of documents.
///
/// Records iterate in first-seen order. The index is owned by the caller and
/// threaded through each [`LinkIndex::collect`] call.
#[derive(Debug, Clone, Default)]
pub struct LinkIndex {
    records: Vec<LinkRecord>,
    positions: HashMap<String, usize>,
}

impl LinkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one anchor occurrence for `url`.
    pub fn add(&mut self, url: &str, description: String) {
        match self.positions.get(url) {
            Some(&idx) => self.records[idx].push_description(description),
            None => {
                self.positions.insert(url.to_string(), self.records.len());
                self.records
                    .push(LinkRecord::new(url.to_string(), description));
            }
        }
    }

    /// Scan every `a[@href]` under `root` into the index.
    pub fn collect_from(mut self, name: &str, root: Node<'_, '_>) -> (Self, PageLinks) {
        let before = self.records.len();
        let mut anchors_found = 0;

        for anchor in matcher::anchors(root) {
            if let Some(href) = anchor.attribute("href") {
                debug!("{}: found link {}", name, href);
                self.add(href, flatten(anchor));
                anchors_found += 1;
            }
        }

        let page = PageLinks {
            name: name.to_string(),
            anchors_found,
            new_urls: self.records.len() - before,
        };
        (self, page)
    }

    /// Parse `document` and scan it into the index.
    pub fn collect(self, document: &CourseDocument) -> Result<(Self, PageLinks)> {
        let parsed = document.parse()?;
        Ok(self.collect_from(&document.name, parsed.root_element()))
    }

    pub fn get(&self, url: &str) -> Option<&LinkRecord> {
        self.positions.get(url).map(|&idx| &self.records[idx])
    }

    pub fn records(&self) -> &[LinkRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &LinkRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total anchors seen, duplicates included.
    pub fn total_occurrences(&self) -> usize {
        self.records.iter().map(|r| r.count).sum()
    }
}

impl<'a> IntoIterator for &'a LinkIndex {
    type Item = &'a LinkRecord;
    type IntoIter = std::slice::Iter<'a, LinkRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Network location of `url`: host, plus `:port` when one is given.
///
/// Scheme-relative hrefs (`//host/path`) are resolved against `http:`.
/// Hrefs that still do not parse, such as ones with a malformed port, fall
/// back to the raw authority between `//` and the next `/`, `?` or `#`.
/// Hrefs without an authority yield an empty string.
pub fn netloc(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Err(ParseError::RelativeUrlWithoutBase) if url.starts_with("//") => {
            Url::parse(&format!("http:{}", url))
        }
        other => other,
    };

    match parsed {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or("");
            match parsed.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            }
        }
        Err(_) => raw_authority(url).to_string(),
    }
}

fn raw_authority(url: &str) -> &str {
    let rest = match url.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => rest,
        _ => url,
    };
    match rest.strip_prefix("//") {
        Some(rest) => rest
            .split(|c| matches!(c, '/' | '?' | '#'))
            .next()
            .unwrap_or(""),
        None => "",
    }
}

fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// True when the URL's network location contains `excluded_domain`.
pub fn is_excluded(url: &str, excluded_domain: &str) -> bool {
    netloc(url).contains(excluded_domain)
}
