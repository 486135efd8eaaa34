// Link and domain report for a course scan

use crate::annotations::EXCLUDED_DOMAIN;
use crate::domains::{DomainRecord, aggregate_domains};
use crate::extract::{ExtractOutput, ExtractSummary};
use cselinks_scanner::LinkRecord;
use cselinks_scanner::links::{is_excluded, netloc};
use cselinks_scanner::result::PageLinks;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub summary: ExtractSummary,
    pub pages: Vec<PageLinks>,
    pub domains: Vec<DomainRecord>,
    pub external_links: Vec<LinkRecord>,
    pub internal_links: Vec<LinkRecord>,
}

impl ReportData {
    pub fn from_output(output: &ExtractOutput) -> Self {
        let (internal_links, external_links): (Vec<LinkRecord>, Vec<LinkRecord>) = output
            .links
            .iter()
            .cloned()
            .partition(|r| is_excluded(&r.url, EXCLUDED_DOMAIN));

        Self {
            summary: output.summary(),
            pages: output.pages.clone(),
            domains: aggregate_domains(&output.links),
            external_links,
            internal_links,
        }
    }

    /// External links belonging to `domain`, in index order.
    pub fn links_for_domain(&self, domain: &str) -> Vec<&LinkRecord> {
        self.external_links
            .iter()
            .filter(|r| netloc(&r.url) == domain)
            .collect()
    }
}

pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();

    report.push_str(RULE);
    report.push_str("                         COURSE LINK REPORT\n");
    report.push_str(RULE);
    report.push('\n');

    let s = &data.summary;
    report.push_str(&format!("Documents:        {}\n", s.documents));
    report.push_str(&format!("Anchors:          {}\n", s.total_anchors));
    report.push_str(&format!("Unique links:     {}\n", s.unique_links));
    report.push_str(&format!("External links:   {}\n", data.external_links.len()));
    report.push_str(&format!(
        "Internal links:   {} ({})\n",
        data.internal_links.len(),
        EXCLUDED_DOMAIN
    ));
    report.push_str(&format!("Domains:          {}\n", data.domains.len()));
    report.push_str(&format!("Outline nodes:    {}\n", s.outline_nodes));
    report.push_str(&format!("Promotions:       {}\n", s.promotions));
    report.push('\n');

    report.push_str(RULE);
    report.push_str("DOCUMENTS\n");
    report.push_str(RULE);
    report.push('\n');
    for page in &data.pages {
        report.push_str(&format!(
            "  {:<24} {:>4} anchors  {:>4} new links\n",
            page.name, page.anchors_found, page.new_urls
        ));
    }
    report.push('\n');

    report.push_str(RULE);
    report.push_str("DOMAINS\n");
    report.push_str(RULE);
    report.push('\n');

    if data.domains.is_empty() {
        report.push_str("  (none)\n\n");
    }

    for domain in &data.domains {
        let host = if domain.domain.is_empty() {
            "(relative)"
        } else {
            domain.domain.as_str()
        };
        report.push_str(&format!("## {}\n", host));
        report.push_str(&format!(
            "  {} links  include: {}\n\n",
            domain.count, domain.cse_include
        ));

        for link in data.links_for_domain(&domain.domain) {
            let label = link
                .descriptions
                .iter()
                .find(|d| !d.trim().is_empty())
                .map(|d| d.trim())
                .unwrap_or("-");
            report.push_str(&format!("  [{}x] {}  {}\n", link.count, link.url, label));
        }
        report.push('\n');
    }

    report
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "cselinks",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json",
                "excluded_domain": EXCLUDED_DOMAIN
            },
            "summary": data.summary,
            "documents": data.pages,
            "domains": data.domains,
            "links": {
                "external": data.external_links,
                "internal": data.internal_links
            }
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_report(data: &ReportData, format: &ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(data)),
        ReportFormat::Json => generate_json_report(data),
    }
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
