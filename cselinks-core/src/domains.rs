use crate::annotations::EXCLUDED_DOMAIN;
use cselinks_scanner::LinkIndex;
use cselinks_scanner::links::{is_excluded, netloc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A host referenced by one or more external links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub domain: String,
    pub cse_include: String,
    pub count: usize,
}

impl DomainRecord {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            cse_include: format!("http://{}/*", domain),
            count: 1,
        }
    }
}

/// Per-host aggregation of external links, in first-seen host order.
///
/// Each unique URL counts once, however often it was referenced.
pub fn aggregate_domains(links: &LinkIndex) -> Vec<DomainRecord> {
    aggregate_into(links, Vec::new())
}

/// Like [`aggregate_domains`], but continues from an existing list of records.
pub fn aggregate_into(links: &LinkIndex, mut domains: Vec<DomainRecord>) -> Vec<DomainRecord> {
    let mut positions: HashMap<String, usize> = domains
        .iter()
        .enumerate()
        .map(|(idx, d)| (d.domain.clone(), idx))
        .collect();

    for record in links {
        if is_excluded(&record.url, EXCLUDED_DOMAIN) {
            continue;
        }
        let host = netloc(&record.url);
        match positions.get(&host) {
            Some(&idx) => domains[idx].count += 1,
            None => {
                positions.insert(host.clone(), domains.len());
                domains.push(DomainRecord::new(&host));
            }
        }
    }

    domains
}
