use serde::{Deserialize, Serialize};

/// Every description seen for one URL, in the order the anchors were found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,
    pub count: usize,
    pub descriptions: Vec<String>,
}

impl LinkRecord {
    pub fn new(url: String, description: String) -> Self {
        Self {
            url,
            count: 1,
            descriptions: vec![description],
        }
    }

    /// Record another occurrence. The count always mirrors the description list.
    pub fn push_description(&mut self, description: String) {
        self.descriptions.push(description);
        self.count = self.descriptions.len();
    }
}

/// What a single document contributed to the link index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    pub name: String,
    pub anchors_found: usize,
    pub new_urls: usize,
}
