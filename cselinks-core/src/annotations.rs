// Custom search engine annotations built from collected links

use crate::xml::XmlElement;
use cselinks_scanner::LinkIndex;
use cselinks_scanner::links::is_excluded;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Label of the custom search engine the annotations apply to.
pub const CSE_LABEL: &str = "_cse_bf8jg9spayc";

/// Second label attached to every annotation.
pub const COURSE_RESOURCE_LABEL: &str = "t151_course_resource";

/// Links whose host contains this are internal to the institution and are not indexed.
pub const EXCLUDED_DOMAIN: &str = "open.ac.uk";

pub const ANNOTATION_SCORE: &str = "1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub about: String,
    pub score: String,
    pub labels: Vec<String>,
}

impl Annotation {
    pub fn new(about: impl Into<String>, cse_label: &str) -> Self {
        Self {
            about: about.into(),
            score: ANNOTATION_SCORE.to_string(),
            labels: vec![cse_label.to_string(), COURSE_RESOURCE_LABEL.to_string()],
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("Annotation")
            .with_attr("about", &self.about)
            .with_attr("score", &self.score);
        for label in &self.labels {
            element.push(XmlElement::new("Label").with_attr("name", label));
        }
        element
    }
}

/// One annotation per external link, in link index order.
pub fn build_annotations(links: &LinkIndex, cse_label: &str) -> Vec<Annotation> {
    links
        .iter()
        .filter_map(|record| {
            if is_excluded(&record.url, EXCLUDED_DOMAIN) {
                debug!("Ignoring internal link {}", record.url);
                None
            } else {
                debug!("Annotating {}", record.url);
                Some(Annotation::new(record.url.clone(), cse_label))
            }
        })
        .collect()
}

pub fn annotations_to_xml(annotations: &[Annotation]) -> XmlElement {
    let mut root = XmlElement::new("Annotations");
    for annotation in annotations {
        root.push(annotation.to_xml());
    }
    root
}
