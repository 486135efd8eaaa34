// Mind-map outline of the course: weeks, topic explorations, questions and resources
//
// The output follows the FreeMind `.mm` format: a `map` root holding nested
// `node` elements.

use crate::xml::XmlElement;
use cselinks_scanner::CoursePage;
use cselinks_scanner::course::{CourseWeek, ResourceList, TopicSection};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const MAP_VERSION: &str = "0.9.0";
pub const ROOT_STYLE: &str = "fork";
pub const QUESTIONS_LABEL: &str = "Questions";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutlineNode {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub folded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn leaf(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn folded(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            folded: true,
            ..Self::default()
        }
    }

    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(href.into()),
            ..Self::default()
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::node_count).sum::<usize>()
    }

    pub fn to_xml(&self) -> XmlElement {
        let mut element = XmlElement::new("node");
        if let Some(created) = self.created {
            element.set("CREATED", created.to_string());
        }
        if let Some(ref style) = self.style {
            element.set("STYLE", style.as_str());
        }
        if let Some(ref link) = self.link {
            element.set("LINK", link.as_str());
        }
        element.set("TEXT", self.text.as_str());
        if self.folded {
            element.set("FOLDED", "true");
        }
        for child in &self.children {
            element.push(child.to_xml());
        }
        element
    }
}

/// Build the outline rooted at `root_page`'s course title.
///
/// Every page in `pages` whose name is not in `excluded` contributes one
/// week node. Pages without the week structure are skipped.
pub fn build_outline(
    root_page: &CoursePage,
    pages: &[CoursePage],
    excluded: &[&str],
    created: i64,
) -> OutlineNode {
    let title = match root_page.course_title {
        Some(ref title) => title.clone(),
        None => {
            warn!("{} has no CourseTitle, using file name", root_page.name);
            root_page.stem().to_string()
        }
    };

    let mut root = OutlineNode {
        text: title,
        created: Some(created),
        style: Some(ROOT_STYLE.to_string()),
        ..OutlineNode::default()
    };

    for page in pages {
        if excluded.contains(&page.name.as_str()) {
            debug!("Outline: skipping special-case page {}", page.name);
            continue;
        }
        match page.week {
            Some(ref week) => root.children.push(week_node(week)),
            None => warn!("Outline: {} has no week structure, skipping", page.name),
        }
    }

    root
}

pub fn week_node(week: &CourseWeek) -> OutlineNode {
    let mut node = OutlineNode::folded(week.title.as_str());
    node.children = week.topics.iter().map(topic_node).collect();
    node
}

pub fn topic_node(topic: &TopicSection) -> OutlineNode {
    let mut node = OutlineNode::folded(topic.title.as_str());

    if let Some(ref questions) = topic.questions {
        let mut questions_node = OutlineNode::folded(QUESTIONS_LABEL);
        if let Some(ref items) = questions.items {
            questions_node.children = items.iter().map(OutlineNode::leaf).collect();
        }
        node.children.push(questions_node);
    }

    node.children
        .extend(topic.resources.iter().map(resource_node));
    node
}

pub fn resource_node(list: &ResourceList) -> OutlineNode {
    let mut node = OutlineNode::folded(list.title.as_str());
    node.children = list
        .links
        .iter()
        .map(|l| OutlineNode::link(l.text.as_str(), l.href.as_str()))
        .collect();
    node
}

/// Wrap the outline in the `map` root element.
pub fn outline_to_xml(root: &OutlineNode) -> XmlElement {
    XmlElement::new("map")
        .with_attr("version", MAP_VERSION)
        .with_child(root.to_xml())
}
