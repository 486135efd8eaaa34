// Section matchers for the course authoring conventions
//
// SA documents are only loosely schematized. Each kind of section the
// extractor cares about gets one predicate here that returns `Some(match)`
// when the node has the expected shape and `None` otherwise. Callers skip
// whatever depended on a `None`.

use crate::text::flatten;
use roxmltree::Node;

/// Title prefix identifying a topic exploration section.
pub const TOPIC_PREFIX: &str = "Topic";

/// Title prefix identifying the questions sub-section of a topic.
pub const QUESTIONS_PREFIX: &str = "Questions";

/// First direct child element named `name`.
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

/// All descendant elements named `name`, in document order, excluding `node` itself.
pub fn descendants<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants().skip(1).filter(move |n| n.has_tag_name(name))
}

/// First descendant element named `name`, excluding `node` itself.
pub fn descendant<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> Option<Node<'a, 'input>> {
    descendants(node, name).next()
}

/// The `CourseTitle` element directly under the document root.
pub fn course_title<'a, 'input>(root: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    child(root, "CourseTitle")
}

/// Text of the first `CourseCode` element, trimmed. Empty codes count as absent.
pub fn course_code(root: Node<'_, '_>) -> Option<String> {
    descendant(root, "CourseCode")
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// A study week: the first `Unit/Session` and the first `Unit/Session/Title`.
#[derive(Debug, Clone, Copy)]
pub struct WeekMatch<'a, 'input> {
    pub session: Node<'a, 'input>,
    pub title: Node<'a, 'input>,
}

pub fn match_week<'a, 'input>(root: Node<'a, 'input>) -> Option<WeekMatch<'a, 'input>> {
    let mut sessions = descendants(root, "Unit")
        .flat_map(|unit| unit.children().filter(|n| n.has_tag_name("Session")));

    let session = sessions.next()?;
    let title = std::iter::once(session)
        .chain(sessions)
        .find_map(|s| child(s, "Title"))?;

    Some(WeekMatch { session, title })
}

/// A `Section` whose first descendant `Title` starts with [`TOPIC_PREFIX`].
#[derive(Debug, Clone)]
pub struct TopicMatch<'a, 'input> {
    pub section: Node<'a, 'input>,
    pub title: String,
}

pub fn match_topic<'a, 'input>(section: Node<'a, 'input>) -> Option<TopicMatch<'a, 'input>> {
    if !section.has_tag_name("Section") {
        return None;
    }
    let title = flatten(descendant(section, "Title")?);
    if !title.starts_with(TOPIC_PREFIX) {
        return None;
    }
    Some(TopicMatch { section, title })
}

/// Every topic exploration below a week session, nested sections included.
pub fn topic_sections<'a, 'input>(
    session: Node<'a, 'input>,
) -> impl Iterator<Item = TopicMatch<'a, 'input>> {
    descendants(session, "Section").filter_map(match_topic)
}

/// The questions block of a topic: its first `SubSection`, when that
/// sub-section's first child element starts with [`QUESTIONS_PREFIX`].
///
/// `list` is the sub-section's direct `NumberedList` child, which some
/// weeks omit.
#[derive(Debug, Clone, Copy)]
pub struct QuestionsMatch<'a, 'input> {
    pub sub_section: Node<'a, 'input>,
    pub list: Option<Node<'a, 'input>>,
}

impl<'a, 'input> QuestionsMatch<'a, 'input> {
    /// Every `ListItem` under the numbered list. Empty when there is no list.
    pub fn items(&self) -> impl Iterator<Item = Node<'a, 'input>> {
        self.list
            .into_iter()
            .flat_map(|list| list.descendants().filter(|n| n.has_tag_name("ListItem")))
    }
}

pub fn match_questions<'a, 'input>(
    topic_section: Node<'a, 'input>,
) -> Option<QuestionsMatch<'a, 'input>> {
    let sub_section = descendant(topic_section, "SubSection")?;
    let heading = sub_section.first_element_child()?;
    if !flatten(heading).starts_with(QUESTIONS_PREFIX) {
        return None;
    }
    Some(QuestionsMatch {
        sub_section,
        list: child(sub_section, "NumberedList"),
    })
}

/// An `InternalSection` resource list, titled by its first child element.
#[derive(Debug, Clone)]
pub struct ResourceListMatch<'a, 'input> {
    pub section: Node<'a, 'input>,
    pub title: String,
}

impl<'a, 'input> ResourceListMatch<'a, 'input> {
    /// Anchors that are direct children of a `ListItem` and carry an `href`.
    pub fn anchors(&self) -> impl Iterator<Item = Node<'a, 'input>> {
        descendants(self.section, "ListItem")
            .flat_map(|item| item.children().filter(|n| n.has_tag_name("a")))
            .filter(|a| a.attribute("href").is_some())
    }
}

pub fn match_resource_list<'a, 'input>(
    section: Node<'a, 'input>,
) -> Option<ResourceListMatch<'a, 'input>> {
    if !section.has_tag_name("InternalSection") {
        return None;
    }
    let heading = section.first_element_child()?;
    Some(ResourceListMatch {
        section,
        title: flatten(heading),
    })
}

pub fn resource_lists<'a, 'input>(
    topic_section: Node<'a, 'input>,
) -> impl Iterator<Item = ResourceListMatch<'a, 'input>> {
    descendants(topic_section, "InternalSection").filter_map(match_resource_list)
}

/// Every anchor in the document that carries an `href`.
pub fn anchors<'a, 'input>(root: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    descendants(root, "a").filter(|a| a.attribute("href").is_some())
}
