// Tests for the mind-map outline

use cselinks_core::outline::{
    MAP_VERSION, OutlineNode, QUESTIONS_LABEL, build_outline, outline_to_xml, topic_node,
};
use cselinks_scanner::CoursePage;
use cselinks_scanner::course::{
    CourseWeek, QuestionBlock, ResourceLink, ResourceList, TopicSection,
};
use roxmltree::Document;

fn page(name: &str, week: Option<CourseWeek>) -> CoursePage {
    CoursePage {
        name: name.to_string(),
        course_title: Some("Digital worlds".to_string()),
        course_code: Some("T151".to_string()),
        week,
    }
}

fn sample_topic() -> TopicSection {
    TopicSection {
        title: "Topic Exploration 1A – Game design".to_string(),
        questions: Some(QuestionBlock {
            items: Some(vec!["Why play?".to_string(), "Who plays?".to_string()]),
        }),
        resources: vec![ResourceList {
            title: "Web links".to_string(),
            links: vec![ResourceLink {
                href: "http://example.com/design".to_string(),
                text: "Design notes".to_string(),
            }],
        }],
    }
}

fn sample_week(title: &str) -> CourseWeek {
    CourseWeek {
        title: title.to_string(),
        topics: vec![sample_topic()],
    }
}

// ============================================================================
// Node Construction Tests
// ============================================================================

#[test]
fn test_topic_node_structure() {
    let node = topic_node(&sample_topic());

    assert_eq!(node.text, "Topic Exploration 1A – Game design");
    assert!(node.folded);
    assert_eq!(node.children.len(), 2);

    let questions = &node.children[0];
    assert_eq!(questions.text, QUESTIONS_LABEL);
    assert!(questions.folded);
    assert_eq!(
        questions.children,
        vec![OutlineNode::leaf("Why play?"), OutlineNode::leaf("Who plays?")]
    );

    let resources = &node.children[1];
    assert_eq!(resources.text, "Web links");
    assert!(resources.folded);
    assert_eq!(
        resources.children,
        vec![OutlineNode::link("Design notes", "http://example.com/design")]
    );
}

#[test]
fn test_topic_node_questions_without_list() {
    let mut topic = sample_topic();
    topic.questions = Some(QuestionBlock { items: None });
    topic.resources.clear();

    let node = topic_node(&topic);
    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].text, QUESTIONS_LABEL);
    assert!(node.children[0].children.is_empty());
}

#[test]
fn test_topic_node_without_questions() {
    let mut topic = sample_topic();
    topic.questions = None;

    let node = topic_node(&topic);
    assert_eq!(node.children.len(), 1);
    assert_eq!(node.children[0].text, "Web links");
}

// ============================================================================
// Outline Tests
// ============================================================================

#[test]
fn test_build_outline_skips_special_pages() {
    let pages = vec![
        page("t151Week0.xml", Some(sample_week("Week 0"))),
        page("t151Week1.xml", Some(sample_week("Week 1"))),
        page("t151Week10.xml", Some(sample_week("Week 10"))),
        page("t151Week2.xml", Some(sample_week("Week 2"))),
    ];

    let outline = build_outline(
        &pages[2],
        &pages,
        &["t151Week0.xml", "t151Week10.xml"],
        1_300_000_000,
    );

    assert_eq!(outline.text, "Digital worlds");
    assert_eq!(outline.created, Some(1_300_000_000));
    assert_eq!(outline.style.as_deref(), Some("fork"));

    let weeks: Vec<&str> = outline.children.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(weeks, vec!["Week 1", "Week 2"]);
    assert!(outline.children.iter().all(|n| n.folded));
}

#[test]
fn test_build_outline_skips_pages_without_week() {
    let pages = vec![
        page("t151Week1.xml", None),
        page("t151Week2.xml", Some(sample_week("Week 2"))),
    ];

    let outline = build_outline(&pages[1], &pages, &[], 0);
    assert_eq!(outline.children.len(), 1);
    assert_eq!(outline.children[0].text, "Week 2");
}

#[test]
fn test_build_outline_root_title_fallback() {
    let mut root = page("t151Week10.xml", None);
    root.course_title = None;

    let outline = build_outline(&root, &[], &[], 0);
    assert_eq!(outline.text, "t151Week10");
    assert!(outline.children.is_empty());
}

#[test]
fn test_node_count() {
    let pages = vec![page("t151Week1.xml", Some(sample_week("Week 1")))];
    let outline = build_outline(&pages[0], &pages, &[], 0);

    // root, week, topic, questions + 2, resources + 1
    assert_eq!(outline.node_count(), 8);
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn test_outline_xml_shape() {
    let pages = vec![page("t151Week1.xml", Some(sample_week("Week 1")))];
    let outline = build_outline(&pages[0], &pages, &[], 42);
    let xml = outline_to_xml(&outline).to_xml_string().unwrap();

    let doc = Document::parse(&xml).unwrap();
    let map = doc.root_element();
    assert_eq!(map.tag_name().name(), "map");
    assert_eq!(map.attribute("version"), Some(MAP_VERSION));

    let root = map.children().find(|n| n.has_tag_name("node")).unwrap();
    assert_eq!(root.attribute("TEXT"), Some("Digital worlds"));
    assert_eq!(root.attribute("CREATED"), Some("42"));
    assert_eq!(root.attribute("STYLE"), Some("fork"));
    assert_eq!(root.attribute("FOLDED"), None);

    let week = root.children().find(|n| n.has_tag_name("node")).unwrap();
    assert_eq!(week.attribute("TEXT"), Some("Week 1"));
    assert_eq!(week.attribute("FOLDED"), Some("true"));

    let link = map
        .descendants()
        .find(|n| n.attribute("LINK").is_some())
        .unwrap();
    assert_eq!(link.attribute("LINK"), Some("http://example.com/design"));
    assert_eq!(link.attribute("TEXT"), Some("Design notes"));
    assert_eq!(link.attribute("FOLDED"), None);
}
