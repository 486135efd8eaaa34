// Tests for document loading and course page extraction

use cselinks_scanner::course::{CoursePage, ResourceLink};
use cselinks_scanner::{CourseDocument, ScanError, load_documents};
use std::fs;
use tempfile::TempDir;

const WEEK_ONE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Item>
<CourseCode>T151</CourseCode>
<CourseTitle>Digital <b>worlds</b></CourseTitle>
<Unit>
<Session>
<Title>Week 1: Introduction</Title>
<Section><Title>Getting started</Title></Section>
<Section>
<Title>Topic Exploration 1A – Game design</Title>
<SubSection>
<Title>Questions</Title>
<NumberedList>
<ListItem>What makes a game fun?</ListItem>
<ListItem>Who plays <i>games</i>?</ListItem>
</NumberedList>
</SubSection>
<InternalSection>
<Heading>Web links</Heading>
<BulletedList>
<ListItem><a href="http://example.com/design"><font>Design notes</font></a></ListItem>
<ListItem><a href="http://www.open.ac.uk/library">Library</a></ListItem>
</BulletedList>
</InternalSection>
</Section>
<Section>
<Title>Topic Exploration 1B – Play</Title>
<SubSection><Title>Activities</Title></SubSection>
</Section>
</Session>
</Unit>
</Item>"#;

// ============================================================================
// Course Page Extraction Tests
// ============================================================================

#[test]
fn test_course_page_header_fields() {
    let doc = CourseDocument::new("t151Week1.xml", WEEK_ONE);
    let page = CoursePage::from_document(&doc).unwrap();

    assert_eq!(page.name, "t151Week1.xml");
    assert_eq!(page.course_code.as_deref(), Some("T151"));
    assert_eq!(page.course_title.as_deref(), Some("Digital worlds"));
}

#[test]
fn test_course_page_topics() {
    let doc = CourseDocument::new("t151Week1.xml", WEEK_ONE);
    let page = CoursePage::from_document(&doc).unwrap();
    let week = page.week.expect("week should be extracted");

    assert_eq!(week.title, "Week 1: Introduction");
    assert_eq!(week.topics.len(), 2);
    assert_eq!(week.topics[0].title, "Topic Exploration 1A – Game design");
    assert_eq!(week.topics[1].title, "Topic Exploration 1B – Play");
}

#[test]
fn test_course_page_questions() {
    let doc = CourseDocument::new("t151Week1.xml", WEEK_ONE);
    let page = CoursePage::from_document(&doc).unwrap();
    let week = page.week.unwrap();

    assert_eq!(
        week.topics[0].question_items(),
        &["What makes a game fun?".to_string(), "Who plays games?".to_string()]
    );
    assert!(week.topics[1].questions.is_none());
    assert!(week.topics[1].question_items().is_empty());
}

#[test]
fn test_course_page_resources() {
    let doc = CourseDocument::new("t151Week1.xml", WEEK_ONE);
    let page = CoursePage::from_document(&doc).unwrap();
    let topic = &page.week.unwrap().topics[0];

    assert_eq!(topic.resources.len(), 1);
    assert_eq!(topic.resources[0].title, "Web links");
    assert_eq!(
        topic.resources[0].links[0],
        ResourceLink {
            href: "http://example.com/design".to_string(),
            text: "Design notes".to_string(),
        }
    );
    assert_eq!(topic.resources[0].links.len(), 2);
}

#[test]
fn test_course_page_without_week_structure() {
    let doc = CourseDocument::new("t151Week0.xml", "<Item><CourseTitle>T151</CourseTitle></Item>");
    let page = CoursePage::from_document(&doc).unwrap();

    assert!(page.week.is_none());
    assert!(page.course_code.is_none());
}

#[test]
fn test_course_page_parse_error() {
    let doc = CourseDocument::new("bad.xml", "<Item>");
    let err = CoursePage::from_document(&doc).unwrap_err();
    assert!(matches!(err, ScanError::XmlError { .. }));
}

#[test]
fn test_document_with_doctype_parses() {
    let source = r#"<?xml version="1.0"?>
<!DOCTYPE Item [ <!ENTITY course "T151"> ]>
<Item><CourseCode>&course;</CourseCode></Item>"#;
    let doc = CourseDocument::new("dtd.xml", source);
    let page = CoursePage::from_document(&doc).unwrap();
    assert_eq!(page.course_code.as_deref(), Some("T151"));
}

// ============================================================================
// Document Loading Tests
// ============================================================================

#[test]
fn test_load_documents_sorted_xml_only() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("t151Week2.xml"), "<Item/>")?;
    fs::write(dir.path().join("t151Week1.xml"), "<Item/>")?;
    fs::write(dir.path().join("notes.txt"), "not xml")?;
    fs::create_dir(dir.path().join("nested.xml"))?;

    let docs = load_documents(dir.path())?;
    let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();

    assert_eq!(names, vec!["t151Week1.xml", "t151Week2.xml"]);
    assert_eq!(docs[0].stem(), "t151Week1");
    Ok(())
}

#[test]
fn test_course_page_stem() {
    let doc = CourseDocument::new("t151Week10.xml", "<Item/>");
    let page = CoursePage::from_document(&doc).unwrap();

    assert_eq!(page.stem(), "t151Week10");
    assert_eq!(page.stem(), doc.stem());
}

#[test]
fn test_load_documents_missing_directory() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = load_documents(&missing).unwrap_err();
    assert!(matches!(err, ScanError::NotADirectory(_)));
}
