// Tests for link collection across documents

use cselinks_scanner::{CourseDocument, LinkIndex};
use std::collections::HashSet;

fn page(name: &str, body: &str) -> CourseDocument {
    CourseDocument::new(name, format!("<Item>{}</Item>", body))
}

#[test]
fn test_collect_single_document() {
    let doc = page(
        "t151Week1.xml",
        r#"<a href="http://example.com/x">Example</a><a href="http://www.open.ac.uk/y">OU</a>"#,
    );

    let (index, page_links) = LinkIndex::new().collect(&doc).unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(page_links.anchors_found, 2);
    assert_eq!(page_links.new_urls, 2);

    let record = index.get("http://example.com/x").unwrap();
    assert_eq!(record.count, 1);
    assert_eq!(record.descriptions, vec!["Example"]);
}

#[test]
fn test_duplicates_merge_across_documents() {
    let first = page(
        "t151Week1.xml",
        r#"<a href="http://example.com/x">Example</a><a href="http://example.com/x">Again</a>"#,
    );
    let second = page(
        "t151Week2.xml",
        r#"<a href="http://example.com/x"><font>Third</font></a><a href="http://other.org/">Other</a>"#,
    );

    let (index, _) = LinkIndex::new().collect(&first).unwrap();
    let (index, page_links) = index.collect(&second).unwrap();

    assert_eq!(page_links.anchors_found, 2);
    assert_eq!(page_links.new_urls, 1);

    let record = index.get("http://example.com/x").unwrap();
    assert_eq!(record.descriptions, vec!["Example", "Again", "Third"]);
    assert_eq!(record.count, 3);
    assert_eq!(index.total_occurrences(), 4);
}

#[test]
fn test_each_url_appears_once_with_consistent_count() {
    let docs = vec![
        page("a.xml", r#"<a href="u1">1</a><a href="u2">2</a><a href="u1">3</a>"#),
        page("b.xml", r#"<p><a href="u2">4</a></p><a href="u3">5</a>"#),
        page("c.xml", r#"<a href="u1">6</a>"#),
    ];

    let mut index = LinkIndex::new();
    for doc in &docs {
        index = index.collect(doc).unwrap().0;
    }

    let urls: Vec<&str> = index.iter().map(|r| r.url.as_str()).collect();
    let unique: HashSet<&str> = urls.iter().copied().collect();
    assert_eq!(urls.len(), unique.len());

    for record in &index {
        assert_eq!(record.count, record.descriptions.len());
    }
    assert_eq!(index.get("u1").unwrap().count, 3);
    assert_eq!(index.get("u2").unwrap().count, 2);
    assert_eq!(index.get("u3").unwrap().count, 1);
}

#[test]
fn test_first_seen_order_preserved() {
    let doc = page(
        "a.xml",
        r#"<a href="http://c.com/">c</a><a href="http://a.com/">a</a><a href="http://c.com/">c</a><a href="http://b.com/">b</a>"#,
    );
    let (index, _) = LinkIndex::new().collect(&doc).unwrap();

    let urls: Vec<&str> = index.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(urls, vec!["http://c.com/", "http://a.com/", "http://b.com/"]);
}

#[test]
fn test_anchors_without_href_ignored() {
    let doc = page("a.xml", r#"<a name="top">Top</a><a href="">Empty</a>"#);
    let (index, page_links) = LinkIndex::new().collect(&doc).unwrap();

    assert_eq!(page_links.anchors_found, 1);
    assert_eq!(index.len(), 1);
    assert!(index.get("").is_some());
}

#[test]
fn test_collect_malformed_document_fails() {
    let doc = CourseDocument::new("broken.xml", "<Item><a href='x'></Item>");
    let result = LinkIndex::new().collect(&doc);
    assert!(result.is_err());
}
