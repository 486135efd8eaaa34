// Promoted results for the custom search engine
//
// Three tiers are generated per study week: one promotion summarising the
// week, one per topic exploration, and one per question within a topic.

use crate::xml::XmlElement;
use cselinks_scanner::CoursePage;
use cselinks_scanner::course::{CourseWeek, TopicSection};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const LOGO_URL: &str = "http://kmi.open.ac.uk/images/ou-logo.gif";
pub const PROMOTION_URL: &str = "http://www.open.ac.uk";

/// Longest description the search engine importer accepts.
pub const DESCRIPTION_LIMIT: usize = 199;
/// Longest comma-joined query list the search engine importer accepts.
pub const QUERY_LIMIT: usize = 499;

const ELLIPSIS: &str = " ...";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub queries: String,
    pub image_url: String,
    pub url: String,
}

impl Promotion {
    pub fn new(id: String, title: String, description: String, queries: String) -> Self {
        Self {
            id,
            title,
            description,
            queries,
            image_url: LOGO_URL.to_string(),
            url: PROMOTION_URL.to_string(),
        }
    }

    pub fn to_xml(&self) -> XmlElement {
        XmlElement::new("Promotion")
            .with_attr("image_url", &self.image_url)
            .with_attr("title", &self.title)
            .with_attr("id", &self.id)
            .with_attr("queries", &self.queries)
            .with_attr("url", &self.url)
            .with_attr("description", &self.description)
    }
}

pub fn promotions_to_xml(promotions: &[Promotion]) -> XmlElement {
    let mut root = XmlElement::new("Promotions");
    for promotion in promotions {
        root.push(promotion.to_xml());
    }
    root
}

// ============================================================================
// Text limits
// ============================================================================

/// Truncate to [`DESCRIPTION_LIMIT`] characters and normalise curly quotes
/// and non-breaking spaces.
pub fn check_description(desc: &str) -> String {
    let truncated = if desc.chars().count() > DESCRIPTION_LIMIT {
        let keep = DESCRIPTION_LIMIT - ELLIPSIS.len();
        let mut cut: String = desc.chars().take(keep).collect();
        cut.push_str(ELLIPSIS);
        cut
    } else {
        desc.to_string()
    };

    truncated
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace('\u{00A0}', " ")
}

/// Cut a comma-joined tag list back to whole tags until it fits in [`QUERY_LIMIT`].
pub fn check_query_tags(tags: &str) -> String {
    let mut tags = tags;
    while tags.chars().count() > QUERY_LIMIT {
        tags = match tags.rfind(',') {
            Some(idx) => &tags[..idx],
            None => {
                let end = tags
                    .char_indices()
                    .nth(QUERY_LIMIT)
                    .map(|(idx, _)| idx)
                    .unwrap_or(tags.len());
                &tags[..end]
            }
        };
    }
    tags.to_string()
}

// ============================================================================
// Query tags
// ============================================================================

/// Append `item` in lower case, alone and prefixed by the course code in
/// upper and lower case.
pub fn generic_query_tags(course_code: &str, item: &str, mut tags: Vec<String>) -> Vec<String> {
    let item = item.to_lowercase();
    tags.push(item.clone());
    tags.push(format!("{} {}", course_code.to_uppercase(), item));
    tags.push(format!("{} {}", course_code.to_lowercase(), item));
    tags
}

pub fn week_query_tags(course_code: &str, week_title: &str, tags: Vec<String>) -> Vec<String> {
    generic_query_tags(course_code, week_title, tags)
}

pub fn topic_query_tags(course_code: &str, heading: &TopicHeading, tags: Vec<String>) -> Vec<String> {
    let mut tags = generic_query_tags(course_code, &heading.label, tags);
    if !heading.theme.is_empty() {
        tags = generic_query_tags(course_code, &heading.theme, tags);
    }
    tags = generic_query_tags(course_code, &heading.number, tags);
    tags = generic_query_tags(course_code, &format!("topic {}", heading.number), tags);
    generic_query_tags(course_code, &format!("topic{}", heading.number), tags)
}

pub fn question_query_tags(
    course_code: &str,
    topic_number: &str,
    question: usize,
    tags: Vec<String>,
) -> Vec<String> {
    generic_query_tags(
        course_code,
        &format!("topic {} q{}", topic_number, question),
        tags,
    )
}

// ============================================================================
// Topic headings
// ============================================================================

/// A topic title split by word position.
///
/// Headings are expected to read `Topic Exploration <N> <theme>`: the first
/// three space-separated words form the label and the third word is the
/// topic number. Headings phrased any other way are mis-split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicHeading {
    pub label: String,
    pub number: String,
    pub theme: String,
}

impl TopicHeading {
    pub fn parse(title: &str) -> Option<Self> {
        let cleaned = title.replace('–', "");
        let words: Vec<&str> = cleaned.split(' ').collect();
        if words.len() < 3 {
            return None;
        }

        let number = words[2].trim_end_matches([':', '.', ',']);
        if number.is_empty() {
            return None;
        }

        Some(Self {
            label: words[..3].join(" "),
            number: number.to_string(),
            theme: words[3..].join(" ").trim().to_string(),
        })
    }

    pub fn id_fragment(&self) -> String {
        self.label.replace(' ', "")
    }
}

// ============================================================================
// Promotion builders
// ============================================================================

/// All promotions for one course page. Pages without a course code or week
/// structure produce none.
pub fn build_promotions(page: &CoursePage) -> Vec<Promotion> {
    let Some(ref course_code) = page.course_code else {
        warn!("Promotions: {} has no CourseCode, skipping", page.name);
        return Vec::new();
    };
    let Some(ref week) = page.week else {
        warn!("Promotions: {} has no week structure, skipping", page.name);
        return Vec::new();
    };

    let mut promotions = vec![week_promotion(course_code, week)];
    for topic in &week.topics {
        promotions.extend(topic_promotions(course_code, topic));
    }
    promotions
}

pub fn week_promotion(course_code: &str, week: &CourseWeek) -> Promotion {
    let description: String = week
        .topics
        .iter()
        .map(|t| format!("{} ", t.title.replace('–', "-")))
        .collect();
    let queries = week_query_tags(course_code, &week.title, Vec::new()).join(",");

    Promotion::new(
        format!("{}_{}", course_code, week.title.replace(' ', "")),
        week.title.clone(),
        check_description(&description),
        check_query_tags(&queries),
    )
}

/// The topic promotion followed by one promotion per question.
pub fn topic_promotions(course_code: &str, topic: &TopicSection) -> Vec<Promotion> {
    let Some(heading) = TopicHeading::parse(&topic.title) else {
        warn!("Promotions: cannot split topic heading '{}'", topic.title);
        return Vec::new();
    };
    debug!("Promotions: topic {}", heading.label);

    let topic_id = format!("{}_{}", course_code, heading.id_fragment());
    let topic_description = check_description(&heading.theme);
    let queries = topic_query_tags(course_code, &heading, Vec::new()).join(",");

    let mut promotions = vec![Promotion::new(
        topic_id.clone(),
        heading.label.clone(),
        topic_description.clone(),
        check_query_tags(&queries),
    )];

    let Some(items) = topic.questions.as_ref().and_then(|q| q.items.as_ref()) else {
        return promotions;
    };

    for (idx, question) in items.iter().enumerate() {
        let number = idx + 1;
        let queries = question_query_tags(course_code, &heading.number, number, Vec::new()).join(",");
        promotions.push(Promotion::new(
            format!("{}_{}", topic_id, number),
            format!("{} Question {}", heading.label, number),
            check_description(question),
            check_query_tags(&queries),
        ));
    }

    promotions[0].description =
        check_description(&format!("{} ({} questions)", topic_description, items.len()));
    promotions
}
