// Owned view of a course page, extracted through the section matchers

use crate::document::{CourseDocument, file_stem};
use crate::error::Result;
use crate::matcher::{
    self, QuestionsMatch, ResourceListMatch, TopicMatch, WeekMatch,
};
use crate::text::flatten;
use roxmltree::Node;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoursePage {
    pub name: String,
    pub course_title: Option<String>,
    pub course_code: Option<String>,
    pub week: Option<CourseWeek>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseWeek {
    pub title: String,
    pub topics: Vec<TopicSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSection {
    pub title: String,
    pub questions: Option<QuestionBlock>,
    pub resources: Vec<ResourceList>,
}

/// `items` is `None` when the questions sub-section has no numbered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBlock {
    pub items: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceList {
    pub title: String,
    pub links: Vec<ResourceLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub href: String,
    pub text: String,
}

impl CoursePage {
    /// Page name without the `.xml` extension.
    pub fn stem(&self) -> &str {
        file_stem(&self.name)
    }

    pub fn from_document(document: &CourseDocument) -> Result<Self> {
        let parsed = document.parse()?;
        Ok(Self::from_root(&document.name, parsed.root_element()))
    }

    pub fn from_root(name: &str, root: Node<'_, '_>) -> Self {
        let course_title = matcher::course_title(root).map(flatten);
        let course_code = matcher::course_code(root);
        let week = matcher::match_week(root).map(CourseWeek::from_match);

        if week.is_none() {
            debug!("{}: no Unit/Session/Title, skipping week structure", name);
        }

        Self {
            name: name.to_string(),
            course_title,
            course_code,
            week,
        }
    }
}

impl CourseWeek {
    fn from_match(week: WeekMatch<'_, '_>) -> Self {
        Self {
            title: flatten(week.title),
            topics: matcher::topic_sections(week.session)
                .map(TopicSection::from_match)
                .collect(),
        }
    }
}

impl TopicSection {
    fn from_match(topic: TopicMatch<'_, '_>) -> Self {
        let questions = matcher::match_questions(topic.section).map(QuestionBlock::from_match);
        if questions.is_none() {
            debug!("Topic '{}' has no questions sub-section", topic.title);
        }

        Self {
            questions,
            resources: matcher::resource_lists(topic.section)
                .map(ResourceList::from_match)
                .collect(),
            title: topic.title,
        }
    }

    /// Question texts, or an empty slice when there are none.
    pub fn question_items(&self) -> &[String] {
        self.questions
            .as_ref()
            .and_then(|q| q.items.as_deref())
            .unwrap_or(&[])
    }
}

impl QuestionBlock {
    fn from_match(questions: QuestionsMatch<'_, '_>) -> Self {
        let items = questions
            .list
            .map(|_| questions.items().map(flatten).collect());
        Self { items }
    }
}

impl ResourceList {
    fn from_match(list: ResourceListMatch<'_, '_>) -> Self {
        let links = list
            .anchors()
            .filter_map(|a| {
                a.attribute("href").map(|href| ResourceLink {
                    href: href.to_string(),
                    text: flatten(a),
                })
            })
            .collect();

        Self {
            title: list.title,
            links,
        }
    }
}
