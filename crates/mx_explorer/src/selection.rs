use chrono::NaiveDate;
use mx_core::{ArticleId, ArticleQuery};

/// Which criterion drives the article query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Date,
    Tag,
    Author,
}

impl ViewMode {
    pub fn date_controls_enabled(self) -> bool {
        self == ViewMode::Date
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub date: Option<NaiveDate>,
    /// Raw tag input, possibly several comma-separated terms
    pub tag: String,
    pub author: Option<String>,
    pub article_id: Option<ArticleId>,
}

impl Selection {
    /// The tag input trimmed, or `None` when there is nothing to search for.
    pub fn tag_expression(&self) -> Option<&str> {
        let tag = self.tag.trim();
        (!tag.is_empty()).then_some(tag)
    }

    /// Tag beats author beats date.
    pub fn mode(&self) -> ViewMode {
        if self.tag_expression().is_some() {
            ViewMode::Tag
        } else if self.author.is_some() {
            ViewMode::Author
        } else {
            ViewMode::Date
        }
    }

    /// The query to send, if the selection carries any criterion at all.
    pub fn query(&self) -> Option<ArticleQuery> {
        if let Some(tag) = self.tag_expression() {
            return Some(ArticleQuery::Tag(tag.to_string()));
        }
        if let Some(author) = &self.author {
            return Some(ArticleQuery::Author(author.clone()));
        }
        self.date.map(ArticleQuery::Date)
    }

    /// The fields whose change triggers a refetch.
    pub(crate) fn criteria(&self) -> (Option<NaiveDate>, String, Option<String>) {
        (self.date, self.tag.clone(), self.author.clone())
    }
}
