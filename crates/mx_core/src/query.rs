use std::fmt;

use chrono::NaiveDate;

/// Advisory upper bound shown next to the tag box. Not enforced.
pub const ADVISORY_TAG_LIMIT: usize = 3;

/// The single criterion sent to `/articles`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArticleQuery {
    Date(NaiveDate),
    Tag(String),
    Author(String),
}

impl ArticleQuery {
    pub fn key(&self) -> &'static str {
        match self {
            ArticleQuery::Date(_) => "date",
            ArticleQuery::Tag(_) => "tag",
            ArticleQuery::Author(_) => "author",
        }
    }

    pub fn value(&self) -> String {
        match self {
            ArticleQuery::Date(date) => date.format("%Y-%m-%d").to_string(),
            ArticleQuery::Tag(tag) => tag.clone(),
            ArticleQuery::Author(author) => author.clone(),
        }
    }

    /// `key=value` with the value percent-encoded as a URI component.
    pub fn query_string(&self) -> String {
        format!("{}={}", self.key(), urlencoding::encode(&self.value()))
    }

    pub fn path_and_query(&self) -> String {
        format!("articles?{}", self.query_string())
    }
}

impl fmt::Display for ArticleQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_and_query())
    }
}

/// Splits a tag expression on commas, dropping blank terms.
pub fn tag_terms(expr: &str) -> Vec<&str> {
    expr.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
