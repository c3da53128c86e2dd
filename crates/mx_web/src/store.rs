use std::collections::BTreeSet;
use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use mx_client::ArticleSource;
use mx_core::{tag_terms, Article, ArticleQuery, FilterSet, Result};
use tracing::info;

/// Criteria accepted by `/articles`. All present criteria must hold; an
/// article matches the tag criterion if it carries any of the tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    pub date: Option<NaiveDate>,
    pub tags: Vec<String>,
    pub author: Option<String>,
}

impl ArticleFilter {
    pub fn matches(&self, article: &Article) -> bool {
        if let Some(date) = self.date {
            if article.publication_date != Some(date) {
                return false;
            }
        }
        if let Some(author) = &self.author {
            if article.author.as_ref() != Some(author) {
                return false;
            }
        }
        self.tags.is_empty() || self.tags.iter().any(|t| article.tags.contains(t))
    }
}

impl From<&ArticleQuery> for ArticleFilter {
    fn from(query: &ArticleQuery) -> Self {
        match query {
            ArticleQuery::Date(date) => Self {
                date: Some(*date),
                ..Self::default()
            },
            ArticleQuery::Tag(expr) => Self {
                tags: tag_terms(expr).into_iter().map(str::to_string).collect(),
                ..Self::default()
            },
            ArticleQuery::Author(author) => Self {
                author: Some(author.clone()),
                ..Self::default()
            },
        }
    }
}

/// Read-only set of articles loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct ArticleStore {
    articles: Vec<Article>,
}

impl ArticleStore {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// Loads a JSON array of articles.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read(path).await?;
        let articles: Vec<Article> = serde_json::from_slice(&raw)?;
        info!("📚 Loaded {} articles from {}", articles.len(), path.display());
        Ok(Self::new(articles))
    }

    /// Newest first, then highest id first. Undated articles sort ahead of
    /// dated ones, as a descending SQL sort would place NULLs.
    pub fn query(&self, filter: &ArticleFilter) -> Vec<Article> {
        let mut found: Vec<Article> = self
            .articles
            .iter().filter(|a| filter.matches(a)).cloned().collect();
        found.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
        found
    }

    pub fn filters(&self) -> FilterSet {
        let dates: BTreeSet<NaiveDate> = self.articles.iter().filter_map(|a| a.publication_date).collect();
        let tags = self
            .articles
            .iter()
            .flat_map(|a| a.tags.iter())
            .filter(|t| !t.is_empty())
            .cloned()
            .collect();
        FilterSet {
            dates: dates.into_iter().rev().collect(),
            tags,
        }
    }
}

fn sort_key(article: &Article) -> (bool, Option<NaiveDate>, i64) {
    (article.publication_date.is_none(), article.publication_date, article.id)
}

#[async_trait]
impl ArticleSource for ArticleStore {
    async fn fetch_filters(&self) -> Result<FilterSet> {
        Ok(self.filters())
    }

    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        Ok(self.query(&ArticleFilter::from(query)))
    }
}
