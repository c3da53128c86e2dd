//! What the widgets show, derived from [`ExplorerState`], and what their
//! clicks mean. Rendering itself lives in the binary.

use chrono::NaiveDate;
use mx_core::query::ADVISORY_TAG_LIMIT;
use mx_core::{tag_terms, Article};

use crate::selection::ViewMode;
use crate::state::{Action, ExplorerState};

pub const EMPTY_MESSAGE: &str = "No articles found for these criteria.";

pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Page heading for the current mode.
pub fn heading(state: &ExplorerState) -> String {
    let count = format!("({} articles)", state.articles.len());
    let selection = &state.selection;
    match state.mode() {
        ViewMode::Tag => format!("Tag search: {} {}", selection.tag.trim(), count),
        ViewMode::Author => format!(
            "Articles by {} {}",
            selection.author.as_deref().unwrap_or_default(),
            count
        ),
        ViewMode::Date => match selection.date {
            Some(date) => format!("Articles from {} {}", format_date(date), count),
            None => format!("Articles {}", count),
        },
    }
}

pub fn empty_message(state: &ExplorerState) -> Option<&'static str> {
    (!state.loading && state.articles.is_empty()).then_some(EMPTY_MESSAGE)
}

/// Date navigation and tag box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBar {
    pub date_label: String,
    pub date_enabled: bool,
    pub can_go_older: bool,
    pub can_go_newer: bool,
    pub tag: String,
    pub tag_count: usize,
    pub can_clear: bool,
}

impl FilterBar {
    pub fn from_state(state: &ExplorerState) -> Self {
        let selection = &state.selection;
        Self {
            date_label: selection
                .date
                .map(format_date)
                .unwrap_or_else(|| "no date".to_string()),
            date_enabled: state.mode().date_controls_enabled(),
            can_go_older: state.can_go_older(),
            can_go_newer: state.can_go_newer(),
            tag: selection.tag.clone(),
            tag_count: tag_terms(&selection.tag).len(),
            can_clear: selection.tag_expression().is_some() || selection.author.is_some(),
        }
    }

    pub fn tag_advice() -> String {
        format!("up to {} comma-separated tags", ADVISORY_TAG_LIMIT)
    }

    /// Only a hint; the search runs regardless.
    pub fn over_advice(&self) -> bool {
        self.tag_count > ADVISORY_TAG_LIMIT
    }

    pub fn older(&self) -> Option<Action> {
        self.can_go_older.then_some(Action::PrevDate)
    }

    pub fn newer(&self) -> Option<Action> {
        self.can_go_newer.then_some(Action::NextDate)
    }

    pub fn edit_tag(&self, tag: String) -> Action {
        Action::SetTag(tag)
    }

    pub fn clear(&self) -> Option<Action> {
        self.can_clear.then_some(Action::ClearFilters)
    }
}

/// Part of a card that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTarget {
    Body,
    Author,
    TitleLink,
}

#[derive(Debug, Clone, Copy)]
pub struct ArticleCard<'a> {
    pub article: &'a Article,
    pub selected: bool,
}

impl<'a> ArticleCard<'a> {
    pub fn new(article: &'a Article, state: &ExplorerState) -> Self {
        Self {
            article,
            selected: state.selection.article_id == Some(article.id),
        }
    }

    pub fn cards(state: &'a ExplorerState) -> Vec<ArticleCard<'a>> {
        state.articles.iter().map(|a| ArticleCard::new(a, state)).collect()
    }

    pub fn title(&self) -> &str {
        &self.article.title
    }

    pub fn author(&self) -> Option<&str> {
        self.article.author.as_deref()
    }

    pub fn date(&self) -> Option<String> {
        self.article.publication_date.map(|d| d.format("%Y-%m-%d").to_string())
    }

    pub fn summary(&self) -> &str {
        self.article.summary.as_deref().unwrap_or_default()
    }

    pub fn tags(&self) -> &[String] {
        &self.article.tags
    }

    pub fn reading_time(&self) -> &str {
        self.article.reading_time.as_deref().unwrap_or_default()
    }

    /// The title link opens the article and never selects the card.
    pub fn click(&self, target: CardTarget) -> Option<Action> {
        match target {
            CardTarget::Body => Some(Action::SelectArticle(self.article.id)),
            CardTarget::Author => self.author().map(|a| Action::SelectAuthor(a.to_string())),
            CardTarget::TitleLink => Some(Action::OpenArticle(self.article.id)),
        }
    }
}
