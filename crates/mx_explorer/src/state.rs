use chrono::NaiveDate;
use mx_core::{Article, ArticleId, ArticleQuery, Error, ErrorKind, FilterSet, Result};
use tracing::{debug, info, warn};

use crate::selection::{Selection, ViewMode};

/// Everything that can happen to the explorer.
#[derive(Debug)]
pub enum Action {
    /// First render: load filters, and articles if the selection already
    /// names a criterion
    Mount,
    FiltersLoaded(Result<FilterSet>),
    SetDate(Option<NaiveDate>),
    /// One step older
    PrevDate,
    /// One step newer
    NextDate,
    SetTag(String),
    SelectAuthor(String),
    ClearAuthor,
    /// Drops tag and author, keeps the date
    ClearFilters,
    SelectArticle(ArticleId),
    OpenArticle(ArticleId),
    Refresh,
    ArticlesLoaded {
        seq: u64,
        result: Result<Vec<Article>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchFilters,
    FetchArticles { seq: u64, query: ArticleQuery },
    OpenUrl(String),
}

/// A failed fetch, kept for display until the same fetch next succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: ErrorKind,
    pub message: String,
}

impl Notice {
    fn from_error(what: &str, err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: format!("Could not load {}: {}", what, err),
        }
    }
}

#[derive(Debug, Default)]
pub struct ExplorerState {
    pub filters: FilterSet,
    pub filters_loaded: bool,
    pub selection: Selection,
    pub articles: Vec<Article>,
    pub loading: bool,
    /// Last `/filters` failure
    pub filters_notice: Option<Notice>,
    /// Last `/articles` failure
    pub articles_notice: Option<Notice>,
    latest_seq: u64,
}

impl ExplorerState {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.selection.mode()
    }

    pub fn can_go_older(&self) -> bool {
        self.mode().date_controls_enabled() && self.older_date().is_some()
    }

    pub fn can_go_newer(&self) -> bool {
        self.mode().date_controls_enabled() && self.newer_date().is_some()
    }

    pub fn selected_article(&self) -> Option<&Article> {
        let id = self.selection.article_id?;
        self.articles.iter().find(|a| a.id == id)
    }

    /// The notice to show: an articles failure wins over a filters one.
    pub fn notice(&self) -> Option<&Notice> {
        self.articles_notice.as_ref().or(self.filters_notice.as_ref())
    }

    /// Sequence number of the most recently issued articles request.
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    fn older_date(&self) -> Option<NaiveDate> {
        self.selection.date.and_then(|d| self.filters.older_than(d))
    }

    fn newer_date(&self) -> Option<NaiveDate> {
        self.selection.date.and_then(|d| self.filters.newer_than(d))
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Mount => {
                let mut effects = vec![Effect::FetchFilters];
                effects.extend(self.issue_fetch());
                effects
            }
            Action::FiltersLoaded(Ok(filters)) => {
                info!("Loaded {} dates and {} tags", filters.dates.len(), filters.tags.len());
                self.filters = filters;
                self.filters_loaded = true;
                self.filters_notice = None;
                if self.selection.date.is_none() && self.selection.author.is_none() {
                    if let Some(newest) = self.filters.newest() {
                        return self.change(|s| s.date = Some(newest));
                    }
                }
                vec![]
            }
            Action::FiltersLoaded(Err(err)) => {
                warn!("Error fetching filters: {}", err);
                self.filters_notice = Some(Notice::from_error("filters", &err));
                vec![]
            }
            Action::SetDate(date) => {
                if !self.mode().date_controls_enabled() {
                    debug!("Ignoring date change while {:?} mode is active", self.mode());
                    return vec![];
                }
                self.change(|s| s.date = date)
            }
            Action::PrevDate => match self.older_date() {
                Some(date) if self.mode().date_controls_enabled() => self.change(|s| s.date = Some(date)),
                _ => vec![],
            },
            Action::NextDate => match self.newer_date() {
                Some(date) if self.mode().date_controls_enabled() => self.change(|s| s.date = Some(date)),
                _ => vec![],
            },
            Action::SetTag(tag) => self.change(|s| s.tag = tag),
            Action::SelectAuthor(author) => {
                if author.trim().is_empty() {
                    return vec![];
                }
                self.selection.article_id = None;
                self.change(|s| s.author = Some(author))
            }
            Action::ClearAuthor => self.change(|s| s.author = None),
            Action::ClearFilters => self.change(|s| {
                s.tag.clear();
                s.author = None;
            }),
            Action::SelectArticle(id) => {
                self.selection.article_id = Some(id);
                vec![]
            }
            Action::OpenArticle(id) => self
                .articles
                .iter()
                .find(|a| a.id == id)
                .map(|a| vec![Effect::OpenUrl(a.url.clone())])
                .unwrap_or_default(),
            Action::Refresh => self.issue_fetch().into_iter().collect(),
            Action::ArticlesLoaded { seq, result } => {
                if seq != self.latest_seq {
                    debug!("Discarding response #{} superseded by #{}", seq, self.latest_seq);
                    return vec![];
                }
                self.loading = false;
                match result {
                    Ok(articles) => {
                        debug!("Response #{} carried {} articles", seq, articles.len());
                        self.articles = articles;
                        self.articles_notice = None;
                    }
                    Err(err) => {
                        // Keep whatever is on screen.
                        warn!("Error fetching articles: {}", err);
                        self.articles_notice = Some(Notice::from_error("articles", &err));
                    }
                }
                vec![]
            }
        }
    }

    fn change(&mut self, edit: impl FnOnce(&mut Selection)) -> Vec<Effect> {
        let before = self.selection.criteria();
        edit(&mut self.selection);
        if self.selection.criteria() == before {
            return vec![];
        }
        match self.issue_fetch() {
            Some(effect) => vec![effect],
            None => {
                // Nothing to ask for; whatever is in flight no longer applies.
                self.latest_seq += 1;
                self.loading = false;
                vec![]
            }
        }
    }

    fn issue_fetch(&mut self) -> Option<Effect> {
        let query = self.selection.query()?;
        self.latest_seq += 1;
        self.loading = true;
        debug!("Issuing request #{} for {}", self.latest_seq, query);
        Some(Effect::FetchArticles {
            seq: self.latest_seq,
            query,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn filters(dates: &[&str]) -> FilterSet {
        FilterSet {
            dates: dates.iter().map(|d| date(d)).collect(),
            tags: ["AI", "Rust"].iter().map(|t| t.to_string()).collect(),
        }
    }

    fn article(id: i64, author: &str) -> Article {
        Article {
            id,
            title: format!("Article {}", id),
            url: format!("https://medium.com/p/{}", id),
            author: Some(author.to_string()),
            publication_date: Some(date("2024-03-01")),
            image_url: None,
            summary: None,
            tags: vec!["Rust".to_string()],
            reading_time: Some("4 min read".to_string()),
        }
    }

    fn fetch(seq: u64, query: ArticleQuery) -> Vec<Effect> {
        vec![Effect::FetchArticles { seq, query }]
    }

    fn mounted(dates: &[&str]) -> ExplorerState {
        let mut state = ExplorerState::default();
        assert_eq!(state.update(Action::Mount), vec![Effect::FetchFilters]);
        state.update(Action::FiltersLoaded(Ok(filters(dates))));
        state
    }

    fn loaded(state: &mut ExplorerState, articles: Vec<Article>) {
        let seq = state.latest_seq();
        state.update(Action::ArticlesLoaded { seq, result: Ok(articles) });
    }

    fn failure() -> Error {
        Error::Status {
            status: 500,
            url: "http://localhost:6051/articles".to_string(),
        }
    }

    #[test]
    fn test_initial_load_selects_newest_date() {
        let mut state = ExplorerState::default();
        state.update(Action::Mount);
        let effects = state.update(Action::FiltersLoaded(Ok(filters(&["2024-03-01", "2024-02-15"]))));

        assert_eq!(state.selection.date, Some(date("2024-03-01")));
        assert_eq!(effects, fetch(1, ArticleQuery::Date(date("2024-03-01"))));
        assert!(state.loading);
        assert!(state.filters_loaded);
    }

    #[test]
    fn test_default_date_respects_preselection() {
        let mut state = ExplorerState::new(Selection {
            author: Some("Jane Doe".to_string()),
            ..Selection::default()
        });
        let effects = state.update(Action::Mount);
        assert_eq!(
            effects,
            vec![
                Effect::FetchFilters,
                Effect::FetchArticles { seq: 1, query: ArticleQuery::Author("Jane Doe".to_string()) },
            ]
        );
        let effects = state.update(Action::FiltersLoaded(Ok(filters(&["2024-03-01"]))));
        assert!(effects.is_empty());
        assert_eq!(state.selection.date, None);

        let mut state = ExplorerState::new(Selection {
            date: Some(date("2024-02-15")),
            ..Selection::default()
        });
        state.update(Action::Mount);
        state.update(Action::FiltersLoaded(Ok(filters(&["2024-03-01", "2024-02-15"]))));
        assert_eq!(state.selection.date, Some(date("2024-02-15")));
    }

    #[test]
    fn test_no_dates_means_no_fetch() {
        let mut state = ExplorerState::default();
        state.update(Action::Mount);
        let effects = state.update(Action::FiltersLoaded(Ok(FilterSet::default())));
        assert!(effects.is_empty());
        assert!(!state.loading);
        assert_eq!(state.selection.date, None);
    }

    #[test]
    fn test_date_navigation_stays_in_bounds() {
        let mut state = mounted(&["2024-03-01", "2024-02-15", "2024-01-02"]);
        assert!(!state.can_go_newer());
        assert!(state.update(Action::NextDate).is_empty());
        assert_eq!(state.selection.date, Some(date("2024-03-01")));

        assert_eq!(state.update(Action::PrevDate), fetch(2, ArticleQuery::Date(date("2024-02-15"))));
        assert_eq!(state.update(Action::PrevDate), fetch(3, ArticleQuery::Date(date("2024-01-02"))));
        assert!(!state.can_go_older());
        assert!(state.update(Action::PrevDate).is_empty());
        assert_eq!(state.selection.date, Some(date("2024-01-02")));

        assert_eq!(state.update(Action::NextDate), fetch(4, ArticleQuery::Date(date("2024-02-15"))));
        assert!(state.can_go_newer());
        assert!(state.can_go_older());
    }

    #[test]
    fn test_date_navigation_from_unknown_date_is_noop() {
        let mut state = mounted(&["2024-03-01", "2024-02-15"]);
        state.update(Action::SetDate(Some(date("2023-12-25"))));
        assert!(state.update(Action::PrevDate).is_empty());
        assert!(state.update(Action::NextDate).is_empty());
        assert_eq!(state.selection.date, Some(date("2023-12-25")));
    }

    #[test]
    fn test_tag_search_overrides_date() {
        let mut state = mounted(&["2024-03-01", "2024-02-15"]);
        let effects = state.update(Action::SetTag("AI, Rust".to_string()));
        assert_eq!(effects, fetch(2, ArticleQuery::Tag("AI, Rust".to_string())));
        assert_eq!(state.mode(), ViewMode::Tag);
        assert!(!state.can_go_older());
        assert!(state.update(Action::PrevDate).is_empty());

        // Same value again is not a change.
        assert!(state.update(Action::SetTag("AI, Rust".to_string())).is_empty());

        let effects = state.update(Action::SetTag(String::new()));
        assert_eq!(effects, fetch(3, ArticleQuery::Date(date("2024-03-01"))));
        assert_eq!(state.mode(), ViewMode::Date);
    }

    #[test]
    fn test_author_drill_down() {
        let mut state = mounted(&["2024-03-01", "2024-02-15"]);
        loaded(&mut state, vec![article(1, "Jane Doe"), article(2, "John Roe")]);
        state.update(Action::SelectArticle(2));
        assert_eq!(state.selected_article().map(|a| a.id), Some(2));

        let effects = state.update(Action::SelectAuthor("Jane Doe".to_string()));
        assert_eq!(effects, fetch(2, ArticleQuery::Author("Jane Doe".to_string())));
        assert_eq!(state.selection.article_id, None);
        assert_eq!(state.mode(), ViewMode::Author);
        assert!(state.update(Action::SetDate(Some(date("2024-02-15")))).is_empty());
        assert_eq!(state.selection.date, Some(date("2024-03-01")));

        // A tag still wins over the author.
        let effects = state.update(Action::SetTag("Rust".to_string()));
        assert_eq!(effects, fetch(3, ArticleQuery::Tag("Rust".to_string())));
        let effects = state.update(Action::SetTag(String::new()));
        assert_eq!(effects, fetch(4, ArticleQuery::Author("Jane Doe".to_string())));

        let effects = state.update(Action::ClearAuthor);
        assert_eq!(effects, fetch(5, ArticleQuery::Date(date("2024-03-01"))));
        assert_eq!(state.mode(), ViewMode::Date);
    }

    #[test]
    fn test_blank_author_is_ignored() {
        let mut state = mounted(&["2024-03-01"]);
        assert!(state.update(Action::SelectAuthor("  ".to_string())).is_empty());
        assert_eq!(state.selection.author, None);
    }

    #[test]
    fn test_clear_filters_keeps_date() {
        let mut state = mounted(&["2024-03-01", "2024-02-15"]);
        state.update(Action::PrevDate);
        state.update(Action::SelectAuthor("Jane Doe".to_string()));
        state.update(Action::SetTag("AI".to_string()));

        let effects = state.update(Action::ClearFilters);
        assert_eq!(state.selection.tag, "");
        assert_eq!(state.selection.author, None);
        assert_eq!(state.selection.date, Some(date("2024-02-15")));
        assert_eq!(effects, fetch(5, ArticleQuery::Date(date("2024-02-15"))));

        assert!(state.update(Action::ClearFilters).is_empty());
    }

    #[test]
    fn test_failed_fetch_keeps_stale_articles() {
        let mut state = mounted(&["2024-03-01", "2024-02-15"]);
        loaded(&mut state, vec![article(1, "Jane Doe")]);
        assert!(!state.loading);

        state.update(Action::PrevDate);
        assert!(state.loading);
        let seq = state.latest_seq();
        state.update(Action::ArticlesLoaded { seq, result: Err(failure()) });

        assert!(!state.loading);
        assert_eq!(state.articles.len(), 1);
        let notice = state.notice().cloned().unwrap();
        assert_eq!(notice.kind, ErrorKind::Status);
        assert!(notice.message.starts_with("Could not load articles"));

        // The next success clears the notice.
        state.update(Action::Refresh);
        loaded(&mut state, vec![]);
        assert!(state.notice().is_none());
        assert!(state.articles.is_empty());
    }

    #[test]
    fn test_first_failed_fetch_leaves_list_empty() {
        let mut state = mounted(&["2024-03-01"]);
        state.update(Action::ArticlesLoaded { seq: 1, result: Err(failure()) });
        assert!(state.articles.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_failed_filters_leave_no_default() {
        let mut state = ExplorerState::default();
        state.update(Action::Mount);
        let effects = state.update(Action::FiltersLoaded(Err(failure())));
        assert!(effects.is_empty());
        assert!(!state.filters_loaded);
        assert_eq!(state.selection.date, None);
        assert!(state.notice().unwrap().message.starts_with("Could not load filters"));
    }

    #[test]
    fn test_articles_success_keeps_filters_failure() {
        let author = || {
            let mut state = ExplorerState::new(Selection {
                author: Some("Jane Doe".to_string()),
                ..Selection::default()
            });
            state.update(Action::Mount);
            state
        };

        let mut filters_first = author();
        filters_first.update(Action::FiltersLoaded(Err(failure())));
        loaded(&mut filters_first, vec![article(1, "Jane Doe")]);

        let mut articles_first = author();
        loaded(&mut articles_first, vec![article(1, "Jane Doe")]);
        articles_first.update(Action::FiltersLoaded(Err(failure())));

        for state in [&filters_first, &articles_first] {
            assert!(state.articles_notice.is_none());
            assert!(state.filters_notice.is_some());
            assert!(state.notice().unwrap().message.starts_with("Could not load filters"));
            assert!(!state.filters_loaded);
            assert_eq!(state.articles.len(), 1);
        }
    }

    #[test]
    fn test_articles_failure_outranks_filters_failure() {
        let mut state = ExplorerState::new(Selection {
            tag: "Rust".to_string(),
            ..Selection::default()
        });
        state.update(Action::Mount);
        state.update(Action::ArticlesLoaded { seq: 1, result: Err(failure()) });
        state.update(Action::FiltersLoaded(Err(failure())));
        assert!(state.notice().unwrap().message.starts_with("Could not load articles"));

        state.update(Action::FiltersLoaded(Ok(filters(&["2024-03-01"]))));
        assert!(state.filters_notice.is_none());
        assert!(state.articles_notice.is_some());
    }

    #[test]
    fn test_superseded_response_is_discarded() {
        let mut state = mounted(&["2024-03-01"]);
        state.update(Action::SetTag("A".to_string()));
        state.update(Action::SetTag("AI".to_string()));
        assert_eq!(state.latest_seq(), 3);

        state.update(Action::ArticlesLoaded { seq: 3, result: Ok(vec![article(3, "Jane Doe")]) });
        state.update(Action::ArticlesLoaded { seq: 2, result: Ok(vec![article(2, "John Roe")]) });
        state.update(Action::ArticlesLoaded { seq: 1, result: Err(failure()) });

        assert_eq!(state.articles.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3]);
        assert!(state.notice().is_none());
        assert!(!state.loading);
    }

    #[test]
    fn test_clearing_every_criterion_invalidates_in_flight() {
        let mut state = ExplorerState::default();
        state.update(Action::Mount);
        state.update(Action::SetTag("Rust".to_string()));
        assert!(state.loading);

        assert!(state.update(Action::SetTag(String::new())).is_empty());
        assert!(!state.loading);
        state.update(Action::ArticlesLoaded { seq: 1, result: Ok(vec![article(1, "Jane Doe")]) });
        assert!(state.articles.is_empty());
    }

    #[test]
    fn test_open_article() {
        let mut state = mounted(&["2024-03-01"]);
        loaded(&mut state, vec![article(1, "Jane Doe")]);
        assert_eq!(
            state.update(Action::OpenArticle(1)),
            vec![Effect::OpenUrl("https://medium.com/p/1".to_string())]
        );
        assert!(state.update(Action::OpenArticle(99)).is_empty());
        assert_eq!(state.selection.article_id, None);
    }

    #[test]
    fn test_refresh_without_criteria() {
        let mut state = ExplorerState::default();
        assert!(state.update(Action::Refresh).is_empty());
        assert!(!state.loading);
    }
}
