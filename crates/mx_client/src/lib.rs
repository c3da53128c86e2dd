use async_trait::async_trait;
use mx_core::{Article, ArticleQuery, FilterSet, Result};

pub mod config;
pub mod http;

pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use http::HttpClient;

/// Where the explorer gets its data from.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Dates and tags available for filtering
    async fn fetch_filters(&self) -> Result<FilterSet>;

    /// Articles matching a single query discriminant
    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>>;
}

pub mod prelude {
    pub use super::{ArticleSource, ClientConfig, HttpClient};
    pub use mx_core::{Article, ArticleQuery, Error, FilterSet, Result};
}
