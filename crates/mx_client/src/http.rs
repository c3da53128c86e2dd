use std::fmt;

use async_trait::async_trait;
use mx_core::{Article, ArticleQuery, Error, FilterSet, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::{ArticleSource, ClientConfig};

pub struct HttpClient {
    client: Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path_and_query: &str) -> Result<Url> {
        Ok(self.base_url.join(path_and_query)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        // Read the body first so transport and JSON failures stay distinct.
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[async_trait]
impl ArticleSource for HttpClient {
    async fn fetch_filters(&self) -> Result<FilterSet> {
        let url = self.endpoint("filters")?;
        self.get_json(url).await
    }

    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let url = self.endpoint(&query.path_and_query())?;
        let articles: Vec<Article> = self.get_json(url).await?;
        debug!("{} returned {} articles", query, articles.len());
        Ok(articles)
    }
}
