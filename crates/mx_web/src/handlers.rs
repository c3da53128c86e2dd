use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use mx_core::{tag_terms, Article, FilterSet};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::store::ArticleFilter;
use crate::AppState;

/// Raw `/articles` query parameters. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ArticleParams {
    pub date: Option<String>,
    pub tag: Option<String>,
    pub author: Option<String>,
}

impl TryFrom<ArticleParams> for ArticleFilter {
    type Error = ApiError;

    fn try_from(params: ArticleParams) -> Result<Self, Self::Error> {
        let date = match non_empty(params.date) {
            Some(raw) => Some(raw.parse::<NaiveDate>().map_err(|e| {
                ApiError::bad_request(format!("invalid date {:?}: {}", raw, e))
            })?),
            None => None,
        };
        let tags = params
            .tag
            .as_deref()
            .map(|t| tag_terms(t).into_iter().map(str::to_string).collect())
            .unwrap_or_default();
        Ok(ArticleFilter {
            date,
            tags,
            author: non_empty(params.author),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Error body shaped like the real backend's: `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn bad_request(detail: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Article Explorer API" }))
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArticleParams>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let filter = ArticleFilter::try_from(params)?;
    let articles = state.store.query(&filter);
    debug!("{:?} matched {} articles", filter, articles.len());
    Ok(Json(articles))
}

pub async fn get_filters(State(state): State<Arc<AppState>>) -> Json<FilterSet> {
    Json(state.store.filters())
}
