//! In-memory stand-in for the article backend, for development and tests.

use std::sync::Arc;

use axum::{routing::get, Router};
use mx_core::Result;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod handlers;
pub mod state;
pub mod store;

pub use state::AppState;
pub use store::{ArticleFilter, ArticleStore};

pub fn create_app(store: Arc<ArticleStore>) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::root))
        .route("/articles", get(handlers::list_articles))
        .route("/filters", get(handlers::get_filters))
        .layer(cors)
        .with_state(Arc::new(AppState { store }))
}

pub async fn serve(listener: TcpListener, store: Arc<ArticleStore>) -> Result<()> {
    info!("🗞️ Fixture API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(store)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState, ArticleFilter, ArticleStore};
    pub use mx_core::{Article, Error, FilterSet, Result};
}
