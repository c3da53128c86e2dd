use std::sync::Arc;

use crate::store::ArticleStore;

pub struct AppState {
    pub store: Arc<ArticleStore>,
}
