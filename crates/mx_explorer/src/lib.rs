//! Filter state and fetch orchestration for the article explorer.
//!
//! [`ExplorerState`] is a plain reducer: user intents and fetch completions
//! go in as [`Action`]s, requested side effects come out as [`Effect`]s.
//! [`Explorer`] owns one state and runs its fetch effects on the tokio
//! runtime, feeding completions back in as actions.

pub mod explorer;
pub mod selection;
pub mod state;
pub mod view;

pub use explorer::Explorer;
pub use selection::{Selection, ViewMode};
pub use state::{Action, Effect, ExplorerState, Notice};

pub mod prelude {
    pub use super::view::{ArticleCard, CardTarget, FilterBar};
    pub use super::{Action, Effect, Explorer, ExplorerState, Selection, ViewMode};
    pub use mx_core::{Article, ArticleQuery, FilterSet, Result};
}
