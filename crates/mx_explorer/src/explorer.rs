use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use mx_client::ArticleSource;
use mx_core::{ArticleQuery, Error};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::selection::Selection;
use crate::state::{Action, Effect, ExplorerState};

/// Owns an [`ExplorerState`] and runs its fetches.
///
/// Fetches are spawned on the current tokio runtime and report back through
/// a channel; nothing touches the state except [`Explorer::dispatch`]. A
/// fetch that panics still reports back, as a failed fetch.
pub struct Explorer {
    source: Arc<dyn ArticleSource>,
    state: ExplorerState,
    tx: UnboundedSender<Action>,
    rx: UnboundedReceiver<Action>,
    pending: usize,
}

impl Explorer {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self::with_selection(source, Selection::default())
    }

    pub fn with_selection(source: Arc<dyn ArticleSource>, selection: Selection) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            state: ExplorerState::new(selection),
            tx,
            rx,
            pending: 0,
        }
    }

    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    /// Number of fetches whose completion has not been received yet.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Applies an action and starts any fetch it asks for. Effects the
    /// explorer cannot carry out itself (opening a URL) are handed back.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let effects = self.state.update(action);
        let mut unhandled = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchFilters => self.fetch_filters(),
                Effect::FetchArticles { seq, query } => self.fetch_articles(seq, query),
                other => unhandled.push(other),
            }
        }
        unhandled
    }

    /// Waits for the next fetch completion. The caller is expected to
    /// dispatch it.
    pub async fn recv(&mut self) -> Option<Action> {
        let action = self.rx.recv().await;
        if action.is_some() {
            self.pending = self.pending.saturating_sub(1);
        }
        action
    }

    /// Dispatches completions until no fetch is outstanding.
    pub async fn settle(&mut self) {
        while self.pending > 0 {
            match self.recv().await {
                Some(action) => {
                    self.dispatch(action);
                }
                None => break,
            }
        }
    }

    fn fetch_filters(&mut self) {
        let source = self.source.clone();
        let tx = self.tx.clone();
        self.pending += 1;
        tokio::spawn(async move {
            let result = AssertUnwindSafe(source.fetch_filters())
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(panicked(panic)));
            if tx.send(Action::FiltersLoaded(result)).is_err() {
                debug!("Explorer dropped before filters arrived");
            }
        });
    }

    fn fetch_articles(&mut self, seq: u64, query: ArticleQuery) {
        let source = self.source.clone();
        let tx = self.tx.clone();
        self.pending += 1;
        tokio::spawn(async move {
            let result = AssertUnwindSafe(source.fetch_articles(&query))
                .catch_unwind()
                .await
                .unwrap_or_else(|panic| Err(panicked(panic)));
            if tx.send(Action::ArticlesLoaded { seq, result }).is_err() {
                debug!("Explorer dropped before response #{} arrived", seq);
            }
        });
    }
}

fn panicked(panic: Box<dyn Any + Send>) -> Error {
    let message = if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    Error::Task(message)
}
