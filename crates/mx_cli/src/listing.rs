use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{bail, Result};
use mx_client::ArticleSource;
use mx_core::FilterSet;
use mx_explorer::view::{self, ArticleCard};
use mx_explorer::{Action, Explorer, ExplorerState, Selection};
use tracing::warn;

pub async fn print_filters(source: Arc<dyn ArticleSource>) -> Result<()> {
    let filters = source.fetch_filters().await?;
    write_filters(&mut io::stdout().lock(), &filters)?;
    Ok(())
}

/// Runs the explorer once with a preset selection and prints what it shows.
/// Unlike the browser, a failed fetch is an error here.
pub async fn print_articles(source: Arc<dyn ArticleSource>, selection: Selection) -> Result<()> {
    let mut explorer = Explorer::with_selection(source, selection);
    explorer.dispatch(Action::Mount);
    explorer.settle().await;

    let state = explorer.state();
    check_outcome(state)?;
    write_listing(&mut io::stdout().lock(), state)?;
    Ok(())
}

/// Decides once every fetch has settled, so arrival order does not matter.
/// Filters only matter when they were needed to pick the default date.
fn check_outcome(state: &ExplorerState) -> Result<()> {
    if let Some(notice) = &state.articles_notice {
        bail!("{}", notice.message);
    }
    if let Some(notice) = &state.filters_notice {
        if state.selection.query().is_none() {
            bail!("{}", notice.message);
        }
        warn!("{}", notice.message);
    }
    Ok(())
}

pub fn write_filters(out: &mut impl Write, filters: &FilterSet) -> io::Result<()> {
    writeln!(out, "Dates ({}):", filters.dates.len())?;
    for date in &filters.dates {
        writeln!(out, "  {}", date)?;
    }
    writeln!(out, "Tags ({}):", filters.tags.len())?;
    for tag in &filters.tags {
        writeln!(out, "  {}", tag)?;
    }
    Ok(())
}

pub fn write_listing(out: &mut impl Write, state: &ExplorerState) -> io::Result<()> {
    writeln!(out, "{}", view::heading(state))?;
    if let Some(message) = view::empty_message(state) {
        writeln!(out, "{}", message)?;
        return Ok(());
    }
    for card in ArticleCard::cards(state) {
        writeln!(out)?;
        writeln!(out, "• {}", card.title())?;
        let byline: Vec<String> = [
            card.author().map(str::to_string),
            card.date(),
            Some(card.reading_time().to_string()).filter(|r| !r.is_empty()),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !byline.is_empty() {
            writeln!(out, "  {}", byline.join(" · "))?;
        }
        if !card.summary().is_empty() {
            writeln!(out, "  {}", card.summary())?;
        }
        if !card.tags().is_empty() {
            let tags: Vec<String> = card.tags().iter().map(|t| format!("#{}", t)).collect();
            writeln!(out, "  {}", tags.join(" "))?;
        }
        writeln!(out, "  {}", card.article.url)?;
    }
    Ok(())
}
