use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mx_client::{ArticleSource, ClientConfig, HttpClient};
use mx_explorer::Selection;
use mx_web::ArticleStore;
use tokio::net::TcpListener;
use tracing::info;

mod args;
mod browse;
mod listing;
mod logging;
mod opener;

use args::{Cli, Commands};
use logging::LogTarget;

async fn create_source(cli: &Cli) -> Result<Arc<dyn ArticleSource>> {
    if let Some(path) = &cli.fixture {
        let store = ArticleStore::from_file(path).await?;
        info!("📂 Reading articles from {}", path.display());
        return Ok(Arc::new(store));
    }
    let config = ClientConfig::new(&cli.api_url)?.with_timeout(cli.timeout.0);
    info!("🌐 Using API at {} (timeout {}s)", config.api_url, config.timeout.as_secs());
    Ok(Arc::new(HttpClient::new(&config)?))
}

fn log_target(cli: &Cli, command: &Commands) -> LogTarget {
    match (&cli.log_file, command) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, Commands::Browse) => LogTarget::Discard,
        (None, _) => LogTarget::Stderr,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::Browse);
    logging::init_logging(log_target(&cli, &command), cli.verbose)?;

    match command {
        Commands::Browse => {
            let source = create_source(&cli).await?;
            browse::run(source).await?;
        }
        Commands::Filters => {
            let source = create_source(&cli).await?;
            listing::print_filters(source).await?;
        }
        Commands::Articles { date, tag, author } => {
            let source = create_source(&cli).await?;
            let selection = Selection {
                date,
                tag: tag.unwrap_or_default(),
                author,
                article_id: None,
            };
            listing::print_articles(source, selection).await?;
        }
        Commands::Serve { path, host, port } => {
            let store = Arc::new(ArticleStore::from_file(&path).await?);
            let listener = TcpListener::bind((host.as_str(), port)).await?;
            mx_web::serve(listener, store).await?;
        }
    }

    Ok(())
}
