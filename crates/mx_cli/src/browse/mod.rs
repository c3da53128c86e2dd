use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use futures::StreamExt;
use mx_client::ArticleSource;
use mx_explorer::{Action, Explorer};
use tracing::info;
use tui::backend::{Backend, CrosstermBackend};
use tui::Terminal;

pub mod app;
pub mod render;

pub use app::App;

enum Message {
    Terminal(Event),
    Fetched(Action),
}

pub async fn run(source: Arc<dyn ArticleSource>) -> Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let app = App::new(Explorer::new(source), crate::opener::open);
    let result = event_loop(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let mut events = EventStream::new();
    app.dispatch(Action::Mount);
    info!("🔭 Browser started");

    while !app.should_quit {
        app.columns = render::columns_for(terminal.size()?.width);
        terminal.draw(|f| render::draw(f, &app))?;

        let message = tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => Message::Terminal(event),
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(action) = app.explorer.recv() => Message::Fetched(action),
        };

        match message {
            Message::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Message::Terminal(_) => {}
            Message::Fetched(action) => app.dispatch(action),
        }
    }
    Ok(())
}
