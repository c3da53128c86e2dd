use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mx_explorer::view::{ArticleCard, CardTarget, FilterBar};
use mx_explorer::{Action, Effect, Explorer};
use tracing::warn;

type Opener = Box<dyn Fn(&str) -> io::Result<()> + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    EditTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Older,
    Newer,
    StartTagEdit,
    StopTagEdit,
    TagChar(char),
    TagBackspace,
    ClearFilters,
    Refresh,
    MoveFocus(isize),
    MoveRow(isize),
    Card(CardTarget),
    Ignore,
}

pub fn map_key(mode: InputMode, key: KeyEvent) -> Command {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Command::Quit;
    }
    match mode {
        InputMode::EditTag => match key.code {
            KeyCode::Enter | KeyCode::Esc => Command::StopTagEdit,
            KeyCode::Backspace => Command::TagBackspace,
            KeyCode::Char(c) => Command::TagChar(c),
            _ => Command::Ignore,
        },
        InputMode::Browse => match key.code {
            KeyCode::Char('q') => Command::Quit,
            KeyCode::Left | KeyCode::Char('h') => Command::Older,
            KeyCode::Right | KeyCode::Char('l') => Command::Newer,
            KeyCode::Char('/') => Command::StartTagEdit,
            KeyCode::Esc => Command::ClearFilters,
            KeyCode::Char('r') => Command::Refresh,
            KeyCode::Up | KeyCode::Char('k') => Command::MoveRow(-1),
            KeyCode::Down | KeyCode::Char('j') => Command::MoveRow(1),
            KeyCode::Tab => Command::MoveFocus(1),
            KeyCode::BackTab => Command::MoveFocus(-1),
            KeyCode::Enter => Command::Card(CardTarget::Body),
            KeyCode::Char('a') => Command::Card(CardTarget::Author),
            KeyCode::Char('o') => Command::Card(CardTarget::TitleLink),
            _ => Command::Ignore,
        },
    }
}

/// Terminal-side state around the explorer: keyboard focus, tag editing and
/// the status line.
pub struct App {
    pub explorer: Explorer,
    pub input_mode: InputMode,
    pub focus: usize,
    pub columns: usize,
    pub status: Option<String>,
    pub should_quit: bool,
    opener: Opener,
}

impl App {
    pub fn new(explorer: Explorer, opener: impl Fn(&str) -> io::Result<()> + Send + 'static) -> Self {
        Self {
            explorer,
            input_mode: InputMode::Browse,
            focus: 0,
            columns: 1,
            status: None,
            should_quit: false,
            opener: Box::new(opener),
        }
    }

    pub fn filter_bar(&self) -> FilterBar {
        FilterBar::from_state(self.explorer.state())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;
        match map_key(self.input_mode, key) {
            Command::Quit => self.should_quit = true,
            Command::Older => {
                if let Some(action) = self.filter_bar().older() {
                    self.dispatch(action);
                }
            }
            Command::Newer => {
                if let Some(action) = self.filter_bar().newer() {
                    self.dispatch(action);
                }
            }
            Command::StartTagEdit => self.input_mode = InputMode::EditTag,
            Command::StopTagEdit => self.input_mode = InputMode::Browse,
            Command::TagChar(c) => {
                let mut tag = self.explorer.state().selection.tag.clone();
                tag.push(c);
                self.dispatch(Action::SetTag(tag));
            }
            Command::TagBackspace => {
                let mut tag = self.explorer.state().selection.tag.clone();
                if tag.pop().is_some() {
                    self.dispatch(Action::SetTag(tag));
                }
            }
            Command::ClearFilters => {
                if let Some(action) = self.filter_bar().clear() {
                    self.dispatch(action);
                }
            }
            Command::Refresh => self.dispatch(Action::Refresh),
            Command::MoveFocus(delta) => self.move_focus(delta),
            Command::MoveRow(delta) => self.move_focus(delta * self.columns as isize),
            Command::Card(target) => {
                let action = ArticleCard::cards(self.explorer.state())
                    .get(self.focus)
                    .and_then(|card| card.click(target));
                if let Some(action) = action {
                    self.dispatch(action);
                }
            }
            Command::Ignore => {}
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        for effect in self.explorer.dispatch(action) {
            if let Effect::OpenUrl(url) = effect {
                self.status = Some(match (self.opener)(&url) {
                    Ok(()) => format!("Opened {}", url),
                    Err(e) => {
                        warn!("Could not open {}: {}", url, e);
                        format!("Could not open {}: {}", url, e)
                    }
                });
            }
        }
        let len = self.explorer.state().articles.len();
        if self.focus >= len {
            self.focus = len.saturating_sub(1);
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let len = self.explorer.state().articles.len();
        if len == 0 {
            return;
        }
        let next = self.focus as isize + delta;
        self.focus = next.clamp(0, len as isize - 1) as usize;
    }
}
