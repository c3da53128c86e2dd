use mx_explorer::view::{self, ArticleCard, FilterBar};
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tui::Frame;

use super::app::{App, InputMode};

const CARD_HEIGHT: u16 = 9;

pub fn columns_for(width: u16) -> usize {
    match width {
        0..=39 => 1,
        40..=79 => 2,
        80..=119 => 3,
        120..=159 => 4,
        _ => 5,
    }
}

pub fn draw<B: Backend>(f: &mut Frame<B>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Filters
            Constraint::Length(1), // Heading
            Constraint::Min(0),    // Cards
            Constraint::Length(1), // Status
        ])
        .split(f.size());

    draw_title(f, chunks[0]);
    draw_filter_bar(f, app, chunks[1]);

    let heading = Paragraph::new(view::heading(app.explorer.state()))
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(heading, chunks[2]);

    draw_cards(f, app, chunks[3]);
    draw_status(f, app, chunks[4]);
}

fn draw_title<B: Backend>(f: &mut Frame<B>, area: Rect) {
    let title = Paragraph::new(vec![
        Spans::from(Span::styled(
            "Article Explorer",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::styled("Your daily tech reading", Style::default().fg(Color::Gray))),
    ]);
    f.render_widget(title, area);
}

fn draw_filter_bar<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let bar = FilterBar::from_state(app.explorer.state());
    let enabled = |on: bool| {
        if on {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let editing = app.input_mode == InputMode::EditTag;
    let tag_style = if editing {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let cursor = if editing { "_" } else { "" };

    let mut spans = vec![
        Span::styled("◀ older ", enabled(bar.can_go_older)),
        Span::styled(format!("[{}]", bar.date_label), enabled(bar.date_enabled)),
        Span::styled(" newer ▶", enabled(bar.can_go_newer)),
        Span::raw("   Tags: "),
        Span::styled(format!("{}{}", bar.tag, cursor), tag_style),
    ];
    let advice_style = if bar.over_advice() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    spans.push(Span::styled(format!("  ({})", FilterBar::tag_advice()), advice_style));
    if bar.can_clear {
        spans.push(Span::styled("   Esc: reset", Style::default().fg(Color::Red)));
    }

    let filters = Paragraph::new(Spans::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Filters "));
    f.render_widget(filters, area);
}

fn draw_cards<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let state = app.explorer.state();
    if state.loading {
        let loading = Paragraph::new("Loading…").alignment(Alignment::Center);
        f.render_widget(loading, centered_line(area));
        return;
    }
    if let Some(message) = view::empty_message(state) {
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center);
        f.render_widget(empty, centered_line(area));
        return;
    }

    let columns = app.columns.max(1);
    let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let focus_row = app.focus / columns;
    let first_row = focus_row.saturating_sub(visible_rows - 1);

    let cards = ArticleCard::cards(state);
    let column_constraints = vec![Constraint::Ratio(1, columns as u32); columns];
    for (row_index, row) in cards.chunks(columns).enumerate().skip(first_row).take(visible_rows) {
        let y = area.y + ((row_index - first_row) as u16) * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
        let row_area = Rect::new(area.x, y, area.width, height);
        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints.clone())
            .split(row_area);
        for (column, card) in row.iter().enumerate() {
            let focused = row_index * columns + column == app.focus;
            draw_card(f, card, focused, slots[column]);
        }
    }
}

fn draw_card<B: Backend>(f: &mut Frame<B>, card: &ArticleCard<'_>, focused: bool, area: Rect) {
    let mut block = Block::default().borders(Borders::ALL);
    if card.selected {
        block = block.border_type(BorderType::Thick);
    }
    if focused {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let byline = match (card.author(), card.date()) {
        (Some(author), Some(date)) => format!("{} · {}", author, date),
        (Some(author), None) => author.to_string(),
        (None, Some(date)) => date,
        (None, None) => String::new(),
    };
    let body = Paragraph::new(vec![
        Spans::from(Span::styled(
            card.title().to_string(),
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::styled(byline, Style::default().fg(Color::Gray))),
        Spans::from(Span::raw(card.summary().to_string())),
    ])
    .wrap(Wrap { trim: true });
    f.render_widget(body, parts[0]);

    let tags: Vec<String> = card.tags().iter().map(|t| format!("#{}", t)).collect();
    let footer = Paragraph::new(Spans::from(vec![
        Span::styled(tags.join(" "), Style::default().fg(Color::Magenta)),
        Span::raw(" "),
        Span::styled(card.reading_time().to_string(), Style::default().fg(Color::DarkGray)),
    ]));
    f.render_widget(footer, parts[1]);
}

fn draw_status<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let state = app.explorer.state();
    let line = if let Some(notice) = state.notice() {
        Span::styled(notice.message.clone(), Style::default().fg(Color::Red))
    } else if let Some(status) = &app.status {
        Span::raw(status.clone())
    } else if app.input_mode == InputMode::EditTag {
        Span::styled("Enter/Esc: done editing tags", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(
            "←/→ date  / tags  Esc reset  ↑↓/Tab move  Enter select  a author  o open  r refresh  q quit",
            Style::default().fg(Color::DarkGray),
        )
    };
    f.render_widget(Paragraph::new(Spans::from(line)), area);
}

fn centered_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, area.height.min(1))
}
