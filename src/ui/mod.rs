// UI module for rendering the TUI.
// Lays out the URL input, history list, result panel, and status bar.

mod history;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus};
use crate::history::ArticleStore;
use crate::state::LookupState;

/// Main draw function that renders the entire UI.
pub fn draw<S: ArticleStore, C>(frame: &mut Frame, app: &mut App<S, C>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // URL input
            Constraint::Min(1),    // History and result
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_input(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    history::draw_history(frame, app, body[0]);
    draw_result(frame, &app.lookup, body[1]);
    draw_status_bar(frame, app, chunks[2]);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Draw the URL input line.
fn draw_input<S, C>(frame: &mut Frame, app: &App<S, C>, area: Rect) {
    let focused = app.focus == Focus::Input;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(" Article URL ");

    let text = if app.input.is_empty() && !focused {
        Paragraph::new("Paste the article link").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(app.input.as_str())
    };
    frame.render_widget(text.block(block), area);

    if focused {
        let width = app.input.chars().count() as u16;
        let x = (area.x + 1 + width).min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

/// Draw the result panel for the current lookup.
fn draw_result(frame: &mut Frame, lookup: &LookupState, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    match lookup {
        LookupState::Idle => {
            let text = Paragraph::new("Paste an article link and press Enter")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block.title(" Summary "));
            frame.render_widget(text, area);
        }
        LookupState::Requesting { url } => {
            let text = Paragraph::new(format!("⏳ Summarizing {}...", url))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true })
                .block(block.title(" Summary "));
            frame.render_widget(text, area);
        }
        LookupState::Failed(message) => {
            let lines = vec![
                Line::from(Span::styled(
                    "Well, that wasn't supposed to happen...",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    message.as_str(),
                    Style::default().fg(Color::Gray),
                )),
            ];
            let text = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    block
                        .title(" Summary ")
                        .border_style(Style::default().fg(Color::Red)),
                );
            frame.render_widget(text, area);
        }
        LookupState::Success(article) => {
            let title = Line::from(vec![
                Span::raw(" Article "),
                Span::styled(
                    "Summary ",
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
            let text = Paragraph::new(article.summary.as_str())
                .wrap(Wrap { trim: false })
                .block(block.title(title));
            frame.render_widget(text, area);
        }
    }
}

/// Draw the status bar with key hints and the last message.
fn draw_status_bar<S, C>(frame: &mut Frame, app: &App<S, C>, area: Rect) {
    let key = Style::default().fg(Color::Cyan);
    let mut spans = match app.focus {
        Focus::Input => vec![
            Span::styled("Enter", key),
            Span::raw(" summarize  "),
            Span::styled("Tab", key),
            Span::raw(" history  "),
            Span::styled("Esc", key),
            Span::raw(" quit"),
        ],
        Focus::History => vec![
            Span::styled("↑/↓", key),
            Span::raw(" select  "),
            Span::styled("Enter", key),
            Span::raw(" show  "),
            Span::styled("Tab", key),
            Span::raw(" input  "),
            Span::styled("q", key),
            Span::raw(" quit"),
        ],
    };

    if let Some(status) = &app.status {
        spans.push(Span::styled(
            format!("  │ {} {}", status.at.format("%H:%M:%S"), status.text),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
